use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use velora_core::{Entity, EntityMeta};

/// Lifecycle state of a booked appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Calendar accent color for this status.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Scheduled => "#3b82f6",
            Self::Confirmed => "#10b981",
            Self::Completed => "#6b7280",
            Self::Cancelled => "#ef4444",
            Self::NoShow => "#f59e0b",
        }
    }

    /// Whether the slot still occupies calendar time.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::NoShow => write!(f, "no_show"),
        }
    }
}

/// A booked slot between a patient and a professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub professional_id: String,
    pub procedure_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub meta: EntityMeta,
}

impl Appointment {
    pub fn duration(&self) -> time::Duration {
        self.ends_at - self.starts_at
    }
}

impl Entity for Appointment {
    const RESOURCE: &'static str = "appointments";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_decoding() {
        let appointment = Appointment::from_wire(json!({
            "id": "appt-1",
            "patientId": "p-1",
            "professionalId": "prof-1",
            "procedureId": "proc-1",
            "startsAt": "2025-03-10T14:00:00Z",
            "endsAt": "2025-03-10T14:45:00Z",
            "status": "confirmed",
            "meta": {
                "createdAt": "2025-03-01T08:00:00Z",
                "updatedAt": "2025-03-01T08:00:00Z"
            }
        }))
        .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(appointment.duration(), time::Duration::minutes(45));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::NoShow).unwrap(),
            "\"no_show\""
        );
        let status: AppointmentStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_status_activity() {
        assert!(AppointmentStatus::Scheduled.is_active());
        assert!(AppointmentStatus::Confirmed.is_active());
        assert!(!AppointmentStatus::Cancelled.is_active());
        assert!(!AppointmentStatus::Completed.is_active());
    }
}
