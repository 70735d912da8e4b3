use std::collections::BTreeMap;

use time::{Date, Duration};

use velora_entities::Appointment;

/// Granularity of the agenda view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaScope {
    Day,
    Week,
    Month,
}

/// One rendered agenda group: all appointments whose start falls in the
/// same day, Monday-based week, or calendar month.
#[derive(Debug, Clone)]
pub struct AgendaBucket {
    /// First day of the bucket, used for ordering and navigation.
    pub start: Date,
    pub label: String,
    /// Bucket members, ordered by start time. Status color comes from
    /// each appointment's `status.color()`.
    pub appointments: Vec<Appointment>,
}

/// Group appointments for the agenda view.
///
/// Pure date bucketing over server-fetched data: no aggregation the server
/// should be doing happens here. Buckets come back in chronological order;
/// days with no appointments produce no bucket.
pub fn bucket_appointments(appointments: &[Appointment], scope: AgendaScope) -> Vec<AgendaBucket> {
    let mut buckets: BTreeMap<Date, Vec<Appointment>> = BTreeMap::new();
    for appointment in appointments {
        let start = bucket_start(appointment.starts_at.date(), scope);
        buckets.entry(start).or_default().push(appointment.clone());
    }

    buckets
        .into_iter()
        .map(|(start, mut appointments)| {
            appointments.sort_by_key(|a| a.starts_at);
            AgendaBucket {
                start,
                label: bucket_label(start, scope),
                appointments,
            }
        })
        .collect()
}

fn bucket_start(date: Date, scope: AgendaScope) -> Date {
    match scope {
        AgendaScope::Day => date,
        AgendaScope::Week => {
            date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
        }
        AgendaScope::Month => date - Duration::days(i64::from(date.day()) - 1),
    }
}

fn bucket_label(start: Date, scope: AgendaScope) -> String {
    match scope {
        AgendaScope::Day => start.to_string(),
        AgendaScope::Week => format!("Week of {start}"),
        AgendaScope::Month => format!("{:04}-{:02}", start.year(), u8::from(start.month())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use time::macros::{date, datetime};
    use velora_core::EntityMeta;
    use velora_entities::AppointmentStatus;

    fn appointment(id: &str, starts_at: OffsetDateTime) -> Appointment {
        Appointment {
            id: id.to_string(),
            patient_id: "p-1".to_string(),
            professional_id: "prof-1".to_string(),
            procedure_id: "proc-1".to_string(),
            starts_at,
            ends_at: starts_at + Duration::minutes(30),
            status: AppointmentStatus::Scheduled,
            notes: None,
            meta: EntityMeta {
                created_at: starts_at,
                updated_at: starts_at,
            },
        }
    }

    #[test]
    fn test_day_buckets_are_chronological() {
        let appointments = vec![
            appointment("late", datetime!(2025-03-12 16:00 UTC)),
            appointment("early", datetime!(2025-03-10 09:00 UTC)),
            appointment("mid", datetime!(2025-03-10 14:00 UTC)),
        ];
        let buckets = bucket_appointments(&appointments, AgendaScope::Day);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, date!(2025-03-10));
        assert_eq!(buckets[0].label, "2025-03-10");
        // Within a bucket, ordered by start time
        assert_eq!(buckets[0].appointments[0].id, "early");
        assert_eq!(buckets[0].appointments[1].id, "mid");
        assert_eq!(buckets[1].appointments[0].id, "late");
    }

    #[test]
    fn test_week_buckets_start_on_monday() {
        let appointments = vec![
            // 2025-03-12 is a Wednesday; its week starts Monday 2025-03-10
            appointment("wed", datetime!(2025-03-12 10:00 UTC)),
            // Sunday of the same week
            appointment("sun", datetime!(2025-03-16 10:00 UTC)),
            // Monday of the next week
            appointment("next", datetime!(2025-03-17 10:00 UTC)),
        ];
        let buckets = bucket_appointments(&appointments, AgendaScope::Week);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, date!(2025-03-10));
        assert_eq!(buckets[0].appointments.len(), 2);
        assert_eq!(buckets[1].start, date!(2025-03-17));
    }

    #[test]
    fn test_month_buckets() {
        let appointments = vec![
            appointment("march", datetime!(2025-03-31 10:00 UTC)),
            appointment("april", datetime!(2025-04-01 10:00 UTC)),
        ];
        let buckets = bucket_appointments(&appointments, AgendaScope::Month);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, date!(2025-03-01));
        assert_eq!(buckets[0].label, "2025-03");
        assert_eq!(buckets[1].label, "2025-04");
    }

    #[test]
    fn test_empty_input_gives_no_buckets() {
        assert!(bucket_appointments(&[], AgendaScope::Day).is_empty());
    }
}
