//! Marketplace entity types.
//!
//! Each module is one instance of the resource pattern: the wire struct,
//! and where a dashboard edits it, the form model. All entities carry a
//! server-assigned `id` and read-only `meta` timestamps.

pub mod agent;
pub mod agent_tool;
pub mod appointment;
pub mod patient;
pub mod procedure;
pub mod supplier;

pub use agent::{Agent, AgentConfig, AgentForm};
pub use agent_tool::{AgentTool, HttpMethod, ToolParameters};
pub use appointment::{Appointment, AppointmentStatus};
pub use patient::{Patient, PatientForm};
pub use procedure::Procedure;
pub use supplier::{Supplier, SupplierCategory, SupplierForm};
