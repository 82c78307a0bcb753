//! Constants used throughout the portal core crate.

/// Ward assigned to manual admissions when the caller does not name one.
pub const DEFAULT_WARD: &str = "General Ward";

/// Ward assigned to patients admitted from an emergency alert.
pub const DEFAULT_EMERGENCY_WARD: &str = "Emergency Department";

/// Patient identifier carried by alerts raised for someone not on the roster.
pub const GUEST_PATIENT_ID: &str = "GUEST";

/// Blood type recorded when none is known.
pub const UNKNOWN_BLOOD_TYPE: &str = "Unknown";

/// Placeholder for empty free-text medical fields.
pub const NONE_RECORDED: &str = "None";
