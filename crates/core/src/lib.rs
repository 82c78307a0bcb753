//! # Portal Core
//!
//! Core logic for the hospital ward portal.
//!
//! This crate contains pure data operations over in-memory records:
//! - Domain records for portal accounts, the inpatient census, emergency alerts, agenda,
//!   pharmacy and board meetings ([`records`])
//! - The roster query engine: search, filter, sort and the sort-toggle state machine ([`query`])
//! - Admission and alert status rules ([`workflow`])
//! - The record store that owns the lists and applies mutations ([`store`])
//!
//! **No presentation or transport concerns**: rendering, forms and the AI advice client live
//! outside this crate (see `portal-advice`).

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod query;
pub mod records;
pub mod store;
pub mod workflow;

pub use config::CoreConfig;
pub use error::{PortalError, PortalResult};
pub use portal_types::{NonEmptyText, SearchTerm, TextError};
pub use query::{
    run_query, PatientQuery, RosterQuery, RosterSortKey, ScheduleQuery, ScheduleSortKey,
    SortDirection, SortState,
};
pub use store::{AdmissionRequest, PortalStore};
pub use workflow::TransitionPolicy;
