//! Process catalog, employee roster and the matching rules that connect them.
//!
//! [`StaffingDesk`] owns one catalog and one roster and is the entry point for
//! callers that assign employees; the catalog and matcher can also be used on
//! their own for read-only queries.

pub mod catalog;
mod desk;
pub mod domain;
pub mod import;
pub mod matcher;
pub mod report;
pub mod roster;
pub mod router;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ProcessCatalog, ProcessFilter, ValidationError};
pub use desk::{Registration, StaffingDesk, StaffingError};
pub use domain::{
    CommunicationLevel, Employee, EmployeeId, EmployeeSubmission, Potential, Process,
    ProcessRecord, UnknownCategory,
};
pub use import::{
    write_catalog, write_workbook, ProcessImportError, ProcessTableImporter, TableFormat,
};
pub use matcher::{find_matches, suggest, ProcessSuggestion};
pub use roster::{EmployeeRoster, RosterError};
pub use router::{shared_desk, staffing_router, SharedDesk};
