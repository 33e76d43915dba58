use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::catalog::{CatalogError, ProcessCatalog, ProcessFilter, ValidationError};
use super::domain::{
    name_key, CommunicationLevel, Employee, EmployeeId, EmployeeSubmission, Potential, Process,
    ProcessRecord,
};
use super::matcher::{self, ProcessSuggestion};
use super::report::views::{AssignmentHistoryEntry, VacancyOverview};
use super::report::{assignment_history, vacancy_overview};
use super::roster::{EmployeeRoster, RosterError};

/// Result of registering an employee: the stored record plus its candidates.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub employee: Employee,
    pub matches: Vec<Process>,
}

/// Composes the process catalog and the employee roster. All mutations that
/// touch both go through here so vacancies and assignments stay in step.
#[derive(Debug, Clone, Default)]
pub struct StaffingDesk {
    catalog: ProcessCatalog,
    roster: EmployeeRoster,
}

impl StaffingDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: ProcessCatalog) -> Self {
        Self {
            catalog,
            roster: EmployeeRoster::new(),
        }
    }

    pub fn catalog(&self) -> &ProcessCatalog {
        &self.catalog
    }

    pub fn roster(&self) -> &EmployeeRoster {
        &self.roster
    }

    /// Replace the catalog. Existing assignments keep their process names even
    /// when the new table no longer lists them.
    pub fn load_processes<I>(&mut self, records: I) -> Result<usize, ValidationError>
    where
        I: IntoIterator<Item = ProcessRecord>,
    {
        self.catalog.load(records)
    }

    pub fn replace_catalog(&mut self, catalog: ProcessCatalog) {
        self.catalog = catalog;
    }

    pub fn processes(&self, filter: &ProcessFilter) -> Vec<Process> {
        self.catalog.filter(filter)
    }

    pub fn find_matches(
        &self,
        potential: Potential,
        communication: CommunicationLevel,
    ) -> Vec<Process> {
        matcher::find_matches(&self.catalog, potential, communication)
    }

    pub fn suggest(
        &self,
        potential: Potential,
        communication: CommunicationLevel,
    ) -> Vec<ProcessSuggestion> {
        matcher::suggest(&self.catalog, potential, communication)
    }

    pub fn register_employee(
        &mut self,
        submission: EmployeeSubmission,
        today: NaiveDate,
    ) -> Result<Registration, StaffingError> {
        let employee = self.roster.add(submission, today)?;
        let matches = self.find_matches(employee.potential, employee.communication);
        info!(
            employee = %employee.id,
            matches = matches.len(),
            "employee registered"
        );
        Ok(Registration { employee, matches })
    }

    pub fn employee(&self, id: EmployeeId) -> Result<&Employee, StaffingError> {
        Ok(self.roster.get(id)?)
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.roster.list()
    }

    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        submission: EmployeeSubmission,
    ) -> Result<Employee, StaffingError> {
        Ok(self.roster.update(id, submission)?)
    }

    /// Commit a match. Takes a seat from the target process first, so a full
    /// or unknown process leaves both catalog and roster untouched.
    pub fn assign(
        &mut self,
        id: EmployeeId,
        process_name: &str,
    ) -> Result<Employee, StaffingError> {
        let employee = self.roster.get(id)?;
        let previous = employee.assigned_process.clone();

        if let Some(current) = previous.as_deref() {
            if let Some(process) = self.catalog.get(process_name) {
                if process.name_key() == name_key(current) {
                    return Ok(employee.clone());
                }
            }
        }

        let assigned_name = self.catalog.decrement_vacancy(process_name)?.name.clone();
        if let Some(old) = previous {
            self.release_seat(&old);
        }

        let employee = self.roster.set_assignment(id, Some(assigned_name))?;
        info!(
            employee = %employee.id,
            process = employee.assigned_process.as_deref().unwrap_or_default(),
            "employee assigned"
        );
        Ok(employee)
    }

    pub fn unassign(&mut self, id: EmployeeId) -> Result<Employee, StaffingError> {
        let previous = self.roster.get(id)?.assigned_process.clone();
        if let Some(old) = previous {
            self.release_seat(&old);
        }
        Ok(self.roster.set_assignment(id, None)?)
    }

    pub fn remove_employee(&mut self, id: EmployeeId) -> Result<Employee, StaffingError> {
        let removed = self.roster.remove(id)?;
        if let Some(process) = removed.assigned_process.as_deref() {
            self.release_seat(process);
        }
        info!(employee = %removed.id, "employee removed");
        Ok(removed)
    }

    pub fn vacancy_overview(&self) -> VacancyOverview {
        vacancy_overview(&self.catalog)
    }

    pub fn assignment_history(&self) -> Vec<AssignmentHistoryEntry> {
        assignment_history(&self.roster.list())
    }

    // The catalog may have been replaced since the assignment was made.
    fn release_seat(&mut self, process_name: &str) {
        if let Err(err) = self.catalog.release_vacancy(process_name) {
            warn!(process = process_name, error = %err, "could not release vacancy");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffingError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl From<ValidationError> for StaffingError {
    fn from(err: ValidationError) -> Self {
        Self::Catalog(CatalogError::Validation(err))
    }
}
