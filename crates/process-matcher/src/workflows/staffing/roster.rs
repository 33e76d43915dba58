use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{Employee, EmployeeId, EmployeeSubmission};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("employee name must not be empty")]
    EmptyName,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("email {0} already belongs to another employee")]
    DuplicateEmail(String),
    #[error("employee {0} not found")]
    NotFound(EmployeeId),
}

/// Employee records keyed by id, listed in creation order.
#[derive(Debug, Clone, Default)]
pub struct EmployeeRoster {
    employees: BTreeMap<EmployeeId, Employee>,
    next_id: u64,
}

impl EmployeeRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        submission: EmployeeSubmission,
        registered_on: NaiveDate,
    ) -> Result<Employee, RosterError> {
        let submission = self.validate(submission, None)?;
        self.next_id += 1;
        let employee = Employee {
            id: EmployeeId(self.next_id),
            name: submission.name,
            email: submission.email,
            potential: submission.potential,
            communication: submission.communication,
            assigned_process: None,
            registered_on,
        };

        self.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    /// Replace the editable fields; the assignment is left untouched.
    pub fn update(
        &mut self,
        id: EmployeeId,
        submission: EmployeeSubmission,
    ) -> Result<Employee, RosterError> {
        if !self.employees.contains_key(&id) {
            return Err(RosterError::NotFound(id));
        }
        let submission = self.validate(submission, Some(id))?;

        let employee = self.get_mut(id)?;
        employee.name = submission.name;
        employee.email = submission.email;
        employee.potential = submission.potential;
        employee.communication = submission.communication;
        Ok(employee.clone())
    }

    pub fn remove(&mut self, id: EmployeeId) -> Result<Employee, RosterError> {
        self.employees.remove(&id).ok_or(RosterError::NotFound(id))
    }

    pub fn get(&self, id: EmployeeId) -> Result<&Employee, RosterError> {
        self.employees.get(&id).ok_or(RosterError::NotFound(id))
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Employee> {
        let key = email_key(email);
        self.employees
            .values()
            .find(|employee| email_key(&employee.email) == key)
    }

    pub fn list(&self) -> Vec<Employee> {
        self.employees.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub(crate) fn set_assignment(
        &mut self,
        id: EmployeeId,
        process_name: Option<String>,
    ) -> Result<Employee, RosterError> {
        let employee = self.get_mut(id)?;
        employee.assigned_process = process_name;
        Ok(employee.clone())
    }

    fn get_mut(&mut self, id: EmployeeId) -> Result<&mut Employee, RosterError> {
        self.employees.get_mut(&id).ok_or(RosterError::NotFound(id))
    }

    fn validate(
        &self,
        submission: EmployeeSubmission,
        existing: Option<EmployeeId>,
    ) -> Result<EmployeeSubmission, RosterError> {
        let name = submission.name.trim().to_string();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }

        let email = submission.email.trim().to_string();
        if !looks_like_email(&email) {
            return Err(RosterError::InvalidEmail(email));
        }

        if let Some(owner) = self.find_by_email(&email) {
            if Some(owner.id) != existing {
                return Err(RosterError::DuplicateEmail(email));
            }
        }

        Ok(EmployeeSubmission {
            name,
            email,
            ..submission
        })
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
