use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{
    name_key, CommunicationLevel, Potential, Process, ProcessRecord, UnknownCategory,
};

/// Field-level rejection raised while loading process rows. `row` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("row {row}: process name must not be empty")]
    EmptyName { row: usize },
    #[error("row {row}: {source}")]
    UnknownCategory {
        row: usize,
        #[source]
        source: UnknownCategory,
    },
    #[error("row {row}: vacancy must be a non-negative integer, got {value}")]
    NegativeVacancy { row: usize, value: i64 },
    #[error("row {row}: vacancy must be a non-negative integer, got '{value}'")]
    InvalidVacancy { row: usize, value: String },
    #[error("row {row}: duplicate process name '{name}'")]
    DuplicateName { row: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("process '{name}' not found")]
    NotFound { name: String },
    #[error("process '{name}' has no vacancy left")]
    VacancyExhausted { name: String },
}

/// Multiselect-style filter; an empty selection admits every value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFilter {
    #[serde(default)]
    pub potentials: Vec<Potential>,
    #[serde(default)]
    pub communications: Vec<CommunicationLevel>,
}

impl ProcessFilter {
    pub fn admits(&self, process: &Process) -> bool {
        (self.potentials.is_empty() || self.potentials.contains(&process.potential))
            && (self.communications.is_empty()
                || self.communications.contains(&process.communication))
    }
}

/// In-memory table of processes, owned by whoever drives the staffing flow.
#[derive(Debug, Clone, Default)]
pub struct ProcessCatalog {
    processes: Vec<Process>,
}

impl ProcessCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = ProcessRecord>,
    {
        let mut catalog = Self::new();
        catalog.load(records)?;
        Ok(catalog)
    }

    /// Replace the catalog wholesale. Every row is validated before anything
    /// is swapped in, so a rejected load keeps the previous contents.
    pub fn load<I>(&mut self, records: I) -> Result<usize, ValidationError>
    where
        I: IntoIterator<Item = ProcessRecord>,
    {
        let mut processes = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;
            let process = validate_record(row, record)?;
            if seen.insert(process.name_key(), row).is_some() {
                return Err(ValidationError::DuplicateName {
                    row,
                    name: process.name,
                });
            }
            processes.push(process);
        }

        let loaded = processes.len();
        self.processes = processes;
        info!(processes = loaded, vacancies = self.total_vacancy(), "process catalog loaded");
        Ok(loaded)
    }

    pub fn list_all(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn get(&self, process_name: &str) -> Option<&Process> {
        let key = name_key(process_name);
        self.processes.iter().find(|process| process.name_key() == key)
    }

    pub fn decrement_vacancy(&mut self, process_name: &str) -> Result<&Process, CatalogError> {
        let process = self.find_mut(process_name)?;
        if process.vacancy == 0 {
            return Err(CatalogError::VacancyExhausted {
                name: process.name.clone(),
            });
        }

        process.vacancy -= 1;
        debug!(process = %process.name, vacancy = process.vacancy, "vacancy decremented");
        Ok(process)
    }

    /// Give a seat back, e.g. when an assignment is undone.
    pub fn release_vacancy(&mut self, process_name: &str) -> Result<&Process, CatalogError> {
        let process = self.find_mut(process_name)?;
        process.vacancy = process.vacancy.saturating_add(1);
        debug!(process = %process.name, vacancy = process.vacancy, "vacancy released");
        Ok(process)
    }

    pub fn filter(&self, filter: &ProcessFilter) -> Vec<Process> {
        self.processes
            .iter()
            .filter(|process| filter.admits(process))
            .cloned()
            .collect()
    }

    pub fn total_vacancy(&self) -> u64 {
        self.processes
            .iter()
            .map(|process| u64::from(process.vacancy))
            .sum()
    }

    fn find_mut(&mut self, process_name: &str) -> Result<&mut Process, CatalogError> {
        let key = name_key(process_name);
        self.processes
            .iter_mut()
            .find(|process| process.name_key() == key)
            .ok_or_else(|| CatalogError::NotFound {
                name: process_name.trim().to_string(),
            })
    }
}

fn validate_record(row: usize, record: ProcessRecord) -> Result<Process, ValidationError> {
    let name = record.process_name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName { row });
    }

    let potential: Potential = record
        .potential
        .parse()
        .map_err(|source| ValidationError::UnknownCategory { row, source })?;
    let communication: CommunicationLevel = record
        .communication
        .parse()
        .map_err(|source| ValidationError::UnknownCategory { row, source })?;

    if record.vacancy < 0 {
        return Err(ValidationError::NegativeVacancy {
            row,
            value: record.vacancy,
        });
    }
    let vacancy = u32::try_from(record.vacancy).map_err(|_| ValidationError::InvalidVacancy {
        row,
        value: record.vacancy.to_string(),
    })?;

    Ok(Process {
        name: name.to_string(),
        potential,
        communication,
        vacancy,
    })
}
