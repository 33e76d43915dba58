use super::super::domain::{CommunicationLevel, Potential};
use chrono::NaiveDate;
use serde::Serialize;

/// One horizontal bar of the vacancy chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyBar {
    pub process_name: String,
    pub vacancy: u32,
    pub potential: Potential,
    pub communication: CommunicationLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialShare {
    pub potential: Potential,
    pub potential_label: &'static str,
    pub processes: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityCell {
    pub potential: Potential,
    pub communication: CommunicationLevel,
    pub vacancy: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancyOverview {
    pub total_processes: usize,
    pub open_processes: usize,
    pub total_vacancy: u64,
    pub chart: Vec<VacancyBar>,
    pub distribution: Vec<PotentialShare>,
    pub availability: Vec<AvailabilityCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentHistoryEntry {
    pub date: NaiveDate,
    pub registrations: usize,
    pub matched: usize,
    pub unmatched: usize,
}
