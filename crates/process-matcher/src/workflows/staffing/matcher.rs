use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::catalog::ProcessCatalog;
use super::domain::{CommunicationLevel, Potential, Process};

/// Partial match produced by [`suggest`], scored by which attributes line up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSuggestion {
    pub process: Process,
    pub relevance: u8,
    pub potential_matches: bool,
    pub communication_matches: bool,
}

const POTENTIAL_WEIGHT: u8 = 2;
const COMMUNICATION_WEIGHT: u8 = 1;

/// Every open process whose requirements equal the employee's attributes,
/// most vacancies first and then by name.
pub fn find_matches(
    catalog: &ProcessCatalog,
    potential: Potential,
    communication: CommunicationLevel,
) -> Vec<Process> {
    let mut matches: Vec<Process> = catalog
        .list_all()
        .iter()
        .filter(|process| {
            process.has_vacancy()
                && process.potential == potential
                && process.communication == communication
        })
        .cloned()
        .collect();

    matches.sort_by(rank);
    debug!(
        %potential,
        %communication,
        matches = matches.len(),
        "ranked matching processes"
    );
    matches
}

/// Open processes sharing the potential or the communication level.
pub fn suggest(
    catalog: &ProcessCatalog,
    potential: Potential,
    communication: CommunicationLevel,
) -> Vec<ProcessSuggestion> {
    let mut suggestions: Vec<ProcessSuggestion> = catalog
        .list_all()
        .iter()
        .filter(|process| process.has_vacancy())
        .filter_map(|process| {
            let potential_matches = process.potential == potential;
            let communication_matches = process.communication == communication;
            let mut relevance = 0;
            if potential_matches {
                relevance += POTENTIAL_WEIGHT;
            }
            if communication_matches {
                relevance += COMMUNICATION_WEIGHT;
            }

            (relevance > 0).then(|| ProcessSuggestion {
                process: process.clone(),
                relevance,
                potential_matches,
                communication_matches,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| rank(&a.process, &b.process))
    });
    suggestions
}

fn rank(a: &Process, b: &Process) -> Ordering {
    b.vacancy
        .cmp(&a.vacancy)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::domain::ProcessRecord;

    fn names(processes: &[Process]) -> Vec<&str> {
        processes.iter().map(|process| process.name.as_str()).collect()
    }

    #[test]
    fn ranks_by_vacancy_then_name() {
        let catalog = ProcessCatalog::from_records(vec![
            ProcessRecord::new("A", "Sales", "Good", 3),
            ProcessRecord::new("C", "Sales", "Good", 5),
            ProcessRecord::new("B", "Sales", "Good", 5),
        ])
        .expect("loads");

        let matches = find_matches(&catalog, Potential::Sales, CommunicationLevel::Good);
        assert_eq!(names(&matches), vec!["B", "C", "A"]);
    }

    #[test]
    fn name_tie_break_ignores_case() {
        let catalog = ProcessCatalog::from_records(vec![
            ProcessRecord::new("beta", "Support", "Excellent", 2),
            ProcessRecord::new("Alpha", "Support", "Excellent", 2),
        ])
        .expect("loads");

        let matches = find_matches(&catalog, Potential::Support, CommunicationLevel::Excellent);
        assert_eq!(names(&matches), vec!["Alpha", "beta"]);
    }

    #[test]
    fn excludes_other_levels_and_closed_processes() {
        let catalog = ProcessCatalog::from_records(vec![
            ProcessRecord::new("Open", "Service", "Very Good", 1),
            ProcessRecord::new("Closed", "Service", "Very Good", 0),
            ProcessRecord::new("Better Speakers", "Service", "Excellent", 4),
            ProcessRecord::new("Other Skill", "Sales", "Very Good", 4),
        ])
        .expect("loads");

        let matches = find_matches(&catalog, Potential::Service, CommunicationLevel::VeryGood);
        assert_eq!(names(&matches), vec!["Open"]);
        assert!(matches.iter().all(Process::has_vacancy));
    }

    #[test]
    fn no_match_is_empty() {
        let catalog = ProcessCatalog::new();
        assert!(find_matches(&catalog, Potential::Sales, CommunicationLevel::Good).is_empty());
    }

    #[test]
    fn suggestions_weight_potential_over_communication() {
        let catalog = ProcessCatalog::from_records(vec![
            ProcessRecord::new("Exact", "Sales", "Good", 1),
            ProcessRecord::new("Same Skill", "Sales", "Excellent", 9),
            ProcessRecord::new("Same Voice", "Support", "Good", 9),
            ProcessRecord::new("Unrelated", "Support", "Excellent", 9),
            ProcessRecord::new("Full", "Sales", "Good", 0),
        ])
        .expect("loads");

        let suggestions = suggest(&catalog, Potential::Sales, CommunicationLevel::Good);
        let ranked: Vec<(&str, u8)> = suggestions
            .iter()
            .map(|s| (s.process.name.as_str(), s.relevance))
            .collect();
        assert_eq!(
            ranked,
            vec![("Exact", 3), ("Same Skill", 2), ("Same Voice", 1)]
        );
    }
}
