use super::super::catalog::ProcessCatalog;
use super::super::domain::{CommunicationLevel, Potential};
use super::views::{AvailabilityCell, PotentialShare, VacancyBar, VacancyOverview};
use std::collections::{BTreeMap, BTreeSet};

pub fn vacancy_overview(catalog: &ProcessCatalog) -> VacancyOverview {
    let processes = catalog.list_all();

    VacancyOverview {
        total_processes: processes.len(),
        open_processes: processes.iter().filter(|p| p.has_vacancy()).count(),
        total_vacancy: catalog.total_vacancy(),
        chart: vacancy_chart(catalog),
        distribution: potential_distribution(catalog),
        availability: availability_grid(catalog),
    }
}

/// Ascending so a horizontal chart draws the largest bar on top.
fn vacancy_chart(catalog: &ProcessCatalog) -> Vec<VacancyBar> {
    let mut bars: Vec<VacancyBar> = catalog
        .list_all()
        .iter()
        .map(|process| VacancyBar {
            process_name: process.name.clone(),
            vacancy: process.vacancy,
            potential: process.potential,
            communication: process.communication,
        })
        .collect();
    bars.sort_by_key(|bar| bar.vacancy);
    bars
}

fn potential_distribution(catalog: &ProcessCatalog) -> Vec<PotentialShare> {
    let mut names: BTreeMap<Potential, BTreeSet<&str>> = BTreeMap::new();
    for process in catalog.list_all() {
        names
            .entry(process.potential)
            .or_default()
            .insert(process.name.as_str());
    }

    let total: usize = names.values().map(BTreeSet::len).sum();
    Potential::ordered()
        .into_iter()
        .filter_map(|potential| {
            let processes = names.get(&potential)?.len();
            let percentage = (processes as f64 / total as f64 * 1000.0).round() / 10.0;
            Some(PotentialShare {
                potential,
                potential_label: potential.label(),
                processes,
                percentage,
            })
        })
        .collect()
}

fn availability_grid(catalog: &ProcessCatalog) -> Vec<AvailabilityCell> {
    let mut sums: BTreeMap<(Potential, CommunicationLevel), u64> = BTreeMap::new();
    for process in catalog.list_all() {
        *sums
            .entry((process.potential, process.communication))
            .or_default() += u64::from(process.vacancy);
    }

    Potential::ordered()
        .into_iter()
        .flat_map(|potential| {
            CommunicationLevel::ordered()
                .into_iter()
                .map(move |communication| (potential, communication))
        })
        .map(|(potential, communication)| AvailabilityCell {
            potential,
            communication,
            vacancy: sums
                .get(&(potential, communication))
                .copied()
                .unwrap_or_default(),
        })
        .collect()
}
