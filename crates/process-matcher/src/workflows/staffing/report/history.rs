use super::super::domain::Employee;
use super::views::AssignmentHistoryEntry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Registrations per day, newest first, split by whether a process was assigned.
pub fn assignment_history<'a, I>(employees: I) -> Vec<AssignmentHistoryEntry>
where
    I: IntoIterator<Item = &'a Employee>,
{
    let mut by_date: BTreeMap<NaiveDate, AssignmentHistoryEntry> = BTreeMap::new();
    for employee in employees {
        let entry = by_date
            .entry(employee.registered_on)
            .or_insert_with(|| AssignmentHistoryEntry {
                date: employee.registered_on,
                registrations: 0,
                matched: 0,
                unmatched: 0,
            });
        entry.registrations += 1;
        if employee.is_assigned() {
            entry.matched += 1;
        } else {
            entry.unmatched += 1;
        }
    }

    by_date.into_values().rev().collect()
}
