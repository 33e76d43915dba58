use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::staffing::domain::{
    CommunicationLevel, EmployeeSubmission, Potential, ProcessRecord,
};
use crate::workflows::staffing::{ProcessCatalog, StaffingDesk};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

pub(super) fn process_records() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::new("Sales Support", "Sales", "Good", 5),
        ProcessRecord::new("Inside Sales", "Sales", "Good", 1),
        ProcessRecord::new("Customer Service", "Service", "Very Good", 3),
        ProcessRecord::new("Technical Support", "Support", "Good", 4),
        ProcessRecord::new("Account Management", "Consultation", "Excellent", 0),
    ]
}

pub(super) fn desk() -> StaffingDesk {
    let catalog = ProcessCatalog::from_records(process_records()).expect("catalog loads");
    StaffingDesk::with_catalog(catalog)
}

pub(super) fn submission(name: &str, email: &str) -> EmployeeSubmission {
    EmployeeSubmission {
        name: name.to_string(),
        email: email.to_string(),
        potential: Potential::Sales,
        communication: CommunicationLevel::Good,
    }
}

pub(super) fn vacancy_of(desk: &StaffingDesk, name: &str) -> u32 {
    desk.catalog()
        .get(name)
        .map(|process| process.vacancy)
        .expect("process present")
}

pub(super) fn vacancies(desk: &StaffingDesk) -> Vec<(String, u32)> {
    desk.catalog()
        .list_all()
        .iter()
        .map(|process| (process.name.clone(), process.vacancy))
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
