use chrono::NaiveDate;
use process_matcher::workflows::staffing::{
    find_matches, CatalogError, CommunicationLevel, EmployeeSubmission, Potential,
    ProcessCatalog, ProcessRecord, StaffingDesk, StaffingError, ValidationError,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

fn names(processes: &[process_matcher::workflows::staffing::Process]) -> Vec<&str> {
    processes.iter().map(|process| process.name.as_str()).collect()
}

#[test]
fn loading_negative_vacancy_is_a_validation_error() {
    let mut catalog = ProcessCatalog::new();
    let err = catalog
        .load(vec![ProcessRecord::new("Sales Team", "Sales", "Good", -1)])
        .expect_err("rejected");
    assert_eq!(err, ValidationError::NegativeVacancy { row: 1, value: -1 });
}

#[test]
fn equal_vacancies_fall_back_to_name_order() {
    let catalog = ProcessCatalog::from_records(vec![
        ProcessRecord::new("A", "Consultation", "Excellent", 3),
        ProcessRecord::new("B", "Consultation", "Excellent", 5),
        ProcessRecord::new("C", "Consultation", "Excellent", 5),
    ])
    .expect("loads");

    let matches = find_matches(
        &catalog,
        Potential::Consultation,
        CommunicationLevel::Excellent,
    );
    assert_eq!(names(&matches), vec!["B", "C", "A"]);
}

#[test]
fn whitespace_in_names_and_queries_is_trimmed() {
    let catalog = ProcessCatalog::from_records(vec![ProcessRecord::new(
        " Sales Team ",
        "Sales ",
        " Good",
        1,
    )])
    .expect("loads");

    let potential: Potential = "  Sales ".parse().expect("potential parses");
    let communication: CommunicationLevel = "good ".parse().expect("communication parses");
    let matches = find_matches(&catalog, potential, communication);
    assert_eq!(names(&matches), vec!["Sales Team"]);
}

#[test]
fn full_assignment_cycle_tracks_vacancies() {
    let catalog = ProcessCatalog::from_records(vec![
        ProcessRecord::new("Helpdesk", "Support", "Good", 1),
        ProcessRecord::new("Field Support", "Support", "Good", 1),
    ])
    .expect("loads");
    let mut desk = StaffingDesk::with_catalog(catalog);

    let submission = |name: &str, email: &str| EmployeeSubmission {
        name: name.to_string(),
        email: email.to_string(),
        potential: Potential::Support,
        communication: CommunicationLevel::Good,
    };

    let first = desk
        .register_employee(submission("Ana", "ana@example.com"), today())
        .expect("registers");
    assert_eq!(names(&first.matches), vec!["Field Support", "Helpdesk"]);
    desk.assign(first.employee.id, "Field Support")
        .expect("assign");

    let second = desk
        .register_employee(submission("Ben", "ben@example.com"), today())
        .expect("registers");
    assert_eq!(names(&second.matches), vec!["Helpdesk"]);
    desk.assign(second.employee.id, "Helpdesk").expect("assign");

    let third = desk
        .register_employee(submission("Cy", "cy@example.com"), today())
        .expect("registers");
    assert!(third.matches.is_empty());
    assert_eq!(
        desk.assign(third.employee.id, "Helpdesk"),
        Err(StaffingError::Catalog(CatalogError::VacancyExhausted {
            name: "Helpdesk".to_string()
        }))
    );

    desk.remove_employee(second.employee.id).expect("remove");
    let matches = desk.find_matches(Potential::Support, CommunicationLevel::Good);
    assert_eq!(names(&matches), vec!["Helpdesk"]);
}
