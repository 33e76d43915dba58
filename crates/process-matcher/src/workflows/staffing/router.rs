use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::catalog::{CatalogError, ProcessFilter, ValidationError};
use super::desk::{StaffingDesk, StaffingError};
use super::domain::{
    CommunicationLevel, EmployeeId, EmployeeSubmission, Potential, ProcessRecord,
    UnknownCategory,
};
use super::import::{
    write_catalog, write_workbook, ProcessImportError, ProcessTableImporter, TableFormat,
};
use super::roster::RosterError;

/// The desk shared by every request; the mutex serializes writers.
pub type SharedDesk = Arc<Mutex<StaffingDesk>>;

pub fn shared_desk(desk: StaffingDesk) -> SharedDesk {
    Arc::new(Mutex::new(desk))
}

/// Router builder exposing the catalog, matching, roster and report endpoints.
pub fn staffing_router(desk: SharedDesk) -> Router {
    Router::new()
        .route(
            "/api/v1/processes",
            get(list_processes_handler).put(load_processes_handler),
        )
        .route("/api/v1/processes/import", post(import_processes_handler))
        .route("/api/v1/processes/export", get(export_processes_handler))
        .route("/api/v1/processes/matches", get(matches_handler))
        .route("/api/v1/processes/suggestions", get(suggestions_handler))
        .route(
            "/api/v1/employees",
            get(list_employees_handler).post(register_employee_handler),
        )
        .route(
            "/api/v1/employees/:employee_id",
            get(employee_handler)
                .put(update_employee_handler)
                .delete(remove_employee_handler),
        )
        .route(
            "/api/v1/employees/:employee_id/assignment",
            put(assign_handler).delete(unassign_handler),
        )
        .route("/api/v1/reports/vacancy", get(vacancy_report_handler))
        .route("/api/v1/reports/assignments", get(assignment_history_handler))
        .with_state(desk)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterQuery {
    #[serde(default)]
    potential: Option<String>,
    #[serde(default)]
    communication: Option<String>,
}

impl FilterQuery {
    fn into_filter(self) -> Result<ProcessFilter, UnknownCategory> {
        Ok(ProcessFilter {
            potentials: parse_list(self.potential.as_deref())?,
            communications: parse_list(self.communication.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchQuery {
    potential: String,
    communication: String,
}

impl MatchQuery {
    fn parse(&self) -> Result<(Potential, CommunicationLevel), UnknownCategory> {
        Ok((self.potential.parse()?, self.communication.parse()?))
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentRequest {
    process_name: String,
}

pub(crate) async fn list_processes_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(err) => return unprocessable(err.to_string()),
    };
    let processes = lock(&desk).processes(&filter);
    (StatusCode::OK, Json(processes)).into_response()
}

pub(crate) async fn load_processes_handler(
    State(desk): State<SharedDesk>,
    payload: Result<Json<Vec<ProcessRecord>>, JsonRejection>,
) -> Response {
    let Json(records) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };
    let mut desk = lock(&desk);
    match desk.load_processes(records) {
        Ok(loaded) => loaded_response(loaded, desk.catalog().total_vacancy()),
        Err(err) => validation_response(err),
    }
}

pub(crate) async fn import_processes_handler(
    State(desk): State<SharedDesk>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let format = TableFormat::from_content_type(content_type);

    let catalog = match ProcessTableImporter::from_bytes(format, &body) {
        Ok(catalog) => catalog,
        Err(err) => return (err.status_code(), error_body(err.to_string())).into_response(),
    };

    let loaded = catalog.len();
    let total_vacancy = catalog.total_vacancy();
    lock(&desk).replace_catalog(catalog);
    loaded_response(loaded, total_vacancy)
}

pub(crate) async fn export_processes_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let format = match query.format.as_deref().map(str::trim) {
        None | Some("") => TableFormat::Csv,
        Some(value) if value.eq_ignore_ascii_case("csv") => TableFormat::Csv,
        Some(value) if value.eq_ignore_ascii_case("xlsx") => TableFormat::Xlsx,
        Some(other) => {
            return unprocessable(format!(
                "unsupported export format '{other}' (expected csv or xlsx)"
            ))
        }
    };

    let written = {
        let desk = lock(&desk);
        match format {
            TableFormat::Csv => {
                let mut buffer = Vec::new();
                write_catalog(desk.catalog(), &mut buffer)
                    .map(|()| buffer)
                    .map_err(|err| err.to_string())
            }
            TableFormat::Xlsx => write_workbook(desk.catalog()).map_err(|err| err.to_string()),
        }
    };

    match written {
        Ok(buffer) => {
            let content_type = match format {
                TableFormat::Csv => format!("{}; charset=utf-8", format.content_type()),
                TableFormat::Xlsx => format.content_type().to_string(),
            };
            let disposition = format!(
                "attachment; filename=\"process_data.{}\"",
                format.extension()
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                buffer,
            )
                .into_response()
        }
        Err(message) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(message)).into_response()
        }
    }
}

pub(crate) async fn matches_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<MatchQuery>,
) -> Response {
    match query.parse() {
        Ok((potential, communication)) => {
            let matches = lock(&desk).find_matches(potential, communication);
            (StatusCode::OK, Json(matches)).into_response()
        }
        Err(err) => unprocessable(err.to_string()),
    }
}

pub(crate) async fn suggestions_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<MatchQuery>,
) -> Response {
    match query.parse() {
        Ok((potential, communication)) => {
            let suggestions = lock(&desk).suggest(potential, communication);
            (StatusCode::OK, Json(suggestions)).into_response()
        }
        Err(err) => unprocessable(err.to_string()),
    }
}

pub(crate) async fn list_employees_handler(State(desk): State<SharedDesk>) -> Response {
    let employees = lock(&desk).employees();
    (StatusCode::OK, Json(employees)).into_response()
}

pub(crate) async fn register_employee_handler(
    State(desk): State<SharedDesk>,
    payload: Result<Json<EmployeeSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };
    let today = Local::now().date_naive();
    match lock(&desk).register_employee(submission, today) {
        Ok(registration) => (StatusCode::CREATED, Json(registration)).into_response(),
        Err(err) => staffing_error_response(err),
    }
}

pub(crate) async fn employee_handler(
    State(desk): State<SharedDesk>,
    Path(employee_id): Path<u64>,
) -> Response {
    match lock(&desk).employee(EmployeeId(employee_id)) {
        Ok(employee) => (StatusCode::OK, Json(employee.clone())).into_response(),
        Err(err) => staffing_error_response(err),
    }
}

pub(crate) async fn update_employee_handler(
    State(desk): State<SharedDesk>,
    Path(employee_id): Path<u64>,
    payload: Result<Json<EmployeeSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };
    match lock(&desk).update_employee(EmployeeId(employee_id), submission) {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => staffing_error_response(err),
    }
}

pub(crate) async fn remove_employee_handler(
    State(desk): State<SharedDesk>,
    Path(employee_id): Path<u64>,
) -> Response {
    match lock(&desk).remove_employee(EmployeeId(employee_id)) {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => staffing_error_response(err),
    }
}

pub(crate) async fn assign_handler(
    State(desk): State<SharedDesk>,
    Path(employee_id): Path<u64>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };
    match lock(&desk).assign(EmployeeId(employee_id), &request.process_name) {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => staffing_error_response(err),
    }
}

pub(crate) async fn unassign_handler(
    State(desk): State<SharedDesk>,
    Path(employee_id): Path<u64>,
) -> Response {
    match lock(&desk).unassign(EmployeeId(employee_id)) {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => staffing_error_response(err),
    }
}

pub(crate) async fn vacancy_report_handler(State(desk): State<SharedDesk>) -> Response {
    let overview = lock(&desk).vacancy_overview();
    (StatusCode::OK, Json(overview)).into_response()
}

pub(crate) async fn assignment_history_handler(State(desk): State<SharedDesk>) -> Response {
    let history = lock(&desk).assignment_history();
    (StatusCode::OK, Json(history)).into_response()
}

// Desk mutations validate before writing, so a poisoned guard still holds a consistent desk.
fn lock(desk: &SharedDesk) -> MutexGuard<'_, StaffingDesk> {
    desk.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parse_list<T>(raw: Option<&str>) -> Result<Vec<T>, UnknownCategory>
where
    T: std::str::FromStr<Err = UnknownCategory>,
{
    raw.map(|value| {
        value
            .split(',')
            .filter(|item| !item.trim().is_empty())
            .map(str::parse)
            .collect()
    })
    .unwrap_or_else(|| Ok(Vec::new()))
}

fn loaded_response(loaded: usize, total_vacancy: u64) -> Response {
    let payload = json!({
        "processes": loaded,
        "total_vacancy": total_vacancy,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

impl StaffingError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            StaffingError::Catalog(CatalogError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            StaffingError::Catalog(CatalogError::NotFound { .. })
            | StaffingError::Roster(RosterError::NotFound(_)) => StatusCode::NOT_FOUND,
            StaffingError::Catalog(CatalogError::VacancyExhausted { .. })
            | StaffingError::Roster(RosterError::DuplicateEmail(_)) => StatusCode::CONFLICT,
            StaffingError::Roster(RosterError::EmptyName | RosterError::InvalidEmail(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl ProcessImportError {
    /// Rejected rows are 422; unreadable or unsupported input is 400.
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            ProcessImportError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProcessImportError::Io(_)
            | ProcessImportError::Csv(_)
            | ProcessImportError::Workbook(_)
            | ProcessImportError::NoWorksheet
            | ProcessImportError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
        }
    }
}

fn staffing_error_response(err: StaffingError) -> Response {
    (err.status_code(), error_body(err.to_string())).into_response()
}

fn rejected_body(rejection: JsonRejection) -> Response {
    unprocessable(rejection.body_text())
}

fn validation_response(err: ValidationError) -> Response {
    unprocessable(err.to_string())
}

fn unprocessable(message: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, error_body(message)).into_response()
}

fn error_body(message: String) -> Json<serde_json::Value> {
    Json(json!({ "error": message }))
}
