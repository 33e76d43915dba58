use crate::infra::{load_catalog, parse_communication, parse_date, parse_potential};
use chrono::{Local, NaiveDate};
use clap::Args;
use process_matcher::error::AppError;
use process_matcher::workflows::staffing::report::views::VacancyOverview;
use process_matcher::workflows::staffing::{
    CommunicationLevel, EmployeeSubmission, Potential, Process, ProcessFilter, StaffingDesk,
};
use std::path::PathBuf;

const BAR_WIDTH: usize = 30;

#[derive(Args, Debug, Default)]
pub(crate) struct ShowArgs {
    /// Process table to read, .csv or .xlsx (defaults to the bundled sample)
    #[arg(long, visible_alias = "csv")]
    pub(crate) table: Option<PathBuf>,
    /// Only show these potentials (comma separated)
    #[arg(long, value_parser = parse_potential, value_delimiter = ',')]
    pub(crate) potential: Vec<Potential>,
    /// Only show these communication levels (comma separated)
    #[arg(long, value_parser = parse_communication, value_delimiter = ',')]
    pub(crate) communication: Vec<CommunicationLevel>,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Process table to read, .csv or .xlsx (defaults to the bundled sample)
    #[arg(long, visible_alias = "csv")]
    pub(crate) table: Option<PathBuf>,
    /// Employee potential, e.g. Sales
    #[arg(long, value_parser = parse_potential)]
    pub(crate) potential: Potential,
    /// Employee communication level, e.g. "Very Good"
    #[arg(long, value_parser = parse_communication)]
    pub(crate) communication: CommunicationLevel,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Process table to read, .csv or .xlsx (defaults to the bundled sample)
    #[arg(long, visible_alias = "csv")]
    pub(crate) table: Option<PathBuf>,
    /// Registration date for the sample employees (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_process_listing(args: ShowArgs) -> Result<(), AppError> {
    let ShowArgs {
        table,
        potential,
        communication,
    } = args;

    let catalog = load_catalog(table.as_deref())?;
    let filter = ProcessFilter {
        potentials: potential,
        communications: communication,
    };
    let processes = catalog.filter(&filter);

    println!(
        "{} of {} processes | {} open seats in total",
        processes.len(),
        catalog.len(),
        catalog.total_vacancy()
    );
    render_process_table(&processes);
    Ok(())
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.table.as_deref())?;
    let desk = StaffingDesk::with_catalog(catalog);
    let matches = desk.find_matches(args.potential, args.communication);

    println!(
        "Processes open to {} / {}",
        args.potential, args.communication
    );
    if matches.is_empty() {
        println!("- none available");
        let suggestions = desk.suggest(args.potential, args.communication);
        if !suggestions.is_empty() {
            println!("\nClosest alternatives");
            for suggestion in suggestions.iter().take(3) {
                println!(
                    "- {} ({} / {}, {} open, relevance {})",
                    suggestion.process.name,
                    suggestion.process.potential,
                    suggestion.process.communication,
                    suggestion.process.vacancy,
                    suggestion.relevance
                );
            }
        }
        return Ok(());
    }

    render_process_table(&matches);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { table, today } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Process matcher demo");
    match table.as_deref() {
        Some(path) => println!("Data source: {}", path.display()),
        None => println!("Data source: bundled sample table"),
    }

    let catalog = load_catalog(table.as_deref())?;
    let mut desk = StaffingDesk::with_catalog(catalog);

    println!("\nProcess table");
    render_process_table(desk.catalog().list_all());

    println!("\nRegistrations");
    for submission in demo_submissions() {
        let registration = desk.register_employee(submission, today)?;
        let employee = &registration.employee;
        println!(
            "- {} <{}> ({} / {}): {} matching processes",
            employee.name,
            employee.email,
            employee.potential,
            employee.communication,
            registration.matches.len()
        );

        let Some(best) = registration.matches.first() else {
            println!("  No open process fits; left unassigned");
            continue;
        };
        let assigned = desk.assign(employee.id, &best.name)?;
        let remaining = desk
            .catalog()
            .get(&best.name)
            .map(|process| process.vacancy)
            .unwrap_or_default();
        println!(
            "  Assigned to {} ({} seats left)",
            assigned.assigned_process.as_deref().unwrap_or_default(),
            remaining
        );
    }

    render_vacancy_overview(&desk.vacancy_overview());

    println!("\nAssignment history");
    for entry in desk.assignment_history() {
        println!(
            "- {}: {} registered | {} matched | {} unmatched",
            entry.date, entry.registrations, entry.matched, entry.unmatched
        );
    }

    Ok(())
}

fn demo_submissions() -> Vec<EmployeeSubmission> {
    vec![
        EmployeeSubmission {
            name: "Asha Patel".to_string(),
            email: "asha.patel@example.com".to_string(),
            potential: Potential::Sales,
            communication: CommunicationLevel::Good,
        },
        EmployeeSubmission {
            name: "Marco Rossi".to_string(),
            email: "marco.rossi@example.com".to_string(),
            potential: Potential::Service,
            communication: CommunicationLevel::VeryGood,
        },
        EmployeeSubmission {
            name: "Lena Fischer".to_string(),
            email: "lena.fischer@example.com".to_string(),
            potential: Potential::Consultation,
            communication: CommunicationLevel::Good,
        },
    ]
}

fn render_process_table(processes: &[Process]) {
    let name_width = processes
        .iter()
        .map(|process| process.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Process".len());

    println!(
        "{:<name_width$}  {:<12}  {:<13}  {:>7}",
        "Process", "Potential", "Communication", "Vacancy"
    );
    for process in processes {
        println!(
            "{:<name_width$}  {:<12}  {:<13}  {:>7}",
            process.name,
            process.potential.label(),
            process.communication.label(),
            process.vacancy
        );
    }
}

fn render_vacancy_overview(overview: &VacancyOverview) {
    println!(
        "\nVacancy overview: {} processes | {} open | {} seats",
        overview.total_processes, overview.open_processes, overview.total_vacancy
    );

    let widest = overview
        .chart
        .iter()
        .map(|bar| bar.vacancy)
        .max()
        .unwrap_or(0);
    let name_width = overview
        .chart
        .iter()
        .map(|bar| bar.process_name.chars().count())
        .max()
        .unwrap_or(0);
    for bar in &overview.chart {
        println!(
            "{:<name_width$} | {} {}",
            bar.process_name,
            render_bar(bar.vacancy, widest, BAR_WIDTH),
            bar.vacancy
        );
    }

    println!("\nPotential distribution");
    for share in &overview.distribution {
        println!(
            "- {}: {} processes ({:.1}%)",
            share.potential_label, share.processes, share.percentage
        );
    }

    println!("\nOpen seats by potential and communication");
    let levels = CommunicationLevel::ordered();
    print!("{:<14}", "");
    for level in levels {
        print!("{:>11}", level.label());
    }
    println!();
    for potential in Potential::ordered() {
        print!("{:<14}", potential.label());
        for level in levels {
            let vacancy = overview
                .availability
                .iter()
                .find(|cell| cell.potential == potential && cell.communication == level)
                .map(|cell| cell.vacancy)
                .unwrap_or_default();
            print!("{:>11}", vacancy);
        }
        println!();
    }
}

/// Scale `value` against `max` into a run of at most `width` blocks. Any
/// non-zero value gets at least one block.
fn render_bar(value: u32, max: u32, width: usize) -> String {
    if value == 0 || max == 0 {
        return String::new();
    }
    let scaled = (value as usize * width).div_ceil(max as usize);
    "#".repeat(scaled.clamp(1, width))
}
