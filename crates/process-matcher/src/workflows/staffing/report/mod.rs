mod charts;
mod history;
pub mod views;

pub use charts::vacancy_overview;
pub use history::assignment_history;
