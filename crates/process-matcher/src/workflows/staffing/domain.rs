use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skill classification shared by processes (as a requirement) and employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Potential {
    Sales,
    Service,
    Support,
    Consultation,
}

impl Potential {
    pub const fn ordered() -> [Self; 4] {
        [Self::Sales, Self::Service, Self::Support, Self::Consultation]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Service => "Service",
            Self::Support => "Support",
            Self::Consultation => "Consultation",
        }
    }
}

impl FromStr for Potential {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_category(value).as_str() {
            "sales" => Ok(Self::Sales),
            "service" => Ok(Self::Service),
            "support" => Ok(Self::Support),
            "consultation" => Ok(Self::Consultation),
            _ => Err(UnknownCategory::potential(value)),
        }
    }
}

impl TryFrom<String> for Potential {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Potential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Communication proficiency, declared from strongest to weakest.
///
/// Matching compares levels by equality only; the ordering exists for stable
/// report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CommunicationLevel {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
}

impl CommunicationLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Excellent, Self::VeryGood, Self::Good]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
        }
    }
}

impl FromStr for CommunicationLevel {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_category(value).as_str() {
            "excellent" => Ok(Self::Excellent),
            "very good" | "very_good" | "verygood" => Ok(Self::VeryGood),
            "good" => Ok(Self::Good),
            _ => Err(UnknownCategory::communication(value)),
        }
    }
}

impl TryFrom<String> for CommunicationLevel {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CommunicationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a category string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} value '{value}' (expected one of: {expected})")]
pub struct UnknownCategory {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl UnknownCategory {
    fn potential(value: &str) -> Self {
        Self {
            kind: "potential",
            value: value.trim().to_string(),
            expected: "Sales, Service, Support, Consultation",
        }
    }

    fn communication(value: &str) -> Self {
        Self {
            kind: "communication",
            value: value.trim().to_string(),
            expected: "Excellent, Very Good, Good",
        }
    }
}

fn normalize_category(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// A staffing slot category with its remaining open seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub potential: Potential,
    pub communication: CommunicationLevel,
    pub vacancy: u32,
}

impl Process {
    pub fn has_vacancy(&self) -> bool {
        self.vacancy > 0
    }

    pub(crate) fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Lookup key for process names: trimmed and lowercased.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Unvalidated process row as it arrives from an upload or API payload.
/// Payload keys may use the upload column names as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    #[serde(alias = "Process_Name")]
    pub process_name: String,
    #[serde(alias = "Potential")]
    pub potential: String,
    #[serde(alias = "Communication")]
    pub communication: String,
    #[serde(alias = "Vacancy")]
    pub vacancy: i64,
}

impl ProcessRecord {
    pub fn new(
        process_name: impl Into<String>,
        potential: impl Into<String>,
        communication: impl Into<String>,
        vacancy: i64,
    ) -> Self {
        Self {
            process_name: process_name.into(),
            potential: potential.into(),
            communication: communication.into(),
            vacancy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: CommunicationLevel,
    pub assigned_process: Option<String>,
    pub registered_on: NaiveDate,
}

impl Employee {
    pub fn is_assigned(&self) -> bool {
        self.assigned_process.is_some()
    }
}

/// Fields a user supplies when adding or editing an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSubmission {
    pub name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: CommunicationLevel,
}
