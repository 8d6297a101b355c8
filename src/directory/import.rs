use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use super::domain::{CompanyRepresentativeProfile, Credential, User, UserId};
use super::registry::{DirectoryError, UserRegistry};

/// Credential assigned to users loaded from a roster file.
pub const DEFAULT_CREDENTIAL: &str = "password";

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Directory { line: u64, source: DirectoryError },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Directory { line, source } => {
                write!(f, "invalid roster entry on line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Directory { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Which roster layout a file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Students,
    Staff,
    Representatives,
}

#[derive(Debug, Deserialize)]
struct StudentRow {
    #[serde(rename = "StudentID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Major")]
    major: String,
    #[serde(rename = "Year")]
    year: u8,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StaffRow {
    #[serde(rename = "StaffID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepresentativeRow {
    #[serde(rename = "CompanyRepID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CompanyName")]
    company_name: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
}

impl StudentRow {
    fn into_user(self) -> Result<User, DirectoryError> {
        User::student(
            self.id,
            self.name,
            Credential::new(DEFAULT_CREDENTIAL),
            self.email,
            self.year,
            self.major,
        )
    }
}

impl StaffRow {
    fn into_user(self) -> Result<User, DirectoryError> {
        User::staff(
            self.id,
            self.name,
            Credential::new(DEFAULT_CREDENTIAL),
            self.email,
            self.department,
        )
    }
}

impl RepresentativeRow {
    fn into_user(self) -> Result<User, DirectoryError> {
        User::company_representative(
            self.id,
            self.name,
            Credential::new(DEFAULT_CREDENTIAL),
            self.email,
            CompanyRepresentativeProfile::new(self.company_name, self.department, self.position),
        )
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        kind: RosterKind,
    ) -> Result<Vec<User>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, kind)
    }

    pub fn from_reader<R: Read>(reader: R, kind: RosterKind) -> Result<Vec<User>, RosterImportError> {
        match kind {
            RosterKind::Students => parse_rows(reader, StudentRow::into_user),
            RosterKind::Staff => parse_rows(reader, StaffRow::into_user),
            RosterKind::Representatives => parse_rows(reader, RepresentativeRow::into_user),
        }
    }
}

fn parse_rows<R, Row, F>(reader: R, build: F) -> Result<Vec<User>, RosterImportError>
where
    R: Read,
    Row: DeserializeOwned,
    F: Fn(Row) -> Result<User, DirectoryError>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut users = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or_default();
        let row: Row = record.deserialize(Some(&headers))?;
        let user = build(row).map_err(|source| RosterImportError::Directory { line, source })?;
        users.push(user);
    }

    Ok(users)
}

/// Outcome of loading a roster into the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSummary {
    pub registered: Vec<UserId>,
    pub skipped: Vec<UserId>,
}

/// Register every user; identifiers already present are skipped, not overwritten.
pub fn register_roster(registry: &UserRegistry, users: Vec<User>) -> RosterSummary {
    let mut summary = RosterSummary::default();
    for user in users {
        let user_id = user.id().clone();
        if registry.register(user) {
            summary.registered.push(user_id);
        } else {
            warn!(%user_id, "roster entry skipped: identifier already registered");
            summary.skipped.push(user_id);
        }
    }
    info!(
        registered = summary.registered.len(),
        skipped = summary.skipped.len(),
        "roster loaded"
    );
    summary
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
