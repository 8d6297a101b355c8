use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::UserId;

/// Identifier wrapper for internship listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InternshipId(pub String);

impl fmt::Display for InternshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for student applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
            ListingStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternshipLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl InternshipLevel {
    pub const fn label(self) -> &'static str {
        match self {
            InternshipLevel::Basic => "basic",
            InternshipLevel::Intermediate => "intermediate",
            InternshipLevel::Advanced => "advanced",
        }
    }
}

/// Lifecycle of an application, including the outcome of withdrawal review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Successful,
    Unsuccessful,
    Withdrawn,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Successful => "successful",
            ApplicationStatus::Unsuccessful => "unsuccessful",
            ApplicationStatus::Withdrawn => "withdrawn",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Counts toward a student's application quota.
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Pending | ApplicationStatus::Successful
        )
    }
}

/// Approval state kept for each company representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeAccount {
    pub representative: UserId,
    pub company_name: String,
    pub approved: bool,
}

/// Fields a representative supplies when posting a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub level: InternshipLevel,
    pub preferred_major: String,
    pub opens_on: NaiveDate,
    pub closes_on: NaiveDate,
    pub slots: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipListing {
    pub id: InternshipId,
    pub title: String,
    pub description: String,
    pub level: InternshipLevel,
    pub preferred_major: String,
    pub opens_on: NaiveDate,
    pub closes_on: NaiveDate,
    pub company_name: String,
    pub representative: UserId,
    pub slots: u8,
    pub status: ListingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipApplication {
    pub id: ApplicationId,
    pub student: UserId,
    pub internship: InternshipId,
    pub status: ApplicationStatus,
    pub withdrawal_requested: bool,
}

/// Report requested by staff. Only the criteria and provenance are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub criteria: String,
    pub generated_by: UserId,
    pub generated_at: DateTime<Utc>,
}
