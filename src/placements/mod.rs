//! Internship listings, student applications, and the staff decisions applied to them.
//!
//! Entities live in a [`PlacementRepository`] and are referenced by identifier. Staff
//! transitions are unconditional once the acting user has been confirmed as Staff;
//! representative and student operations enforce approval, ownership, and quota rules.

pub mod actions;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, InternshipApplication, InternshipId, InternshipLevel,
    InternshipListing, ListingDraft, ListingStatus, Report, RepresentativeAccount,
};
pub use repository::{InMemoryPlacementRepository, PlacementRepository, RepositoryError};
pub use router::{placement_router, DecisionTarget, StaffDecision, Verdict};
pub use service::{PlacementError, PlacementService};
