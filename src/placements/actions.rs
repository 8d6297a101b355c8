//! Unconditional status transitions on stored placement entities.
//!
//! Each function loads the entity by identifier, overwrites the status, and writes it
//! back. The prior state is returned to the caller but never validated.

use crate::directory::UserId;

use super::domain::{ApplicationId, ApplicationStatus, InternshipId, ListingStatus};
use super::repository::{PlacementRepository, RepositoryError};

/// Set a representative account's approval flag, returning the previous flag.
pub fn set_representative_approval<R>(
    store: &R,
    representative: &UserId,
    approved: bool,
) -> Result<bool, RepositoryError>
where
    R: PlacementRepository + ?Sized,
{
    let mut account = store
        .fetch_account(representative)?
        .ok_or(RepositoryError::NotFound)?;
    let previous = account.approved;
    account.approved = approved;
    store.update_account(account)?;
    Ok(previous)
}

/// Set a listing's status, returning the previous status.
pub fn set_listing_status<R>(
    store: &R,
    listing: &InternshipId,
    status: ListingStatus,
) -> Result<ListingStatus, RepositoryError>
where
    R: PlacementRepository + ?Sized,
{
    let mut record = store
        .fetch_listing(listing)?
        .ok_or(RepositoryError::NotFound)?;
    let previous = record.status;
    record.status = status;
    store.update_listing(record)?;
    Ok(previous)
}

/// Settle a withdrawal request: the application takes `status` and the request flag is
/// cleared. Returns the previous status.
pub fn settle_withdrawal<R>(
    store: &R,
    application: &ApplicationId,
    status: ApplicationStatus,
) -> Result<ApplicationStatus, RepositoryError>
where
    R: PlacementRepository + ?Sized,
{
    let mut record = store
        .fetch_application(application)?
        .ok_or(RepositoryError::NotFound)?;
    let previous = record.status;
    record.status = status;
    record.withdrawal_requested = false;
    store.update_application(record)?;
    Ok(previous)
}

/// Set an application's status, returning the previous status.
pub fn set_application_status<R>(
    store: &R,
    application: &ApplicationId,
    status: ApplicationStatus,
) -> Result<ApplicationStatus, RepositoryError>
where
    R: PlacementRepository + ?Sized,
{
    let mut record = store
        .fetch_application(application)?
        .ok_or(RepositoryError::NotFound)?;
    let previous = record.status;
    record.status = status;
    store.update_application(record)?;
    Ok(previous)
}
