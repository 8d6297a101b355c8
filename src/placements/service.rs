use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::config::PlacementLimits;
use crate::directory::{User, UserId, UserRegistry, UserType};

use super::actions;
use super::domain::{
    ApplicationId, ApplicationStatus, InternshipApplication, InternshipId, InternshipLevel,
    InternshipListing, ListingDraft, ListingStatus, Report, RepresentativeAccount,
};
use super::repository::{PlacementRepository, RepositoryError};

const LISTING: &str = "InternshipListing";
const APPLICATION: &str = "InternshipApplication";
const ACCOUNT: &str = "RepresentativeAccount";

/// Service composing the user registry, placement store, and quota limits.
pub struct PlacementService<R> {
    registry: Arc<UserRegistry>,
    repository: Arc<R>,
    limits: PlacementLimits,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_internship_id() -> InternshipId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InternshipId(format!("int-{id:06}"))
}

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Maps a store-level `NotFound` to one naming the entity that was missing.
fn located(error: RepositoryError, entity: &'static str, id: &str) -> PlacementError {
    match error {
        RepositoryError::NotFound => PlacementError::NotFound {
            entity,
            id: id.to_string(),
        },
        other => PlacementError::Repository(other),
    }
}

impl<R> PlacementService<R>
where
    R: PlacementRepository + 'static,
{
    pub fn new(registry: Arc<UserRegistry>, repository: Arc<R>, limits: PlacementLimits) -> Self {
        Self {
            registry,
            repository,
            limits,
        }
    }

    pub fn registry(&self) -> &Arc<UserRegistry> {
        &self.registry
    }

    pub fn limits(&self) -> PlacementLimits {
        self.limits
    }

    fn require_role(&self, user_id: &str, required: UserType) -> Result<Arc<User>, PlacementError> {
        let user = self
            .registry
            .find_by_id(user_id)
            .ok_or_else(|| PlacementError::UnknownUser {
                user_id: user_id.to_string(),
            })?;

        let actual = user.user_type();
        if actual != required {
            return Err(PlacementError::RoleMismatch {
                user_id: user.id().clone(),
                actual,
                required,
            });
        }
        Ok(user)
    }

    fn load_listing(&self, id: &InternshipId) -> Result<InternshipListing, PlacementError> {
        self.repository
            .fetch_listing(id)?
            .ok_or_else(|| PlacementError::NotFound {
                entity: LISTING,
                id: id.0.clone(),
            })
    }

    fn load_application(
        &self,
        id: &ApplicationId,
    ) -> Result<InternshipApplication, PlacementError> {
        self.repository
            .fetch_application(id)?
            .ok_or_else(|| PlacementError::NotFound {
                entity: APPLICATION,
                id: id.0.clone(),
            })
    }

    fn load_account(&self, id: &UserId) -> Result<RepresentativeAccount, PlacementError> {
        self.repository
            .fetch_account(id)?
            .ok_or_else(|| PlacementError::NotFound {
                entity: ACCOUNT,
                id: id.to_string(),
            })
    }

    // Staff actions. The acting user must be Staff; the transition itself is
    // unconditional.

    pub fn approve_representative(
        &self,
        staff_id: &str,
        representative: &UserId,
    ) -> Result<RepresentativeAccount, PlacementError> {
        self.set_representative_approval(staff_id, representative, true)
    }

    pub fn reject_representative(
        &self,
        staff_id: &str,
        representative: &UserId,
    ) -> Result<RepresentativeAccount, PlacementError> {
        self.set_representative_approval(staff_id, representative, false)
    }

    fn set_representative_approval(
        &self,
        staff_id: &str,
        representative: &UserId,
        approved: bool,
    ) -> Result<RepresentativeAccount, PlacementError> {
        let staff = self.require_role(staff_id, UserType::Staff)?;
        let previous =
            actions::set_representative_approval(&*self.repository, representative, approved)
                .map_err(|error| located(error, ACCOUNT, representative.as_str()))?;
        info!(
            staff_id = %staff.id(),
            representative = %representative,
            previous,
            approved,
            "representative approval updated"
        );
        self.load_account(representative)
    }

    pub fn approve_listing(
        &self,
        staff_id: &str,
        listing: &InternshipId,
    ) -> Result<InternshipListing, PlacementError> {
        self.set_listing_status(staff_id, listing, ListingStatus::Approved)
    }

    pub fn reject_listing(
        &self,
        staff_id: &str,
        listing: &InternshipId,
    ) -> Result<InternshipListing, PlacementError> {
        self.set_listing_status(staff_id, listing, ListingStatus::Rejected)
    }

    fn set_listing_status(
        &self,
        staff_id: &str,
        listing: &InternshipId,
        status: ListingStatus,
    ) -> Result<InternshipListing, PlacementError> {
        let staff = self.require_role(staff_id, UserType::Staff)?;
        let previous = actions::set_listing_status(&*self.repository, listing, status)
            .map_err(|error| located(error, LISTING, &listing.0))?;
        info!(
            staff_id = %staff.id(),
            internship_id = %listing,
            from = previous.label(),
            to = status.label(),
            "listing status updated"
        );
        self.load_listing(listing)
    }

    pub fn approve_withdrawal(
        &self,
        staff_id: &str,
        application: &ApplicationId,
    ) -> Result<InternshipApplication, PlacementError> {
        self.settle_withdrawal(staff_id, application, ApplicationStatus::Withdrawn)
    }

    pub fn reject_withdrawal(
        &self,
        staff_id: &str,
        application: &ApplicationId,
    ) -> Result<InternshipApplication, PlacementError> {
        self.settle_withdrawal(staff_id, application, ApplicationStatus::Rejected)
    }

    fn settle_withdrawal(
        &self,
        staff_id: &str,
        application: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<InternshipApplication, PlacementError> {
        let staff = self.require_role(staff_id, UserType::Staff)?;
        let previous = actions::settle_withdrawal(&*self.repository, application, status)
            .map_err(|error| located(error, APPLICATION, &application.0))?;
        info!(
            staff_id = %staff.id(),
            application_id = %application,
            from = previous.label(),
            to = status.label(),
            "withdrawal settled"
        );
        self.load_application(application)
    }

    /// Record a report request keyed by `criteria`.
    pub fn generate_report(&self, staff_id: &str, criteria: &str) -> Result<Report, PlacementError> {
        let staff = self.require_role(staff_id, UserType::Staff)?;
        let report = Report {
            criteria: criteria.to_string(),
            generated_by: staff.id().clone(),
            generated_at: Utc::now(),
        };
        info!(staff_id = %staff.id(), criteria, "report generated");
        Ok(report)
    }

    // Company representative operations.

    pub fn open_representative_account(
        &self,
        representative_id: &str,
    ) -> Result<RepresentativeAccount, PlacementError> {
        let user = self.require_role(representative_id, UserType::CompanyRepresentative)?;
        let company_name = user
            .as_company_representative()
            .map(|profile| profile.company_name().to_string())
            .unwrap_or_default();

        let account = RepresentativeAccount {
            representative: user.id().clone(),
            company_name,
            approved: false,
        };
        self.repository.open_account(account.clone())?;
        info!(representative = %account.representative, "representative account opened");
        Ok(account)
    }

    pub fn create_listing(
        &self,
        representative_id: &str,
        draft: ListingDraft,
    ) -> Result<InternshipListing, PlacementError> {
        let user = self.require_role(representative_id, UserType::CompanyRepresentative)?;
        let account = self.load_account(user.id())?;
        if !account.approved {
            return Err(PlacementError::RepresentativePending(user.id().clone()));
        }

        self.validate_draft(&draft)?;

        let existing = self
            .repository
            .listings()?
            .iter()
            .filter(|listing| &listing.representative == user.id())
            .count();
        if existing >= self.limits.max_listings_per_representative {
            return Err(PlacementError::ListingQuotaReached {
                representative: user.id().clone(),
                limit: self.limits.max_listings_per_representative,
            });
        }

        let listing = InternshipListing {
            id: next_internship_id(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            level: draft.level,
            preferred_major: draft.preferred_major,
            opens_on: draft.opens_on,
            closes_on: draft.closes_on,
            company_name: account.company_name,
            representative: user.id().clone(),
            slots: draft.slots,
            status: ListingStatus::Pending,
        };

        let stored = self.repository.insert_listing(listing)?;
        info!(
            representative = %stored.representative,
            internship_id = %stored.id,
            level = stored.level.label(),
            "listing submitted for review"
        );
        Ok(stored)
    }

    fn validate_draft(&self, draft: &ListingDraft) -> Result<(), PlacementError> {
        if draft.title.trim().is_empty() {
            return Err(PlacementError::InvalidListing(
                "title must not be blank".to_string(),
            ));
        }
        if draft.slots == 0 || draft.slots > self.limits.max_listing_slots {
            return Err(PlacementError::InvalidListing(format!(
                "slots must be between 1 and {}, got {}",
                self.limits.max_listing_slots, draft.slots
            )));
        }
        if draft.closes_on < draft.opens_on {
            return Err(PlacementError::InvalidListing(format!(
                "closing date {} precedes opening date {}",
                draft.closes_on, draft.opens_on
            )));
        }
        Ok(())
    }

    /// Accept or turn down a pending application to one of the representative's listings.
    pub fn decide_application(
        &self,
        representative_id: &str,
        application: &ApplicationId,
        accept: bool,
    ) -> Result<InternshipApplication, PlacementError> {
        let user = self.require_role(representative_id, UserType::CompanyRepresentative)?;
        let record = self.load_application(application)?;
        let listing = self.load_listing(&record.internship)?;

        if &listing.representative != user.id() {
            return Err(PlacementError::NotOwner {
                user_id: user.id().clone(),
                entity: LISTING,
                id: listing.id.0,
            });
        }
        if record.status != ApplicationStatus::Pending {
            return Err(PlacementError::InvalidStatus {
                entity: APPLICATION,
                id: record.id.0,
                current: record.status.label(),
                required: ApplicationStatus::Pending.label(),
            });
        }

        let status = if accept {
            ApplicationStatus::Successful
        } else {
            ApplicationStatus::Unsuccessful
        };
        actions::set_application_status(&*self.repository, application, status)
            .map_err(|error| located(error, APPLICATION, &application.0))?;
        info!(
            representative = %user.id(),
            application_id = %application,
            outcome = status.label(),
            "application decided"
        );
        self.load_application(application)
    }

    // Student operations.

    pub fn apply(
        &self,
        student_id: &str,
        internship: &InternshipId,
    ) -> Result<InternshipApplication, PlacementError> {
        let user = self.require_role(student_id, UserType::Student)?;
        let listing = self.load_listing(internship)?;

        if listing.status != ListingStatus::Approved {
            return Err(PlacementError::InvalidStatus {
                entity: LISTING,
                id: listing.id.0,
                current: listing.status.label(),
                required: ListingStatus::Approved.label(),
            });
        }

        if let Some(profile) = user.as_student() {
            if profile.year_of_study() <= 2 && listing.level != InternshipLevel::Basic {
                return Err(PlacementError::LevelNotPermitted {
                    student: user.id().clone(),
                    year_of_study: profile.year_of_study(),
                    level: listing.level.label(),
                });
            }
        }

        let submitted: Vec<InternshipApplication> = self
            .repository
            .applications()?
            .into_iter()
            .filter(|application| &application.student == user.id())
            .collect();

        // Withdrawn or settled applications still block a second one to the same listing.
        if submitted
            .iter()
            .any(|application| application.internship == listing.id)
        {
            return Err(PlacementError::DuplicateApplication {
                student: user.id().clone(),
                internship: listing.id,
            });
        }
        let active = submitted
            .iter()
            .filter(|application| application.status.is_active())
            .count();
        if active >= self.limits.max_active_applications {
            return Err(PlacementError::ApplicationQuotaReached {
                student: user.id().clone(),
                limit: self.limits.max_active_applications,
            });
        }

        let application = InternshipApplication {
            id: next_application_id(),
            student: user.id().clone(),
            internship: listing.id,
            status: ApplicationStatus::Pending,
            withdrawal_requested: false,
        };
        let stored = self.repository.insert_application(application)?;
        info!(
            student = %stored.student,
            application_id = %stored.id,
            internship_id = %stored.internship,
            "application submitted"
        );
        Ok(stored)
    }

    pub fn request_withdrawal(
        &self,
        student_id: &str,
        application: &ApplicationId,
    ) -> Result<InternshipApplication, PlacementError> {
        let user = self.require_role(student_id, UserType::Student)?;
        let mut record = self.load_application(application)?;

        if &record.student != user.id() {
            return Err(PlacementError::NotOwner {
                user_id: user.id().clone(),
                entity: APPLICATION,
                id: record.id.0,
            });
        }
        if !record.status.is_active() {
            return Err(PlacementError::InvalidStatus {
                entity: APPLICATION,
                id: record.id.0,
                current: record.status.label(),
                required: "pending or successful",
            });
        }

        record.withdrawal_requested = true;
        self.repository
            .update_application(record.clone())
            .map_err(|error| located(error, APPLICATION, &application.0))?;
        info!(student = %user.id(), application_id = %application, "withdrawal requested");
        Ok(record)
    }

    // Queries.

    pub fn listing(&self, id: &InternshipId) -> Result<InternshipListing, PlacementError> {
        self.load_listing(id)
    }

    pub fn application(&self, id: &ApplicationId) -> Result<InternshipApplication, PlacementError> {
        self.load_application(id)
    }

    pub fn listings_with_status(
        &self,
        status: ListingStatus,
    ) -> Result<Vec<InternshipListing>, PlacementError> {
        Ok(self
            .repository
            .listings()?
            .into_iter()
            .filter(|listing| listing.status == status)
            .collect())
    }

    pub fn pending_withdrawals(&self) -> Result<Vec<InternshipApplication>, PlacementError> {
        Ok(self
            .repository
            .applications()?
            .into_iter()
            .filter(|application| application.withdrawal_requested)
            .collect())
    }
}

/// Error raised by the placement service. Variants carry the entity type, identifier,
/// and statuses involved rather than pre-formatted text.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("user {user_id} is not registered")]
    UnknownUser { user_id: String },
    #[error("user {user_id} is {actual}, action requires {required}")]
    RoleMismatch {
        user_id: UserId,
        actual: UserType,
        required: UserType,
    },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{entity} {id} is {current}, requires {required}")]
    InvalidStatus {
        entity: &'static str,
        id: String,
        current: &'static str,
        required: &'static str,
    },
    #[error("company representative {0} is awaiting approval")]
    RepresentativePending(UserId),
    #[error("company representative {representative} already has {limit} listings")]
    ListingQuotaReached { representative: UserId, limit: usize },
    #[error("student {student} already has {limit} active applications")]
    ApplicationQuotaReached { student: UserId, limit: usize },
    #[error("year {year_of_study} student {student} may not apply to {level} internships")]
    LevelNotPermitted {
        student: UserId,
        year_of_study: u8,
        level: &'static str,
    },
    #[error("student {student} already applied to {internship}")]
    DuplicateApplication {
        student: UserId,
        internship: InternshipId,
    },
    #[error("user {user_id} does not own {entity} {id}")]
    NotOwner {
        user_id: UserId,
        entity: &'static str,
        id: String,
    },
    #[error("invalid listing: {0}")]
    InvalidListing(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
