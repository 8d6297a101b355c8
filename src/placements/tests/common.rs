use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::PlacementLimits;
use crate::directory::{CompanyRepresentativeProfile, Credential, User, UserId, UserRegistry};
use crate::placements::domain::{
    ApplicationId, InternshipApplication, InternshipId, InternshipLevel, InternshipListing,
    ListingDraft, RepresentativeAccount,
};
use crate::placements::repository::{
    InMemoryPlacementRepository, PlacementRepository, RepositoryError,
};
use crate::placements::service::PlacementService;

pub(super) const JUNIOR: &str = "U2310001A";
pub(super) const SENIOR: &str = "U2110042C";
pub(super) const STAFF: &str = "sng001";
pub(super) const REPRESENTATIVE: &str = "hr@acme.com";
pub(super) const OTHER_REPRESENTATIVE: &str = "talent@globex.com";

pub(super) fn registry() -> Arc<UserRegistry> {
    let registry = UserRegistry::new();
    let users = [
        User::student(JUNIOR, "Chloe Lim", Credential::new("password"), None, 2, "CSC"),
        User::student(SENIOR, "Ethan Ong", Credential::new("password"), None, 4, "CSC"),
        User::staff(STAFF, "Dr Sng", Credential::new("password"), None, "CCDS"),
        User::company_representative(
            REPRESENTATIVE,
            "Ravi Kumar",
            Credential::new("password"),
            Some(REPRESENTATIVE.to_string()),
            CompanyRepresentativeProfile::new("Acme", "HR", "Recruiter"),
        ),
        User::company_representative(
            OTHER_REPRESENTATIVE,
            "Mei Chen",
            Credential::new("password"),
            None,
            CompanyRepresentativeProfile::new("Globex", "Engineering", "Manager"),
        ),
    ];
    for user in users {
        assert!(registry.register(user.expect("valid fixture user")));
    }
    Arc::new(registry)
}

pub(super) fn build_service() -> (
    PlacementService<InMemoryPlacementRepository>,
    Arc<InMemoryPlacementRepository>,
) {
    let repository = Arc::new(InMemoryPlacementRepository::default());
    let service = PlacementService::new(
        registry(),
        repository.clone(),
        PlacementLimits::default(),
    );
    (service, repository)
}

pub(super) fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub(super) fn draft(level: InternshipLevel) -> ListingDraft {
    ListingDraft {
        title: "Software Engineering Intern".to_string(),
        description: "Build internal tooling".to_string(),
        level,
        preferred_major: "CSC".to_string(),
        opens_on: NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"),
        closes_on: NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date"),
        slots: 3,
    }
}

pub(super) fn approve_representative<R>(service: &PlacementService<R>, representative: &str)
where
    R: PlacementRepository + 'static,
{
    service
        .open_representative_account(representative)
        .expect("account opens");
    service
        .approve_representative(STAFF, &user_id(representative))
        .expect("staff approves representative");
}

pub(super) fn pending_listing<R>(
    service: &PlacementService<R>,
    level: InternshipLevel,
) -> InternshipListing
where
    R: PlacementRepository + 'static,
{
    // The first listing opens and approves the account; later calls hit a conflict.
    if service.open_representative_account(REPRESENTATIVE).is_ok() {
        service
            .approve_representative(STAFF, &user_id(REPRESENTATIVE))
            .expect("staff approves representative");
    }
    service
        .create_listing(REPRESENTATIVE, draft(level))
        .expect("listing created")
}

pub(super) fn approved_listing<R>(
    service: &PlacementService<R>,
    level: InternshipLevel,
) -> InternshipListing
where
    R: PlacementRepository + 'static,
{
    let listing = pending_listing(service, level);
    service
        .approve_listing(STAFF, &listing.id)
        .expect("staff approves listing")
}

pub(super) struct UnavailableRepository;

impl PlacementRepository for UnavailableRepository {
    fn open_account(&self, _account: RepresentativeAccount) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_account(&self, _account: RepresentativeAccount) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_account(
        &self,
        _id: &UserId,
    ) -> Result<Option<RepresentativeAccount>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_listing(
        &self,
        _listing: InternshipListing,
    ) -> Result<InternshipListing, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_listing(&self, _listing: InternshipListing) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_listing(
        &self,
        _id: &InternshipId,
    ) -> Result<Option<InternshipListing>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn listings(&self) -> Result<Vec<InternshipListing>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_application(
        &self,
        _application: InternshipApplication,
    ) -> Result<InternshipApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_application(
        &self,
        _application: InternshipApplication,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<InternshipApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn applications(&self) -> Result<Vec<InternshipApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
