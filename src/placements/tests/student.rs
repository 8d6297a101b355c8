use super::common::*;
use crate::config::PlacementLimits;
use crate::placements::domain::{ApplicationStatus, InternshipLevel};
use crate::placements::repository::InMemoryPlacementRepository;
use crate::placements::service::{PlacementError, PlacementService};
use std::sync::Arc;

#[test]
fn students_apply_only_to_approved_listings() {
    let (service, _) = build_service();
    let listing = pending_listing(&service, InternshipLevel::Basic);

    match service.apply(SENIOR, &listing.id) {
        Err(PlacementError::InvalidStatus {
            entity,
            current,
            required,
            ..
        }) => {
            assert_eq!(entity, "InternshipListing");
            assert_eq!(current, "pending");
            assert_eq!(required, "approved");
        }
        other => panic!("expected invalid status, got {other:?}"),
    }
}

#[test]
fn junior_students_are_limited_to_basic_listings() {
    let (service, _) = build_service();
    let advanced = approved_listing(&service, InternshipLevel::Advanced);
    let basic = approved_listing(&service, InternshipLevel::Basic);

    match service.apply(JUNIOR, &advanced.id) {
        Err(PlacementError::LevelNotPermitted {
            year_of_study,
            level,
            ..
        }) => {
            assert_eq!(year_of_study, 2);
            assert_eq!(level, "advanced");
        }
        other => panic!("expected level restriction, got {other:?}"),
    }

    let application = service.apply(JUNIOR, &basic.id).expect("basic is open");
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(service.apply(SENIOR, &advanced.id).is_ok());
}

#[test]
fn duplicate_application_is_refused() {
    let (service, _) = build_service();
    let listing = approved_listing(&service, InternshipLevel::Basic);
    service.apply(SENIOR, &listing.id).expect("first application");

    assert!(matches!(
        service.apply(SENIOR, &listing.id),
        Err(PlacementError::DuplicateApplication { .. })
    ));
}

#[test]
fn withdrawn_application_still_blocks_reapplying() {
    let (service, _) = build_service();
    let listing = approved_listing(&service, InternshipLevel::Basic);
    let application = service.apply(SENIOR, &listing.id).expect("first application");
    service
        .request_withdrawal(SENIOR, &application.id)
        .expect("withdrawal requested");
    service
        .approve_withdrawal(STAFF, &application.id)
        .expect("withdrawal approved");

    match service.apply(SENIOR, &listing.id) {
        Err(PlacementError::DuplicateApplication { internship, .. }) => {
            assert_eq!(internship, listing.id)
        }
        other => panic!("expected duplicate application, got {other:?}"),
    }
}

#[test]
fn active_application_quota_is_enforced() {
    let repository = Arc::new(InMemoryPlacementRepository::default());
    let limits = PlacementLimits {
        max_active_applications: 2,
        ..PlacementLimits::default()
    };
    let service = PlacementService::new(registry(), repository, limits);

    let listings: Vec<_> = (0..3)
        .map(|_| approved_listing(&service, InternshipLevel::Basic))
        .collect();
    service.apply(SENIOR, &listings[0].id).expect("first");
    let second = service.apply(SENIOR, &listings[1].id).expect("second");

    assert!(matches!(
        service.apply(SENIOR, &listings[2].id),
        Err(PlacementError::ApplicationQuotaReached { limit: 2, .. })
    ));

    service
        .request_withdrawal(SENIOR, &second.id)
        .expect("withdrawal requested");
    service
        .approve_withdrawal(STAFF, &second.id)
        .expect("withdrawal approved");
    assert!(service.apply(SENIOR, &listings[2].id).is_ok());
}

#[test]
fn withdrawal_requires_ownership_and_active_status() {
    let (service, _) = build_service();
    let listing = approved_listing(&service, InternshipLevel::Basic);
    let application = service.apply(SENIOR, &listing.id).expect("applies");

    assert!(matches!(
        service.request_withdrawal(JUNIOR, &application.id),
        Err(PlacementError::NotOwner { .. })
    ));

    let requested = service
        .request_withdrawal(SENIOR, &application.id)
        .expect("owner requests");
    assert!(requested.withdrawal_requested);
    assert_eq!(requested.status, ApplicationStatus::Pending);

    service
        .approve_withdrawal(STAFF, &application.id)
        .expect("approved");
    match service.request_withdrawal(SENIOR, &application.id) {
        Err(PlacementError::InvalidStatus { current, .. }) => assert_eq!(current, "withdrawn"),
        other => panic!("expected invalid status, got {other:?}"),
    }
}

#[test]
fn staff_cannot_apply() {
    let (service, _) = build_service();
    let listing = approved_listing(&service, InternshipLevel::Basic);
    assert!(matches!(
        service.apply(STAFF, &listing.id),
        Err(PlacementError::RoleMismatch { .. })
    ));
}
