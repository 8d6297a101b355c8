use super::common::*;
use crate::placements::domain::{ApplicationStatus, InternshipLevel, ListingStatus};
use crate::placements::repository::RepositoryError;
use crate::placements::service::PlacementError;

#[test]
fn unapproved_representative_cannot_post() {
    let (service, _) = build_service();
    service
        .open_representative_account(REPRESENTATIVE)
        .expect("account opens");

    match service.create_listing(REPRESENTATIVE, draft(InternshipLevel::Basic)) {
        Err(PlacementError::RepresentativePending(id)) => assert_eq!(id.as_str(), REPRESENTATIVE),
        other => panic!("expected pending representative, got {other:?}"),
    }
}

#[test]
fn account_can_only_be_opened_once() {
    let (service, _) = build_service();
    service
        .open_representative_account(REPRESENTATIVE)
        .expect("account opens");
    assert!(matches!(
        service.open_representative_account(REPRESENTATIVE),
        Err(PlacementError::Repository(RepositoryError::Conflict))
    ));
}

#[test]
fn students_cannot_open_representative_accounts() {
    let (service, _) = build_service();
    assert!(matches!(
        service.open_representative_account(JUNIOR),
        Err(PlacementError::RoleMismatch { .. })
    ));
}

#[test]
fn new_listing_is_pending_and_carries_company() {
    let (service, _) = build_service();
    let listing = pending_listing(&service, InternshipLevel::Intermediate);

    assert_eq!(listing.status, ListingStatus::Pending);
    assert_eq!(listing.company_name, "Acme");
    assert_eq!(listing.representative.as_str(), REPRESENTATIVE);
    assert!(listing.id.0.starts_with("int-"));
}

#[test]
fn listing_draft_is_validated() {
    let (service, _) = build_service();
    approve_representative(&service, REPRESENTATIVE);

    let mut blank_title = draft(InternshipLevel::Basic);
    blank_title.title = "  ".to_string();
    let mut too_many_slots = draft(InternshipLevel::Basic);
    too_many_slots.slots = 11;
    let mut inverted_window = draft(InternshipLevel::Basic);
    std::mem::swap(&mut inverted_window.opens_on, &mut inverted_window.closes_on);

    for invalid in [blank_title, too_many_slots, inverted_window] {
        assert!(matches!(
            service.create_listing(REPRESENTATIVE, invalid),
            Err(PlacementError::InvalidListing(_))
        ));
    }
}

#[test]
fn listing_quota_is_enforced() {
    let (service, _) = build_service();
    let limit = service.limits().max_listings_per_representative;
    for _ in 0..limit {
        pending_listing(&service, InternshipLevel::Basic);
    }

    match service.create_listing(REPRESENTATIVE, draft(InternshipLevel::Basic)) {
        Err(PlacementError::ListingQuotaReached { limit: reported, .. }) => {
            assert_eq!(reported, limit)
        }
        other => panic!("expected quota error, got {other:?}"),
    }
}

#[test]
fn representative_decides_pending_applications_on_own_listings() {
    let (service, _) = build_service();
    let listing = approved_listing(&service, InternshipLevel::Basic);
    let application = service.apply(SENIOR, &listing.id).expect("applies");

    approve_representative(&service, OTHER_REPRESENTATIVE);
    assert!(matches!(
        service.decide_application(OTHER_REPRESENTATIVE, &application.id, true),
        Err(PlacementError::NotOwner { .. })
    ));

    let decided = service
        .decide_application(REPRESENTATIVE, &application.id, true)
        .expect("owner decides");
    assert_eq!(decided.status, ApplicationStatus::Successful);

    match service.decide_application(REPRESENTATIVE, &application.id, false) {
        Err(PlacementError::InvalidStatus {
            current, required, ..
        }) => {
            assert_eq!(current, "successful");
            assert_eq!(required, "pending");
        }
        other => panic!("expected invalid status, got {other:?}"),
    }
}
