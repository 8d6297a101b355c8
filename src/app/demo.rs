use crate::config::PlacementLimits;
use crate::directory::{CompanyRepresentativeProfile, Credential, User, UserId, UserRegistry};
use crate::error::AppError;
use crate::placements::{
    InMemoryPlacementRepository, InternshipLevel, ListingDraft, PlacementService,
};
use chrono::{Duration, Local};
use std::sync::Arc;

const STUDENT_ID: &str = "S1";
const STAFF_ID: &str = "T1";
const REPRESENTATIVE_ID: &str = "hr@acme.example";

fn demo_users() -> Result<Vec<User>, AppError> {
    let users = vec![
        User::student(
            STUDENT_ID,
            "Chloe Lim",
            Credential::new("password"),
            Some("chloe@example.edu".to_string()),
            2,
            "CS",
        ),
        User::staff(STAFF_ID, "Dr Sng", Credential::new("password"), None, "IT"),
        User::company_representative(
            REPRESENTATIVE_ID,
            "Ravi Kumar",
            Credential::new("password"),
            Some(REPRESENTATIVE_ID.to_string()),
            CompanyRepresentativeProfile::new("Acme", "HR", "Recruiter"),
        ),
    ];
    users
        .into_iter()
        .map(|user| user.map_err(AppError::from))
        .collect()
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Internship placement demo");

    let registry = Arc::new(UserRegistry::new());
    for user in demo_users()? {
        let user_id = user.id().clone();
        let registered = registry.register(user);
        println!("- register {user_id}: {registered}");
    }
    let duplicate = User::staff(STAFF_ID, "Impostor", Credential::new("x"), None, "HR")
        .map(|user| registry.register(user))
        .unwrap_or(false);
    println!("- register {STAFF_ID} again: {duplicate}");

    println!("\nProfiles");
    for id in [STUDENT_ID, STAFF_ID, REPRESENTATIVE_ID] {
        if let Some(user) = registry.find_by_id(id) {
            user.display_profile();
            println!("  (type: {})", user.user_type());
        }
    }

    let service = PlacementService::new(
        registry,
        Arc::new(InMemoryPlacementRepository::default()),
        PlacementLimits::default(),
    );

    println!("\nRepresentative onboarding");
    service.open_representative_account(REPRESENTATIVE_ID)?;
    let account =
        service.approve_representative(STAFF_ID, &UserId::new(REPRESENTATIVE_ID)?)?;
    println!(
        "- {} ({}) approved: {}",
        account.representative, account.company_name, account.approved
    );

    let today = Local::now().date_naive();
    let listing = service.create_listing(
        REPRESENTATIVE_ID,
        ListingDraft {
            title: "Platform Engineering Intern".to_string(),
            description: "Support the internal developer platform".to_string(),
            level: InternshipLevel::Basic,
            preferred_major: "CS".to_string(),
            opens_on: today,
            closes_on: today + Duration::days(30),
            slots: 2,
        },
    )?;
    println!("- listing {} submitted: {}", listing.id, listing.status.label());

    println!("\nListing review");
    let listing = service.approve_listing(STAFF_ID, &listing.id)?;
    println!("- approve -> {}", listing.status.label());
    let listing = service.reject_listing(STAFF_ID, &listing.id)?;
    println!("- reject  -> {}", listing.status.label());
    let listing = service.approve_listing(STAFF_ID, &listing.id)?;
    println!("- approve -> {}", listing.status.label());

    println!("\nApplication and withdrawal");
    let application = service.apply(STUDENT_ID, &listing.id)?;
    println!(
        "- {} applied to {}: {}",
        application.student,
        application.internship,
        application.status.label()
    );
    service.request_withdrawal(STUDENT_ID, &application.id)?;
    let settled = service.approve_withdrawal(STAFF_ID, &application.id)?;
    println!("- withdrawal approved -> {}", settled.status.label());

    let report = service.generate_report(STAFF_ID, "status=approved")?;
    println!(
        "\nReport '{}' generated by {} at {}",
        report.criteria, report.generated_by, report.generated_at
    );

    Ok(())
}
