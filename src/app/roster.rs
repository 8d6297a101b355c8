use crate::directory::{
    register_roster, RosterImporter, RosterKind, RosterSummary, UserRegistry, UserType,
};
use crate::error::AppError;
use crate::placements::{PlacementRepository, PlacementService};
use clap::Args;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug, Default)]
pub(crate) struct RosterArgs {
    /// Student roster CSV (StudentID,Name,Major,Year,Email)
    #[arg(long)]
    pub(crate) students: Option<PathBuf>,
    /// Staff roster CSV (StaffID,Name,Role,Department,Email)
    #[arg(long)]
    pub(crate) staff: Option<PathBuf>,
    /// Company representative roster CSV (CompanyRepID,Name,CompanyName,Department,Position,Email)
    #[arg(long)]
    pub(crate) representatives: Option<PathBuf>,
}

impl RosterArgs {
    fn sources(&self) -> impl Iterator<Item = (&PathBuf, RosterKind)> {
        [
            (self.students.as_ref(), RosterKind::Students),
            (self.staff.as_ref(), RosterKind::Staff),
            (self.representatives.as_ref(), RosterKind::Representatives),
        ]
        .into_iter()
        .filter_map(|(path, kind)| path.map(|path| (path, kind)))
    }
}

/// Import every configured roster into `registry`.
pub(crate) fn load_rosters(
    registry: &UserRegistry,
    args: &RosterArgs,
) -> Result<Vec<RosterSummary>, AppError> {
    let mut summaries = Vec::new();
    for (path, kind) in args.sources() {
        let users = RosterImporter::from_path(path, kind)?;
        summaries.push(register_roster(registry, users));
    }
    Ok(summaries)
}

/// Open unapproved accounts for every registered representative lacking one.
pub(crate) fn open_representative_accounts<R>(service: &PlacementService<R>)
where
    R: PlacementRepository + 'static,
{
    for user in service
        .registry()
        .users_of_type(UserType::CompanyRepresentative)
    {
        if let Err(error) = service.open_representative_account(user.id().as_str()) {
            warn!(user_id = %user.id(), %error, "representative account not opened");
        }
    }
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let registry = UserRegistry::new();
    let summaries = load_rosters(&registry, &args)?;

    let skipped: usize = summaries.iter().map(|summary| summary.skipped.len()).sum();
    println!(
        "Roster import: {} users registered, {} duplicates skipped",
        registry.len(),
        skipped
    );

    for user_type in [
        UserType::Student,
        UserType::Staff,
        UserType::CompanyRepresentative,
    ] {
        let users = registry.users_of_type(user_type);
        if users.is_empty() {
            continue;
        }
        println!("\n{} ({})", user_type, users.len());
        for user in users {
            user.display_profile();
            println!();
        }
    }

    Ok(())
}
