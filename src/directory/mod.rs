//! User identities, roles, and the registry that keeps identifiers unique.

pub mod domain;
pub mod import;
pub mod registry;
pub mod router;

pub use domain::{
    Account, CompanyRepresentativeProfile, Credential, Profile, Role, StaffProfile,
    StudentProfile, User, UserId, UserRegistration, UserType, UserView,
};
pub use import::{register_roster, RosterImportError, RosterImporter, RosterKind, RosterSummary};
pub use registry::{DirectoryError, UserRegistry};
pub use router::directory_router;
