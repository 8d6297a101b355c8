use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::registry::DirectoryError;

/// Identifier wrapper for registered users. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Result<Self, DirectoryError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryError::MissingIdentifier);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        UserId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Opaque login secret. Kept out of `Debug` output and never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Identity fields shared by every role.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub credential: Credential,
    pub email: Option<String>,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credential: Credential,
        email: Option<String>,
    ) -> Result<Self, DirectoryError> {
        Ok(Self {
            id: UserId::new(id)?,
            name: name.into(),
            credential,
            email: email.filter(|value| !value.trim().is_empty()),
        })
    }
}

/// Stable tag used by callers to branch on the kind of user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Student,
    Staff,
    CompanyRepresentative,
}

impl UserType {
    pub const fn label(self) -> &'static str {
        match self {
            UserType::Student => "Student",
            UserType::Staff => "Staff",
            UserType::CompanyRepresentative => "CompanyRepresentative",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Capabilities every role profile provides to the owning [`User`].
pub trait Profile {
    fn user_type(&self) -> UserType;

    /// Role-specific lines of the profile summary.
    fn write_details(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    year_of_study: u8,
    major: String,
}

impl StudentProfile {
    pub fn new(year_of_study: u8, major: impl Into<String>) -> Result<Self, DirectoryError> {
        if year_of_study == 0 {
            return Err(DirectoryError::InvalidYearOfStudy(year_of_study));
        }
        Ok(Self {
            year_of_study,
            major: major.into(),
        })
    }

    pub fn year_of_study(&self) -> u8 {
        self.year_of_study
    }

    pub fn major(&self) -> &str {
        &self.major
    }
}

impl Profile for StudentProfile {
    fn user_type(&self) -> UserType {
        UserType::Student
    }

    fn write_details(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "Year of study: {}", self.year_of_study)?;
        write!(out, "Major: {}", self.major)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffProfile {
    department: String,
}

impl StaffProfile {
    pub fn new(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
        }
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn set_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
    }
}

impl Profile for StaffProfile {
    fn user_type(&self) -> UserType {
        UserType::Staff
    }

    fn write_details(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Department: {}", self.department)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRepresentativeProfile {
    company_name: String,
    department: String,
    position: String,
}

impl CompanyRepresentativeProfile {
    pub fn new(
        company_name: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            department: department.into(),
            position: position.into(),
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn position(&self) -> &str {
        &self.position
    }
}

impl Profile for CompanyRepresentativeProfile {
    fn user_type(&self) -> UserType {
        UserType::CompanyRepresentative
    }

    fn write_details(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "Company: {}", self.company_name)?;
        writeln!(out, "Department: {}", self.department)?;
        write!(out, "Position: {}", self.position)
    }
}

/// Closed set of roles a user can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Student(StudentProfile),
    Staff(StaffProfile),
    CompanyRepresentative(CompanyRepresentativeProfile),
}

impl Role {
    fn profile(&self) -> &dyn Profile {
        match self {
            Role::Student(profile) => profile,
            Role::Staff(profile) => profile,
            Role::CompanyRepresentative(profile) => profile,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    account: Account,
    role: Role,
}

impl User {
    pub fn new(account: Account, role: Role) -> Self {
        Self { account, role }
    }

    pub fn student(
        id: impl Into<String>,
        name: impl Into<String>,
        credential: Credential,
        email: Option<String>,
        year_of_study: u8,
        major: impl Into<String>,
    ) -> Result<Self, DirectoryError> {
        let account = Account::new(id, name, credential, email)?;
        let profile = StudentProfile::new(year_of_study, major)?;
        Ok(Self::new(account, Role::Student(profile)))
    }

    pub fn staff(
        id: impl Into<String>,
        name: impl Into<String>,
        credential: Credential,
        email: Option<String>,
        department: impl Into<String>,
    ) -> Result<Self, DirectoryError> {
        let account = Account::new(id, name, credential, email)?;
        Ok(Self::new(account, Role::Staff(StaffProfile::new(department))))
    }

    pub fn company_representative(
        id: impl Into<String>,
        name: impl Into<String>,
        credential: Credential,
        email: Option<String>,
        profile: CompanyRepresentativeProfile,
    ) -> Result<Self, DirectoryError> {
        let account = Account::new(id, name, credential, email)?;
        Ok(Self::new(account, Role::CompanyRepresentative(profile)))
    }

    pub fn id(&self) -> &UserId {
        &self.account.id
    }

    pub fn name(&self) -> &str {
        &self.account.name
    }

    pub fn email(&self) -> Option<&str> {
        self.account.email.as_deref()
    }

    pub fn credential(&self) -> &Credential {
        &self.account.credential
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn user_type(&self) -> UserType {
        self.role.profile().user_type()
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match &self.role {
            Role::Student(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_staff(&self) -> Option<&StaffProfile> {
        match &self.role {
            Role::Staff(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_staff_mut(&mut self) -> Option<&mut StaffProfile> {
        match &mut self.role {
            Role::Staff(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_company_representative(&self) -> Option<&CompanyRepresentativeProfile> {
        match &self.role {
            Role::CompanyRepresentative(profile) => Some(profile),
            _ => None,
        }
    }

    /// Human readable summary, deterministic for the current field values.
    pub fn profile_summary(&self) -> String {
        self.to_string()
    }

    fn write_profile(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(
            out,
            "{} {} ({})",
            self.user_type(),
            self.account.id,
            self.account.name
        )?;
        writeln!(out, "Email: {}", self.email().unwrap_or("-"))?;
        self.role.profile().write_details(out)
    }

    /// Print the profile summary to stdout.
    pub fn display_profile(&self) {
        println!("{}", self.profile_summary());
    }

    pub fn view(&self) -> UserView {
        let (year_of_study, major, department, company_name, position) = match &self.role {
            Role::Student(profile) => (
                Some(profile.year_of_study),
                Some(profile.major.clone()),
                None,
                None,
                None,
            ),
            Role::Staff(profile) => (None, None, Some(profile.department.clone()), None, None),
            Role::CompanyRepresentative(profile) => (
                None,
                None,
                Some(profile.department.clone()),
                Some(profile.company_name.clone()),
                Some(profile.position.clone()),
            ),
        };

        UserView {
            user_id: self.account.id.clone(),
            name: self.account.name.clone(),
            email: self.account.email.clone(),
            user_type: self.user_type(),
            year_of_study,
            major,
            department,
            company_name,
            position,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_profile(f)
    }
}

/// Serializable projection of a user without the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub user_id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Inbound registration payload, tagged by role.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum UserRegistration {
    Student {
        user_id: String,
        name: String,
        password: String,
        #[serde(default)]
        email: Option<String>,
        year_of_study: u8,
        major: String,
    },
    Staff {
        user_id: String,
        name: String,
        password: String,
        #[serde(default)]
        email: Option<String>,
        department: String,
    },
    CompanyRepresentative {
        user_id: String,
        name: String,
        password: String,
        #[serde(default)]
        email: Option<String>,
        company_name: String,
        department: String,
        position: String,
    },
}

impl TryFrom<UserRegistration> for User {
    type Error = DirectoryError;

    fn try_from(value: UserRegistration) -> Result<Self, Self::Error> {
        match value {
            UserRegistration::Student {
                user_id,
                name,
                password,
                email,
                year_of_study,
                major,
            } => User::student(
                user_id,
                name,
                Credential::new(password),
                email,
                year_of_study,
                major,
            ),
            UserRegistration::Staff {
                user_id,
                name,
                password,
                email,
                department,
            } => User::staff(user_id, name, Credential::new(password), email, department),
            UserRegistration::CompanyRepresentative {
                user_id,
                name,
                password,
                email,
                company_name,
                department,
                position,
            } => User::company_representative(
                user_id,
                name,
                Credential::new(password),
                email,
                CompanyRepresentativeProfile::new(company_name, department, position),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> User {
        User::student(
            "S1",
            "Alice Tan",
            Credential::new("password"),
            Some("alice@example.edu".to_string()),
            2,
            "CS",
        )
        .expect("valid student")
    }

    #[test]
    fn blank_identifier_is_rejected_at_construction() {
        let result = User::staff("   ", "Nobody", Credential::new("pw"), None, "IT");
        assert_eq!(result.unwrap_err(), DirectoryError::MissingIdentifier);
    }

    #[test]
    fn identifier_is_trimmed() {
        let id = UserId::new("  T1 ").expect("valid id");
        assert_eq!(id.as_str(), "T1");
    }

    #[test]
    fn year_of_study_must_be_positive() {
        let result = User::student("S9", "Zero", Credential::new("pw"), None, 0, "EEE");
        assert_eq!(result.unwrap_err(), DirectoryError::InvalidYearOfStudy(0));
    }

    #[test]
    fn user_type_labels_are_unique_per_variant() {
        let labels = [
            UserType::Student.label(),
            UserType::Staff.label(),
            UserType::CompanyRepresentative.label(),
        ];
        assert_eq!(labels, ["Student", "Staff", "CompanyRepresentative"]);
        assert_eq!(student().user_type(), UserType::Student);
    }

    #[test]
    fn student_summary_lists_year_and_major() {
        let summary = student().profile_summary();
        assert_eq!(
            summary,
            "Student S1 (Alice Tan)\nEmail: alice@example.edu\nYear of study: 2\nMajor: CS"
        );
    }

    #[test]
    fn display_matches_profile_summary() {
        let user = student();
        assert_eq!(format!("{user}"), user.profile_summary());
    }

    #[test]
    fn staff_department_can_change() {
        let mut staff =
            User::staff("T1", "Dr Lim", Credential::new("pw"), None, "IT").expect("valid staff");
        staff
            .as_staff_mut()
            .expect("staff profile")
            .set_department("CCDS");

        assert_eq!(staff.as_staff().map(StaffProfile::department), Some("CCDS"));
        assert!(staff.profile_summary().ends_with("Department: CCDS"));
        assert!(staff.profile_summary().contains("Email: -"));
    }

    #[test]
    fn blank_email_is_treated_as_absent() {
        let staff = User::staff("T2", "Ms Ong", Credential::new("pw"), Some(" ".into()), "HR")
            .expect("valid staff");
        assert_eq!(staff.email(), None);
    }

    #[test]
    fn credential_is_redacted_in_debug_output() {
        let rendered = format!("{:?}", student());
        assert!(!rendered.contains("password"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn registration_payload_builds_representative() {
        let payload: UserRegistration = serde_json::from_value(serde_json::json!({
            "role": "company_representative",
            "user_id": "rep@acme.com",
            "name": "Ravi",
            "password": "secret",
            "company_name": "Acme",
            "department": "HR",
            "position": "Recruiter",
        }))
        .expect("payload parses");

        let user = User::try_from(payload).expect("valid representative");
        assert_eq!(user.user_type(), UserType::CompanyRepresentative);
        let view = user.view();
        assert_eq!(view.company_name.as_deref(), Some("Acme"));
        assert!(user.credential().matches("secret"));
    }
}
