use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::directory::UserId;

use super::domain::{
    ApplicationId, InternshipApplication, InternshipId, InternshipListing, RepresentativeAccount,
};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait PlacementRepository: Send + Sync {
    fn open_account(&self, account: RepresentativeAccount) -> Result<(), RepositoryError>;
    fn update_account(&self, account: RepresentativeAccount) -> Result<(), RepositoryError>;
    fn fetch_account(&self, id: &UserId) -> Result<Option<RepresentativeAccount>, RepositoryError>;

    fn insert_listing(&self, listing: InternshipListing)
        -> Result<InternshipListing, RepositoryError>;
    fn update_listing(&self, listing: InternshipListing) -> Result<(), RepositoryError>;
    fn fetch_listing(&self, id: &InternshipId)
        -> Result<Option<InternshipListing>, RepositoryError>;
    fn listings(&self) -> Result<Vec<InternshipListing>, RepositoryError>;

    fn insert_application(
        &self,
        application: InternshipApplication,
    ) -> Result<InternshipApplication, RepositoryError>;
    fn update_application(&self, application: InternshipApplication)
        -> Result<(), RepositoryError>;
    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<InternshipApplication>, RepositoryError>;
    fn applications(&self) -> Result<Vec<InternshipApplication>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct PlacementTables {
    accounts: HashMap<UserId, RepresentativeAccount>,
    listings: HashMap<InternshipId, InternshipListing>,
    applications: HashMap<ApplicationId, InternshipApplication>,
}

/// Process-local store backed by mutex-guarded maps.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlacementRepository {
    tables: Arc<Mutex<PlacementTables>>,
}

impl InMemoryPlacementRepository {
    fn with_tables<T>(&self, f: impl FnOnce(&mut PlacementTables) -> T) -> T {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        f(&mut guard)
    }
}

impl PlacementRepository for InMemoryPlacementRepository {
    fn open_account(&self, account: RepresentativeAccount) -> Result<(), RepositoryError> {
        self.with_tables(|tables| {
            if tables.accounts.contains_key(&account.representative) {
                return Err(RepositoryError::Conflict);
            }
            tables
                .accounts
                .insert(account.representative.clone(), account);
            Ok(())
        })
    }

    fn update_account(&self, account: RepresentativeAccount) -> Result<(), RepositoryError> {
        self.with_tables(|tables| match tables.accounts.get_mut(&account.representative) {
            Some(slot) => {
                *slot = account;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    fn fetch_account(&self, id: &UserId) -> Result<Option<RepresentativeAccount>, RepositoryError> {
        Ok(self.with_tables(|tables| tables.accounts.get(id).cloned()))
    }

    fn insert_listing(
        &self,
        listing: InternshipListing,
    ) -> Result<InternshipListing, RepositoryError> {
        self.with_tables(|tables| {
            if tables.listings.contains_key(&listing.id) {
                return Err(RepositoryError::Conflict);
            }
            tables.listings.insert(listing.id.clone(), listing.clone());
            Ok(listing)
        })
    }

    fn update_listing(&self, listing: InternshipListing) -> Result<(), RepositoryError> {
        self.with_tables(|tables| match tables.listings.get_mut(&listing.id) {
            Some(slot) => {
                *slot = listing;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    fn fetch_listing(
        &self,
        id: &InternshipId,
    ) -> Result<Option<InternshipListing>, RepositoryError> {
        Ok(self.with_tables(|tables| tables.listings.get(id).cloned()))
    }

    fn listings(&self) -> Result<Vec<InternshipListing>, RepositoryError> {
        let mut listings: Vec<InternshipListing> =
            self.with_tables(|tables| tables.listings.values().cloned().collect());
        listings.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(listings)
    }

    fn insert_application(
        &self,
        application: InternshipApplication,
    ) -> Result<InternshipApplication, RepositoryError> {
        self.with_tables(|tables| {
            if tables.applications.contains_key(&application.id) {
                return Err(RepositoryError::Conflict);
            }
            tables
                .applications
                .insert(application.id.clone(), application.clone());
            Ok(application)
        })
    }

    fn update_application(
        &self,
        application: InternshipApplication,
    ) -> Result<(), RepositoryError> {
        self.with_tables(|tables| match tables.applications.get_mut(&application.id) {
            Some(slot) => {
                *slot = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<InternshipApplication>, RepositoryError> {
        Ok(self.with_tables(|tables| tables.applications.get(id).cloned()))
    }

    fn applications(&self) -> Result<Vec<InternshipApplication>, RepositoryError> {
        let mut applications: Vec<InternshipApplication> =
            self.with_tables(|tables| tables.applications.values().cloned().collect());
        applications.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(applications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> RepresentativeAccount {
        RepresentativeAccount {
            representative: UserId::new(id).expect("valid id"),
            company_name: "Acme".to_string(),
            approved: false,
        }
    }

    #[test]
    fn open_account_conflicts_on_duplicate() {
        let repository = InMemoryPlacementRepository::default();
        repository.open_account(account("rep-1")).expect("opens");
        assert!(matches!(
            repository.open_account(account("rep-1")),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn update_requires_existing_record() {
        let repository = InMemoryPlacementRepository::default();
        assert!(matches!(
            repository.update_account(account("rep-2")),
            Err(RepositoryError::NotFound)
        ));

        repository.open_account(account("rep-2")).expect("opens");
        let mut updated = account("rep-2");
        updated.approved = true;
        repository.update_account(updated).expect("updates");

        let stored = repository
            .fetch_account(&UserId::new("rep-2").expect("valid id"))
            .expect("fetch succeeds")
            .expect("account present");
        assert!(stored.approved);
    }
}
