//! In-memory adapters backing the domain ports.
//!
//! Used when no database is configured (local development) and throughout
//! the test suites. All stores keep insertion order so "newest first"
//! listings are simply the reverse.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, OutfitPersistenceError, OutfitRepository,
    OutfitSuggestionRequest, SuggestionSource, SuggestionSourceError, WardrobePersistenceError,
    WardrobeRepository,
};
use crate::domain::{Account, Category, ImageUrl, ItemId, Outfit, UserId, Username, WardrobeItem};

fn lock<T>(store: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    // A poisoned lock only means another test panicked mid-write; the data
    // is still usable.
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Account store backed by a `Vec` guarded by a mutex.
#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
        let mut accounts = lock(&self.accounts);
        if accounts
            .iter()
            .any(|existing| existing.username() == account.username())
        {
            return Err(AccountPersistenceError::DuplicateUsername);
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(lock(&self.accounts)
            .iter()
            .find(|account| account.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(lock(&self.accounts)
            .iter()
            .find(|account| account.id() == id)
            .cloned())
    }
}

/// Wardrobe item store backed by a `Vec` guarded by a mutex.
#[derive(Default)]
pub struct MemoryWardrobeRepository {
    items: Mutex<Vec<WardrobeItem>>,
}

#[async_trait]
impl WardrobeRepository for MemoryWardrobeRepository {
    async fn insert(&self, item: &WardrobeItem) -> Result<(), WardrobePersistenceError> {
        lock(&self.items).push(item.clone());
        Ok(())
    }

    async fn find(&self, id: &ItemId) -> Result<Option<WardrobeItem>, WardrobePersistenceError> {
        Ok(lock(&self.items)
            .iter()
            .find(|item| item.id == *id)
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        category: Option<Category>,
    ) -> Result<Vec<WardrobeItem>, WardrobePersistenceError> {
        Ok(lock(&self.items)
            .iter()
            .rev()
            .filter(|item| {
                item.owner == *owner && category.is_none_or(|wanted| item.category == wanted)
            })
            .cloned()
            .collect())
    }

    async fn update(&self, item: &WardrobeItem) -> Result<bool, WardrobePersistenceError> {
        let mut items = lock(&self.items);
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, WardrobePersistenceError> {
        let mut items = lock(&self.items);
        let before = items.len();
        items.retain(|item| item.id != *id);
        Ok(items.len() < before)
    }
}

/// Outfit store backed by a `Vec` guarded by a mutex.
#[derive(Default)]
pub struct MemoryOutfitRepository {
    outfits: Mutex<Vec<Outfit>>,
}

#[async_trait]
impl OutfitRepository for MemoryOutfitRepository {
    async fn insert(&self, outfit: &Outfit) -> Result<(), OutfitPersistenceError> {
        lock(&self.outfits).push(outfit.clone());
        Ok(())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Outfit>, OutfitPersistenceError> {
        Ok(lock(&self.outfits)
            .iter()
            .rev()
            .filter(|outfit| outfit.owner == *owner)
            .cloned()
            .collect())
    }
}

/// Suggestion source answering every call with a fixed text.
pub struct CannedSuggestionSource {
    text: String,
}

impl CannedSuggestionSource {
    /// Answer every suggestion and caption request with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl SuggestionSource for CannedSuggestionSource {
    async fn suggest_outfit(
        &self,
        _request: &OutfitSuggestionRequest,
    ) -> Result<String, SuggestionSourceError> {
        Ok(self.text.clone())
    }

    async fn describe_image(&self, _url: &ImageUrl) -> Result<String, SuggestionSourceError> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemDescription;

    fn item(owner: UserId, category: Category, text: &str) -> WardrobeItem {
        WardrobeItem {
            id: ItemId::random(),
            owner,
            category,
            description: ItemDescription::new(text).expect("valid description"),
            image: None,
        }
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_scoped_to_owner() {
        let repo = MemoryWardrobeRepository::default();
        let owner = UserId::random();
        let other = UserId::random();

        let older = item(owner, Category::Tops, "white shirt");
        let newer = item(owner, Category::Shoes, "black boots");
        let foreign = item(other, Category::Tops, "red scarf");
        for entry in [&older, &newer, &foreign] {
            repo.insert(entry).await.expect("insert succeeds");
        }

        let listed = repo
            .list_for_owner(&owner, None)
            .await
            .expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);

        let tops = repo
            .list_for_owner(&owner, Some(Category::Tops))
            .await
            .expect("list succeeds");
        assert_eq!(tops.len(), 1);
        assert_eq!(tops[0].id, older.id);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = MemoryWardrobeRepository::default();
        let entry = item(UserId::random(), Category::Dresses, "summer dress");
        repo.insert(&entry).await.expect("insert succeeds");

        assert!(repo.delete(&entry.id).await.expect("delete succeeds"));
        assert!(!repo.delete(&entry.id).await.expect("delete succeeds"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let repo = MemoryAccountRepository::default();
        let account = Account::new(
            UserId::random(),
            Username::new("ada").expect("valid username"),
            crate::domain::PasswordHash::derive("pw"),
        );
        repo.insert(&account).await.expect("first insert succeeds");

        let clash = Account::new(
            UserId::random(),
            Username::new("ada").expect("valid username"),
            crate::domain::PasswordHash::derive("other"),
        );
        assert_eq!(
            repo.insert(&clash).await.expect_err("duplicate must fail"),
            AccountPersistenceError::DuplicateUsername
        );
    }
}
