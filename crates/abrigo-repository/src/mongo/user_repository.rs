//! MongoDB user repository implementation.

use super::{map_mongo_error, MongoDatabase, UserDocument};
use crate::traits::UserRepository;
use abrigo_core::{AbrigoError, AbrigoResult, Page, PageRequest, User, UserId};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::Collection;
use tracing::debug;

/// MongoDB user repository implementation.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Creates a new MongoDB user repository.
    #[must_use]
    pub fn new(database: &MongoDatabase) -> Self {
        Self {
            collection: database
                .inner()
                .collection::<UserDocument>(UserDocument::COLLECTION),
        }
    }

    async fn find_one(&self, filter: bson::Document) -> AbrigoResult<Option<User>> {
        let doc = self
            .collection
            .find_one(filter)
            .await
            .map_err(map_mongo_error)?;
        Ok(doc.map(User::from))
    }
}

/// Escapes PCRE metacharacters in a search fragment.
fn regex_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: UserId) -> AbrigoResult<Option<User>> {
        debug!("Finding user by id: {}", id);
        self.find_one(doc! { "_id": id.into_inner() }).await
    }

    async fn find_by_username(&self, username: &str) -> AbrigoResult<Option<User>> {
        debug!("Finding user by username: {}", username);
        self.find_one(doc! { "username": username }).await
    }

    async fn find_by_email(&self, email: &str) -> AbrigoResult<Option<User>> {
        debug!("Finding user by email: {}", email);
        self.find_one(doc! { "email": email.to_lowercase() }).await
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> AbrigoResult<Option<User>> {
        debug!("Finding user by username or email: {}", identifier);
        self.find_one(doc! {
            "$or": [
                { "username": identifier },
                { "email": identifier.to_lowercase() },
            ]
        })
        .await
    }

    async fn find_by_username_matching(
        &self,
        name: &str,
        page: PageRequest,
    ) -> AbrigoResult<Page<User>> {
        debug!("Finding users by username fragment: {}", name);

        // Escape the fragment so user input cannot change the match semantics.
        let filter = doc! {
            "username": { "$regex": regex_escape(name), "$options": "i" }
        };

        let total = self
            .collection
            .count_documents(filter.clone())
            .await
            .map_err(map_mongo_error)?;

        let docs: Vec<UserDocument> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(page.offset() as u64)
            .limit(page.limit() as i64)
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;

        let users = docs.into_iter().map(User::from).collect();
        Ok(Page::new(users, page.page, page.size, total))
    }

    async fn exists_by_email(&self, email: &str) -> AbrigoResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email.to_lowercase() })
            .await
            .map_err(map_mongo_error)?;
        Ok(count > 0)
    }

    async fn find_all(&self, page: PageRequest) -> AbrigoResult<Page<User>> {
        debug!("Finding all users, page: {}, size: {}", page.page, page.size);

        let total = self
            .collection
            .count_documents(doc! {})
            .await
            .map_err(map_mongo_error)?;

        let docs: Vec<UserDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(page.offset() as u64)
            .limit(page.limit() as i64)
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;

        let users = docs.into_iter().map(User::from).collect();
        Ok(Page::new(users, page.page, page.size, total))
    }

    async fn save(&self, user: &User) -> AbrigoResult<User> {
        debug!("Saving new user: {}", user.username);

        let document = UserDocument::from(user);
        self.collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;

        Ok(User::from(document))
    }

    async fn update(&self, user: &User) -> AbrigoResult<User> {
        debug!("Updating user: {}", user.id);

        let document = UserDocument::from(user);
        let result = self
            .collection
            .replace_one(doc! { "_id": user.id.into_inner() }, &document)
            .await
            .map_err(map_mongo_error)?;

        if result.matched_count == 0 {
            return Err(AbrigoError::not_found("User", user.id));
        }

        Ok(User::from(document))
    }

    async fn delete(&self, id: UserId) -> AbrigoResult<bool> {
        debug!("Deleting user: {}", id);

        let result = self
            .collection
            .delete_one(doc! { "_id": id.into_inner() })
            .await
            .map_err(map_mongo_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> AbrigoResult<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(map_mongo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_escape_passes_plain_text() {
        assert_eq!(regex_escape("bill grey"), "bill grey");
    }

    #[test]
    fn test_regex_escape_neutralizes_metacharacters() {
        assert_eq!(regex_escape("a.b*c"), "a\\.b\\*c");
        assert_eq!(regex_escape("(admin)"), "\\(admin\\)");
    }
}
