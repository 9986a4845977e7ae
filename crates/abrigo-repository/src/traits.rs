//! Repository trait definitions.

use abrigo_core::{AbrigoResult, Page, PageRequest, Pet, PetId, User, UserId};
use async_trait::async_trait;

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> AbrigoResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> AbrigoResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> AbrigoResult<Option<User>>;

    /// Finds a user by username or email.
    async fn find_by_username_or_email(&self, identifier: &str) -> AbrigoResult<Option<User>>;

    /// Finds users whose username contains the given fragment.
    async fn find_by_username_matching(
        &self,
        name: &str,
        page: PageRequest,
    ) -> AbrigoResult<Page<User>>;

    /// Checks if an email exists.
    async fn exists_by_email(&self, email: &str) -> AbrigoResult<bool>;

    /// Finds all users with pagination.
    async fn find_all(&self, page: PageRequest) -> AbrigoResult<Page<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> AbrigoResult<User>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> AbrigoResult<User>;

    /// Deletes a user by ID. Returns false if no user matched.
    async fn delete(&self, id: UserId) -> AbrigoResult<bool>;

    /// Counts all users.
    async fn count(&self) -> AbrigoResult<u64>;
}

/// Pet repository trait.
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Finds a pet by ID.
    async fn find_by_id(&self, id: PetId) -> AbrigoResult<Option<Pet>>;

    /// Finds all pets with pagination.
    async fn find_all(&self, page: PageRequest) -> AbrigoResult<Page<Pet>>;

    /// Finds pets registered by a given owner.
    async fn find_by_owner(&self, owner_id: UserId, page: PageRequest) -> AbrigoResult<Page<Pet>>;

    /// Saves a batch of new pets in one write.
    async fn save_many(&self, pets: &[Pet]) -> AbrigoResult<Vec<Pet>>;

    /// Updates an existing pet.
    async fn update(&self, pet: &Pet) -> AbrigoResult<Pet>;

    /// Deletes a pet by ID. Returns false if no pet matched.
    async fn delete(&self, id: PetId) -> AbrigoResult<bool>;

    /// Counts all pets.
    async fn count(&self) -> AbrigoResult<u64>;
}
