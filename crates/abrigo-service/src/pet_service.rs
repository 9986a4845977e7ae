//! Pet service trait definition.

use crate::dto::{PetListResponse, PetResponse, RegisterPetsRequest, UpdatePetRequest};
use abrigo_core::{AbrigoResult, PageRequest, PetId, UserId};
use async_trait::async_trait;

/// Pet service trait.
#[async_trait]
pub trait PetService: Send + Sync {
    /// Registers a batch of pets for the given owner.
    async fn register_pets(
        &self,
        owner_id: UserId,
        request: RegisterPetsRequest,
    ) -> AbrigoResult<Vec<PetResponse>>;

    /// Gets a pet by ID.
    async fn get_pet(&self, id: PetId) -> AbrigoResult<PetResponse>;

    /// Lists all pets with pagination.
    async fn list_pets(&self, page: PageRequest) -> AbrigoResult<PetListResponse>;

    /// Lists pets registered by a given owner.
    async fn list_pets_by_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> AbrigoResult<PetListResponse>;

    /// Updates a pet.
    async fn update_pet(&self, id: PetId, request: UpdatePetRequest) -> AbrigoResult<PetResponse>;

    /// Marks a pet as adopted.
    async fn adopt_pet(&self, id: PetId) -> AbrigoResult<PetResponse>;

    /// Deletes a pet.
    async fn delete_pet(&self, id: PetId) -> AbrigoResult<()>;
}
