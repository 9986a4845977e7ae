//! MongoDB pet repository implementation.

use super::{map_mongo_error, MongoDatabase, PetDocument};
use crate::traits::PetRepository;
use abrigo_core::{AbrigoError, AbrigoResult, Page, PageRequest, Pet, PetId, UserId};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::Collection;
use tracing::debug;

/// MongoDB pet repository implementation.
#[derive(Clone, Debug)]
pub struct MongoPetRepository {
    collection: Collection<PetDocument>,
}

impl MongoPetRepository {
    /// Creates a new MongoDB pet repository.
    #[must_use]
    pub fn new(database: &MongoDatabase) -> Self {
        Self {
            collection: database
                .inner()
                .collection::<PetDocument>(PetDocument::COLLECTION),
        }
    }

    async fn find_page(
        &self,
        filter: bson::Document,
        page: PageRequest,
    ) -> AbrigoResult<Page<Pet>> {
        let total = self
            .collection
            .count_documents(filter.clone())
            .await
            .map_err(map_mongo_error)?;

        let docs: Vec<PetDocument> = self
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

        let pets = docs.into_iter().map(Pet::from).collect();
        Ok(Page::new(pets, page.page, page.size, total))
    }
}

#[async_trait]
impl PetRepository for MongoPetRepository {
    async fn find_by_id(&self, id: PetId) -> AbrigoResult<Option<Pet>> {
        debug!("Finding pet by id: {}", id);

        let doc = self
            .collection
            .find_one(doc! { "_id": id.into_inner() })
            .await
            .map_err(map_mongo_error)?;
        Ok(doc.map(Pet::from))
    }

    async fn find_all(&self, page: PageRequest) -> AbrigoResult<Page<Pet>> {
        debug!("Finding all pets, page: {}, size: {}", page.page, page.size);
        self.find_page(doc! {}, page).await
    }

    async fn find_by_owner(&self, owner_id: UserId, page: PageRequest) -> AbrigoResult<Page<Pet>> {
        debug!("Finding pets by owner: {}", owner_id);
        self.find_page(doc! { "owner_id": owner_id.into_inner() }, page)
            .await
    }

    async fn save_many(&self, pets: &[Pet]) -> AbrigoResult<Vec<Pet>> {
        debug!("Saving batch of {} pets", pets.len());

        if pets.is_empty() {
            return Ok(Vec::new());
        }

        let documents: Vec<PetDocument> = pets.iter().map(PetDocument::from).collect();
        self.collection
            .insert_many(&documents)
            .await
            .map_err(map_mongo_error)?;

        Ok(documents.into_iter().map(Pet::from).collect())
    }

    async fn update(&self, pet: &Pet) -> AbrigoResult<Pet> {
        debug!("Updating pet: {}", pet.id);

        let document = PetDocument::from(pet);
        let result = self
            .collection
            .replace_one(doc! { "_id": pet.id.into_inner() }, &document)
            .await
            .map_err(map_mongo_error)?;

        if result.matched_count == 0 {
            return Err(AbrigoError::not_found("Pet", pet.id));
        }

        Ok(Pet::from(document))
    }

    async fn delete(&self, id: PetId) -> AbrigoResult<bool> {
        debug!("Deleting pet: {}", id);

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
