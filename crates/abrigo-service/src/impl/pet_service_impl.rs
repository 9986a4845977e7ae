//! Pet service implementation.

use crate::dto::{PetListResponse, PetResponse, RegisterPetsRequest, UpdatePetRequest};
use crate::pet_service::PetService;
use abrigo_core::{AbrigoError, AbrigoResult, PageRequest, Pet, PetId, UserId, ValidateExt};
use abrigo_repository::PetRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Pet service implementation.
pub struct PetServiceImpl<R: PetRepository> {
    pet_repository: Arc<R>,
}

impl<R: PetRepository> PetServiceImpl<R> {
    /// Creates a new pet service.
    pub fn new(pet_repository: Arc<R>) -> Self {
        Self { pet_repository }
    }
}

#[async_trait]
impl<R: PetRepository + 'static> PetService for PetServiceImpl<R> {
    async fn register_pets(
        &self,
        owner_id: UserId,
        request: RegisterPetsRequest,
    ) -> AbrigoResult<Vec<PetResponse>> {
        debug!("Registering {} pets for owner {}", request.pets.len(), owner_id);

        request.validate_request()?;

        let pets: Vec<Pet> = request
            .pets
            .into_iter()
            .map(|input| {
                let mut pet = Pet::new(
                    owner_id,
                    input.name,
                    input.specie,
                    input.age as u8,
                    input.weight_kg,
                );
                pet.breed = input.breed;
                pet.size_cm = input.size_cm;
                pet.photos = input.photos;
                pet
            })
            .collect();

        // The batch is all-or-nothing: one invalid entry rejects the whole
        // request before anything is written.
        let saved = self.pet_repository.save_many(&pets).await?;

        info!("Registered batch of {} pets", saved.len());
        Ok(saved.into_iter().map(PetResponse::from).collect())
    }

    async fn get_pet(&self, id: PetId) -> AbrigoResult<PetResponse> {
        debug!("Getting pet: {}", id);

        let pet = self
            .pet_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AbrigoError::not_found("Pet", id))?;

        Ok(PetResponse::from(pet))
    }

    async fn list_pets(&self, page: PageRequest) -> AbrigoResult<PetListResponse> {
        debug!("Listing pets, page: {}, size: {}", page.page, page.size);

        let pets = self.pet_repository.find_all(page).await?;
        Ok(PetListResponse::from(pets))
    }

    async fn list_pets_by_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> AbrigoResult<PetListResponse> {
        debug!("Listing pets for owner: {}", owner_id);

        let pets = self.pet_repository.find_by_owner(owner_id, page).await?;
        Ok(PetListResponse::from(pets))
    }

    async fn update_pet(&self, id: PetId, request: UpdatePetRequest) -> AbrigoResult<PetResponse> {
        debug!("Updating pet: {}", id);

        request.validate_request()?;

        let mut pet = self
            .pet_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AbrigoError::not_found("Pet", id))?;

        if let Some(name) = request.name {
            pet.name = name;
        }
        if let Some(breed) = request.breed {
            pet.breed = Some(breed);
        }
        if let Some(age) = request.age {
            pet.age = age as u8;
        }
        if let Some(weight_kg) = request.weight_kg {
            pet.weight_kg = weight_kg;
        }
        if let Some(photos) = request.photos {
            pet.photos = photos;
        }
        pet.updated_at = chrono::Utc::now();

        let updated = self.pet_repository.update(&pet).await?;

        info!("Pet updated: {}", id);
        Ok(PetResponse::from(updated))
    }

    async fn adopt_pet(&self, id: PetId) -> AbrigoResult<PetResponse> {
        debug!("Adopting pet: {}", id);

        let mut pet = self
            .pet_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AbrigoError::not_found("Pet", id))?;

        if pet.adopted {
            return Err(AbrigoError::Conflict(format!(
                "Pet '{}' is already adopted",
                pet.name
            )));
        }

        pet.mark_adopted();
        let updated = self.pet_repository.update(&pet).await?;

        info!("Pet adopted: {}", id);
        Ok(PetResponse::from(updated))
    }

    async fn delete_pet(&self, id: PetId) -> AbrigoResult<()> {
        debug!("Deleting pet: {}", id);

        let deleted = self.pet_repository.delete(id).await?;

        if !deleted {
            return Err(AbrigoError::not_found("Pet", id));
        }

        info!("Pet deleted: {}", id);
        Ok(())
    }
}

impl<R: PetRepository> std::fmt::Debug for PetServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::PetInput;
    use abrigo_core::Page;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockPetRepository {
        pets: Mutex<HashMap<PetId, Pet>>,
    }

    impl MockPetRepository {
        fn new() -> Self {
            Self {
                pets: Mutex::new(HashMap::new()),
            }
        }

        fn with_pet(pet: Pet) -> Self {
            let repo = Self::new();
            repo.pets.lock().unwrap().insert(pet.id, pet);
            repo
        }
    }

    #[async_trait]
    impl PetRepository for MockPetRepository {
        async fn find_by_id(&self, id: PetId) -> AbrigoResult<Option<Pet>> {
            Ok(self.pets.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self, page: PageRequest) -> AbrigoResult<Page<Pet>> {
            let pets: Vec<Pet> = self.pets.lock().unwrap().values().cloned().collect();
            let total = pets.len() as u64;
            Ok(Page::new(pets, page.page, page.size, total))
        }

        async fn find_by_owner(
            &self,
            owner_id: UserId,
            page: PageRequest,
        ) -> AbrigoResult<Page<Pet>> {
            let pets: Vec<Pet> = self
                .pets
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.owner_id == owner_id)
                .cloned()
                .collect();
            let total = pets.len() as u64;
            Ok(Page::new(pets, page.page, page.size, total))
        }

        async fn save_many(&self, pets: &[Pet]) -> AbrigoResult<Vec<Pet>> {
            let mut store = self.pets.lock().unwrap();
            for pet in pets {
                store.insert(pet.id, pet.clone());
            }
            Ok(pets.to_vec())
        }

        async fn update(&self, pet: &Pet) -> AbrigoResult<Pet> {
            self.pets.lock().unwrap().insert(pet.id, pet.clone());
            Ok(pet.clone())
        }

        async fn delete(&self, id: PetId) -> AbrigoResult<bool> {
            Ok(self.pets.lock().unwrap().remove(&id).is_some())
        }

        async fn count(&self) -> AbrigoResult<u64> {
            Ok(self.pets.lock().unwrap().len() as u64)
        }
    }

    fn create_service(repo: MockPetRepository) -> PetServiceImpl<MockPetRepository> {
        PetServiceImpl::new(Arc::new(repo))
    }

    fn valid_pet_input(name: &str) -> PetInput {
        PetInput {
            name: name.to_string(),
            specie: "dog".to_string(),
            breed: None,
            age: 3,
            weight_kg: 12.5,
            size_cm: None,
            photos: vec![],
        }
    }

    #[tokio::test]
    async fn test_register_pets_batch() {
        let service = create_service(MockPetRepository::new());
        let owner = UserId::new();

        let request = RegisterPetsRequest {
            pets: vec![valid_pet_input("Rex"), valid_pet_input("Mia")],
        };

        let result = service.register_pets(owner, request).await.unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.owner_id == owner.to_string()));
        assert!(result.iter().all(|p| !p.adopted));
    }

    #[tokio::test]
    async fn test_register_pets_empty_batch_rejected() {
        let service = create_service(MockPetRepository::new());

        let request = RegisterPetsRequest { pets: vec![] };
        let result = service.register_pets(UserId::new(), request).await;

        match result.unwrap_err() {
            AbrigoError::Validation(_) => {}
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_pets_invalid_entry_rejects_batch() {
        let service = create_service(MockPetRepository::new());

        let mut bad = valid_pet_input("  ");
        bad.weight_kg = 0.0;
        let request = RegisterPetsRequest {
            pets: vec![valid_pet_input("Rex"), bad],
        };

        let result = service.register_pets(UserId::new(), request).await;
        assert!(result.is_err());

        // Nothing was written.
        let page = service.list_pets(PageRequest::default()).await.unwrap();
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn test_get_pet_not_found() {
        let service = create_service(MockPetRepository::new());

        let result = service.get_pet(PetId::new()).await;
        match result.unwrap_err() {
            AbrigoError::NotFound { .. } => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_adopt_pet() {
        let pet = Pet::new(UserId::new(), "Rex".to_string(), "dog".to_string(), 3, 12.5);
        let pet_id = pet.id;
        let service = create_service(MockPetRepository::with_pet(pet));

        let result = service.adopt_pet(pet_id).await.unwrap();
        assert!(result.adopted);
    }

    #[tokio::test]
    async fn test_adopt_pet_twice_conflicts() {
        let pet = Pet::new(UserId::new(), "Rex".to_string(), "dog".to_string(), 3, 12.5);
        let pet_id = pet.id;
        let service = create_service(MockPetRepository::with_pet(pet));

        service.adopt_pet(pet_id).await.unwrap();
        let result = service.adopt_pet(pet_id).await;

        match result.unwrap_err() {
            AbrigoError::Conflict(_) => {}
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_pet() {
        let pet = Pet::new(UserId::new(), "Rex".to_string(), "dog".to_string(), 3, 12.5);
        let pet_id = pet.id;
        let service = create_service(MockPetRepository::with_pet(pet));

        let request = UpdatePetRequest {
            name: Some("Max".to_string()),
            breed: Some("vira-lata".to_string()),
            age: None,
            weight_kg: Some(14.0),
            photos: None,
        };

        let result = service.update_pet(pet_id, request).await.unwrap();
        assert_eq!(result.name, "Max");
        assert_eq!(result.weight_kg, 14.0);
        assert_eq!(result.age, 3);
    }

    #[tokio::test]
    async fn test_delete_pet_not_found() {
        let service = create_service(MockPetRepository::new());

        let result = service.delete_pet(PetId::new()).await;
        match result.unwrap_err() {
            AbrigoError::NotFound { .. } => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_pets_by_owner() {
        let owner = UserId::new();
        let repo = MockPetRepository::new();
        let service = create_service(repo);

        let request = RegisterPetsRequest {
            pets: vec![valid_pet_input("Rex")],
        };
        service.register_pets(owner, request).await.unwrap();

        let mine = service
            .list_pets_by_owner(owner, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.total_elements, 1);

        let theirs = service
            .list_pets_by_owner(UserId::new(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(theirs.total_elements, 0);
    }
}
