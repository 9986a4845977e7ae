//! Pet-related DTOs.

use abrigo_core::validation::rules;
use abrigo_core::Pet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to register a batch of pets.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPetsRequest {
    #[validate(length(min = 1, message = "pets must contain at least one entry"))]
    #[validate(nested)]
    pub pets: Vec<PetInput>,
}

/// A single pet in a batch registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetInput {
    #[validate(custom(function = "rules::not_blank", message = "name must not be blank"))]
    pub name: String,

    #[validate(custom(function = "rules::not_blank", message = "specie must not be blank"))]
    pub specie: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,

    // Signed on the wire: a negative value must reach the validator,
    // not fail during JSON decoding.
    #[validate(range(min = 0, max = 40, message = "age must be between 0 and 40"))]
    pub age: i32,

    #[validate(range(min = 0.1, message = "weightKg must be positive"))]
    pub weight_kg: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.1, message = "sizeCm must be positive"))]
    pub size_cm: Option<f64>,

    #[serde(default)]
    pub photos: Vec<String>,
}

/// Request to update a pet.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "rules::not_blank", message = "name must not be blank"))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 40, message = "age must be between 0 and 40"))]
    pub age: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.1, message = "weightKg must be positive"))]
    pub weight_kg: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

/// Pet response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub specie: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    pub age: u8,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_cm: Option<f64>,
    pub photos: Vec<String>,
    pub adopted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            owner_id: pet.owner_id.to_string(),
            name: pet.name,
            specie: pet.specie,
            breed: pet.breed,
            age: pet.age,
            weight_kg: pet.weight_kg,
            size_cm: pet.size_cm,
            photos: pet.photos,
            adopted: pet.adopted,
            created_at: pet.created_at,
        }
    }
}

/// Pet list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetListResponse {
    pub pets: Vec<PetResponse>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<abrigo_core::Page<Pet>> for PetListResponse {
    fn from(page: abrigo_core::Page<Pet>) -> Self {
        let info = page.info;
        Self {
            pets: page.content.into_iter().map(PetResponse::from).collect(),
            page: info.page,
            size: info.size,
            total_elements: info.total_elements,
            total_pages: info.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_pet() -> PetInput {
        PetInput {
            name: "Rex".to_string(),
            specie: "dog".to_string(),
            breed: Some("vira-lata".to_string()),
            age: 3,
            weight_kg: 12.5,
            size_cm: Some(45.0),
            photos: vec![],
        }
    }

    #[test]
    fn test_register_pets_valid() {
        let request = RegisterPetsRequest {
            pets: vec![valid_pet()],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_pets_empty_batch() {
        let request = RegisterPetsRequest { pets: vec![] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_pets_blank_name() {
        let mut pet = valid_pet();
        pet.name = "  ".to_string();
        let request = RegisterPetsRequest { pets: vec![pet] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_pets_negative_age() {
        let mut pet = valid_pet();
        pet.age = -1;
        let request = RegisterPetsRequest { pets: vec![pet] };

        let errors = request.validate().unwrap_err();
        assert!(errors.to_string().contains("age"));
    }

    #[test]
    fn test_register_pets_zero_weight() {
        let mut pet = valid_pet();
        pet.weight_kg = 0.0;
        let request = RegisterPetsRequest { pets: vec![pet] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_pet_input_wire_names() {
        let json = serde_json::to_value(valid_pet()).unwrap();
        assert!(json.get("weightKg").is_some());
        assert!(json.get("sizeCm").is_some());
        assert!(json.get("weight_kg").is_none());
    }

    #[test]
    fn test_pet_input_photos_default() {
        let parsed: PetInput = serde_json::from_str(
            r#"{"name":"Rex","specie":"dog","age":3,"weightKg":12.5}"#,
        )
        .unwrap();
        assert!(parsed.photos.is_empty());
        assert!(parsed.breed.is_none());
    }
}
