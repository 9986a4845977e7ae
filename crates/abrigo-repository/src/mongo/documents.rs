//! BSON document representations of the domain entities.
//!
//! Timestamps are stored as native BSON datetimes so range queries and
//! sorting work server-side.

use abrigo_core::{Address, Email, Pet, PetId, User, UserId, UserRole};
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored representation of a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub cpf: String,
    pub phone: String,
    pub address: Address,
    pub role: UserRole,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl UserDocument {
    /// Collection name.
    pub const COLLECTION: &'static str = "users";
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.as_str().to_string(),
            password_hash: user.password_hash.clone(),
            cpf: user.cpf.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: UserId::from_object_id(doc.id),
            username: doc.username,
            email: Email::new_unchecked(doc.email),
            password_hash: doc.password_hash,
            cpf: doc.cpf,
            phone: doc.phone,
            address: doc.address,
            role: doc.role,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Stored representation of a [`Pet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub owner_id: ObjectId,
    pub name: String,
    pub specie: String,
    pub breed: Option<String>,
    pub age: u8,
    pub weight_kg: f64,
    pub size_cm: Option<f64>,
    pub photos: Vec<String>,
    pub adopted: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl PetDocument {
    /// Collection name.
    pub const COLLECTION: &'static str = "pets";
}

impl From<&Pet> for PetDocument {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.into_inner(),
            owner_id: pet.owner_id.into_inner(),
            name: pet.name.clone(),
            specie: pet.specie.clone(),
            breed: pet.breed.clone(),
            age: pet.age,
            weight_kg: pet.weight_kg,
            size_cm: pet.size_cm,
            photos: pet.photos.clone(),
            adopted: pet.adopted,
            created_at: pet.created_at,
            updated_at: pet.updated_at,
        }
    }
}

impl From<PetDocument> for Pet {
    fn from(doc: PetDocument) -> Self {
        Self {
            id: PetId::from_object_id(doc.id),
            owner_id: UserId::from_object_id(doc.owner_id),
            name: doc.name,
            specie: doc.specie,
            breed: doc.breed,
            age: doc.age,
            weight_kg: doc.weight_kg,
            size_cm: doc.size_cm,
            photos: doc.photos,
            adopted: doc.adopted,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "bill grey".to_string(),
            Email::new("bill@email.com").unwrap(),
            "hash".to_string(),
            "529.982.247-25".to_string(),
            "(11) 99999-9999".to_string(),
            Address::new("Sao Paulo", "SP").with_location(-46.633, -23.550),
        )
    }

    #[test]
    fn test_user_document_round_trip() {
        let user = sample_user();
        let doc = UserDocument::from(&user);
        let restored = User::from(doc);

        assert_eq!(restored.id, user.id);
        assert_eq!(restored.username, user.username);
        assert_eq!(restored.email, user.email);
        assert_eq!(restored.address.city, "Sao Paulo");
    }

    #[test]
    fn test_user_document_id_serializes_under_underscore_id() {
        let user = sample_user();
        let doc = UserDocument::from(&user);
        let bson = bson::to_document(&doc).unwrap();
        assert!(bson.contains_key("_id"));
        assert!(!bson.contains_key("id"));
    }

    #[test]
    fn test_pet_document_round_trip() {
        let pet = Pet::new(UserId::new(), "Rex".to_string(), "dog".to_string(), 3, 12.5);
        let doc = PetDocument::from(&pet);
        let restored = Pet::from(doc);

        assert_eq!(restored.id, pet.id);
        assert_eq!(restored.owner_id, pet.owner_id);
        assert_eq!(restored.name, "Rex");
        assert!(!restored.adopted);
    }
}
