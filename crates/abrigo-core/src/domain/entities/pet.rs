//! Pet entity.

use crate::{PetId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pet available for adoption at the shelter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    /// Unique identifier for the pet.
    pub id: PetId,

    /// The user who registered the pet.
    pub owner_id: UserId,

    /// Pet's name.
    pub name: String,

    /// Species, e.g. "dog" or "cat".
    pub specie: String,

    /// Breed, if known.
    pub breed: Option<String>,

    /// Age in years.
    pub age: u8,

    /// Weight in kilograms.
    pub weight_kg: f64,

    /// Height at the withers in centimeters.
    pub size_cm: Option<f64>,

    /// Photo URLs.
    pub photos: Vec<String>,

    /// Whether the pet has been adopted.
    pub adopted: bool,

    /// Registration timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Creates a new pet registered by the given owner.
    #[must_use]
    pub fn new(owner_id: UserId, name: String, specie: String, age: u8, weight_kg: f64) -> Self {
        let now = Utc::now();
        Self {
            id: PetId::new(),
            owner_id,
            name,
            specie,
            breed: None,
            age,
            weight_kg,
            size_cm: None,
            photos: Vec::new(),
            adopted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the pet as adopted.
    pub fn mark_adopted(&mut self) {
        self.adopted = true;
        self.updated_at = Utc::now();
    }

    /// Returns true if the pet is still waiting for adoption.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.adopted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_pet(name: &str) -> Pet {
        Pet::new(UserId::new(), name.to_string(), "dog".to_string(), 3, 12.5)
    }

    #[test]
    fn test_pet_creation() {
        let pet = create_pet("Rex");
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.specie, "dog");
        assert!(!pet.adopted);
        assert!(pet.is_available());
        assert!(pet.photos.is_empty());
    }

    #[test]
    fn test_pet_mark_adopted() {
        let mut pet = create_pet("Rex");
        pet.mark_adopted();
        assert!(pet.adopted);
        assert!(!pet.is_available());
        assert!(pet.updated_at >= pet.created_at);
    }

    #[test]
    fn test_pet_id_is_unique() {
        let pet1 = create_pet("Rex");
        let pet2 = create_pet("Mia");
        assert_ne!(pet1.id, pet2.id);
    }
}
