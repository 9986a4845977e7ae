//! User-related DTOs.
//!
//! Wire field names follow the public API contract (`userName`, camelCase
//! elsewhere).

use abrigo_core::validation::rules;
use abrigo_core::{Address, GeoPoint, User, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(rename = "userName")]
    #[validate(custom(function = "rules::valid_username", message = "userName must be 5-32 characters"))]
    pub username: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    #[validate(custom(function = "rules::valid_cpf", message = "cpf must match 000.000.000-00"))]
    pub cpf: String,

    #[validate(custom(function = "rules::valid_br_phone", message = "phone must match (00) 00000-0000"))]
    pub phone: String,

    #[validate(nested)]
    pub address: AddressDto,
}

/// Request to update a user's profile. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "rules::valid_username", message = "userName must be 5-32 characters"))]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "rules::valid_br_phone", message = "phone must match (00) 00000-0000"))]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub address: Option<AddressDto>,
}

impl UpdateUserRequest {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

/// Address payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[validate(custom(function = "rules::not_blank", message = "city must not be blank"))]
    pub city: String,

    #[validate(custom(function = "rules::not_blank", message = "state must not be blank"))]
    pub state: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationDto>,
}

/// Geographic coordinates payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Self {
            city: dto.city,
            state: dto.state,
            location: dto
                .location
                .map(|l| GeoPoint::new(l.longitude, l.latitude)),
        }
    }
}

impl From<Address> for AddressDto {
    fn from(address: Address) -> Self {
        Self {
            city: address.city,
            state: address.state,
            location: address.location.map(|p| LocationDto {
                longitude: p.longitude(),
                latitude: p.latitude(),
            }),
        }
    }
}

/// User response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    #[serde(rename = "userName")]
    pub username: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub address: AddressDto,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email.to_string(),
            cpf: user.cpf,
            phone: user.phone,
            address: user.address.into(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// User list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<abrigo_core::Page<User>> for UserListResponse {
    fn from(page: abrigo_core::Page<User>) -> Self {
        let info = page.info;
        Self {
            users: page.content.into_iter().map(UserResponse::from).collect(),
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
    use abrigo_core::Email;
    use validator::Validate;

    fn valid_request() -> RegisterUserRequest {
        RegisterUserRequest {
            username: "bill grey".to_string(),
            email: "bill@email.com".to_string(),
            password: "12345678".to_string(),
            cpf: "529.982.247-25".to_string(),
            phone: "(11) 99999-9999".to_string(),
            address: AddressDto {
                city: "Sao Paulo".to_string(),
                state: "SP".to_string(),
                location: None,
            },
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_register_request_short_username() {
        let mut request = valid_request();
        request.username = "bil".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let mut request = valid_request();
        request.email = "bill.com".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_short_password() {
        let mut request = valid_request();
        request.password = "1234".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_malformed_cpf() {
        let mut request = valid_request();
        request.cpf = "000.000.00".to_string();
        assert!(request.validate().is_err());

        request.cpf = "000.000.000-CP".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_blank_city() {
        let mut request = valid_request();
        request.address.city = "  ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_wire_names() {
        let json = serde_json::to_value(valid_request()).unwrap();
        assert!(json.get("userName").is_some());
        assert!(json.get("username").is_none());
        assert!(json.get("cpf").is_some());
    }

    #[test]
    fn test_update_request_empty() {
        let request = UpdateUserRequest {
            username: None,
            email: None,
            phone: None,
            address: None,
        };
        assert!(request.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_invalid_username() {
        let request = UpdateUserRequest {
            username: Some("bil".to_string()),
            email: None,
            phone: None,
            address: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_response_from_user() {
        let user = User::new(
            "bill grey".to_string(),
            Email::new("bill@email.com").unwrap(),
            "hash".to_string(),
            "529.982.247-25".to_string(),
            "(11) 99999-9999".to_string(),
            Address::new("Sao Paulo", "SP").with_location(-46.633, -23.550),
        );
        let id = user.id.to_string();

        let response = UserResponse::from(user);
        assert_eq!(response.id, id);
        assert_eq!(response.username, "bill grey");
        assert_eq!(response.address.city, "Sao Paulo");
        assert!(response.address.location.is_some());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("userName").is_some());
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
