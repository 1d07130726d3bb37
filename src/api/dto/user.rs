//! DTOs for user account endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{User, UserPatch, UserRegistration, UserType};

/// Digits with an optional leading `+`, E.164 length.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap());

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Email should be valid"), length(max = 255))]
    pub email: String,

    #[validate(custom(function = "not_blank", message = "Password is mandatory"))]
    pub password: String,

    #[validate(
        custom(function = "not_blank", message = "First name is mandatory"),
        length(max = 255)
    )]
    pub first_name: String,

    #[validate(
        custom(function = "not_blank", message = "Last name is mandatory"),
        length(max = 255)
    )]
    pub last_name: String,

    #[validate(regex(path = "*PHONE_REGEX", message = "Invalid phone number"))]
    pub phone_number: Option<String>,

    #[validate(length(max = 255))]
    pub profile_picture_url: Option<String>,

    pub user_type: UserType,
}

impl From<CreateUserRequest> for UserRegistration {
    fn from(req: CreateUserRequest) -> Self {
        UserRegistration {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            profile_picture_url: req.profile_picture_url,
            user_type: req.user_type,
        }
    }
}

/// Request body for `PUT /api/users/{id}`. Omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "Email should be valid"), length(max = 255))]
    pub email: Option<String>,

    #[validate(custom(function = "not_blank", message = "Password cannot be blank"))]
    pub password: Option<String>,

    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub first_name: Option<String>,

    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub last_name: Option<String>,

    #[validate(regex(path = "*PHONE_REGEX", message = "Invalid phone number"))]
    pub phone_number: Option<String>,

    #[validate(length(max = 255))]
    pub profile_picture_url: Option<String>,

    pub user_type: Option<UserType>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            profile_picture_url: req.profile_picture_url,
            user_type: req.user_type,
        }
    }
}

/// A user as returned by the API. The password hash is never included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub profile_picture_url: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            profile_picture_url: user.profile_picture_url,
            user_type: user.user_type,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CreateUserRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_create_request() {
        let req = parse(json!({
            "email": "test@test.com",
            "password": "password123",
            "firstName": "Test",
            "lastName": "User",
            "phoneNumber": "1234567890",
            "userType": "PASSENGER"
        }));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_and_blank_name() {
        let req = parse(json!({
            "email": "not-an-email",
            "password": "password123",
            "firstName": "  ",
            "lastName": "User",
            "userType": "DRIVER"
        }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_invalid_phone_rejected() {
        let req = parse(json!({
            "email": "test@test.com",
            "password": "password123",
            "firstName": "Test",
            "lastName": "User",
            "phoneNumber": "call me",
            "userType": "ADMIN"
        }));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_user_type_fails_to_parse() {
        let result = serde_json::from_value::<CreateUserRequest>(json!({
            "email": "test@test.com",
            "password": "password123",
            "firstName": "Test",
            "lastName": "User",
            "userType": "SUPERUSER"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_update_is_valid_and_empty() {
        let req: UpdateUserRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_ok());

        let patch = UserPatch::from(req);
        assert!(patch.email.is_none());
        assert!(patch.password.is_none());
        assert!(patch.user_type.is_none());
    }

    #[test]
    fn test_response_omits_password_hash() {
        let now = Utc::now();
        let response = UserResponse::from(User {
            id: 1,
            email: "test@test.com".to_string(),
            password_hash: "secret-hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone_number: None,
            profile_picture_url: None,
            user_type: UserType::Passenger,
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["firstName"], "Test");
        assert_eq!(json["userType"], "PASSENGER");
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("secret-hash"));
    }
}
