//! Wire types for the dashboard API

use serde::{Deserialize, Serialize};

/// Minimum length of the username and the password on the login form
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_mins: Option<u32>,
}

impl LoginRequest {
    /// Check the credentials the same way the login form does
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().chars().count() < MIN_CREDENTIAL_LEN {
            return Err(format!(
                "Username must be at least {MIN_CREDENTIAL_LEN} characters"
            ));
        }
        if self.password.chars().count() < MIN_CREDENTIAL_LEN {
            return Err(format!(
                "Password must be at least {MIN_CREDENTIAL_LEN} characters"
            ));
        }
        Ok(())
    }
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_mins: Option<u32>,
}

/// Tokens issued by the login and refresh endpoints
///
/// The login endpoint also returns the operator's profile fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A catalogue product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
}

/// One page of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// One page of users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_uses_camel_case() {
        let request = LoginRequest {
            username: "emilys".into(),
            password: "emilyspass".into(),
            expires_in_mins: Some(1),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"username": "emilys", "password": "emilyspass", "expiresInMins": 1})
        );
    }

    #[test]
    fn test_login_request_validation() {
        let mut request = LoginRequest {
            username: "em".into(),
            password: "emilyspass".into(),
            expires_in_mins: None,
        };
        assert!(request.validate().unwrap_err().contains("Username"));

        request.username = "emilys".into();
        request.password = "pw".into();
        assert!(request.validate().unwrap_err().contains("Password"));

        request.password = "emilyspass".into();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_auth_tokens_from_login_response() {
        let tokens: AuthTokens = serde_json::from_value(json!({
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128",
            "accessToken": "access",
            "refreshToken": "refresh"
        }))
        .unwrap();

        assert_eq!(tokens.access_token, "access");
        assert_eq!(tokens.refresh_token, "refresh");
        assert_eq!(tokens.first_name.as_deref(), Some("Emily"));
    }

    #[test]
    fn test_user_display_name() {
        let user: User = serde_json::from_value(json!({
            "id": 7, "firstName": "", "lastName": "", "username": "ghost"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "ghost");

        let user: User = serde_json::from_value(json!({
            "id": 1, "firstName": "Emily", "lastName": "Johnson", "username": "emilys"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "Emily Johnson");
    }
}
