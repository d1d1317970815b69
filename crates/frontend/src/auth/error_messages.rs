//! User-friendly error message mappings

use dashboard_http::ClientError;

/// Shown when the session could not be recovered
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Convert a client error into a message for the operator
///
/// `action` names what was attempted, e.g. "load products".
pub fn user_message(action: &str, error: &ClientError) -> String {
    let detail = match error {
        ClientError::Unauthenticated { .. } => return SESSION_EXPIRED.to_string(),
        ClientError::Validation(message) => return message.clone(),
        ClientError::AuthenticationFailed(_) => {
            "Invalid credentials or the session is no longer valid.".to_string()
        }
        ClientError::Forbidden(_) => {
            "You don't have permission to access this resource.".to_string()
        }
        ClientError::NotFound(_) => "The requested resource was not found.".to_string(),
        ClientError::Request(e) if e.is_timeout() => {
            "The request timed out. Please try again.".to_string()
        }
        ClientError::Request(_) => {
            "Connection error. Please check your internet connection and try again.".to_string()
        }
        ClientError::ServerError { status, .. } if *status >= 500 => {
            "Something went wrong on our end. Please try again later.".to_string()
        }
        ClientError::Storage(_) => "Your browser refused to store the session.".to_string(),
        other => other.to_string(),
    };
    format!("Failed to {action}: {detail}")
}

/// Message for a rejected sign-in attempt
pub fn login_message(error: &ClientError) -> String {
    if error.is_auth_expired() || matches!(error, ClientError::BadRequest(_)) {
        "Invalid username or password.".to_string()
    } else {
        user_message("sign in", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_hides_detail() {
        let error = ClientError::unauthenticated(ClientError::AuthenticationFailed("jwt".into()));
        assert_eq!(user_message("load products", &error), SESSION_EXPIRED);
    }

    #[test]
    fn test_action_prefix() {
        let error = ClientError::NotFound("/products/9".into());
        assert_eq!(
            user_message("load products", &error),
            "Failed to load products: The requested resource was not found."
        );
    }

    #[test]
    fn test_server_errors() {
        let error = ClientError::ServerError {
            status: 503,
            message: "down".into(),
        };
        assert!(user_message("load users", &error).contains("on our end"));

        let error = ClientError::ServerError {
            status: 418,
            message: "teapot".into(),
        };
        assert!(user_message("load users", &error).contains("teapot"));
    }

    #[test]
    fn test_login_messages() {
        assert_eq!(
            login_message(&ClientError::BadRequest("Invalid credentials".into())),
            "Invalid username or password."
        );
        assert_eq!(
            login_message(&ClientError::AuthenticationFailed("Unauthorized".into())),
            "Invalid username or password."
        );
        assert_eq!(
            login_message(&ClientError::Validation("Username is too short".into())),
            "Username is too short"
        );
    }
}
