//! Session context and error presentation

mod context;
pub mod error_messages;

pub use context::{AuthContext, AuthProvider, use_auth, use_is_authenticated};
