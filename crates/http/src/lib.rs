//! Dashboard HTTP module providing the authenticated API client
//!
//! This crate holds everything the dashboard needs to talk to its remote API:
//! a durable token store, a request gateway that transparently refreshes
//! expired access tokens, a route guard for protected views, and the small
//! amount of client-side aggregation the statistics view performs.

#[macro_use]
extern crate tracing;

pub mod cache;
pub mod client;
pub mod config;
pub mod guard;
pub mod pagination;
pub mod stats;
pub mod storage;
pub mod tokens;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, ApiRequest, error::ClientError};
pub use config::ClientConfig;
pub use guard::{Access, Route, RouteGuard};
pub use pagination::PageQuery;
pub use stats::DashboardStats;
pub use storage::{MemoryStorage, StorageError, TokenStorage};
pub use tokens::{TokenPair, TokenStore};
