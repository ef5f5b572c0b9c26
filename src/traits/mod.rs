//! Trait abstractions for the session layer's collaborators.
//!
//! Each external collaborator sits behind a trait so the coordination logic
//! can run against production adapters or test doubles.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport
//! - [`TokenStore`] - Access/refresh token persistence
//! - [`SessionNavigator`] - Moving the user to the login boundary

pub mod http;
pub mod navigator;
pub mod token_store;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use navigator::SessionNavigator;
pub use token_store::{TokenStore, TokenStoreError};
