//! Session management for the ERP sync client.
//!
//! This module provides:
//! - Token pair storage on disk
//! - The auth API client (refresh and sign-in endpoints)
//! - Single-flight refresh coordination
//! - Session termination

pub mod coordinator;
pub mod credentials;
pub mod refresh_api;
pub mod terminator;

pub use coordinator::{RefreshCoordinator, RefreshState};
pub use credentials::{TokenFileManager, TokenPair};
pub use refresh_api::AuthApi;
pub use terminator::SessionTerminator;
