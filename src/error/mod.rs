//! Error handling for the ERP sync client.
//!
//! - [`AuthError`]: session-layer failures (the unrecoverable auth cases)
//! - [`NetworkError`]: transport failures below the HTTP status level
//! - [`ClientError`]: what callers of the authenticated client receive
//! - [`ErrorCategory`]: coarse classification for retry/messaging decisions
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Auth | Session ended or credentials rejected | No |
//! | Server | 5xx responses | Yes |
//! | Client | 4xx responses, bad JSON | No |
//! | Storage | Token store failures | No |

mod auth;
mod category;
mod client_error;
mod network;
mod result;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use client_error::ClientError;
pub use network::NetworkError;
pub use result::ClientResult;
