//! Result type alias for client operations.

use super::client_error::ClientError;

/// Type alias for Results using [`ClientError`].
///
/// # Example
///
/// ```ignore
/// use erpsync::error::ClientResult;
///
/// async fn order_count(client: &AuthenticatedClient) -> ClientResult<usize> {
///     let orders: Vec<serde_json::Value> = client.get_json("/orders").await?;
///     Ok(orders.len())
/// }
/// ```
pub type ClientResult<T> = Result<T, ClientError>;
