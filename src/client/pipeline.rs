//! Attaching credentials to outgoing requests.

use super::request::RequestDescriptor;
use crate::auth::TokenPair;

/// Header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";

/// Set `Authorization: Bearer <access>` from the stored pair.
///
/// With no pair, or an empty access token, the request goes out without the
/// header and the server decides. Any existing authorization header is
/// replaced either way.
pub fn attach_token(request: &mut RequestDescriptor, tokens: Option<&TokenPair>) {
    set_bearer(request, tokens.and_then(TokenPair::access));
}

/// Set or remove the bearer token directly.
pub fn set_bearer(request: &mut RequestDescriptor, access_token: Option<&str>) {
    request
        .headers
        .retain(|name, _| !name.eq_ignore_ascii_case(AUTHORIZATION));

    if let Some(token) = access_token.filter(|t| !t.trim().is_empty()) {
        request
            .headers
            .insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
    }
}
