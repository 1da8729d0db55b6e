//! Request signing hook.

use crate::{EsRequest, SignError};

/// Adds authentication to a built request before it is sent.
///
/// Implementations may add or overwrite headers. Method, URL and body are
/// not reachable through [`EsRequest`]'s mutable API, so a signer cannot
/// change what is sent, only how it is authenticated.
pub trait RequestSigner: Send + Sync {
    /// Sign the request in place.
    fn sign(&self, request: &mut EsRequest) -> Result<(), SignError>;
}
