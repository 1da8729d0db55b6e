// esearch - a typed client for Elasticsearch-compatible search engines
//
// This library re-exports the transport, signing and operation crates
// behind a single dependency.

// Re-export the operation façade
pub use esearch_search::*;

// Re-export member crates
pub use esearch_http as http;

#[cfg(feature = "aws-auth")]
pub use esearch_aws as aws;

// Prelude for common imports
pub mod prelude {
    pub use esearch_search::prelude::*;

    #[cfg(feature = "blocking")]
    pub use esearch_search::blocking::EsClient as BlockingEsClient;

    #[cfg(feature = "aws-auth")]
    pub use esearch_aws::{AwsCredentials, SigV4Signer, SigningConfig};
}
