//! AWS Signature Version 4 signing for esearch.
//!
//! Managed search domains on AWS reject unsigned requests. [`SigV4Signer`]
//! implements [`esearch_http::RequestSigner`] and adds `X-Amz-Date`, an
//! optional `X-Amz-Security-Token`, and the `Authorization` header computed
//! over the request's method, path, query, headers and body.
//!
//! # Example
//!
//! ```rust
//! use esearch_aws::{AwsCredentials, SigV4Signer, SigningConfig};
//! use esearch_http::{EsRequest, RequestSigner};
//!
//! let credentials = AwsCredentials::new("AKIDEXAMPLE", "secret");
//! let signer = SigV4Signer::new(credentials, SigningConfig::new("us-east-1"));
//!
//! let mut request = EsRequest::post("https://search-logs.us-east-1.es.amazonaws.com/logs/_refresh")
//!     .unwrap();
//! signer.sign(&mut request).unwrap();
//!
//! assert!(request.headers().contains_key("authorization"));
//! ```

#![warn(missing_docs)]

mod config;
mod sigv4;

pub use config::{region_from_host, AwsCredentials, SigningConfig, DEFAULT_REGION, ES_SERVICE};
pub use sigv4::{SigV4Signer, ALGORITHM};
