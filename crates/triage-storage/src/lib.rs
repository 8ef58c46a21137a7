//! triage-storage
//!
//! DynamoDB conversation records and S3 transcript objects. Thin wrappers
//! around the AWS SDKs, exposed to the pipeline through the `triage-core`
//! store traits.

pub mod client;
pub mod conversations;
pub mod error;
pub mod transcripts;
