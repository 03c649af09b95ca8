//! jeevanamrit-storage
//!
//! Profile persistence. S3 operations are a thin wrapper around the AWS S3
//! SDK; `profiles` puts the account-facing store contract on top.

pub mod client;
pub mod error;
pub mod objects;
pub mod profiles;
