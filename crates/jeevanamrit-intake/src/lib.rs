//! jeevanamrit-intake
//!
//! The intake questionnaire wizard: four linear steps that collect
//! demographics, health disclosures, and the constitution assessment, then
//! write the completed profile through a `ProfileStore`.
//!
//! [`wizard::IntakeWizard`] holds all state and performs every transition
//! synchronously. [`session::IntakeSession`] shares one wizard between
//! callers and runs the asynchronous submit with a single in-flight guard.

pub mod error;
pub mod session;
pub mod step;
pub mod validation;
pub mod wizard;
