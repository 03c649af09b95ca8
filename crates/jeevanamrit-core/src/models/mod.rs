pub mod dosha;
pub mod profile;
