pub mod health;
pub mod instruments;
pub mod intake;
pub mod profiles;
