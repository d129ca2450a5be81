pub mod common;
pub mod profile;
pub mod race;
pub mod registration;
pub mod result;
pub mod runner;
