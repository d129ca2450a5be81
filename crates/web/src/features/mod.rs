pub mod health;
pub mod profile;
pub mod races;
pub mod registrations;
pub mod results;
pub mod runners;
