pub mod errors;
pub mod platform;
pub mod profile;
pub mod user;
