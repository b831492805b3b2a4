pub mod date;
pub mod entities;
pub mod validators;

pub use entities::{Client, Entity, Movie, Rental};
pub use validators::ValidationError;
