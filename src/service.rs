pub mod client;
pub mod movie;
pub mod rental;
pub mod statistics;

use thiserror::Error;

use crate::domain::{Client, Movie, Rental, ValidationError};
use crate::repository::{Repository, RepositoryError};

pub use client::ClientField;
pub use movie::MovieField;
pub use statistics::Statistic;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("Invalid input - {0}")]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Rejected(String),
}

impl CatalogError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        CatalogError::Rejected(msg.into())
    }
}

/// The three repositories plus the client, movie and rental operations
/// that keep them consistent with each other.
#[derive(Debug, Default)]
pub struct Catalog {
    clients: Repository<Client>,
    movies: Repository<Movie>,
    rentals: Repository<Rental>,
}

impl Catalog {
    pub fn new(
        clients: Repository<Client>,
        movies: Repository<Movie>,
        rentals: Repository<Rental>,
    ) -> Self {
        Self { clients, movies, rentals }
    }

    #[allow(dead_code)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn clients(&self) -> &Repository<Client> {
        &self.clients
    }

    #[allow(dead_code)]
    pub fn movies(&self) -> &Repository<Movie> {
        &self.movies
    }

    #[allow(dead_code)]
    pub fn rentals(&self) -> &Repository<Rental> {
        &self.rentals
    }
}

/// Case-insensitive substring match shared by the search operations
fn matches_term(value: &str, term: &str) -> bool {
    value.to_lowercase().contains(&term.to_lowercase())
}
