use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use super::date;
use super::entities::{Client, Movie, Rental};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a positive integer without leading zeros")]
    InvalidId(String),
    #[error("the {0} must be a nonempty string")]
    EmptyField(&'static str),
    #[error("'{0}' is not a valid date of the form dd.mm.yyyy")]
    InvalidDate(String),
    #[error("the rented date must not be after the current date")]
    RentedInFuture,
    #[error("the rented date must be before the due date")]
    DueBeforeRented,
    #[error("the returned date must be after the rented date")]
    ReturnedBeforeRented,
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(0|[1-9][0-9]*)$").expect("valid id pattern"))
}

pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id_pattern().is_match(id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_string()))
    }
}

pub fn validate_nonempty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn validate_client(client: &Client) -> Result<(), ValidationError> {
    validate_id(&client.id)?;
    validate_nonempty(&client.name, "client name")
}

pub fn validate_movie(movie: &Movie) -> Result<(), ValidationError> {
    validate_id(&movie.id)?;
    validate_nonempty(&movie.title, "movie title")?;
    validate_nonempty(&movie.description, "movie description")?;
    validate_nonempty(&movie.genre, "movie genre")
}

/// Checks ids and date ordering; `today` bounds the rented date.
pub fn validate_rental_on(rental: &Rental, today: NaiveDate) -> Result<(), ValidationError> {
    validate_id(&rental.id)?;
    validate_id(&rental.movie_id)?;
    validate_id(&rental.client_id)?;

    if rental.rented > today {
        return Err(ValidationError::RentedInFuture);
    }
    if rental.rented > rental.due {
        return Err(ValidationError::DueBeforeRented);
    }
    if let Some(returned) = rental.returned {
        if returned < rental.rented {
            return Err(ValidationError::ReturnedBeforeRented);
        }
    }
    Ok(())
}

pub fn validate_rental(rental: &Rental) -> Result<(), ValidationError> {
    validate_rental_on(rental, date::today())
}
