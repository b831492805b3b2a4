use std::fmt;

use chrono::NaiveDate;

use super::date::{format_date, format_returned, parse_date, parse_returned};
use super::validators::{self, ValidationError};

/// Common surface of everything a repository can hold
pub trait Entity: Clone + fmt::Display {
    /// Lowercase noun used in messages ("client", "movie", ...)
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn validate(&self) -> Result<(), ValidationError>;

    /// Flat string fields in file order
    fn to_record(&self) -> Vec<String>;

    fn from_record(record: &[String]) -> Result<Self, ValidationError>;
}

fn expect_fields(record: &[String], expected: usize) -> Result<(), ValidationError> {
    if record.len() != expected {
        return Err(ValidationError::FieldCount { expected, found: record.len() });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub name: String,
}

impl Client {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client id: {};   name: {}", self.id, self.name)
    }
}

impl Entity for Client {
    const KIND: &'static str = "client";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validators::validate_client(self)
    }

    fn to_record(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone()]
    }

    fn from_record(record: &[String]) -> Result<Self, ValidationError> {
        expect_fields(record, 2)?;
        Ok(Self::new(&record[0], &record[1]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: String,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            genre: genre.into(),
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "movie id: {};   title: {};   description: {};   genre: {}",
            self.id, self.title, self.description, self.genre
        )
    }
}

impl Entity for Movie {
    const KIND: &'static str = "movie";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validators::validate_movie(self)
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.description.clone(),
            self.genre.clone(),
        ]
    }

    fn from_record(record: &[String]) -> Result<Self, ValidationError> {
        expect_fields(record, 4)?;
        Ok(Self::new(&record[0], &record[1], &record[2], &record[3]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    pub id: String,
    pub movie_id: String,
    pub client_id: String,
    pub rented: NaiveDate,
    pub due: NaiveDate,
    /// `None` while the movie is still out
    pub returned: Option<NaiveDate>,
}

impl Rental {
    /// Build a rental from console-style strings (`dd.mm.yyyy`, `N.A.`)
    pub fn parse(
        id: &str,
        movie_id: &str,
        client_id: &str,
        rented: &str,
        due: &str,
        returned: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.to_string(),
            movie_id: movie_id.to_string(),
            client_id: client_id.to_string(),
            rented: parse_date(rented)?,
            due: parse_date(due)?,
            returned: parse_returned(returned)?,
        })
    }

    pub fn is_returned(&self) -> bool {
        self.returned.is_some()
    }
}

impl fmt::Display for Rental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rental id: {};   movie id: {};   client id: {};   rented date: {};   due date: {};   returned date: {}",
            self.id,
            self.movie_id,
            self.client_id,
            format_date(self.rented),
            format_date(self.due),
            format_returned(self.returned)
        )
    }
}

impl Entity for Rental {
    const KIND: &'static str = "rental";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validators::validate_rental(self)
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.movie_id.clone(),
            self.client_id.clone(),
            format_date(self.rented),
            format_date(self.due),
            format_returned(self.returned),
        ]
    }

    fn from_record(record: &[String]) -> Result<Self, ValidationError> {
        expect_fields(record, 6)?;
        Self::parse(&record[0], &record[1], &record[2], &record[3], &record[4], &record[5])
    }
}
