use crate::domain::validators::{validate_id, validate_nonempty};
use crate::domain::{Movie, Rental};

use super::{matches_term, Catalog, CatalogError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieField {
    Id,
    Title,
    Description,
    Genre,
}

impl Catalog {
    pub fn add_movie(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
        genre: &str,
    ) -> Result<(), CatalogError> {
        if self.movies.find_by_id(id)?.is_some() {
            return Err(CatalogError::rejected("The movie already exists."));
        }
        self.movies.add(Movie::new(id, title, description, genre))?;
        Ok(())
    }

    /// Removes the movie together with every rental of it
    pub fn remove_movie(&mut self, id: &str) -> Result<(Movie, Vec<Rental>), CatalogError> {
        let removed_movie = self.movies.remove_by_id(id)?;
        let removed_rentals = self.rentals.remove_where(|r| r.movie_id == id)?;
        Ok((removed_movie, removed_rentals))
    }

    /// Returns the movie as it was before the update
    pub fn update_movie(
        &mut self,
        id: &str,
        new_id: &str,
        new_title: &str,
        new_description: &str,
        new_genre: &str,
    ) -> Result<Movie, CatalogError> {
        if self.movies.find_by_id(id)?.is_none() {
            return Err(CatalogError::rejected("The movie does not exist."));
        }
        let updated = Movie::new(new_id, new_title, new_description, new_genre);
        Ok(self.movies.update_by_id(id, updated)?)
    }

    pub fn list_movies(&self) -> Result<&[Movie], CatalogError> {
        Ok(self.movies.all()?)
    }

    pub fn search_movies(&self, field: MovieField, term: &str) -> Result<Vec<&Movie>, CatalogError> {
        if field == MovieField::Id {
            validate_id(term)?;
        }
        validate_nonempty(term, "search term")?;

        Ok(self
            .list_movies()?
            .iter()
            .filter(|m| {
                let value = match field {
                    MovieField::Id => &m.id,
                    MovieField::Title => &m.title,
                    MovieField::Description => &m.description,
                    MovieField::Genre => &m.genre,
                };
                matches_term(value, term)
            })
            .collect())
    }
}
