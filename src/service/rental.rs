use tracing::debug;

use crate::domain::{date, Entity, Rental};

use super::{Catalog, CatalogError};

impl Catalog {
    /// Register a rental after checking it against the existing movies and clients
    pub fn add_rental(&mut self, rental: Rental) -> Result<(), CatalogError> {
        if self.movies.is_empty() {
            return Err(CatalogError::rejected(
                "Can not rent a movie because the list of movies is empty.",
            ));
        }
        if self.clients.is_empty() {
            return Err(CatalogError::rejected(
                "No clients can rent a movie. The list of clients is empty.",
            ));
        }
        if self.movies.find_by_id(&rental.movie_id)?.is_none() {
            return Err(CatalogError::rejected(
                "The movie can not be rented because it does not exist.",
            ));
        }
        if self.clients.find_by_id(&rental.client_id)?.is_none() {
            return Err(CatalogError::rejected(
                "The client can not rent a movie because the client does not exist.",
            ));
        }

        rental.validate()?;

        if self.rentals.find_by_id(&rental.id)?.is_some() {
            return Err(CatalogError::rejected(
                "Can not add rental because the rental id already exists!",
            ));
        }

        self.rentals.add(rental)?;
        Ok(())
    }

    /// Counterpart of `add_rental`; returns the removed rental
    pub fn remove_rental(&mut self, id: &str) -> Result<Rental, CatalogError> {
        Ok(self.rentals.remove_by_id(id)?)
    }

    /// Mark the rental as returned today
    pub fn return_movie(&mut self, id: &str) -> Result<(), CatalogError> {
        if self.rentals.is_empty() {
            return Err(CatalogError::rejected(
                "Can not return movie - the list of rentals is empty.",
            ));
        }

        let mut rental = match self.rentals.find_by_id(id)? {
            Some(rental) => rental.clone(),
            None => return Err(CatalogError::rejected("The rental id does not exist.")),
        };
        if rental.is_returned() {
            return Err(CatalogError::rejected("The movie was already returned!"));
        }

        rental.returned = Some(date::today());
        self.rentals.update_by_id(id, rental)?;
        Ok(())
    }

    /// Clear the returned date, putting the movie back out on rent
    pub fn un_return_movie(&mut self, id: &str) -> Result<(), CatalogError> {
        let mut rental = match self.rentals.find_by_id(id)? {
            Some(rental) => rental.clone(),
            None => return Err(CatalogError::rejected("The rental id does not exist.")),
        };

        rental.returned = None;
        self.rentals.update_by_id(id, rental)?;
        debug!(rental = id, "rental marked as not returned");
        Ok(())
    }

    pub fn list_rentals(&self) -> Result<&[Rental], CatalogError> {
        Ok(self.rentals.all()?)
    }
}
