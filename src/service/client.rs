use crate::domain::validators::{validate_id, validate_nonempty};
use crate::domain::{Client, Rental};

use super::{matches_term, Catalog, CatalogError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    Id,
    Name,
}

impl Catalog {
    pub fn add_client(&mut self, id: &str, name: &str) -> Result<(), CatalogError> {
        if self.clients.find_by_id(id)?.is_some() {
            return Err(CatalogError::rejected("The client already exists."));
        }
        self.clients.add(Client::new(id, name))?;
        Ok(())
    }

    /// Removes the client together with every rental that references it
    pub fn remove_client(&mut self, id: &str) -> Result<(Client, Vec<Rental>), CatalogError> {
        let removed_client = self.clients.remove_by_id(id)?;
        let removed_rentals = self.rentals.remove_where(|r| r.client_id == id)?;
        Ok((removed_client, removed_rentals))
    }

    /// Returns the client as it was before the update
    pub fn update_client(&mut self, id: &str, new_id: &str, new_name: &str) -> Result<Client, CatalogError> {
        if self.clients.find_by_id(id)?.is_none() {
            return Err(CatalogError::rejected("The client does not exist."));
        }
        Ok(self.clients.update_by_id(id, Client::new(new_id, new_name))?)
    }

    pub fn list_clients(&self) -> Result<&[Client], CatalogError> {
        Ok(self.clients.all()?)
    }

    pub fn search_clients(&self, field: ClientField, term: &str) -> Result<Vec<&Client>, CatalogError> {
        if field == ClientField::Id {
            validate_id(term)?;
        }
        validate_nonempty(term, "search term")?;

        Ok(self
            .list_clients()?
            .iter()
            .filter(|c| match field {
                ClientField::Id => matches_term(&c.id, term),
                ClientField::Name => matches_term(&c.name, term),
            })
            .collect())
    }
}
