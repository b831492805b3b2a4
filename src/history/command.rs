use crate::domain::{Client, Movie, Rental};
use crate::service::{Catalog, CatalogError};

/// A catalog call captured with its arguments, replayed by undo/redo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a client
    AddClient(Client),
    /// Delete a client (its rentals go with it)
    RemoveClient { id: String },
    /// Rewrite the client stored under `id`
    UpdateClient {
        id: String,
        new_id: String,
        new_name: String,
    },
    /// Insert a movie
    AddMovie(Movie),
    /// Delete a movie (its rentals go with it)
    RemoveMovie { id: String },
    /// Rewrite the movie stored under `id` with `updated`
    UpdateMovie { id: String, updated: Movie },
    /// Insert a rental, subject to the usual existence checks
    AddRental(Rental),
    RemoveRental { id: String },
    /// Set the returned date to today
    ReturnMovie { id: String },
    /// Clear the returned date
    UnReturnMovie { id: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddClient(_) => "add_client",
            Command::RemoveClient { .. } => "remove_client",
            Command::UpdateClient { .. } => "update_client",
            Command::AddMovie(_) => "add_movie",
            Command::RemoveMovie { .. } => "remove_movie",
            Command::UpdateMovie { .. } => "update_movie",
            Command::AddRental(_) => "add_rental",
            Command::RemoveRental { .. } => "remove_rental",
            Command::ReturnMovie { .. } => "return_movie",
            Command::UnReturnMovie { .. } => "un_return_movie",
        }
    }

    pub fn apply(&self, catalog: &mut Catalog) -> Result<(), CatalogError> {
        match self {
            Command::AddClient(client) => {
                catalog.add_client(&client.id, &client.name)?;
            }
            Command::RemoveClient { id } => {
                catalog.remove_client(id)?;
            }
            Command::UpdateClient { id, new_id, new_name } => {
                catalog.update_client(id, new_id, new_name)?;
            }
            Command::AddMovie(movie) => {
                catalog.add_movie(&movie.id, &movie.title, &movie.description, &movie.genre)?;
            }
            Command::RemoveMovie { id } => {
                catalog.remove_movie(id)?;
            }
            Command::UpdateMovie { id, updated } => {
                catalog.update_movie(
                    id,
                    &updated.id,
                    &updated.title,
                    &updated.description,
                    &updated.genre,
                )?;
            }
            Command::AddRental(rental) => {
                catalog.add_rental(rental.clone())?;
            }
            Command::RemoveRental { id } => {
                catalog.remove_rental(id)?;
            }
            Command::ReturnMovie { id } => {
                catalog.return_movie(id)?;
            }
            Command::UnReturnMovie { id } => {
                catalog.un_return_movie(id)?;
            }
        }
        Ok(())
    }
}
