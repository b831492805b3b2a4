use tracing::{debug, error, info, warn};

use crate::domain::{Client, Movie, Rental};
use crate::repository::{RepositoryError, StorageError};
use crate::service::{Catalog, CatalogError};

use super::command::Command;
use super::store::{HistoryEntry, HistoryStore};
use super::HistoryError;

/// Outcome of replaying one history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Replay {
    pub applied: usize,
    /// Commands the catalog rejected; replay carries on past them
    pub suppressed: usize,
}

/// Records an entry for every catalog mutation and replays entries on
/// undo/redo. Each `*_handler` must be called right after the matching
/// catalog call succeeded.
#[derive(Debug, Default)]
pub struct UndoRedo {
    store: HistoryStore,
}

impl UndoRedo {
    pub fn new() -> Self {
        Self {
            store: HistoryStore::new(),
        }
    }

    #[allow(dead_code)]
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Push a new entry; any undone future is discarded
    fn record(&mut self, operations: Vec<Command>, converses: Vec<Command>) {
        self.store.clear_redo();
        debug!(
            action = converses.first().map(Command::name).unwrap_or_default(),
            operations = operations.len(),
            "history entry recorded"
        );
        self.store.push_undo(HistoryEntry::new(operations, converses));
    }

    /// Restore commands for rentals removed alongside a client or movie
    fn restore_rentals(rentals: &[Rental]) -> impl Iterator<Item = Command> + '_ {
        rentals.iter().cloned().map(Command::AddRental)
    }

    pub fn add_client_handler(&mut self, id: &str, name: &str) {
        self.record(
            vec![Command::RemoveClient { id: id.to_string() }],
            vec![Command::AddClient(Client::new(id, name))],
        );
    }

    /// The client is restored before its rentals so each rental finds it
    pub fn remove_client_handler(&mut self, removed_client: &Client, removed_rentals: &[Rental]) {
        let mut operations = vec![Command::AddClient(removed_client.clone())];
        operations.extend(Self::restore_rentals(removed_rentals));

        self.record(
            operations,
            vec![Command::RemoveClient { id: removed_client.id.clone() }],
        );
    }

    pub fn update_client_handler(&mut self, old: &Client, new_id: &str, new_name: &str) {
        self.record(
            vec![Command::UpdateClient {
                id: new_id.to_string(),
                new_id: old.id.clone(),
                new_name: old.name.clone(),
            }],
            vec![Command::UpdateClient {
                id: old.id.clone(),
                new_id: new_id.to_string(),
                new_name: new_name.to_string(),
            }],
        );
    }

    pub fn add_movie_handler(&mut self, id: &str, title: &str, description: &str, genre: &str) {
        self.record(
            vec![Command::RemoveMovie { id: id.to_string() }],
            vec![Command::AddMovie(Movie::new(id, title, description, genre))],
        );
    }

    /// The movie is restored before its rentals so each rental finds it
    pub fn remove_movie_handler(&mut self, removed_movie: &Movie, removed_rentals: &[Rental]) {
        let mut operations = vec![Command::AddMovie(removed_movie.clone())];
        operations.extend(Self::restore_rentals(removed_rentals));

        self.record(
            operations,
            vec![Command::RemoveMovie { id: removed_movie.id.clone() }],
        );
    }

    pub fn update_movie_handler(&mut self, old: &Movie, updated: &Movie) {
        self.record(
            vec![Command::UpdateMovie {
                id: updated.id.clone(),
                updated: old.clone(),
            }],
            vec![Command::UpdateMovie {
                id: old.id.clone(),
                updated: updated.clone(),
            }],
        );
    }

    pub fn add_rental_handler(&mut self, rental: &Rental) {
        self.record(
            vec![Command::RemoveRental { id: rental.id.clone() }],
            vec![Command::AddRental(rental.clone())],
        );
    }

    pub fn return_movie_handler(&mut self, rental_id: &str) {
        self.record(
            vec![Command::UnReturnMovie { id: rental_id.to_string() }],
            vec![Command::ReturnMovie { id: rental_id.to_string() }],
        );
    }

    /// Run every command in order. A rejected command is logged and
    /// skipped so the rest of the group still gets its chance. A failed
    /// save stops the replay.
    fn replay(commands: &[Command], catalog: &mut Catalog) -> Result<Replay, StorageError> {
        let mut replay = Replay::default();
        for command in commands {
            match command.apply(catalog) {
                Ok(()) => replay.applied += 1,
                Err(CatalogError::Repository(RepositoryError::Storage(e))) => {
                    error!(command = command.name(), error = %e, "replayed command could not be saved");
                    return Err(e);
                }
                Err(e) => {
                    warn!(command = command.name(), error = %e, "replayed command rejected");
                    replay.suppressed += 1;
                }
            }
        }
        Ok(replay)
    }

    /// Revert the most recent entry and make it available to `redo`.
    /// On a storage failure the entry stays on the undo stack.
    pub fn undo(&mut self, catalog: &mut Catalog) -> Result<Replay, HistoryError> {
        let entry = self.store.remove_undo().ok_or(HistoryError::NothingToUndo)?;
        let replay = match Self::replay(&entry.operations, catalog) {
            Ok(replay) => replay,
            Err(e) => {
                self.store.push_undo(entry);
                return Err(HistoryError::Storage(e));
            }
        };
        self.store.push_redo(entry.swapped());

        info!(applied = replay.applied, suppressed = replay.suppressed, "undo");
        Ok(replay)
    }

    /// Reapply the most recently undone entry
    pub fn redo(&mut self, catalog: &mut Catalog) -> Result<Replay, HistoryError> {
        let entry = self.store.remove_redo().ok_or(HistoryError::NothingToRedo)?;
        let replay = match Self::replay(&entry.operations, catalog) {
            Ok(replay) => replay,
            Err(e) => {
                self.store.push_redo(entry);
                return Err(HistoryError::Storage(e));
            }
        };
        self.store.push_undo(entry.swapped());

        info!(applied = replay.applied, suppressed = replay.suppressed, "redo");
        Ok(replay)
    }
}
