pub mod command;
pub mod controller;
pub mod store;

use thiserror::Error;

use crate::repository::StorageError;

#[allow(unused_imports)]
pub use command::Command;
#[allow(unused_imports)]
pub use controller::Replay;
pub use controller::UndoRedo;
#[allow(unused_imports)]
pub use store::{HistoryEntry, HistoryStore};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("There is nothing to undo!")]
    NothingToUndo,
    #[error("There is nothing to redo!")]
    NothingToRedo,
    #[error("Could not save the replayed changes - {0}")]
    Storage(StorageError),
}

#[cfg(test)]
mod test;
