pub mod fileio;

use thiserror::Error;
use tracing::info;

use crate::domain::validators::validate_id;
use crate::domain::{Entity, ValidationError};

pub use fileio::{Storage, StorageError};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("The {kind} id is not valid - {source}")]
    InvalidId { kind: &'static str, source: ValidationError },
    #[error("The {kind}'s attributes are not valid - {source}")]
    Invalid { kind: &'static str, source: ValidationError },
    #[error("The {kind} with id {id} already exists.")]
    Duplicate { kind: &'static str, id: String },
    #[error("The {kind} with id {id} does not exist.")]
    NotFound { kind: &'static str, id: String },
    #[error("The list of {kind}s is empty.")]
    Empty { kind: &'static str },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Ordered collection of one entity type, mirrored to its `Storage`
/// after every mutation.
#[derive(Debug)]
pub struct Repository<T: Entity> {
    entities: Vec<T>,
    storage: Storage,
}

impl<T: Entity> Repository<T> {
    pub fn in_memory() -> Self {
        Self {
            entities: Vec::new(),
            storage: Storage::Memory,
        }
    }

    /// Open a repository, loading and validating whatever the storage holds
    pub fn open(storage: Storage) -> Result<Self, RepositoryError> {
        let records = storage.load()?;
        let mut repo = Self {
            entities: Vec::with_capacity(records.len()),
            storage,
        };

        for record in records {
            let entity = T::from_record(&record).map_err(Self::invalid)?;
            repo.insert(entity)?;
        }

        info!(kind = T::KIND, count = repo.entities.len(), path = ?repo.storage.path(), "repository loaded");
        Ok(repo)
    }

    fn invalid(source: ValidationError) -> RepositoryError {
        RepositoryError::Invalid { kind: T::KIND, source }
    }

    fn not_found(id: &str) -> RepositoryError {
        RepositoryError::NotFound { kind: T::KIND, id: id.to_string() }
    }

    fn check_id(id: &str) -> Result<(), RepositoryError> {
        validate_id(id).map_err(|source| RepositoryError::InvalidId { kind: T::KIND, source })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    /// Validate and append without touching storage
    fn insert(&mut self, entity: T) -> Result<(), RepositoryError> {
        entity.validate().map_err(Self::invalid)?;
        if self.position(entity.id()).is_some() {
            return Err(RepositoryError::Duplicate { kind: T::KIND, id: entity.id().to_string() });
        }
        self.entities.push(entity);
        Ok(())
    }

    fn flush(&self) -> Result<(), RepositoryError> {
        if self.storage == Storage::Memory {
            return Ok(());
        }
        let records: Vec<Vec<String>> = self.entities.iter().map(Entity::to_record).collect();
        self.storage.save(&records)?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<&T>, RepositoryError> {
        Self::check_id(id)?;
        Ok(self.entities.iter().find(|e| e.id() == id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn add(&mut self, entity: T) -> Result<(), RepositoryError> {
        self.insert(entity)?;
        self.flush()
    }

    /// Returns the removed entity
    pub fn remove_by_id(&mut self, id: &str) -> Result<T, RepositoryError> {
        Self::check_id(id)?;
        let idx = self.position(id).ok_or_else(|| Self::not_found(id))?;
        let removed = self.entities.remove(idx);
        self.flush()?;
        Ok(removed)
    }

    /// Remove every entity matching `pred`, returning them in their stored order
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Result<Vec<T>, RepositoryError> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.entities.len());
        for entity in self.entities.drain(..) {
            if pred(&entity) {
                removed.push(entity);
            } else {
                kept.push(entity);
            }
        }
        self.entities = kept;

        if !removed.is_empty() {
            self.flush()?;
        }
        Ok(removed)
    }

    /// Replace the entity stored under `id`, returning the previous value.
    /// The replacement may carry a different id as long as it is free.
    pub fn update_by_id(&mut self, id: &str, updated: T) -> Result<T, RepositoryError> {
        Self::check_id(id)?;
        updated.validate().map_err(Self::invalid)?;

        let idx = self.position(id).ok_or_else(|| Self::not_found(id))?;
        if updated.id() != id && self.contains(updated.id()) {
            return Err(RepositoryError::Duplicate { kind: T::KIND, id: updated.id().to_string() });
        }

        let old = std::mem::replace(&mut self.entities[idx], updated);
        self.flush()?;
        Ok(old)
    }

    /// Every stored entity; an empty repository is reported as an error
    pub fn all(&self) -> Result<&[T], RepositoryError> {
        if self.entities.is_empty() {
            return Err(RepositoryError::Empty { kind: T::KIND });
        }
        Ok(&self.entities)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.iter()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::in_memory()
    }
}
