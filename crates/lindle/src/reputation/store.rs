use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{ContractOutcome, Entity};

/// Whole-collection persistence for the reputation ledger.
///
/// Loads never fail: a missing or unreadable collection is reported as empty.
/// Saves replace the entire collection, so callers load, mutate and save the
/// full list. Nothing serialises concurrent writers; the last save wins.
pub trait ReputationStore: Send + Sync {
    fn load_entities(&self) -> Vec<Entity>;
    fn save_entities(&self, entities: &[Entity]) -> Result<(), StoreError>;
    fn load_contracts(&self) -> Vec<ContractOutcome>;
    fn save_contracts(&self, contracts: &[ContractOutcome]) -> Result<(), StoreError>;
}

/// Error enumeration for store write failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

const ENTITIES_FILE: &str = "entities.json";
const CONTRACTS_FILE: &str = "contracts.json";

/// Store backed by two pretty-printed JSON arrays in a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entities_path(&self) -> PathBuf {
        self.root.join(ENTITIES_FILE)
    }

    pub fn contracts_path(&self) -> PathBuf {
        self.root.join(CONTRACTS_FILE)
    }

    fn load_collection<T: DeserializeOwned>(&self, path: &Path) -> Vec<T> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "collection not found, starting empty");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "collection unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "collection corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn save_collection<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let payload = serde_json::to_string_pretty(records)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, payload).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), records = records.len(), "collection saved");
        Ok(())
    }
}

impl ReputationStore for JsonFileStore {
    fn load_entities(&self) -> Vec<Entity> {
        self.load_collection(&self.entities_path())
    }

    fn save_entities(&self, entities: &[Entity]) -> Result<(), StoreError> {
        self.save_collection(&self.entities_path(), entities)
    }

    fn load_contracts(&self) -> Vec<ContractOutcome> {
        self.load_collection(&self.contracts_path())
    }

    fn save_contracts(&self, contracts: &[ContractOutcome]) -> Result<(), StoreError> {
        self.save_collection(&self.contracts_path(), contracts)
    }
}
