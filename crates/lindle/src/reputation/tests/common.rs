use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::reputation::domain::{
    ContractId, ContractOutcome, Entity, EntityId, EntityKind, NewContract, Outcome,
    RecordContract,
};
use crate::reputation::store::{ReputationStore, StoreError};
use crate::reputation::ReputationService;

pub(crate) fn timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .expect("valid date")
        .and_hms_opt(9, 30, 0)
        .expect("valid time")
}

pub(crate) fn entity(id: &str, name: &str, score: f64) -> Entity {
    Entity {
        id: EntityId(id.to_string()),
        name: name.to_string(),
        kind: EntityKind::Client,
        industry: None,
        contact_info: None,
        reputation_score: score,
        total_contracts: 0,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub(crate) fn contract(
    id: &str,
    entity_id: &str,
    outcome: Outcome,
    red_flags: u32,
) -> ContractOutcome {
    ContractOutcome {
        id: ContractId(id.to_string()),
        entity_id: EntityId(entity_id.to_string()),
        filename: format!("{id}.pdf"),
        outcome,
        summary: "Statement of work for a design retainer".to_string(),
        red_flags_count: red_flags,
        pushbacks_count: 1,
        role: "freelancer".to_string(),
        risk_tolerance: "standard".to_string(),
        created_at: timestamp(),
        updated_at: timestamp(),
        notes: None,
    }
}

pub(crate) fn new_contract(filename: &str, red_flags: u32) -> NewContract {
    NewContract {
        filename: filename.to_string(),
        summary: "Twelve month consulting agreement".to_string(),
        red_flags_count: red_flags,
        pushbacks_count: 2,
        role: "freelancer".to_string(),
        risk_tolerance: "standard".to_string(),
    }
}

pub(crate) fn record_request(counterparty: &str, red_flags: u32) -> RecordContract {
    RecordContract {
        counterparty: counterparty.to_string(),
        counterparty_type: EntityKind::Client,
        industry: Some("Media".to_string()),
        contract: new_contract("retainer.pdf", red_flags),
    }
}

/// In-memory store counting writes so tests can assert on side effects.
#[derive(Default, Clone)]
pub(crate) struct MemoryStore {
    entities: Arc<Mutex<Vec<Entity>>>,
    contracts: Arc<Mutex<Vec<ContractOutcome>>>,
    entity_saves: Arc<AtomicUsize>,
    contract_saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub(crate) fn seeded(entities: Vec<Entity>, contracts: Vec<ContractOutcome>) -> Self {
        let store = Self::default();
        *store.entities.lock().expect("entity mutex poisoned") = entities;
        *store.contracts.lock().expect("contract mutex poisoned") = contracts;
        store
    }

    pub(crate) fn writes(&self) -> usize {
        self.entity_saves.load(Ordering::SeqCst) + self.contract_saves.load(Ordering::SeqCst)
    }

    pub(crate) fn entity(&self, id: &str) -> Option<Entity> {
        self.entities
            .lock()
            .expect("entity mutex poisoned")
            .iter()
            .find(|entity| entity.id.0 == id)
            .cloned()
    }
}

impl ReputationStore for MemoryStore {
    fn load_entities(&self) -> Vec<Entity> {
        self.entities.lock().expect("entity mutex poisoned").clone()
    }

    fn save_entities(&self, entities: &[Entity]) -> Result<(), StoreError> {
        *self.entities.lock().expect("entity mutex poisoned") = entities.to_vec();
        self.entity_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load_contracts(&self) -> Vec<ContractOutcome> {
        self.contracts.lock().expect("contract mutex poisoned").clone()
    }

    fn save_contracts(&self, contracts: &[ContractOutcome]) -> Result<(), StoreError> {
        *self.contracts.lock().expect("contract mutex poisoned") = contracts.to_vec();
        self.contract_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Store that reads nothing and refuses every write.
pub(crate) struct ReadOnlyStore;

impl ReputationStore for ReadOnlyStore {
    fn load_entities(&self) -> Vec<Entity> {
        Vec::new()
    }

    fn save_entities(&self, _entities: &[Entity]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }

    fn load_contracts(&self) -> Vec<ContractOutcome> {
        Vec::new()
    }

    fn save_contracts(&self, _contracts: &[ContractOutcome]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }
}

pub(crate) fn build_service() -> (ReputationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (ReputationService::new(store.clone()), store)
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
