use std::sync::Arc;

use super::domain::{ContractId, ContractOutcome, Entity, EntityId, RecordContract};
use super::error::ReputationError;
use super::query::{
    entity_detail, generate_reputation_report, search_entities, EntityDetail, ReputationReport,
    SearchFilters, SearchResult,
};
use super::resolver::find_or_create_entity;
use super::scoring::update_entity_reputation;
use super::store::ReputationStore;
use super::tracker::{record_contract, update_contract_outcome};

/// Facade over the reputation ledger used by the HTTP routes, the CLI and the
/// analysis intake.
pub struct ReputationService<S> {
    store: Arc<S>,
}

impl<S> Clone for ReputationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ReputationService<S>
where
    S: ReputationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the counterparty and record a `Pending` contract against it.
    pub fn resolve_and_record(
        &self,
        request: RecordContract,
    ) -> Result<ContractOutcome, ReputationError> {
        let RecordContract {
            counterparty,
            counterparty_type,
            industry,
            contract,
        } = request;

        let entity =
            find_or_create_entity(self.store.as_ref(), &counterparty, counterparty_type, industry)?;
        record_contract(self.store.as_ref(), &entity, contract)
    }

    /// Change a contract's outcome and rescore its entity.
    pub fn set_outcome(
        &self,
        contract_id: &ContractId,
        outcome: &str,
        notes: Option<String>,
    ) -> Result<ContractOutcome, ReputationError> {
        update_contract_outcome(self.store.as_ref(), contract_id, outcome, notes)
    }

    pub fn search(&self, filters: &SearchFilters) -> Vec<SearchResult> {
        search_entities(self.store.as_ref(), filters)
    }

    pub fn report(&self, entity_id: &EntityId) -> Result<ReputationReport, ReputationError> {
        generate_reputation_report(self.store.as_ref(), entity_id)
    }

    pub fn entity_detail(&self, entity_id: &EntityId) -> Result<EntityDetail, ReputationError> {
        entity_detail(self.store.as_ref(), entity_id)
    }

    pub fn entities(&self) -> Vec<Entity> {
        self.store.load_entities()
    }

    /// Recompute an entity's score; `None` when the entity is unknown.
    pub fn rescore(&self, entity_id: &EntityId) -> Result<Option<Entity>, ReputationError> {
        update_entity_reputation(self.store.as_ref(), entity_id)
    }
}
