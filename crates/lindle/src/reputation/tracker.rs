use tracing::info;

use super::domain::{now, ContractId, ContractOutcome, Entity, NewContract, Outcome};
use super::error::ReputationError;
use super::scoring::{rescore_with, update_entity_reputation};
use super::store::ReputationStore;

/// Append a `Pending` outcome for `entity` and rescore it.
///
/// The contract collection is saved before rescoring so the rescore sees the
/// new record.
pub fn record_contract<S>(
    store: &S,
    entity: &Entity,
    details: NewContract,
) -> Result<ContractOutcome, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    let NewContract {
        filename,
        summary,
        red_flags_count,
        pushbacks_count,
        role,
        risk_tolerance,
    } = details;

    let now = now();
    let contract = ContractOutcome {
        id: ContractId::generate(),
        entity_id: entity.id.clone(),
        filename,
        outcome: Outcome::Pending,
        summary,
        red_flags_count,
        pushbacks_count,
        role,
        risk_tolerance,
        created_at: now,
        updated_at: now,
        notes: None,
    };

    let mut contracts = store.load_contracts();
    contracts.push(contract.clone());
    store.save_contracts(&contracts)?;

    update_entity_reputation(store, &entity.id)?;

    info!(
        contract_id = %contract.id,
        entity_id = %entity.id,
        red_flags = contract.red_flags_count,
        "contract outcome recorded"
    );
    Ok(contract)
}

/// Set the outcome (and optionally notes) of an existing contract.
///
/// The outcome label is validated before anything is read, and an unknown
/// contract id fails before anything is written. The owning entity is rescored
/// from the same in-memory collection that was just saved.
pub fn update_contract_outcome<S>(
    store: &S,
    contract_id: &ContractId,
    outcome: &str,
    notes: Option<String>,
) -> Result<ContractOutcome, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    let outcome = Outcome::from_label(outcome).ok_or_else(|| ReputationError::InvalidArgument {
        given: outcome.to_string(),
    })?;

    let mut contracts = store.load_contracts();
    let contract = contracts
        .iter_mut()
        .find(|contract| &contract.id == contract_id)
        .ok_or_else(|| ReputationError::contract_not_found(contract_id.0.clone()))?;

    contract.outcome = outcome;
    contract.updated_at = now();
    if let Some(notes) = notes.filter(|notes| !notes.is_empty()) {
        contract.notes = Some(notes);
    }
    let updated = contract.clone();

    store.save_contracts(&contracts)?;
    rescore_with(store, &updated.entity_id, &contracts)?;

    info!(
        contract_id = %updated.id,
        entity_id = %updated.entity_id,
        outcome = %updated.outcome,
        "contract outcome updated"
    );
    Ok(updated)
}
