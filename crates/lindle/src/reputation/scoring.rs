use tracing::debug;

use super::domain::{now, ContractOutcome, Entity, EntityId};
use super::error::ReputationError;
use super::store::ReputationStore;

const MAX_POINTS_PER_CONTRACT: f64 = 10.0;
const RED_FLAG_PENALTY: f64 = 0.5;

/// Bounded linear score over a set of outcomes.
///
/// Each outcome adds its weight and loses half a point per red flag. The total
/// is normalised against ten points per contract, clamped to 0..=100 and
/// rounded to one decimal place with ties going to the even digit.
pub fn score_outcomes<'a, I>(outcomes: I) -> f64
where
    I: IntoIterator<Item = &'a ContractOutcome>,
{
    let mut total = 0.0;
    let mut count = 0usize;

    for contract in outcomes {
        total += contract.outcome.weight();
        total -= f64::from(contract.red_flags_count) * RED_FLAG_PENALTY;
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }

    let max_possible = count as f64 * MAX_POINTS_PER_CONTRACT;
    let normalised = if max_possible > 0.0 {
        ((total / max_possible) * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    round_to_tenth(normalised)
}

/// Score for one entity drawn from a loaded contract collection.
pub fn score_for_entity(entity_id: &EntityId, contracts: &[ContractOutcome]) -> f64 {
    score_outcomes(
        contracts
            .iter()
            .filter(|contract| &contract.entity_id == entity_id),
    )
}

/// Load the contract collection and score `entity_id` against it.
pub fn calculate_reputation_score<S>(store: &S, entity_id: &EntityId) -> f64
where
    S: ReputationStore + ?Sized,
{
    score_for_entity(entity_id, &store.load_contracts())
}

/// Recompute and persist an entity's score and contract count from the store.
///
/// Returns `None` without writing anything when the entity is unknown.
pub fn update_entity_reputation<S>(
    store: &S,
    entity_id: &EntityId,
) -> Result<Option<Entity>, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    let contracts = store.load_contracts();
    rescore_with(store, entity_id, &contracts)
}

/// Same as [`update_entity_reputation`], scoring against an already loaded
/// contract collection.
pub(crate) fn rescore_with<S>(
    store: &S,
    entity_id: &EntityId,
    contracts: &[ContractOutcome],
) -> Result<Option<Entity>, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    let mut entities = store.load_entities();
    let Some(entity) = entities.iter_mut().find(|entity| &entity.id == entity_id) else {
        debug!(%entity_id, "rescore skipped, entity not found");
        return Ok(None);
    };

    entity.reputation_score = score_for_entity(entity_id, contracts);
    entity.total_contracts = contracts
        .iter()
        .filter(|contract| &contract.entity_id == entity_id)
        .count() as u32;
    entity.updated_at = now();
    let rescored = entity.clone();

    store.save_entities(&entities)?;

    debug!(
        %entity_id,
        score = rescored.reputation_score,
        contracts = rescored.total_contracts,
        "entity rescored"
    );
    Ok(Some(rescored))
}

/// Round to one decimal place on the exact binary value, ties to even.
///
/// Scaling by ten first can manufacture a tie (0.15 is stored just below
/// 0.15 but `0.15 * 10.0 == 1.5`), so the decimal formatter, which rounds the
/// exact value, does the rounding instead.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
