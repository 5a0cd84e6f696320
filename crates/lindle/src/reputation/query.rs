use serde::{Deserialize, Serialize};

use super::domain::{ContractOutcome, Entity, EntityId, Outcome};
use super::error::ReputationError;
use super::scoring::round_to_tenth;
use super::store::ReputationStore;

/// Optional filters accepted by [`search_entities`]. Empty strings are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub entity: Entity,
    pub contract_count: usize,
    pub latest_outcome: String,
}

/// Coarse classification of a reputation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            RiskBand::High
        } else if score < 70.0 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::High => "High Risk",
            RiskBand::Medium => "Medium Risk",
            RiskBand::Low => "Low Risk",
        }
    }

    fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskBand::High => &[
                "Exercise extreme caution - consider additional due diligence",
                "Require stronger contract terms and penalties",
            ],
            RiskBand::Medium => &[
                "Standard due diligence recommended",
                "Consider performance bonds or escrow",
            ],
            RiskBand::Low => &["Preferred partner - standard contract terms acceptable"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_contracts: usize,
    pub reputation_score: f64,
    pub risk_assessment: RiskBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationReport {
    pub entity: Entity,
    pub summary: ReportSummary,
    pub contract_history: Vec<ContractOutcome>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_contracts: usize,
    pub success_rate: f64,
    pub dispute_rate: f64,
    pub termination_rate: f64,
    pub pending_contracts: usize,
    pub avg_red_flags: f64,
}

impl PerformanceMetrics {
    fn from_contracts(contracts: &[ContractOutcome]) -> Self {
        let total = contracts.len();
        if total == 0 {
            return Self {
                total_contracts: 0,
                success_rate: 0.0,
                dispute_rate: 0.0,
                termination_rate: 0.0,
                pending_contracts: 0,
                avg_red_flags: 0.0,
            };
        }

        let count = |predicate: &dyn Fn(&Outcome) -> bool| {
            contracts
                .iter()
                .filter(|contract| predicate(&contract.outcome))
                .count()
        };
        let rate = |matched: usize| round_to_tenth(matched as f64 / total as f64 * 100.0);

        let successful = count(&|outcome: &Outcome| *outcome == Outcome::SuccessfulCompletion);
        let disputed = count(&Outcome::is_contentious);
        let terminated = count(&|outcome: &Outcome| *outcome == Outcome::EarlyTermination);
        let pending = count(&|outcome: &Outcome| *outcome == Outcome::Pending);
        let red_flags: u64 = contracts
            .iter()
            .map(|contract| u64::from(contract.red_flags_count))
            .sum();

        Self {
            total_contracts: total,
            success_rate: rate(successful),
            dispute_rate: rate(disputed),
            termination_rate: rate(terminated),
            pending_contracts: pending,
            avg_red_flags: round_to_tenth(red_flags as f64 / total as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDetail {
    pub entity: Entity,
    pub contracts: Vec<ContractOutcome>,
    pub performance_metrics: PerformanceMetrics,
}

/// Filter entities by name substring, observed outcome and risk level.
///
/// `risk_level = "high"` drops scores above 50 and `"low"` drops scores below
/// 75. The two levels are not a partition: scores in (50, 75) match neither.
/// Any other risk level applies no filter.
pub fn search_entities<S>(store: &S, filters: &SearchFilters) -> Vec<SearchResult>
where
    S: ReputationStore + ?Sized,
{
    let entities = store.load_entities();
    let contracts = store.load_contracts();

    let query = non_empty(&filters.query).map(str::to_lowercase);
    let outcome = non_empty(&filters.outcome);
    let risk_level = non_empty(&filters.risk_level);

    entities
        .into_iter()
        .filter_map(|entity| {
            let history = contracts_for(&contracts, &entity.id);

            if let Some(query) = &query {
                if !entity.name.to_lowercase().contains(query.as_str()) {
                    return None;
                }
            }

            if let Some(outcome) = outcome {
                if !history.iter().any(|contract| contract.outcome.label() == outcome) {
                    return None;
                }
            }

            match risk_level {
                Some("high") if entity.reputation_score > 50.0 => return None,
                Some("low") if entity.reputation_score < 75.0 => return None,
                _ => {}
            }

            let latest_outcome = history
                .last()
                .map(|contract| contract.outcome.label().to_string())
                .unwrap_or_else(|| "None".to_string());

            Some(SearchResult {
                contract_count: history.len(),
                latest_outcome,
                entity,
            })
        })
        .collect()
}

/// Build the risk assessment and recommendations for one entity.
pub fn generate_reputation_report<S>(
    store: &S,
    entity_id: &EntityId,
) -> Result<ReputationReport, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    let entity = find_entity(store, entity_id)?;
    let contract_history: Vec<ContractOutcome> =
        contracts_for(&store.load_contracts(), entity_id)
            .into_iter()
            .cloned()
            .collect();

    let band = RiskBand::from_score(entity.reputation_score);
    let mut recommendations: Vec<String> = band
        .recommendations()
        .iter()
        .map(|line| line.to_string())
        .collect();

    let disputes = contract_history
        .iter()
        .filter(|contract| contract.outcome.is_contentious())
        .count();
    if disputes > 0 {
        recommendations.push(format!(
            "Note: {disputes} dispute(s) in history - review dispute resolution clauses"
        ));
    }

    Ok(ReputationReport {
        summary: ReportSummary {
            total_contracts: contract_history.len(),
            reputation_score: entity.reputation_score,
            risk_assessment: band,
        },
        entity,
        contract_history,
        recommendations,
    })
}

/// Entity with its full contract history and aggregate performance figures.
pub fn entity_detail<S>(store: &S, entity_id: &EntityId) -> Result<EntityDetail, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    let entity = find_entity(store, entity_id)?;
    let contracts: Vec<ContractOutcome> = contracts_for(&store.load_contracts(), entity_id)
        .into_iter()
        .cloned()
        .collect();
    let performance_metrics = PerformanceMetrics::from_contracts(&contracts);

    Ok(EntityDetail {
        entity,
        contracts,
        performance_metrics,
    })
}

fn find_entity<S>(store: &S, entity_id: &EntityId) -> Result<Entity, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    store
        .load_entities()
        .into_iter()
        .find(|entity| &entity.id == entity_id)
        .ok_or_else(|| ReputationError::entity_not_found(entity_id.0.clone()))
}

fn contracts_for<'a>(
    contracts: &'a [ContractOutcome],
    entity_id: &EntityId,
) -> Vec<&'a ContractOutcome> {
    contracts
        .iter()
        .filter(|contract| &contract.entity_id == entity_id)
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
