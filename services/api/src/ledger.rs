use crate::cli::StoreArgs;
use clap::Args;
use lindle::config::AppConfig;
use lindle::error::AppError;
use lindle::reputation::{
    ContractId, EntityId, JsonFileStore, ReputationReport, ReputationService, SearchFilters,
    SearchResult,
};
use lindle::telemetry::{self, LogSink};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Case-insensitive substring of the counterparty name
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Only counterparties with at least one contract in this outcome
    #[arg(long)]
    pub(crate) outcome: Option<String>,
    /// `high` keeps scores up to 50, `low` keeps scores from 75
    #[arg(long)]
    pub(crate) risk_level: Option<String>,
    /// Print raw JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[arg(long)]
    pub(crate) entity_id: String,
    /// Print raw JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

#[derive(Args, Debug)]
pub(crate) struct OutcomeArgs {
    #[arg(long)]
    pub(crate) contract_id: String,
    /// One of: Successful Completion, Early Termination, Dispute, Litigation, Pending
    #[arg(long)]
    pub(crate) outcome: String,
    #[arg(long)]
    pub(crate) notes: Option<String>,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        query,
        outcome,
        risk_level,
        json,
        store,
    } = args;

    let service = open_ledger(store)?;
    let results = service.search(&SearchFilters {
        query,
        outcome,
        risk_level,
    });

    if json {
        print_json(&results)?;
    } else {
        render_search_results(&results);
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let service = open_ledger(args.store)?;
    let report = service.report(&EntityId(args.entity_id))?;

    if args.json {
        print_json(&report)?;
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_outcome(args: OutcomeArgs) -> Result<(), AppError> {
    let OutcomeArgs {
        contract_id,
        outcome,
        notes,
        store,
    } = args;

    let service = open_ledger(store)?;
    let contract = service.set_outcome(&ContractId(contract_id), &outcome, notes)?;
    println!(
        "Contract {} ({}) marked as {}",
        contract.id, contract.filename, contract.outcome
    );

    if let Some(entity) = service
        .entities()
        .into_iter()
        .find(|entity| entity.id == contract.entity_id)
    {
        println!(
            "{} now scores {:.1} across {} contract(s)",
            entity.name, entity.reputation_score, entity.total_contracts
        );
    }
    Ok(())
}

fn open_ledger(store: StoreArgs) -> Result<ReputationService<JsonFileStore>, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(data_dir) = store.data_dir {
        config.storage.data_dir = data_dir;
    }

    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;

    let store = JsonFileStore::new(config.storage.data_dir);
    Ok(ReputationService::new(Arc::new(store)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn render_search_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("No matching counterparties");
        return;
    }

    for result in results {
        println!(
            "- {} [{}] score {:.1} | {} contract(s) | latest: {} | id {}",
            result.entity.name,
            result.entity.kind,
            result.entity.reputation_score,
            result.contract_count,
            result.latest_outcome,
            result.entity.id
        );
    }
}

pub(crate) fn render_report(report: &ReputationReport) {
    let summary = &report.summary;
    println!(
        "{} ({}): {:.1} / 100, {} over {} contract(s)",
        report.entity.name,
        report.entity.kind,
        summary.reputation_score,
        summary.risk_assessment.label(),
        summary.total_contracts
    );

    if !report.contract_history.is_empty() {
        println!("  History:");
        for contract in &report.contract_history {
            let notes = contract
                .notes
                .as_deref()
                .map(|notes| format!(" ({notes})"))
                .unwrap_or_default();
            println!(
                "    - {}: {} | {} red flag(s){}",
                contract.filename, contract.outcome, contract.red_flags_count, notes
            );
        }
    }

    println!("  Recommendations:");
    for line in &report.recommendations {
        println!("    - {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_output_failures_surface_as_errors() {
        let mut pairs = BTreeMap::new();
        pairs.insert((1u8, 2u8), "tuple keys cannot become JSON object keys");

        match print_json(&pairs) {
            Err(AppError::Serialize(_)) => {}
            other => panic!("expected serialization error, got {other:?}"),
        }
    }

    #[test]
    fn json_output_succeeds_for_search_results() {
        print_json(&Vec::<SearchResult>::new()).expect("empty results serialize");
    }
}
