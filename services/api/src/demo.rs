use crate::infra::{InMemoryReputationStore, ScriptedAnalyzer};
use crate::ledger::{render_report, render_search_results};
use clap::Args;
use lindle::error::AppError;
use lindle::intake::{AnalysisIntake, DocumentUpload, PlainTextExtractor};
use lindle::reputation::{ContractOutcome, ReputationService, SearchFilters};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Leave every contract as Pending instead of replaying outcomes.
    #[arg(long)]
    pub(crate) skip_outcomes: bool,
}

const MSA_TEXT: &str = "Master services agreement between Northwind Freight and the \
    contractor. Invoices are payable net 90. Liability of the contractor is uncapped.";
const RENEWAL_TEXT: &str = "Renewal of the Northwind Freight master services agreement \
    for a further twelve months on the existing rate card.";
const DESIGN_TEXT: &str = "Statement of work issued to Contoso Design Studio for brand \
    refresh deliverables. Either party may terminate on seven days notice.";
const MEMO_TEXT: &str = "Internal memo summarising the procurement policy changes that \
    take effect at the start of the next quarter.";

/// Replies the demo analyzer hands back, in upload order.
fn scripted_replies() -> Vec<&'static str> {
    vec![
        r#"{
            "summary": "Freight MSA with long payment terms.",
            "red_flags": ["Net-90 payment terms", "Uncapped contractor liability"],
            "pushbacks": ["Request net-30", "Cap liability at fees paid"],
            "counterparty": "Northwind Freight",
            "counterparty_type": "client",
            "industry": "Logistics"
        }"#,
        r#"Here is the analysis you asked for:
        {"summary": "Straight renewal on existing terms.", "red_flags": [], "pushbacks": [],
         "counterparty": "NORTHWIND FREIGHT", "counterparty_type": "client", "industry": ""}"#,
        r#"{
            "summary": "Design SOW with a short termination window.",
            "red_flags": ["Seven day termination for convenience"],
            "pushbacks": ["Kill fee for work in progress"],
            "counterparty": "Contoso Design Studio",
            "counterparty_type": "vendor",
            "industry": "Creative Services"
        }"#,
        r#"{"summary": "Policy memo, no counterparty.", "red_flags": [], "pushbacks": []}"#,
    ]
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryReputationStore::default());
    let reputation = ReputationService::new(store);
    let intake = AnalysisIntake::new(
        reputation.clone(),
        Arc::new(PlainTextExtractor),
        Arc::new(ScriptedAnalyzer::new(scripted_replies())),
    );

    println!("Lindle reputation demo");
    println!("\nAnalysing uploads");
    let uploads = [
        ("northwind-msa.txt", MSA_TEXT),
        ("scan.png", MSA_TEXT),
        ("northwind-renewal.txt", RENEWAL_TEXT),
        ("contoso-sow.txt", DESIGN_TEXT),
        ("procurement-memo.txt", MEMO_TEXT),
    ];

    let mut recorded: Vec<ContractOutcome> = Vec::new();
    for (filename, text) in uploads {
        match intake.process(DocumentUpload::new(filename, text)) {
            Ok(outcome) => {
                println!(
                    "- {filename}: {} red flag(s), {} pushback(s)",
                    outcome.analysis.red_flags.len(),
                    outcome.analysis.pushbacks.len()
                );
                match outcome.contract {
                    Some(contract) => {
                        println!(
                            "  attributed to {} as contract {}",
                            outcome.analysis.counterparty.as_deref().unwrap_or("unknown"),
                            contract.id
                        );
                        recorded.push(contract);
                    }
                    None => println!("  no counterparty identified, not tracked"),
                }
            }
            Err(err) => println!("- {filename}: rejected ({err})"),
        }
    }

    if !args.skip_outcomes {
        println!("\nRecording outcomes");
        let outcomes = [
            ("Successful Completion", Some("Paid within terms")),
            ("Dispute", Some("Rate card disagreement")),
            ("Early Termination", None),
        ];
        for (contract, (outcome, notes)) in recorded.iter().zip(outcomes) {
            let updated =
                reputation.set_outcome(&contract.id, outcome, notes.map(str::to_string))?;
            println!("- {} -> {}", updated.filename, updated.outcome);
        }

        if let Some(first) = recorded.first() {
            match reputation.set_outcome(&first.id, "Won", None) {
                Ok(_) => println!("- unexpected: invalid outcome accepted"),
                Err(err) => println!("- rejected update: {err}"),
            }
        }
    }

    println!("\nAll counterparties");
    render_search_results(&reputation.search(&SearchFilters::default()));

    println!("\nHigh risk counterparties");
    render_search_results(&reputation.search(&SearchFilters {
        risk_level: Some("high".to_string()),
        ..SearchFilters::default()
    }));

    println!("\nReports");
    for entity in reputation.entities() {
        let report = reputation.report(&entity.id)?;
        render_report(&report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_end_to_end() {
        run_demo(DemoArgs::default()).expect("demo completes");
    }

    #[test]
    fn demo_runs_without_outcomes() {
        run_demo(DemoArgs {
            skip_outcomes: true,
        })
        .expect("demo completes");
    }

    #[test]
    fn scripted_uploads_are_long_enough_to_analyse() {
        for text in [MSA_TEXT, RENEWAL_TEXT, DESIGN_TEXT, MEMO_TEXT] {
            assert!(text.chars().count() >= lindle::intake::document::MIN_CONTRACT_CHARS);
        }
    }
}
