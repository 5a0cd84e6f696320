//! Counterparty reputation ledger.
//!
//! Entities (clients and vendors) and the contract outcomes observed with them
//! are kept in two flat collections behind [`ReputationStore`]. Every write
//! loads the whole collection, mutates it in memory and saves it back; there is
//! no locking between requests, so concurrent writers can lose updates.

pub mod domain;
pub mod error;
pub mod query;
pub mod resolver;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod tracker;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{
    ContractId, ContractOutcome, Entity, EntityId, EntityKind, NewContract, Outcome,
    RecordContract,
};
pub use error::{RecordKind, ReputationError};
pub use query::{
    EntityDetail, PerformanceMetrics, ReportSummary, ReputationReport, RiskBand, SearchFilters,
    SearchResult,
};
pub use router::{reputation_router, OutcomeUpdate};
pub use service::ReputationService;
pub use store::{JsonFileStore, ReputationStore, StoreError};
