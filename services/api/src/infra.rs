use lindle::intake::{
    parse_analysis_reply, AnalysisRequest, ContractAnalysis, ContractAnalyzer, IntakeError,
};
use lindle::reputation::{ContractOutcome, Entity, ReputationStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Ledger kept in process memory; used by the demo.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReputationStore {
    entities: Arc<Mutex<Vec<Entity>>>,
    contracts: Arc<Mutex<Vec<ContractOutcome>>>,
}

impl ReputationStore for InMemoryReputationStore {
    fn load_entities(&self) -> Vec<Entity> {
        self.entities.lock().expect("entity mutex poisoned").clone()
    }

    fn save_entities(&self, entities: &[Entity]) -> Result<(), StoreError> {
        let mut guard = self.entities.lock().expect("entity mutex poisoned");
        *guard = entities.to_vec();
        Ok(())
    }

    fn load_contracts(&self) -> Vec<ContractOutcome> {
        self.contracts.lock().expect("contract mutex poisoned").clone()
    }

    fn save_contracts(&self, contracts: &[ContractOutcome]) -> Result<(), StoreError> {
        let mut guard = self.contracts.lock().expect("contract mutex poisoned");
        *guard = contracts.to_vec();
        Ok(())
    }
}

/// Analyzer that replays canned model replies in order, one per call.
#[derive(Default)]
pub(crate) struct ScriptedAnalyzer {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedAnalyzer {
    pub(crate) fn new<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }
}

impl ContractAnalyzer for ScriptedAnalyzer {
    fn analyze(&self, request: AnalysisRequest<'_>) -> Result<ContractAnalysis, IntakeError> {
        let reply = self
            .replies
            .lock()
            .map_err(|_| IntakeError::Analyzer("scripted replies unavailable".to_string()))?
            .pop_front()
            .ok_or_else(|| IntakeError::Analyzer("no scripted reply left".to_string()))?;

        let mut analysis = parse_analysis_reply(&reply);
        analysis.tokens_used = Some(request.text.split_whitespace().count() as u32);
        Ok(analysis)
    }
}

/// Stand-in for a model provider that has no credentials; every call is refused.
pub(crate) struct UnconfiguredAnalyzer;

impl ContractAnalyzer for UnconfiguredAnalyzer {
    fn analyze(&self, _request: AnalysisRequest<'_>) -> Result<ContractAnalysis, IntakeError> {
        Err(IntakeError::NotConfigured(
            "no contract analysis provider is configured".to_string(),
        ))
    }
}
