use std::fmt;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for tracked counterparties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for recorded contract outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub String);

impl ContractId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relationship the user has with a counterparty.
///
/// Persisted as a lower-case string. Values that are
/// neither `client` nor `vendor` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Client,
    Vendor,
    Other(String),
}

impl EntityKind {
    /// Case-insensitive parse restricted to the two known relationships.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "client" => Some(Self::Client),
            "vendor" => Some(Self::Vendor),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Vendor => "vendor",
            EntityKind::Other(raw) => raw,
        }
    }
}

impl From<String> for EntityKind {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or(Self::Other(value))
    }
}

impl From<EntityKind> for String {
    fn from(value: EntityKind) -> Self {
        match value {
            EntityKind::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Real-world result of a contract engagement.
///
/// Only the five labelled variants may be set through the tracker. Records on
/// disk carrying any other label deserialize into `Unrecognized` and score
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    SuccessfulCompletion,
    EarlyTermination,
    Dispute,
    Litigation,
    Pending,
    Unrecognized(String),
}

impl Outcome {
    pub const ALLOWED_LABELS: [&'static str; 5] = [
        "Successful Completion",
        "Early Termination",
        "Dispute",
        "Litigation",
        "Pending",
    ];

    /// Exact, case-sensitive match against the known labels.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw {
            "Successful Completion" => Some(Self::SuccessfulCompletion),
            "Early Termination" => Some(Self::EarlyTermination),
            "Dispute" => Some(Self::Dispute),
            "Litigation" => Some(Self::Litigation),
            "Pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Outcome::SuccessfulCompletion => "Successful Completion",
            Outcome::EarlyTermination => "Early Termination",
            Outcome::Dispute => "Dispute",
            Outcome::Litigation => "Litigation",
            Outcome::Pending => "Pending",
            Outcome::Unrecognized(raw) => raw,
        }
    }

    /// Points contributed to the raw reputation total.
    pub fn weight(&self) -> f64 {
        match self {
            Outcome::SuccessfulCompletion => 10.0,
            Outcome::Pending => 5.0,
            Outcome::EarlyTermination => -3.0,
            Outcome::Dispute => -7.0,
            Outcome::Litigation => -15.0,
            Outcome::Unrecognized(_) => 0.0,
        }
    }

    pub fn is_contentious(&self) -> bool {
        matches!(self, Outcome::Dispute | Outcome::Litigation)
    }
}

impl From<String> for Outcome {
    fn from(value: String) -> Self {
        Self::from_label(&value).unwrap_or(Self::Unrecognized(value))
    }
}

impl From<Outcome> for String {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A counterparty tracked across contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "entity_type")]
    pub kind: EntityKind,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub reputation_score: f64,
    #[serde(default)]
    pub total_contracts: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind, industry: Option<String>) -> Self {
        let now = now();
        Self {
            id: EntityId::generate(),
            name: name.into(),
            kind,
            industry,
            contact_info: None,
            reputation_score: 0.0,
            total_contracts: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One observed contract with an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractOutcome {
    pub id: ContractId,
    pub entity_id: EntityId,
    #[serde(rename = "contract_filename")]
    pub filename: String,
    pub outcome: Outcome,
    #[serde(rename = "contract_summary")]
    pub summary: String,
    pub red_flags_count: u32,
    pub pushbacks_count: u32,
    pub role: String,
    pub risk_tolerance: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Contract details captured by an analysis, before attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContract {
    pub filename: String,
    pub summary: String,
    #[serde(default)]
    pub red_flags_count: u32,
    #[serde(default)]
    pub pushbacks_count: u32,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_risk_tolerance")]
    pub risk_tolerance: String,
}

/// Inputs needed to attribute an analysed contract to a counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordContract {
    pub counterparty: String,
    pub counterparty_type: EntityKind,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(flatten)]
    pub contract: NewContract,
}

pub fn default_role() -> String {
    "freelancer".to_string()
}

pub fn default_risk_tolerance() -> String {
    "standard".to_string()
}

/// Current UTC wall-clock time, stored without an offset.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels_are_case_sensitive() {
        assert_eq!(
            Outcome::from_label("Successful Completion"),
            Some(Outcome::SuccessfulCompletion)
        );
        assert_eq!(Outcome::from_label("successful completion"), None);
        assert_eq!(Outcome::from_label("Pending "), None);
    }

    #[test]
    fn unknown_outcomes_survive_a_reload() {
        let outcome: Outcome = serde_json::from_str("\"Renegotiated\"").expect("string parses");
        assert_eq!(outcome, Outcome::Unrecognized("Renegotiated".to_string()));
        assert_eq!(outcome.weight(), 0.0);
        assert_eq!(
            serde_json::to_string(&outcome).expect("serializes"),
            "\"Renegotiated\""
        );
    }

    #[test]
    fn entity_kind_parses_loosely_but_keeps_unknown_values() {
        assert_eq!(EntityKind::parse(" Vendor "), Some(EntityKind::Vendor));
        assert_eq!(EntityKind::parse("supplier"), None);

        let kind: EntityKind = serde_json::from_str("\"partner\"").expect("string parses");
        assert_eq!(kind, EntityKind::Other("partner".to_string()));
        assert_eq!(
            serde_json::to_string(&EntityKind::Client).expect("serializes"),
            "\"client\""
        );
    }

    #[test]
    fn entity_reads_microsecond_timestamps_without_offset() {
        let raw = r#"{
            "id": "6f1c",
            "name": "Acme Inc",
            "entity_type": "client",
            "industry": null,
            "contact_info": null,
            "reputation_score": 50.0,
            "total_contracts": 2,
            "created_at": "2025-03-01T10:15:30.123456",
            "updated_at": "2025-03-02T08:00:00.000001"
        }"#;

        let entity: Entity = serde_json::from_str(raw).expect("entity parses");
        assert_eq!(entity.id, EntityId("6f1c".to_string()));
        assert_eq!(entity.kind, EntityKind::Client);
        assert_eq!(entity.total_contracts, 2);

        let value = serde_json::to_value(&entity).expect("entity serializes");
        assert_eq!(value["entity_type"], "client");
        assert_eq!(value["reputation_score"], 50.0);
    }

    #[test]
    fn contract_uses_external_field_names() {
        let now = now();
        let contract = ContractOutcome {
            id: ContractId("c-1".to_string()),
            entity_id: EntityId("e-1".to_string()),
            filename: "msa.pdf".to_string(),
            outcome: Outcome::Pending,
            summary: "Master services agreement".to_string(),
            red_flags_count: 3,
            pushbacks_count: 2,
            role: default_role(),
            risk_tolerance: default_risk_tolerance(),
            created_at: now,
            updated_at: now,
            notes: None,
        };

        let value = serde_json::to_value(&contract).expect("contract serializes");
        assert_eq!(value["contract_filename"], "msa.pdf");
        assert_eq!(value["contract_summary"], "Master services agreement");
        assert_eq!(value["outcome"], "Pending");
        assert_eq!(value["red_flags_count"], 3);
        assert_eq!(value["entity_id"], "e-1");
    }
}
