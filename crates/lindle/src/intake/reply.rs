use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const MAX_LIST_ITEMS: usize = 5;
const FALLBACK_SUMMARY_CHARS: usize = 1_000;

/// Structured result of analysing one contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAnalysis {
    pub summary: String,
    pub red_flags: Vec<String>,
    pub pushbacks: Vec<String>,
    #[serde(default)]
    pub tokens_used: Option<u32>,
    #[serde(default)]
    pub counterparty: Option<String>,
    #[serde(default)]
    pub counterparty_type: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

/// Parse a model reply that is expected to contain a JSON object.
///
/// The outermost `{...}` span is parsed when present, otherwise the whole
/// reply. Lists are capped at five entries. A reply that does not parse into
/// an object becomes a summary-only analysis holding the first thousand
/// characters of the raw text.
pub fn parse_analysis_reply(content: &str) -> ContractAnalysis {
    let candidate = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(fields)) => from_fields(&fields),
        _ => ContractAnalysis {
            summary: content.chars().take(FALLBACK_SUMMARY_CHARS).collect(),
            ..ContractAnalysis::default()
        },
    }
}

fn from_fields(fields: &Map<String, Value>) -> ContractAnalysis {
    ContractAnalysis {
        summary: text_field(fields, "summary").unwrap_or_default(),
        red_flags: list_field(fields, "red_flags"),
        pushbacks: list_field(fields, "pushbacks"),
        tokens_used: None,
        counterparty: text_field(fields, "counterparty"),
        counterparty_type: text_field(fields, "counterparty_type"),
        industry: text_field(fields, "industry"),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    let Some(Value::Array(items)) = fields.get(key) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.trim().to_string(),
            other => other.to_string(),
        })
        .take(MAX_LIST_ITEMS)
        .collect()
}
