use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::ValuationInput;
use crate::valuation::ValuationResult;

pub const STORE_VERSION: u32 = 1;

/// A saved valuation together with the input that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredValuation {
    pub result: ValuationResult,
    pub input: ValuationInput,
}

/// All saved valuations, across owners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationStore {
    pub version: u32,
    #[serde(default)]
    pub valuations: Vec<StoredValuation>,
}

impl Default for ValuationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuationStore {
    /// Create a new empty store with the current version
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            valuations: Vec::new(),
        }
    }

    /// Record a result and the input it was computed from.
    /// A result with an id already present replaces the earlier entry.
    pub fn save(&mut self, result: ValuationResult, input: ValuationInput) {
        self.valuations.retain(|v| v.result.id != result.id);
        self.valuations.push(StoredValuation { result, input });
    }

    /// Results owned by `owner_id`, most recent first
    pub fn list_by_owner(&self, owner_id: &str) -> Vec<&ValuationResult> {
        let mut results: Vec<_> = self
            .valuations
            .iter()
            .filter(|v| v.result.user_id == owner_id)
            .map(|v| &v.result)
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        results
    }

    /// Look up a result; results owned by someone else are not found.
    pub fn get_by_id(&self, id: Uuid, owner_id: &str) -> Option<&StoredValuation> {
        self.valuations
            .iter()
            .find(|v| v.result.id == id && v.result.user_id == owner_id)
    }

    /// Resolve a full id or a unique id prefix (as shown by `list`) for an owner.
    pub fn resolve_id(&self, id_or_prefix: &str, owner_id: &str) -> Option<Uuid> {
        if let Ok(id) = Uuid::parse_str(id_or_prefix) {
            return Some(id);
        }

        let prefix = id_or_prefix.to_ascii_lowercase();
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .valuations
            .iter()
            .filter(|v| v.result.user_id == owner_id)
            .filter(|v| v.result.id.simple().to_string().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.result.id),
            _ => None,
        }
    }

    /// Remove a result owned by `owner_id`.
    /// Returns true if it was present, false otherwise.
    pub fn delete(&mut self, id: Uuid, owner_id: &str) -> bool {
        let before = self.valuations.len();
        self.valuations
            .retain(|v| !(v.result.id == id && v.result.user_id == owner_id));
        self.valuations.len() != before
    }
}
