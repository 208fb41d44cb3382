use super::ReadingSource;
use crate::error::{AirscoreError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Entity states exported from the dashboard, keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    states: HashMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Map(HashMap<String, Value>),
    States(Vec<StateEntry>),
}

#[derive(Deserialize)]
struct StateEntry {
    entity_id: String,
    state: Value,
}

impl StateSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AirscoreError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)
            .map_err(|e| AirscoreError::SnapshotParse(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), entities = snapshot.len(), "loaded state snapshot");
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let states = match serde_json::from_str::<SnapshotFile>(content)? {
            SnapshotFile::Map(states) => states,
            SnapshotFile::States(entries) => entries
                .into_iter()
                .map(|entry| (entry.entity_id, entry.state))
                .collect(),
        };
        Ok(Self { states })
    }

    pub fn insert(&mut self, entity_id: impl Into<String>, state: impl Into<Value>) {
        self.states.insert(entity_id.into(), state.into());
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(String, Value)> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl ReadingSource for StateSnapshot {
    fn reading(&self, entity_id: &str) -> Option<f64> {
        let value = match self.states.get(entity_id)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|value| value.is_finite())
    }
}
