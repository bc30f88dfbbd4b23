use crate::error::Result;
use lineage_graph::MeaningOfDirection;
use serde::{Deserialize, Serialize};

const TIMING_ENV: &str = "LINEAGE_HISTORY_TIMING";
const REDUCE_ENV: &str = "LINEAGE_HISTORY_REDUCE";

/// Options for building and querying a [`HistoryGraph`](crate::HistoryGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    /// Physical direction of the stored edges.
    pub direction: MeaningOfDirection,
    /// Drop edges implied by transitivity after loading relations.
    pub reduce_on_load: bool,
    /// Log elapsed time of the heavier graph operations at debug level.
    pub timing: bool,
}

impl HistoryConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies `LINEAGE_HISTORY_TIMING` and `LINEAGE_HISTORY_REDUCE` when they are set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same overlay as [`with_env_overrides`](Self::with_env_overrides), reading variables
    /// through `lookup` instead of the process environment.
    pub fn with_overrides_from<F>(mut self, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(v) = lookup(TIMING_ENV) {
            self.timing = env_flag(&v);
        }
        if let Some(v) = lookup(REDUCE_ENV) {
            self.reduce_on_load = env_flag(&v);
        }
        self
    }
}

fn env_flag(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}
