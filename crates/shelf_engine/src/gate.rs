use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shelf_logging::LogSink;

/// Pipeline stages an operator can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    RunWebsiteParser,
    SaveToCsv,
    SaveToJson,
    SaveToYaml,
    SaveToYamlItems,
    SaveToText,
    SaveToSqlite,
    SaveToMongodb,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::RunWebsiteParser,
        Capability::SaveToCsv,
        Capability::SaveToJson,
        Capability::SaveToYaml,
        Capability::SaveToYamlItems,
        Capability::SaveToText,
        Capability::SaveToSqlite,
        Capability::SaveToMongodb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::RunWebsiteParser => "run_website_parser",
            Capability::SaveToCsv => "run_save_to_csv",
            Capability::SaveToJson => "run_save_to_json",
            Capability::SaveToYaml => "run_save_to_yaml",
            Capability::SaveToYamlItems => "run_save_to_yaml_items",
            Capability::SaveToText => "run_save_to_text",
            Capability::SaveToSqlite => "run_save_to_sqlite",
            Capability::SaveToMongodb => "run_save_to_mongodb",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| name.to_string())
    }
}

/// External on/off switch consulted before each gated stage.
pub trait FeatureGate: Send + Sync {
    fn enabled(&self, capability: &str) -> bool;
}

/// A toggle value as written in config: `1`, `true`, or `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToggleValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl ToggleValue {
    pub fn is_on(&self) -> bool {
        match self {
            ToggleValue::Flag(flag) => *flag,
            ToggleValue::Number(n) => *n != 0,
            ToggleValue::Text(text) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("true") || text.parse::<i64>().is_ok_and(|n| n != 0)
            }
        }
    }
}

/// Toggle table: every known capability starts disabled.
pub struct ToggleSet {
    values: BTreeMap<Capability, bool>,
    log: Arc<dyn LogSink>,
}

impl ToggleSet {
    pub fn new(log: Arc<dyn LogSink>) -> Self {
        let values = Capability::ALL.into_iter().map(|c| (c, false)).collect();
        Self { values, log }
    }

    /// Builds a table from config overrides; unknown keys are warned about
    /// and ignored.
    pub fn from_overrides<'a>(
        overrides: impl IntoIterator<Item = (&'a String, &'a ToggleValue)>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        let mut toggles = Self::new(log);
        for (key, value) in overrides {
            match key.parse::<Capability>() {
                Ok(capability) => toggles.set(capability, value.is_on()),
                Err(_) => toggles
                    .log
                    .warn(&format!("Ignoring invalid toggle key: {key}")),
            }
        }
        toggles.log.info(&format!("Toggles configured: {}", toggles.describe()));
        toggles
    }

    pub fn set(&mut self, capability: Capability, on: bool) {
        self.values.insert(capability, on);
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.values.get(&capability).copied().unwrap_or(false)
    }

    /// `name=on|off` pairs in capability order.
    pub fn describe(&self) -> String {
        self.values
            .iter()
            .map(|(c, on)| format!("{c}={}", if *on { "on" } else { "off" }))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FeatureGate for ToggleSet {
    fn enabled(&self, capability: &str) -> bool {
        match capability.parse::<Capability>() {
            Ok(capability) => self.is_enabled(capability),
            Err(name) => {
                self.log
                    .warn(&format!("Unknown capability {name:?} treated as disabled"));
                false
            }
        }
    }
}
