//! Facility configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Layout of one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub index: u32,
    pub small: u32,
    pub medium: u32,
    pub large: u32,
    /// Share of slots built with charging hardware, 0–100.
    pub charging_percent: f64,
}

/// One gate: opaque id plus the floor it sits on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    pub id: String,
    pub floor: u32,
}

/// Facility layout: floors plus the entry and exit gate lists against which
/// gate identifiers are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityConfig {
    #[serde(default)]
    pub floors: Vec<FloorConfig>,
    #[serde(default)]
    pub entry_gates: Vec<GateConfig>,
    #[serde(default)]
    pub exit_gates: Vec<GateConfig>,
}

impl Default for FacilityConfig {
    /// Standard layout: ground floor with 5/5/2 slots and 30% charging,
    /// three upper floors with 10/8/4 and 25%, two entry and two exit gates
    /// at ground level.
    fn default() -> Self {
        let mut floors = vec![FloorConfig {
            index: 0,
            small: 5,
            medium: 5,
            large: 2,
            charging_percent: 30.0,
        }];
        for index in 1..=3 {
            floors.push(FloorConfig {
                index,
                small: 10,
                medium: 8,
                large: 4,
                charging_percent: 25.0,
            });
        }
        Self {
            floors,
            entry_gates: vec![
                GateConfig {
                    id: "ENTRY_01".to_string(),
                    floor: 0,
                },
                GateConfig {
                    id: "ENTRY_02".to_string(),
                    floor: 0,
                },
            ],
            exit_gates: vec![
                GateConfig {
                    id: "EXIT_01".to_string(),
                    floor: 0,
                },
                GateConfig {
                    id: "EXIT_02".to_string(),
                    floor: 0,
                },
            ],
        }
    }
}

impl FacilityConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut floor_indexes = HashSet::new();
        for floor in &self.floors {
            if !floor_indexes.insert(floor.index) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate floor index {}",
                    floor.index
                )));
            }
            if !(0.0..=100.0).contains(&floor.charging_percent) {
                return Err(ConfigError::Invalid(format!(
                    "floor {}: charging_percent {} outside 0–100",
                    floor.index, floor.charging_percent
                )));
            }
        }

        let mut gate_ids = HashSet::new();
        for gate in self.entry_gates.iter().chain(&self.exit_gates) {
            if gate.id.trim().is_empty() {
                return Err(ConfigError::Invalid("empty gate id".to_string()));
            }
            if !gate_ids.insert(gate.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate gate id {}",
                    gate.id
                )));
            }
            if !floor_indexes.contains(&gate.floor) {
                return Err(ConfigError::Invalid(format!(
                    "gate {} references unknown floor {}",
                    gate.id, gate.floor
                )));
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
