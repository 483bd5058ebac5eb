//! # Machine Configuration
//!
//! Describes which cassettes the machine has and how they are loaded at
//! startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CASHBOX_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after startup, so no mutex needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use cashbox_core::{ConfigError, Denomination, STANDARD_DENOMINATIONS};

/// Environment variable overriding the denomination list (`"10,50,100"`).
pub const ENV_DENOMINATIONS: &str = "CASHBOX_DENOMINATIONS";
/// Environment variable overriding the per-cassette capacity.
pub const ENV_CASSETTE_CAPACITY: &str = "CASHBOX_CASSETTE_CAPACITY";
/// Environment variable overriding the notes loaded per cassette at startup.
pub const ENV_INITIAL_COUNT: &str = "CASHBOX_INITIAL_COUNT";
/// Environment variable setting per-denomination capacities (`"5000:50,10:400"`).
pub const ENV_CAPACITY_OVERRIDES: &str = "CASHBOX_CAPACITY_OVERRIDES";

/// Machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    /// Face values of the installed cassettes.
    pub denominations: Vec<u32>,

    /// Capacity of every cassette without an override, in notes.
    pub cassette_capacity: u32,

    /// Face value → capacity for cassettes that differ from `cassette_capacity`.
    #[serde(default)]
    pub capacity_overrides: BTreeMap<u32, u32>,

    /// Notes loaded into every cassette at startup. 0 = start empty.
    pub initial_count: u32,
}

impl Default for MachineConfig {
    /// Seven cassettes of 200 notes, each half full.
    fn default() -> Self {
        MachineConfig {
            denominations: STANDARD_DENOMINATIONS.to_vec(),
            cassette_capacity: 200,
            capacity_overrides: BTreeMap::new(),
            initial_count: 100,
        }
    }
}

impl MachineConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CASHBOX_DENOMINATIONS`: comma-separated face values, e.g. `"10,50,100"`
    /// - `CASHBOX_CASSETTE_CAPACITY`: notes per cassette
    /// - `CASHBOX_INITIAL_COUNT`: notes loaded per cassette at startup
    /// - `CASHBOX_CAPACITY_OVERRIDES`: `face:capacity` pairs, e.g. `"5000:50"`
    ///
    /// Unparsable values are logged and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MachineConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = MachineConfig::default();

        if let Some(raw) = lookup(ENV_DENOMINATIONS) {
            match parse_denominations(&raw) {
                Ok(denominations) => config.denominations = denominations,
                Err(e) => warn!("Ignoring {}: {}", ENV_DENOMINATIONS, e),
            }
        }

        if let Some(raw) = lookup(ENV_CASSETTE_CAPACITY) {
            match raw.trim().parse::<u32>() {
                Ok(capacity) => config.cassette_capacity = capacity,
                Err(_) => warn!("Ignoring {}: '{}' is not a number", ENV_CASSETTE_CAPACITY, raw),
            }
        }

        if let Some(raw) = lookup(ENV_CAPACITY_OVERRIDES) {
            match parse_capacity_overrides(&raw) {
                Ok(overrides) => config.capacity_overrides = overrides,
                Err(e) => warn!("Ignoring {}: {}", ENV_CAPACITY_OVERRIDES, e),
            }
        }

        if let Some(raw) = lookup(ENV_INITIAL_COUNT) {
            match raw.trim().parse::<u32>() {
                Ok(count) => config.initial_count = count,
                Err(_) => warn!("Ignoring {}: '{}' is not a number", ENV_INITIAL_COUNT, raw),
            }
        }

        config
    }

    /// Validated `(denomination, capacity)` pairs for `CashMachine::new`.
    ///
    /// ## Errors
    /// - `ConfigError::Validation` for a zero face value
    /// - `ConfigError::ZeroCapacity` if a cassette ends up with capacity zero
    /// - `ConfigError::InvalidValue` for an override naming an uninstalled
    ///   denomination
    pub fn capacities(&self) -> Result<Vec<(Denomination, u32)>, ConfigError> {
        if let Some(face_value) = self
            .capacity_overrides
            .keys()
            .find(|face_value| !self.denominations.contains(face_value))
        {
            return Err(ConfigError::InvalidValue {
                key: "capacityOverrides".to_string(),
                value: face_value.to_string(),
            });
        }

        self.denominations
            .iter()
            .map(|&face_value| -> Result<(Denomination, u32), ConfigError> {
                let denomination = Denomination::new(face_value)?;
                let capacity = self
                    .capacity_overrides
                    .get(&face_value)
                    .copied()
                    .unwrap_or(self.cassette_capacity);
                if capacity == 0 {
                    return Err(ConfigError::ZeroCapacity(denomination));
                }
                Ok((denomination, capacity))
            })
            .collect()
    }
}

/// Parses `"10, 50,100"` into face values. Empty entries are skipped.
fn parse_denominations(raw: &str) -> Result<Vec<u32>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_DENOMINATIONS.to_string(),
                value: part.to_string(),
            })
        })
        .collect()
}

/// Parses `"5000:50, 10:400"` into face value → capacity pairs.
fn parse_capacity_overrides(raw: &str) -> Result<BTreeMap<u32, u32>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| -> Result<(u32, u32), ConfigError> {
            let invalid = || ConfigError::InvalidValue {
                key: ENV_CAPACITY_OVERRIDES.to_string(),
                value: part.to_string(),
            };
            let (face_value, capacity) = part.split_once(':').ok_or_else(invalid)?;
            Ok((
                face_value.trim().parse::<u32>().map_err(|_| invalid())?,
                capacity.trim().parse::<u32>().map_err(|_| invalid())?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MachineConfig::from_lookup(|_| None);
        assert_eq!(config, MachineConfig::default());
        assert_eq!(config.denominations, vec![10, 50, 100, 500, 1000, 2000, 5000]);
        assert_eq!(config.cassette_capacity, 200);
        assert_eq!(config.initial_count, 100);
    }

    #[test]
    fn test_env_overrides() {
        let config = MachineConfig::from_lookup(lookup_from(&[
            (ENV_DENOMINATIONS, "100, 10,50,"),
            (ENV_CASSETTE_CAPACITY, "5"),
            (ENV_INITIAL_COUNT, "0"),
        ]));
        assert_eq!(config.denominations, vec![100, 10, 50]);
        assert_eq!(config.cassette_capacity, 5);
        assert_eq!(config.initial_count, 0);
    }

    #[test]
    fn test_bad_env_values_keep_defaults() {
        let config = MachineConfig::from_lookup(lookup_from(&[
            (ENV_DENOMINATIONS, "10,fifty"),
            (ENV_CASSETTE_CAPACITY, "-1"),
        ]));
        assert_eq!(config.denominations, MachineConfig::default().denominations);
        assert_eq!(config.cassette_capacity, 200);
    }

    #[test]
    fn test_capacities_validation() {
        let config = MachineConfig {
            denominations: vec![10, 50],
            cassette_capacity: 5,
            initial_count: 0,
            ..MachineConfig::default()
        };
        let capacities = config.capacities().unwrap();
        assert_eq!(capacities.len(), 2);
        assert_eq!(capacities[1], (Denomination::new(50).unwrap(), 5));

        let zero_note = MachineConfig {
            denominations: vec![10, 0],
            ..config.clone()
        };
        assert!(matches!(
            zero_note.capacities(),
            Err(ConfigError::Validation(_))
        ));

        let zero_capacity = MachineConfig {
            cassette_capacity: 0,
            ..config
        };
        assert!(matches!(
            zero_capacity.capacities(),
            Err(ConfigError::ZeroCapacity(_))
        ));
    }

    #[test]
    fn test_capacity_overrides() {
        let config = MachineConfig {
            denominations: vec![10, 50, 5000],
            cassette_capacity: 200,
            capacity_overrides: [(5000, 50), (10, 400)].into_iter().collect(),
            initial_count: 0,
        };
        let capacities: Vec<(u32, u32)> = config
            .capacities()
            .unwrap()
            .into_iter()
            .map(|(d, capacity)| (d.value(), capacity))
            .collect();
        assert_eq!(capacities, vec![(10, 400), (50, 200), (5000, 50)]);

        let uninstalled = MachineConfig {
            capacity_overrides: [(20, 100)].into_iter().collect(),
            ..config.clone()
        };
        assert_eq!(
            uninstalled.capacities(),
            Err(ConfigError::InvalidValue {
                key: "capacityOverrides".to_string(),
                value: "20".to_string(),
            })
        );

        let zeroed = MachineConfig {
            capacity_overrides: [(50, 0)].into_iter().collect(),
            ..config
        };
        assert!(matches!(
            zeroed.capacities(),
            Err(ConfigError::ZeroCapacity(_))
        ));
    }

    #[test]
    fn test_capacity_overrides_from_env() {
        let config = MachineConfig::from_lookup(lookup_from(&[(
            ENV_CAPACITY_OVERRIDES,
            "5000:50, 10 : 400,",
        )]));
        assert_eq!(config.capacity_overrides.get(&5000), Some(&50));
        assert_eq!(config.capacity_overrides.get(&10), Some(&400));

        let bad = MachineConfig::from_lookup(lookup_from(&[(ENV_CAPACITY_OVERRIDES, "5000=50")]));
        assert!(bad.capacity_overrides.is_empty());
    }

    #[test]
    fn test_config_json_is_camel_case() {
        let json = serde_json::to_value(MachineConfig::default()).unwrap();
        assert_eq!(json["cassetteCapacity"], 200);
        assert_eq!(json["initialCount"], 100);

        let parsed: MachineConfig = serde_json::from_str(
            r#"{"denominations":[10],"cassetteCapacity":5,"initialCount":0}"#,
        )
        .unwrap();
        assert!(parsed.capacity_overrides.is_empty());
    }
}
