//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `skirmish-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so a partial file (or no file) is fine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use skirmish_types::{Location, UpgradeTrack};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unusable setup.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// What is wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `skirmish-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Decision engine tuning and doctrine selection.
    #[serde(default)]
    pub decision: DecisionConfig,

    /// Upgrade research priorities and thresholds.
    #[serde(default)]
    pub upgrades: UpgradeConfig,

    /// Reference arena rules used by the engine binary.
    #[serde(default)]
    pub arena: ArenaConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `SKIRMISH_SEED` environment variable overrides
    /// `decision.seed` when it holds a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.decision.apply_env_overrides();
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upgrades.priorities.is_empty() {
            return Err(invalid("upgrades.priorities must list at least one track"));
        }
        if !self.decision.min_team_power.is_finite() || self.decision.min_team_power < 0.0 {
            return Err(invalid("decision.min_team_power must be a non-negative number"));
        }
        if let CombatDoctrine::Wander { base_bias } = self.decision.combat
            && !(0.0..=1.0).contains(&base_bias)
        {
            return Err(invalid("decision.combat.base_bias must lie in [0, 1]"));
        }
        self.arena.validate()
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: String::from(message),
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// How command units spend their turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandDoctrine {
    /// Spawn into the first free adjacent cell while power allows,
    /// otherwise fund the next upgrade.
    #[default]
    SpawnThenResearch,
    /// Spawn only along the heading to the enemy base, otherwise fund the
    /// next upgrade.
    SpawnTowardEnemy,
    /// Never spawn; pour every turn into one track.
    ResearchOnly {
        /// The track to fund.
        track: UpgradeTrack,
    },
}

/// How combat units spend their turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CombatDoctrine {
    /// Close in on nearby enemies when crowded, otherwise lay hazards.
    #[default]
    Skirmish,
    /// March on the enemy base, clearing hazards in the way.
    Assault,
    /// Random walk with a bias toward the enemy base.
    Wander {
        /// Probability of heading for the enemy base instead of a random
        /// direction.
        #[serde(default = "default_base_bias")]
        base_bias: f64,
    },
}

/// Decision engine tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionConfig {
    /// Team power a command unit must exceed before it spawns.
    #[serde(default = "default_min_team_power")]
    pub min_team_power: f64,

    /// Squared radius used to sense enemies.
    #[serde(default = "default_enemy_sense_radius")]
    pub enemy_sense_radius: u32,

    /// Squared radius used to sense friendlies.
    #[serde(default = "default_friendly_sense_radius")]
    pub friendly_sense_radius: u32,

    /// A combat unit moves only when more than this many enemies or
    /// friendlies are nearby.
    #[serde(default = "default_crowd_threshold")]
    pub crowd_threshold: usize,

    /// Seed for the direction shuffler. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Command unit doctrine.
    #[serde(default)]
    pub command: CommandDoctrine,

    /// Combat unit doctrine.
    #[serde(default)]
    pub combat: CombatDoctrine,
}

impl DecisionConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var("SKIRMISH_SEED")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
        {
            self.seed = Some(seed);
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            min_team_power: default_min_team_power(),
            enemy_sense_radius: default_enemy_sense_radius(),
            friendly_sense_radius: default_friendly_sense_radius(),
            crowd_threshold: default_crowd_threshold(),
            seed: None,
            command: CommandDoctrine::default(),
            combat: CombatDoctrine::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Upgrades
// ---------------------------------------------------------------------------

/// Research priorities and completion thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpgradeConfig {
    /// Tracks in funding order. The last entry is the fallback once every
    /// track is complete.
    #[serde(default = "default_priorities")]
    pub priorities: Vec<UpgradeTrack>,

    /// Rounds needed per track. Missing tracks use
    /// [`UpgradeTrack::default_rounds`].
    #[serde(default)]
    pub thresholds: BTreeMap<UpgradeTrack, u32>,
}

impl UpgradeConfig {
    /// Rounds of research needed to complete `track`.
    pub fn threshold(&self, track: UpgradeTrack) -> u32 {
        self.thresholds
            .get(&track)
            .copied()
            .unwrap_or_else(|| track.default_rounds())
    }
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            priorities: default_priorities(),
            thresholds: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

/// Rules of the reference arena host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArenaConfig {
    /// Map width in cells.
    #[serde(default = "default_width")]
    pub width: i32,

    /// Map height in cells.
    #[serde(default = "default_height")]
    pub height: i32,

    /// Round limit before the match is declared a draw.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,

    /// Command unit position of team A.
    #[serde(default = "default_base_a")]
    pub base_a: Location,

    /// Command unit position of team B.
    #[serde(default = "default_base_b")]
    pub base_b: Location,

    /// Power each team starts with.
    #[serde(default = "default_starting_power")]
    pub starting_power: f64,

    /// Power each team gains per round.
    #[serde(default = "default_income")]
    pub income: f64,

    /// Power consumed by one spawn.
    #[serde(default = "default_spawn_cost")]
    pub spawn_cost: f64,

    /// Rounds a unit stays inactive after laying a hazard.
    #[serde(default = "default_lay_cooldown")]
    pub lay_cooldown: u32,

    /// Rounds a unit stays inactive after clearing a hazard.
    #[serde(default = "default_clear_cooldown")]
    pub clear_cooldown: u32,
}

impl ArenaConfig {
    /// Whether `location` lies on the map.
    pub const fn contains(&self, location: Location) -> bool {
        location.x >= 0 && location.y >= 0 && location.x < self.width && location.y < self.height
    }

    /// Check that the map and its bases make a playable arena.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(invalid("arena width and height must be positive"));
        }
        if !self.contains(self.base_a) || !self.contains(self.base_b) {
            return Err(invalid("arena bases must lie on the map"));
        }
        if self.base_a == self.base_b {
            return Err(invalid("arena bases must be distinct"));
        }
        if !(self.spawn_cost.is_finite() && self.income.is_finite() && self.starting_power.is_finite())
        {
            return Err(invalid("arena power settings must be finite"));
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            max_rounds: default_max_rounds(),
            base_a: default_base_a(),
            base_b: default_base_b(),
            starting_power: default_starting_power(),
            income: default_income(),
            spawn_cost: default_spawn_cost(),
            lay_cooldown: default_lay_cooldown(),
            clear_cooldown: default_clear_cooldown(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_min_team_power() -> f64 {
    60.0
}

const fn default_enemy_sense_radius() -> u32 {
    30
}

const fn default_friendly_sense_radius() -> u32 {
    1
}

const fn default_crowd_threshold() -> usize {
    1
}

const fn default_base_bias() -> f64 {
    0.25
}

fn default_priorities() -> Vec<UpgradeTrack> {
    vec![
        UpgradeTrack::Fusion,
        UpgradeTrack::Vision,
        UpgradeTrack::Pickaxe,
        UpgradeTrack::Defusion,
        UpgradeTrack::Nuke,
    ]
}

const fn default_width() -> i32 {
    30
}

const fn default_height() -> i32 {
    30
}

const fn default_max_rounds() -> u64 {
    2500
}

const fn default_base_a() -> Location {
    Location::new(3, 3)
}

const fn default_base_b() -> Location {
    Location::new(26, 26)
}

const fn default_starting_power() -> f64 {
    40.0
}

const fn default_income() -> f64 {
    10.0
}

const fn default_spawn_cost() -> f64 {
    10.0
}

const fn default_lay_cooldown() -> u32 {
    12
}

const fn default_clear_cooldown() -> u32 {
    12
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.decision.min_team_power - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.decision.enemy_sense_radius, 30);
        assert_eq!(config.decision.friendly_sense_radius, 1);
        assert_eq!(config.upgrades.priorities.last(), Some(&UpgradeTrack::Nuke));
        assert_eq!(config.decision.command, CommandDoctrine::SpawnThenResearch);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
decision:
  min_team_power: 80.0
  enemy_sense_radius: 25
  friendly_sense_radius: 2
  crowd_threshold: 0
  seed: 7
  command:
    kind: research_only
    track: nuke
  combat:
    kind: wander
    base_bias: 0.5

upgrades:
  priorities: [vision, nuke]
  thresholds:
    vision: 5
    nuke: 20

arena:
  width: 12
  height: 10
  max_rounds: 300
  base_a: { x: 1, y: 1 }
  base_b: { x: 10, y: 8 }

logging:
  level: debug
  format: json
";
        let config = EngineConfig::parse(yaml).unwrap();
        assert_eq!(config.decision.seed, Some(7));
        assert_eq!(config.decision.crowd_threshold, 0);
        assert_eq!(
            config.decision.command,
            CommandDoctrine::ResearchOnly {
                track: UpgradeTrack::Nuke
            }
        );
        assert_eq!(config.decision.combat, CombatDoctrine::Wander { base_bias: 0.5 });
        assert_eq!(
            config.upgrades.priorities,
            vec![UpgradeTrack::Vision, UpgradeTrack::Nuke]
        );
        assert_eq!(config.upgrades.threshold(UpgradeTrack::Nuke), 20);
        assert_eq!(config.arena.base_b, Location::new(10, 8));
        assert_eq!(config.arena.max_rounds, 300);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = EngineConfig::parse("logging:\n  level: warn\n").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.decision, DecisionConfig::default());
        assert_eq!(config.arena, ArenaConfig::default());
    }

    #[test]
    fn wander_bias_defaults_when_omitted() {
        let config = EngineConfig::parse("decision:\n  combat:\n    kind: wander\n").unwrap();
        assert_eq!(config.decision.combat, CombatDoctrine::Wander { base_bias: 0.25 });
    }

    #[test]
    fn missing_threshold_uses_track_default() {
        let upgrades = UpgradeConfig::default();
        assert_eq!(upgrades.threshold(UpgradeTrack::Fusion), 25);
        assert_eq!(upgrades.threshold(UpgradeTrack::Nuke), 404);
    }

    #[test]
    fn empty_priority_list_is_rejected() {
        let result = EngineConfig::parse("upgrades:\n  priorities: []\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn off_map_base_is_rejected() {
        let yaml = "arena:\n  width: 5\n  height: 5\n  base_a: { x: 1, y: 1 }\n  base_b: { x: 9, y: 9 }\n";
        assert!(matches!(
            EngineConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn out_of_range_bias_is_rejected() {
        let yaml = "decision:\n  combat:\n    kind: wander\n    base_bias: 1.5\n";
        assert!(matches!(
            EngineConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        assert!(matches!(
            EngineConfig::parse("decision: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("skirmish-config.yaml");
        if path.exists() {
            let config = EngineConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
