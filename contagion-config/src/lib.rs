use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// --- Error Type ---
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format `{0}` (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

// --- Enums for Choices ---
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SerializerType {
    Json,
    Binary,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Stdio,
    File,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension; files without one are JSON.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None | Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

// --- Configuration Sections ---

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self { width: 600.0, height: 600.0 }
    }
}

/// Cohort sizes, already validated by whoever collected them.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PopulationSettings {
    pub masked_susceptible: u32,
    pub unmasked_susceptible: u32,
    pub contagious: u32,
    /// Whether the contagious cohort wears masks.
    #[serde(default)]
    pub contagious_masked: bool,
}

impl PopulationSettings {
    pub fn total(&self) -> u32 {
        self.masked_susceptible + self.unmasked_susceptible + self.contagious
    }
}

/// Percent chance (0..=100) that a contact passes the infection on, by who
/// wears a mask.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TransmissionSettings {
    #[serde(default = "default_unmasked_to_unmasked")]
    pub unmasked_to_unmasked: u32,
    #[serde(default = "default_unmasked_to_masked")]
    pub unmasked_to_masked: u32,
    #[serde(default = "default_masked_to_unmasked")]
    pub masked_to_unmasked: u32,
    #[serde(default = "default_masked_to_masked")]
    pub masked_to_masked: u32,
}

fn default_unmasked_to_unmasked() -> u32 { 95 }
fn default_unmasked_to_masked() -> u32 { 70 }
fn default_masked_to_unmasked() -> u32 { 5 }
fn default_masked_to_masked() -> u32 { 2 }

impl Default for TransmissionSettings {
    fn default() -> Self {
        Self {
            unmasked_to_unmasked: default_unmasked_to_unmasked(),
            unmasked_to_masked: default_unmasked_to_masked(),
            masked_to_unmasked: default_masked_to_unmasked(),
            masked_to_masked: default_masked_to_masked(),
        }
    }
}

impl TransmissionSettings {
    fn entries(&self) -> [(&'static str, u32); 4] {
        [
            ("unmasked_to_unmasked", self.unmasked_to_unmasked),
            ("unmasked_to_masked", self.unmasked_to_masked),
            ("masked_to_unmasked", self.masked_to_unmasked),
            ("masked_to_masked", self.masked_to_masked),
        ]
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SenderConfig {
    #[serde(rename = "type")]
    pub sender_type: SenderType,
    /// Output file, required by the `file` sender.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_serializer")]
    pub serializer: SerializerType,
    #[serde(default = "default_sender")]
    pub sender: SenderConfig,
}

fn default_serializer() -> SerializerType { SerializerType::Json }
fn default_sender() -> SenderConfig {
    SenderConfig { sender_type: SenderType::Null, path: None }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            serializer: default_serializer(),
            sender: default_sender(),
        }
    }
}

// --- Top-Level Config Struct ---

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_framerate")]
    pub framerate: u32,
    #[serde(default)]
    pub world: WorldSettings,
    pub population: PopulationSettings,
    /// Named engine options. Names are checked by the engine when applied.
    #[serde(default)]
    pub engine: BTreeMap<String, bool>,
    #[serde(default)]
    pub transmission: TransmissionSettings,
    /// Seed for reproducible runs; a fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Add the passive background agent that draws the room.
    #[serde(default)]
    pub backdrop: bool,
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_framerate() -> u32 { 40 }

// --- Loading Functions ---

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_config(&content, format)
}

pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let config: Config = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.framerate == 0 {
        return Err(ConfigError::Validation("Framerate cannot be zero.".to_string()));
    }

    let WorldSettings { width, height } = config.world;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ConfigError::Validation(
            "World dimensions must be positive".to_string()
        ));
    }

    for (name, percent) in config.transmission.entries() {
        if percent > 100 {
            return Err(ConfigError::Validation(format!(
                "transmission.{} is {}%, must be at most 100%", name, percent
            )));
        }
    }

    if config.render.sender.sender_type == SenderType::File && config.render.sender.path.is_none() {
        return Err(ConfigError::Validation("The 'file' sender needs a 'path'.".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const FULL_JSON: &str = r#"{
      "framerate": 30,
      "world": { "width": 800.0, "height": 500.0 },
      "population": {
        "masked_susceptible": 5,
        "unmasked_susceptible": 5,
        "contagious": 1,
        "contagious_masked": true
      },
      "engine": { "account_for_radii_in_dist": true },
      "transmission": { "masked_to_masked": 0 },
      "seed": 42,
      "backdrop": true,
      "render": {
        "serializer": "binary",
        "sender": { "type": "file", "path": "frames.log" }
      }
    }"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn load_full_json_config() {
        let file = write_temp(".json", FULL_JSON);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.framerate, 30);
        assert_eq!(config.world, WorldSettings { width: 800.0, height: 500.0 });
        assert_eq!(config.population.total(), 11);
        assert!(config.population.contagious_masked);
        assert_eq!(config.engine.get("account_for_radii_in_dist"), Some(&true));
        assert_eq!(config.transmission.masked_to_masked, 0);
        assert_eq!(config.transmission.unmasked_to_unmasked, 95);
        assert_eq!(config.seed, Some(42));
        assert!(config.backdrop);
        assert_eq!(config.render.serializer, SerializerType::Binary);
        assert_eq!(config.render.sender.sender_type, SenderType::File);
        assert_eq!(config.render.sender.path, Some(PathBuf::from("frames.log")));
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let content = r#"{ "population": { "masked_susceptible": 0, "unmasked_susceptible": 3, "contagious": 1 } }"#;
        let config = parse_config(content, ConfigFormat::Json).unwrap();

        assert_eq!(config.framerate, 40);
        assert_eq!(config.world, WorldSettings::default());
        assert!(config.engine.is_empty());
        assert_eq!(config.transmission, TransmissionSettings::default());
        assert_eq!(config.render, RenderConfig::default());
        assert!(!config.population.contagious_masked);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn load_toml_config() {
        let content = r#"
framerate = 20

[population]
masked_susceptible = 2
unmasked_susceptible = 8
contagious = 3

[engine]
account_for_radii_in_dist = false

[render.sender]
type = "stdio"
"#;
        let file = write_temp(".toml", content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.framerate, 20);
        assert_eq!(config.population.contagious, 3);
        assert_eq!(config.render.sender.sender_type, SenderType::Stdio);
        assert_eq!(config.render.serializer, SerializerType::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let content = r#"{
          "population": { "masked_susceptible": 1, "unmasked_susceptible": 1, "contagious": 1 },
          "gravity": 9.8
        }"#;
        let result = parse_config(content, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::Json(_))));

        let nested = r#"{
          "population": { "masked_susceptible": 1, "unmasked_susceptible": 1, "contagious": 1, "vaccinated": 4 }
        }"#;
        assert!(parse_config(nested, ConfigFormat::Json).is_err());
    }

    #[test]
    fn load_invalid_framerate() {
        let content = r#"{
          "framerate": 0,
          "population": { "masked_susceptible": 1, "unmasked_susceptible": 1, "contagious": 1 }
        }"#;
        let result = parse_config(content, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_non_positive_world() {
        let content = r#"{
          "world": { "width": 0.0, "height": 600.0 },
          "population": { "masked_susceptible": 1, "unmasked_susceptible": 1, "contagious": 1 }
        }"#;
        assert!(matches!(parse_config(content, ConfigFormat::Json), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_percentages_over_one_hundred() {
        let content = r#"{
          "population": { "masked_susceptible": 1, "unmasked_susceptible": 1, "contagious": 1 },
          "transmission": { "unmasked_to_masked": 101 }
        }"#;
        let err = parse_config(content, ConfigFormat::Json).unwrap_err();
        assert!(err.to_string().contains("unmasked_to_masked"));
    }

    #[test]
    fn file_sender_requires_path() {
        let content = r#"{
          "population": { "masked_susceptible": 1, "unmasked_susceptible": 1, "contagious": 1 },
          "render": { "sender": { "type": "file" } }
        }"#;
        assert!(matches!(parse_config(content, ConfigFormat::Json), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".yaml", "population: {}");
        assert!(matches!(load_config(file.path()), Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"));
    }
}
