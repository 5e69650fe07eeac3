use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::PipelineConfig;
use crate::core::{Error, Result, ResultExt};

/// Serialization format of a pipeline file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything unrecognised is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => {
                log::debug!(
                    "Unrecognised extension on {}, parsing as TOML",
                    path.display()
                );
                Self::Toml
            }
        }
    }
}

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate a pipeline from a string
pub fn parse_pipeline_config(contents: &str, format: ConfigFormat) -> Result<PipelineConfig> {
    let config: PipelineConfig = match format {
        ConfigFormat::Toml => toml::from_str(contents)?,
        ConfigFormat::Json => serde_json::from_str(contents)?,
        ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
    };

    config.validate()?;
    Ok(config)
}

/// Load and validate a pipeline file
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read pipeline file", path, e))?;

    let format = ConfigFormat::from_path(path);
    let config = parse_pipeline_config(&contents, format)
        .context(format!("Invalid pipeline file {}", path.display()))?;

    log::debug!(
        "Loaded {} stage(s) from {}",
        config.stages.len(),
        path.display()
    );
    Ok(config)
}
