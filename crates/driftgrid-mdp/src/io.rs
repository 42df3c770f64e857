use std::{fs, path::Path};

use crate::{EnvConfig, MdpError, MdpModel, TabularSpec};

/// Load an environment config from YAML on disk.
pub fn load_config(path: impl AsRef<Path>) -> Result<EnvConfig, MdpError> {
    EnvConfig::from_yaml_path(path)
}

/// Load a config file and build its model with effects drawn from `seed`.
pub fn compile_yaml(path: impl AsRef<Path>, seed: u64) -> Result<MdpModel, MdpError> {
    let config = load_config(path)?;
    MdpModel::from_seed(config, seed)
}

/// Load an exported table from YAML.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<TabularSpec, MdpError> {
    let yaml = fs::read_to_string(path)?;
    let spec: TabularSpec = serde_yaml::from_str(&yaml)?;
    spec.validate()?;
    Ok(spec)
}

/// Serialize and write an exported table to YAML.
pub fn save_yaml(path: impl AsRef<Path>, spec: &TabularSpec) -> Result<(), MdpError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}

/// Serialize and write an exported table to pretty-printed JSON.
pub fn save_json(path: impl AsRef<Path>, spec: &TabularSpec) -> Result<(), MdpError> {
    let json = serde_json::to_string_pretty(spec)?;
    fs::write(path, json)?;
    Ok(())
}
