use directories::ProjectDirs;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "host.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Root for relative save paths
    pub output_dir: PathBuf,
    /// env_logger filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            log_level: "info".to_string(),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("dev", "file_nodes", "file_nodes_host")?;
    Some(proj_dirs.config_dir().join(CONFIG_FILE))
}

/// Missing file means defaults; an unreadable or malformed file is an error the caller reports.
pub fn load_config_from(path: &Path) -> anyhow::Result<HostConfig> {
    if !path.exists() {
        return Ok(HostConfig::default());
    }
    let toml_str = fs::read_to_string(path)?;
    let config = toml::from_str(&toml_str)?;
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &HostConfig) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            if let Err(e) = fs::create_dir_all(dir) {
                error!("Failed to create config directory: {}", e);
                return Err(e.into());
            }
        }
    }
    let toml_str = toml::to_string_pretty(config)?;
    fs::write(path, toml_str)?;
    info!("Host config saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("host.toml")).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/host.toml");
        let config = HostConfig {
            output_dir: PathBuf::from("/srv/renders"),
            log_level: "debug".to_string(),
        };
        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        fs::write(&path, "log_level = \"warn\"\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.output_dir, PathBuf::from("./output"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        fs::write(&path, "output_dir = [").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
