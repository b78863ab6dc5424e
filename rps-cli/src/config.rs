use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub storage_file: String,
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rps"),
            storage_file: "rps_games.json".to_string(),
            verbose: false,
        }
    }
}

impl CliConfig {
    /// Apply the global command-line flags on top of the defaults
    pub fn with_overrides(data_dir: Option<PathBuf>, verbose: bool) -> Self {
        let mut config = Self::default();
        if let Some(data_dir) = data_dir {
            config.data_dir = data_dir;
        }
        config.verbose = verbose;
        config
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage_file)
    }

    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "info" };
        format!("rps={},rps_game={}", level, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let config = CliConfig::with_overrides(Some(PathBuf::from("/tmp/rps-test")), true);

        assert_eq!(
            config.storage_path(),
            PathBuf::from("/tmp/rps-test/rps_games.json")
        );
        assert_eq!(config.log_filter(), "rps=debug,rps_game=debug");
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::with_overrides(None, false);

        assert!(config.data_dir.ends_with("rps"));
        assert_eq!(config.log_filter(), "rps=info,rps_game=info");
    }
}
