//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Project configuration file name, searched upwards from the current directory
pub const PROJECT_CONFIG_NAME: &str = ".mergetree.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    /// Config from the command line (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project config (`.mergetree.toml`)
    pub project: Option<PathBuf>,
    /// Global config under the user configuration directory
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files
    ///
    /// A command-line path is taken as given, even if it does not exist, so
    /// that reading it reports the problem.
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let project = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::find_upwards(&cwd, PROJECT_CONFIG_NAME));

        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            project,
            global: Self::find_global_config(),
        }
    }

    /// Find `name` in `start` or any of its parent directories
    fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Find the global config in the user configuration directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("mergetree").join("config.toml");
        global_config.is_file().then_some(global_config)
    }
}
