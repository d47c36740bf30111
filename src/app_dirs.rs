use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typer";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.config_dir().join("config.txt")
        } else {
            PathBuf::from("config.txt")
        }
    }

    /// Directory holding `typer.log` and `results.log`
    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
        } else if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.data_local_dir().join("logs")
        } else {
            PathBuf::from("logs")
        }
    }

    pub fn app_log_path() -> PathBuf {
        Self::log_dir().join("typer.log")
    }

    pub fn results_log_path() -> PathBuf {
        Self::log_dir().join("results.log")
    }
}
