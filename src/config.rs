use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the dataset to open at start-up.
pub const DATA_ENV_VAR: &str = "AI_IMPACT_DATA";

/// Dataset opened when neither the command line nor the environment names one.
pub const DEFAULT_DATASET: &str = "data/Global_AI_Content_Impact_Dataset.csv";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Start-up settings for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// File loaded at start-up.
    pub dataset_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Height of each chart's plot area.
    pub chart_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
            chart_height: 320.0,
        }
    }
}

impl ViewerConfig {
    /// Build from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(std::env::args_os().skip(1), std::env::var_os(DATA_ENV_VAR))
    }

    /// First positional argument wins over the environment, which wins over the default.
    pub fn resolve(mut args: impl Iterator<Item = OsString>, env_path: Option<OsString>) -> Self {
        let mut config = Self::default();
        let chosen = args
            .next()
            .or(env_path)
            .filter(|p| !p.is_empty());
        if let Some(path) = chosen {
            config.dataset_path = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = OsString> {
        list.iter().map(OsString::from).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_without_overrides() {
        let cfg = ViewerConfig::resolve(args(&[]), None);
        assert_eq!(cfg.dataset_path, PathBuf::from(DEFAULT_DATASET));
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn argument_beats_environment() {
        let cfg = ViewerConfig::resolve(args(&["cli.csv"]), Some(OsString::from("env.csv")));
        assert_eq!(cfg.dataset_path, PathBuf::from("cli.csv"));
    }

    #[test]
    fn environment_used_without_argument() {
        let cfg = ViewerConfig::resolve(args(&[]), Some(OsString::from("env.parquet")));
        assert_eq!(cfg.dataset_path, PathBuf::from("env.parquet"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let cfg = ViewerConfig::resolve(args(&[""]), None);
        assert_eq!(cfg.dataset_path, PathBuf::from(DEFAULT_DATASET));
    }
}
