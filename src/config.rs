use std::env;
use std::path::PathBuf;

use crate::http_client::DEFAULT_TIMEOUT_SECS;
use crate::scouting::{DEFAULT_MAX_AGE, DEFAULT_MIN_OVERALL, MAX_AGE_RANGE, MIN_OVERALL_RANGE};

pub const DEFAULT_PLAYERS_CSV: &str = "data/players.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub players_csv: PathBuf,
    pub image_timeout_secs: u64,
    pub fetch_images: bool,
    pub scout_min_overall: u8,
    pub scout_max_age: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            players_csv: PathBuf::from(DEFAULT_PLAYERS_CSV),
            image_timeout_secs: DEFAULT_TIMEOUT_SECS,
            fetch_images: true,
            scout_min_overall: DEFAULT_MIN_OVERALL,
            scout_max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let players_csv = lookup("PLAYERS_CSV")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.players_csv);
        let image_timeout_secs = lookup("IMAGE_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(defaults.image_timeout_secs)
            .clamp(1, 30);
        let fetch_images = lookup("FETCH_IMAGES")
            .map(|v| {
                let v = v.trim().to_ascii_lowercase();
                !matches!(v.as_str(), "0" | "false" | "off" | "no")
            })
            .unwrap_or(defaults.fetch_images);
        let scout_min_overall = lookup("SCOUT_MIN_OVERALL")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .unwrap_or(defaults.scout_min_overall)
            .clamp(MIN_OVERALL_RANGE.0, MIN_OVERALL_RANGE.1);
        let scout_max_age = lookup("SCOUT_MAX_AGE")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .unwrap_or(defaults.scout_max_age)
            .clamp(MAX_AGE_RANGE.0, MAX_AGE_RANGE.1);
        Self {
            players_csv,
            image_timeout_secs,
            fetch_images,
            scout_min_overall,
            scout_max_age,
        }
    }

    /// A path given on the command line wins over the environment.
    pub fn with_cli_path(mut self, arg: Option<String>) -> Self {
        if let Some(path) = arg.filter(|a| !a.trim().is_empty()) {
            self.players_csv = PathBuf::from(path);
        }
        self
    }
}
