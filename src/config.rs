use crate::error::AppError;
use std::env;
use std::path::PathBuf;

const DATA_DIR_VAR: &str = "FRAG_REPORT_DATA_DIR";
const TEAMS_VAR: &str = "FRAG_REPORT_TEAMS";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub teams_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var(DATA_DIR_VAR) {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(AppError::Config(format!("{} is set but empty", DATA_DIR_VAR)));
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => Self::default_data_dir(),
        };

        let teams_file = env::var(TEAMS_VAR)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config { data_dir, teams_file })
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".frag_report")
    }
}
