use std::path::PathBuf;

/// Runtime configuration, read once at startup from the environment
/// (`dotenvy` has already loaded `.env` by then).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub state_dir: PathBuf,
    pub download_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base = std::env::var("SOMSHARE_API_BASE")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".into());
        let state_dir: PathBuf = std::env::var("SOMSHARE_STATE_DIR")
            .unwrap_or_else(|_| ".somshare".into())
            .into();
        let download_dir: PathBuf = std::env::var("SOMSHARE_DOWNLOAD_DIR")
            .unwrap_or_else(|_| "downloads".into())
            .into();
        Self {
            api_base,
            state_dir,
            download_dir,
        }
    }

    /// Where the serialized session lives between runs.
    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}
