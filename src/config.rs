use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub job: Job,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub notification: Notification,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub debug: Debug,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// Loads `path` when given, otherwise `./download-worker.toml` if present,
    /// otherwise the built-in defaults.
    pub fn resolve(user: Option<&Path>) -> Result<Self> {
        if let Some(p) = user {
            return Self::load(p);
        }
        let default = Path::new("download-worker.toml");
        if default.exists() {
            Self::load(default)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes the config as TOML to `path`, creating parent directories.
    pub fn write_effective(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string(self).with_context(|| "serializing config")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::util::ensure_dir(parent)?;
        }
        std::fs::write(path, raw).with_context(|| format!("writing {}", path.display()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Global {
    pub job_name: String,
    pub print_summary: bool,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            job_name: "image-download".into(),
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub endpoint: String,
    pub min_work_delay_ms: u64,
}
impl Default for Job {
    fn default() -> Self {
        Self {
            endpoint: "https://images.unsplash.com/photo-1532980400857-e8d9d275d858".into(),
            min_work_delay_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    pub cache_dir: String,
    pub image_filename: String,
    /// Nest the sink under `<cache_dir>/<job_id>/` so concurrent jobs do not
    /// share one file.
    pub per_job_sink: bool,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            cache_dir: ".download-worker-cache".into(),
            image_filename: "image.jpg".into(),
            per_job_sink: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Http {
    pub timeout_seconds: u64,
    pub user_agent: String,
}
impl Default for Http {
    fn default() -> Self {
        Self {
            timeout_seconds: 60,
            user_agent: concat!("download-worker/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// "failure" or "retry". Anything else is treated as "failure".
    pub transport_errors: String,
}
impl Default for Classification {
    fn default() -> Self {
        Self {
            transport_errors: "failure".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub enabled: bool,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub icon: String,
}
impl Default for Notification {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_id: "download_channel".into(),
            title: "Download in progress".into(),
            body: "Downloading...".into(),
            icon: "ic_launcher_background".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debug {
    pub dump_effective_config: bool,
    pub effective_config_path: String,
}
impl Default for Debug {
    fn default() -> Self {
        Self {
            dump_effective_config: false,
            effective_config_path: "effective-config.toml".into(),
        }
    }
}
