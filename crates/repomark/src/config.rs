use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_API_URL: &str = github_backend::DEFAULT_BASE_URL;
const DEFAULT_PER_PAGE: usize = github_backend::DEFAULT_PER_PAGE;
const DEFAULT_DEBOUNCE_MS: u64 = repomark_core::DEFAULT_DEBOUNCE.as_millis() as u64;

/// Effective configuration after layering defaults, files, env and flags
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// GitHub API base URL
    pub api_url: String,
    /// Optional personal access token
    pub token: Option<String>,
    /// Result-size bound for searches
    pub per_page: usize,
    /// Debounce window for interactive search, in milliseconds
    pub debounce_ms: u64,
    /// Directory for persisted bookmarks; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            per_page: DEFAULT_PER_PAGE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // REPOMARK_TOKEN wins over the conventional GITHUB_TOKEN
        figment = figment
            .merge(Env::raw().only(&["GITHUB_TOKEN"]).map(|_| "token".into()))
            .merge(Env::prefixed("REPOMARK_").ignore(&["CONFIG", "LOG"]));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(
        &mut self,
        api_url: Option<String>,
        token: Option<String>,
        data_dir: Option<PathBuf>,
    ) {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow!(
                "Invalid api_url '{}'. Expected an http(s) URL",
                self.api_url
            ));
        }
        if !(1..=100).contains(&self.per_page) {
            return Err(anyhow!(
                "per_page must be between 1 and 100, got {}",
                self.per_page
            ));
        }
        if !(50..=5000).contains(&self.debounce_ms) {
            return Err(anyhow!(
                "debounce_ms must be between 50 and 5000, got {}",
                self.debounce_ms
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Directory where bookmarks are persisted
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("", "", "repomark")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| anyhow!("Could not determine a data directory; set --data-dir"))
    }

    /// Copy safe to print: the token is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.token.is_some() {
            copy.token = Some("********".to_string());
        }
        copy
    }
}

pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repomark").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("repomark").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("repomark")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join("repomark.toml"))
}
