//! Simple CLI configuration loader for nivoxar
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./nivoxar.json or ./.nivoxar/config.json
//! 3. Git repository root: <repo_root>/.nivoxar/config.json
//! 4. XDG config: $XDG_CONFIG_HOME/nivoxar/config.json or ~/.config/nivoxar/config.json
//! 5. Built-in defaults (no files)

use anyhow::{anyhow, Context, Result};
use nivoxar_core::RouterSettings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Directory searched as the working directory
    working_dir: Option<PathBuf>,
    /// Flag overrides
    default_route_override: Option<String>,
    no_animations: bool,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Search this directory instead of the process working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Set default route override
    pub fn with_default_route_override(mut self, route: String) -> Self {
        self.default_route_override = Some(route);
        self
    }

    /// Drop the exit and settle delays
    pub fn without_animations(mut self) -> Self {
        self.no_animations = true;
        self
    }

    /// Load and resolve settings
    pub async fn load(&self) -> Result<RouterSettings> {
        // Step 1: Find and load base settings
        let mut settings = if let Some(override_path) = &self.config_override {
            let expanded = expand_path(override_path);
            self.load_from_path(&expanded).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(route) = &self.default_route_override {
            settings.default_route = route.clone();
        }
        if self.no_animations {
            settings = settings.without_animations();
        }

        // Step 3: Validate
        settings
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(settings)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RouterSettings> {
        let cwd = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        // 1. Current working directory
        if let Some(settings) = self.try_load_dir(&cwd).await? {
            return Ok(settings);
        }

        // 2. Git repository root
        if let Some(git_root) = find_git_root(&cwd) {
            let config_path = git_root.join(".nivoxar").join("config.json");
            if config_path.exists() {
                return self.load_file(&config_path).await;
            }
        }

        // 3. XDG config directory
        if let Some(config_dir) = xdg_config_dir() {
            let config_path = config_dir.join("nivoxar").join("config.json");
            if config_path.exists() {
                return self.load_file(&config_path).await;
            }
        }

        // 4. Defaults
        debug!("No configuration file found, using defaults");
        Ok(RouterSettings::default())
    }

    /// Try ./nivoxar.json, then ./.nivoxar/config.json
    async fn try_load_dir(&self, dir: &Path) -> Result<Option<RouterSettings>> {
        let nivoxar_json = dir.join("nivoxar.json");
        if nivoxar_json.exists() {
            return Ok(Some(self.load_file(&nivoxar_json).await?));
        }

        let dir_config = dir.join(".nivoxar").join("config.json");
        if dir_config.exists() {
            return Ok(Some(self.load_file(&dir_config).await?));
        }

        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RouterSettings> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RouterSettings> {
        debug!("Loading configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Get XDG config directory
fn xdg_config_dir() -> Option<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) if !xdg_config.is_empty() => Some(PathBuf::from(xdg_config)),
        _ => dirs::config_dir(),
    }
}
