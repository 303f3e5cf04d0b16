#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use anyhow::{Context, Result};
use reqwest::Client;

use crate::constants::{AUTOGRADING_DIR, GRADEBOOK_TIMEOUT_SECS, PYLINT_RCFILE};

/// Gradebook webservice credentials and submission identity sourced from the
/// environment.
#[derive(Clone)]
pub struct MoodleEnv {
    /// Base URL of the Moodle instance hosting the webservice.
    target_url: String,
    /// Webservice token used to authenticate the submission.
    token:      String,
    /// Name of the webservice function receiving the grade.
    function:   String,
    /// Username of the student whose grade is updated.
    username:   String,
    /// Base URL of the git server hosting the submission repository.
    server:     String,
    /// Repository path in `owner/repository` form.
    repo_path:  String,
}

impl MoodleEnv {
    /// Construct a `MoodleEnv` from environment variables; returns `None` if
    /// any required field is missing or empty.
    fn from_env() -> Option<Self> {
        let read = |key: &str| -> Option<String> {
            let value = std::env::var(key).ok()?.trim().to_owned();
            if value.is_empty() { None } else { Some(value) }
        };

        Some(Self {
            target_url: read("TARGET_URL")?,
            token:      read("TOKEN")?,
            function:   read("FUNCTION")?,
            username:   read("USERNAME")?,
            server:     read("SERVER")?,
            repo_path:  read("REPO")?,
        })
    }

    /// Returns the base URL of the Moodle instance.
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Returns the webservice token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the webservice function name.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Returns the student username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the repository path in `owner/repository` form.
    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    /// Returns the repository name without its owner prefix.
    pub fn repository(&self) -> &str {
        self.repo_path
            .split('/')
            .nth(1)
            .unwrap_or(&self.repo_path)
    }

    /// Derives the assignment name by stripping the `-{username}` suffix
    /// Classroom appends to the assignment repository.
    pub fn assignment(&self) -> String {
        let repository = self.repository();
        repository
            .strip_suffix(&format!("-{}", self.username))
            .unwrap_or(repository)
            .to_string()
    }

    /// Returns the browsable link to the submission repository.
    pub fn external_link(&self) -> String {
        format!("{}/{}", self.server, self.repo_path)
    }
}

/// Runtime configuration shared across the crate.
pub struct ConfigState {
    /// Directory holding the grading configuration files.
    autograding_dir:   PathBuf,
    /// File name of the case catalog, from `FILE_UNITTESTS`.
    case_file:         Option<String>,
    /// File name of the lint configuration, from `FILE_LINT`.
    lint_file:         Option<String>,
    /// Gradebook credentials, if configured.
    moodle:            Option<MoodleEnv>,
    /// Shared reqwest HTTP client reused across both sinks.
    http_client:       Client,
    /// Request timeout applied to gradebook submissions.
    gradebook_timeout: Duration,
}

impl ConfigState {
    /// Construct a new configuration instance by reading the environment.
    fn new() -> Result<Self> {
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .context("Failed to construct shared HTTP client")?;

        let autograding_dir = std::env::var("PYGRADE_AUTOGRADING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(AUTOGRADING_DIR));

        Ok(Self {
            autograding_dir,
            case_file: env_nonempty("FILE_UNITTESTS"),
            lint_file: env_nonempty("FILE_LINT"),
            moodle: MoodleEnv::from_env(),
            http_client,
            gradebook_timeout: read_timeout_secs(
                "PYGRADE_REQUEST_TIMEOUT_SECS",
                GRADEBOOK_TIMEOUT_SECS,
            ),
        })
    }

    /// Returns the directory holding the grading configuration files.
    pub fn autograding_dir(&self) -> &PathBuf {
        &self.autograding_dir
    }

    /// Returns the path of the case catalog, if `FILE_UNITTESTS` is set.
    pub fn case_catalog_path(&self) -> Option<PathBuf> {
        self.case_file
            .as_ref()
            .map(|name| self.autograding_dir.join(name))
    }

    /// Returns the path of the lint configuration, if `FILE_LINT` is set.
    pub fn lint_config_path(&self) -> Option<PathBuf> {
        self.lint_file
            .as_ref()
            .map(|name| self.autograding_dir.join(name))
    }

    /// Returns the path of the pylint rcfile.
    pub fn rcfile_path(&self) -> PathBuf {
        self.autograding_dir.join(PYLINT_RCFILE)
    }

    /// Returns a clone of the shared reqwest HTTP client.
    pub fn http_client(&self) -> Client {
        self.http_client.clone()
    }

    /// Returns the request timeout for gradebook submissions.
    pub fn gradebook_timeout(&self) -> Duration {
        self.gradebook_timeout
    }

    /// Returns the gradebook environment, if all required variables are set.
    pub fn moodle(&self) -> Option<MoodleEnv> {
        self.moodle.clone()
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Ensure the global configuration has been initialized and return a handle.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let slot = slot();
    let mut guard = slot.lock().expect("config slot poisoned");
    if let Some(cfg) = guard.as_ref() {
        return Ok(ConfigHandle(Arc::clone(cfg)));
    }

    let cfg = ConfigState::new().map(Arc::new)?;
    *guard = Some(Arc::clone(&cfg));
    Ok(ConfigHandle(cfg))
}

/// Returns the active configuration, initializing it on demand.
pub fn get() -> ConfigHandle {
    ensure_initialized().expect("configuration initialization failed")
}

/// Returns the path of the case catalog, if `FILE_UNITTESTS` is set.
pub fn case_catalog_path() -> Option<PathBuf> {
    get().case_catalog_path()
}

/// Returns the path of the lint configuration, if `FILE_LINT` is set.
pub fn lint_config_path() -> Option<PathBuf> {
    get().lint_config_path()
}

/// Returns the path of the pylint rcfile.
pub fn rcfile_path() -> PathBuf {
    get().rcfile_path()
}

/// Returns a clone of the shared reqwest HTTP client.
pub fn http_client() -> Client {
    get().http_client()
}

/// Returns the request timeout for gradebook submissions.
pub fn gradebook_timeout() -> Duration {
    get().gradebook_timeout()
}

/// Returns the gradebook environment, if configured.
pub fn moodle_env() -> Option<MoodleEnv> {
    get().moodle()
}

/// Reads a non-empty environment variable.
fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parses an environment variable into a `Duration`, falling back to
/// `default_secs` when parsing fails or the variable is missing.
fn read_timeout_secs(env: &str, default_secs: u64) -> Duration {
    std::env::var(env)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}
