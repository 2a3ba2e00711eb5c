use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `FEATURESPEC__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Directory layout for the spec generation pipeline. Both paths are
/// resolved relative to the invocation's working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_features_dir")]
    pub features_dir: String,
    #[serde(default = "default_specs_dir")]
    pub specs_dir: String,
}

/// Settings for the in-process scenario runner.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_browser")]
    pub browser: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_step_timeout_ms")]
    pub step_timeout_ms: u64,
    #[serde(default = "default_screenshot_on_failure")]
    pub screenshot_on_failure: bool,
    #[serde(default = "default_retry_flaky")]
    pub retry_flaky: bool,
}

// Default functions
fn default_features_dir() -> String {
    "features".to_string()
}
fn default_specs_dir() -> String {
    "tests-playwright".to_string()
}
fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_browser() -> String {
    "chromium".to_string()
}
fn default_headless() -> bool {
    true
}
fn default_step_timeout_ms() -> u64 {
    30_000
}
fn default_screenshot_on_failure() -> bool {
    true
}
fn default_retry_flaky() -> bool {
    false
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            features_dir: default_features_dir(),
            specs_dir: default_specs_dir(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            browser: default_browser(),
            headless: default_headless(),
            step_timeout_ms: default_step_timeout_ms(),
            screenshot_on_failure: default_screenshot_on_failure(),
            retry_flaky: default_retry_flaky(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            runner: RunnerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("FEATURESPEC")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
