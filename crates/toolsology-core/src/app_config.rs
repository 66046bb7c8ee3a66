#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, built once at startup and passed to the components
/// that need them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Raw configured API origin. Resolution (and the local fallback for an
    /// unparsable value) happens in the catalog client, not here.
    pub api_url: Option<String>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Page ceiling for paginated crawls. `None` means unlimited.
    pub max_pages: Option<usize>,
    /// Currency code printed in unit-price labels, e.g. `"PKR"`.
    pub currency: String,
}
