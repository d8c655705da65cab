use std::time::Duration;

/// Default server address when none is configured.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8888";

/// Adapter name the server mounts the update tree under.
const DEFAULT_ADAPTER: &str = "loki-update";

/// API version segment of the adapter URL.
const DEFAULT_API_VERSION: &str = "0.1";

/// Status poll cadence.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Where the device-management endpoint lives and how often to poll it.
///
/// The base address and poll interval are deployment facts, not code:
/// they come from the caller or from `FWDECK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Server address, e.g. `http://192.168.0.194:8888`.
    pub base_url: String,
    /// Adapter name under the API root.
    pub adapter: String,
    /// API version path segment.
    pub api_version: String,
    /// Interval between status polls.
    pub poll_interval: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            adapter: DEFAULT_ADAPTER.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl EndpointConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Recognized variables: `FWDECK_BASE_URL`, `FWDECK_ADAPTER`,
    /// `FWDECK_POLL_INTERVAL_MS`. An unparseable interval falls back to
    /// the default rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("FWDECK_BASE_URL")
            && !url.is_empty()
        {
            config.base_url = url;
        }
        if let Ok(adapter) = std::env::var("FWDECK_ADAPTER")
            && !adapter.is_empty()
        {
            config.adapter = adapter;
        }
        if let Ok(ms) = std::env::var("FWDECK_POLL_INTERVAL_MS")
            && let Ok(ms) = ms.parse::<u64>()
            && ms > 0
        {
            config.poll_interval = Duration::from_millis(ms);
        }
        config
    }

    /// Full URL of the adapter root, e.g.
    /// `http://192.168.0.194:8888/api/0.1/loki-update`.
    pub fn api_root(&self) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.adapter
        )
    }

    /// URL of a path under the adapter root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root(), path.trim_start_matches('/'))
    }
}
