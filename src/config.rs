//! Configuration Module
//!
//! Command-line configuration for the proxy and its cache.

use std::time::Duration;

use clap::Parser;

/// Server configuration parameters.
///
/// `--port` and `--origin` are required; the cache tuning knobs default to
/// the reference deployment values.
#[derive(Parser, Debug, Clone)]
#[command(name = "caching-proxy", version, about = "Caching HTTP forward proxy")]
pub struct Config {
    /// Port the proxy listens on
    #[arg(long)]
    pub port: u16,

    /// Base URL of the upstream origin (e.g. http://localhost:8080)
    #[arg(long)]
    pub origin: String,

    /// Default TTL in seconds for cached responses; 0 = cached responses
    /// without an explicit TTL never expire
    #[arg(long = "default-ttl", default_value_t = 1)]
    pub default_ttl_secs: u64,

    /// Seconds between background cleanup sweeps; 0 disables the sweeper
    #[arg(long = "cleanup-interval", default_value_t = 120)]
    pub cleanup_interval_secs: u64,

    /// Maximum number of cached responses; 0 = unbounded
    #[arg(long, default_value_t = 3000)]
    pub capacity: usize,
}

impl Config {
    /// Default TTL as a duration, `None` when configured as 0.
    pub fn default_ttl(&self) -> Option<Duration> {
        (self.default_ttl_secs > 0).then(|| Duration::from_secs(self.default_ttl_secs))
    }

    /// Cleanup sweep period; zero disables background reclamation.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    /// Capacity bound, `None` when configured as 0 (unbounded).
    pub fn capacity_bound(&self) -> Option<usize> {
        (self.capacity > 0).then_some(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::try_parse_from([
            "caching-proxy",
            "--port",
            "3000",
            "--origin",
            "http://localhost:8080",
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.origin, "http://localhost:8080");
        assert_eq!(config.default_ttl(), Some(Duration::from_secs(1)));
        assert_eq!(config.cleanup_interval(), Duration::from_secs(120));
        assert_eq!(config.capacity_bound(), Some(3000));
    }

    #[test]
    fn test_config_zero_values_disable_features() {
        let config = Config::try_parse_from([
            "caching-proxy",
            "--port",
            "3000",
            "--origin",
            "http://localhost:8080",
            "--default-ttl",
            "0",
            "--cleanup-interval",
            "0",
            "--capacity",
            "0",
        ])
        .unwrap();

        assert_eq!(config.default_ttl(), None);
        assert_eq!(config.cleanup_interval(), Duration::ZERO);
        assert_eq!(config.capacity_bound(), None);
    }

    #[test]
    fn test_config_requires_origin() {
        let result = Config::try_parse_from(["caching-proxy", "--port", "3000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        let result = Config::try_parse_from([
            "caching-proxy",
            "--port",
            "not-a-number",
            "--origin",
            "http://localhost:8080",
        ]);
        assert!(result.is_err());
    }
}
