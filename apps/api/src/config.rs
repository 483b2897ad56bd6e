use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every knob has a default: the service has no external backing stores,
/// so a bare `cargo run` must work.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Whether new sessions start ad-gated (free tier). Premium deployments
    /// flip this off.
    pub ad_gate_required: bool,
    /// Nominal ad playback length in seconds; the gate ticks once per second.
    pub ad_duration_secs: u64,
    /// Total simulated analysis duration before the completion event fires.
    pub analysis_duration_ms: u64,
    /// Interval between simulated progress ticks.
    pub analysis_tick_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            ad_gate_required: env_or("AD_GATE_REQUIRED", "true")
                .parse::<bool>()
                .context("AD_GATE_REQUIRED must be true or false")?,
            ad_duration_secs: env_or("AD_DURATION_SECS", "10")
                .parse::<u64>()
                .context("AD_DURATION_SECS must be a positive integer")?,
            analysis_duration_ms: env_or("ANALYSIS_DURATION_MS", "3000")
                .parse::<u64>()
                .context("ANALYSIS_DURATION_MS must be a positive integer")?,
            analysis_tick_ms: env_or("ANALYSIS_TICK_MS", "500")
                .parse::<u64>()
                .context("ANALYSIS_TICK_MS must be a positive integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // No env vars set in the test environment for these keys.
        let config = Config::from_env().unwrap();
        assert_eq!(config.ad_duration_secs, 10);
        assert_eq!(config.analysis_duration_ms, 3000);
        assert_eq!(config.analysis_tick_ms, 500);
        assert!(config.ad_gate_required);
    }
}
