use crate::services::backtester::BacktestConfig;
use crate::services::session::SessionConfig;
use crate::sources::wingo::WINGO_API_URL;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Where draw history comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The public WinGo history endpoint.
    Live,
    /// Locally generated draws.
    Simulated,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Live => "live",
            SourceKind::Simulated => "simulated",
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "wingo" => Ok(SourceKind::Live),
            "simulated" | "sim" => Ok(SourceKind::Simulated),
            other => Err(format!("unknown draw source: {}", other)),
        }
    }
}

/// Simulated source settings.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Draws returned per fetch.
    pub history_len: usize,
    /// RNG seed; random when unset.
    pub seed: Option<u64>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    pub source: SourceKind,
    /// Draw history endpoint.
    pub api_url: String,
    /// Upstream request timeout (ms).
    pub fetch_timeout_ms: u64,
    /// Lifetime of a cached prediction (ms).
    pub prediction_ttl_ms: u64,
    /// Fewest draws a session will predict from.
    pub min_records: usize,
    pub backtest_cap: usize,
    pub backtest_reserve: usize,
    pub backtest_min_history: usize,
    pub simulation: SimulationConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SessionConfig::default();

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&lookup, "PORT").unwrap_or(3001),
            source: parse(&lookup, "DRAW_SOURCE").unwrap_or(SourceKind::Live),
            api_url: lookup("DRAW_API_URL").unwrap_or_else(|| WINGO_API_URL.to_string()),
            fetch_timeout_ms: parse(&lookup, "FETCH_TIMEOUT_MS").unwrap_or(8000),
            prediction_ttl_ms: parse(&lookup, "PREDICTION_TTL_MS")
                .unwrap_or(defaults.prediction_ttl.as_millis() as u64),
            min_records: parse(&lookup, "MIN_RECORDS").unwrap_or(defaults.min_records),
            backtest_cap: parse(&lookup, "BACKTEST_CAP").unwrap_or(defaults.backtest.cap),
            backtest_reserve: parse(&lookup, "BACKTEST_RESERVE").unwrap_or(defaults.backtest.reserve),
            backtest_min_history: parse(&lookup, "BACKTEST_MIN_HISTORY")
                .unwrap_or(defaults.backtest.min_history),
            simulation: SimulationConfig {
                history_len: parse(&lookup, "SIM_HISTORY_LEN").unwrap_or(100),
                seed: parse(&lookup, "SIM_SEED"),
            },
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn prediction_ttl(&self) -> Duration {
        Duration::from_millis(self.prediction_ttl_ms)
    }

    pub fn backtest(&self) -> BacktestConfig {
        BacktestConfig {
            cap: self.backtest_cap,
            reserve: self.backtest_reserve,
            min_history: self.backtest_min_history,
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            min_records: self.min_records,
            prediction_ttl: self.prediction_ttl(),
            backtest: self.backtest(),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.source, SourceKind::Live);
        assert_eq!(config.api_url, WINGO_API_URL);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(8));
        assert_eq!(config.session(), SessionConfig::default());
        assert_eq!(config.simulation.history_len, 100);
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("DRAW_SOURCE", "Simulated"),
            ("PREDICTION_TTL_MS", "5000"),
            ("MIN_RECORDS", "25"),
            ("BACKTEST_CAP", "30"),
            ("BACKTEST_RESERVE", "15"),
            ("BACKTEST_MIN_HISTORY", "40"),
            ("SIM_SEED", "42"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.source, SourceKind::Simulated);
        assert_eq!(config.simulation.seed, Some(42));

        let session = config.session();
        assert_eq!(session.min_records, 25);
        assert_eq!(session.prediction_ttl, Duration::from_secs(5));
        assert_eq!(
            session.backtest,
            BacktestConfig {
                cap: 30,
                reserve: 15,
                min_history: 40
            }
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[("PORT", "not-a-port"), ("DRAW_SOURCE", "carrier-pigeon")]);
        assert_eq!(config.port, 3001);
        assert_eq!(config.source, SourceKind::Live);
    }

    #[test]
    fn test_source_kind_parse() {
        assert_eq!("live".parse::<SourceKind>(), Ok(SourceKind::Live));
        assert_eq!(" SIM ".parse::<SourceKind>(), Ok(SourceKind::Simulated));
        assert!("".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_source_kind_label_parses_back() {
        for kind in [SourceKind::Live, SourceKind::Simulated] {
            assert_eq!(kind.label().parse::<SourceKind>(), Ok(kind));
        }
    }
}
