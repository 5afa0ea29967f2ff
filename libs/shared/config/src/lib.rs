use std::env;
use tracing::warn;

/// Scheduling defaults shared by every cell. Values come from the
/// environment; anything missing falls back to the clinic defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub slot_interval_minutes: u32,
    pub limited_slot_threshold: usize,
    pub simulated_latency_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT", 3000),
            slot_interval_minutes: parse_env("SLOT_INTERVAL_MINUTES", 30),
            limited_slot_threshold: parse_env("LIMITED_SLOT_THRESHOLD", 5),
            simulated_latency_ms: parse_env("SIMULATED_LATENCY_MS", 0),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            slot_interval_minutes: 30,
            limited_slot_threshold: 5,
            simulated_latency_ms: 0,
        }
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value ({}), using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
