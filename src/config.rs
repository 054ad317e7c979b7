// src/config.rs
// Environment-driven configuration. Every key is optional and falls back to a
// default, so the binary runs with no .env at all.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;

pub const DEFAULT_RSS_URL: &str = "https://news.google.com/rss?hl=en-IN&gl=IN&ceid=IN:en";
pub const DEFAULT_CLASSIFY_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Alarm keywords matched as substrings of normalized titles, and also sent
/// to the remote classifier as candidate labels.
pub const ALARM_KEYWORDS: &[&str] = &[
    "earthquake",
    "war",
    "atomic",
    "nuclear",
    "blast",
    "explosion",
    "terrorist",
    "attack",
    "murder",
    "kill",
    "homicide",
    "riot",
    "violence",
    "fire",
    "flood",
    "storm",
    "hurricane",
    "tornado",
    "landslide",
    "accident",
    "robbery",
    "theft",
    "cyber attack",
    "bomb",
    "hostage",
    "shooting",
    "curfew",
    "evacuation",
    "collapse",
    "outbreak",
    "disease",
    "pandemic",
];

/// Alternate spellings/scripts recognized per city. Keys are lowercase.
static CITY_SYNONYMS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    m.insert(
        "delhi",
        &["delhi", "new delhi", "ndl", "ncr", "दिल्ली", "नई दिल्ली", "dilli"][..],
    );
    m.insert("mumbai", &["mumbai", "bombay", "मुंबई"][..]);
    m.insert("bengaluru", &["bengaluru", "bangalore", "बेंगलुरु"][..]);
    m
});

/// Aliases for a configured city; unknown cities match only their own
/// lowercase name.
pub fn city_aliases(city: &str) -> Vec<String> {
    let c = city.trim().to_lowercase();
    match CITY_SYNONYMS.get(c.as_str()) {
        Some(aliases) => aliases.iter().map(|a| a.to_string()).collect(),
        None => vec![c],
    }
}

/// Remote zero-shot classification settings (HuggingFace inference API by
/// default). `enabled` alone is not enough: calls also require a key.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub enabled: bool,
    pub api_key: String,
    pub api_url: String,
    pub score_threshold: f32,
    pub timeout: Duration,
    pub max_per_cycle: u32,
}

impl RemoteConfig {
    pub fn is_active(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rss_url: String,
    pub city: String,
    pub refresh_interval: Duration,
    pub show_cycle_summary: bool,
    pub remote: RemoteConfig,
    pub sound_enable: bool,
    pub sound_file: String,
    pub seen_capacity: usize,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            rss_url: env_str("RSS_URL", DEFAULT_RSS_URL),
            city: env_str("USER_CITY", "Delhi").trim().to_string(),
            refresh_interval: Duration::from_secs(env_parse("REFRESH_INTERVAL", 180u64)),
            show_cycle_summary: env_flag("SHOW_EVERY_CYCLE_SUMMARY", true),
            remote: RemoteConfig {
                enabled: env_flag("HF_ENABLE", true),
                api_key: env_str("HF_API_KEY", "").trim().to_string(),
                api_url: env_str("HF_API_URL", DEFAULT_CLASSIFY_URL),
                score_threshold: env_parse("HF_SCORE_THRESHOLD", 0.50f32),
                timeout: Duration::from_secs(env_parse("HF_TIMEOUT", 12u64)),
                max_per_cycle: env_parse("HF_MAX_PER_CYCLE", 20u32),
            },
            sound_enable: env_flag("SOUND_ENABLE", true),
            sound_file: env_str("SOUND_FILE", "").trim().to_string(),
            seen_capacity: env_parse("SEEN_CAPACITY", 1000usize),
            port: env_parse("PORT", 5000u16),
        }
    }
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// "1" is true, anything else present is false, absent uses the default.
fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => v == "1",
        Err(_) => default,
    }
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
