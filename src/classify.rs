// src/classify.rs
// Relevance rules for one title, strict precedence: city alias match, then
// alarm keyword match, then (budget permitting) remote zero-shot
// classification, else "general".

use crate::config::city_aliases;
use crate::remote::ZeroShotClassifier;

pub const CATEGORY_CITY: &str = "city-priority";
pub const CATEGORY_KEYWORD: &str = "keyword";
pub const CATEGORY_GENERAL: &str = "general";

const CITY_SCORE: f32 = 1.0;
const KEYWORD_SCORE: f32 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    pub category: String,
    pub score: f32,
    pub is_important: bool,
}

/// Lowercase + trim, with HTML entities decoded first so feed titles like
/// `S&amp;P` match what a human reads.
pub fn normalize_title(s: &str) -> String {
    html_escape::decode_html_entities(s).trim().to_lowercase()
}

pub fn title_matches_city(title: &str, city: &str) -> bool {
    let t = normalize_title(title);
    city_aliases(city).iter().any(|alias| t.contains(alias.as_str()))
}

pub fn keyword_prefilter(title: &str, keywords: &[&str]) -> bool {
    let t = normalize_title(title);
    keywords.iter().any(|k| t.contains(k))
}

/// Classify one title. First match wins; no fallthrough. The remote rule
/// consumes one unit of `budget` per attempt, success or failure, and is
/// skipped entirely when `remote` is `None` (disabled/unconfigured) or the
/// budget is exhausted.
pub async fn classify_title(
    title: &str,
    city: &str,
    keywords: &[&str],
    remote: Option<&dyn ZeroShotClassifier>,
    threshold: f32,
    budget: &mut u32,
) -> Relevance {
    if title_matches_city(title, city) {
        return Relevance {
            category: CATEGORY_CITY.to_string(),
            score: CITY_SCORE,
            is_important: true,
        };
    }

    if keyword_prefilter(title, keywords) {
        // Forced important regardless of how KEYWORD_SCORE compares to the
        // configured threshold.
        return Relevance {
            category: CATEGORY_KEYWORD.to_string(),
            score: KEYWORD_SCORE,
            is_important: true,
        };
    }

    let mut label: Option<String> = None;
    let mut score: f32 = 0.0;
    if let Some(client) = remote {
        if *budget > 0 {
            *budget -= 1;
            if let Some(v) = client.classify(title, keywords).await {
                label = Some(v.label);
                score = v.score;
            }
        }
    }

    let category = label.unwrap_or_else(|| CATEGORY_GENERAL.to_string());
    Relevance {
        is_important: score >= threshold,
        category,
        score,
    }
}
