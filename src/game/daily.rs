//! Daily seed and the daily-prompt wire shape
//!
//! Every player on the same UTC date gets the same seed, and so the same board.

use super::board::generate_prompts;
use crate::catalog::{Catalog, Prompt};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const SEED_FORMAT: &str = "%Y-%m-%d";

/// UTC calendar date of `now` as `YYYY-MM-DD`.
pub fn daily_seed(now: DateTime<Utc>) -> String {
    now.format(SEED_FORMAT).to_string()
}

/// Storage key for a day's game.
pub fn day_key(seed: &str) -> String {
    format!("daily-game-{}", seed)
}

/// Whether `s` is a real calendar date written as `YYYY-MM-DD`.
pub fn is_date_seed(s: &str) -> bool {
    NaiveDate::parse_from_str(s, SEED_FORMAT)
        .is_ok_and(|date| date.format(SEED_FORMAT).to_string() == s)
}

/// A prompt as it travels between server and client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRef {
    pub id: String,
    pub label: String,
}

impl From<&Prompt> for PromptRef {
    fn from(prompt: &Prompt) -> Self {
        PromptRef {
            id: prompt.id().to_string(),
            label: prompt.label().to_string(),
        }
    }
}

/// `{ seed, prompts: [{ id, label }] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPrompts {
    pub seed: String,
    pub prompts: Vec<PromptRef>,
}

impl DailyPrompts {
    /// Generate the day's board for `seed`.
    pub fn generate(catalog: &Catalog, seed: &str) -> Self {
        DailyPrompts {
            seed: seed.to_string(),
            prompts: generate_prompts(catalog, seed)
                .iter()
                .map(PromptRef::from)
                .collect(),
        }
    }

    /// Rebuild full prompts, turning unknown ids into placeholders.
    pub fn hydrate(&self, catalog: &Catalog) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|p| catalog.hydrate(&p.id, Some(&p.label)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::game::board::BOARD_SIZE;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_daily_seed_dates() {
        assert_eq!(daily_seed(at(0)), "1970-01-01");
        assert_eq!(daily_seed(at(1_700_000_000)), "2023-11-14");
        // 2024-02-29 23:59:59 UTC
        assert_eq!(daily_seed(at(1_709_251_199)), "2024-02-29");
        assert_eq!(daily_seed(at(1_709_251_200)), "2024-03-01");
        assert_eq!(daily_seed(at(-1)), "1969-12-31");
    }

    #[test]
    fn test_day_key() {
        assert_eq!(day_key("2024-05-01"), "daily-game-2024-05-01");
    }

    #[test]
    fn test_is_date_seed() {
        assert!(is_date_seed("2024-05-01"));
        assert!(!is_date_seed("2024-5-01"));
        assert!(!is_date_seed("2024/05/01"));
        assert!(!is_date_seed("tomorrow!!"));
    }

    #[test]
    fn test_impossible_dates_rejected() {
        assert!(!is_date_seed("2024-13-45"));
        assert!(!is_date_seed("2023-02-29"));
        assert!(!is_date_seed("2024-04-31"));
        assert!(is_date_seed("2024-02-29"));
    }

    #[test]
    fn test_generate_then_hydrate() {
        let daily = DailyPrompts::generate(catalog(), "2024-05-01");
        assert_eq!(daily.seed, "2024-05-01");
        assert_eq!(daily.prompts.len(), BOARD_SIZE);

        let prompts = daily.hydrate(catalog());
        assert!(prompts.iter().all(|p| !p.is_placeholder()));
        let labels: Vec<&str> = prompts.iter().map(|p| p.label()).collect();
        let wire: Vec<&str> = daily.prompts.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, wire);
    }

    #[test]
    fn test_wire_shape() {
        let json = concat!(
            r#"{"seed":"2024-05-01","prompts":["#,
            r#"{"id":"actor-tom-hanks","label":"Stars Tom Hanks"},"#,
            r#"{"id":"future-prompt","label":"Shot on film"}]}"#,
        );
        let daily: DailyPrompts = serde_json::from_str(json).unwrap();
        let prompts = daily.hydrate(catalog());
        assert!(!prompts[0].is_placeholder());
        assert!(prompts[1].is_placeholder());
        assert_eq!(prompts[1].label(), "Shot on film");
        assert_eq!(serde_json::to_string(&daily).unwrap(), json);
    }
}
