//! Movie records as seen by prompt predicates
//!
//! This module provides:
//! - The normalized `MovieRecord` shape every predicate reads
//! - Release-year derivation from the year field or release date
//! - Free-form money parsing (`$1,200,000`, `12.5m`, `300k`)
//! - Boundary normalization of loose metadata payloads (see [`normalize`])

pub mod normalize;

use serde::{Deserialize, Deserializer, Serialize};

/// Award name that counts as an Oscar.
pub const ACADEMY_AWARDS: &str = "Academy Awards";

/// A credited person on a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    /// Role classification such as "Director", "Writer", "Actor", "Actress"
    #[serde(default)]
    pub people_type: Option<String>,
    /// Character played, when known
    #[serde(default)]
    pub role: Option<String>,
}

impl Person {
    /// Build a person with a role classification (mostly for tests and fixtures).
    pub fn new(name: &str, people_type: &str) -> Self {
        Person {
            name: name.to_string(),
            people_type: Some(people_type.to_string()),
            role: None,
        }
    }

    fn kind_contains(&self, needle: &str) -> bool {
        self.people_type
            .as_deref()
            .map(|t| t.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    pub fn is_director(&self) -> bool {
        self.kind_contains("director")
    }

    pub fn is_writer(&self) -> bool {
        self.kind_contains("writer")
    }

    /// Actor or actress credit.
    pub fn is_performer(&self) -> bool {
        self.kind_contains("actor") || self.kind_contains("actress")
    }
}

/// One award nomination or win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_winner: bool,
}

impl Award {
    pub fn is_academy_award(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(ACADEMY_AWARDS)
    }
}

/// Normalized movie metadata.
///
/// Every field is optional; predicates treat a missing field as failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub people: Option<Vec<Person>>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub box_office: Option<String>,
    #[serde(default)]
    pub awards: Option<Vec<Award>>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl MovieRecord {
    /// Release year from the explicit year field, falling back to the
    /// release date. Both use their first four characters.
    pub fn release_year(&self) -> Option<i32> {
        self.year
            .as_deref()
            .and_then(leading_year)
            .or_else(|| self.release_date.as_deref().and_then(leading_year))
    }

    /// All credited people, empty when the list is absent.
    pub fn people(&self) -> &[Person] {
        self.people.as_deref().unwrap_or(&[])
    }

    pub fn directors(&self) -> impl Iterator<Item = &Person> {
        self.people().iter().filter(|p| p.is_director())
    }

    pub fn writers(&self) -> impl Iterator<Item = &Person> {
        self.people().iter().filter(|p| p.is_writer())
    }

    pub fn performers(&self) -> impl Iterator<Item = &Person> {
        self.people().iter().filter(|p| p.is_performer())
    }

    pub fn budget_amount(&self) -> Option<f64> {
        self.budget.as_deref().and_then(parse_money)
    }

    pub fn box_office_amount(&self) -> Option<f64> {
        self.box_office.as_deref().and_then(parse_money)
    }

    /// Number of winning Academy Awards entries, `None` when the awards list is absent.
    pub fn oscar_wins(&self) -> Option<usize> {
        self.awards.as_ref().map(|awards| {
            awards
                .iter()
                .filter(|a| a.is_winner && a.is_academy_award())
                .count()
        })
    }

    /// Number of winning entries of any kind, `None` when the awards list is absent.
    pub fn award_wins(&self) -> Option<usize> {
        self.awards
            .as_ref()
            .map(|awards| awards.iter().filter(|a| a.is_winner).count())
    }
}

fn leading_year(raw: &str) -> Option<i32> {
    let head: String = raw.chars().take(4).collect();
    head.trim().parse().ok()
}

/// Parse a free-form money string into dollars.
///
/// Strips `$` and thousands separators, honors a trailing `k`/`m`/`b`
/// multiplier, then reads the leading number. Empty or unparseable input
/// yields `None`, which every threshold predicate treats as failing.
pub fn parse_money(raw: &str) -> Option<f64> {
    let mut clean: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    let multiplier = match clean.chars().last() {
        Some('k') => 1_000.0,
        Some('m') => 1_000_000.0,
        Some('b') => 1_000_000_000.0,
        _ => 1.0,
    };
    if multiplier != 1.0 {
        clean.pop();
    }

    leading_number(clean.trim()).map(|n| n * multiplier)
}

/// Longest numeric prefix of `s`, the way a lenient float reader would take it.
fn leading_number(s: &str) -> Option<f64> {
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(s.len());
    let candidate = &s[..end];
    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}
