//! Boundary normalization of loose metadata payloads
//!
//! Upstream detail payloads disagree on shape: genres arrive as strings or
//! `{ name }` objects, people carry their role under several keys, and the
//! release date may live in `first_release`, `first_air_time`, or
//! `releaseDate`. Everything is folded into one [`MovieRecord`] here so the
//! predicates only ever see the normalized form. Malformed fields become
//! `None`; normalization never fails.

use super::{Award, MovieRecord, Person};
use serde_json::Value;

/// Upstream numeric people type used for cast members.
const ACTOR_TYPE_CODE: i64 = 3;

/// Normalize a raw detail payload into a [`MovieRecord`].
pub fn normalize(payload: &Value) -> MovieRecord {
    let release_date = release_date(payload);
    let year = match payload.get("year") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => release_date
            .as_deref()
            .filter(|d| d.len() >= 4 && d.chars().take(4).all(|c| c.is_ascii_digit()))
            .map(|d| d[..4].to_string()),
    };

    MovieRecord {
        id: payload.get("id").and_then(as_i64),
        name: title(payload),
        year,
        release_date,
        runtime: payload.get("runtime").and_then(runtime_minutes),
        genres: payload.get("genres").and_then(genres),
        people: people(payload),
        original_language: string_field(payload, "originalLanguage"),
        budget: money_field(payload, "budget"),
        box_office: money_field(payload, "boxOffice"),
        awards: payload.get("awards").and_then(awards),
        poster_url: string_field(payload, "posterUrl")
            .or_else(|| string_field(payload, "image"))
            .or_else(|| string_field(payload, "image_url")),
    }
}

/// English translation first, then the upstream name.
fn title(payload: &Value) -> String {
    payload
        .get("translations")
        .and_then(|t| t.get("eng"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| payload.get("name").and_then(Value::as_str))
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn release_date(payload: &Value) -> Option<String> {
    payload
        .get("first_release")
        .and_then(|fr| fr.get("date"))
        .and_then(Value::as_str)
        .or_else(|| payload.get("first_air_time").and_then(Value::as_str))
        .or_else(|| payload.get("releaseDate").and_then(Value::as_str))
        .map(str::to_string)
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn runtime_minutes(value: &Value) -> Option<u32> {
    let minutes = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (minutes.is_finite() && minutes >= 0.0).then(|| minutes.round() as u32)
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn money_field(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn genres(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|g| match g {
                Value::String(s) => Some(s.clone()),
                Value::Object(_) => g.get("name").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .filter(|g| !g.is_empty())
            .collect(),
    )
}

fn awards(value: &Value) -> Option<Vec<Award>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|a| serde_json::from_value::<Award>(a.clone()).ok())
            .collect(),
    )
}

/// Merge `people` and `characters`, deduplicating on name + role type.
fn people(payload: &Value) -> Option<Vec<Person>> {
    let base = payload.get("people").and_then(Value::as_array);
    let extra = payload.get("characters").and_then(Value::as_array);
    if base.is_none() && extra.is_none() {
        return None;
    }

    let mut merged: Vec<Person> = Vec::new();
    for raw in base.into_iter().chain(extra).flatten() {
        let Some(person) = person(raw) else {
            continue;
        };
        let duplicate = merged.iter().any(|p| {
            p.name == person.name
                && p.people_type.as_deref().map(str::to_lowercase)
                    == person.people_type.as_deref().map(str::to_lowercase)
        });
        if !duplicate {
            merged.push(person);
        }
    }
    Some(merged)
}

fn person(raw: &Value) -> Option<Person> {
    let name = raw
        .get("personName")
        .and_then(Value::as_str)
        .or_else(|| raw.get("person").and_then(|p| p.get("name")).and_then(Value::as_str))
        .or_else(|| raw.get("name").and_then(Value::as_str))
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    let text = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let people_type = text("peopleType")
        .or_else(|| text("type"))
        .or_else(|| text("job"))
        .or_else(|| text("category"))
        .or_else(|| {
            (raw.get("type").and_then(Value::as_i64) == Some(ACTOR_TYPE_CODE))
                .then(|| "Actor".to_string())
        });

    Some(Person {
        name: name.to_string(),
        people_type,
        role: text("role"),
    })
}
