//! Prompt criteria: the pass/fail test behind every prompt
//!
//! Each criterion is a pure function of a normalized [`MovieRecord`] and the
//! display title. Missing or malformed input always fails the test.

use super::matching::{fold, name_matches, tokens, words};
use crate::movie::MovieRecord;
use std::collections::{HashMap, HashSet};

/// Original-language codes treated as English.
const ENGLISH_CODES: [&str; 2] = ["eng", "en"];

const SPELLED_NUMBERS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety", "hundred",
    "thousand", "million", "billion", "trillion",
];

/// II through XX; a lone "I" reads as a pronoun.
const ROMAN_NUMERALS: &[&str] = &[
    "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii", "xiv", "xv",
    "xvi", "xvii", "xviii", "xix", "xx",
];

const COLORS: &[&str] = &[
    "red", "blue", "green", "black", "white", "gold", "silver", "pink", "purple", "brown", "gray",
    "grey", "orange", "yellow",
];

/// Words ignored when looking for alliteration.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "of", "for", "to", "with", "and", "or", "but",
];

/// What a movie must satisfy to clear a prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    /// Some credited director matches the name
    Director(&'static str),
    /// Both named people are credited directors
    DirectorTeam([&'static str; 2]),
    /// Some credited actor or actress matches the name
    Actor(&'static str),
    Genre {
        name: &'static str,
        aliases: &'static [&'static str],
    },
    /// Release year within `[decade, decade + 9]`
    Decade(i32),
    ReleasedBefore(i32),
    ReleasedAfter(i32),
    TitlePossessive,
    TitleWordsAtLeast(usize),
    TitleAlliterative,
    TitleStartsWithThe,
    TitleOneWord,
    TitleHasNumber,
    TitleHasColor,
    TitleHasColon,
    RuntimeUnder(u32),
    RuntimeAtLeast(u32),
    WrittenAndDirectedBySame,
    NonEnglish,
    BudgetUnder(f64),
    BudgetOver(f64),
    /// Box office above this multiple of the budget
    GrossAboveMultiple(f64),
    /// Box office below this multiple of the budget
    GrossBelowMultiple(f64),
    OscarWinsAtLeast(usize),
    NoOscarWins,
    AwardWinsAtLeast(usize),
    /// Never satisfied; backs placeholder prompts for unknown ids
    Unsatisfiable,
}

impl Criterion {
    /// Test a movie (and the title it was guessed under) against this criterion.
    pub fn test(&self, movie: &MovieRecord, title: &str) -> bool {
        match *self {
            Criterion::Director(name) => movie.directors().any(|d| name_matches(&d.name, name)),
            Criterion::DirectorTeam(members) => members
                .iter()
                .all(|member| movie.directors().any(|d| name_matches(&d.name, member))),
            Criterion::Actor(name) => movie.performers().any(|p| name_matches(&p.name, name)),
            Criterion::Genre { name, aliases } => genre_matches(movie, name, aliases),
            Criterion::Decade(decade) => movie
                .release_year()
                .is_some_and(|y| (decade..=decade + 9).contains(&y)),
            Criterion::ReleasedBefore(year) => movie.release_year().is_some_and(|y| y < year),
            Criterion::ReleasedAfter(year) => movie.release_year().is_some_and(|y| y > year),
            Criterion::TitlePossessive => is_possessive(title),
            Criterion::TitleWordsAtLeast(n) => words(title).len() >= n,
            Criterion::TitleAlliterative => is_alliterative(title),
            Criterion::TitleStartsWithThe => starts_with_the(title),
            Criterion::TitleOneWord => words(title).len() == 1,
            Criterion::TitleHasNumber => has_number(title),
            Criterion::TitleHasColor => tokens(title).iter().any(|t| COLORS.contains(&t.as_str())),
            Criterion::TitleHasColon => title.contains(':'),
            Criterion::RuntimeUnder(limit) => movie.runtime.is_some_and(|r| r < limit),
            Criterion::RuntimeAtLeast(limit) => movie.runtime.is_some_and(|r| r >= limit),
            Criterion::WrittenAndDirectedBySame => written_and_directed_by_same(movie),
            Criterion::NonEnglish => movie.original_language.as_deref().is_some_and(|lang| {
                let lang = lang.trim();
                !lang.is_empty() && !ENGLISH_CODES.iter().any(|e| lang.eq_ignore_ascii_case(e))
            }),
            Criterion::BudgetUnder(limit) => movie
                .budget_amount()
                .is_some_and(|b| b > 0.0 && b < limit),
            Criterion::BudgetOver(limit) => movie.budget_amount().is_some_and(|b| b > limit),
            Criterion::GrossAboveMultiple(k) => {
                gross_vs_budget(movie, |gross, budget| gross > budget * k)
            }
            Criterion::GrossBelowMultiple(k) => {
                gross_vs_budget(movie, |gross, budget| gross < budget * k)
            }
            Criterion::OscarWinsAtLeast(n) => movie.oscar_wins().is_some_and(|c| c >= n),
            Criterion::NoOscarWins => movie.oscar_wins() == Some(0),
            Criterion::AwardWinsAtLeast(n) => movie.award_wins().is_some_and(|c| c >= n),
            Criterion::Unsatisfiable => false,
        }
    }
}

/// Lowercase with spaces and hyphens removed, so "Sci Fi" equals "Sci-Fi".
fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn genre_matches(movie: &MovieRecord, name: &str, aliases: &[&str]) -> bool {
    let Some(genres) = movie.genres.as_deref() else {
        return false;
    };
    let wanted: Vec<String> = std::iter::once(name)
        .chain(aliases.iter().copied())
        .map(compact)
        .collect();
    genres.iter().any(|g| {
        let g = compact(g);
        wanted.iter().any(|w| g.contains(w.as_str()))
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_possessive(title: &str) -> bool {
    let lower = title.to_lowercase();
    ["'s", "\u{2019}s"].iter().any(|mark| {
        lower.match_indices(*mark).any(|(i, m)| {
            !lower[i + m.len()..]
                .chars()
                .next()
                .is_some_and(is_word_char)
        })
    })
}

fn starts_with_the(title: &str) -> bool {
    let lower = title.to_lowercase();
    lower
        .strip_prefix("the")
        .is_some_and(|rest| !rest.chars().next().is_some_and(is_word_char))
}

fn has_number(title: &str) -> bool {
    title.chars().any(|c| c.is_ascii_digit())
        || tokens(title).iter().any(|t| {
            SPELLED_NUMBERS.contains(&t.as_str()) || ROMAN_NUMERALS.contains(&t.as_str())
        })
}

/// At least two significant words share a first letter.
fn is_alliterative(title: &str) -> bool {
    let letters_only: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    let significant: Vec<&str> = letters_only
        .split_whitespace()
        .filter(|w| !STOPWORDS.contains(w))
        .collect();
    if significant.len() < 2 {
        return false;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for word in &significant {
        if let Some(first) = word.chars().next() {
            *counts.entry(first).or_insert(0) += 1;
        }
    }
    counts.values().any(|&n| n >= 2)
}

fn written_and_directed_by_same(movie: &MovieRecord) -> bool {
    let directors: HashSet<String> = movie.directors().map(|d| fold(&d.name)).collect();
    if directors.is_empty() {
        return false;
    }
    movie.writers().any(|w| directors.contains(&fold(&w.name)))
}

fn gross_vs_budget(movie: &MovieRecord, compare: impl Fn(f64, f64) -> bool) -> bool {
    match (movie.budget_amount(), movie.box_office_amount()) {
        (Some(budget), Some(gross)) if budget > 0.0 => compare(gross, budget),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::{Award, Person};

    fn with_people(people: Vec<Person>) -> MovieRecord {
        MovieRecord {
            people: Some(people),
            ..Default::default()
        }
    }

    fn oscar(won: bool) -> Award {
        Award {
            name: "Academy Awards".to_string(),
            category: None,
            is_winner: won,
        }
    }

    #[test]
    fn test_director_team_requires_both() {
        let team = Criterion::DirectorTeam(["Joel Coen", "Ethan Coen"]);
        let both = with_people(vec![
            Person::new("Joel Coen", "Director"),
            Person::new("Ethan Coen", "Director"),
        ]);
        let one = with_people(vec![Person::new("Joel Coen", "Director")]);
        assert!(team.test(&both, "Fargo"));
        assert!(!team.test(&one, "Blood Simple"));
    }

    #[test]
    fn test_director_ignores_other_roles() {
        let nolan = Criterion::Director("Christopher Nolan");
        let writer_only = with_people(vec![Person::new("Christopher Nolan", "Writer")]);
        let directed = with_people(vec![Person::new("christopher  nolan", "Director")]);
        assert!(!nolan.test(&writer_only, "Memento"));
        assert!(nolan.test(&directed, "Memento"));
        assert!(!nolan.test(&MovieRecord::default(), "Memento"));
    }

    #[test]
    fn test_actor_matches_actress() {
        let streep = Criterion::Actor("Meryl Streep");
        let movie = with_people(vec![Person::new("Meryl Streep", "Actress")]);
        assert!(streep.test(&movie, "Doubt"));
    }

    #[test]
    fn test_genre_aliases() {
        let scifi = Criterion::Genre {
            name: "Sci-Fi",
            aliases: &["Science Fiction"],
        };
        let animation = Criterion::Genre {
            name: "Animation",
            aliases: &["Anime"],
        };
        let movie = MovieRecord {
            genres: Some(vec!["Science  Fiction".to_string(), "Anime".to_string()]),
            ..Default::default()
        };
        assert!(scifi.test(&movie, "Akira"));
        assert!(animation.test(&movie, "Akira"));

        let sci_fi_spaced = MovieRecord {
            genres: Some(vec!["sci fi".to_string()]),
            ..Default::default()
        };
        assert!(scifi.test(&sci_fi_spaced, "Alien"));
        assert!(!animation.test(&MovieRecord::default(), "Akira"));
    }

    #[test]
    fn test_decade_bounds() {
        let nineties = Criterion::Decade(1990);
        let movie = |year: &str| MovieRecord {
            year: Some(year.to_string()),
            ..Default::default()
        };
        assert!(nineties.test(&movie("1990"), ""));
        assert!(nineties.test(&movie("1999"), ""));
        assert!(!nineties.test(&movie("2000"), ""));
        assert!(!nineties.test(&MovieRecord::default(), ""));
    }

    #[test]
    fn test_title_number_forms() {
        let movie = MovieRecord::default();
        assert!(Criterion::TitleHasNumber.test(&movie, "Se7en"));
        assert!(Criterion::TitleHasNumber.test(&movie, "Ocean's Eleven"));
        assert!(Criterion::TitleHasNumber.test(&movie, "Rocky IV"));
        assert!(Criterion::TitleHasNumber.test(&movie, "Malcolm X"));
        assert!(!Criterion::TitleHasNumber.test(&movie, "Heat"));
        assert!(!Criterion::TitleHasNumber.test(&movie, "I, Tonya"));
    }

    #[test]
    fn test_title_shapes() {
        let movie = MovieRecord::default();
        assert!(Criterion::TitleStartsWithThe.test(&movie, "The Thing"));
        assert!(!Criterion::TitleStartsWithThe.test(&movie, "Them!"));
        assert!(Criterion::TitlePossessive.test(&movie, "Schindler's List"));
        assert!(!Criterion::TitlePossessive.test(&movie, "Its Complicated"));
        assert!(Criterion::TitleHasColon.test(&movie, "Mission: Impossible"));
        assert!(Criterion::TitleHasColor.test(&movie, "The Green Mile"));
        assert!(!Criterion::TitleHasColor.test(&movie, "Greenberg"));
        assert!(!Criterion::TitleOneWord.test(&movie, "   "));
    }

    #[test]
    fn test_alliteration() {
        let movie = MovieRecord::default();
        assert!(Criterion::TitleAlliterative.test(&movie, "Pulp Fiction Party"));
        assert!(Criterion::TitleAlliterative.test(&movie, "Dirty Dancing"));
        assert!(!Criterion::TitleAlliterative.test(&movie, "The Godfather"));
        assert!(!Criterion::TitleAlliterative.test(&movie, "Top Gun"));
    }

    #[test]
    fn test_runtime_missing_fails_both() {
        let missing = MovieRecord::default();
        assert!(!Criterion::RuntimeUnder(90).test(&missing, ""));
        assert!(!Criterion::RuntimeAtLeast(150).test(&missing, ""));

        let short = MovieRecord {
            runtime: Some(81),
            ..Default::default()
        };
        assert!(Criterion::RuntimeUnder(90).test(&short, ""));
    }

    #[test]
    fn test_written_and_directed() {
        let same = with_people(vec![
            Person::new("Greta Gerwig", "Director"),
            Person::new("greta gerwig", "Writer"),
        ]);
        let different = with_people(vec![
            Person::new("Jonathan Demme", "Director"),
            Person::new("Ted Tally", "Writer"),
        ]);
        assert!(Criterion::WrittenAndDirectedBySame.test(&same, ""));
        assert!(!Criterion::WrittenAndDirectedBySame.test(&different, ""));
    }

    #[test]
    fn test_language() {
        let lang = |code: &str| MovieRecord {
            original_language: Some(code.to_string()),
            ..Default::default()
        };
        assert!(Criterion::NonEnglish.test(&lang("jpn"), ""));
        assert!(!Criterion::NonEnglish.test(&lang("eng"), ""));
        assert!(!Criterion::NonEnglish.test(&MovieRecord::default(), ""));
    }

    #[test]
    fn test_money_needs_positive_budget() {
        let cheap = MovieRecord {
            budget: Some("$500,000".to_string()),
            ..Default::default()
        };
        assert!(Criterion::BudgetUnder(1_000_000.0).test(&cheap, ""));
        assert!(!Criterion::GrossAboveMultiple(10.0).test(&cheap, ""));
        assert!(!Criterion::GrossBelowMultiple(2.0).test(&cheap, ""));

        let zero = MovieRecord {
            budget: Some("0".to_string()),
            box_office: Some("$10".to_string()),
            ..Default::default()
        };
        assert!(!Criterion::BudgetUnder(1_000_000.0).test(&zero, ""));
        assert!(!Criterion::GrossAboveMultiple(10.0).test(&zero, ""));

        let hit = MovieRecord {
            budget: Some("$7m".to_string()),
            box_office: Some("$100m".to_string()),
            ..Default::default()
        };
        assert!(Criterion::GrossAboveMultiple(10.0).test(&hit, ""));
        assert!(!Criterion::GrossBelowMultiple(2.0).test(&hit, ""));
    }

    #[test]
    fn test_awards() {
        let two = MovieRecord {
            awards: Some(vec![oscar(true), oscar(true), oscar(false)]),
            ..Default::default()
        };
        assert!(Criterion::OscarWinsAtLeast(1).test(&two, ""));
        assert!(Criterion::OscarWinsAtLeast(2).test(&two, ""));
        assert!(!Criterion::NoOscarWins.test(&two, ""));

        let none = MovieRecord {
            awards: Some(vec![oscar(false)]),
            ..Default::default()
        };
        assert!(Criterion::NoOscarWins.test(&none, ""));
        assert!(!Criterion::NoOscarWins.test(&MovieRecord::default(), ""));
    }

    #[test]
    fn test_unsatisfiable() {
        let everything = with_people(vec![Person::new("Tom Hanks", "Actor")]);
        assert!(!Criterion::Unsatisfiable.test(&everything, "The Terminal"));
    }
}
