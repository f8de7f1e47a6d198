//! Prompt catalog
//!
//! Every prompt the board can ever show, grouped into weighted categories.
//! The catalog is built once on first use and never mutated afterwards.
//!
//! Category order is part of the sampling contract: director, actor,
//! genre, decade, static. Reordering changes which prompt a given seed picks.

pub mod criteria;
pub mod matching;
pub mod names;

use crate::movie::MovieRecord;
use criteria::Criterion;
use matching::slug;
use names::{genre_aliases, ACTORS, DECADES, DIRECTORS, DIRECTOR_TEAMS, GENRES};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no prompts")]
    Empty,
}

/// One board challenge: a label plus a pass/fail test against a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    id: String,
    label: String,
    criterion: Criterion,
}

impl Prompt {
    pub fn new(id: impl Into<String>, label: impl Into<String>, criterion: Criterion) -> Self {
        Prompt {
            id: id.into(),
            label: label.into(),
            criterion,
        }
    }

    /// A label-only prompt that no movie can satisfy.
    pub fn placeholder(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, Criterion::Unsatisfiable)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn is_placeholder(&self) -> bool {
        self.criterion == Criterion::Unsatisfiable
    }

    /// Does `movie`, guessed under `title`, satisfy this prompt?
    pub fn test(&self, movie: &MovieRecord, title: &str) -> bool {
        self.criterion.test(movie, title)
    }
}

/// Catalog partitions, in sampling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Director,
    Actor,
    Genre,
    Decade,
    Static,
}

impl CategoryKind {
    /// All kinds in sampling order.
    pub const ALL: [CategoryKind; 5] = [
        CategoryKind::Director,
        CategoryKind::Actor,
        CategoryKind::Genre,
        CategoryKind::Decade,
        CategoryKind::Static,
    ];

    /// Default sampling weight.
    pub fn weight(self) -> u32 {
        match self {
            CategoryKind::Director => 2,
            CategoryKind::Actor => 3,
            CategoryKind::Genre => 3,
            CategoryKind::Decade => 2,
            CategoryKind::Static => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryKind::Director => "director",
            CategoryKind::Actor => "actor",
            CategoryKind::Genre => "genre",
            CategoryKind::Decade => "decade",
            CategoryKind::Static => "static",
        }
    }
}

/// A weighted group of prompts.
#[derive(Debug, Clone)]
pub struct Category {
    kind: CategoryKind,
    weight: u32,
    prompts: Vec<Prompt>,
}

impl Category {
    /// Category with the kind's default weight.
    pub fn new(kind: CategoryKind, prompts: Vec<Prompt>) -> Self {
        Self::with_weight(kind, kind.weight(), prompts)
    }

    pub fn with_weight(kind: CategoryKind, weight: u32, prompts: Vec<Prompt>) -> Self {
        Category {
            kind,
            weight,
            prompts,
        }
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }
}

/// The full read-only prompt table. Never empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    /// id -> (category index, prompt index)
    index: HashMap<String, (usize, usize)>,
}

/// Process-wide catalog, built on first use.
static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

/// The shared game catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    /// Build the game catalog from the source lists.
    pub fn build() -> Self {
        Self::assemble(vec![
            Category::new(
                CategoryKind::Director,
                DIRECTORS.iter().copied().map(director_prompt).collect(),
            ),
            Category::new(
                CategoryKind::Actor,
                ACTORS.iter().copied().map(actor_prompt).collect(),
            ),
            Category::new(
                CategoryKind::Genre,
                GENRES.iter().copied().map(genre_prompt).collect(),
            ),
            Category::new(
                CategoryKind::Decade,
                DECADES.iter().copied().map(decade_prompt).collect(),
            ),
            Category::new(CategoryKind::Static, static_prompts()),
        ])
    }

    /// Assemble a catalog from categories, keeping the first prompt for any repeated id.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let catalog = Self::assemble(categories);
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    fn assemble(categories: Vec<Category>) -> Self {
        let mut seen = HashSet::new();
        let categories: Vec<Category> = categories
            .into_iter()
            .map(|mut category| {
                category.prompts.retain(|p| seen.insert(p.id.clone()));
                category
            })
            .collect();

        let mut index = HashMap::new();
        for (ci, category) in categories.iter().enumerate() {
            for (pi, prompt) in category.prompts.iter().enumerate() {
                index.insert(prompt.id.clone(), (ci, pi));
            }
        }

        Catalog { categories, index }
    }

    /// Categories in sampling order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        let (ci, pi) = *self.index.get(id)?;
        Some(&self.categories[ci].prompts[pi])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Every prompt, in category order.
    pub fn iter(&self) -> impl Iterator<Item = &Prompt> {
        self.categories.iter().flat_map(|c| c.prompts.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rebuild a prompt from its id.
    ///
    /// Unknown ids become an unsatisfiable placeholder carrying `label`
    /// (or the id itself) so a board served by a newer catalog still renders.
    pub fn hydrate(&self, id: &str, label: Option<&str>) -> Prompt {
        match self.get(id) {
            Some(prompt) => prompt.clone(),
            None => {
                warn!(prompt_id = id, "unknown prompt id, using placeholder");
                Prompt::placeholder(id, label.unwrap_or(id))
            }
        }
    }
}

fn director_prompt(director: &'static str) -> Prompt {
    if let Some(team) = DIRECTOR_TEAMS.iter().find(|t| t.entry == director) {
        return Prompt::new(
            format!("director-{}", team.slug),
            team.label,
            Criterion::DirectorTeam(team.members),
        );
    }
    Prompt::new(
        format!("director-{}", slug(director)),
        format!("Directed by {}", director),
        Criterion::Director(director),
    )
}

fn actor_prompt(actor: &'static str) -> Prompt {
    Prompt::new(
        format!("actor-{}", slug(actor)),
        format!("Stars {}", actor),
        Criterion::Actor(actor),
    )
}

fn genre_prompt(genre: &'static str) -> Prompt {
    Prompt::new(
        format!("genre-{}", slug(genre)),
        format!("Genre: {}", genre),
        Criterion::Genre {
            name: genre,
            aliases: genre_aliases(genre),
        },
    )
}

fn decade_prompt(decade: i32) -> Prompt {
    Prompt::new(
        format!("year-{}s", decade),
        format!("Released in the {}s", decade),
        Criterion::Decade(decade),
    )
}

/// Attribute prompts: release era, title shape, runtime, credits, language,
/// money, and awards.
#[rustfmt::skip]
const STATIC_PROMPTS: &[(&str, &str, Criterion)] = &[
    ("year-before-2000", "Released before 2000", Criterion::ReleasedBefore(2000)),
    ("year-after-2000", "Released after 2000", Criterion::ReleasedAfter(2000)),
    ("year-after-2020", "Released after 2020", Criterion::ReleasedAfter(2020)),
    ("year-before-1970", "Released before 1970", Criterion::ReleasedBefore(1970)),
    ("title-possessive", "Title is possessive ('s)", Criterion::TitlePossessive),
    ("title-long-5", "Title is 5 words or longer", Criterion::TitleWordsAtLeast(5)),
    ("title-alliterative", "Alliterative title", Criterion::TitleAlliterative),
    ("starts-the", "Title starts with \"The\"", Criterion::TitleStartsWithThe),
    ("one-word", "One-word title", Criterion::TitleOneWord),
    ("has-number", "Title contains a number", Criterion::TitleHasNumber),
    ("has-color", "Title contains a color", Criterion::TitleHasColor),
    ("has-colon", "Has a subtitle (colon)", Criterion::TitleHasColon),
    ("runtime-short", "Runtime < 90 min", Criterion::RuntimeUnder(90)),
    ("runtime-epic", "Runtime \u{2265} 150 min", Criterion::RuntimeAtLeast(150)),
    ("written-and-directed-same", "Written & Directed by same person", Criterion::WrittenAndDirectedBySame),
    ("lang-non-english", "Not in the English language", Criterion::NonEnglish),
    ("budget-under-1m", "Budget < $1 million", Criterion::BudgetUnder(1_000_000.0)),
    ("budget-over-100m", "Budget > $100 million", Criterion::BudgetOver(100_000_000.0)),
    ("box-office-10x", "Grossed > 10x budget", Criterion::GrossAboveMultiple(10.0)),
    ("box-office-flop", "Grossed < 2x budget", Criterion::GrossBelowMultiple(2.0)),
    ("award-oscar-winner", "Won at least one Oscar", Criterion::OscarWinsAtLeast(1)),
    ("award-multi-oscar-winner", "Won multiple Oscars", Criterion::OscarWinsAtLeast(2)),
    ("award-no-oscars", "Won no Oscars", Criterion::NoOscarWins),
    ("award-10-plus", "Won 10+ major awards", Criterion::AwardWinsAtLeast(10)),
];

fn static_prompts() -> Vec<Prompt> {
    STATIC_PROMPTS
        .iter()
        .map(|(id, label, criterion)| Prompt::new(*id, *label, *criterion))
        .collect()
}
