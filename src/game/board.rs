//! The 16-cell board

use super::sampler::Sampler;
use super::seed::shuffle_rng;
use crate::catalog::{Catalog, Prompt};
use crate::movie::MovieRecord;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Number of cells on a board
pub const BOARD_SIZE: usize = 16;

/// The movie that satisfied a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledBy {
    pub movie_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// One board position
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    prompt: Prompt,
    filled_by: Option<FilledBy>,
}

impl Cell {
    pub fn new(prompt: Prompt) -> Self {
        Cell {
            prompt,
            filled_by: None,
        }
    }

    pub fn with_fill(prompt: Prompt, filled_by: Option<FilledBy>) -> Self {
        Cell { prompt, filled_by }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn filled_by(&self) -> Option<&FilledBy> {
        self.filled_by.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.filled_by.is_some()
    }
}

/// A prompt swapped in for a cleared cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub index: usize,
    pub cleared_id: String,
    pub prompt_id: String,
    /// Reroll counter value the draw was seeded with
    pub reroll: u32,
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Generate the board for `seed`: 16 distinct draws, then a seeded shuffle.
    pub fn generate(catalog: &Catalog, seed: &str) -> Self {
        Self::from_prompts(generate_prompts(catalog, seed))
    }

    pub fn from_prompts(prompts: Vec<Prompt>) -> Self {
        Self::from_cells(prompts.into_iter().map(Cell::new).collect())
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ids of every prompt currently on the board.
    pub fn prompt_ids(&self) -> HashSet<String> {
        self.cells
            .iter()
            .map(|c| c.prompt.id().to_string())
            .collect()
    }

    pub fn has_duplicates(&self) -> bool {
        self.prompt_ids().len() != self.cells.len()
    }

    /// Indices of filled cells, in board order.
    pub fn filled_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_filled())
            .map(|(i, _)| i)
            .collect()
    }

    /// Mark every unfilled cell `movie` satisfies. Returns the marked indices.
    pub fn fill_matching(
        &mut self,
        movie: &MovieRecord,
        title: &str,
        by: &FilledBy,
    ) -> Vec<usize> {
        let mut marked = Vec::new();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if !cell.is_filled() && cell.prompt.test(movie, title) {
                cell.filled_by = Some(by.clone());
                marked.push(i);
            }
        }
        marked
    }

    /// Swap the prompt at `index` for a fresh draw that duplicates nothing on the board.
    ///
    /// The draw is seeded by the current `reroll_count`, which is then bumped
    /// whether or not the sampler had to fall back.
    pub fn replace(
        &mut self,
        index: usize,
        sampler: &Sampler,
        reroll_count: &mut u32,
    ) -> Option<Replacement> {
        let cleared_id = self.cells.get(index)?.prompt.id().to_string();
        let reroll = *reroll_count;
        let draw = sampler.draw(reroll, &self.prompt_ids());
        *reroll_count += 1;

        let replacement = Replacement {
            index,
            cleared_id,
            prompt_id: draw.prompt.id().to_string(),
            reroll,
            exhausted: draw.exhausted,
        };
        self.cells[index] = Cell::new(draw.prompt);
        info!(
            seed = sampler.seed(),
            index,
            reroll,
            cleared = %replacement.cleared_id,
            prompt_id = %replacement.prompt_id,
            "replaced prompt"
        );
        Some(replacement)
    }
}

/// The 16 prompts for `seed`, in display order.
pub fn generate_prompts(catalog: &Catalog, seed: &str) -> Vec<Prompt> {
    let sampler = Sampler::new(catalog, seed);
    let mut excluded = HashSet::new();
    let mut prompts = Vec::with_capacity(BOARD_SIZE);

    for i in 0..BOARD_SIZE as u32 {
        let draw = sampler.draw(i, &excluded);
        excluded.insert(draw.prompt.id().to_string());
        prompts.push(draw.prompt);
    }

    prompts.shuffle(&mut shuffle_rng(seed));
    info!(seed, prompts = prompts.len(), "generated board");
    prompts
}
