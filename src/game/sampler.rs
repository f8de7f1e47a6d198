//! Weighted prompt sampler
//!
//! Picks one prompt not already on the board:
//! 1. Drop excluded ids from every category; empty categories weigh zero
//! 2. Pick a category by weight, walking categories in catalog order
//! 3. Pick uniformly among that category's remaining prompts
//!
//! If every category is exhausted, the pick falls back to the whole
//! catalog rather than failing.

use super::seed::draw_rng;
use crate::catalog::{Catalog, Prompt};
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Result of one sampler draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub prompt: Prompt,
    /// True when every category was exhausted and the pick ignored the exclusion set
    pub exhausted: bool,
}

/// Deterministic sampler over a catalog for one day's seed.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    catalog: &'a Catalog,
    seed: &'a str,
}

impl<'a> Sampler<'a> {
    pub fn new(catalog: &'a Catalog, seed: &'a str) -> Self {
        Sampler { catalog, seed }
    }

    pub fn seed(&self) -> &'a str {
        self.seed
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Draw number `index` for this seed, avoiding `excluded` ids.
    ///
    /// Same seed, index, exclusion set and catalog always give the same prompt.
    pub fn draw(&self, index: u32, excluded: &HashSet<String>) -> Draw {
        let mut rng = draw_rng(self.seed, index);

        let available: Vec<Vec<&Prompt>> = self
            .catalog
            .categories()
            .iter()
            .map(|c| {
                c.prompts()
                    .iter()
                    .filter(|p| !excluded.contains(p.id()))
                    .collect()
            })
            .collect();
        let weights: Vec<u32> = self
            .catalog
            .categories()
            .iter()
            .zip(&available)
            .map(|(c, pool)| if pool.is_empty() { 0 } else { c.weight() })
            .collect();

        let Ok(dist) = WeightedIndex::new(&weights) else {
            return self.draw_unrestricted(&mut rng, index);
        };

        loop {
            let ci = dist.sample(&mut rng);
            // Zero-weight categories are never picked; retry if one somehow is.
            let Some(prompt) = available[ci].choose(&mut rng) else {
                continue;
            };
            debug!(
                seed = self.seed,
                index,
                category = self.catalog.categories()[ci].kind().label(),
                prompt_id = prompt.id(),
                "drew prompt"
            );
            return Draw {
                prompt: (*prompt).clone(),
                exhausted: false,
            };
        }
    }

    fn draw_unrestricted<R: Rng>(&self, rng: &mut R, index: u32) -> Draw {
        let all: Vec<&Prompt> = self.catalog.iter().collect();
        let prompt = all
            .choose(rng)
            .map(|p| (*p).clone())
            .expect("catalogs are never empty");
        warn!(
            seed = self.seed,
            index,
            prompt_id = prompt.id(),
            "every category exhausted, drawing from the full catalog"
        );
        Draw {
            prompt,
            exhausted: true,
        }
    }
}
