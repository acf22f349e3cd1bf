//! Spawn pattern tables
//!
//! A pattern is an ordered list of steps; each step is the set of lanes that
//! get an obstacle at the same depth. Patterns unlock by tier, so the pool
//! for a tier always contains every easier pool.

use rand::Rng;

use super::difficulty::DifficultyTier;
use super::lane::Lane::{self, Center as C, Left as L, Right as R};
use crate::error::SimError;

#[derive(Debug, PartialEq, Eq)]
pub struct SpawnPattern {
    pub name: &'static str,
    /// Lowest tier this pattern appears at
    pub min_tier: DifficultyTier,
    pub steps: &'static [&'static [Lane]],
}

impl SpawnPattern {
    /// Lane of the opening step when it is a single obstacle
    pub fn opening_lane(&self) -> Option<Lane> {
        self.steps.first().and_then(|step| match step {
            [lane] => Some(*lane),
            _ => None,
        })
    }
}

const fn pattern(
    name: &'static str,
    min_tier: DifficultyTier,
    steps: &'static [&'static [Lane]],
) -> SpawnPattern {
    SpawnPattern {
        name,
        min_tier,
        steps,
    }
}

/// Built-in patterns
pub static BUILTIN_PATTERNS: &[SpawnPattern] = &[
    // Tier 1: one obstacle at a time
    pattern("single-left", DifficultyTier::One, &[&[L]]),
    pattern("single-center", DifficultyTier::One, &[&[C]]),
    pattern("single-right", DifficultyTier::One, &[&[R]]),
    pattern("sweep-right", DifficultyTier::One, &[&[L], &[C], &[R]]),
    pattern("sweep-left", DifficultyTier::One, &[&[R], &[C], &[L]]),
    pattern("bookends", DifficultyTier::One, &[&[L], &[R]]),
    pattern("weave", DifficultyTier::One, &[&[C], &[L], &[C], &[R]]),
    // Tier 2: pairs, always one lane open
    pattern("gate", DifficultyTier::Two, &[&[L, R]]),
    pattern("left-pair", DifficultyTier::Two, &[&[L, C]]),
    pattern("right-pair", DifficultyTier::Two, &[&[C, R]]),
    pattern("funnel", DifficultyTier::Two, &[&[L, R], &[C]]),
    pattern("stagger", DifficultyTier::Two, &[&[L, C], &[R]]),
    // Tier 3: chained pairs
    pattern("slalom", DifficultyTier::Three, &[&[L, C], &[C, R], &[L, C]]),
    pattern("gauntlet", DifficultyTier::Three, &[&[L, R], &[L, C], &[C, R]]),
    pattern("squeeze", DifficultyTier::Three, &[&[C, R], &[L, R], &[L, C]]),
];

/// A validated set of patterns
#[derive(Debug, Clone, Copy)]
pub struct PatternTable {
    patterns: &'static [SpawnPattern],
}

impl PatternTable {
    /// Validate `patterns`; any tier left without a pattern is fatal
    pub fn new(patterns: &'static [SpawnPattern]) -> Result<Self, SimError> {
        for pattern in patterns {
            validate_pattern(pattern)?;
        }
        let table = Self { patterns };
        for tier in DifficultyTier::ALL {
            if table.pool(tier).next().is_none() {
                return Err(SimError::EmptyPool { tier });
            }
        }
        Ok(table)
    }

    pub fn builtin() -> Result<Self, SimError> {
        Self::new(BUILTIN_PATTERNS)
    }

    /// Patterns available at `tier`
    pub fn pool(&self, tier: DifficultyTier) -> impl Iterator<Item = &'static SpawnPattern> {
        let patterns = self.patterns;
        patterns.iter().filter(move |p| p.min_tier <= tier)
    }

    /// Pick uniformly from the tier's pool.
    ///
    /// With `avoid` set, patterns opening on that single lane are skipped
    /// unless that would leave nothing to pick.
    pub fn sample<G: Rng + ?Sized>(
        &self,
        tier: DifficultyTier,
        avoid: Option<Lane>,
        rng: &mut G,
    ) -> &'static SpawnPattern {
        let pool: Vec<&'static SpawnPattern> = self.pool(tier).collect();
        let filtered: Vec<&'static SpawnPattern> = match avoid {
            Some(lane) => pool
                .iter()
                .copied()
                .filter(|p| p.opening_lane() != Some(lane))
                .collect(),
            None => Vec::new(),
        };
        let candidates = if filtered.is_empty() { &pool } else { &filtered };
        // Non-empty: every tier was checked in `new`
        candidates[rng.random_range(0..candidates.len())]
    }
}

fn validate_pattern(pattern: &SpawnPattern) -> Result<(), SimError> {
    let name = pattern.name;
    if pattern.steps.is_empty() {
        return Err(SimError::EmptyPattern { name });
    }
    for (step, lanes) in pattern.steps.iter().enumerate() {
        if lanes.is_empty() {
            return Err(SimError::EmptyStep { name, step });
        }
        if Lane::ALL.iter().all(|lane| lanes.contains(lane)) {
            return Err(SimError::CrowdedStep { name, step });
        }
        if pattern.min_tier == DifficultyTier::One && lanes.len() > 1 {
            return Err(SimError::MultiLaneTierOne { name, step });
        }
    }
    Ok(())
}
