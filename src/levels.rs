//! Level-indexed enumeration.
//!
//! Levels are built strictly bottom-up: level `n` is generated from levels
//! `0..n`, filtered once, and never touched again.

use std::collections::BTreeMap;

use log::debug;

use crate::builder::LevelBuilder;
use crate::expr::Expr;
use crate::filter::{Filters, Rule};
use crate::vocab::Vocabulary;

/// Default level cap.
pub const DEFAULT_MAX_LEVEL: usize = 2;

/// Enumeration settings.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EnumConfig {
    /// Highest node budget to enumerate (inclusive).
    pub max_level: usize,
}

impl Default for EnumConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl EnumConfig {
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }
}

/// What happened to the candidates of one level.
#[derive(Debug, Clone, Default)]
pub struct LevelStats {
    pub level: usize,
    /// Candidates produced by the builder.
    pub generated: usize,
    /// Candidates that survived filtering.
    pub accepted: usize,
    /// Rejections attributed to the first matching rule.
    pub rejected: BTreeMap<Rule, usize>,
}

impl LevelStats {
    pub fn num_rejected(&self) -> usize {
        self.rejected.values().sum()
    }
}

/// Accepted trees, grouped by level.
#[derive(Debug, Clone, Default)]
pub struct LevelIndex {
    levels: Vec<Vec<Expr>>,
    stats: Vec<LevelStats>,
}

impl LevelIndex {
    /// Number of levels built so far.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Trees of the given level.
    ///
    /// # Panics
    ///
    /// Panics if the level has not been built.
    pub fn level(&self, n: usize) -> &[Expr] {
        &self.levels[n]
    }

    pub fn levels(&self) -> &[Vec<Expr>] {
        &self.levels
    }

    /// Per-level statistics; level 0 is not filtered and has no entry.
    pub fn stats(&self) -> &[LevelStats] {
        &self.stats
    }

    /// Candidates of every non-zero level, in emission order.
    pub fn candidates(&self) -> impl Iterator<Item = &Expr> + '_ {
        self.levels.iter().skip(1).flatten()
    }

    /// Total number of candidates over all non-zero levels.
    pub fn num_candidates(&self) -> usize {
        self.levels.iter().skip(1).map(Vec::len).sum()
    }

    /// Largest number of `name` leaves in a single candidate.
    pub fn max_var_count(&self, name: &str) -> usize {
        self.candidates().map(|e| e.count_var(name)).max().unwrap_or(0)
    }

    fn push(&mut self, level: Vec<Expr>) {
        self.levels.push(level);
    }
}

/// Drives the build-then-filter loop over all levels.
pub struct Enumerator<'a> {
    vocab: &'a Vocabulary,
    config: EnumConfig,
}

impl<'a> Enumerator<'a> {
    pub fn new(vocab: &'a Vocabulary, config: EnumConfig) -> Self {
        Enumerator { vocab, config }
    }

    pub fn config(&self) -> &EnumConfig {
        &self.config
    }

    /// Build and filter every level up to the configured cap.
    pub fn run(&self) -> LevelIndex {
        let filters = Filters::new(self.vocab);
        let mut index = LevelIndex::default();

        let leaves = LevelBuilder::leaves(self.vocab);
        debug!("level 0: {} leaves", leaves.len());
        index.push(leaves);

        for n in 1..=self.config.max_level {
            let builder = LevelBuilder::new(self.vocab, index.levels());
            let candidates = builder.build();
            let (accepted, stats) = Self::filter_level(&filters, n, candidates);
            debug!(
                "level {}: {} generated, {} accepted, {} rejected",
                n, stats.generated, stats.accepted, stats.num_rejected()
            );
            for (rule, count) in &stats.rejected {
                debug!("level {}: rule {} rejected {}", n, rule, count);
            }
            index.push(accepted);
            index.stats.push(stats);
        }

        index
    }

    fn filter_level(filters: &Filters, n: usize, candidates: Vec<Expr>) -> (Vec<Expr>, LevelStats) {
        let mut stats = LevelStats {
            level: n,
            generated: candidates.len(),
            ..Default::default()
        };
        let mut accepted = Vec::new();
        for expr in candidates {
            match filters.rejecting_rule(&expr) {
                Some(rule) => *stats.rejected.entry(rule).or_insert(0) += 1,
                None => accepted.push(expr),
            }
        }
        stats.accepted = accepted.len();
        (accepted, stats)
    }
}
