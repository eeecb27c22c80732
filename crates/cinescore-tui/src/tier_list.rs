//! Tier list board: movies bucketed into S..F plus an unassigned pool.
//!
//! Every movie id lives in at most one bucket. The board is in-memory only;
//! [`TierList::save_to`] writes a JSON export for the user to keep.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::movie::Movie;

/// Title of a fresh board.
pub const DEFAULT_TITLE: &str = "My Custom Tier List";

/// Error shown when adding a movie that is already on the board.
pub const DUPLICATE_MOVIE: &str = "This movie is already in your tier list";

/// Runs of whitespace in the title become one underscore in the file name.
#[allow(clippy::expect_used)]
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("failed to compile whitespace regex"));

/// A bucket on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Best.
    S,
    /// Great.
    A,
    /// Good.
    B,
    /// Fine.
    C,
    /// Poor.
    D,
    /// Worst.
    F,
    /// Added but not ranked yet.
    Unassigned,
}

impl Tier {
    /// Ranked tiers, best first.
    pub const RANKED: [Self; 6] = [Self::S, Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Every bucket in display order.
    pub const ALL: [Self; 7] = [
        Self::S,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::F,
        Self::Unassigned,
    ];

    /// Label used in exports and on screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
            Self::Unassigned => "unassigned",
        }
    }

    /// Next bucket down (wraps to S).
    #[must_use]
    pub const fn below(self) -> Self {
        match self {
            Self::S => Self::A,
            Self::A => Self::B,
            Self::B => Self::C,
            Self::C => Self::D,
            Self::D => Self::F,
            Self::F => Self::Unassigned,
            Self::Unassigned => Self::S,
        }
    }

    /// Next bucket up (wraps to unassigned).
    #[must_use]
    pub const fn above(self) -> Self {
        match self {
            Self::S => Self::Unassigned,
            Self::A => Self::S,
            Self::B => Self::A,
            Self::C => Self::B,
            Self::D => Self::C,
            Self::F => Self::D,
            Self::Unassigned => Self::F,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// JSON export of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierListExport {
    /// Board title.
    pub title: String,
    /// Ranked tiers in S..F order.
    pub tiers: Vec<TierExport>,
}

/// One tier in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierExport {
    /// Tier label.
    pub tier: String,
    /// Movies in board order.
    pub movies: Vec<ExportedMovie>,
}

/// A movie in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedMovie {
    /// Movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
}

/// The board.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TierList {
    title: String,
    /// Every movie added, in insertion order. `reset` refills from here.
    pool: Vec<Movie>,
    buckets: BTreeMap<Tier, Vec<Movie>>,
}

impl Default for TierList {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl TierList {
    /// Creates an empty board.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pool: Vec::new(),
            buckets: Tier::ALL.iter().map(|&t| (t, Vec::new())).collect(),
        }
    }

    /// Board title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renames the board.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Movies in `tier`, in board order.
    #[must_use]
    pub fn movies(&self, tier: Tier) -> &[Movie] {
        self.buckets.get(&tier).map_or(&[], Vec::as_slice)
    }

    /// Every movie on the board, in insertion order.
    #[must_use]
    pub fn pool(&self) -> &[Movie] {
        &self.pool
    }

    /// Number of movies across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether the board holds no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Bucket currently holding `movie_id`.
    #[must_use]
    pub fn tier_of(&self, movie_id: u64) -> Option<Tier> {
        self.buckets
            .iter()
            .find(|(_, movies)| movies.iter().any(|m| m.id == movie_id))
            .map(|(&tier, _)| tier)
    }

    /// Moves a movie from `source` to the end of `target`.
    ///
    /// Returns `false` and changes nothing when `source == target` or the
    /// movie is not in `source`.
    pub fn move_movie(&mut self, movie_id: u64, source: Tier, target: Tier) -> bool {
        if source == target {
            return false;
        }
        let Some(from) = self.buckets.get_mut(&source) else {
            return false;
        };
        let Some(idx) = from.iter().position(|m| m.id == movie_id) else {
            tracing::debug!(movie_id, %source, "movie not in source tier");
            return false;
        };
        let movie = from.remove(idx);
        self.buckets.entry(target).or_default().push(movie);
        true
    }

    /// Adds a movie to the unassigned bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the movie is already on the board.
    pub fn add_movie(&mut self, movie: Movie) -> Result<()> {
        if self.tier_of(movie.id).is_some() {
            bail!(DUPLICATE_MOVIE);
        }
        self.pool.push(movie.clone());
        self.buckets.entry(Tier::Unassigned).or_default().push(movie);
        Ok(())
    }

    /// Removes a movie from every bucket and from the pool. Returns whether
    /// it was present.
    pub fn remove_movie(&mut self, movie_id: u64) -> bool {
        let before = self.len();
        for movies in self.buckets.values_mut() {
            movies.retain(|m| m.id != movie_id);
        }
        self.pool.retain(|m| m.id != movie_id);
        self.len() != before
    }

    /// Empties every ranked tier and puts all pooled movies back in
    /// unassigned, in pool order.
    pub fn reset(&mut self) {
        for movies in self.buckets.values_mut() {
            movies.clear();
        }
        self.buckets.insert(Tier::Unassigned, self.pool.clone());
    }

    /// Builds the export (ranked tiers only).
    #[must_use]
    pub fn export(&self) -> TierListExport {
        TierListExport {
            title: self.title.clone(),
            tiers: Tier::RANKED
                .iter()
                .map(|&tier| TierExport {
                    tier: String::from(tier.label()),
                    movies: self
                        .movies(tier)
                        .iter()
                        .map(|m| ExportedMovie {
                            id: m.id,
                            title: m.title.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// File name for the export: `<title with whitespace runs as _>_tierlist.json`.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        format!("{}_tierlist.json", WHITESPACE_RE.replace_all(&self.title, "_"))
    }

    /// Writes the pretty-printed export into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;
        let path = dir.join(self.export_file_name());
        let json = serde_json::to_string_pretty(&self.export())
            .context("failed to serialize tier list")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write tier list: {}", path.display()))?;
        tracing::info!(path = %path.display(), "tier list exported");
        Ok(path)
    }
}
