//! Top five favourites and the profile projection.

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::movie::Movie;

/// Number of top five slots.
pub const TOP_FIVE_SLOTS: usize = 5;

/// Five numbered slots, each holding at most one movie.
#[derive(Debug, Clone, Default)]
pub struct TopFive {
    slots: [Option<Movie>; TOP_FIVE_SLOTS],
}

impl TopFive {
    /// Puts `movie` in `slot` (1-based).
    ///
    /// A movie occupies at most one slot: assigning it elsewhere vacates its
    /// old slot. The slot's previous occupant is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is out of range or the movie is not
    /// released as of `today`.
    pub fn assign(&mut self, slot: usize, movie: &Movie, today: NaiveDate) -> Result<()> {
        if !(1..=TOP_FIVE_SLOTS).contains(&slot) {
            bail!("top five slots are numbered 1 to {TOP_FIVE_SLOTS}, got {slot}");
        }
        if !movie.is_released(today) {
            bail!("Only released movies can be added to your top five");
        }
        for held in &mut self.slots {
            if held.as_ref().is_some_and(|m| m.id == movie.id) {
                *held = None;
            }
        }
        if let Some(target) = self.slots.get_mut(slot.saturating_sub(1)) {
            *target = Some(movie.clone());
        }
        Ok(())
    }

    /// Empties `slot` (1-based). Returns the movie that was there.
    pub fn clear(&mut self, slot: usize) -> Option<Movie> {
        self.slots.get_mut(slot.checked_sub(1)?)?.take()
    }

    /// Slot (1-based) holding `movie_id`.
    #[must_use]
    pub fn slot_of(&self, movie_id: u64) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|m| m.id == movie_id))
            .map(|idx| idx.saturating_add(1))
    }

    /// Occupant of `slot` (1-based).
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Movie> {
        self.slots.get(slot.checked_sub(1)?)?.as_ref()
    }

    /// `(slot, occupant)` pairs for slots 1..=5.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&Movie>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(idx, m)| (idx.saturating_add(1), m.as_ref()))
    }
}

/// What the profile page shows.
#[derive(Debug)]
pub struct Profile<'a> {
    /// Liked movies.
    pub liked: Vec<&'a Movie>,
    /// Watchlisted movies.
    pub watchlist: Vec<&'a Movie>,
    /// Top five slots.
    pub top_five: &'a TopFive,
}

impl<'a> Profile<'a> {
    /// Projects the profile from the catalog flags and the top five.
    #[must_use]
    pub fn project(catalog: &'a Catalog, top_five: &'a TopFive) -> Self {
        Self {
            liked: catalog.liked(),
            watchlist: catalog.watchlist(),
            top_five,
        }
    }
}
