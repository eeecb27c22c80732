//! Movie view model and star rank.

use anyhow::{Result, bail};
use chrono::NaiveDate;

use cinescore_api::{MovieDetails, MovieListing};

/// Highest star rank a user can give.
pub const MAX_RANK: u8 = 5;

/// User star rating: 0 = unranked, 1..=5 = stars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// No rating given.
    pub const UNRANKED: Self = Self(0);

    /// Creates a rank.
    ///
    /// # Errors
    ///
    /// Returns an error if `stars` is greater than 5.
    pub fn new(stars: u8) -> Result<Self> {
        if stars > MAX_RANK {
            bail!("rank must be between 0 and {MAX_RANK}, got {stars}");
        }
        Ok(Self(stars))
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Whether a rating has been given.
    #[must_use]
    pub const fn is_ranked(self) -> bool {
        self.0 > 0
    }
}

/// A movie as shown in lists, carousels and the tier list.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Poster URL.
    pub poster: String,
    /// Short description.
    pub description: String,
    /// Overall score.
    pub score: f32,
    /// Liked by the user.
    pub is_liked: bool,
    /// In the user's watchlist.
    pub in_watchlist: bool,
    /// Release date, if known.
    pub release_date: Option<NaiveDate>,
    /// User star rank.
    pub rank: Rank,
}

/// Parses a backend date (`YYYY-MM-DD`); empty or malformed dates are unknown.
#[must_use]
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

impl From<MovieListing> for Movie {
    fn from(listing: MovieListing) -> Self {
        Self {
            id: listing.id,
            release_date: parse_date(listing.release_date.as_deref()),
            rank: Rank::new(listing.rank).unwrap_or_default(),
            title: listing.title,
            poster: listing.poster,
            description: listing.description,
            score: listing.overall_score,
            is_liked: listing.is_liked,
            in_watchlist: listing.in_watchlist,
        }
    }
}

impl From<&MovieDetails> for Movie {
    fn from(details: &MovieDetails) -> Self {
        Self {
            id: details.id,
            title: details.title.clone(),
            poster: details.poster_url.clone(),
            description: details.overview.clone(),
            score: details.overall_score,
            is_liked: details.is_liked,
            in_watchlist: details.in_watchlist,
            release_date: parse_date(details.release_date.as_deref()),
            rank: Rank::new(details.rank).unwrap_or_default(),
        }
    }
}

impl Movie {
    /// Whether the movie is out as of `today`. Unknown dates count as unreleased.
    #[must_use]
    pub fn is_released(&self, today: NaiveDate) -> bool {
        self.release_date.is_some_and(|d| d <= today)
    }

    /// Release year for display (`"----"` when unknown).
    #[must_use]
    pub fn year_label(&self) -> String {
        self.release_date
            .map_or_else(|| String::from("----"), |d| d.format("%Y").to_string())
    }
}

/// Converts a list response into view models, keeping server order.
#[must_use]
pub fn movies_from(list: cinescore_api::MovieList) -> Vec<Movie> {
    list.movies.into_iter().map(Movie::from).collect()
}
