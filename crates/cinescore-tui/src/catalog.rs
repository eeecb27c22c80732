//! Named movie categories with per-category pagination.
//!
//! The same movie may appear in several categories (e.g. trending and now
//! playing). Flag changes are applied to every copy so the views agree.

use std::collections::HashSet;

use crate::movie::{Movie, Rank};
use crate::paging::{MOVIES_PER_PAGE, Pager};

/// A titled movie list with its own pager.
#[derive(Debug, Clone)]
pub struct Category {
    /// Display name (e.g. "Trending Now").
    pub name: String,
    /// Movies in server order.
    pub movies: Vec<Movie>,
    /// Carousel page.
    pub pager: Pager,
}

impl Category {
    /// Creates a category on its first page.
    #[must_use]
    pub fn new(name: impl Into<String>, movies: Vec<Movie>) -> Self {
        Self {
            name: name.into(),
            movies,
            pager: Pager::new(MOVIES_PER_PAGE),
        }
    }

    /// Movies on the current page.
    #[must_use]
    pub fn visible(&self) -> &[Movie] {
        self.pager.window(&self.movies)
    }
}

/// Ordered set of categories.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// All categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category at `index`.
    #[must_use]
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Number of categories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether there are no categories.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Position of the category called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    /// Replaces the movies of `name` (resetting its pager), or appends a new
    /// category.
    pub fn set_category(&mut self, name: &str, movies: Vec<Movie>) {
        if let Some(category) = self.categories.iter_mut().find(|c| c.name == name) {
            category.movies = movies;
            category.pager.reset();
        } else {
            self.categories.push(Category::new(name, movies));
        }
    }

    /// Inserts or replaces `name` at the front.
    pub fn set_leading_category(&mut self, name: &str, movies: Vec<Movie>) {
        self.remove_category(name);
        self.categories.insert(0, Category::new(name, movies));
    }

    /// Removes the category called `name`. Returns whether it existed.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        self.categories.len() != before
    }

    /// Advances the pager of the category at `index`.
    pub fn next_page(&mut self, index: usize) {
        if let Some(category) = self.categories.get_mut(index) {
            category.pager.next(category.movies.len());
        }
    }

    /// Moves the pager of the category at `index` back.
    pub fn prev_page(&mut self, index: usize) {
        if let Some(category) = self.categories.get_mut(index) {
            category.pager.prev(category.movies.len());
        }
    }

    /// First copy of the movie, searching categories in order.
    #[must_use]
    pub fn find(&self, movie_id: u64) -> Option<&Movie> {
        self.all_movies().find(|m| m.id == movie_id)
    }

    /// Adds `movie` to `fallback` unless some category already holds it.
    pub fn ensure(&mut self, movie: Movie, fallback: &str) {
        if self.find(movie.id).is_some() {
            return;
        }
        if let Some(category) = self.categories.iter_mut().find(|c| c.name == fallback) {
            category.movies.push(movie);
        } else {
            self.categories.push(Category::new(fallback, vec![movie]));
        }
    }

    /// Flips the liked flag on every copy. Returns the new state of the first
    /// copy, or `None` if the movie is not in the catalog.
    pub fn toggle_like(&mut self, movie_id: u64) -> Option<bool> {
        self.update_all(movie_id, |m| {
            m.is_liked = !m.is_liked;
            m.is_liked
        })
    }

    /// Flips the watchlist flag on every copy. Returns the new state of the
    /// first copy, or `None` if the movie is not in the catalog.
    pub fn toggle_watchlist(&mut self, movie_id: u64) -> Option<bool> {
        self.update_all(movie_id, |m| {
            m.in_watchlist = !m.in_watchlist;
            m.in_watchlist
        })
    }

    /// Sets the rank on every copy. Returns whether any copy was found.
    pub fn rank_movie(&mut self, movie_id: u64, rank: Rank) -> bool {
        self.update_all(movie_id, |m| m.rank = rank).is_some()
    }

    /// Liked movies, one entry per id, in catalog order.
    #[must_use]
    pub fn liked(&self) -> Vec<&Movie> {
        self.unique_where(|m| m.is_liked)
    }

    /// Watchlisted movies, one entry per id, in catalog order.
    #[must_use]
    pub fn watchlist(&self) -> Vec<&Movie> {
        self.unique_where(|m| m.in_watchlist)
    }

    fn all_movies(&self) -> impl Iterator<Item = &Movie> {
        self.categories.iter().flat_map(|c| c.movies.iter())
    }

    fn unique_where(&self, pred: impl Fn(&Movie) -> bool) -> Vec<&Movie> {
        let mut seen = HashSet::new();
        self.all_movies()
            .filter(|m| pred(m) && seen.insert(m.id))
            .collect()
    }

    fn update_all<T>(&mut self, movie_id: u64, mut apply: impl FnMut(&mut Movie) -> T) -> Option<T> {
        let mut first = None;
        for movie in self
            .categories
            .iter_mut()
            .flat_map(|c| c.movies.iter_mut())
            .filter(|m| m.id == movie_id)
        {
            let result = apply(movie);
            if first.is_none() {
                first = Some(result);
            }
        }
        first
    }
}
