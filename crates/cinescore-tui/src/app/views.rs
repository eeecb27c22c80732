//! Per-page view state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use cinescore_api::{MovieDetails, PersonDetails};

use crate::catalog::{Catalog, Category};
use crate::movie::Movie;
use crate::paging::{PEOPLE_PER_PAGE, Pager};
use crate::person::{CreditEntry, Credits, Person, name_matches};
use crate::profile::TopFive;
use crate::search::SearchBox;
use crate::tier_list::{Tier, TierList};

/// Category holding the latest movie search.
pub const SEARCH_RESULTS: &str = "Search Results";
/// Home feed categories.
pub const TRENDING: &str = "Trending Now";
/// Home feed categories.
pub const NOW_PLAYING: &str = "Now Playing";
/// Home feed categories.
pub const UPCOMING: &str = "Upcoming";
/// Movies opened from elsewhere (person filmography, tier list search).
pub const RECENTLY_VIEWED: &str = "Recently Viewed";

/// Base URL for IMDb title and name pages.
const IMDB_BASE_URL: &str = "https://www.imdb.com";

// --- Films ---

/// Films page: carousels and movie search.
#[derive(Debug)]
pub struct FilmsView {
    /// Feed categories (plus search results when present).
    pub catalog: Catalog,
    /// Focused category.
    pub focus: usize,
    /// Selected movie within the focused category's page.
    pub cursor: usize,
    /// Movie search input.
    pub search: SearchBox,
    /// Feeds are loading.
    pub loading: bool,
    /// A search request is in flight.
    pub searching: bool,
    /// Last failure, shown in place of content.
    pub error: Option<String>,
}

impl FilmsView {
    /// Creates an empty view in the loading state.
    #[must_use]
    pub const fn new(debounce: Duration) -> Self {
        Self {
            catalog: Catalog::new(),
            focus: 0,
            cursor: 0,
            search: SearchBox::new(debounce),
            loading: true,
            searching: false,
            error: None,
        }
    }

    /// The focused category.
    #[must_use]
    pub fn focused(&self) -> Option<&Category> {
        self.catalog.category(self.focus)
    }

    /// The highlighted movie.
    #[must_use]
    pub fn selected(&self) -> Option<&Movie> {
        self.focused()?.visible().get(self.cursor)
    }

    /// Focuses the previous category.
    pub fn focus_up(&mut self) {
        self.focus = self.focus.saturating_sub(1);
        self.clamp_cursor();
    }

    /// Focuses the next category.
    pub fn focus_down(&mut self) {
        if self.focus.saturating_add(1) < self.catalog.len() {
            self.focus = self.focus.saturating_add(1);
        }
        self.clamp_cursor();
    }

    /// Moves the highlight left, flipping to the previous page at the edge.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.cursor.saturating_sub(1);
            return;
        }
        self.catalog.prev_page(self.focus);
        let len = self.focused().map_or(0, |c| c.visible().len());
        self.cursor = len.saturating_sub(1);
    }

    /// Moves the highlight right, flipping to the next page at the edge.
    pub fn move_right(&mut self) {
        let len = self.focused().map_or(0, |c| c.visible().len());
        if self.cursor.saturating_add(1) < len {
            self.cursor = self.cursor.saturating_add(1);
            return;
        }
        self.catalog.next_page(self.focus);
        self.cursor = 0;
    }

    /// Next carousel page of the focused category.
    pub fn next_page(&mut self) {
        self.catalog.next_page(self.focus);
        self.clamp_cursor();
    }

    /// Previous carousel page of the focused category.
    pub fn prev_page(&mut self) {
        self.catalog.prev_page(self.focus);
        self.clamp_cursor();
    }

    /// Shows search results as the first category and focuses it.
    pub fn show_results(&mut self, movies: Vec<Movie>) {
        self.catalog.set_leading_category(SEARCH_RESULTS, movies);
        self.focus = 0;
        self.cursor = 0;
    }

    /// Drops the search results category.
    pub fn clear_results(&mut self) {
        if self.catalog.position(SEARCH_RESULTS) == Some(0) && self.focus > 0 {
            self.focus = self.focus.saturating_sub(1);
        }
        self.catalog.remove_category(SEARCH_RESULTS);
        self.clamp_focus();
    }

    /// Keeps focus and cursor inside the current data.
    pub fn clamp_focus(&mut self) {
        if self.focus >= self.catalog.len() {
            self.focus = self.catalog.len().saturating_sub(1);
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.focused().map_or(0, |c| c.visible().len());
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

// --- Actors ---

/// A list on the actors page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorSection {
    /// Hand-picked people.
    Featured,
    /// `discover/trending_people`.
    Trending,
    /// People search results.
    Search,
}

impl ActorSection {
    /// Heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Featured => "Featured Actors",
            Self::Trending => "Trending Now",
            Self::Search => "Search Results",
        }
    }
}

/// Actors page: featured and trending people, local filter, people search.
#[derive(Debug)]
pub struct ActorsView {
    /// Featured people (failures already dropped).
    pub featured: Vec<Person>,
    /// Trending people.
    pub trending: Vec<Person>,
    /// People search results with biographies.
    pub results: Vec<Person>,
    /// Pager over the filtered featured list.
    pub featured_pager: Pager,
    /// Pager over the filtered trending list.
    pub trending_pager: Pager,
    /// Focused list.
    pub section: ActorSection,
    /// Selected row within the visible page.
    pub cursor: usize,
    /// Local name filter.
    pub filter: String,
    /// People search input.
    pub search: SearchBox,
    /// Trending people are loading.
    pub loading: bool,
    /// A search request is in flight.
    pub searching: bool,
    /// Last failure, shown in place of content.
    pub error: Option<String>,
}

impl ActorsView {
    /// Creates an empty view in the loading state.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            featured: Vec::new(),
            trending: Vec::new(),
            results: Vec::new(),
            featured_pager: Pager::new(PEOPLE_PER_PAGE),
            trending_pager: Pager::new(PEOPLE_PER_PAGE),
            section: ActorSection::Featured,
            cursor: 0,
            filter: String::new(),
            search: SearchBox::new(debounce),
            loading: true,
            searching: false,
            error: None,
        }
    }

    /// People in `section` that pass the name filter (search results are
    /// not filtered).
    #[must_use]
    pub fn filtered(&self, section: ActorSection) -> Vec<&Person> {
        match section {
            ActorSection::Featured => self.matching(&self.featured),
            ActorSection::Trending => self.matching(&self.trending),
            ActorSection::Search => self.results.iter().collect(),
        }
    }

    fn matching<'a>(&self, people: &'a [Person]) -> Vec<&'a Person> {
        people
            .iter()
            .filter(|p| name_matches(&p.name, &self.filter))
            .collect()
    }

    /// People on the current page of `section`.
    #[must_use]
    pub fn visible(&self, section: ActorSection) -> Vec<&Person> {
        let filtered = self.filtered(section);
        match section {
            ActorSection::Featured => self.featured_pager.window(&filtered).to_vec(),
            ActorSection::Trending => self.trending_pager.window(&filtered).to_vec(),
            ActorSection::Search => filtered,
        }
    }

    /// The highlighted person.
    #[must_use]
    pub fn selected(&self) -> Option<&Person> {
        self.visible(self.section).get(self.cursor).copied()
    }

    /// Cycles Featured -> Trending -> Search (when there are results).
    pub fn next_section(&mut self) {
        self.section = match self.section {
            ActorSection::Featured => ActorSection::Trending,
            ActorSection::Trending if !self.results.is_empty() => ActorSection::Search,
            ActorSection::Trending | ActorSection::Search => ActorSection::Featured,
        };
        self.cursor = 0;
    }

    /// Moves the highlight up.
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the highlight down.
    pub fn move_down(&mut self) {
        if self.cursor.saturating_add(1) < self.visible(self.section).len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Next page of the focused list.
    pub fn next_page(&mut self) {
        let len = self.filtered(self.section).len();
        match self.section {
            ActorSection::Featured => self.featured_pager.next(len),
            ActorSection::Trending => self.trending_pager.next(len),
            ActorSection::Search => {}
        }
        self.cursor = 0;
    }

    /// Previous page of the focused list.
    pub fn prev_page(&mut self) {
        let len = self.filtered(self.section).len();
        match self.section {
            ActorSection::Featured => self.featured_pager.prev(len),
            ActorSection::Trending => self.trending_pager.prev(len),
            ActorSection::Search => {}
        }
        self.cursor = 0;
    }

    /// Appends to the name filter.
    pub fn filter_push(&mut self, ch: char) {
        self.filter.push(ch);
        self.filter_changed();
    }

    /// Removes the last filter character.
    pub fn filter_pop(&mut self) {
        self.filter.pop();
        self.filter_changed();
    }

    /// Clears the name filter.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_changed();
    }

    fn filter_changed(&mut self) {
        self.featured_pager.reset();
        self.trending_pager.reset();
        self.cursor = 0;
    }

    /// Shows search results and focuses them.
    pub fn show_results(&mut self, people: Vec<Person>) {
        self.results = people;
        self.section = ActorSection::Search;
        self.cursor = 0;
    }

    /// Drops search results, leaving the search section if focused.
    pub fn clear_results(&mut self) {
        self.results.clear();
        if self.section == ActorSection::Search {
            self.section = ActorSection::Featured;
            self.cursor = 0;
        }
    }
}

// --- Tier list ---

/// Tier list page: the board, a cursor, a picked-up movie and movie search.
#[derive(Debug)]
pub struct TierListView {
    /// The board.
    pub board: TierList,
    /// Focused tier row.
    pub tier: Tier,
    /// Selected movie within the focused tier.
    pub cursor: usize,
    /// Movie picked up for a move, with the tier it came from.
    pub held: Option<(u64, Tier)>,
    /// Search input for adding movies.
    pub search: SearchBox,
    /// Search results.
    pub results: Vec<Movie>,
    /// Selected search result.
    pub result_cursor: usize,
    /// A search request is in flight.
    pub searching: bool,
    /// Where exports are written.
    pub export_dir: PathBuf,
    /// Title being edited.
    pub title_draft: String,
    /// Last error shown above the board (duplicate add, failed search).
    pub message: Option<String>,
}

impl TierListView {
    /// Creates an empty board.
    #[must_use]
    pub fn new(title: &str, export_dir: PathBuf, debounce: Duration) -> Self {
        Self {
            board: TierList::new(title),
            tier: Tier::Unassigned,
            cursor: 0,
            held: None,
            search: SearchBox::new(debounce),
            results: Vec::new(),
            result_cursor: 0,
            searching: false,
            export_dir,
            title_draft: String::new(),
            message: None,
        }
    }

    /// The highlighted movie on the board.
    #[must_use]
    pub fn selected(&self) -> Option<&Movie> {
        self.board.movies(self.tier).get(self.cursor)
    }

    /// The highlighted search result.
    #[must_use]
    pub fn selected_result(&self) -> Option<&Movie> {
        self.results.get(self.result_cursor)
    }

    /// Focuses the tier above.
    pub fn tier_up(&mut self) {
        self.tier = self.tier.above();
        self.clamp_cursor();
    }

    /// Focuses the tier below.
    pub fn tier_down(&mut self) {
        self.tier = self.tier.below();
        self.clamp_cursor();
    }

    /// Moves the highlight left within the tier.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the highlight right within the tier.
    pub fn move_right(&mut self) {
        if self.cursor.saturating_add(1) < self.board.movies(self.tier).len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Picks up the highlighted movie, or drops the held one onto the
    /// focused tier. Returns `true` when a move happened.
    pub fn pick_or_drop(&mut self) -> bool {
        if let Some((movie_id, source)) = self.held.take() {
            let moved = self.board.move_movie(movie_id, source, self.tier);
            if moved {
                self.cursor = self.board.movies(self.tier).len().saturating_sub(1);
            } else {
                tracing::debug!(movie_id, ?source, target = ?self.tier, "tier move ignored");
            }
            return moved;
        }
        if let Some(movie) = self.selected() {
            self.held = Some((movie.id, self.tier));
        }
        false
    }

    /// Adds a movie to the unassigned tier.
    ///
    /// # Errors
    ///
    /// Returns an error if the movie is already on the board.
    pub fn add(&mut self, movie: Movie) -> Result<()> {
        match self.board.add_movie(movie) {
            Ok(()) => {
                self.message = None;
                Ok(())
            }
            Err(e) => {
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Adds the highlighted search result and clears the search.
    ///
    /// # Errors
    ///
    /// Returns an error if the movie is already on the board.
    pub fn add_selected_result(&mut self) -> Result<()> {
        let Some(movie) = self.selected_result().cloned() else {
            return Ok(());
        };
        self.add(movie)?;
        self.results.clear();
        self.result_cursor = 0;
        Ok(())
    }

    /// Removes the highlighted movie from the board.
    pub fn remove_selected(&mut self) {
        let Some(movie_id) = self.selected().map(|m| m.id) else {
            return;
        };
        self.board.remove_movie(movie_id);
        if self.held.is_some_and(|(id, _)| id == movie_id) {
            self.held = None;
        }
        self.clamp_cursor();
    }

    /// Resets the board.
    pub fn reset(&mut self) {
        self.board.reset();
        self.held = None;
        self.clamp_cursor();
    }

    /// Starts editing the title.
    pub fn begin_rename(&mut self) {
        self.title_draft = String::from(self.board.title());
    }

    /// Applies the edited title.
    pub fn commit_rename(&mut self) {
        let title = std::mem::take(&mut self.title_draft);
        if !title.trim().is_empty() {
            self.board.rename(title);
        }
    }

    /// Writes the export into [`Self::export_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<PathBuf> {
        self.board
            .save_to(&self.export_dir)
            .context("Failed to export tier list")
    }

    /// Moves the search result highlight up.
    pub const fn result_up(&mut self) {
        self.result_cursor = self.result_cursor.saturating_sub(1);
    }

    /// Moves the search result highlight down.
    pub fn result_down(&mut self) {
        if self.result_cursor.saturating_add(1) < self.results.len() {
            self.result_cursor = self.result_cursor.saturating_add(1);
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.board.movies(self.tier).len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

// --- Profile ---

/// A list on the profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileSection {
    /// Liked movies.
    #[default]
    Liked,
    /// Watchlist.
    Watchlist,
    /// Top five slots.
    TopFive,
}

impl ProfileSection {
    /// Heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Liked => "Liked",
            Self::Watchlist => "Watchlist",
            Self::TopFive => "Top Five",
        }
    }

    /// Next section (wraps).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Liked => Self::Watchlist,
            Self::Watchlist => Self::TopFive,
            Self::TopFive => Self::Liked,
        }
    }

    /// Previous section (wraps).
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Liked => Self::TopFive,
            Self::Watchlist => Self::Liked,
            Self::TopFive => Self::Watchlist,
        }
    }
}

/// Profile page state. Liked and watchlist come from the films catalog.
#[derive(Debug, Default)]
pub struct ProfileView {
    /// Top five favourites.
    pub top_five: TopFive,
    /// Focused list.
    pub section: ProfileSection,
    /// Selected row.
    pub cursor: usize,
}

// --- Overlays ---

/// Movie detail overlay.
#[derive(Debug)]
pub struct MovieDetailView {
    /// Requested movie.
    pub movie_id: u64,
    /// Loaded details.
    pub details: Option<MovieDetails>,
    /// Cast and crew.
    pub credits: Credits,
    /// Show every cast member instead of the preview.
    pub show_all_cast: bool,
    /// Load failure.
    pub error: Option<String>,
}

impl MovieDetailView {
    /// Creates a loading overlay.
    #[must_use]
    pub fn new(movie_id: u64) -> Self {
        Self {
            movie_id,
            details: None,
            credits: Credits::default(),
            show_all_cast: false,
            error: None,
        }
    }

    /// Stores loaded details.
    pub fn load(&mut self, details: MovieDetails) {
        self.credits = details
            .credits
            .as_ref()
            .map(Credits::from)
            .unwrap_or_default();
        self.details = Some(details);
        self.error = None;
    }

    /// IMDb page for the movie.
    #[must_use]
    pub fn imdb_url(&self) -> Option<String> {
        let imdb_id = self.details.as_ref()?.imdb_id.as_deref()?;
        (!imdb_id.is_empty()).then(|| format!("{IMDB_BASE_URL}/title/{imdb_id}"))
    }
}

/// Person detail overlay.
#[derive(Debug)]
pub struct PersonDetailView {
    /// Requested person.
    pub person_id: u64,
    /// Loaded details.
    pub details: Option<PersonDetails>,
    /// Filmography.
    pub credits: Credits,
    /// Selected filmography entry.
    pub cursor: usize,
    /// Load failure.
    pub error: Option<String>,
}

impl PersonDetailView {
    /// Creates a loading overlay.
    #[must_use]
    pub fn new(person_id: u64) -> Self {
        Self {
            person_id,
            details: None,
            credits: Credits::default(),
            cursor: 0,
            error: None,
        }
    }

    /// Stores loaded details.
    pub fn load(&mut self, details: PersonDetails) {
        self.credits = details
            .credits
            .as_ref()
            .map(Credits::from)
            .unwrap_or_default();
        self.details = Some(details);
        self.cursor = 0;
        self.error = None;
    }

    /// The highlighted filmography entry.
    #[must_use]
    pub fn selected(&self) -> Option<&CreditEntry> {
        self.credits.entries().nth(self.cursor)
    }

    /// Moves the highlight up.
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the highlight down.
    pub fn move_down(&mut self) {
        if self.cursor.saturating_add(1) < self.credits.len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// IMDb page for the person.
    #[must_use]
    pub fn imdb_url(&self) -> Option<String> {
        let socials = self.details.as_ref()?.socials.as_ref()?;
        let imdb_id = socials.imdb.as_deref()?;
        (!imdb_id.is_empty()).then(|| format!("{IMDB_BASE_URL}/name/{imdb_id}"))
    }
}

/// A detail screen shown over the current page.
#[derive(Debug)]
pub enum Overlay {
    /// Movie details.
    Movie(MovieDetailView),
    /// Person details.
    Person(PersonDetailView),
}

/// Resolves the export directory: configured, or the working directory.
#[must_use]
pub fn export_dir_or_cwd(configured: Option<&Path>) -> PathBuf {
    configured.map_or_else(
        || std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        Path::to_path_buf,
    )
}
