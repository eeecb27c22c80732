//! Application state: pages, overlays, input modes and the fetches they
//! request.
//!
//! The state never performs I/O. Key handlers queue [`Effect`]s, the event
//! loop runs them and feeds the outcome back as [`AppMessage`]s.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;

use cinescore_api::{
    HomeFeeds, MovieDetails, MovieList, PeopleList, PersonDetails, PersonWithBiography,
};

use super::views::{
    ActorsView, FilmsView, MovieDetailView, NOW_PLAYING, Overlay, PersonDetailView,
    ProfileSection, ProfileView, RECENTLY_VIEWED, TRENDING, TierListView, UPCOMING,
};
use crate::movie::{Movie, Rank, movies_from};
use crate::person::Person;
use crate::profile::Profile;
use crate::search::{DEFAULT_DEBOUNCE, SearchPoll};
use crate::tier_list::DEFAULT_TITLE;

/// Top-level page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    /// Movie carousels and search.
    #[default]
    Films,
    /// Featured and trending people.
    Actors,
    /// Tier list board.
    TierList,
    /// Liked, watchlist, top five.
    Profile,
}

impl Page {
    /// Tab order.
    pub const ALL: [Self; 4] = [Self::Films, Self::Actors, Self::TierList, Self::Profile];

    /// Tab label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Films => "Films",
            Self::Actors => "Actors",
            Self::TierList => "Tier Lists",
            Self::Profile => "Profile",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Films => 0,
            Self::Actors => 1,
            Self::TierList => 2,
            Self::Profile => 3,
        }
    }

    /// Next tab (wraps).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Films => Self::Actors,
            Self::Actors => Self::TierList,
            Self::TierList => Self::Profile,
            Self::Profile => Self::Films,
        }
    }

    /// Previous tab (wraps).
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Films => Self::Profile,
            Self::Actors => Self::Films,
            Self::TierList => Self::Actors,
            Self::Profile => Self::TierList,
        }
    }
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys.
    Normal,
    /// Typing into the page's search box.
    Search,
    /// Typing into the actors name filter.
    Filter,
    /// Editing the tier list title.
    Rename,
    /// Choosing a top five slot for the open movie.
    TopFivePick,
}

/// Which movie search a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    /// Films page search.
    Films,
    /// Tier list "add movie" search.
    TierList,
}

/// Work requested by the state for the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Trending, now playing and upcoming.
    LoadHomeFeeds,
    /// Featured and trending people.
    LoadPeople,
    /// Movie search.
    SearchMovies {
        /// Requesting view.
        target: SearchTarget,
        /// Query as typed.
        query: String,
    },
    /// People search with biographies.
    SearchPeople(String),
    /// Movie details.
    LoadMovie(u64),
    /// Person details.
    LoadPerson(u64),
    /// Open a URL in the browser.
    OpenUrl(String),
}

/// A finished fetch.
#[derive(Debug)]
pub enum AppMessage {
    /// Home feeds.
    HomeFeeds(Result<HomeFeeds>),
    /// Featured people that loaded.
    FeaturedPeople(Vec<PersonDetails>),
    /// Trending people.
    TrendingPeople(Result<PeopleList>),
    /// Movie search results.
    MoviesFound {
        /// Requesting view.
        target: SearchTarget,
        /// Outcome.
        result: Result<MovieList>,
    },
    /// People search results.
    PeopleFound(Result<Vec<PersonWithBiography>>),
    /// Movie details.
    MovieLoaded {
        /// Requested ID.
        movie_id: u64,
        /// Outcome.
        result: Result<MovieDetails>,
    },
    /// Person details.
    PersonLoaded {
        /// Requested ID.
        person_id: u64,
        /// Outcome.
        result: Result<PersonDetails>,
    },
}

/// Startup settings.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// First page shown.
    pub page: Page,
    /// Search debounce delay.
    pub debounce: Duration,
    /// Person IDs for "Featured Actors".
    pub featured_people: Vec<u64>,
    /// Initial tier list title.
    pub tier_list_title: String,
    /// Where tier list exports go.
    pub export_dir: PathBuf,
    /// Date used to decide whether a movie is released.
    pub today: NaiveDate,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            page: Page::Films,
            debounce: DEFAULT_DEBOUNCE,
            featured_people: Vec::new(),
            tier_list_title: String::from(DEFAULT_TITLE),
            export_dir: PathBuf::from("."),
            today: NaiveDate::MIN,
        }
    }
}

/// Whole-application state.
#[derive(Debug)]
pub struct AppState {
    /// Active page.
    pub page: Page,
    /// Where keystrokes go.
    pub input_mode: InputMode,
    /// Films page.
    pub films: FilmsView,
    /// Actors page.
    pub actors: ActorsView,
    /// Tier list page.
    pub tier: TierListView,
    /// Profile page.
    pub profile: ProfileView,
    /// Detail screens, innermost last.
    pub overlays: Vec<Overlay>,
    /// One-line status (errors from actions, confirmations).
    pub status: Option<String>,
    today: NaiveDate,
    effects: Vec<Effect>,
}

impl AppState {
    /// Creates the state and queues the initial loads.
    #[must_use]
    pub fn new(options: AppOptions) -> Self {
        Self {
            page: options.page,
            input_mode: InputMode::Normal,
            films: FilmsView::new(options.debounce),
            actors: ActorsView::new(options.debounce),
            tier: TierListView::new(
                &options.tier_list_title,
                options.export_dir,
                options.debounce,
            ),
            profile: ProfileView::default(),
            overlays: Vec::new(),
            status: None,
            today: options.today,
            effects: vec![Effect::LoadHomeFeeds, Effect::LoadPeople],
        }
    }

    /// Date used for release checks.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Drains queued effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Liked, watchlist and top five.
    #[must_use]
    pub fn profile(&self) -> Profile<'_> {
        Profile::project(&self.films.catalog, &self.profile.top_five)
    }

    // --- Navigation ---

    /// Switches page, closing overlays.
    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.overlays.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Opens a movie overlay and requests its details.
    pub fn open_movie(&mut self, movie_id: u64) {
        self.overlays
            .push(Overlay::Movie(MovieDetailView::new(movie_id)));
        self.effects.push(Effect::LoadMovie(movie_id));
    }

    /// Opens a person overlay and requests their details.
    pub fn open_person(&mut self, person_id: u64) {
        self.overlays
            .push(Overlay::Person(PersonDetailView::new(person_id)));
        self.effects.push(Effect::LoadPerson(person_id));
    }

    /// Closes the innermost overlay.
    pub fn close_overlay(&mut self) {
        self.overlays.pop();
        self.input_mode = InputMode::Normal;
    }

    /// Innermost overlay.
    #[must_use]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    /// Innermost overlay, mutably.
    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlays.last_mut()
    }

    /// Opens whatever is highlighted on the current page.
    pub fn open_selected(&mut self) {
        match self.page {
            Page::Films => {
                if let Some(id) = self.films.selected().map(|m| m.id) {
                    self.open_movie(id);
                }
            }
            Page::Actors => {
                if let Some(id) = self.actors.selected().map(|p| p.id) {
                    self.open_person(id);
                }
            }
            Page::TierList => {
                if let Some(id) = self.tier.selected().map(|m| m.id) {
                    self.open_movie(id);
                }
            }
            Page::Profile => {
                if let Some(id) = self.profile_selected().map(|m| m.id) {
                    self.open_movie(id);
                }
            }
        }
    }

    /// Opens the highlighted filmography entry of the person overlay.
    pub fn open_selected_credit(&mut self) {
        let Some(Overlay::Person(view)) = self.overlay() else {
            return;
        };
        if let Some(id) = view.selected().map(|c| c.id) {
            self.open_movie(id);
        }
    }

    /// Asks the loop to reload the current page's data.
    pub fn reload(&mut self) {
        match self.page {
            Page::Films => {
                self.films.loading = true;
                self.films.error = None;
                self.effects.push(Effect::LoadHomeFeeds);
            }
            Page::Actors => {
                self.actors.loading = true;
                self.actors.error = None;
                self.effects.push(Effect::LoadPeople);
            }
            Page::TierList | Page::Profile => {}
        }
    }

    // --- Profile page ---

    /// Rows of the focused profile section.
    #[must_use]
    pub fn profile_rows(&self) -> Vec<Option<&Movie>> {
        let profile = self.profile();
        match self.profile.section {
            ProfileSection::Liked => profile.liked.into_iter().map(Some).collect(),
            ProfileSection::Watchlist => profile.watchlist.into_iter().map(Some).collect(),
            ProfileSection::TopFive => self.profile.top_five.iter().map(|(_, m)| m).collect(),
        }
    }

    /// Highlighted movie on the profile page.
    #[must_use]
    pub fn profile_selected(&self) -> Option<&Movie> {
        self.profile_rows().get(self.profile.cursor).copied().flatten()
    }

    /// Moves the profile highlight down.
    pub fn profile_down(&mut self) {
        if self.profile.cursor.saturating_add(1) < self.profile_rows().len() {
            self.profile.cursor = self.profile.cursor.saturating_add(1);
        }
    }

    /// Moves the profile highlight up.
    pub const fn profile_up(&mut self) {
        self.profile.cursor = self.profile.cursor.saturating_sub(1);
    }

    /// Switches profile section.
    pub const fn profile_section(&mut self, forward: bool) {
        self.profile.section = if forward {
            self.profile.section.next()
        } else {
            self.profile.section.prev()
        };
        self.profile.cursor = 0;
    }

    /// Clears the highlighted top five slot.
    pub fn clear_top_five_selected(&mut self) {
        if self.profile.section == ProfileSection::TopFive {
            self.profile.top_five.clear(self.profile.cursor.saturating_add(1));
        }
    }

    // --- Movie actions ---

    /// Movie the movie actions apply to: the open movie overlay, else the
    /// page highlight.
    #[must_use]
    pub fn target_movie(&self) -> Option<Movie> {
        match self.overlay() {
            Some(Overlay::Movie(view)) => self
                .films
                .catalog
                .find(view.movie_id)
                .cloned()
                .or_else(|| view.details.as_ref().map(Movie::from)),
            Some(Overlay::Person(_)) => None,
            None => match self.page {
                Page::Films => self.films.selected().cloned(),
                Page::TierList => self.tier.selected().cloned(),
                Page::Profile => self.profile_selected().cloned(),
                Page::Actors => None,
            },
        }
    }

    /// Flips "liked" on the target movie.
    pub fn toggle_like(&mut self) {
        let Some(movie) = self.target_movie() else {
            return;
        };
        self.films.catalog.ensure(movie.clone(), RECENTLY_VIEWED);
        if let Some(liked) = self.films.catalog.toggle_like(movie.id) {
            tracing::debug!(movie_id = movie.id, liked, "toggled like");
        }
    }

    /// Flips "in watchlist" on the target movie.
    pub fn toggle_watchlist(&mut self) {
        let Some(movie) = self.target_movie() else {
            return;
        };
        self.films.catalog.ensure(movie.clone(), RECENTLY_VIEWED);
        if let Some(listed) = self.films.catalog.toggle_watchlist(movie.id) {
            tracing::debug!(movie_id = movie.id, listed, "toggled watchlist");
        }
    }

    /// Rates the target movie. Unreleased movies cannot be rated.
    pub fn rank(&mut self, stars: u8) {
        let Some(movie) = self.target_movie() else {
            return;
        };
        if !movie.is_released(self.today) {
            self.status = Some(String::from("Only released movies can be rated"));
            return;
        }
        match Rank::new(stars) {
            Ok(rank) => {
                self.films.catalog.ensure(movie.clone(), RECENTLY_VIEWED);
                self.films.catalog.rank_movie(movie.id, rank);
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Puts the target movie in a top five slot.
    pub fn assign_top_five(&mut self, slot: usize) {
        let Some(movie) = self.target_movie() else {
            return;
        };
        self.status = match self.profile.top_five.assign(slot, &movie, self.today) {
            Ok(()) => Some(format!("{} is now #{slot} in your top five", movie.title)),
            Err(e) => Some(e.to_string()),
        };
    }

    /// Adds the target movie to the tier list.
    pub fn add_to_tier_list(&mut self) {
        let Some(movie) = self.target_movie() else {
            return;
        };
        let title = movie.title.clone();
        self.status = match self.tier.add(movie) {
            Ok(()) => Some(format!("Added {title} to {}", self.tier.board.title())),
            Err(e) => Some(e.to_string()),
        };
    }

    /// Toggles the full cast list in the movie overlay.
    pub fn toggle_cast(&mut self) {
        if let Some(Overlay::Movie(view)) = self.overlay_mut() {
            view.show_all_cast = !view.show_all_cast;
        }
    }

    /// Opens the IMDb page of the current overlay.
    pub fn open_imdb(&mut self) {
        let url = match self.overlay() {
            Some(Overlay::Movie(view)) => view.imdb_url(),
            Some(Overlay::Person(view)) => view.imdb_url(),
            None => None,
        };
        match url {
            Some(url) => self.effects.push(Effect::OpenUrl(url)),
            None => self.status = Some(String::from("No IMDb page available")),
        }
    }

    /// Writes the tier list export.
    pub fn save_tier_list(&mut self) {
        self.status = match self.tier.save() {
            Ok(path) => Some(format!("Saved {}", path.display())),
            Err(e) => Some(format!("{e:#}")),
        };
    }

    // --- Search ---

    /// Search box of the current page, when it has one.
    pub fn active_search(&mut self) -> Option<&mut crate::search::SearchBox> {
        match self.page {
            Page::Films => Some(&mut self.films.search),
            Page::Actors => Some(&mut self.actors.search),
            Page::TierList => Some(&mut self.tier.search),
            Page::Profile => None,
        }
    }

    /// Polls every search box and queues due searches.
    pub fn tick(&mut self, now: Instant) {
        match self.films.search.poll(now) {
            SearchPoll::Idle => {}
            SearchPoll::Clear => {
                self.films.searching = false;
                self.films.clear_results();
            }
            SearchPoll::Fire(query) => {
                self.films.searching = true;
                self.effects.push(Effect::SearchMovies {
                    target: SearchTarget::Films,
                    query,
                });
            }
        }

        match self.tier.search.poll(now) {
            SearchPoll::Idle => {}
            SearchPoll::Clear => {
                self.tier.searching = false;
                self.tier.results.clear();
                self.tier.result_cursor = 0;
            }
            SearchPoll::Fire(query) => {
                self.tier.searching = true;
                self.effects.push(Effect::SearchMovies {
                    target: SearchTarget::TierList,
                    query,
                });
            }
        }

        match self.actors.search.poll(now) {
            SearchPoll::Idle => {}
            SearchPoll::Clear => {
                self.actors.searching = false;
                self.actors.clear_results();
            }
            SearchPoll::Fire(query) => {
                self.actors.searching = true;
                self.effects.push(Effect::SearchPeople(query));
            }
        }
    }

    // --- Fetch results ---

    /// Applies a finished fetch. Results apply in arrival order.
    pub fn apply(&mut self, message: AppMessage) {
        match message {
            AppMessage::HomeFeeds(result) => self.apply_home_feeds(result),
            AppMessage::FeaturedPeople(people) => {
                self.actors.featured = people.into_iter().map(Person::from).collect();
                self.actors.featured_pager.reset();
            }
            AppMessage::TrendingPeople(result) => {
                self.actors.loading = false;
                match result {
                    Ok(list) => {
                        self.actors.trending =
                            list.people.into_iter().map(Person::from).collect();
                        self.actors.trending_pager.reset();
                        self.actors.error = None;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to fetch trending people");
                        self.actors.error = Some(format!("Failed to fetch actors: {e:#}"));
                    }
                }
            }
            AppMessage::MoviesFound { target, result } => self.apply_movie_search(target, result),
            AppMessage::PeopleFound(result) => {
                self.actors.searching = false;
                match result {
                    Ok(people) => self
                        .actors
                        .show_results(people.into_iter().map(Person::from).collect()),
                    Err(e) => {
                        tracing::warn!(error = %e, "people search failed");
                        self.actors.clear_results();
                        self.status = Some(format!("Search failed: {e:#}"));
                    }
                }
            }
            AppMessage::MovieLoaded { movie_id, result } => self.apply_movie(movie_id, result),
            AppMessage::PersonLoaded { person_id, result } => {
                for overlay in &mut self.overlays {
                    if let Overlay::Person(view) = overlay
                        && view.person_id == person_id
                    {
                        match &result {
                            Ok(details) => view.load(details.clone()),
                            Err(e) => {
                                view.error = Some(format!("Failed to fetch person details: {e:#}"));
                            }
                        }
                    }
                }
            }
        }
    }

    fn apply_home_feeds(&mut self, result: Result<HomeFeeds>) {
        self.films.loading = false;
        match result {
            Ok(feeds) => {
                let catalog = &mut self.films.catalog;
                catalog.set_category(TRENDING, movies_from(feeds.trending));
                catalog.set_category(NOW_PLAYING, movies_from(feeds.now_playing));
                catalog.set_category(UPCOMING, movies_from(feeds.upcoming));
                self.films.error = None;
                self.films.clamp_focus();
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch home feeds");
                self.films.error = Some(format!("Failed to fetch movies: {e:#}"));
            }
        }
    }

    fn apply_movie_search(&mut self, target: SearchTarget, result: Result<MovieList>) {
        match (target, result) {
            (SearchTarget::Films, Ok(list)) => {
                self.films.searching = false;
                self.films.show_results(movies_from(list));
            }
            (SearchTarget::TierList, Ok(list)) => {
                self.tier.searching = false;
                self.tier.results = movies_from(list);
                self.tier.result_cursor = 0;
                self.tier.message = None;
            }
            (SearchTarget::Films, Err(e)) => {
                tracing::warn!(error = %e, "movie search failed");
                self.films.searching = false;
                self.films.clear_results();
                self.status = Some(format!("Search failed: {e:#}"));
            }
            (SearchTarget::TierList, Err(e)) => {
                tracing::warn!(error = %e, "tier list search failed");
                self.tier.searching = false;
                self.tier.results.clear();
                let message = format!("Search failed: {e:#}");
                self.tier.message = Some(message.clone());
                self.status = Some(message);
            }
        }
    }

    fn apply_movie(&mut self, movie_id: u64, result: Result<MovieDetails>) {
        if let Ok(details) = &result {
            self.films
                .catalog
                .ensure(Movie::from(details), RECENTLY_VIEWED);
        }
        for overlay in &mut self.overlays {
            if let Overlay::Movie(view) = overlay
                && view.movie_id == movie_id
            {
                match &result {
                    Ok(details) => view.load(details.clone()),
                    Err(e) => {
                        view.error = Some(format!("Failed to fetch movie details: {e:#}"));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use anyhow::anyhow;

    use super::*;
    use crate::app::views::{ActorSection, SEARCH_RESULTS};
    use crate::tier_list::Tier;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    fn make_state() -> AppState {
        AppState::new(AppOptions {
            today: today(),
            ..AppOptions::default()
        })
    }

    fn fixture_list(json: &str) -> MovieList {
        serde_json::from_str(json).unwrap()
    }

    fn home_feeds() -> HomeFeeds {
        HomeFeeds {
            trending: fixture_list(include_str!("../../../../fixtures/api/trending.json")),
            now_playing: fixture_list(include_str!("../../../../fixtures/api/now_playing.json")),
            upcoming: fixture_list(include_str!("../../../../fixtures/api/upcoming.json")),
        }
    }

    fn movie_details() -> MovieDetails {
        serde_json::from_str(include_str!(
            "../../../../fixtures/api/movie_details_27205.json"
        ))
        .unwrap()
    }

    fn loaded_state() -> AppState {
        let mut state = make_state();
        state.take_effects();
        state.apply(AppMessage::HomeFeeds(Ok(home_feeds())));
        state
    }

    #[test]
    fn test_initial_effects() {
        // Arrange
        let mut state = make_state();

        // Act
        let effects = state.take_effects();

        // Assert
        assert_eq!(effects, vec![Effect::LoadHomeFeeds, Effect::LoadPeople]);
        assert!(state.take_effects().is_empty());
        assert!(state.films.loading);
    }

    #[test]
    fn test_home_feeds_fill_catalog() {
        // Arrange & Act
        let state = loaded_state();

        // Assert
        let names: Vec<&str> = state
            .films
            .catalog
            .categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec![TRENDING, NOW_PLAYING, UPCOMING]);
        assert!(!state.films.loading);
        assert_eq!(state.films.selected().unwrap().title, "Moana 2");
    }

    #[test]
    fn test_home_feeds_failure_sets_error() {
        // Arrange
        let mut state = make_state();

        // Act
        state.apply(AppMessage::HomeFeeds(Err(anyhow!(
            "cinescore API error (HTTP 500 Internal Server Error): api/v1/discover/trending"
        ))));

        // Assert
        let error = state.films.error.unwrap();
        assert!(error.starts_with("Failed to fetch movies"));
        assert!(error.contains("HTTP 500"));
    }

    #[test]
    fn test_toggle_like_on_films_page_marks_all_copies() {
        // Arrange: Inception is in trending and now playing
        let mut state = loaded_state();
        state.films.cursor = 2;

        // Act
        state.toggle_like();

        // Assert
        let liked: Vec<u64> = state.profile().liked.iter().map(|m| m.id).collect();
        assert_eq!(liked, vec![27_205]);
        let now_playing = &state.films.catalog.categories()[1];
        assert!(now_playing.movies[0].is_liked);
        assert!(!now_playing.movies[1].is_liked);
    }

    #[test]
    fn test_search_fires_after_debounce_and_results_lead() {
        // Arrange
        let mut state = loaded_state();
        let start = Instant::now();
        let search = state.active_search().unwrap();
        search.set("inception", start);

        // Act
        state.tick(start);
        let early = state.take_effects();
        state.tick(start + DEFAULT_DEBOUNCE);
        let fired = state.take_effects();

        // Assert
        assert!(early.is_empty());
        assert_eq!(
            fired,
            vec![Effect::SearchMovies {
                target: SearchTarget::Films,
                query: String::from("inception"),
            }]
        );

        // Act
        state.apply(AppMessage::MoviesFound {
            target: SearchTarget::Films,
            result: Ok(fixture_list(include_str!(
                "../../../../fixtures/api/search_movies_inception.json"
            ))),
        });

        // Assert
        assert_eq!(state.films.focused().unwrap().name, SEARCH_RESULTS);
        assert_eq!(state.films.catalog.categories()[0].movies.len(), 2);
    }

    #[test]
    fn test_short_search_never_queues_request() {
        // Arrange
        let mut state = loaded_state();
        let start = Instant::now();
        state.films.show_results(Vec::new());
        state.films.search.set("i", start);

        // Act
        state.tick(start + DEFAULT_DEBOUNCE);

        // Assert
        assert!(state.take_effects().is_empty());
        assert!(state.films.catalog.position(SEARCH_RESULTS).is_none());
    }

    #[test]
    fn test_last_search_response_wins() {
        // Arrange
        let mut state = loaded_state();
        let older = fixture_list(include_str!("../../../../fixtures/api/trending.json"));
        let newer = fixture_list(include_str!("../../../../fixtures/api/upcoming.json"));

        // Act: responses for two queries arrive out of order
        state.apply(AppMessage::MoviesFound {
            target: SearchTarget::TierList,
            result: Ok(newer),
        });
        state.apply(AppMessage::MoviesFound {
            target: SearchTarget::TierList,
            result: Ok(older),
        });

        // Assert
        assert_eq!(state.tier.results.len(), 3);
    }

    #[test]
    fn test_movie_overlay_load_and_actions() {
        // Arrange
        let mut state = loaded_state();
        state.open_movie(27_205);
        assert_eq!(state.take_effects(), vec![Effect::LoadMovie(27_205)]);

        // Act
        state.apply(AppMessage::MovieLoaded {
            movie_id: 27_205,
            result: Ok(movie_details()),
        });
        state.toggle_watchlist();
        state.rank(5);
        state.assign_top_five(1);
        state.open_imdb();

        // Assert
        let movie = state.films.catalog.find(27_205).unwrap();
        assert!(movie.in_watchlist);
        assert_eq!(movie.rank.stars(), 5);
        assert_eq!(state.profile.top_five.slot_of(27_205), Some(1));
        assert_eq!(
            state.take_effects(),
            vec![Effect::OpenUrl(String::from(
                "https://www.imdb.com/title/tt1375666"
            ))]
        );
    }

    #[test]
    fn test_unreleased_movie_cannot_be_rated() {
        // Arrange: "Untitled Sequel" has no release date
        let mut state = loaded_state();
        state.films.focus = 2;
        state.films.cursor = 0;

        // Act
        state.rank(4);

        // Assert
        assert_eq!(
            state.status.as_deref(),
            Some("Only released movies can be rated")
        );
        assert_eq!(
            state.films.catalog.find(1_405_338).unwrap().rank,
            Rank::UNRANKED
        );
    }

    #[test]
    fn test_movie_overlay_load_failure() {
        // Arrange
        let mut state = loaded_state();
        state.open_movie(1);

        // Act
        state.apply(AppMessage::MovieLoaded {
            movie_id: 1,
            result: Err(anyhow!("cinescore API error (HTTP 404 Not Found): api/v1/movies/1")),
        });

        // Assert
        let error = match state.overlay() {
            Some(Overlay::Movie(view)) => view.error.clone(),
            _ => None,
        };
        assert!(error.unwrap().starts_with("Failed to fetch movie details"));
    }

    #[test]
    fn test_movie_from_person_filmography_lands_in_recently_viewed() {
        // Arrange
        let mut state = loaded_state();
        state.open_movie(597);
        let mut details = movie_details();
        details.id = 597;
        details.title = String::from("Titanic");

        // Act
        state.apply(AppMessage::MovieLoaded {
            movie_id: 597,
            result: Ok(details),
        });
        state.toggle_like();

        // Assert
        let idx = state.films.catalog.position(RECENTLY_VIEWED).unwrap();
        assert_eq!(state.films.catalog.categories()[idx].movies[0].id, 597);
        assert_eq!(state.profile().liked[0].title, "Titanic");
    }

    #[test]
    fn test_people_loaded_and_filtered() {
        // Arrange
        let mut state = make_state();
        let trending: PeopleList =
            serde_json::from_str(include_str!("../../../../fixtures/api/trending_people.json"))
                .unwrap();

        // Act
        state.apply(AppMessage::TrendingPeople(Ok(trending)));
        state.actors.section = ActorSection::Trending;
        state.actors.filter_push('n');
        state.actors.filter_push('o');
        state.actors.filter_push('l');

        // Assert
        assert!(!state.actors.loading);
        let visible = state.actors.visible(ActorSection::Trending);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Christopher Nolan");
    }

    #[test]
    fn test_trending_people_failure_is_fatal_for_page() {
        // Arrange
        let mut state = make_state();

        // Act
        state.apply(AppMessage::FeaturedPeople(Vec::new()));
        state.apply(AppMessage::TrendingPeople(Err(anyhow!("boom"))));

        // Assert
        assert!(state.actors.error.is_some());
    }

    #[test]
    fn test_tier_list_add_via_state_and_duplicate_status() {
        // Arrange
        let mut state = loaded_state();
        state.films.cursor = 1;

        // Act
        state.add_to_tier_list();
        state.add_to_tier_list();

        // Assert
        assert_eq!(
            state.status.as_deref(),
            Some("This movie is already in your tier list")
        );
        assert_eq!(
            state.tier.message.as_deref(),
            Some("This movie is already in your tier list")
        );
        assert_eq!(state.tier.board.movies(Tier::Unassigned)[0].title, "Armor");
    }

    #[test]
    fn test_tier_list_search_failure_reports_message() {
        // Arrange
        let mut state = loaded_state();
        state.tier.results = state.films.catalog.categories()[0].movies.clone();
        state.tier.searching = true;

        // Act
        state.apply(AppMessage::MoviesFound {
            target: SearchTarget::TierList,
            result: Err(anyhow!("connection refused")),
        });

        // Assert
        assert!(state.tier.results.is_empty());
        assert!(!state.tier.searching);
        assert_eq!(
            state.tier.message.as_deref(),
            Some("Search failed: connection refused")
        );
        assert_eq!(state.status, state.tier.message);
    }

    #[test]
    fn test_switch_page_closes_overlays() {
        // Arrange
        let mut state = loaded_state();
        state.open_person(6193);
        state.input_mode = InputMode::TopFivePick;

        // Act
        state.switch_page(Page::TierList);

        // Assert
        assert!(state.overlay().is_none());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.page.next(), Page::Profile);
    }

    #[test]
    fn test_profile_top_five_rows_and_clear() {
        // Arrange
        let mut state = loaded_state();
        state.films.cursor = 2;
        state.assign_top_five(3);
        state.switch_page(Page::Profile);

        // Act
        state.profile_section(false);
        state.profile_down();
        state.profile_down();
        let selected = state.profile_selected().map(|m| m.id);
        state.clear_top_five_selected();

        // Assert
        assert_eq!(state.profile.section, ProfileSection::TopFive);
        assert_eq!(selected, Some(27_205));
        assert!(state.profile.top_five.get(3).is_none());
    }
}
