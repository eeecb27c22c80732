//! Interactive terminal app main loop.

/// Application state and the messages that drive it.
pub mod state;
mod ui;
/// Per-page view state.
pub mod views;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedSender};

use cinescore_api::{
    CinescoreApi, CinescoreClient, fetch_featured_people, fetch_home_feeds,
    search_people_with_biographies,
};

use self::state::{AppMessage, AppOptions, AppState, Effect, InputMode, Page};
use self::views::Overlay;

/// Idle wait between input polls.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the interactive app until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_app(client: CinescoreClient, options: AppOptions) -> Result<()> {
    let featured: Arc<[u64]> = Arc::from(options.featured_people.as_slice());
    let mut state = AppState::new(options);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &client, &featured).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    client: &CinescoreClient,
    featured: &Arc<[u64]>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        for effect in state.take_effects() {
            run_effect(effect, client, featured, &tx);
        }

        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        while let Ok(message) = rx.try_recv() {
            state.apply(message);
        }

        let mut key_handled = false;
        if event::poll(Duration::ZERO).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            if handle_key(state, key.code, key.modifiers, Instant::now()) {
                return Ok(());
            }
            key_handled = true;
        }
        pause(key_handled).await;

        state.tick(Instant::now());
    }
}

/// Hands the runtime to spawned fetch tasks before the next frame. Waits a
/// full frame only when no key was handled, so held keys stay responsive.
async fn pause(key_handled: bool) {
    if key_handled {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
}

/// Starts the work an effect asks for. Fetches run as tasks and report back
/// through `tx`.
fn run_effect(
    effect: Effect,
    client: &CinescoreClient,
    featured: &Arc<[u64]>,
    tx: &UnboundedSender<AppMessage>,
) {
    tracing::debug!(?effect, "running effect");
    let client = client.clone();
    let tx = tx.clone();
    match effect {
        Effect::LoadHomeFeeds => {
            tokio::spawn(async move {
                let result = fetch_home_feeds(&client).await;
                let _ = tx.send(AppMessage::HomeFeeds(result));
            });
        }
        Effect::LoadPeople => {
            let ids = Arc::clone(featured);
            let trending_client = client.clone();
            let trending_tx = tx.clone();
            tokio::spawn(async move {
                let people = fetch_featured_people(&client, &ids).await;
                let _ = tx.send(AppMessage::FeaturedPeople(people));
            });
            tokio::spawn(async move {
                let result = trending_client.trending_people().await;
                let _ = trending_tx.send(AppMessage::TrendingPeople(result));
            });
        }
        Effect::SearchMovies { target, query } => {
            tokio::spawn(async move {
                let result = client.search_movies(&query).await;
                let _ = tx.send(AppMessage::MoviesFound { target, result });
            });
        }
        Effect::SearchPeople(query) => {
            tokio::spawn(async move {
                let result = search_people_with_biographies(&client, &query).await;
                let _ = tx.send(AppMessage::PeopleFound(result));
            });
        }
        Effect::LoadMovie(movie_id) => {
            tokio::spawn(async move {
                let result = client.movie_details(movie_id).await;
                let _ = tx.send(AppMessage::MovieLoaded { movie_id, result });
            });
        }
        Effect::LoadPerson(person_id) => {
            tokio::spawn(async move {
                let result = client.person_details(person_id).await;
                let _ = tx.send(AppMessage::PersonLoaded { person_id, result });
            });
        }
        Effect::OpenUrl(url) => {
            let _ = open::that(&url);
        }
    }
}

/// Routes a key press by input mode. Returns `true` to exit.
fn handle_key(state: &mut AppState, key: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    match state.input_mode {
        InputMode::Search => handle_search_input(state, key, now),
        InputMode::Filter => handle_filter_input(state, key),
        InputMode::Rename => handle_rename_input(state, key),
        InputMode::TopFivePick => handle_top_five_input(state, key),
        InputMode::Normal => return handle_normal_input(state, key),
    }
    false
}

/// Handles typing into the page's search box.
fn handle_search_input(state: &mut AppState, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Esc => {
            if let Some(search) = state.active_search() {
                search.clear(now);
            }
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter if state.page == Page::TierList && !state.tier.results.is_empty() => {
            match state.tier.add_selected_result() {
                Ok(()) => {
                    state.tier.search.clear(now);
                    state.input_mode = InputMode::Normal;
                }
                Err(e) => state.status = Some(e.to_string()),
            }
        }
        KeyCode::Enter => state.input_mode = InputMode::Normal,
        KeyCode::Up if state.page == Page::TierList => state.tier.result_up(),
        KeyCode::Down if state.page == Page::TierList => state.tier.result_down(),
        KeyCode::Backspace => {
            if let Some(search) = state.active_search() {
                search.pop(now);
            }
        }
        KeyCode::Char(c) => {
            if let Some(search) = state.active_search() {
                search.push(c, now);
            }
        }
        _ => {}
    }
}

/// Handles typing into the actors name filter.
fn handle_filter_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            state.actors.clear_filter();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => state.input_mode = InputMode::Normal,
        KeyCode::Backspace => state.actors.filter_pop(),
        KeyCode::Char(c) => state.actors.filter_push(c),
        _ => {}
    }
}

/// Handles editing the tier list title.
fn handle_rename_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            state.tier.title_draft.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            state.tier.commit_rename();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.tier.title_draft.pop();
        }
        KeyCode::Char(c) => state.tier.title_draft.push(c),
        _ => {}
    }
}

/// Handles choosing a top five slot.
fn handle_top_five_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Char(c) => {
            if let Some(slot) = c.to_digit(10).and_then(|d| usize::try_from(d).ok()) {
                state.assign_top_five(slot);
                state.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Esc => state.input_mode = InputMode::Normal,
        _ => {}
    }
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input(state: &mut AppState, key: KeyCode) -> bool {
    state.status = None;
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => state.switch_page(state.page.next()),
        KeyCode::BackTab => state.switch_page(state.page.prev()),
        _ => match state.overlay() {
            Some(Overlay::Movie(_)) => handle_movie_overlay_input(state, key),
            Some(Overlay::Person(_)) => handle_person_overlay_input(state, key),
            None => match state.page {
                Page::Films => handle_films_input(state, key),
                Page::Actors => handle_actors_input(state, key),
                Page::TierList => handle_tier_list_input(state, key),
                Page::Profile => handle_profile_input(state, key),
            },
        },
    }
    false
}

fn handle_movie_overlay_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Backspace => state.close_overlay(),
        KeyCode::Char('f') => state.toggle_like(),
        KeyCode::Char('w') => state.toggle_watchlist(),
        KeyCode::Char('a') => state.add_to_tier_list(),
        KeyCode::Char('c') => state.toggle_cast(),
        KeyCode::Char('i') => state.open_imdb(),
        KeyCode::Char('t') => state.input_mode = InputMode::TopFivePick,
        KeyCode::Char(c @ '0'..='5') => {
            if let Some(stars) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                state.rank(stars);
            }
        }
        _ => {}
    }
}

fn handle_person_overlay_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Backspace => state.close_overlay(),
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(Overlay::Person(view)) = state.overlay_mut() {
                view.move_up();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(Overlay::Person(view)) = state.overlay_mut() {
                view.move_down();
            }
        }
        KeyCode::Enter => state.open_selected_credit(),
        KeyCode::Char('i') => state.open_imdb(),
        _ => {}
    }
}

fn handle_films_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => state.films.focus_up(),
        KeyCode::Down | KeyCode::Char('j') => state.films.focus_down(),
        KeyCode::Left | KeyCode::Char('h') => state.films.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.films.move_right(),
        KeyCode::Char(']') => state.films.next_page(),
        KeyCode::Char('[') => state.films.prev_page(),
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('f') => state.toggle_like(),
        KeyCode::Char('w') => state.toggle_watchlist(),
        KeyCode::Char('a') => state.add_to_tier_list(),
        KeyCode::Char('/') => state.input_mode = InputMode::Search,
        KeyCode::Char('r') => state.reload(),
        _ => {}
    }
}

fn handle_actors_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => state.actors.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.actors.move_down(),
        KeyCode::Char(']') | KeyCode::PageDown => state.actors.next_page(),
        KeyCode::Char('[') | KeyCode::PageUp => state.actors.prev_page(),
        KeyCode::Char('n') => state.actors.next_section(),
        KeyCode::Char('/') => state.input_mode = InputMode::Filter,
        KeyCode::Char('s') => state.input_mode = InputMode::Search,
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('r') => state.reload(),
        _ => {}
    }
}

fn handle_tier_list_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => state.tier.tier_up(),
        KeyCode::Down | KeyCode::Char('j') => state.tier.tier_down(),
        KeyCode::Left | KeyCode::Char('h') => state.tier.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.tier.move_right(),
        KeyCode::Char(' ') => {
            state.tier.pick_or_drop();
        }
        KeyCode::Char('x') => state.tier.remove_selected(),
        KeyCode::Char('R') => state.tier.reset(),
        KeyCode::Char('e') => {
            state.tier.begin_rename();
            state.input_mode = InputMode::Rename;
        }
        KeyCode::Char('S') => state.save_tier_list(),
        KeyCode::Char('/') => state.input_mode = InputMode::Search,
        KeyCode::Enter => state.open_selected(),
        _ => {}
    }
}

fn handle_profile_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => state.profile_section(false),
        KeyCode::Right | KeyCode::Char('l') => state.profile_section(true),
        KeyCode::Up | KeyCode::Char('k') => state.profile_up(),
        KeyCode::Down | KeyCode::Char('j') => state.profile_down(),
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('f') => state.toggle_like(),
        KeyCode::Char('w') => state.toggle_watchlist(),
        KeyCode::Char('x') => state.clear_top_five_selected(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::NaiveDate;

    use super::*;
    use crate::movie::{Movie, Rank};
    use crate::tier_list::Tier;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: String::from(title),
            poster: String::new(),
            description: String::new(),
            score: 0.0,
            is_liked: false,
            in_watchlist: false,
            release_date: NaiveDate::from_ymd_opt(2010, 7, 15),
            rank: Rank::UNRANKED,
        }
    }

    #[tokio::test]
    async fn test_pause_after_key_lets_fetch_tasks_run() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let _ = tx.send(AppMessage::PeopleFound(Ok(Vec::new())));
        });

        // Act
        pause(true).await;

        // Assert
        assert!(rx.try_recv().is_ok());
    }

    fn make_state() -> AppState {
        let mut state = AppState::new(AppOptions {
            today: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            ..AppOptions::default()
        });
        state.take_effects();
        state
    }

    fn press(state: &mut AppState, keys: &[KeyCode], now: Instant) -> bool {
        keys.iter()
            .any(|&key| handle_key(state, key, KeyModifiers::NONE, now))
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut state = make_state();

        // Act & Assert
        assert!(handle_key(
            &mut state,
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            Instant::now()
        ));
        assert!(press(&mut state, &[KeyCode::Char('q')], Instant::now()));
    }

    #[test]
    fn test_q_while_searching_is_typed() {
        // Arrange
        let mut state = make_state();
        let now = Instant::now();

        // Act
        let quit = press(
            &mut state,
            &[KeyCode::Char('/'), KeyCode::Char('q'), KeyCode::Char('u')],
            now,
        );

        // Assert
        assert!(!quit);
        assert_eq!(state.input_mode, InputMode::Search);
        assert_eq!(state.films.search.text(), "qu");
    }

    #[test]
    fn test_tab_cycles_pages() {
        // Arrange
        let mut state = make_state();

        // Act
        press(&mut state, &[KeyCode::Tab, KeyCode::Tab], Instant::now());

        // Assert
        assert_eq!(state.page, Page::TierList);

        // Act
        press(&mut state, &[KeyCode::BackTab; 3], Instant::now());

        // Assert
        assert_eq!(state.page, Page::Profile);
    }

    #[test]
    fn test_enter_opens_overlay_and_esc_closes() {
        // Arrange
        let mut state = make_state();
        state
            .films
            .catalog
            .set_category("Trending Now", vec![movie(27_205, "Inception")]);

        // Act
        press(&mut state, &[KeyCode::Enter], Instant::now());

        // Assert
        assert!(matches!(state.overlay(), Some(Overlay::Movie(_))));
        assert_eq!(state.take_effects(), vec![Effect::LoadMovie(27_205)]);

        // Act
        press(&mut state, &[KeyCode::Char('t'), KeyCode::Char('2')], Instant::now());
        press(&mut state, &[KeyCode::Esc], Instant::now());

        // Assert
        assert!(state.overlay().is_none());
        assert_eq!(state.profile.top_five.slot_of(27_205), Some(2));
    }

    #[test]
    fn test_tier_list_keys_move_between_tiers() {
        // Arrange
        let mut state = make_state();
        state.switch_page(Page::TierList);
        state.tier.add(movie(1, "Moana 2")).unwrap();

        // Act: pick from unassigned, go up six rows to S, drop
        press(&mut state, &[KeyCode::Char(' ')], Instant::now());
        press(&mut state, &[KeyCode::Char('k'); 6], Instant::now());
        press(&mut state, &[KeyCode::Char(' ')], Instant::now());

        // Assert
        assert_eq!(state.tier.tier, Tier::S);
        assert_eq!(state.tier.board.movies(Tier::S)[0].id, 1);
    }

    #[test]
    fn test_rename_flow() {
        // Arrange
        let mut state = make_state();
        state.switch_page(Page::TierList);
        let mut keys = vec![KeyCode::Char('e')];
        keys.extend(std::iter::repeat_n(KeyCode::Backspace, 40));
        keys.extend("Horror".chars().map(KeyCode::Char));
        keys.push(KeyCode::Enter);

        // Act
        press(&mut state, &keys, Instant::now());

        // Assert
        assert_eq!(state.tier.board.title(), "Horror");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_actor_filter_escape_clears() {
        // Arrange
        let mut state = make_state();
        state.switch_page(Page::Actors);

        // Act
        press(
            &mut state,
            &[KeyCode::Char('/'), KeyCode::Char('a'), KeyCode::Char('n')],
            Instant::now(),
        );
        let typed = state.actors.filter.clone();
        press(&mut state, &[KeyCode::Esc], Instant::now());

        // Assert
        assert_eq!(typed, "an");
        assert!(state.actors.filter.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
