//! TUI rendering logic.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap};

use super::state::{AppState, InputMode, Page};
use super::views::{ActorSection, MovieDetailView, Overlay, PersonDetailView, ProfileSection};
use crate::movie::{MAX_RANK, Movie, Rank};
use crate::person::{Person, truncate_biography};
use crate::tier_list::Tier;

/// Rows per category block: five movies, header and borders.
const CATEGORY_HEIGHT: u16 = 9;

fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Star string for a rank ("★★★☆☆"), or "-" when unranked.
fn stars(rank: Rank) -> String {
    if !rank.is_ranked() {
        return String::from("-");
    }
    let filled = usize::from(rank.stars());
    let empty = usize::from(MAX_RANK.saturating_sub(rank.stars()));
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(empty))
}

/// Like/watchlist markers.
fn flags(movie: &Movie) -> String {
    let mut out = String::new();
    if movie.is_liked {
        out.push('\u{2665}');
    }
    if movie.in_watchlist {
        out.push('+');
    }
    out
}

/// Draws the whole UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tabs + input
            Constraint::Min(5),    // page
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    match state.page {
        Page::Films => draw_films(frame, chunks[1], state),
        Page::Actors => draw_actors(frame, chunks[1], state),
        Page::TierList => draw_tier_list(frame, chunks[1], state),
        Page::Profile => draw_profile(frame, chunks[1], state),
    }

    match state.overlay() {
        Some(Overlay::Movie(view)) => draw_movie_detail(frame, chunks[1], state, view),
        Some(Overlay::Person(view)) => draw_person_detail(frame, chunks[1], view),
        None => {}
    }

    draw_footer(frame, chunks[2], state);
}

/// Draws page tabs and the page's text input.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let tabs = Tabs::new(Page::ALL.iter().map(|p| p.title()))
        .select(state.page.index())
        .highlight_style(highlight_style())
        .block(Block::default().borders(Borders::ALL).title(" cinescore "));
    frame.render_widget(tabs, header_chunks[0]);

    let (title, text, searching) = match (state.page, state.input_mode) {
        (_, InputMode::Rename) => (" Rename ", state.tier.title_draft.clone(), false),
        (Page::Actors, InputMode::Filter) => (" Filter: / ", state.actors.filter.clone(), false),
        (Page::Films, _) => (
            " Search movies: / ",
            String::from(state.films.search.text()),
            state.films.searching,
        ),
        (Page::Actors, _) => (
            " Search people: s ",
            String::from(state.actors.search.text()),
            state.actors.searching,
        ),
        (Page::TierList, _) => (
            " Add movie: / ",
            String::from(state.tier.search.text()),
            state.tier.searching,
        ),
        (Page::Profile, _) => (" Profile ", String::new(), false),
    };

    let typing = matches!(
        state.input_mode,
        InputMode::Search | InputMode::Filter | InputMode::Rename
    );
    let style = if typing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::raw(text)];
    if searching {
        spans.push(Span::styled(
            "  searching...",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let input = Paragraph::new(Line::from(spans))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, header_chunks[1]);
}

/// Draws a bordered one-message panel.
fn draw_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

// --- Films ---

/// Draws the category carousels, scrolled so the focused one is visible.
fn draw_films(frame: &mut Frame, area: Rect, state: &AppState) {
    let films = &state.films;
    if let Some(error) = &films.error {
        draw_message(frame, area, " Films ", error, Color::Red);
        return;
    }
    if films.catalog.is_empty() {
        let message = if films.loading {
            "Loading movies..."
        } else {
            "No movies found."
        };
        draw_message(frame, area, " Films ", message, Color::DarkGray);
        return;
    }

    let fits = usize::from(area.height.checked_div(CATEGORY_HEIGHT).unwrap_or(1).max(1));
    let first = films.focus.saturating_add(1).saturating_sub(fits);
    let shown: Vec<(usize, &crate::catalog::Category)> = films
        .catalog
        .categories()
        .iter()
        .enumerate()
        .skip(first)
        .take(fits)
        .collect();

    let constraints: Vec<Constraint> = shown
        .iter()
        .map(|_| Constraint::Length(CATEGORY_HEIGHT))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for ((idx, category), chunk) in shown.into_iter().zip(chunks.iter()) {
        let focused = idx == films.focus;
        let total = category.pager.total_pages(category.movies.len()).max(1);
        let title = format!(
            " {} ({}/{total}) ",
            category.name,
            category.pager.page().saturating_add(1)
        );

        let header = Row::new(vec!["Title", "Year", "Score", "Rating", ""]).style(header_style());
        let rows: Vec<Row> = category
            .visible()
            .iter()
            .map(|m| {
                Row::new(vec![
                    m.title.clone(),
                    m.year_label(),
                    format!("{:.1}", m.score),
                    stars(m.rank),
                    flags(m),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(3),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(focus_style(focused)),
            )
            .row_highlight_style(highlight_style());

        let mut table_state = TableState::default();
        if focused {
            table_state.select(Some(films.cursor));
        }
        frame.render_stateful_widget(table, *chunk, &mut table_state);
    }
}

// --- Actors ---

/// Draws the focused people list and a preview of the highlighted person.
#[allow(clippy::indexing_slicing)]
fn draw_actors(frame: &mut Frame, area: Rect, state: &AppState) {
    let actors = &state.actors;
    if let Some(error) = &actors.error {
        draw_message(frame, area, " Actors ", error, Color::Red);
        return;
    }
    if actors.loading && actors.trending.is_empty() && actors.featured.is_empty() {
        draw_message(frame, area, " Actors ", "Loading actors...", Color::DarkGray);
        return;
    }

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let section = actors.section;
    let pager = match section {
        ActorSection::Featured => Some(&actors.featured_pager),
        ActorSection::Trending => Some(&actors.trending_pager),
        ActorSection::Search => None,
    };
    let filtered_len = actors.filtered(section).len();
    let title = pager.map_or_else(
        || format!(" {} ", section.title()),
        |p| {
            format!(
                " {} ({}/{}) ",
                section.title(),
                p.page().saturating_add(1),
                p.total_pages(filtered_len).max(1)
            )
        },
    );

    let header = Row::new(vec!["Name", "Known for"]).style(header_style());
    let rows: Vec<Row> = actors
        .visible(section)
        .iter()
        .map(|p| Row::new(vec![p.name.clone(), p.department.clone()]))
        .collect();
    let widths = [Constraint::Min(20), Constraint::Length(14)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_style(true)),
        )
        .row_highlight_style(highlight_style());
    let mut table_state = TableState::default().with_selected(Some(actors.cursor));
    frame.render_stateful_widget(table, pane_chunks[0], &mut table_state);

    draw_person_preview(frame, pane_chunks[1], actors.selected());
}

fn draw_person_preview(frame: &mut Frame, area: Rect, person: Option<&Person>) {
    let Some(person) = person else {
        draw_message(frame, area, " Person ", "No matching people.", Color::DarkGray);
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(person.name.clone(), header_style())),
        Line::from(format!("Known for: {}", person.department)),
        Line::from(""),
    ];
    if let Some(bio) = &person.biography {
        lines.push(Line::from(truncate_biography(bio)));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter: open details",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Person "));
    frame.render_widget(paragraph, area);
}

// --- Tier list ---

/// Draws the tier rows and, while searching, the search results.
#[allow(clippy::indexing_slicing)]
fn draw_tier_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let tier = &state.tier;
    let show_results = !tier.results.is_empty();
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if show_results {
            [Constraint::Percentage(65), Constraint::Percentage(35)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(area);

    let held_id = tier.held.map(|(id, _)| id);
    let mut lines: Vec<Line> = Tier::ALL
        .iter()
        .map(|&t| {
            let row_focused = t == tier.tier;
            let label_style = if row_focused {
                highlight_style()
            } else {
                header_style()
            };
            let mut spans = vec![Span::styled(format!("{:>10} ", t.label()), label_style)];
            for (i, movie) in tier.board.movies(t).iter().enumerate() {
                let style = if held_id == Some(movie.id) {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else if row_focused && i == tier.cursor {
                    highlight_style().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!(" {} ", movie.title), style));
                spans.push(Span::raw("|"));
            }
            Line::from(spans)
        })
        .collect();
    if let Some(message) = &tier.message {
        lines.insert(
            0,
            Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
        );
    }

    let title = format!(" {} ({} movies) ", tier.board.title(), tier.board.len());
    let board = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(board, pane_chunks[0]);

    if show_results {
        let rows: Vec<Row> = tier
            .results
            .iter()
            .map(|m| Row::new(vec![m.title.clone(), m.year_label()]))
            .collect();
        let widths = [Constraint::Min(16), Constraint::Length(6)];
        let table = Table::new(rows, widths)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results (Enter: add) "),
            )
            .row_highlight_style(highlight_style());
        let mut table_state = TableState::default().with_selected(Some(tier.result_cursor));
        frame.render_stateful_widget(table, pane_chunks[1], &mut table_state);
    }
}

// --- Profile ---

/// Draws the profile sections.
#[allow(clippy::indexing_slicing)]
fn draw_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(20)])
        .split(area);

    let profile = state.profile();
    let sections = [
        (ProfileSection::Liked, profile.liked.len()),
        (ProfileSection::Watchlist, profile.watchlist.len()),
        (ProfileSection::TopFive, profile.top_five.iter().filter(|(_, m)| m.is_some()).count()),
    ];
    let section_lines: Vec<Line> = sections
        .iter()
        .map(|(section, count)| {
            let style = if *section == state.profile.section {
                highlight_style()
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{} ({count})", section.title()), style))
        })
        .collect();
    let menu = Paragraph::new(section_lines)
        .block(Block::default().borders(Borders::ALL).title(" Profile "));
    frame.render_widget(menu, pane_chunks[0]);

    let header = Row::new(vec!["#", "Title", "Year", "Rating", ""]).style(header_style());
    let rows: Vec<Row> = state
        .profile_rows()
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let slot = i.saturating_add(1).to_string();
            movie.map_or_else(
                || Row::new(vec![slot.clone(), String::from("(empty)")]),
                |m| {
                    Row::new(vec![
                        slot.clone(),
                        m.title.clone(),
                        m.year_label(),
                        stars(m.rank),
                        flags(m),
                    ])
                },
            )
        })
        .collect();
    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(3),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state.profile.section.title())),
        )
        .row_highlight_style(highlight_style());
    let mut table_state = TableState::default().with_selected(Some(state.profile.cursor));
    frame.render_stateful_widget(table, pane_chunks[1], &mut table_state);
}

// --- Overlays ---

/// Draws the movie detail overlay.
#[allow(clippy::indexing_slicing)]
fn draw_movie_detail(frame: &mut Frame, area: Rect, state: &AppState, view: &MovieDetailView) {
    frame.render_widget(Clear, area);
    if let Some(error) = &view.error {
        draw_message(frame, area, " Movie ", error, Color::Red);
        return;
    }
    let Some(details) = &view.details else {
        draw_message(frame, area, " Movie ", "Loading movie...", Color::DarkGray);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let movie = state.films.catalog.find(details.id);
    let released = movie.is_some_and(|m| m.is_released(state.today()));
    let year = movie.map_or_else(|| String::from("----"), Movie::year_label);

    let mut lines = vec![
        Line::from(Span::styled(format!("{} ({year})", details.title), header_style())),
    ];
    if !details.tagline.is_empty() {
        lines.push(Line::from(Span::styled(
            details.tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(format!(
        "Runtime: {} min   Score: {:.1}",
        details.runtime, details.overall_score
    )));
    if let Some(director) = view.credits.director() {
        lines.push(Line::from(format!("Director: {}", director.name)));
    }
    let languages: Vec<&str> = details
        .spoken_languages
        .iter()
        .map(|l| l.english_name.as_str())
        .collect();
    if !languages.is_empty() {
        lines.push(Line::from(format!("Languages: {}", languages.join(", "))));
    }
    if let Some(m) = movie {
        lines.push(Line::from(format!(
            "Liked: {}   Watchlist: {}   Your rating: {}",
            if m.is_liked { "yes" } else { "no" },
            if m.in_watchlist { "yes" } else { "no" },
            stars(m.rank),
        )));
    }
    if let Some(slot) = state.profile.top_five.slot_of(details.id) {
        lines.push(Line::from(format!("Top five: #{slot}")));
    }
    if !released {
        lines.push(Line::from(Span::styled(
            "Not yet released",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(details.overview.clone()));

    let info = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Movie "));
    frame.render_widget(info, chunks[0]);

    let cast = view.credits.visible_cast(view.show_all_cast);
    let rows: Vec<Row> = cast
        .iter()
        .map(|c| Row::new(vec![c.name.clone(), c.role.clone()]))
        .collect();
    let title = format!(" Cast ({}/{}) ", cast.len(), view.credits.cast.len());
    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(Row::new(vec!["Name", "Character"]).style(header_style()))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, chunks[1]);
}

/// Draws the person detail overlay.
#[allow(clippy::indexing_slicing)]
fn draw_person_detail(frame: &mut Frame, area: Rect, view: &PersonDetailView) {
    frame.render_widget(Clear, area);
    if let Some(error) = &view.error {
        draw_message(frame, area, " Person ", error, Color::Red);
        return;
    }
    let Some(details) = &view.details else {
        draw_message(frame, area, " Person ", "Loading person...", Color::DarkGray);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(details.name.clone(), header_style())),
        Line::from(format!(
            "{}   {}",
            details.known_for_department,
            details.gender.label()
        )),
    ];
    if let Some(birthday) = &details.birthday {
        let born = if details.place_of_birth.is_empty() {
            format!("Born: {birthday}")
        } else {
            format!("Born: {birthday} in {}", details.place_of_birth)
        };
        lines.push(Line::from(born));
    }
    if let Some(deathday) = &details.deathday {
        lines.push(Line::from(format!("Died: {deathday}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(details.biography.clone()));

    let info = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Person "));
    frame.render_widget(info, chunks[0]);

    let cast_len = view.credits.cast.len();
    let rows: Vec<Row> = view
        .credits
        .entries()
        .enumerate()
        .map(|(i, c)| {
            let kind = if i < cast_len { "cast" } else { "crew" };
            Row::new(vec![c.name.clone(), c.role.clone(), String::from(kind)])
        })
        .collect();
    let widths = [
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(5),
    ];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Title", "Role", ""]).style(header_style()))
        .block(Block::default().borders(Borders::ALL).title(" Filmography "))
        .row_highlight_style(highlight_style());
    let mut table_state = TableState::default().with_selected(Some(view.cursor));
    frame.render_stateful_widget(table, chunks[1], &mut table_state);
}

// --- Footer ---

/// Draws the status line, or key hints when there is nothing to report.
fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if let Some(status) = &state.status {
        Line::from(Span::styled(status.clone(), Style::default().fg(Color::Yellow)))
    } else {
        Line::from(key_hints(state))
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn key_hints(state: &AppState) -> &'static str {
    match (state.input_mode, state.overlay(), state.page) {
        (InputMode::Search | InputMode::Filter, _, _) => {
            "Type to search | Esc: clear | Enter: done"
        }
        (InputMode::Rename, _, _) => "Type a title | Esc: cancel | Enter: apply",
        (InputMode::TopFivePick, _, _) => "1-5: top five slot | Esc: cancel",
        (_, Some(Overlay::Movie(_)), _) => {
            "f: like  w: watchlist  1-5: rate  t: top five  a: tier list  c: cast  i: IMDb  Esc: back"
        }
        (_, Some(Overlay::Person(_)), _) => {
            "\u{2191}\u{2193}/j/k: move  Enter: open movie  i: IMDb  Esc: back"
        }
        (_, None, Page::Films) => {
            "Tab: page  j/k: category  h/l: movie  [/]: page  Enter: open  f: like  w: watchlist  a: tier list  /: search  r: reload  q: quit"
        }
        (_, None, Page::Actors) => {
            "Tab: page  j/k: move  [/]: page  n: section  /: filter  s: search  Enter: open  r: reload  q: quit"
        }
        (_, None, Page::TierList) => {
            "Tab: page  j/k: tier  h/l: movie  Space: pick/drop  x: remove  R: reset  e: rename  S: save  /: add  q: quit"
        }
        (_, None, Page::Profile) => {
            "Tab: page  h/l: section  j/k: move  Enter: open  x: clear slot  q: quit"
        }
    }
}
