//! cinescore - browse, rate and rank movies from the terminal.

/// Application configuration (TOML).
mod config;

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_URL_ENV, AppConfig, resolve_config_path, resolve_log_path};
use cinescore_api::{CinescoreApi, CinescoreClient, MovieList, search_people_with_biographies};
use cinescore_tui::person::{CAST_PREVIEW, Credits, truncate_biography};
use cinescore_tui::{AppOptions, Page, export_dir_or_cwd, run_app};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log file for the TUI (default: `<config dir>/cinescore.log`).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query movies.
    Movies(MoviesCommand),
    /// Query people.
    People(PeopleCommand),
    /// Start the interactive terminal UI.
    Tui(TuiArgs),
    /// Inspect or create the config file.
    Config(ConfigCommand),
    /// Print shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movies subcommand to run.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movie subcommands.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// Trending movies.
    Trending,
    /// Movies now in theaters.
    NowPlaying,
    /// Upcoming releases.
    Upcoming,
    /// Movie details with cast and crew.
    Show(IdArgs),
    /// Search movies by title.
    Search(QueryArgs),
}

/// Arguments for the `people` subcommand.
#[derive(clap::Args)]
struct PeopleCommand {
    /// People subcommand to run.
    #[command(subcommand)]
    command: PeopleSubcommands,
}

/// Available people subcommands.
#[derive(Subcommand)]
enum PeopleSubcommands {
    /// Trending people.
    Trending,
    /// Person details with filmography.
    Show(IdArgs),
    /// Search people by name (with biographies).
    Search(QueryArgs),
}

/// A required numeric ID.
#[derive(clap::Args)]
struct IdArgs {
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// A required search query.
#[derive(clap::Args)]
struct QueryArgs {
    /// Search query (e.g. "inception").
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `tui` subcommand.
#[derive(clap::Args)]
struct TuiArgs {
    /// Page shown at startup.
    #[arg(long, value_enum, default_value_t = PageArg::Films)]
    page: PageArg,
}

/// `--page` values.
#[derive(Clone, Copy, ValueEnum)]
enum PageArg {
    /// Movie carousels and search.
    Films,
    /// Featured and trending people.
    Actors,
    /// Tier list board.
    TierList,
    /// Liked, watchlist and top five.
    Profile,
}

impl From<PageArg> for Page {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Films => Self::Films,
            PageArg::Actors => Self::Actors,
            PageArg::TierList => Self::TierList,
            PageArg::Profile => Self::Profile,
        }
    }
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration.
    Show,
    /// Write a config file with default values.
    Init(InitArgs),
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Loads the config file and applies the [`API_URL_ENV`] override.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;
    Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
}

/// Builds a `CinescoreClient` from the effective configuration.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_client(config: &AppConfig) -> Result<CinescoreClient> {
    CinescoreClient::builder()
        .base_url(config.base_url()?)
        .timeout(config.timeout())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build API client")
}

/// Logs a movie list as a table.
fn print_movie_list(list: &MovieList) {
    tracing::info!("Total results: {}", list.movies.len());
    tracing::info!("ID\tRelease\t\tScore\tTitle");
    for movie in &list.movies {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}",
            movie.id,
            movie.release_date.as_deref().unwrap_or("-"),
            movie.overall_score,
            movie.title,
        );
    }
}

/// Home page movie feeds.
#[derive(Clone, Copy)]
enum MovieFeed {
    Trending,
    NowPlaying,
    Upcoming,
}

/// Runs `movies trending | now-playing | upcoming`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movies_feed(config: &AppConfig, feed: MovieFeed) -> Result<()> {
    let client = build_client(config)?;

    let list = match feed {
        MovieFeed::Trending => client
            .trending_movies()
            .await
            .context("failed to fetch trending movies")?,
        MovieFeed::NowPlaying => client
            .now_playing_movies()
            .await
            .context("failed to fetch now playing movies")?,
        MovieFeed::Upcoming => client
            .upcoming_movies()
            .await
            .context("failed to fetch upcoming movies")?,
    };

    print_movie_list(&list);
    Ok(())
}

/// Runs `movies search`.
///
/// # Errors
///
/// Returns an error if the query is blank, the client fails to build, or the
/// API request fails.
#[instrument(skip_all)]
async fn run_movies_search(config: &AppConfig, args: &QueryArgs) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("--query must not be empty");
    }
    let client = build_client(config)?;

    let list = client
        .search_movies(query)
        .await
        .with_context(|| format!("failed to search movies: {query}"))?;

    print_movie_list(&list);
    Ok(())
}

/// Runs `movies show`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movies_show(config: &AppConfig, args: &IdArgs) -> Result<()> {
    let client = build_client(config)?;

    let details = client
        .movie_details(args.id)
        .await
        .with_context(|| format!("failed to fetch movie details: {}", args.id))?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title);
    if !details.tagline.is_empty() {
        tracing::info!("Tagline: {}", details.tagline);
    }
    tracing::info!(
        "Release Date: {}",
        details.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Runtime: {} min", details.runtime);
    tracing::info!("Score: {:.1}", details.overall_score);
    tracing::info!("IMDb: {}", details.imdb_id.as_deref().unwrap_or("-"));
    tracing::info!("Overview: {}", details.overview);

    let credits = details
        .credits
        .as_ref()
        .map(Credits::from)
        .unwrap_or_default();
    if let Some(director) = credits.director() {
        tracing::info!("Director: {}", director.name);
    }
    tracing::info!("---");
    for member in credits.visible_cast(false) {
        tracing::info!("  {} as {}", member.name, member.role);
    }
    if credits.cast.len() > CAST_PREVIEW {
        tracing::info!(
            "  ... and {} more",
            credits.cast.len().saturating_sub(CAST_PREVIEW)
        );
    }

    Ok(())
}

/// Runs `people trending`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_people_trending(config: &AppConfig) -> Result<()> {
    let client = build_client(config)?;

    let list = client
        .trending_people()
        .await
        .context("failed to fetch trending people")?;

    tracing::info!("Total results: {}", list.people.len());
    tracing::info!("ID\tDepartment\tName");
    for person in &list.people {
        tracing::info!("{}\t{}\t\t{}", person.id, person.department, person.name);
    }

    Ok(())
}

/// Runs `people show`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_people_show(config: &AppConfig, args: &IdArgs) -> Result<()> {
    let client = build_client(config)?;

    let details = client
        .person_details(args.id)
        .await
        .with_context(|| format!("failed to fetch person details: {}", args.id))?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Name: {}", details.name);
    tracing::info!("Known For: {}", details.known_for_department);
    tracing::info!("Gender: {}", details.gender.label());
    tracing::info!("Birthday: {}", details.birthday.as_deref().unwrap_or("-"));
    if let Some(deathday) = &details.deathday {
        tracing::info!("Deathday: {deathday}");
    }
    tracing::info!("Biography: {}", truncate_biography(&details.biography));

    let credits = details
        .credits
        .as_ref()
        .map(Credits::from)
        .unwrap_or_default();
    tracing::info!("---");
    for entry in &credits.cast {
        tracing::info!("  {}\t{} (cast)", entry.id, entry.name);
    }
    for entry in &credits.crew {
        tracing::info!("  {}\t{} ({})", entry.id, entry.name, entry.role);
    }

    Ok(())
}

/// Runs `people search`.
///
/// # Errors
///
/// Returns an error if the query is blank, the client fails to build, or the
/// search request fails.
#[instrument(skip_all)]
async fn run_people_search(config: &AppConfig, args: &QueryArgs) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("--query must not be empty");
    }
    let client = build_client(config)?;

    let people = search_people_with_biographies(&client, query).await?;

    tracing::info!("Total results: {}", people.len());
    for entry in &people {
        tracing::info!(
            "{}\t{} ({})",
            entry.person.id,
            entry.person.name,
            entry.person.department
        );
        tracing::info!("  {}", truncate_biography(&entry.biography));
    }

    Ok(())
}

/// Runs `tui`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_tui(config: &AppConfig, args: &TuiArgs) -> Result<()> {
    let client = build_client(config)?;

    let options = AppOptions {
        page: Page::from(args.page),
        debounce: config.debounce(),
        featured_people: config.actors.featured.clone(),
        tier_list_title: config.tier_list.title.clone(),
        export_dir: export_dir_or_cwd(config.tier_list.export_dir.as_deref()),
        today: chrono::Local::now().date_naive(),
    };
    tracing::info!(base_url = %client.base_url(), "starting TUI");

    run_app(client, options).await
}

/// Runs `config show`.
///
/// # Errors
///
/// Returns an error if the config cannot be serialized.
fn run_config_show(config: &AppConfig, dir: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    tracing::info!("# {}", path.display());
    for line in config.to_toml()?.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Runs `config init`.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(args: &InitArgs, dir: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !args.force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Opens (appending) the TUI log file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Installs the tracing subscriber. Output goes to `log_file` when given
/// (the TUI owns the terminal), otherwise to stdout.
fn init_tracing(log_file: Option<File>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (stdout_layer, file_layer) = match log_file {
        Some(file) => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
        ),
        None => (
            Some(tracing_subscriber::fmt::layer().with_target(false)),
            None,
        ),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);

    #[cfg(not(feature = "otel"))]
    {
        registry.init();
    }

    #[cfg(feature = "otel")]
    {
        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        registry.with(otel_layer).init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_deref();

    let log_file = if matches!(cli.command, Commands::Tui(_)) {
        let path = match &cli.log_file {
            Some(path) => path.clone(),
            None => resolve_log_path(dir)?,
        };
        Some(open_log_file(&path)?)
    } else {
        None
    };
    init_tracing(log_file);

    match &cli.command {
        Commands::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut io::stdout(),
            );
            Ok(())
        }
        Commands::Config(cmd) => match &cmd.command {
            ConfigSubcommands::Show => run_config_show(&load_config(dir)?, dir),
            ConfigSubcommands::Init(args) => run_config_init(args, dir),
        },
        Commands::Movies(cmd) => {
            let config = load_config(dir)?;
            match &cmd.command {
                MoviesSubcommands::Trending => run_movies_feed(&config, MovieFeed::Trending).await,
                MoviesSubcommands::NowPlaying => {
                    run_movies_feed(&config, MovieFeed::NowPlaying).await
                }
                MoviesSubcommands::Upcoming => run_movies_feed(&config, MovieFeed::Upcoming).await,
                MoviesSubcommands::Show(args) => run_movies_show(&config, args).await,
                MoviesSubcommands::Search(args) => run_movies_search(&config, args).await,
            }
        }
        Commands::People(cmd) => {
            let config = load_config(dir)?;
            match &cmd.command {
                PeopleSubcommands::Trending => run_people_trending(&config).await,
                PeopleSubcommands::Show(args) => run_people_show(&config, args).await,
                PeopleSubcommands::Search(args) => run_people_search(&config, args).await,
            }
        }
        Commands::Tui(args) => run_tui(&load_config(dir)?, args).await,
    }
}
