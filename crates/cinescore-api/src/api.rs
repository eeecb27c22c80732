//! `CinescoreApi` trait definition.

use anyhow::Result;

use crate::types::{MovieDetails, MovieList, PeopleList, PersonDetails};

/// Cinescore REST API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait so
/// requests can run on spawned tasks.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CinescoreApi: Send)]
pub trait LocalCinescoreApi {
    /// Fetches the trending movie feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn trending_movies(&self) -> Result<MovieList>;

    /// Fetches movies currently playing in theaters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn now_playing_movies(&self) -> Result<MovieList>;

    /// Fetches upcoming movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn upcoming_movies(&self) -> Result<MovieList>;

    /// Fetches trending people.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn trending_people(&self) -> Result<PeopleList>;

    /// Fetches a single movie with credits.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails>;

    /// Fetches a single person with filmography and socials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person_details(&self, person_id: u64) -> Result<PersonDetails>;

    /// Searches movies by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(&self, query: &str) -> Result<MovieList>;

    /// Searches people by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_people(&self, query: &str) -> Result<PeopleList>;
}
