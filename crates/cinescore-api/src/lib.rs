//! API client library for cinescore.
//!
//! Provides a typed client for the cinescore REST API (a TMDB proxy) and
//! helpers that combine several requests into one view's worth of data.

/// `CinescoreApi` trait.
pub mod api;
/// HTTP client implementation.
pub mod client;
/// Multi-request helpers (home feeds, featured people, people search).
pub mod feeds;
/// Response types.
pub mod types;

pub use api::{CinescoreApi, LocalCinescoreApi};
pub use client::{CinescoreClient, CinescoreClientBuilder, DEFAULT_BASE_URL};
pub use feeds::{
    BIOGRAPHY_FAILED, BIOGRAPHY_MISSING, HomeFeeds, PersonWithBiography, fetch_featured_people,
    fetch_home_feeds, search_people_with_biographies,
};
pub use types::{
    Gender, Language, MovieCastMember, MovieCredits, MovieCrewMember, MovieDetails, MovieList,
    MovieListing, PeopleList, PersonCastCredit, PersonCredits, PersonCrewCredit, PersonDetails,
    PersonListing, Socials,
};
