//! Multi-request helpers built on `CinescoreApi`.

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::instrument;

use crate::api::CinescoreApi;
use crate::types::{MovieList, PersonDetails, PersonListing};

/// Biography shown when a person's detail request fails.
pub const BIOGRAPHY_FAILED: &str = "Unable to load biography.";

/// Biography shown when the backend returns an empty biography.
pub const BIOGRAPHY_MISSING: &str = "No biography available.";

/// The three movie feeds of the home page.
#[derive(Debug, Clone, Default)]
pub struct HomeFeeds {
    /// `discover/trending`.
    pub trending: MovieList,
    /// `discover/now_playing`.
    pub now_playing: MovieList,
    /// `discover/upcoming`.
    pub upcoming: MovieList,
}

/// A search result paired with its (possibly substituted) biography.
#[derive(Debug, Clone)]
pub struct PersonWithBiography {
    /// The listing as returned by the search endpoint.
    pub person: PersonListing,
    /// Biography text, never empty.
    pub biography: String,
}

/// Fetches trending, now playing and upcoming concurrently.
///
/// # Errors
///
/// Returns the first error among the three requests.
#[instrument(skip_all)]
pub async fn fetch_home_feeds(api: &(impl CinescoreApi + Sync)) -> Result<HomeFeeds> {
    let (trending, now_playing, upcoming) = futures::try_join!(
        api.trending_movies(),
        api.now_playing_movies(),
        api.upcoming_movies(),
    )
    .context("failed to fetch home feeds")?;

    tracing::debug!(
        trending = trending.movies.len(),
        now_playing = now_playing.movies.len(),
        upcoming = upcoming.movies.len(),
        "home feeds fetched"
    );

    Ok(HomeFeeds {
        trending,
        now_playing,
        upcoming,
    })
}

/// Fetches the given people one by one (concurrently), keeping input order.
///
/// A failed request drops that person and logs a warning; it never fails
/// the whole batch.
#[instrument(skip_all, fields(count = ids.len()))]
pub async fn fetch_featured_people(
    api: &(impl CinescoreApi + Sync),
    ids: &[u64],
) -> Vec<PersonDetails> {
    let results = join_all(ids.iter().map(|&id| api.person_details(id))).await;

    ids.iter()
        .zip(results)
        .filter_map(|(id, result)| match result {
            Ok(person) => Some(person),
            Err(e) => {
                tracing::warn!(person_id = id, error = %e, "skipping featured person");
                None
            }
        })
        .collect()
}

/// Searches people by name, then fetches each result's biography.
///
/// # Errors
///
/// Returns an error if the search request itself fails. Individual
/// biography failures fall back to [`BIOGRAPHY_FAILED`].
#[instrument(skip_all)]
pub async fn search_people_with_biographies(
    api: &(impl CinescoreApi + Sync),
    query: &str,
) -> Result<Vec<PersonWithBiography>> {
    let list = api
        .search_people(query)
        .await
        .with_context(|| format!("failed to search people: {query}"))?;

    let details = join_all(list.people.iter().map(|p| api.person_details(p.id))).await;

    let people = list
        .people
        .into_iter()
        .zip(details)
        .map(|(person, detail)| {
            let biography = match detail {
                Ok(d) if d.biography.trim().is_empty() => String::from(BIOGRAPHY_MISSING),
                Ok(d) => d.biography,
                Err(e) => {
                    tracing::warn!(person_id = person.id, error = %e, "biography fetch failed");
                    String::from(BIOGRAPHY_FAILED)
                }
            };
            PersonWithBiography { person, biography }
        })
        .collect();

    Ok(people)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use anyhow::{Result, bail};

    use super::*;
    use crate::types::{Gender, MovieDetails, MovieListing, PeopleList};

    /// Mock API with configurable failures.
    #[derive(Default)]
    struct MockApi {
        people: Vec<PersonDetails>,
        search_results: Vec<PersonListing>,
        fail_upcoming: bool,
        fail_search: bool,
    }

    fn listing(id: u64, title: &str) -> MovieListing {
        MovieListing {
            id,
            title: String::from(title),
            poster: String::new(),
            description: String::new(),
            overall_score: 0.0,
            is_liked: false,
            in_watchlist: false,
            release_date: None,
            rank: 0,
        }
    }

    fn person_listing(id: u64, name: &str) -> PersonListing {
        PersonListing {
            id,
            name: String::from(name),
            gender: Gender::NotSpecified,
            department: String::from("Acting"),
            icon_url: String::new(),
        }
    }

    fn person_details(id: u64, name: &str, biography: &str) -> PersonDetails {
        PersonDetails {
            id,
            name: String::from(name),
            biography: String::from(biography),
            birthday: None,
            deathday: None,
            gender: Gender::NotSpecified,
            known_for_department: String::from("Acting"),
            place_of_birth: String::new(),
            icon_url: String::new(),
            credits: None,
            socials: None,
        }
    }

    impl CinescoreApi for MockApi {
        async fn trending_movies(&self) -> Result<MovieList> {
            Ok(MovieList {
                movies: vec![listing(1, "Moana 2"), listing(2, "Armor")],
            })
        }

        async fn now_playing_movies(&self) -> Result<MovieList> {
            Ok(MovieList {
                movies: vec![listing(3, "Inception")],
            })
        }

        async fn upcoming_movies(&self) -> Result<MovieList> {
            if self.fail_upcoming {
                bail!("cinescore API error (HTTP 500 Internal Server Error): upcoming");
            }
            Ok(MovieList::default())
        }

        async fn trending_people(&self) -> Result<PeopleList> {
            Ok(PeopleList::default())
        }

        async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
            bail!("movie {movie_id} not mocked")
        }

        async fn person_details(&self, person_id: u64) -> Result<PersonDetails> {
            match self.people.iter().find(|p| p.id == person_id) {
                Some(p) => Ok(p.clone()),
                None => bail!("cinescore API error (HTTP 404 Not Found): people/{person_id}"),
            }
        }

        async fn search_movies(&self, _query: &str) -> Result<MovieList> {
            Ok(MovieList::default())
        }

        async fn search_people(&self, _query: &str) -> Result<PeopleList> {
            if self.fail_search {
                bail!("cinescore API error (HTTP 500 Internal Server Error): search");
            }
            Ok(PeopleList {
                people: self.search_results.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_home_feeds_all_succeed() {
        // Arrange
        let api = MockApi::default();

        // Act
        let feeds = fetch_home_feeds(&api).await.unwrap();

        // Assert
        assert_eq!(feeds.trending.movies.len(), 2);
        assert_eq!(feeds.now_playing.movies[0].title, "Inception");
        assert!(feeds.upcoming.movies.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_home_feeds_one_failure_fails_all() {
        // Arrange
        let api = MockApi {
            fail_upcoming: true,
            ..MockApi::default()
        };

        // Act
        let result = fetch_home_feeds(&api).await;

        // Assert
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("failed to fetch home feeds"));
        assert!(err.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_fetch_featured_people_drops_failures_keeps_order() {
        // Arrange
        let api = MockApi {
            people: vec![
                person_details(3223, "Robert Downey Jr.", "Iron Man."),
                person_details(206, "Jim Carrey", "Comedian."),
            ],
            ..MockApi::default()
        };

        // Act
        let people = fetch_featured_people(&api, &[206, 224_513, 3223]).await;

        // Assert
        let ids: Vec<u64> = people.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![206, 3223]);
    }

    #[tokio::test]
    async fn test_fetch_featured_people_empty_ids() {
        // Arrange
        let api = MockApi::default();

        // Act
        let people = fetch_featured_people(&api, &[]).await;

        // Assert
        assert!(people.is_empty());
    }

    #[tokio::test]
    async fn test_search_people_with_biographies_fallbacks() {
        // Arrange
        let api = MockApi {
            people: vec![
                person_details(6193, "Leonardo DiCaprio", "American actor."),
                person_details(1892, "Leo Woodall", "   "),
            ],
            search_results: vec![
                person_listing(6193, "Leonardo DiCaprio"),
                person_listing(1892, "Leo Woodall"),
                person_listing(77, "Leo Unknown"),
            ],
            ..MockApi::default()
        };

        // Act
        let results = search_people_with_biographies(&api, "leo").await.unwrap();

        // Assert
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].biography, "American actor.");
        assert_eq!(results[1].biography, BIOGRAPHY_MISSING);
        assert_eq!(results[2].person.name, "Leo Unknown");
        assert_eq!(results[2].biography, BIOGRAPHY_FAILED);
    }

    #[tokio::test]
    async fn test_search_people_with_biographies_search_failure() {
        // Arrange
        let api = MockApi {
            fail_search: true,
            ..MockApi::default()
        };

        // Act
        let result = search_people_with_biographies(&api, "leo").await;

        // Assert
        assert!(result.is_err());
    }
}
