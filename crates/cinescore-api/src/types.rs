//! Response types served by the cinescore REST API.
//!
//! Field names follow the backend's camelCase JSON. Optional or
//! late-added fields default so older backends still decode.

use serde::{Deserialize, Deserializer};

/// Deserializes a star rank, reading null, negative, fractional or
/// non-numeric values as 0 (unranked) instead of failing the whole response.
fn deserialize_lenient_rank<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(0))
}

// --- Movies ---

/// Response from the movie list endpoints (`discover/*`, `search/movies`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieList {
    /// Movies in server order.
    #[serde(default)]
    pub movies: Vec<MovieListing>,
}

/// A single movie in a list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieListing {
    /// Movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Poster image URL.
    #[serde(default)]
    pub poster: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Overall score.
    #[serde(default)]
    pub overall_score: f32,
    /// Liked by the current user.
    #[serde(default)]
    pub is_liked: bool,
    /// In the current user's watchlist.
    #[serde(default)]
    pub in_watchlist: bool,
    /// Release date (YYYY-MM-DD or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// User star rating (0 = unranked).
    #[serde(default, deserialize_with = "deserialize_lenient_rank")]
    pub rank: u8,
}

/// A spoken language.
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    /// English name of the language.
    #[serde(default)]
    pub english_name: String,
    /// ISO 639-1 code.
    #[serde(default)]
    pub iso_639_1: String,
    /// Native name.
    #[serde(default)]
    pub name: String,
}

/// Response from `movies/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    /// Movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Backdrop image URL.
    #[serde(default)]
    pub backdrop_url: String,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: String,
    /// Budget in dollars.
    #[serde(default)]
    pub budget: u64,
    /// Revenue in dollars.
    #[serde(default)]
    pub revenue: u64,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: u64,
    /// IMDb ID (e.g. "tt1375666").
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Tagline.
    #[serde(default)]
    pub tagline: String,
    /// Release date (YYYY-MM-DD or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Spoken languages.
    #[serde(default)]
    pub spoken_languages: Vec<Language>,
    /// Cast and crew, when requested by the backend.
    #[serde(default)]
    pub credits: Option<MovieCredits>,
    /// Overall score.
    #[serde(default)]
    pub overall_score: f32,
    /// Liked by the current user.
    #[serde(default)]
    pub is_liked: bool,
    /// In the current user's watchlist.
    #[serde(default)]
    pub in_watchlist: bool,
    /// User star rating (0 = unranked).
    #[serde(default, deserialize_with = "deserialize_lenient_rank")]
    pub rank: u8,
}

/// Cast and crew of a movie.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieCredits {
    /// Cast members in billing order.
    #[serde(default)]
    pub cast: Vec<MovieCastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<MovieCrewMember>,
}

/// A cast member in a movie's credits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: String,
    /// Profile picture URL.
    #[serde(default)]
    pub icon_url: String,
}

/// A crew member in a movie's credits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCrewMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Department (e.g. "Directing").
    #[serde(default)]
    pub department: String,
    /// Profile picture URL.
    #[serde(default)]
    pub icon_url: String,
}

// --- People ---

/// Gender as reported by TMDB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum Gender {
    /// 0 or unknown value.
    #[default]
    NotSpecified,
    /// 1.
    Female,
    /// 2.
    Male,
    /// 3.
    NonBinary,
}

impl From<u8> for Gender {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Female,
            2 => Self::Male,
            3 => Self::NonBinary,
            _ => Self::NotSpecified,
        }
    }
}

impl Gender {
    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotSpecified => "Not specified",
            Self::Female => "Female",
            Self::Male => "Male",
            Self::NonBinary => "Non-binary",
        }
    }
}

/// Response from the people list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleList {
    /// People in server order.
    #[serde(default)]
    pub people: Vec<PersonListing>,
}

/// A single person in a list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonListing {
    /// Person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Gender.
    #[serde(default)]
    pub gender: Gender,
    /// Known-for department.
    #[serde(default)]
    pub department: String,
    /// Profile picture URL.
    #[serde(default)]
    pub icon_url: String,
}

/// Response from `people/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    /// Person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Biography (may be empty).
    #[serde(default)]
    pub biography: String,
    /// Birthday (YYYY-MM-DD or null).
    #[serde(default)]
    pub birthday: Option<String>,
    /// Day of death (YYYY-MM-DD or null).
    #[serde(default)]
    pub deathday: Option<String>,
    /// Gender.
    #[serde(default)]
    pub gender: Gender,
    /// Known-for department.
    #[serde(default)]
    pub known_for_department: String,
    /// Place of birth.
    #[serde(default)]
    pub place_of_birth: String,
    /// Profile picture URL.
    #[serde(default)]
    pub icon_url: String,
    /// Filmography.
    #[serde(default)]
    pub credits: Option<PersonCredits>,
    /// Social media handles.
    #[serde(default)]
    pub socials: Option<Socials>,
}

/// Filmography of a person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonCredits {
    /// Acting credits.
    #[serde(default)]
    pub cast: Vec<PersonCastCredit>,
    /// Crew credits.
    #[serde(default)]
    pub crew: Vec<PersonCrewCredit>,
}

/// An acting credit in a filmography.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCastCredit {
    /// Movie ID.
    pub id: u64,
    /// Movie title.
    pub title: String,
    /// Character played.
    #[serde(default)]
    pub character: String,
    /// Poster URL.
    #[serde(default)]
    pub poster_url: String,
}

/// A crew credit in a filmography.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCrewCredit {
    /// Movie ID.
    pub id: u64,
    /// Movie title.
    pub title: String,
    /// Department.
    #[serde(default)]
    pub department: String,
    /// Poster URL.
    #[serde(default)]
    pub poster_url: String,
}

/// External social media IDs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Socials {
    /// IMDb ID.
    pub imdb: Option<String>,
    /// Facebook handle.
    pub facebook: Option<String>,
    /// Instagram handle.
    pub instagram: Option<String>,
    /// TikTok handle.
    pub tiktok: Option<String>,
    /// Twitter / X handle.
    pub twitter: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_movie_listing_defaults_missing_fields() {
        // Arrange
        let json = r#"{"id":1,"title":"Carry-On"}"#;

        // Act
        let movie: MovieListing = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 1);
        assert!(movie.poster.is_empty());
        assert!(!movie.is_liked);
        assert!(movie.release_date.is_none());
        assert_eq!(movie.rank, 0);
    }

    #[test]
    fn test_movie_list_tolerates_bad_ranks() {
        // Arrange
        let json = r#"{"movies":[
            {"id":1,"title":"Heat","rank":-1},
            {"id":2,"title":"Ronin","rank":300},
            {"id":3,"title":"Collateral","rank":"4"},
            {"id":4,"title":"Thief","rank":null},
            {"id":5,"title":"Manhunter","rank":4}
        ]}"#;

        // Act
        let list: MovieList = serde_json::from_str(json).unwrap();

        // Assert
        let ranks: Vec<u8> = list.movies.iter().map(|m| m.rank).collect();
        assert_eq!(ranks, vec![0, 0, 0, 0, 4]);
    }

    #[test]
    fn test_movie_details_negative_rank() {
        // Arrange
        let json = r#"{"id":27205,"title":"Inception","rank":-3}"#;

        // Act
        let details: MovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.rank, 0);
    }

    #[test]
    fn test_movie_listing_null_release_date() {
        // Arrange
        let json = r#"{"id":2,"title":"Untitled","releaseDate":null,"overallScore":4.5}"#;

        // Act
        let movie: MovieListing = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.release_date.is_none());
        assert!((movie.overall_score - 4.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gender_from_number() {
        // Arrange
        let json = r#"[0, 1, 2, 3, 9]"#;

        // Act
        let genders: Vec<Gender> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(
            genders,
            vec![
                Gender::NotSpecified,
                Gender::Female,
                Gender::Male,
                Gender::NonBinary,
                Gender::NotSpecified,
            ]
        );
    }

    #[test]
    fn test_person_details_without_credits() {
        // Arrange
        let json = r#"{"id":6193,"name":"Leonardo DiCaprio","biography":"","gender":2}"#;

        // Act
        let person: PersonDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(person.gender, Gender::Male);
        assert!(person.credits.is_none());
        assert!(person.socials.is_none());
    }
}
