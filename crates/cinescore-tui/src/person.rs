//! Person and credits view models.

use unicode_normalization::UnicodeNormalization;

use cinescore_api::{
    MovieCredits, PersonCredits, PersonDetails, PersonListing, PersonWithBiography,
};

/// Characters of biography shown before truncating.
pub const MAX_BIOGRAPHY_CHARS: usize = 500;

/// Cast members shown before "show all".
pub const CAST_PREVIEW: usize = 8;

/// One row in a cast or crew list.
///
/// For a movie's credits `name` is the person; for a person's filmography
/// it is the movie title and `image` is the poster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditEntry {
    /// Person ID (movie credits) or movie ID (filmography).
    pub id: u64,
    /// Person name or movie title.
    pub name: String,
    /// Character played, or crew department.
    pub role: String,
    /// Icon or poster URL.
    pub image: String,
}

/// Ordered cast and crew.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credits {
    /// Cast in billing order.
    pub cast: Vec<CreditEntry>,
    /// Crew in server order.
    pub crew: Vec<CreditEntry>,
}

impl From<&MovieCredits> for Credits {
    fn from(credits: &MovieCredits) -> Self {
        Self {
            cast: credits
                .cast
                .iter()
                .map(|c| CreditEntry {
                    id: c.id,
                    name: c.name.clone(),
                    role: c.character.clone(),
                    image: c.icon_url.clone(),
                })
                .collect(),
            crew: credits
                .crew
                .iter()
                .map(|c| CreditEntry {
                    id: c.id,
                    name: c.name.clone(),
                    role: c.department.clone(),
                    image: c.icon_url.clone(),
                })
                .collect(),
        }
    }
}

impl From<&PersonCredits> for Credits {
    fn from(credits: &PersonCredits) -> Self {
        Self {
            cast: credits
                .cast
                .iter()
                .map(|c| CreditEntry {
                    id: c.id,
                    name: c.title.clone(),
                    role: c.character.clone(),
                    image: c.poster_url.clone(),
                })
                .collect(),
            crew: credits
                .crew
                .iter()
                .map(|c| CreditEntry {
                    id: c.id,
                    name: c.title.clone(),
                    role: c.department.clone(),
                    image: c.poster_url.clone(),
                })
                .collect(),
        }
    }
}

impl Credits {
    /// First crew member in the "Directing" department.
    #[must_use]
    pub fn director(&self) -> Option<&CreditEntry> {
        self.crew.iter().find(|c| c.role == "Directing")
    }

    /// Cast to display: the first [`CAST_PREVIEW`] entries, or all of them.
    #[must_use]
    pub fn visible_cast(&self, show_all: bool) -> &[CreditEntry] {
        if show_all {
            &self.cast
        } else {
            self.cast.get(..CAST_PREVIEW).unwrap_or(&self.cast)
        }
    }

    /// Cast followed by crew (filmography order).
    pub fn entries(&self) -> impl Iterator<Item = &CreditEntry> {
        self.cast.iter().chain(self.crew.iter())
    }

    /// Total number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cast.len().saturating_add(self.crew.len())
    }

    /// Whether there are no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cast.is_empty() && self.crew.is_empty()
    }
}

/// A person as shown on the actors page and in search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Known-for department.
    pub department: String,
    /// Profile picture URL.
    pub icon_url: String,
    /// Biography, when fetched.
    pub biography: Option<String>,
}

impl From<PersonListing> for Person {
    fn from(listing: PersonListing) -> Self {
        Self {
            id: listing.id,
            name: listing.name,
            department: listing.department,
            icon_url: listing.icon_url,
            biography: None,
        }
    }
}

impl From<PersonDetails> for Person {
    fn from(details: PersonDetails) -> Self {
        Self {
            id: details.id,
            name: details.name,
            department: details.known_for_department,
            icon_url: details.icon_url,
            biography: Some(details.biography).filter(|b| !b.trim().is_empty()),
        }
    }
}

impl From<PersonWithBiography> for Person {
    fn from(result: PersonWithBiography) -> Self {
        Self {
            biography: Some(result.biography),
            ..Self::from(result.person)
        }
    }
}

/// Shortens a biography to [`MAX_BIOGRAPHY_CHARS`] characters plus `...`.
#[must_use]
pub fn truncate_biography(bio: &str) -> String {
    match bio.char_indices().nth(MAX_BIOGRAPHY_CHARS) {
        Some((cut, _)) => format!("{}...", bio.get(..cut).unwrap_or(bio)),
        None => String::from(bio),
    }
}

/// NFKC-normalised lowercase form used for name filtering.
#[must_use]
pub fn fold_name(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Case-insensitive substring match on a person's name. An empty filter
/// matches everyone.
#[must_use]
pub fn name_matches(name: &str, filter: &str) -> bool {
    filter.is_empty() || fold_name(name).contains(&fold_name(filter))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use cinescore_api::{Gender, MovieCastMember, MovieCrewMember, PersonCastCredit};

    use super::*;

    fn movie_credits(cast: usize) -> MovieCredits {
        MovieCredits {
            cast: (0..cast)
                .map(|i| MovieCastMember {
                    id: u64::try_from(i).unwrap(),
                    name: format!("Actor {i}"),
                    character: format!("Role {i}"),
                    icon_url: String::new(),
                })
                .collect(),
            crew: vec![
                MovieCrewMember {
                    id: 947,
                    name: String::from("Hans Zimmer"),
                    department: String::from("Sound"),
                    icon_url: String::new(),
                },
                MovieCrewMember {
                    id: 525,
                    name: String::from("Christopher Nolan"),
                    department: String::from("Directing"),
                    icon_url: String::new(),
                },
                MovieCrewMember {
                    id: 1,
                    name: String::from("Second Unit"),
                    department: String::from("Directing"),
                    icon_url: String::new(),
                },
            ],
        }
    }

    #[test]
    fn test_director_is_first_directing_crew() {
        // Arrange
        let credits = Credits::from(&movie_credits(2));

        // Act
        let director = credits.director().unwrap();

        // Assert
        assert_eq!(director.name, "Christopher Nolan");
    }

    #[test]
    fn test_director_missing() {
        // Arrange
        let credits = Credits::default();

        // Act & Assert
        assert!(credits.director().is_none());
    }

    #[test]
    fn test_visible_cast_preview_and_all() {
        // Arrange
        let credits = Credits::from(&movie_credits(9));

        // Act & Assert
        assert_eq!(credits.visible_cast(false).len(), CAST_PREVIEW);
        assert_eq!(credits.visible_cast(true).len(), 9);
        assert_eq!(Credits::from(&movie_credits(3)).visible_cast(false).len(), 3);
    }

    #[test]
    fn test_filmography_from_person_credits() {
        // Arrange
        let raw = PersonCredits {
            cast: vec![PersonCastCredit {
                id: 597,
                title: String::from("Titanic"),
                character: String::from("Jack Dawson"),
                poster_url: String::from("poster.jpg"),
            }],
            crew: vec![],
        };

        // Act
        let credits = Credits::from(&raw);

        // Assert
        assert_eq!(credits.len(), 1);
        let entry = credits.entries().next().unwrap();
        assert_eq!(entry.name, "Titanic");
        assert_eq!(entry.role, "Jack Dawson");
        assert_eq!(entry.image, "poster.jpg");
    }

    #[test]
    fn test_truncate_biography() {
        // Arrange
        let short = "Short bio.";
        let long: String = "あ".repeat(MAX_BIOGRAPHY_CHARS + 20);

        // Act
        let kept = truncate_biography(short);
        let cut = truncate_biography(&long);

        // Assert
        assert_eq!(kept, short);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), MAX_BIOGRAPHY_CHARS + 3);
    }

    #[test]
    fn test_truncate_biography_exact_length() {
        // Arrange
        let exact = "x".repeat(MAX_BIOGRAPHY_CHARS);

        // Act & Assert
        assert_eq!(truncate_biography(&exact), exact);
    }

    #[test]
    fn test_name_matches_case_and_width_insensitive() {
        // Arrange & Act & Assert
        assert!(name_matches("Ana de Armas", "ANA"));
        assert!(name_matches("Ana de Armas", "ａｎａ"));
        assert!(name_matches("Anyone", ""));
        assert!(!name_matches("Jim Carrey", "ana"));
    }

    #[test]
    fn test_person_from_details_empty_biography() {
        // Arrange
        let details = PersonDetails {
            id: 206,
            name: String::from("Jim Carrey"),
            biography: String::from("  "),
            birthday: None,
            deathday: None,
            gender: Gender::Male,
            known_for_department: String::from("Acting"),
            place_of_birth: String::new(),
            icon_url: String::new(),
            credits: None,
            socials: None,
        };

        // Act
        let person = Person::from(details);

        // Assert
        assert_eq!(person.department, "Acting");
        assert!(person.biography.is_none());
    }
}
