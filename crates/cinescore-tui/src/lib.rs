//! Terminal UI for cinescore.
//!
//! The domain pieces (catalog, tier list, top five, pagination, debounced
//! search) are plain data types with no I/O; [`app`] wires them to the
//! terminal and to the API client.

/// Interactive app (event loop, state, rendering).
pub mod app;
/// Movie categories with per-category pagination.
pub mod catalog;
/// Movie view model and rank.
pub mod movie;
/// Page cursor over a list.
pub mod paging;
/// People, credits and biography helpers.
pub mod person;
/// Top five favourites and the profile projection.
pub mod profile;
/// Debounced search input.
pub mod search;
/// Tier list board and JSON export.
pub mod tier_list;

pub use app::run_app;
pub use app::state::{AppOptions, Page};
pub use app::views::export_dir_or_cwd;
