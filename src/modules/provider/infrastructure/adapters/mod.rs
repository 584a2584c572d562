pub mod anilist;
pub mod common;
pub mod jikan;
pub mod kitsu;

pub use anilist::AniListAdapter;
pub use jikan::JikanAdapter;
pub use kitsu::KitsuAdapter;
