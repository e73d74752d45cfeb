pub mod bookmarks;
pub mod interactive;
pub mod search;
