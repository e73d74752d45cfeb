pub mod bookmarks;
pub mod debounce;
pub mod error;
pub mod models;
pub mod search;
pub mod storage;
pub mod traits;
pub mod view;

pub use bookmarks::{BookmarkError, BookmarkOrder, BookmarkStore, Toggle, BOOKMARKS_KEY};
pub use debounce::DebounceTimer;
pub use error::{RepomarkError, Result};
pub use models::*;
pub use search::{Completion, SearchController, SearchStatus, SearchTicket, DEFAULT_DEBOUNCE};
pub use storage::{FileStore, MemoryStore};
pub use traits::{KeyValueStore, RepositorySearch};
pub use view::{Bookmarker, DisplayedRepo};
