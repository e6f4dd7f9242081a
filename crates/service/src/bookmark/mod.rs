//! Favorite counselors per account.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{Bookmark, BookmarkView};
pub use repository::BookmarkRepository;
pub use service::BookmarkService;
