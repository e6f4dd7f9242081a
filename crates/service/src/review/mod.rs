//! Counselor reviews with tags and recommendation counts.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{NewReview, ReviewView};
pub use repository::ReviewRepository;
pub use service::ReviewService;
