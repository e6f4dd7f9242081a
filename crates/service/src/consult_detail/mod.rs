//! Read-only consultation history.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::ConsultDetailView;
pub use repository::ConsultDetailRepository;
pub use service::{ConsultDetailService, DEFAULT_LATEST_SIZE};
