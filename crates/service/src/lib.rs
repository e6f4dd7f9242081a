//! Service layer of the counseling-booking backend.
//! - Each domain module is split into `domain`, `repository` (trait) and `service`.
//! - `repo` holds the SeaORM and in-memory implementations of those traits.
//! - Reuses validation and entity definitions in the `models` crate.

pub mod errors;
pub mod pagination;
pub mod token;
pub mod account;
pub mod counselor;
pub mod bookmark;
pub mod reservation;
pub mod consult_detail;
pub mod review;
pub mod repo;
pub mod store;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use store::{Services, Store};
