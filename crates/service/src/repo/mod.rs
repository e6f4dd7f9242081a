//! Repository implementations: SeaORM for production, in-memory for tests and examples.

pub mod memory;
pub mod seaorm;

pub use memory::InMemoryStore;
pub use seaorm::SeaOrmRepository;
