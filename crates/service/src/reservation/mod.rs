//! Consultation reservations tied to a counselor and a time slot.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{CreateReservationInput, Reservation, ReservationStatus, ReservationView};
pub use repository::ReservationRepository;
pub use service::{ReservationService, RESERVATION_CREATED};
