//! Core library for Reserva, a file-backed hotel reservation system:
//! record storage, entity validation, repositories, and the domain service
//! that keeps room availability consistent with active reservations.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{Customer, Entity, Hotel, Reservation, ReservationStatus, ValidationError};
pub use repo::{RepoError, RepoResult, Repository};
pub use service::{CustomerPatch, HotelPatch, ReservationService, ServiceError, ServiceResult};
pub use store::{JsonStore, Record, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
