//! Domain services orchestrating repositories.
//!
//! # Responsibility
//! - Enforce cross-entity invariants (hotel room-availability accounting).
//! - Act as the error-recovery boundary: every failure is logged and
//!   surfaced as a `bool`/`Option` return, never as an error value.
//!
//! # See also
//! - `crate::repo` for the per-entity persistence contracts.

mod reservation_service;

pub use reservation_service::{
    CustomerPatch, HotelPatch, ReservationService, ServiceError, ServiceResult,
};
