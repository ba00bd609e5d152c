//! Reservation domain service.
//!
//! # Responsibility
//! - Orchestrate the hotel, customer and reservation repositories over one
//!   storage root.
//! - Keep `hotel.available_rooms` consistent with outstanding active
//!   reservations.
//!
//! # Invariants
//! - Reservations are created `active` and only ever transition to
//!   `canceled`; cancellation is idempotent.
//! - The hotel availability update is persisted before the reservation
//!   record on both create and cancel. There is no rollback if the second
//!   write fails; the two files are not covered by a multi-file commit.
//! - Public operations never propagate errors: failures are logged and
//!   reported through the return value.

use crate::model::{Customer, Entity, Hotel, Reservation};
use crate::repo::{RepoError, Repository};
use crate::store::{Record, StoreError, StoreResult};
use chrono::Utc;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use uuid::Uuid;

const HOTELS_FILE: &str = "hotels.json";
const CUSTOMERS_FILE: &str = "customers.json";
const RESERVATIONS_FILE: &str = "reservations.json";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Internal service failure, logged at the public boundary and converted to
/// a `bool`/`Option` return.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    HotelNotFound(String),
    CustomerNotFound(String),
    ReservationNotFound(String),
    InvalidRooms(i64),
    InsufficientRooms { requested: i64, available: i64 },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::HotelNotFound(id) => write!(f, "hotel `{id}` not found"),
            Self::CustomerNotFound(id) => write!(f, "customer `{id}` not found"),
            Self::ReservationNotFound(id) => write!(f, "reservation `{id}` not found"),
            Self::InvalidRooms(rooms) => {
                write!(f, "rooms must be a positive integer, got {rooms}")
            }
            Self::InsufficientRooms {
                requested,
                available,
            } => write!(
                f,
                "not enough available rooms: requested {requested}, available {available}"
            ),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Sparse field overrides for `update_hotel`. `None` keeps the current
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub total_rooms: Option<i64>,
    pub available_rooms: Option<i64>,
}

/// Sparse field overrides for `update_customer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Cross-entity orchestrator over one storage root, one file per entity
/// kind.
pub struct ReservationService {
    hotels: Repository<Hotel>,
    customers: Repository<Customer>,
    reservations: Repository<Reservation>,
}

impl ReservationService {
    /// Opens a service rooted at `base_dir`, creating the directory when
    /// missing.
    pub fn open(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(|source| StoreError::Io {
            path: base_dir.to_path_buf(),
            source,
        })?;

        info!(
            "event=store_open module=service status=ok base_dir={}",
            base_dir.display()
        );

        Ok(Self {
            hotels: Repository::new(base_dir.join(HOTELS_FILE)),
            customers: Repository::new(base_dir.join(CUSTOMERS_FILE)),
            reservations: Repository::new(base_dir.join(RESERVATIONS_FILE)),
        })
    }

    // -------------------------
    // Hotel operations
    // -------------------------

    /// Persists a new hotel. A hotel defined with `available_rooms == 0`
    /// and positive capacity starts fully available.
    pub fn create_hotel(&self, hotel: Hotel) -> bool {
        report("create_hotel", self.try_create_hotel(hotel))
    }

    pub fn update_hotel(&self, hotel_id: &str, patch: &HotelPatch) -> bool {
        report("update_hotel", self.try_update_hotel(hotel_id, patch))
    }

    pub fn delete_hotel(&self, hotel_id: &str) -> bool {
        report(
            "delete_hotel",
            self.hotels.delete(hotel_id).map_err(ServiceError::from),
        )
    }

    pub fn get_hotel(&self, hotel_id: &str) -> Option<Hotel> {
        fetch("get_hotel", self.hotels.get(hotel_id))
    }

    pub fn display_hotel(&self, hotel_id: &str) -> Option<Record> {
        self.get_hotel(hotel_id).map(|hotel| hotel.to_record())
    }

    pub fn list_hotels(&self) -> Vec<Hotel> {
        self.hotels.all()
    }

    fn try_create_hotel(&self, mut hotel: Hotel) -> ServiceResult<()> {
        if hotel.available_rooms == 0 && hotel.total_rooms > 0 {
            hotel.available_rooms = hotel.total_rooms;
        }
        self.hotels.create(&hotel)?;
        Ok(())
    }

    fn try_update_hotel(&self, hotel_id: &str, patch: &HotelPatch) -> ServiceResult<()> {
        let mut hotel = self
            .hotels
            .get(hotel_id)?
            .ok_or_else(|| ServiceError::HotelNotFound(hotel_id.to_string()))?;

        if let Some(name) = &patch.name {
            hotel.name = name.clone();
        }
        if let Some(location) = &patch.location {
            hotel.location = location.clone();
        }
        if let Some(total_rooms) = patch.total_rooms {
            hotel.total_rooms = total_rooms;
        }
        if let Some(available_rooms) = patch.available_rooms {
            hotel.available_rooms = available_rooms;
        }

        self.hotels.update(&hotel)?;
        Ok(())
    }

    // -------------------------
    // Customer operations
    // -------------------------

    pub fn create_customer(&self, customer: Customer) -> bool {
        report(
            "create_customer",
            self.customers.create(&customer).map_err(ServiceError::from),
        )
    }

    pub fn update_customer(&self, customer_id: &str, patch: &CustomerPatch) -> bool {
        report(
            "update_customer",
            self.try_update_customer(customer_id, patch),
        )
    }

    pub fn delete_customer(&self, customer_id: &str) -> bool {
        report(
            "delete_customer",
            self.customers
                .delete(customer_id)
                .map_err(ServiceError::from),
        )
    }

    pub fn get_customer(&self, customer_id: &str) -> Option<Customer> {
        fetch("get_customer", self.customers.get(customer_id))
    }

    pub fn display_customer(&self, customer_id: &str) -> Option<Record> {
        self.get_customer(customer_id)
            .map(|customer| customer.to_record())
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.all()
    }

    fn try_update_customer(&self, customer_id: &str, patch: &CustomerPatch) -> ServiceResult<()> {
        let mut customer = self
            .customers
            .get(customer_id)?
            .ok_or_else(|| ServiceError::CustomerNotFound(customer_id.to_string()))?;

        if let Some(name) = &patch.name {
            customer.name = name.clone();
        }
        if let Some(email) = &patch.email {
            customer.email = email.clone();
        }

        self.customers.update(&customer)?;
        Ok(())
    }

    // -------------------------
    // Reservation operations
    // -------------------------

    /// Books `rooms` rooms of `hotel_id` for `customer_id`.
    ///
    /// Returns the persisted reservation, or `None` when the customer or
    /// hotel is missing, `rooms` is not positive, or the hotel lacks
    /// capacity.
    pub fn create_reservation(
        &self,
        customer_id: &str,
        hotel_id: &str,
        rooms: i64,
    ) -> Option<Reservation> {
        match self.try_create_reservation(customer_id, hotel_id, rooms) {
            Ok(reservation) => Some(reservation),
            Err(err) => {
                error!("event=create_reservation module=service status=error error={err}");
                None
            }
        }
    }

    /// Cancels a reservation, restoring the hotel's availability.
    ///
    /// Canceling an already-canceled reservation succeeds with no effect.
    pub fn cancel_reservation(&self, reservation_id: &str) -> bool {
        report(
            "cancel_reservation",
            self.try_cancel_reservation(reservation_id),
        )
    }

    pub fn get_reservation(&self, reservation_id: &str) -> Option<Reservation> {
        fetch("get_reservation", self.reservations.get(reservation_id))
    }

    pub fn display_reservation(&self, reservation_id: &str) -> Option<Record> {
        self.get_reservation(reservation_id)
            .map(|reservation| reservation.to_record())
    }

    pub fn list_reservations(&self) -> Vec<Reservation> {
        self.reservations.all()
    }

    fn try_create_reservation(
        &self,
        customer_id: &str,
        hotel_id: &str,
        rooms: i64,
    ) -> ServiceResult<Reservation> {
        self.customers
            .get(customer_id)?
            .ok_or_else(|| ServiceError::CustomerNotFound(customer_id.to_string()))?;

        let mut hotel = self
            .hotels
            .get(hotel_id)?
            .ok_or_else(|| ServiceError::HotelNotFound(hotel_id.to_string()))?;

        if rooms <= 0 {
            return Err(ServiceError::InvalidRooms(rooms));
        }
        if hotel.available_rooms < rooms {
            return Err(ServiceError::InsufficientRooms {
                requested: rooms,
                available: hotel.available_rooms,
            });
        }

        // Availability is persisted before the reservation record. A failure
        // between the two writes leaves the hotel short; the two files are
        // not covered by a single commit.
        hotel.available_rooms -= rooms;
        self.hotels.update(&hotel)?;

        let reservation = Reservation::new(
            Uuid::new_v4().to_string(),
            hotel_id,
            customer_id,
            rooms,
            now_rfc3339(),
        );
        self.reservations.create(&reservation)?;
        Ok(reservation)
    }

    fn try_cancel_reservation(&self, reservation_id: &str) -> ServiceResult<()> {
        let mut reservation = self
            .reservations
            .get(reservation_id)?
            .ok_or_else(|| ServiceError::ReservationNotFound(reservation_id.to_string()))?;

        // Terminal state: canceling again is a no-op.
        if reservation.is_canceled() {
            return Ok(());
        }

        let mut hotel = self
            .hotels
            .get(&reservation.hotel_id)?
            .ok_or_else(|| ServiceError::HotelNotFound(reservation.hotel_id.clone()))?;

        // Same write ordering as create: hotel first, no rollback.
        hotel.available_rooms += reservation.rooms;
        self.hotels.update(&hotel)?;

        reservation.cancel(now_rfc3339());
        self.reservations.update(&reservation)?;
        Ok(())
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn report(op: &str, result: ServiceResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!("event={op} module=service status=error error={err}");
            false
        }
    }
}

fn fetch<T>(op: &str, result: Result<Option<T>, RepoError>) -> Option<T> {
    match result {
        Ok(found) => found,
        Err(err) => {
            error!("event={op} module=service status=error error={err}");
            None
        }
    }
}
