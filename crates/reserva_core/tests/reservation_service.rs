use reserva_core::{
    Customer, CustomerPatch, Entity, Hotel, HotelPatch, ReservationService, ReservationStatus,
};
use std::fs;
use tempfile::{tempdir, TempDir};

fn open_service(dir: &TempDir) -> ReservationService {
    ReservationService::open(dir.path().join("store")).unwrap()
}

fn seed_hotel(service: &ReservationService, id: &str, total: i64, available: i64) {
    assert!(service.create_hotel(Hotel::new(id, "Seaside Inn", "Lisbon", total, available)));
}

fn seed_customer(service: &ReservationService, id: &str) {
    assert!(service.create_customer(Customer::new(id, "Ana", "ana@example.com")));
}

#[test]
fn open_creates_the_storage_root() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("store");

    let _service = ReservationService::open(&root).unwrap();
    assert!(root.is_dir());
}

#[test]
fn create_hotel_defaults_availability_to_capacity() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);

    seed_hotel(&service, "h1", 5, 0);

    let hotel = service.get_hotel("h1").unwrap();
    assert_eq!(hotel.available_rooms, 5);
}

#[test]
fn create_hotel_keeps_explicit_availability() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);

    seed_hotel(&service, "h1", 5, 2);

    let hotel = service.get_hotel("h1").unwrap();
    assert_eq!(hotel.available_rooms, 2);
}

#[test]
fn create_hotel_reports_validation_failure_as_false() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);

    assert!(!service.create_hotel(Hotel::new("h1", "Inn", "", 3, 3)));
    assert!(service.get_hotel("h1").is_none());
}

#[test]
fn create_duplicate_hotel_reports_false() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);

    seed_hotel(&service, "h1", 3, 3);
    assert!(!service.create_hotel(Hotel::new("h1", "Other Inn", "Porto", 4, 4)));
}

#[test]
fn update_hotel_applies_only_patched_fields() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 5, 5);

    let patch = HotelPatch {
        location: Some("Porto".to_string()),
        ..HotelPatch::default()
    };
    assert!(service.update_hotel("h1", &patch));

    let hotel = service.get_hotel("h1").unwrap();
    assert_eq!(hotel.location, "Porto");
    assert_eq!(hotel.name, "Seaside Inn");
    assert_eq!(hotel.total_rooms, 5);
}

#[test]
fn update_hotel_missing_returns_false() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);

    assert!(!service.update_hotel("ghost", &HotelPatch::default()));
}

#[test]
fn update_hotel_rejecting_invariant_violation_keeps_stored_state() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 10, 4);

    let patch = HotelPatch {
        available_rooms: Some(11),
        ..HotelPatch::default()
    };
    assert!(!service.update_hotel("h1", &patch));

    let hotel = service.get_hotel("h1").unwrap();
    assert_eq!(hotel.available_rooms, 4);
}

#[test]
fn update_customer_applies_only_patched_fields() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_customer(&service, "c1");

    let patch = CustomerPatch {
        email: Some("ana@newmail.com".to_string()),
        ..CustomerPatch::default()
    };
    assert!(service.update_customer("c1", &patch));

    let customer = service.get_customer("c1").unwrap();
    assert_eq!(customer.email, "ana@newmail.com");
    assert_eq!(customer.name, "Ana");
}

#[test]
fn delete_of_missing_entity_succeeds_silently() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);

    assert!(service.delete_hotel("ghost"));
    assert!(service.delete_customer("ghost"));
}

#[test]
fn reservation_books_rooms_and_cancel_restores_them() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);
    seed_customer(&service, "c1");

    let reservation = service.create_reservation("c1", "h1", 2).unwrap();
    assert_eq!(reservation.rooms, 2);
    assert_eq!(reservation.status, ReservationStatus::Active);
    assert!(!reservation.created_at.is_empty());
    assert_eq!(service.get_hotel("h1").unwrap().available_rooms, 1);

    // Insufficient capacity: rejected, availability untouched.
    assert!(service.create_reservation("c1", "h1", 2).is_none());
    assert_eq!(service.get_hotel("h1").unwrap().available_rooms, 1);

    assert!(service.cancel_reservation(&reservation.id));
    assert_eq!(service.get_hotel("h1").unwrap().available_rooms, 3);

    let canceled = service.get_reservation(&reservation.id).unwrap();
    assert_eq!(canceled.status, ReservationStatus::Canceled);
    assert!(!canceled.canceled_at.is_empty());
}

#[test]
fn cancel_is_idempotent() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);
    seed_customer(&service, "c1");

    let reservation = service.create_reservation("c1", "h1", 1).unwrap();
    assert!(service.cancel_reservation(&reservation.id));
    let after_first = service.get_hotel("h1").unwrap().available_rooms;
    let canceled_at = service.get_reservation(&reservation.id).unwrap().canceled_at;

    // Second cancel succeeds with no further effect.
    assert!(service.cancel_reservation(&reservation.id));
    assert_eq!(service.get_hotel("h1").unwrap().available_rooms, after_first);
    assert_eq!(
        service.get_reservation(&reservation.id).unwrap().canceled_at,
        canceled_at
    );
}

#[test]
fn create_reservation_rejects_unknown_customer_and_hotel() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);
    seed_customer(&service, "c1");

    assert!(service.create_reservation("ghost", "h1", 1).is_none());
    assert!(service.create_reservation("c1", "ghost", 1).is_none());
    assert_eq!(service.get_hotel("h1").unwrap().available_rooms, 3);
}

#[test]
fn create_reservation_rejects_non_positive_rooms() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);
    seed_customer(&service, "c1");

    assert!(service.create_reservation("c1", "h1", 0).is_none());
    assert!(service.create_reservation("c1", "h1", -2).is_none());
    assert_eq!(service.get_hotel("h1").unwrap().available_rooms, 3);
}

#[test]
fn cancel_missing_reservation_returns_false() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);

    assert!(!service.cancel_reservation("ghost"));
}

#[test]
fn cancel_with_missing_hotel_fails_and_keeps_reservation_active() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);
    seed_customer(&service, "c1");

    let reservation = service.create_reservation("c1", "h1", 1).unwrap();
    assert!(service.delete_hotel("h1"));

    assert!(!service.cancel_reservation(&reservation.id));
    assert_eq!(
        service.get_reservation(&reservation.id).unwrap().status,
        ReservationStatus::Active
    );
}

#[test]
fn reservation_ids_are_unique() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);
    seed_customer(&service, "c1");

    let first = service.create_reservation("c1", "h1", 1).unwrap();
    let second = service.create_reservation("c1", "h1", 1).unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn availability_never_exceeds_capacity_across_operations() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 0);
    seed_customer(&service, "c1");

    let check = |label: &str| {
        let hotel = service.get_hotel("h1").unwrap();
        assert!(
            hotel.available_rooms <= hotel.total_rooms && hotel.available_rooms >= 0,
            "invariant violated after {label}: {hotel:?}"
        );
    };
    check("create");

    let first = service.create_reservation("c1", "h1", 2).unwrap();
    check("first booking");
    let second = service.create_reservation("c1", "h1", 1).unwrap();
    check("second booking");

    assert!(service.cancel_reservation(&first.id));
    check("first cancel");
    assert!(service.cancel_reservation(&second.id));
    check("second cancel");
    assert!(service.cancel_reservation(&second.id));
    check("repeated cancel");

    assert_eq!(service.get_hotel("h1").unwrap().available_rooms, 3);
}

#[test]
fn corrupt_storage_file_degrades_to_empty_and_service_recovers() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("store");
    let service = ReservationService::open(&root).unwrap();
    seed_hotel(&service, "h1", 3, 3);

    fs::write(root.join("hotels.json"), "not json at all").unwrap();

    assert!(service.list_hotels().is_empty());
    assert!(service.get_hotel("h1").is_none());

    // The service keeps operating: a fresh create rewrites the file.
    seed_hotel(&service, "h2", 4, 4);
    assert_eq!(service.list_hotels().len(), 1);
}

#[test]
fn display_returns_the_persisted_record_shape() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);

    let record = service.display_hotel("h1").unwrap();
    assert_eq!(record["id"], "h1");
    assert_eq!(record["name"], "Seaside Inn");
    assert_eq!(record["total_rooms"], 3);
    assert_eq!(record["available_rooms"], 3);

    assert!(service.display_hotel("ghost").is_none());
    assert!(service.display_reservation("ghost").is_none());
}

#[test]
fn reservation_record_roundtrips_through_display() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir);
    seed_hotel(&service, "h1", 3, 3);
    seed_customer(&service, "c1");

    let reservation = service.create_reservation("c1", "h1", 1).unwrap();
    let record = service.display_reservation(&reservation.id).unwrap();

    assert_eq!(record, reservation.to_record());
    assert_eq!(record["status"], "active");
}
