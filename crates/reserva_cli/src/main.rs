//! Command shell over the reservation service.
//!
//! # Responsibility
//! - Expose the service's public operations as line-oriented commands.
//! - Report each operation's outcome as `OK` / `FAILED` from its return
//!   value; storage is never touched directly.

use reserva_core::{
    default_log_level, init_logging, Customer, CustomerPatch, Hotel, HotelPatch,
    ReservationService,
};
use std::io::{self, BufRead, Write};

const DEFAULT_STORE_DIR: &str = "store";
const DEFAULT_LOG_DIR: &str = "logs";

fn main() {
    let mut args = std::env::args().skip(1);
    let store_dir = args.next().unwrap_or_else(|| DEFAULT_STORE_DIR.to_string());
    let log_dir = args.next().unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());

    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let service = match ReservationService::open(&store_dir) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("cannot open storage root `{store_dir}`: {err}");
            std::process::exit(1);
        }
    };

    println!("reserva {} (store: {store_dir})", reserva_core::core_version());
    println!("type `help` for commands, `quit` to exit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, rest)) = tokens.split_first() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            _ => run_command(&service, command, rest),
        }
    }
}

fn run_command(service: &ReservationService, command: &str, args: &[&str]) {
    let outcome = match (command, args) {
        ("hotels", []) => {
            for hotel in service.list_hotels() {
                println!(
                    "{}  name={} location={} total={} available={}",
                    hotel.id, hotel.name, hotel.location, hotel.total_rooms, hotel.available_rooms
                );
            }
            return;
        }
        ("customers", []) => {
            for customer in service.list_customers() {
                println!("{}  name={} email={}", customer.id, customer.name, customer.email);
            }
            return;
        }
        ("reservations", []) => {
            for reservation in service.list_reservations() {
                println!(
                    "{}  hotel={} customer={} rooms={} status={}",
                    reservation.id,
                    reservation.hotel_id,
                    reservation.customer_id,
                    reservation.rooms,
                    reservation.status.as_str()
                );
            }
            return;
        }
        ("add-hotel", [id, name, location, total]) => parse_count(total)
            .map(|total| service.create_hotel(Hotel::new(*id, *name, *location, total, 0))),
        ("add-hotel", [id, name, location, total, available]) => parse_count(total)
            .and_then(|total| {
                parse_count(available).map(|available| {
                    service.create_hotel(Hotel::new(*id, *name, *location, total, available))
                })
            }),
        ("add-customer", [id, name, email]) => {
            Some(service.create_customer(Customer::new(*id, *name, *email)))
        }
        ("set-hotel", [id, overrides @ ..]) if !overrides.is_empty() => {
            parse_hotel_patch(overrides).map(|patch| service.update_hotel(id, &patch))
        }
        ("set-customer", [id, overrides @ ..]) if !overrides.is_empty() => {
            parse_customer_patch(overrides).map(|patch| service.update_customer(id, &patch))
        }
        ("del-hotel", [id]) => Some(service.delete_hotel(id)),
        ("del-customer", [id]) => Some(service.delete_customer(id)),
        ("show-hotel", [id]) => Some(show(service.display_hotel(id))),
        ("show-customer", [id]) => Some(show(service.display_customer(id))),
        ("show-reservation", [id]) => Some(show(service.display_reservation(id))),
        ("reserve", [customer_id, hotel_id, rooms]) => parse_count(rooms).map(|rooms| {
            match service.create_reservation(customer_id, hotel_id, rooms) {
                Some(reservation) => {
                    println!("reservation {}", reservation.id);
                    true
                }
                None => false,
            }
        }),
        ("cancel", [reservation_id]) => Some(service.cancel_reservation(reservation_id)),
        _ => {
            println!("unknown command or bad arguments; type `help`");
            return;
        }
    };

    match outcome {
        Some(true) => println!("OK"),
        Some(false) => println!("FAILED"),
        None => println!("FAILED (arguments must be well-formed; counts are integers)"),
    }
}

fn show(record: Option<reserva_core::Record>) -> bool {
    match record {
        Some(record) => {
            for (field, value) in &record {
                println!("{field}={value}");
            }
            true
        }
        None => false,
    }
}

fn parse_count(token: &str) -> Option<i64> {
    token.parse().ok()
}

fn parse_hotel_patch(overrides: &[&str]) -> Option<HotelPatch> {
    let mut patch = HotelPatch::default();
    for token in overrides {
        let (field, value) = token.split_once('=')?;
        match field {
            "name" => patch.name = Some(value.to_string()),
            "location" => patch.location = Some(value.to_string()),
            "total_rooms" => patch.total_rooms = Some(parse_count(value)?),
            "available_rooms" => patch.available_rooms = Some(parse_count(value)?),
            _ => return None,
        }
    }
    Some(patch)
}

fn parse_customer_patch(overrides: &[&str]) -> Option<CustomerPatch> {
    let mut patch = CustomerPatch::default();
    for token in overrides {
        let (field, value) = token.split_once('=')?;
        match field {
            "name" => patch.name = Some(value.to_string()),
            "email" => patch.email = Some(value.to_string()),
            _ => return None,
        }
    }
    Some(patch)
}

fn print_help() {
    println!("commands:");
    println!("  hotels | customers | reservations            list a view");
    println!("  add-hotel <id> <name> <location> <total> [available]");
    println!("  add-customer <id> <name> <email>");
    println!("  set-hotel <id> field=value ...               fields: name location total_rooms available_rooms");
    println!("  set-customer <id> field=value ...            fields: name email");
    println!("  del-hotel <id> | del-customer <id>");
    println!("  show-hotel <id> | show-customer <id> | show-reservation <id>");
    println!("  reserve <customer_id> <hotel_id> <rooms>");
    println!("  cancel <reservation_id>");
    println!("  help | quit");
}
