use crate::engine::vehicle_expenses;
use crate::error::Result;
use crate::schema::{BookingStatus, Vehicle};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The fleet endpoint returns either a bare array or an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum FleetPayload {
    Bare(Vec<Vehicle>),
    Envelope { vehicles: Vec<Vehicle> },
}

pub fn parse_fleet_json(json: &str) -> Result<Vec<Vehicle>> {
    let payload: FleetPayload = serde_json::from_str(json)?;
    let vehicles = match payload {
        FleetPayload::Bare(vehicles) => vehicles,
        FleetPayload::Envelope { vehicles } => vehicles,
    };
    debug!("Parsed fleet payload with {} vehicles", vehicles.len());
    Ok(vehicles)
}

pub fn load_fleet_file(path: impl AsRef<Path>) -> Result<Vec<Vehicle>> {
    let path = path.as_ref();
    info!("Loading fleet records from {}", path.display());
    let contents = fs::read_to_string(path)?;
    parse_fleet_json(&contents)
}

/// Revenue a vehicle earned according to its own records: completed bookings
/// plus non-booking revenue events.
pub fn derived_revenue(vehicle: &Vehicle) -> f64 {
    let bookings: f64 = vehicle
        .bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed)
        .map(|b| b.total_amount)
        .sum();
    let events: f64 = vehicle
        .timeline_events
        .iter()
        .filter(|e| e.is_other_income())
        .map(|e| e.amount_or_zero())
        .sum();
    bookings + events
}

/// Returns a copy of the fleet where vehicles with no stored totals get them
/// derived from their records. Non-zero stored totals are kept as they are.
pub fn fill_missing_totals(vehicles: &[Vehicle], as_of_year: i32) -> Vec<Vehicle> {
    vehicles
        .iter()
        .map(|vehicle| {
            let mut filled = vehicle.clone();
            if filled.total_revenue == 0.0 {
                filled.total_revenue = derived_revenue(vehicle);
            }
            if filled.total_expenses == 0.0 {
                filled.total_expenses = vehicle_expenses(vehicle, as_of_year).total;
            }
            filled
        })
        .collect()
}
