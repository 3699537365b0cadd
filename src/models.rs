use serde::{Deserialize, Serialize};

/// Column names of the output CSV, in record order.
pub const CSV_HEADER: [&str; 9] = [
    "name",
    "year",
    "engine_capacity",
    "horse_power",
    "transmission",
    "drive_unit",
    "fuel",
    "mileage",
    "price",
];

/// One fully extracted used-car listing.
///
/// Only built once every field has been parsed, so a `Car` never holds
/// partial data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub name: String,
    pub year: i32,
    pub engine_capacity: f64,
    pub horse_power: i64,
    pub transmission: String,
    pub drive_unit: String,
    pub fuel: String,
    pub mileage: i64,
    pub price: u64,
}
