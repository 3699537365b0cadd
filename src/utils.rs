use crate::models::{Car, CSV_HEADER};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// `cars` + 2024-03-07 -> `cars_2024_03_07.csv`
pub fn dated_csv_path(output_name: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("{}_{}.csv", output_name, date.format("%Y_%m_%d")))
}

/// Creates (or truncates) the dated CSV file and writes the header row.
pub fn create_car_csv(output_name: &str, date: NaiveDate) -> Result<PathBuf> {
    let path = dated_csv_path(output_name, date);

    let file = File::create(&path)
        .context(format!("Failed to create output file: {}", path.display()))?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;
    writer.flush()?;

    Ok(path)
}

/// Appends one row to an existing CSV file. The file is reopened per call
/// and flushed before returning, so an interrupted run keeps every row
/// written so far.
pub fn append_car_to_csv(path: &Path, car: &Car) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .context(format!("Failed to open output file: {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(car)?;
    writer.flush()?;

    Ok(())
}

pub fn load_cars_from_csv(path: &Path) -> Result<Vec<Car>> {
    let file = File::open(path)
        .context(format!("Failed to open input file: {}", path.display()))?;

    let mut reader = csv::Reader::from_reader(file);
    let mut cars = Vec::new();

    for result in reader.deserialize() {
        let car: Car = result.context("Failed to read car row")?;
        cars.push(car);
    }

    Ok(cars)
}
