// CSV export of a listing, one row per vehicle

use crate::models::Vehicle;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV row")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ExportRow<'a> {
    slug: &'a str,
    brand: &'a str,
    model: &'a str,
    year: u16,
    price: u32,
    mileage_km: Option<u32>,
    fuel: &'a str,
    transmission: &'a str,
    category: &'static str,
}

impl<'a> From<&'a Vehicle> for ExportRow<'a> {
    fn from(vehicle: &'a Vehicle) -> Self {
        Self {
            slug: &vehicle.slug,
            brand: &vehicle.brand,
            model: &vehicle.model,
            year: vehicle.year,
            price: vehicle.price,
            mileage_km: vehicle.mileage_km,
            fuel: &vehicle.fuel,
            transmission: &vehicle.transmission,
            category: vehicle.category.as_str(),
        }
    }
}

pub fn write_csv<W: Write>(writer: W, vehicles: &[Vehicle]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for vehicle in vehicles {
        wtr.serialize(ExportRow::from(vehicle))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_bytes(vehicles: &[Vehicle]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, vehicles)?;
    Ok(buffer)
}
