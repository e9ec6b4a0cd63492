// Synthetic inventory generator for demo dealerships.
// Output is a JSON array of `VehicleRecord`s, the same shape `Catalog::load_json` reads.

use crate::catalog::slugify;
use crate::models::{SpecificationEntry, VehicleCategory, VehicleRecord, YearValue};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::Path;

const CURRENT_MODEL_YEAR: i64 = 2025;

// brand, model, category, base price when new
const MODELS: &[(&str, &str, VehicleCategory, u32)] = &[
    ("BMW", "320d", VehicleCategory::Sedan, 48_000),
    ("BMW", "X5", VehicleCategory::Suv, 85_000),
    ("Audi", "A4 Avant", VehicleCategory::Wagon, 52_000),
    ("Audi", "Q5", VehicleCategory::Suv, 64_000),
    ("Volvo", "V60", VehicleCategory::Wagon, 50_000),
    ("Volvo", "XC90", VehicleCategory::Family, 88_000),
    ("Toyota", "Corolla", VehicleCategory::Hatchback, 30_000),
    ("Toyota", "Hilux", VehicleCategory::Pickup, 45_000),
    ("Skoda", "Octavia", VehicleCategory::Wagon, 32_000),
    ("Volkswagen", "Golf", VehicleCategory::Hatchback, 31_000),
    ("Volkswagen", "Transporter", VehicleCategory::Van, 47_000),
    ("Mercedes-Benz", "E 220", VehicleCategory::Premium, 66_000),
    ("Mazda", "MX-5", VehicleCategory::Convertible, 36_000),
    ("Ford", "Mustang", VehicleCategory::Coupe, 58_000),
    ("Yamaha", "MT-07", VehicleCategory::Motorcycle, 9_000),
];

const FUELS: &[&str] = &["Bensiini", "Diesel", "Hybridi", "Sähkö"];
const TRANSMISSIONS: &[&str] = &["Automaatti", "Manuaali"];
const COLORS: &[&str] = &["Musta", "Valkoinen", "Harmaa", "Sininen", "Punainen"];
const DRIVETRAINS: &[&str] = &["Etuveto", "Takaveto", "Neliveto"];
const FEATURES: &[&str] = &[
    "Vetokoukku",
    "Lohkolämmitin",
    "Peruutuskamera",
    "Navigointi",
    "Istuinlämmitys",
    "Adaptiivinen vakionopeudensäädin",
    "Nahkaverhoilu",
    "Kaistavahti",
    "Sähköinen takaluukku",
    "Panoraamakatto",
];

// Fictitious dealerships the demo site ships with
pub const DEMO_TENANTS: &[&str] = &["autotalo-virtanen", "kaupunkiauto", "pohjolan-vaihtoautot"];

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub tenant: String,
    pub count: usize,
    pub seed: u64,
}

pub fn generate_inventory(options: &SeedOptions) -> Vec<VehicleRecord> {
    let tenant = slugify(&options.tenant);
    let mut rng = StdRng::seed_from_u64(options.seed);

    (0..options.count)
        .map(|index| generate_vehicle(&mut rng, &tenant, index))
        .collect()
}

fn generate_vehicle(rng: &mut StdRng, tenant: &str, index: usize) -> VehicleRecord {
    let &(brand, model, category, new_price) = pick(rng, MODELS);
    let age = rng.gen_range(0..=14_i64);
    let year = CURRENT_MODEL_YEAR - age;
    let mileage = if age == 0 {
        rng.gen_range(0..=5_000_u32)
    } else {
        age as u32 * rng.gen_range(8_000..=25_000_u32)
    };

    // Roughly 9 % depreciation per year, plus a wear discount, rounded to the nearest hundred
    let depreciation = 0.91_f64.powi(age as i32);
    let wear = 1.0 - (f64::from(mileage) / 1_000_000.0).min(0.3);
    let price = (f64::from(new_price) * depreciation * wear / 100.0).round() * 100.0;

    let fuel = if category == VehicleCategory::Motorcycle {
        "Bensiini"
    } else {
        *pick(rng, FUELS)
    };
    let transmission = *pick(rng, TRANSMISSIONS);

    let feature_count = rng.gen_range(2..=5);
    let mut features: Vec<String> = FEATURES
        .choose_multiple(rng, feature_count)
        .map(|f| f.to_string())
        .collect();
    features.sort();

    let id = format!("{}-{:04}", tenant, index + 1);
    let slug = format!("{}-{}", slugify(&format!("{} {} {}", brand, model, year)), id);
    let image = format!("/images/{}/{}.jpg", tenant, slug);
    let gallery = (1..=rng.gen_range(0..=4_u32))
        .map(|n| format!("/images/{}/{}-{}.jpg", tenant, slug, n))
        .collect();

    VehicleRecord {
        id: Some(id),
        slug: Some(slug),
        brand: Some(brand.to_string()),
        model: Some(model.to_string()),
        category: Some(category.as_str().to_string()),
        year: Some(YearValue::Number(year)),
        price: Some(price),
        mileage: Some(f64::from(mileage)),
        fuel: Some(fuel.to_string()),
        transmission: Some(transmission.to_string()),
        description: Some(format!(
            "{} {} {}, {} km. Varusteina mm. {}.",
            year,
            brand,
            model,
            mileage,
            features.join(", ").to_lowercase()
        )),
        specifications: Some(vec![
            SpecificationEntry {
                label: "Väri".to_string(),
                value: pick(rng, COLORS).to_string(),
            },
            SpecificationEntry {
                label: "Vetotapa".to_string(),
                value: pick(rng, DRIVETRAINS).to_string(),
            },
            SpecificationEntry {
                label: "Vaihteisto".to_string(),
                value: transmission.to_string(),
            },
        ]),
        features: Some(features),
        image: Some(image),
        gallery: Some(gallery),
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    // Every table above is a non-empty constant
    &items[rng.gen_range(0..items.len())]
}

pub fn write_inventory(path: &Path, records: &[VehicleRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(records).context("Failed to serialize inventory")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write inventory to {}", path.display()))?;
    tracing::info!(path = %path.display(), vehicles = records.len(), "Wrote seed inventory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn options(seed: u64) -> SeedOptions {
        SeedOptions {
            tenant: "Autotalo Virtanen".to_string(),
            count: 40,
            seed,
        }
    }

    #[test]
    fn same_seed_same_inventory() {
        assert_eq!(generate_inventory(&options(7)), generate_inventory(&options(7)));
        assert_ne!(generate_inventory(&options(7)), generate_inventory(&options(8)));
    }

    #[test]
    fn generated_records_load_without_loss() {
        let records = generate_inventory(&options(42));
        let catalog = Catalog::from_records(records);
        assert_eq!(catalog.len(), 40);
        for vehicle in catalog.vehicles() {
            assert!(vehicle.slug.ends_with(&vehicle.id));
            assert!(vehicle.id.starts_with("autotalo-virtanen-"));
            assert!((2011..=2025).contains(&vehicle.year));
            assert!(vehicle.price % 100 == 0);
            assert!(vehicle.mileage_km.is_some());
            assert!(!vehicle.features.is_empty());
        }
    }

    #[test]
    fn motorcycles_run_on_petrol() {
        let records = generate_inventory(&SeedOptions {
            tenant: "kaupunkiauto".into(),
            count: 300,
            seed: 1,
        });
        assert!(records
            .iter()
            .filter(|r| r.category.as_deref() == Some("motorcycle"))
            .all(|r| r.fuel.as_deref() == Some("Bensiini")));
    }

    #[test]
    fn write_inventory_round_trips_through_catalog() {
        let dir = std::env::temp_dir().join(format!("autodealer-seed-{}", std::process::id()));
        let path = dir.join("inventory.json");
        let records = generate_inventory(&options(3));
        write_inventory(&path, &records).unwrap();

        let catalog = Catalog::load_json(&path).unwrap();
        assert_eq!(catalog.len(), records.len());
        std::fs::remove_dir_all(&dir).ok();
    }
}
