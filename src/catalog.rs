// Inventory catalog: normalizes source records into `Vehicle`s and keeps them
// behind an `Arc` so handlers can share one immutable copy.

use crate::models::{SpecificationEntry, Vehicle, VehicleCategory, VehicleRecord};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read inventory file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse inventory file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    version: u64,
    vehicles: Arc<[Vehicle]>,
}

// Option lists for the listing filter controls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub brands: Vec<String>,
    pub years: Vec<u16>, // Newest first
    pub fuels: Vec<String>,
    pub transmissions: Vec<String>,
    pub categories: Vec<VehicleCategory>,
}

impl Catalog {
    // Build from already-normalized vehicles. Duplicate slugs keep the first occurrence.
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        let mut seen = HashSet::new();
        let unique: Vec<Vehicle> = vehicles
            .into_iter()
            .filter(|vehicle| {
                let fresh = seen.insert(vehicle.slug.clone());
                if !fresh {
                    tracing::warn!(slug = %vehicle.slug, "Duplicate slug in inventory, skipping vehicle");
                }
                fresh
            })
            .collect();

        Self {
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
            vehicles: unique.into(),
        }
    }

    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let total = records.len();
        let vehicles: Vec<Vehicle> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| normalize_record(index, record))
            .collect();
        tracing::info!(total, accepted = vehicles.len(), "Normalized inventory records");
        Self::new(vehicles)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: shown.clone(),
            source,
        })?;
        let records: Vec<VehicleRecord> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: shown.clone(),
                source,
            })?;
        tracing::info!(path = %shown, records = records.len(), "Loaded inventory file");
        Ok(Self::from_records(records))
    }

    // Bumped on every construction; used as part of the listing cache key
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.slug == slug)
    }

    pub fn facets(&self) -> Facets {
        let mut brands = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut fuels = BTreeSet::new();
        let mut transmissions = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for vehicle in self.vehicles.iter() {
            if !vehicle.brand.is_empty() {
                brands.insert(vehicle.brand.clone());
            }
            years.insert(vehicle.year);
            if !vehicle.fuel.is_empty() {
                fuels.insert(vehicle.fuel.clone());
            }
            if !vehicle.transmission.is_empty() {
                transmissions.insert(vehicle.transmission.clone());
            }
            categories.insert(vehicle.category);
        }

        Facets {
            brands: brands.into_iter().collect(),
            years: years.into_iter().rev().collect(),
            fuels: fuels.into_iter().collect(),
            transmissions: transmissions.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// Convert a loose record into a vehicle, substituting neutral defaults for
// missing fields. Records without a usable year are dropped.
fn normalize_record(index: usize, record: VehicleRecord) -> Option<Vehicle> {
    let VehicleRecord {
        id,
        slug,
        brand,
        model,
        category,
        year,
        price,
        mileage,
        fuel,
        transmission,
        description,
        features,
        specifications,
        image,
        gallery,
    } = record;

    let Some(year) = year.as_ref().and_then(|y| y.parse()) else {
        tracing::warn!(index, ?year, "Inventory record has no valid four-digit year, skipping");
        return None;
    };

    let brand = brand.unwrap_or_default().trim().to_string();
    let model = model.unwrap_or_default().trim().to_string();
    let id = id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("vehicle-{}", index + 1));
    let slug = slug
        .filter(|slug| !slug.trim().is_empty())
        .unwrap_or_else(|| slugify(&format!("{} {} {} {}", brand, model, year, id)));

    let category = match category.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(index, error = %e, "Falling back to default category");
            VehicleCategory::default()
        }),
        _ => VehicleCategory::default(),
    };

    Some(Vehicle {
        id,
        slug,
        brand,
        model,
        category,
        year,
        price: price.map(to_whole_units).unwrap_or(0),
        mileage_km: mileage.map(to_whole_units),
        fuel: fuel.unwrap_or_default(),
        transmission: transmission.unwrap_or_default(),
        description: description.unwrap_or_default(),
        features: features.unwrap_or_default(),
        specifications: specifications
            .unwrap_or_default()
            .into_iter()
            .filter(|entry: &SpecificationEntry| !entry.label.is_empty())
            .collect(),
        image: image.unwrap_or_default(),
        gallery: gallery.unwrap_or_default(),
    })
}

// Negative and non-finite amounts clamp to zero
fn to_whole_units(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        let mapped = match ch {
            'ä' | 'Ä' | 'å' | 'Å' => Some('a'),
            'ö' | 'Ö' => Some('o'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        };
        match mapped {
            Some(c) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
            }
            None => pending_dash = true,
        }
    }
    slug
}
