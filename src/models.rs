// Vehicle data structures
// `VehicleRecord` is the loose shape a content service hands us, `Vehicle` is the
// normalized shape every other module works with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Body style / marketing tag used by the listing filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleCategory {
    #[default]
    Sedan,
    Suv,
    Hatchback,
    Wagon,
    Coupe,
    Convertible,
    Pickup,
    Van,
    Motorcycle,
    Premium,
    Family,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 11] = [
        VehicleCategory::Sedan,
        VehicleCategory::Suv,
        VehicleCategory::Hatchback,
        VehicleCategory::Wagon,
        VehicleCategory::Coupe,
        VehicleCategory::Convertible,
        VehicleCategory::Pickup,
        VehicleCategory::Van,
        VehicleCategory::Motorcycle,
        VehicleCategory::Premium,
        VehicleCategory::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "sedan",
            VehicleCategory::Suv => "suv",
            VehicleCategory::Hatchback => "hatchback",
            VehicleCategory::Wagon => "wagon",
            VehicleCategory::Coupe => "coupe",
            VehicleCategory::Convertible => "convertible",
            VehicleCategory::Pickup => "pickup",
            VehicleCategory::Van => "van",
            VehicleCategory::Motorcycle => "motorcycle",
            VehicleCategory::Premium => "premium",
            VehicleCategory::Family => "family",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for VehicleCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        VehicleCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationEntry {
    pub label: String,
    pub value: String,
}

// A single vehicle in the dealership inventory.
// Immutable once a catalog has been built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub slug: String,
    pub brand: String,
    pub model: String,
    pub category: VehicleCategory,
    pub year: u16,
    pub price: u32, // Whole euros
    pub mileage_km: Option<u32>, // None when the source did not report an odometer reading
    pub fuel: String,
    pub transmission: String,
    pub description: String,
    pub features: Vec<String>,
    pub specifications: Vec<SpecificationEntry>,
    pub image: String,
    pub gallery: Vec<String>,
}

impl Vehicle {
    // Display name, also the primary field for text search
    pub fn name(&self) -> String {
        match (self.brand.is_empty(), self.model.is_empty()) {
            (false, false) => format!("{} {}", self.brand, self.model),
            (false, true) => self.brand.clone(),
            _ => self.model.clone(),
        }
    }

    pub fn year_label(&self) -> String {
        self.year.to_string()
    }

    pub fn mileage_label(&self) -> String {
        match self.mileage_km {
            Some(km) => format!("{} km", group_thousands(km)),
            None => "N/A".to_string(),
        }
    }

    pub fn price_label(&self) -> String {
        format!("{} €", group_thousands(self.price))
    }
}

// 14100 -> "14 100", the grouping used on listing cards
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

// --- Source records ---

// Year as delivered by the content service: an integer, a float such as 2017.0, or a display string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(i64),
    Float(f64),
    Text(String),
}

impl YearValue {
    // Four-digit year or None
    pub fn parse(&self) -> Option<u16> {
        let year = match self {
            YearValue::Number(n) => *n,
            YearValue::Float(f) if f.is_finite() && f.fract() == 0.0 => *f as i64,
            YearValue::Float(_) => return None,
            YearValue::Text(s) => s.trim().parse::<i64>().ok()?,
        };
        (1000..=9999).contains(&year).then_some(year as u16)
    }
}

// Every field optional, matching what a CMS query may or may not fill in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<YearValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Vec<SpecificationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
}
