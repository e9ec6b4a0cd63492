// Listing filter/sort engine
// Stateless: every call scans the full collection and returns a fresh, ordered subset.

use crate::models::{Vehicle, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// Inclusive numeric range selected from one of the fixed bracket lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bracket {
    pub min: u32,
    pub max: u32,
}

impl Bracket {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    // "10000-20000", or "50000-" for the open-ended top bracket
    pub fn id(&self) -> String {
        if self.max == u32::MAX {
            format!("{}-", self.min)
        } else {
            format!("{}-{}", self.min, self.max)
        }
    }
}

pub const PRICE_BRACKETS: [Bracket; 6] = [
    Bracket::new(0, 5_000),
    Bracket::new(5_000, 10_000),
    Bracket::new(10_000, 20_000),
    Bracket::new(20_000, 30_000),
    Bracket::new(30_000, 50_000),
    Bracket::new(50_000, u32::MAX),
];

pub const MILEAGE_BRACKETS: [Bracket; 5] = [
    Bracket::new(0, 50_000),
    Bracket::new(50_000, 100_000),
    Bracket::new(100_000, 150_000),
    Bracket::new(150_000, 200_000),
    Bracket::new(200_000, u32::MAX),
];

// Look up a bracket by its id within one of the fixed lists
pub fn find_bracket(brackets: &[Bracket], id: &str) -> Option<Bracket> {
    brackets.iter().copied().find(|bracket| bracket.id() == id.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "year-desc")]
    YearDesc,
    #[serde(rename = "year-asc")]
    YearAsc,
    #[serde(rename = "km-asc")]
    MileageAsc,
    #[serde(rename = "km-desc")]
    MileageDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::YearDesc,
        SortKey::YearAsc,
        SortKey::MileageAsc,
        SortKey::MileageDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::YearDesc => "year-desc",
            SortKey::YearAsc => "year-asc",
            SortKey::MileageAsc => "km-asc",
            SortKey::MileageDesc => "km-desc",
        }
    }

    fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match self {
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::YearAsc => a.year.cmp(&b.year),
            SortKey::YearDesc => b.year.cmp(&a.year),
            SortKey::MileageAsc => compare_mileage(a.mileage_km, b.mileage_km, false),
            SortKey::MileageDesc => compare_mileage(a.mileage_km, b.mileage_km, true),
        }
    }
}

// Unknown odometer readings go last in both directions
fn compare_mileage(a: Option<u32>, b: Option<u32>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}'")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

// Snapshot of the user's filter selections. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub brand: Option<String>,
    pub year: Option<u16>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub category: Option<VehicleCategory>,
    pub price: Option<Bracket>,
    pub mileage: Option<Bracket>,
    pub sort: SortKey,
}

impl FilterCriteria {
    // Lowercased search needle, None for an empty or blank query
    fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }

    fn matches_exact(&self, vehicle: &Vehicle) -> bool {
        self.brand.as_ref().is_none_or(|brand| vehicle.brand == *brand)
            && self.year.is_none_or(|year| vehicle.year == year)
            && self.fuel.as_ref().is_none_or(|fuel| vehicle.fuel == *fuel)
            && self
                .transmission
                .as_ref()
                .is_none_or(|transmission| vehicle.transmission == *transmission)
            && self.category.is_none_or(|category| vehicle.category == category)
    }

    fn matches_brackets(&self, vehicle: &Vehicle) -> bool {
        self.price.is_none_or(|bracket| bracket.contains(vehicle.price))
            && self.mileage.is_none_or(|bracket| {
                vehicle.mileage_km.is_some_and(|km| bracket.contains(km))
            })
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.matches_with(vehicle, self.needle().as_deref())
    }

    // Text search first, it discards the most records on typical queries
    fn matches_with(&self, vehicle: &Vehicle, needle: Option<&str>) -> bool {
        needle.is_none_or(|needle| matches_text(vehicle, needle))
            && self.matches_exact(vehicle)
            && self.matches_brackets(vehicle)
    }
}

fn matches_text(vehicle: &Vehicle, needle: &str) -> bool {
    vehicle.name().to_lowercase().contains(needle)
        || vehicle.brand.to_lowercase().contains(needle)
        || vehicle.model.to_lowercase().contains(needle)
        || vehicle.description.to_lowercase().contains(needle)
}

pub fn filter_and_sort(vehicles: &[Vehicle], criteria: &FilterCriteria) -> Vec<Vehicle> {
    let needle = criteria.needle();
    let mut matches: Vec<Vehicle> = vehicles
        .iter()
        .filter(|vehicle| criteria.matches_with(vehicle, needle.as_deref()))
        .cloned()
        .collect();

    // sort_by is stable: equal keys keep collection order
    matches.sort_by(|a, b| criteria.sort.compare(a, b));

    tracing::debug!(
        total = vehicles.len(),
        matched = matches.len(),
        sort = %criteria.sort,
        "Filtered inventory"
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(slug: &str, brand: &str, year: u16, price: u32, km: Option<u32>) -> Vehicle {
        Vehicle {
            id: slug.to_string(),
            slug: slug.to_string(),
            brand: brand.to_string(),
            model: "Model".to_string(),
            category: VehicleCategory::Sedan,
            year,
            price,
            mileage_km: km,
            fuel: "Diesel".to_string(),
            transmission: "Automaatti".to_string(),
            description: String::new(),
            features: Vec::new(),
            specifications: Vec::new(),
            image: String::new(),
            gallery: Vec::new(),
        }
    }

    fn slugs(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.slug.as_str()).collect()
    }

    #[test]
    fn default_criteria_sort_by_price_ascending() {
        let stock = vec![
            vehicle("a", "Audi", 2020, 22_000, Some(80_000)),
            vehicle("b", "BMW", 2017, 14_100, Some(235_000)),
        ];
        let result = filter_and_sort(&stock, &FilterCriteria::default());
        assert_eq!(slugs(&result), vec!["b", "a"]);
    }

    #[test]
    fn blank_query_is_unconstrained() {
        let stock = vec![vehicle("a", "Audi", 2020, 22_000, None)];
        let criteria = FilterCriteria {
            query: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&stock, &criteria).len(), 1);
    }

    #[test]
    fn query_matches_description_case_insensitively() {
        let mut with_hook = vehicle("a", "Audi", 2020, 22_000, None);
        with_hook.description = "Vetokoukku ja lohkolämmitin".into();
        let stock = vec![with_hook, vehicle("b", "BMW", 2017, 14_100, None)];
        let criteria = FilterCriteria {
            query: Some("VETOKOUKKU".into()),
            ..Default::default()
        };
        assert_eq!(slugs(&filter_and_sort(&stock, &criteria)), vec!["a"]);
    }

    #[test]
    fn query_matches_across_brand_and_model() {
        let stock = vec![vehicle("a", "Audi", 2020, 22_000, None)];
        let criteria = FilterCriteria {
            query: Some("audi mod".into()),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&stock, &criteria).len(), 1);
    }

    #[test]
    fn exact_filters_are_case_sensitive() {
        let stock = vec![vehicle("a", "BMW", 2017, 14_100, None)];
        let criteria = FilterCriteria {
            brand: Some("bmw".into()),
            ..Default::default()
        };
        assert!(filter_and_sort(&stock, &criteria).is_empty());
    }

    #[test]
    fn missing_mileage_never_matches_a_bracket_and_sorts_last() {
        let stock = vec![
            vehicle("unknown", "Audi", 2020, 22_000, None),
            vehicle("low", "Audi", 2020, 22_000, Some(10_000)),
            vehicle("high", "Audi", 2020, 22_000, Some(90_000)),
        ];
        let bracketed = FilterCriteria {
            mileage: Some(MILEAGE_BRACKETS[0]),
            ..Default::default()
        };
        assert_eq!(slugs(&filter_and_sort(&stock, &bracketed)), vec!["low"]);

        let asc = FilterCriteria {
            sort: SortKey::MileageAsc,
            ..Default::default()
        };
        assert_eq!(slugs(&filter_and_sort(&stock, &asc)), vec!["low", "high", "unknown"]);

        let desc = FilterCriteria {
            sort: SortKey::MileageDesc,
            ..Default::default()
        };
        assert_eq!(slugs(&filter_and_sort(&stock, &desc)), vec!["high", "low", "unknown"]);
    }

    #[test]
    fn inverted_bracket_yields_empty_result() {
        let stock = vec![vehicle("a", "Audi", 2020, 22_000, None)];
        let criteria = FilterCriteria {
            price: Some(Bracket::new(30_000, 10_000)),
            ..Default::default()
        };
        assert!(filter_and_sort(&stock, &criteria).is_empty());
    }

    #[test]
    fn equal_keys_keep_collection_order() {
        let stock = vec![
            vehicle("first", "Audi", 2019, 10_000, None),
            vehicle("second", "BMW", 2019, 10_000, None),
            vehicle("third", "Seat", 2019, 10_000, None),
        ];
        for sort in SortKey::ALL {
            let criteria = FilterCriteria { sort, ..Default::default() };
            assert_eq!(
                slugs(&filter_and_sort(&stock, &criteria)),
                vec!["first", "second", "third"],
                "{sort} must be stable"
            );
        }
    }

    #[test]
    fn year_sorts_numerically() {
        let stock = vec![
            vehicle("old", "Audi", 2009, 1, None),
            vehicle("new", "Audi", 2021, 1, None),
            vehicle("mid", "Audi", 2015, 1, None),
        ];
        let desc = FilterCriteria { sort: SortKey::YearDesc, ..Default::default() };
        assert_eq!(slugs(&filter_and_sort(&stock, &desc)), vec!["new", "mid", "old"]);
        let asc = FilterCriteria { sort: SortKey::YearAsc, ..Default::default() };
        assert_eq!(slugs(&filter_and_sort(&stock, &asc)), vec!["old", "mid", "new"]);
    }

    #[test]
    fn sort_keys_round_trip_through_their_ids() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn bracket_ids_resolve_against_fixed_lists() {
        assert_eq!(find_bracket(&PRICE_BRACKETS, "10000-20000"), Some(Bracket::new(10_000, 20_000)));
        assert_eq!(find_bracket(&PRICE_BRACKETS, "50000-"), Some(Bracket::new(50_000, u32::MAX)));
        assert_eq!(find_bracket(&PRICE_BRACKETS, "12345-67890"), None);
        assert_eq!(find_bracket(&MILEAGE_BRACKETS, "200000-"), Some(MILEAGE_BRACKETS[4]));
    }

    #[test]
    fn matches_agrees_with_filter() {
        let stock = vec![
            vehicle("a", "Audi", 2020, 22_000, Some(80_000)),
            vehicle("b", "BMW", 2017, 14_100, Some(235_000)),
        ];
        let criteria = FilterCriteria {
            price: Some(PRICE_BRACKETS[2]),
            ..Default::default()
        };
        let expected: Vec<&str> = stock
            .iter()
            .filter(|v| criteria.matches(v))
            .map(|v| v.slug.as_str())
            .collect();
        assert_eq!(slugs(&filter_and_sort(&stock, &criteria)), expected);
    }
}
