use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every input on the property form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    OverallQual,
    GrLivArea,
    FirstFlrSF,
    FullBath,
    TotRmsAbvGrd,
    YearBuilt,
    LotArea,
    KitchenQual,
    Foundation,
    ExterQual,
    Neighborhood,
    YearRemodAdd,
    GarageYrBlt,
    GarageCars,
    GarageArea,
    TotalBsmtSF,
    MasVnrArea,
    Fireplaces,
    LotFrontage,
    SecondFlrSF,
    HalfBath,
    HeatingQC,
    Electrical,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::OverallQual,
        Field::GrLivArea,
        Field::FirstFlrSF,
        Field::FullBath,
        Field::TotRmsAbvGrd,
        Field::YearBuilt,
        Field::LotArea,
        Field::KitchenQual,
        Field::Foundation,
        Field::ExterQual,
        Field::Neighborhood,
        Field::YearRemodAdd,
        Field::GarageYrBlt,
        Field::GarageCars,
        Field::GarageArea,
        Field::TotalBsmtSF,
        Field::MasVnrArea,
        Field::Fireplaces,
        Field::LotFrontage,
        Field::SecondFlrSF,
        Field::HalfBath,
        Field::HeatingQC,
        Field::Electrical,
    ];

    /// Fields that must be filled before a prediction can be requested.
    pub const MANDATORY: [Field; 11] = [
        Field::OverallQual,
        Field::GrLivArea,
        Field::FirstFlrSF,
        Field::FullBath,
        Field::TotRmsAbvGrd,
        Field::YearBuilt,
        Field::LotArea,
        Field::KitchenQual,
        Field::Foundation,
        Field::ExterQual,
        Field::Neighborhood,
    ];

    /// Fields sent to the prediction service as integers (or null).
    pub const INTEGER: [Field; 17] = [
        Field::OverallQual,
        Field::GrLivArea,
        Field::FirstFlrSF,
        Field::FullBath,
        Field::TotRmsAbvGrd,
        Field::YearBuilt,
        Field::LotArea,
        Field::YearRemodAdd,
        Field::GarageYrBlt,
        Field::GarageCars,
        Field::GarageArea,
        Field::TotalBsmtSF,
        Field::MasVnrArea,
        Field::Fireplaces,
        Field::LotFrontage,
        Field::SecondFlrSF,
        Field::HalfBath,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::OverallQual => "OverallQual",
            Field::GrLivArea => "GrLivArea",
            Field::FirstFlrSF => "FirstFlrSF",
            Field::FullBath => "FullBath",
            Field::TotRmsAbvGrd => "TotRmsAbvGrd",
            Field::YearBuilt => "YearBuilt",
            Field::LotArea => "LotArea",
            Field::KitchenQual => "KitchenQual",
            Field::Foundation => "Foundation",
            Field::ExterQual => "ExterQual",
            Field::Neighborhood => "Neighborhood",
            Field::YearRemodAdd => "YearRemodAdd",
            Field::GarageYrBlt => "GarageYrBlt",
            Field::GarageCars => "GarageCars",
            Field::GarageArea => "GarageArea",
            Field::TotalBsmtSF => "TotalBsmtSF",
            Field::MasVnrArea => "MasVnrArea",
            Field::Fireplaces => "Fireplaces",
            Field::LotFrontage => "LotFrontage",
            Field::SecondFlrSF => "SecondFlrSF",
            Field::HalfBath => "HalfBath",
            Field::HeatingQC => "HeatingQC",
            Field::Electrical => "Electrical",
        }
    }

    /// Human label used by the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            Field::OverallQual => "Overall Quality (1-10)",
            Field::GrLivArea => "Living Area (sq ft)",
            Field::FirstFlrSF => "First Floor Area (sq ft)",
            Field::FullBath => "Full Bathrooms",
            Field::TotRmsAbvGrd => "Total Rooms Above Grade",
            Field::YearBuilt => "Year Built",
            Field::LotArea => "Lot Area (sq ft)",
            Field::KitchenQual => "Kitchen Quality",
            Field::Foundation => "Foundation",
            Field::ExterQual => "Exterior Quality",
            Field::Neighborhood => "Neighborhood",
            Field::YearRemodAdd => "Remodel Year",
            Field::GarageYrBlt => "Garage Year Built",
            Field::GarageCars => "Garage Capacity (cars)",
            Field::GarageArea => "Garage Area (sq ft)",
            Field::TotalBsmtSF => "Basement Area (sq ft)",
            Field::MasVnrArea => "Masonry Veneer Area (sq ft)",
            Field::Fireplaces => "Fireplaces",
            Field::LotFrontage => "Lot Frontage (ft)",
            Field::SecondFlrSF => "Second Floor Area (sq ft)",
            Field::HalfBath => "Half Bathrooms",
            Field::HeatingQC => "Heating Quality",
            Field::Electrical => "Electrical System",
        }
    }

    pub fn is_mandatory(&self) -> bool {
        Self::MANDATORY.contains(self)
    }

    /// Accepted codes for select-style fields, `None` for free numeric input.
    pub fn choices(&self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            Field::KitchenQual | Field::ExterQual | Field::HeatingQC => Some(QUALITY_GRADES),
            Field::Foundation => Some(FOUNDATIONS),
            Field::Electrical => Some(ELECTRICAL_SYSTEMS),
            Field::Neighborhood => Some(NEIGHBORHOODS),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field: {0}")]
pub struct FieldParseError(pub String);

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FieldParseError(s.to_string()))
    }
}

/// Neighborhood codes with their display names.
pub const NEIGHBORHOODS: &[(&str, &str)] = &[
    ("Blmngtn", "Bloomington Heights"),
    ("Blueste", "Bluestem"),
    ("BrDale", "Briardale"),
    ("BrkSide", "Brookside"),
    ("ClearCr", "Clear Creek"),
    ("CollgCr", "College Creek"),
    ("Crawfor", "Crawford"),
    ("Edwards", "Edwards"),
    ("Gilbert", "Gilbert"),
    ("IDOTRR", "Iowa DOT and Rail Road"),
    ("MeadowV", "Meadow Village"),
    ("Mitchel", "Mitchell"),
    ("NAmes", "North Ames"),
    ("NoRidge", "Northridge"),
    ("NPkVill", "Northpark Villa"),
    ("NridgHt", "Northridge Heights"),
    ("NWAmes", "Northwest Ames"),
    ("OldTown", "Old Town"),
    ("SWISU", "South & West of Iowa State University"),
    ("Sawyer", "Sawyer"),
    ("SawyerW", "Sawyer West"),
    ("Somerst", "Somerset"),
    ("StoneBr", "Stone Brook"),
    ("Timber", "Timberland"),
    ("Veenker", "Veenker"),
];

pub const QUALITY_GRADES: &[(&str, &str)] = &[
    ("Ex", "Excellent"),
    ("Gd", "Good"),
    ("TA", "Typical/Average"),
    ("Fa", "Fair"),
    ("Po", "Poor"),
];

pub const FOUNDATIONS: &[(&str, &str)] = &[
    ("PConc", "Poured Concrete"),
    ("CBlock", "Cinder Block"),
    ("BrkTil", "Brick & Tile"),
    ("Slab", "Slab"),
    ("Stone", "Stone"),
    ("Wood", "Wood"),
];

pub const ELECTRICAL_SYSTEMS: &[(&str, &str)] = &[
    ("SBrkr", "Standard Circuit Breakers"),
    ("FuseA", "Fuse Box (60 AMP)"),
    ("FuseF", "Fuse Box (60 AMP+)"),
    ("FuseP", "Fuse Box (Poor)"),
    ("Mix", "Mixed"),
];

/// Raw form values keyed by field. An empty string means "unset".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<Field, String>,
}

impl FormData {
    /// A form with every field unset.
    pub fn empty() -> Self {
        Self {
            values: Field::ALL.iter().map(|f| (*f, String::new())).collect(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_set(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl Default for FormData {
    /// The values the form starts with when first shown.
    fn default() -> Self {
        let mut data = Self::empty();
        data.set(Field::OverallQual, "7");
        data.set(Field::FullBath, "2");
        data.set(Field::TotRmsAbvGrd, "6");
        data.set(Field::YearBuilt, "2000");
        data.set(Field::KitchenQual, "TA");
        data.set(Field::Foundation, "PConc");
        data.set(Field::ExterQual, "TA");
        data.set(Field::Neighborhood, "NAmes");
        data.set(Field::Fireplaces, "0");
        data.set(Field::HalfBath, "0");
        data
    }
}

/// Fields the user has focused or edited.
pub type Touched = BTreeSet<Field>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
        assert!("1stFlrSF".parse::<Field>().is_err());
    }

    #[test]
    fn mandatory_and_optional_partition() {
        let optional = Field::ALL.iter().filter(|f| !f.is_mandatory()).count();
        assert_eq!(Field::MANDATORY.len(), 11);
        assert_eq!(optional, 12);
    }

    #[test]
    fn default_form_has_expected_values() {
        let data = FormData::default();
        assert_eq!(data.get(Field::OverallQual), "7");
        assert_eq!(data.get(Field::Neighborhood), "NAmes");
        assert_eq!(data.get(Field::HalfBath), "0");
        assert!(!data.is_set(Field::GrLivArea));
        assert!(!data.is_set(Field::Electrical));
        assert_eq!(data.iter().count(), 23);
    }

    #[test]
    fn neighborhood_list_has_25_entries() {
        assert_eq!(NEIGHBORHOODS.len(), 25);
        assert_eq!(Field::Neighborhood.choices().map(<[_]>::len), Some(25));
        assert!(Field::GrLivArea.choices().is_none());
    }
}
