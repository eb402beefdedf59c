//! Rules relating two or more fields.
//!
//! Numeric inputs that are empty or unparsable count as 0 in the area and
//! count checks. The year and basement checks skip instead when a value is
//! missing.

use crate::form::parse_int;

/// Area per garage car, inclusive, in sq ft.
pub const GARAGE_SQFT_PER_CAR: (f64, f64) = (100.0, 500.0);

/// Allowed gap between the floor areas and the living area, as a share of the latter.
pub const FLOOR_AREA_TOLERANCE: f64 = 0.05;

pub const BASEMENT_TO_FIRST_FLOOR_MAX: f64 = 1.5;

pub const MODERN_CONSTRUCTION_YEAR: i64 = 1990;

fn int_or_zero(raw: &str) -> i64 {
    parse_int(raw).unwrap_or(0)
}

pub fn validate_year_remod_add(year_remod_add: &str, year_built: &str) -> Option<String> {
    if year_remod_add.is_empty() {
        return None;
    }
    let remod = parse_int(year_remod_add)?;
    let built = parse_int(year_built)?;

    (remod < built)
        .then(|| format!("Remodel year ({remod}) cannot be before year built ({built})"))
}

/// A garage may predate the house by at most one year.
pub fn validate_garage_yr_blt(garage_yr_blt: &str, year_built: &str) -> Option<String> {
    if garage_yr_blt.is_empty() {
        return None;
    }
    let garage = parse_int(garage_yr_blt)?;
    let built = parse_int(year_built)?;

    (garage < built.saturating_sub(1)).then(|| {
        format!("Garage year ({garage}) cannot be significantly before year built ({built})")
    })
}

pub fn validate_garage_consistency(
    garage_area: &str,
    garage_cars: &str,
    garage_yr_blt: &str,
) -> Option<String> {
    let area = int_or_zero(garage_area);
    let cars = int_or_zero(garage_cars);

    if area == 0 {
        if cars > 0 {
            return Some("Cannot have garage cars without garage area".to_string());
        }
        if !garage_yr_blt.is_empty() {
            return Some("Cannot have garage year without garage area".to_string());
        }
    }

    if area > 0 && cars == 0 {
        return Some(format!("Garage area is {area} sq ft but garage cars is 0"));
    }

    if area > 0 && cars > 0 {
        let per_car = area as f64 / cars as f64;
        let (min, max) = GARAGE_SQFT_PER_CAR;
        if per_car < min {
            return Some(format!(
                "Garage too small: {} sq ft per car (minimum 100 sq ft)",
                per_car.round() as i64
            ));
        }
        if per_car > max {
            return Some(format!(
                "Garage too large: {} sq ft per car (maximum 500 sq ft)",
                per_car.round() as i64
            ));
        }
    }

    None
}

/// Sums are taken in `i128` so any pair of parsed areas fits.
pub fn validate_floor_areas(
    first_flr_sf: &str,
    second_flr_sf: &str,
    gr_liv_area: &str,
) -> Option<String> {
    let first = int_or_zero(first_flr_sf);
    let second = int_or_zero(second_flr_sf);
    let living = int_or_zero(gr_liv_area);

    let total = i128::from(first) + i128::from(second);
    let tolerance = living as f64 * FLOOR_AREA_TOLERANCE;

    ((total - i128::from(living)).abs() as f64 > tolerance).then(|| {
        format!(
            "Floor areas don't match: 1st ({first}) + 2nd ({second}) = {total} \
             but living area is {living}"
        )
    })
}

pub fn validate_lot_size(lot_area: &str, gr_liv_area: &str) -> Option<String> {
    let lot = int_or_zero(lot_area);
    let living = int_or_zero(gr_liv_area);

    (lot <= living).then(|| {
        format!("Lot area ({lot} sq ft) must be larger than living area ({living} sq ft)")
    })
}

/// Bath units (full + half/2) must stay strictly below the room count.
///
/// The two checks overlap: the second also rejects equality, so the first
/// only decides which message is shown.
pub fn validate_bathrooms(
    full_bath: &str,
    half_bath: &str,
    tot_rms_abv_grd: &str,
) -> Option<String> {
    let full = int_or_zero(full_bath);
    let half = int_or_zero(half_bath);
    let rooms = int_or_zero(tot_rms_abv_grd);

    let units = full as f64 + half as f64 * 0.5;

    if units > rooms as f64 {
        return Some(format!(
            "Too many bathrooms: {full} full + {half} half = {units} units, \
             but only {rooms} total rooms"
        ));
    }
    if units >= rooms as f64 {
        return Some("House must have at least one non-bathroom room".to_string());
    }
    None
}

pub fn validate_basement(total_bsmt_sf: &str, first_flr_sf: &str) -> Option<String> {
    if total_bsmt_sf.is_empty() {
        return None;
    }
    let basement = parse_int(total_bsmt_sf)?;
    let first = parse_int(first_flr_sf)?;

    (basement as f64 > first as f64 * BASEMENT_TO_FIRST_FLOOR_MAX).then(|| {
        format!(
            "Basement ({basement} sq ft) unusually large compared to first floor ({first} sq ft)"
        )
    })
}

pub fn validate_quality_consistency(
    overall_qual: &str,
    kitchen_qual: &str,
    exter_qual: &str,
) -> Option<String> {
    let overall = parse_int(overall_qual)?;
    let poor = |q: &str| q == "Fa" || q == "Po";

    if overall >= 8 {
        if poor(kitchen_qual) {
            return Some(format!(
                "Overall quality is high ({overall}/10) \
                 but kitchen quality is poor ({kitchen_qual})"
            ));
        }
        if poor(exter_qual) {
            return Some(format!(
                "Overall quality is high ({overall}/10) \
                 but exterior quality is poor ({exter_qual})"
            ));
        }
    }

    if overall <= 3 {
        if kitchen_qual == "Ex" {
            return Some(format!(
                "Overall quality is low ({overall}/10) but kitchen quality is excellent"
            ));
        }
        if exter_qual == "Ex" {
            return Some(format!(
                "Overall quality is low ({overall}/10) but exterior quality is excellent"
            ));
        }
    }

    None
}

pub fn validate_recent_construction(year_built: &str, electrical: &str) -> Option<String> {
    let year = parse_int(year_built)?;

    (year >= MODERN_CONSTRUCTION_YEAR && matches!(electrical, "FuseP" | "FuseF")).then(|| {
        format!(
            "House built in {year} shouldn't have outdated fuse electrical system ({electrical}). \
             Modern homes typically have circuit breakers (SBrkr)"
        )
    })
}
