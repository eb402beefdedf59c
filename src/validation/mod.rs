use std::collections::BTreeMap;

use crate::form::models::{Field, FormData};

pub mod cross;
pub mod field;

/// At most one message per field. A missing key means the field is valid.
pub type ValidationErrors = BTreeMap<Field, String>;

/// Runs every applicable rule against a form snapshot.
///
/// Rules run in a fixed order and each writes to one or two keys. When two
/// rules target the same key the later one wins, so a lot-size error replaces
/// a lot-area range error and a quality mismatch replaces an overall quality
/// range error.
pub fn validate_all_fields(data: &FormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let v = |f: Field| data.get(f);
    let set = |f: Field| data.is_set(f);

    let put = |errors: &mut ValidationErrors, keys: &[Field], msg: Option<String>| {
        if let Some(msg) = msg {
            for key in keys {
                errors.insert(*key, msg.clone());
            }
        }
    };

    if set(Field::OverallQual) {
        put(
            &mut errors,
            &[Field::OverallQual],
            field::validate_overall_qual(v(Field::OverallQual)),
        );
    }
    if set(Field::YearBuilt) {
        put(
            &mut errors,
            &[Field::YearBuilt],
            field::validate_year(v(Field::YearBuilt), "Year built"),
        );
    }
    if set(Field::GrLivArea) {
        put(
            &mut errors,
            &[Field::GrLivArea],
            field::validate_positive_number(v(Field::GrLivArea), "Living area"),
        );
    }
    if set(Field::FirstFlrSF) {
        put(
            &mut errors,
            &[Field::FirstFlrSF],
            field::validate_positive_number(v(Field::FirstFlrSF), "First floor area"),
        );
    }
    if set(Field::LotArea) {
        put(
            &mut errors,
            &[Field::LotArea],
            field::validate_positive_number(v(Field::LotArea), "Lot area"),
        );
    }

    put(&mut errors, &[Field::Neighborhood], field::validate_neighborhood(v(Field::Neighborhood)));

    if set(Field::YearRemodAdd) && set(Field::YearBuilt) {
        put(
            &mut errors,
            &[Field::YearRemodAdd],
            cross::validate_year_remod_add(v(Field::YearRemodAdd), v(Field::YearBuilt)),
        );
    }
    if set(Field::GarageYrBlt) && set(Field::YearBuilt) {
        put(
            &mut errors,
            &[Field::GarageYrBlt],
            cross::validate_garage_yr_blt(v(Field::GarageYrBlt), v(Field::YearBuilt)),
        );
    }

    put(
        &mut errors,
        &[Field::GarageArea, Field::GarageCars],
        cross::validate_garage_consistency(
            v(Field::GarageArea),
            v(Field::GarageCars),
            v(Field::GarageYrBlt),
        ),
    );

    if set(Field::FirstFlrSF) && set(Field::GrLivArea) {
        put(
            &mut errors,
            &[Field::SecondFlrSF],
            cross::validate_floor_areas(
                v(Field::FirstFlrSF),
                v(Field::SecondFlrSF),
                v(Field::GrLivArea),
            ),
        );
    }
    if set(Field::LotArea) && set(Field::GrLivArea) {
        put(
            &mut errors,
            &[Field::LotArea],
            cross::validate_lot_size(v(Field::LotArea), v(Field::GrLivArea)),
        );
    }
    if set(Field::FullBath) && set(Field::TotRmsAbvGrd) {
        put(
            &mut errors,
            &[Field::FullBath],
            cross::validate_bathrooms(
                v(Field::FullBath),
                v(Field::HalfBath),
                v(Field::TotRmsAbvGrd),
            ),
        );
    }
    if set(Field::TotalBsmtSF) && set(Field::FirstFlrSF) {
        put(
            &mut errors,
            &[Field::TotalBsmtSF],
            cross::validate_basement(v(Field::TotalBsmtSF), v(Field::FirstFlrSF)),
        );
    }
    if set(Field::OverallQual) && set(Field::KitchenQual) && set(Field::ExterQual) {
        put(
            &mut errors,
            &[Field::OverallQual],
            cross::validate_quality_consistency(
                v(Field::OverallQual),
                v(Field::KitchenQual),
                v(Field::ExterQual),
            ),
        );
    }
    if set(Field::YearBuilt) && set(Field::Electrical) {
        put(
            &mut errors,
            &[Field::Electrical],
            cross::validate_recent_construction(v(Field::YearBuilt), v(Field::Electrical)),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormData {
        let mut data = FormData::default();
        data.set(Field::GrLivArea, "1500");
        data.set(Field::FirstFlrSF, "1000");
        data.set(Field::SecondFlrSF, "500");
        data.set(Field::LotArea, "8000");
        data
    }

    #[test]
    fn default_form_has_no_errors() {
        assert!(validate_all_fields(&FormData::default()).is_empty());
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate_all_fields(&valid_form()).is_empty());
    }

    #[test]
    fn empty_mandatory_numbers_are_not_errors() {
        let mut data = valid_form();
        data.set(Field::GrLivArea, "");
        data.set(Field::YearBuilt, "");
        let errors = validate_all_fields(&data);
        assert!(!errors.contains_key(&Field::GrLivArea));
        assert!(!errors.contains_key(&Field::YearBuilt));
    }

    #[test]
    fn neighborhood_is_always_checked() {
        let mut data = valid_form();
        data.set(Field::Neighborhood, "");
        let errors = validate_all_fields(&data);
        assert_eq!(
            errors.get(&Field::Neighborhood).map(String::as_str),
            Some("Please select a neighborhood")
        );
    }

    #[test]
    fn garage_error_is_reported_on_both_keys() {
        let mut data = valid_form();
        data.set(Field::GarageArea, "1200");
        data.set(Field::GarageCars, "2");
        let errors = validate_all_fields(&data);
        assert_eq!(errors.get(&Field::GarageArea), errors.get(&Field::GarageCars));
        assert!(errors[&Field::GarageArea].starts_with("Garage too large: 600"));
    }

    #[test]
    fn later_rule_overwrites_earlier_on_same_key() {
        let mut data = valid_form();
        data.set(Field::LotArea, "-5");
        let errors = validate_all_fields(&data);
        assert_eq!(
            errors[&Field::LotArea],
            "Lot area (-5 sq ft) must be larger than living area (1500 sq ft)"
        );

        let mut data = valid_form();
        data.set(Field::OverallQual, "12");
        data.set(Field::KitchenQual, "Po");
        let errors = validate_all_fields(&data);
        assert_eq!(
            errors[&Field::OverallQual],
            "Overall quality is high (12/10) but kitchen quality is poor (Po)"
        );
    }

    #[test]
    fn cross_field_errors_land_on_their_keys() {
        let mut data = valid_form();
        data.set(Field::SecondFlrSF, "0");
        data.set(Field::GrLivArea, "1200");
        data.set(Field::TotalBsmtSF, "2000");
        data.set(Field::YearRemodAdd, "1990");
        data.set(Field::GarageYrBlt, "1990");
        data.set(Field::Electrical, "FuseP");
        data.set(Field::FullBath, "6");

        let errors = validate_all_fields(&data);
        for key in [
            Field::SecondFlrSF,
            Field::TotalBsmtSF,
            Field::YearRemodAdd,
            Field::Electrical,
            Field::FullBath,
            Field::GarageArea,
            Field::GarageCars,
        ] {
            assert!(errors.contains_key(&key), "expected error on {key}");
        }
        assert!(errors[&Field::GarageYrBlt].starts_with("Garage year (1990)"));
        assert!(errors[&Field::GarageArea].starts_with("Cannot have garage year"));
    }

    #[test]
    fn range_fields_reject_garbage() {
        for (field, raw) in [
            (Field::OverallQual, "x"),
            (Field::YearBuilt, "1700"),
            (Field::GrLivArea, "zero"),
            (Field::FirstFlrSF, "0"),
        ] {
            let mut data = valid_form();
            data.set(field, raw);
            assert!(validate_all_fields(&data).contains_key(&field), "{field}={raw}");
        }
    }

    #[test]
    fn huge_floor_areas_report_a_mismatch() {
        let mut data = valid_form();
        data.set(Field::FirstFlrSF, "9223372036854775807");
        data.set(Field::SecondFlrSF, "1");
        let errors = validate_all_fields(&data);
        assert!(errors[&Field::SecondFlrSF].starts_with("Floor areas don't match"));
    }
}
