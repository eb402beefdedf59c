use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::{Field, FormData};
use super::parse_int;

/// Canonical field name -> name the prediction service expects on the wire.
pub const WIRE_ALIASES: &[(&str, &str)] =
    &[("FirstFlrSF", "1stFlrSF"), ("SecondFlrSF", "2ndFlrSF")];

/// A validated form snapshot, typed the way the prediction service reads it.
///
/// Serializes with canonical field names; use [`PredictionRequest::to_wire`]
/// for the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "OverallQual")]
    pub overall_qual: Option<i64>,
    #[serde(rename = "GrLivArea")]
    pub gr_liv_area: Option<i64>,
    #[serde(rename = "FirstFlrSF")]
    pub first_flr_sf: Option<i64>,
    #[serde(rename = "FullBath")]
    pub full_bath: Option<i64>,
    #[serde(rename = "TotRmsAbvGrd")]
    pub tot_rms_abv_grd: Option<i64>,
    #[serde(rename = "YearBuilt")]
    pub year_built: Option<i64>,
    #[serde(rename = "LotArea")]
    pub lot_area: Option<i64>,
    #[serde(rename = "KitchenQual")]
    pub kitchen_qual: Option<String>,
    #[serde(rename = "Foundation")]
    pub foundation: Option<String>,
    #[serde(rename = "ExterQual")]
    pub exter_qual: Option<String>,
    #[serde(rename = "Neighborhood")]
    pub neighborhood: Option<String>,

    #[serde(rename = "YearRemodAdd")]
    pub year_remod_add: Option<i64>,
    #[serde(rename = "GarageYrBlt")]
    pub garage_yr_blt: Option<i64>,
    #[serde(rename = "GarageCars")]
    pub garage_cars: Option<i64>,
    #[serde(rename = "GarageArea")]
    pub garage_area: Option<i64>,
    #[serde(rename = "TotalBsmtSF")]
    pub total_bsmt_sf: Option<i64>,
    #[serde(rename = "MasVnrArea")]
    pub mas_vnr_area: Option<i64>,
    #[serde(rename = "Fireplaces")]
    pub fireplaces: Option<i64>,
    #[serde(rename = "LotFrontage")]
    pub lot_frontage: Option<i64>,
    #[serde(rename = "SecondFlrSF")]
    pub second_flr_sf: Option<i64>,
    #[serde(rename = "HalfBath")]
    pub half_bath: Option<i64>,
    #[serde(rename = "HeatingQC")]
    pub heating_qc: Option<String>,
    #[serde(rename = "Electrical")]
    pub electrical: Option<String>,
}

/// Integer fields: empty, unparsable and zero values all become null.
fn coerce_int(raw: &str) -> Option<i64> {
    parse_int(raw).filter(|n| *n != 0)
}

fn coerce_text(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

impl PredictionRequest {
    pub fn from_form(data: &FormData) -> Self {
        let int = |f: Field| coerce_int(data.get(f));
        let text = |f: Field| coerce_text(data.get(f));

        Self {
            overall_qual: int(Field::OverallQual),
            gr_liv_area: int(Field::GrLivArea),
            first_flr_sf: int(Field::FirstFlrSF),
            full_bath: int(Field::FullBath),
            tot_rms_abv_grd: int(Field::TotRmsAbvGrd),
            year_built: int(Field::YearBuilt),
            lot_area: int(Field::LotArea),
            kitchen_qual: text(Field::KitchenQual),
            foundation: text(Field::Foundation),
            exter_qual: text(Field::ExterQual),
            neighborhood: text(Field::Neighborhood),
            year_remod_add: int(Field::YearRemodAdd),
            garage_yr_blt: int(Field::GarageYrBlt),
            garage_cars: int(Field::GarageCars),
            garage_area: int(Field::GarageArea),
            total_bsmt_sf: int(Field::TotalBsmtSF),
            mas_vnr_area: int(Field::MasVnrArea),
            fireplaces: int(Field::Fireplaces),
            lot_frontage: int(Field::LotFrontage),
            second_flr_sf: int(Field::SecondFlrSF),
            half_bath: int(Field::HalfBath),
            heating_qc: text(Field::HeatingQC),
            electrical: text(Field::Electrical),
        }
    }

    /// The raw form value a field would need to reproduce this request.
    pub fn raw_value(&self, field: Field) -> String {
        let int = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        match field {
            Field::OverallQual => int(self.overall_qual),
            Field::GrLivArea => int(self.gr_liv_area),
            Field::FirstFlrSF => int(self.first_flr_sf),
            Field::FullBath => int(self.full_bath),
            Field::TotRmsAbvGrd => int(self.tot_rms_abv_grd),
            Field::YearBuilt => int(self.year_built),
            Field::LotArea => int(self.lot_area),
            Field::KitchenQual => text(&self.kitchen_qual),
            Field::Foundation => text(&self.foundation),
            Field::ExterQual => text(&self.exter_qual),
            Field::Neighborhood => text(&self.neighborhood),
            Field::YearRemodAdd => int(self.year_remod_add),
            Field::GarageYrBlt => int(self.garage_yr_blt),
            Field::GarageCars => int(self.garage_cars),
            Field::GarageArea => int(self.garage_area),
            Field::TotalBsmtSF => int(self.total_bsmt_sf),
            Field::MasVnrArea => int(self.mas_vnr_area),
            Field::Fireplaces => int(self.fireplaces),
            Field::LotFrontage => int(self.lot_frontage),
            Field::SecondFlrSF => int(self.second_flr_sf),
            Field::HalfBath => int(self.half_bath),
            Field::HeatingQC => text(&self.heating_qc),
            Field::Electrical => text(&self.electrical),
        }
    }

    /// Converts the request back into raw form values.
    pub fn to_form(&self) -> FormData {
        let mut data = FormData::empty();
        for field in Field::ALL {
            data.set(field, self.raw_value(field));
        }
        data
    }

    /// JSON body for the prediction service, with aliased field names.
    pub fn to_wire(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            for (canonical, wire) in WIRE_ALIASES {
                let v = map.remove(*canonical).unwrap_or(Value::Null);
                map.insert((*wire).to_string(), v);
            }
        }
        Ok(value)
    }
}
