//! Field extraction through ordered alias lists
//!
//! Providers name the same column differently across datasets. Each logical
//! field has an ordered list of known keys; the first key present in a record
//! with a non-null value wins, and a record with none of them has no value
//! for that field.

use crate::parse::{parse_date, parse_number, parse_text};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// One raw record as delivered by the provider
pub type RawPriceRecord = Map<String, Value>;

/// Logical fields of a price record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Commodity,
    Variety,
    Unit,
    ModalPrice,
    MinPrice,
    MaxPrice,
    ArrivalDate,
    State,
    District,
    Market,
}

impl Field {
    /// Known keys for this field, in probing order
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Commodity => &["commodity", "Commodity", "commodity_name", "crop", "name"],
            Self::Variety => &["variety", "Variety", "variety_name", "grade", "Grade"],
            Self::Unit => &["unit", "Unit", "unit_of_price", "price_unit", "units"],
            Self::ModalPrice => &[
                "modal_price",
                "modal_price_per_quintal",
                "modal_price_per_kg",
                "modal_price_per_unit",
                "modal_price_in_rupees",
                "modal",
                "Modal_Price",
                "Modal_x0020_Price",
            ],
            Self::MinPrice => &[
                "min_price",
                "min_price_per_quintal",
                "min_price_per_kg",
                "min_price_per_unit",
                "min_price_in_rupees",
                "min",
                "Min_Price",
                "Min_x0020_Price",
            ],
            Self::MaxPrice => &[
                "max_price",
                "max_price_per_quintal",
                "max_price_per_kg",
                "max_price_per_unit",
                "max_price_in_rupees",
                "max",
                "Max_Price",
                "Max_x0020_Price",
            ],
            Self::ArrivalDate => &["arrival_date", "Arrival_Date", "date", "price_date"],
            Self::State => &["state", "State", "state_name"],
            Self::District => &["district", "District", "district_name"],
            Self::Market => &["market", "Market", "market_name", "mandi"],
        }
    }

    /// Raw value of the first alias present in `record`
    pub fn probe(self, record: &RawPriceRecord) -> Option<&Value> {
        self.aliases()
            .iter()
            .find_map(|key| record.get(*key).filter(|v| !v.is_null()))
    }

    /// Field as text
    pub fn text(self, record: &RawPriceRecord) -> Option<String> {
        self.probe(record).and_then(parse_text)
    }

    /// Field as a number
    pub fn number(self, record: &RawPriceRecord) -> Option<f64> {
        self.probe(record).and_then(parse_number)
    }

    /// Field as a date
    pub fn date(self, record: &RawPriceRecord) -> Option<NaiveDate> {
        self.probe(record).and_then(parse_date)
    }
}
