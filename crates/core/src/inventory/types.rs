//! Product classification types.
//!
//! These enums are informational only: they carry no business rules beyond
//! rejecting unknown values at the input boundary. Values mirror the shop's
//! historical catalogue.

use serde::{Deserialize, Serialize};

use super::error::InventoryError;

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Analog film camera body.
    #[serde(rename = "Film Camera")]
    FilmCamera,
    /// Digital camera body.
    #[serde(rename = "Digital Camera")]
    DigitalCamera,
    /// Camera accessory.
    #[serde(rename = "Accessory")]
    Accessory,
    /// Film stock.
    #[serde(rename = "Film")]
    Film,
}

impl Category {
    /// Returns the canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FilmCamera => "Film Camera",
            Self::DigitalCamera => "Digital Camera",
            Self::Accessory => "Accessory",
            Self::Film => "Film",
        }
    }

    /// Parses a category from its stored string form.
    pub fn parse(value: &str) -> Result<Self, InventoryError> {
        match value {
            "Film Camera" => Ok(Self::FilmCamera),
            "Digital Camera" => Ok(Self::DigitalCamera),
            "Accessory" => Ok(Self::Accessory),
            "Film" => Ok(Self::Film),
            other => Err(InventoryError::UnknownChoice {
                field: "category",
                value: other.to_string(),
            }),
        }
    }
}

/// Product sub-category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubCategory {
    /// Single-lens reflex body.
    #[serde(rename = "SLR")]
    Slr,
    /// Fixed-lens compact.
    #[serde(rename = "Point & Shoot")]
    PointAndShoot,
    /// Mirrorless body.
    #[serde(rename = "Mirrorless")]
    Mirrorless,
    /// Tripod.
    #[serde(rename = "Tripod")]
    Tripod,
    /// Lens.
    #[serde(rename = "Lens")]
    Lens,
    /// Roll of film.
    #[serde(rename = "Film Roll")]
    FilmRoll,
    /// Rangefinder body.
    #[serde(rename = "Rangefinder")]
    Rangefinder,
    /// Twin-lens reflex body.
    #[serde(rename = "TLR")]
    Tlr,
    /// Video camcorder.
    #[serde(rename = "Handycam")]
    Handycam,
}

impl SubCategory {
    /// Returns the canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slr => "SLR",
            Self::PointAndShoot => "Point & Shoot",
            Self::Mirrorless => "Mirrorless",
            Self::Tripod => "Tripod",
            Self::Lens => "Lens",
            Self::FilmRoll => "Film Roll",
            Self::Rangefinder => "Rangefinder",
            Self::Tlr => "TLR",
            Self::Handycam => "Handycam",
        }
    }

    /// Parses a sub-category from its stored string form.
    pub fn parse(value: &str) -> Result<Self, InventoryError> {
        match value {
            "SLR" => Ok(Self::Slr),
            "Point & Shoot" => Ok(Self::PointAndShoot),
            "Mirrorless" => Ok(Self::Mirrorless),
            "Tripod" => Ok(Self::Tripod),
            "Lens" => Ok(Self::Lens),
            "Film Roll" => Ok(Self::FilmRoll),
            "Rangefinder" => Ok(Self::Rangefinder),
            "TLR" => Ok(Self::Tlr),
            "Handycam" => Ok(Self::Handycam),
            other => Err(InventoryError::UnknownChoice {
                field: "sub_category",
                value: other.to_string(),
            }),
        }
    }
}

/// Cosmetic condition grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CosmeticCondition {
    /// Near mint.
    Excellent,
    /// Light signs of use.
    VeryGood,
    /// Normal wear.
    Good,
    /// Visible wear.
    Average,
    /// Heavy wear.
    BelowAverage,
}

impl CosmeticCondition {
    /// Returns the canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Average => "average",
            Self::BelowAverage => "below_average",
        }
    }

    /// Parses a cosmetic condition from its stored string form.
    pub fn parse(value: &str) -> Result<Self, InventoryError> {
        match value {
            "excellent" => Ok(Self::Excellent),
            "very_good" => Ok(Self::VeryGood),
            "good" => Ok(Self::Good),
            "average" => Ok(Self::Average),
            "below_average" => Ok(Self::BelowAverage),
            other => Err(InventoryError::UnknownChoice {
                field: "cosmetic_condition",
                value: other.to_string(),
            }),
        }
    }
}

/// Functional condition grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingCondition {
    /// All functions operational.
    FullyWorking,
    /// Some functions operational.
    PartiallyWorking,
    /// Requires servicing before sale.
    NeedsService,
    /// Sold for parts.
    NonWorking,
}

impl WorkingCondition {
    /// Returns the canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullyWorking => "fully_working",
            Self::PartiallyWorking => "partially_working",
            Self::NeedsService => "needs_service",
            Self::NonWorking => "non_working",
        }
    }

    /// Parses a working condition from its stored string form.
    pub fn parse(value: &str) -> Result<Self, InventoryError> {
        match value {
            "fully_working" => Ok(Self::FullyWorking),
            "partially_working" => Ok(Self::PartiallyWorking),
            "needs_service" => Ok(Self::NeedsService),
            "non_working" => Ok(Self::NonWorking),
            other => Err(InventoryError::UnknownChoice {
                field: "working_condition",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for value in ["Film Camera", "Digital Camera", "Accessory", "Film"] {
            assert_eq!(Category::parse(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn test_unknown_category_carries_field_and_value() {
        let err = Category::parse("Drone").unwrap_err();
        match err {
            InventoryError::UnknownChoice { field, value } => {
                assert_eq!(field, "category");
                assert_eq!(value, "Drone");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_condition_round_trips() {
        for value in ["excellent", "very_good", "good", "average", "below_average"] {
            assert_eq!(CosmeticCondition::parse(value).unwrap().as_str(), value);
        }
        for value in [
            "fully_working",
            "partially_working",
            "needs_service",
            "non_working",
        ] {
            assert_eq!(WorkingCondition::parse(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn test_serde_uses_stored_strings() {
        let json = serde_json::to_string(&Category::FilmCamera).unwrap();
        assert_eq!(json, "\"Film Camera\"");
        let json = serde_json::to_string(&WorkingCondition::NeedsService).unwrap();
        assert_eq!(json, "\"needs_service\"");
    }
}
