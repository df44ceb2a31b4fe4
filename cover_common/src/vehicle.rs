//! Enumerated form inputs shared by the pricing engine, the flow, and the client.
//!
//! Every enum renders (`Display`) and parses (`FromStr`) using the exact wire
//! values the quote form submits, e.g. `pick-up` and `third party`. Human-facing
//! labels are available through `label()`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Vehicle body type; drives the base price.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BodyType {
    /// Saloon car.
    #[default]
    Saloon,
    /// Sport utility vehicle.
    Suv,
    /// Pick-up truck.
    PickUp,
    /// Truck.
    Truck,
    /// Bus.
    Bus,
}

impl BodyType {
    /// Label shown in the body type selector.
    pub fn label(&self) -> &'static str {
        match self {
            BodyType::Saloon => "Saloon",
            BodyType::Suv => "SUV",
            BodyType::PickUp => "Pick-Up",
            BodyType::Truck => "Truck",
            BodyType::Bus => "Bus",
        }
    }
}

/// Length of the policy period.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PolicyDuration {
    /// Twelve months.
    #[default]
    Year,
    /// Three months.
    Quarter,
}

impl PolicyDuration {
    /// Label shown in the duration selector.
    pub fn label(&self) -> &'static str {
        match self {
            PolicyDuration::Year => "Year",
            PolicyDuration::Quarter => "Quarter",
        }
    }
}

/// Insurance tier.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
pub enum CoverageType {
    /// Own damage plus third party liability.
    #[default]
    #[serde(rename = "comprehensive")]
    #[strum(serialize = "comprehensive")]
    #[value(name = "comprehensive")]
    Comprehensive,
    /// Third party liability only.
    #[serde(rename = "third party")]
    #[strum(serialize = "third party")]
    #[value(name = "third-party")]
    ThirdParty,
}

impl CoverageType {
    /// Label shown in the coverage selector.
    pub fn label(&self) -> &'static str {
        match self {
            CoverageType::Comprehensive => "Comprehensive",
            CoverageType::ThirdParty => "Third Party",
        }
    }
}

/// Names of the quote form fields, in form order.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Field {
    /// Free text, required.
    CarMake,
    /// Free text, required.
    VehicleRegistration,
    /// Free text, required.
    Color,
    /// Free text, required.
    ChassisNo,
    /// Enumerated, see [`BodyType`].
    BodyType,
    /// Enumerated, see [`PolicyDuration`].
    Duration,
    /// Enumerated, see [`CoverageType`].
    CoverageType,
}

impl Field {
    /// Text fields that must be non-empty at submit.
    pub const REQUIRED_TEXT: [Field; 4] = [
        Field::CarMake,
        Field::VehicleRegistration,
        Field::Color,
        Field::ChassisNo,
    ];

    /// Label shown next to the field in the form.
    pub fn label(&self) -> &'static str {
        match self {
            Field::CarMake => "Car Make",
            Field::VehicleRegistration => "Registration",
            Field::Color => "Color",
            Field::ChassisNo => "Chassis No",
            Field::BodyType => "Body Type",
            Field::Duration => "Duration",
            Field::CoverageType => "Coverage Type",
        }
    }

    /// `true` for the selector fields backed by an enum.
    pub fn is_enumerated(&self) -> bool {
        matches!(self, Field::BodyType | Field::Duration | Field::CoverageType)
    }

    /// Accepted values for a selector field; empty for free text fields.
    pub fn options(&self) -> Vec<String> {
        match self {
            Field::BodyType => BodyType::iter().map(|v| v.to_string()).collect(),
            Field::Duration => PolicyDuration::iter().map(|v| v.to_string()).collect(),
            Field::CoverageType => CoverageType::iter().map(|v| v.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}
