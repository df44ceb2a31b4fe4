//! The in-progress quote form.
//!
//! `QuoteRequest` is the typed form the flow edits field by field. Values that
//! arrive as plain strings (a posted form, a terminal command) go through
//! [`RawQuoteRequest`] or [`QuoteRequest::set_field`], which reject anything
//! outside the enumerated domains instead of falling back to a default.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::vehicle::{BodyType, CoverageType, Field, PolicyDuration};

/// Vehicle details entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Manufacturer, free text.
    pub car_make: String,
    /// Registration plate, free text.
    pub vehicle_registration: String,
    /// Paint color, free text.
    pub color: String,
    /// Chassis number, free text.
    pub chassis_no: String,
    /// Body type; defaults to saloon.
    pub body_type: BodyType,
    /// Policy period; defaults to a year.
    pub duration: PolicyDuration,
    /// Coverage tier; defaults to comprehensive.
    pub coverage_type: CoverageType,
}

impl QuoteRequest {
    /// Assign `value` to the field identified by `field`.
    ///
    /// Text fields take the value verbatim. Enumerated fields parse it using
    /// the wire names; an unknown value leaves the request untouched.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), QuoteError> {
        match field {
            Field::CarMake => self.car_make = value.to_string(),
            Field::VehicleRegistration => self.vehicle_registration = value.to_string(),
            Field::Color => self.color = value.to_string(),
            Field::ChassisNo => self.chassis_no = value.to_string(),
            Field::BodyType => self.body_type = parse_enum(field, value)?,
            Field::Duration => self.duration = parse_enum(field, value)?,
            Field::CoverageType => self.coverage_type = parse_enum(field, value)?,
        }
        Ok(())
    }

    /// Current value of `field` rendered as its wire string.
    pub fn field_value(&self, field: Field) -> String {
        match field {
            Field::CarMake => self.car_make.clone(),
            Field::VehicleRegistration => self.vehicle_registration.clone(),
            Field::Color => self.color.clone(),
            Field::ChassisNo => self.chassis_no.clone(),
            Field::BodyType => self.body_type.to_string(),
            Field::Duration => self.duration.to_string(),
            Field::CoverageType => self.coverage_type.to_string(),
        }
    }

    /// Required text fields that are empty or whitespace only.
    pub fn missing_fields(&self) -> BTreeSet<Field> {
        Field::REQUIRED_TEXT
            .into_iter()
            .filter(|field| self.field_value(*field).trim().is_empty())
            .collect()
    }

    /// Check that every required text field is filled in.
    pub fn validate(&self) -> Result<(), QuoteError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(QuoteError::Validation(missing))
        }
    }
}

fn parse_enum<T: std::str::FromStr>(field: Field, value: &str) -> Result<T, QuoteError> {
    value.parse().map_err(|_| QuoteError::InvalidEnumValue {
        field,
        value: value.to_string(),
    })
}

/// String-typed form as it would be posted by a browser form.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawQuoteRequest {
    pub car_make: String,
    pub vehicle_registration: String,
    pub color: String,
    pub chassis_no: String,
    pub body_type: String,
    pub duration: String,
    pub coverage_type: String,
}

impl TryFrom<RawQuoteRequest> for QuoteRequest {
    type Error = QuoteError;

    fn try_from(raw: RawQuoteRequest) -> Result<Self, Self::Error> {
        Ok(QuoteRequest {
            body_type: parse_enum(Field::BodyType, &raw.body_type)?,
            duration: parse_enum(Field::Duration, &raw.duration)?,
            coverage_type: parse_enum(Field::CoverageType, &raw.coverage_type)?,
            car_make: raw.car_make,
            vehicle_registration: raw.vehicle_registration,
            color: raw.color,
            chassis_no: raw.chassis_no,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> QuoteRequest {
        QuoteRequest {
            car_make: "Toyota".into(),
            vehicle_registration: "ABC 1234".into(),
            color: "Silver".into(),
            chassis_no: "JT123456789".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_request_is_blank_saloon_year_comprehensive() {
        let req = QuoteRequest::default();
        assert!(req.car_make.is_empty());
        assert!(req.chassis_no.is_empty());
        assert_eq!(req.body_type, BodyType::Saloon);
        assert_eq!(req.duration, PolicyDuration::Year);
        assert_eq!(req.coverage_type, CoverageType::Comprehensive);
    }

    #[test]
    fn set_field_parses_enumerated_values() {
        let mut req = QuoteRequest::default();
        req.set_field(Field::BodyType, "pick-up").unwrap();
        req.set_field(Field::CoverageType, "third party").unwrap();
        req.set_field(Field::Duration, "quarter").unwrap();
        req.set_field(Field::Color, "Red").unwrap();
        assert_eq!(req.body_type, BodyType::PickUp);
        assert_eq!(req.coverage_type, CoverageType::ThirdParty);
        assert_eq!(req.duration, PolicyDuration::Quarter);
        assert_eq!(req.color, "Red");
    }

    #[test]
    fn set_field_rejects_unknown_enum_value_without_defaulting() {
        let mut req = QuoteRequest::default();
        req.set_field(Field::BodyType, "bus").unwrap();
        let err = req.set_field(Field::BodyType, "tractor").unwrap_err();
        assert!(matches!(
            err,
            QuoteError::InvalidEnumValue { field: Field::BodyType, ref value } if value == "tractor"
        ));
        assert_eq!(req.body_type, BodyType::Bus);
    }

    #[test]
    fn validate_reports_every_blank_required_field() {
        let mut req = filled();
        assert!(req.validate().is_ok());

        req.color = "   ".into();
        req.chassis_no.clear();
        let err = req.validate().unwrap_err();
        let fields: Vec<Field> = err.invalid_fields().unwrap().iter().copied().collect();
        assert_eq!(fields, vec![Field::Color, Field::ChassisNo]);
    }

    #[test]
    fn raw_request_converts_or_names_the_bad_field() {
        let raw = RawQuoteRequest {
            car_make: "Isuzu".into(),
            body_type: "truck".into(),
            duration: "year".into(),
            coverage_type: "platinum".into(),
            ..Default::default()
        };
        let err = QuoteRequest::try_from(raw.clone()).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::InvalidEnumValue { field: Field::CoverageType, .. }
        ));

        let ok = RawQuoteRequest {
            coverage_type: "comprehensive".into(),
            ..raw
        };
        let req = QuoteRequest::try_from(ok).unwrap();
        assert_eq!(req.body_type, BodyType::Truck);
        assert_eq!(req.car_make, "Isuzu");
    }

    #[test]
    fn request_deserializes_from_form_json() {
        let json = r#"{
            "carMake": "Nissan",
            "vehicleRegistration": "BAD 9",
            "color": "Blue",
            "chassisNo": "X1",
            "bodyType": "suv",
            "duration": "quarter",
            "coverageType": "third party"
        }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.body_type, BodyType::Suv);
        assert_eq!(req.coverage_type, CoverageType::ThirdParty);
        assert_eq!(req.vehicle_registration, "BAD 9");
    }
}
