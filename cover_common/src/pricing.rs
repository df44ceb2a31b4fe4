//! Premium calculation from the static price tables.
//!
//! price = base(body type) x coverage multiplier x duration multiplier,
//! rounded half-up to two decimal places. All arithmetic is exact decimal.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::QuoteError;
use crate::quote::Quote;
use crate::request::{QuoteRequest, RawQuoteRequest};
use crate::vehicle::{BodyType, CoverageType, PolicyDuration};

/// Fraction digits carried by every premium.
pub const PRICE_SCALE: u32 = 2;

/// Stateless premium calculator.
pub struct PricingEngine;

impl PricingEngine {
    /// Base annual premium for a body type.
    pub fn base_price(body_type: BodyType) -> Decimal {
        match body_type {
            BodyType::Saloon => dec!(5000),
            BodyType::Suv => dec!(7500),
            BodyType::PickUp => dec!(6500),
            BodyType::Truck => dec!(10000),
            BodyType::Bus => dec!(12000),
        }
    }

    /// Multiplier applied for the coverage tier.
    pub fn coverage_multiplier(coverage: CoverageType) -> Decimal {
        match coverage {
            CoverageType::Comprehensive => dec!(2.0),
            CoverageType::ThirdParty => dec!(0.6),
        }
    }

    /// Multiplier applied for the policy period.
    pub fn duration_multiplier(duration: PolicyDuration) -> Decimal {
        match duration {
            PolicyDuration::Year => dec!(1.0),
            PolicyDuration::Quarter => dec!(0.3),
        }
    }

    /// Price `request`. Total over the typed domain.
    pub fn calculate(request: QuoteRequest) -> Quote {
        let raw = Self::base_price(request.body_type)
            * Self::coverage_multiplier(request.coverage_type)
            * Self::duration_multiplier(request.duration);
        Quote::new(request, round_price(raw))
    }

    /// Price a string-typed form; unknown enum values are rejected.
    pub fn calculate_raw(raw: RawQuoteRequest) -> Result<Quote, QuoteError> {
        let request = QuoteRequest::try_from(raw)?;
        Ok(Self::calculate(request))
    }
}

/// Round half-up to [`PRICE_SCALE`] places and pin the scale so the value
/// always renders with exactly two fraction digits.
pub fn round_price(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn request(body: BodyType, coverage: CoverageType, duration: PolicyDuration) -> QuoteRequest {
        QuoteRequest {
            body_type: body,
            coverage_type: coverage,
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn full_price_table() {
        use BodyType::*;
        use CoverageType::*;
        use PolicyDuration::*;

        let expected = [
            (Saloon, Comprehensive, Year, dec!(10000.00)),
            (Saloon, Comprehensive, Quarter, dec!(3000.00)),
            (Saloon, ThirdParty, Year, dec!(3000.00)),
            (Saloon, ThirdParty, Quarter, dec!(900.00)),
            (Suv, Comprehensive, Year, dec!(15000.00)),
            (Suv, Comprehensive, Quarter, dec!(4500.00)),
            (Suv, ThirdParty, Year, dec!(4500.00)),
            (Suv, ThirdParty, Quarter, dec!(1350.00)),
            (PickUp, Comprehensive, Year, dec!(13000.00)),
            (PickUp, Comprehensive, Quarter, dec!(3900.00)),
            (PickUp, ThirdParty, Year, dec!(3900.00)),
            (PickUp, ThirdParty, Quarter, dec!(1170.00)),
            (Truck, Comprehensive, Year, dec!(20000.00)),
            (Truck, Comprehensive, Quarter, dec!(6000.00)),
            (Truck, ThirdParty, Year, dec!(6000.00)),
            (Truck, ThirdParty, Quarter, dec!(1800.00)),
            (Bus, Comprehensive, Year, dec!(24000.00)),
            (Bus, Comprehensive, Quarter, dec!(7200.00)),
            (Bus, ThirdParty, Year, dec!(7200.00)),
            (Bus, ThirdParty, Quarter, dec!(2160.00)),
        ];
        assert_eq!(expected.len(), 20);

        for (body, coverage, duration, price) in expected {
            let quote = PricingEngine::calculate(request(body, coverage, duration));
            assert_eq!(quote.price(), price, "{body} / {coverage} / {duration}");
            assert_eq!(quote.price().scale(), PRICE_SCALE);
        }
    }

    #[test]
    fn price_is_product_of_table_entries_for_every_combination() {
        for body in BodyType::iter() {
            for coverage in CoverageType::iter() {
                for duration in PolicyDuration::iter() {
                    let quote = PricingEngine::calculate(request(body, coverage, duration));
                    let product = PricingEngine::base_price(body)
                        * PricingEngine::coverage_multiplier(coverage)
                        * PricingEngine::duration_multiplier(duration);
                    assert_eq!(quote.price(), product);
                }
            }
        }
    }

    #[test]
    fn truck_third_party_quarter_renders_as_1800() {
        let quote = PricingEngine::calculate(request(
            BodyType::Truck,
            CoverageType::ThirdParty,
            PolicyDuration::Quarter,
        ));
        assert_eq!(quote.price().to_string(), "1800.00");
        assert_eq!(quote.display_price(), "K1800.00");
    }

    #[test]
    fn quote_carries_the_request_fields() {
        let req = QuoteRequest {
            car_make: "Volvo".into(),
            vehicle_registration: "ALB 77".into(),
            color: "White".into(),
            chassis_no: "YV1".into(),
            body_type: BodyType::Bus,
            ..Default::default()
        };
        let quote = PricingEngine::calculate(req.clone());
        assert_eq!(quote.request(), &req);
    }

    #[test]
    fn rounding_is_half_up_at_two_places() {
        assert_eq!(round_price(dec!(10.005)), dec!(10.01));
        assert_eq!(round_price(dec!(10.015)), dec!(10.02));
        assert_eq!(round_price(dec!(10.004)), dec!(10.00));
        assert_eq!(round_price(dec!(7)).to_string(), "7.00");
    }

    #[test]
    fn raw_input_with_unknown_coverage_is_rejected() {
        let raw = RawQuoteRequest {
            body_type: "saloon".into(),
            duration: "year".into(),
            coverage_type: "gold".into(),
            ..Default::default()
        };
        let err = PricingEngine::calculate_raw(raw).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidEnumValue { .. }));
    }

    #[test]
    fn raw_input_with_known_values_is_priced() {
        let raw = RawQuoteRequest {
            body_type: "pick-up".into(),
            duration: "quarter".into(),
            coverage_type: "comprehensive".into(),
            ..Default::default()
        };
        let quote = PricingEngine::calculate_raw(raw).unwrap();
        assert_eq!(quote.price(), dec!(3900.00));
    }
}
