//! Terminal rendering of flow snapshots.
//!
//! Text mode prints a small card per stage; JSON mode prints the serialized
//! `ViewSnapshot` as one line, for piping into another front end.
use std::io::Write;

use cover_common::Result;
use cover_common::ViewSnapshot;
use cover_common::quote::format_price;
use cover_common::vehicle::Field;
use cover_common::view::countdown_message;

const REQUIRED_MARK: &str = "<- required";

/// Writes snapshots in the configured format.
pub struct Renderer {
    json: bool,
}

impl Renderer {
    /// JSON lines when `json` is set, text otherwise.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Render the full view for `snapshot`.
    pub fn render<W: Write>(&self, out: &mut W, snapshot: &ViewSnapshot) -> Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, snapshot)?;
            writeln!(out)?;
        } else {
            write_text(out, snapshot)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Render a countdown update. Text mode prints only the countdown line.
    pub fn render_tick<W: Write>(&self, out: &mut W, snapshot: &ViewSnapshot) -> Result<()> {
        match snapshot {
            ViewSnapshot::PurchaseConfirmed { countdown, .. } if !self.json => {
                writeln!(out, "{}", countdown_message(*countdown))?;
                out.flush()?;
                Ok(())
            }
            _ => self.render(out, snapshot),
        }
    }

    /// Report a rejected command.
    pub fn render_error<W: Write>(&self, out: &mut W, message: &str) -> Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "error": message }))?;
            writeln!(out)?;
        } else {
            writeln!(out, "! {}", message)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn write_text<W: Write>(out: &mut W, snapshot: &ViewSnapshot) -> Result<()> {
    match snapshot {
        ViewSnapshot::Landing { brand, motto } => {
            writeln!(out)?;
            writeln!(out, "==== {} ====", brand)?;
            writeln!(out, "\"{}\"", motto)?;
            writeln!(out, "Type `start` to get your quote now.")?;
        }
        ViewSnapshot::FormEntry {
            request,
            invalid_fields,
        } => {
            writeln!(out)?;
            writeln!(out, "Vehicle Insurance Quote")?;
            for field in [
                Field::CarMake,
                Field::VehicleRegistration,
                Field::Color,
                Field::ChassisNo,
                Field::BodyType,
                Field::Duration,
                Field::CoverageType,
            ] {
                let label = format!("{} ({})", field.label(), field);
                let mut line = format!("  {:<36} {}", label, request.field_value(field));
                if invalid_fields.contains(&field) {
                    line.push_str("  ");
                    line.push_str(REQUIRED_MARK);
                } else if field.is_enumerated() {
                    line.push_str(&format!("  [{}]", field.options().join(" | ")));
                }
                writeln!(out, "{}", line.trim_end())?;
            }
            writeln!(out, "set <field> <value>, submit, cancel")?;
        }
        ViewSnapshot::QuoteShown {
            quote,
            display_price,
        } => {
            let request = quote.request();
            writeln!(out)?;
            writeln!(out, "Your Insurance Quote")?;
            writeln!(out, "  Car Make:      {}", request.car_make)?;
            writeln!(out, "  Registration:  {}", request.vehicle_registration)?;
            writeln!(out, "  Color:         {}", request.color)?;
            writeln!(out, "  Body Type:     {}", request.body_type)?;
            writeln!(out, "  Coverage:      {}", request.coverage_type)?;
            writeln!(out, "  Duration:      {}", request.duration)?;
            writeln!(out, "  Estimated Premium: {}", display_price)?;
            writeln!(out, "buy, another")?;
        }
        ViewSnapshot::PurchaseConfirmed {
            purchase,
            summary,
            countdown_message,
            ..
        } => {
            writeln!(out)?;
            writeln!(out, "Purchase Successful!")?;
            writeln!(out, "  {}", summary)?;
            writeln!(out, "  Total Amount: {}", format_price(purchase.price()))?;
            writeln!(out, "{}", countdown_message)?;
            writeln!(out, "home")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cover_common::{QuoteFlowController, QuoteRequest};

    fn render_text(snapshot: &ViewSnapshot) -> String {
        let mut out = Vec::new();
        Renderer::new(false).render(&mut out, snapshot).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn purchased() -> QuoteFlowController {
        let mut flow = QuoteFlowController::new();
        flow.start_quote().unwrap();
        flow.submit_form(QuoteRequest {
            car_make: "Toyota".into(),
            vehicle_registration: "BAA 100".into(),
            color: "Grey".into(),
            chassis_no: "AE86".into(),
            ..Default::default()
        })
        .unwrap();
        flow.confirm_purchase().unwrap();
        flow
    }

    #[test]
    fn landing_shows_brand_and_motto() {
        let text = render_text(&QuoteFlowController::new().snapshot());
        assert!(text.contains("ShieldCover Insurance"));
        assert!(text.contains("Drive with Confidence, We've Got You Covered"));
    }

    #[test]
    fn form_marks_missing_fields() {
        let mut flow = QuoteFlowController::new();
        flow.start_quote().unwrap();
        flow.update_field("carMake", "Audi").unwrap();
        let _ = flow.submit_current();
        let text = render_text(&flow.snapshot());
        assert!(text.contains("Car Make (carMake)"));
        assert!(text.contains("Chassis No (chassisNo)"));
        assert_eq!(text.matches(REQUIRED_MARK).count(), 3);
        assert!(text.contains("saloon | suv | pick-up | truck | bus"));
    }

    #[test]
    fn purchase_shows_summary_amount_and_countdown() {
        let text = render_text(&purchased().snapshot());
        assert!(text.contains("Purchase Successful!"));
        assert!(text.contains("You've purchased comprehensive coverage for your saloon."));
        assert!(text.contains("Total Amount: K10000.00"));
        assert!(text.contains("Returning to homepage in 10 seconds..."));
    }

    #[test]
    fn tick_in_text_mode_prints_only_the_countdown_line() {
        let mut flow = purchased();
        flow.tick_countdown();
        let mut out = Vec::new();
        Renderer::new(false)
            .render_tick(&mut out, &flow.snapshot())
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Returning to homepage in 9 seconds...\n"
        );
    }

    #[test]
    fn json_mode_writes_one_line_per_snapshot() {
        let mut out = Vec::new();
        let renderer = Renderer::new(true);
        renderer
            .render(&mut out, &QuoteFlowController::new().snapshot())
            .unwrap();
        renderer.render_error(&mut out, "nope").unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["state"], "landing");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["error"], "nope");
    }
}
