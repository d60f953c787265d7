//! Text rendering of the [`AdminState`].
//!
//! [`AdminState`]: crate::AdminState

use std::fmt;

use common::{Date, Price};
use rust_decimal::Decimal;

use crate::model::{
    Booking, FormResponse, InvestmentListing, Reference, Stats,
    TourismPackage,
};

/// Placeholder of a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Status shown for a [`FormResponse`] without one.
pub const NEW_STATUS: &str = "new";

/// Renders the provided raw date (or date and time) as `YYYY-MM-DD`.
///
/// Unparsable input is rendered as is.
#[must_use]
pub fn date(raw: &str) -> String {
    Date::parse(raw).map_or_else(|_| raw.to_owned(), |d| d.to_string())
}

/// Renders the provided amount as a price.
#[must_use]
pub fn price(amount: Decimal) -> String {
    Price::new(amount)
        .map_or_else(|| amount.to_string(), |p| p.to_string())
}

/// Dashboard view of the provided [`Stats`].
#[derive(Clone, Copy, Debug)]
pub struct Dashboard<'a>(pub &'a Stats);

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;

        writeln!(f, "Dashboard Overview")?;
        writeln!(f, "  Total Bookings:    {}", stats.total_bookings)?;
        let revenue = price(stats.monthly_revenue);
        writeln!(f, "  Monthly Revenue:   {revenue}")?;
        writeln!(
            f,
            "  Tourism Packages:  {}",
            stats.total_tourism_packages,
        )?;
        writeln!(f, "  Investments:       {}", stats.total_investments)?;
        writeln!(f, "  Form Responses:    {}", stats.total_form_responses)?;
        writeln!(f, "  Pending Approvals: {}", stats.pending_approvals)?;

        writeln!(f, "\nRecent Bookings")?;
        if stats.recent_bookings.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for b in &stats.recent_bookings {
            writeln!(
                f,
                "  {}  {} / {}  [{}]",
                date(&b.check_in),
                b.customer_name,
                b.package_name,
                b.status,
            )?;
        }

        writeln!(f, "\nRecent Investments")?;
        if stats.recent_investments.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for i in &stats.recent_investments {
            let amount = price(i.price);
            writeln!(f, "  {} / {amount}  [{}]", i.title, i.status)?;
        }
        Ok(())
    }
}

/// Table of [`TourismPackage`]s.
#[derive(Clone, Copy, Debug)]
pub struct TourismTable<'a>(pub &'a [TourismPackage]);

impl fmt::Display for TourismTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:<32} {:>12} {:<20} {:>5}",
            "ID", "Title", "Price", "Location", "Days",
        )?;
        for p in self.0 {
            writeln!(
                f,
                "{:<24} {:<32} {:>12} {:<20} {:>5}",
                p.id,
                p.title,
                price(p.price),
                p.location.as_deref().unwrap_or(NOT_AVAILABLE),
                p.duration_days.map_or_else(
                    || NOT_AVAILABLE.to_owned(),
                    |d| d.to_string(),
                ),
            )?;
        }
        Ok(())
    }
}

/// Table of [`InvestmentListing`]s.
#[derive(Clone, Copy, Debug)]
pub struct InvestmentTable<'a>(pub &'a [InvestmentListing]);

impl fmt::Display for InvestmentTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:<32} {:>12} {:<20} {:<10}",
            "ID", "Title", "Price", "Location", "Status",
        )?;
        for l in self.0 {
            writeln!(
                f,
                "{:<24} {:<32} {:>12} {:<20} {:<10}",
                l.id,
                l.title,
                price(l.price),
                l.location.as_deref().unwrap_or(NOT_AVAILABLE),
                l.status,
            )?;
        }
        Ok(())
    }
}

/// Table of [`Booking`]s.
#[derive(Clone, Copy, Debug)]
pub struct BookingTable<'a>(pub &'a [Booking]);

impl fmt::Display for BookingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:<24} {:<24} {:<10} {:<10} {:<10}",
            "ID", "Guest Name", "Package/Room", "Check-In", "Check-Out",
            "Status",
        )?;
        for b in self.0 {
            let stay = b
                .accommodation
                .as_deref()
                .or(b.package_id.as_deref())
                .unwrap_or(NOT_AVAILABLE);
            writeln!(
                f,
                "{:<24} {:<24} {:<24} {:<10} {:<10} {:<10}",
                b.id,
                b.full_name,
                stay,
                date(&b.check_in),
                date(&b.check_out),
                b.status,
            )?;
            writeln!(
                f,
                "{:<24} {} / {}  guests: {} adults, {} children, {} infants",
                "", b.email, b.phone, b.adults, b.children, b.infants,
            )?;
            if !b.special_requirements.is_empty() {
                writeln!(
                    f,
                    "{:<24} requirements: {}",
                    "",
                    b.special_requirements.join(", "),
                )?;
            }
        }
        Ok(())
    }
}

/// Cards of [`FormResponse`]s.
#[derive(Clone, Copy, Debug)]
pub struct ResponseCards<'a>(pub &'a [&'a FormResponse]);

impl fmt::Display for ResponseCards<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No form responses found.");
        }
        for r in self.0 {
            writeln!(
                f,
                "[{}] {} ({})  {}",
                r.status.as_deref().unwrap_or(NEW_STATUS),
                r.name,
                r.kind,
                r.id,
            )?;
            writeln!(f, "  Email: {}", r.email)?;
            writeln!(f, "  Phone: {}", r.phone)?;
            writeln!(f, "  Submitted: {}", date(&r.created_at))?;
            match r.kind.as_str() {
                "investment" => {
                    let property = reference(r.property.as_ref());
                    writeln!(f, "  Property: {property}")?;
                }
                "tourism" => {
                    let package = reference(r.package.as_ref());
                    writeln!(f, "  Package: {package}")?;
                }
                _ => {}
            }
            writeln!(
                f,
                "  Occupation: {}",
                r.occupation.as_deref().unwrap_or(NOT_AVAILABLE),
            )?;
            writeln!(
                f,
                "  Requirements: {}",
                r.requirements.as_deref().unwrap_or(NOT_AVAILABLE),
            )?;
            if let Some(msg) = &r.message {
                writeln!(f, "  Message: {msg}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders the referred record, if it still exists.
fn reference(r: Option<&Reference>) -> String {
    r.map_or_else(
        || NOT_AVAILABLE.to_owned(),
        |r| format!("{} ({})", r.title, price(r.price)),
    )
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::model::{FormResponse, Reference, Stats};

    use super::{date, price, Dashboard, ResponseCards};

    #[test]
    fn renders_dates_as_calendar_days() {
        assert_eq!(date("2026-11-01"), "2026-11-01");
        assert_eq!(date("2026-11-01T22:30:00+05:30"), "2026-11-01");
        assert_eq!(date("2026-10-31T23:30:00-02:00"), "2026-11-01");
        assert_eq!(date("soon"), "soon");
    }

    #[test]
    fn renders_prices() {
        assert_eq!(price(Decimal::new(2_200_000, 2)), "22000");
        assert_eq!(price(Decimal::new(2_000_050, 2)), "20000.5");
    }

    #[test]
    fn renders_dangling_property_as_not_available() {
        let response = FormResponse {
            kind: "investment".into(),
            name: "Ravi Kumar".into(),
            property: None,
            status: None,
            created_at: "2026-10-18T10:00:00Z".into(),
            ..FormResponse::default()
        };

        let out = ResponseCards(&[&response]).to_string();

        assert!(out.contains("[new] Ravi Kumar (investment)"));
        assert!(out.contains("Property: N/A"));
        assert!(out.contains("Submitted: 2026-10-18"));
    }

    #[test]
    fn renders_existing_package() {
        let response = FormResponse {
            kind: "tourism".into(),
            package: Some(Reference {
                id: "p1".into(),
                title: "Hampi".into(),
                price: Decimal::new(15_000, 0),
            }),
            status: Some("contacted".into()),
            ..FormResponse::default()
        };

        let out = ResponseCards(&[&response]).to_string();

        assert!(out.contains("[contacted]"));
        assert!(out.contains("Package: Hampi (15000)"));
    }

    #[test]
    fn renders_empty_dashboard() {
        let out = Dashboard(&Stats::default()).to_string();

        assert!(out.contains("Total Bookings:    0"));
        assert!(out.contains("Monthly Revenue:   0"));
        assert!(out.contains("(none)"));
    }
}
