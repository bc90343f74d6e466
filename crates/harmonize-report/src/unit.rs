//! Reported units and delivery days.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Stream holding the dynamic services auction results per unit.
pub const UNIT_STREAM: &str = "unit_dstack_response";

/// Column the delivery-day bounds apply to.
pub const DATE_COLUMN: &str = "EFA Date";

/// Column naming the BM unit.
pub const UNIT_COLUMN: &str = "Unit Name";

/// EFA block number (1 to 6).
pub const EFA_COLUMN: &str = "EFA";

/// Frequency response service (e.g. DCL, DCH).
pub const SERVICE_COLUMN: &str = "Service";

/// Market clearing price in £/MW/h.
pub const CLEARING_PRICE_COLUMN: &str = "Clearing Price";

/// Volume procured by the ESO in MW.
pub const CLEARED_VOLUME_COLUMN: &str = "Cleared Volume";

/// A battery site whose auction results are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    /// Contego, BM unit `CONTB-1`.
    Contego,
    /// Holes Bay, BM unit `BHOLB-1`.
    HolesBay,
}

impl Unit {
    /// Every reported unit, in display order.
    pub const ALL: [Self; 2] = [Self::Contego, Self::HolesBay];

    /// Returns the BM unit name used in the `Unit Name` column.
    #[must_use]
    pub const fn unit_name(&self) -> &'static str {
        match self {
            Self::Contego => "CONTB-1",
            Self::HolesBay => "BHOLB-1",
        }
    }

    /// Returns the site name.
    #[must_use]
    pub const fn site_name(&self) -> &'static str {
        match self {
            Self::Contego => "Contego",
            Self::HolesBay => "Holes Bay",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.site_name(), self.unit_name())
    }
}

/// Delivery day shown in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeliveryDay {
    /// Today's EFA blocks.
    Current,
    /// Tomorrow's EFA blocks, published by the ESO after 4pm UK time.
    DayAhead,
}

impl DeliveryDay {
    /// Returns the `(start, end)` bounds on [`DATE_COLUMN`] for this day.
    ///
    /// The current day is bounded on both sides by today. The day ahead is
    /// everything after today. Both embed today's date, so each day gets a
    /// fresh cache key.
    #[must_use]
    pub fn bounds(&self, today: NaiveDate) -> (Option<String>, Option<String>) {
        let today = today.format("%Y-%m-%d").to_string();
        match self {
            Self::Current => (Some(today.clone()), Some(today)),
            Self::DayAhead => (Some(today), None),
        }
    }

    /// Returns the delivery date.
    #[must_use]
    pub fn date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Current => today,
            Self::DayAhead => today.checked_add_days(Days::new(1)).unwrap_or(today),
        }
    }

    /// Returns the delivery date in UK order (`DD-MM-YYYY`).
    #[must_use]
    pub fn uk_date(&self, today: NaiveDate) -> String {
        self.date(today).format("%d-%m-%Y").to_string()
    }

    /// Returns the tab title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Current => "Current Day",
            Self::DayAhead => "Day Ahead",
        }
    }
}

impl std::fmt::Display for DeliveryDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(Unit::Contego.unit_name(), "CONTB-1");
        assert_eq!(Unit::HolesBay.unit_name(), "BHOLB-1");
        assert_eq!(Unit::HolesBay.to_string(), "Holes Bay (BHOLB-1)");
    }

    #[test]
    fn test_current_day_bounds() {
        let (start, end) = DeliveryDay::Current.bounds(today());
        assert_eq!(start.as_deref(), Some("2024-12-31"));
        assert_eq!(end.as_deref(), Some("2024-12-31"));
    }

    #[test]
    fn test_day_ahead_bounds() {
        let (start, end) = DeliveryDay::DayAhead.bounds(today());
        assert_eq!(start.as_deref(), Some("2024-12-31"));
        assert!(end.is_none());
    }

    #[test]
    fn test_uk_dates() {
        assert_eq!(DeliveryDay::Current.uk_date(today()), "31-12-2024");
        assert_eq!(DeliveryDay::DayAhead.uk_date(today()), "01-01-2025");
    }
}
