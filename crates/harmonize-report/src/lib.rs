//! Frequency response unit reports built from National Grid auction tables.
//!
//! This crate turns the decoded `unit_dstack_response` table into per-unit
//! reports:
//!
//! - [`Unit`] - The reported generating units
//! - [`DeliveryDay`] - Current day or day ahead, and its date bounds
//! - [`UnitReport`] - Price and volume per EFA block plus potential earnings
//! - [`DayReport`] - Every unit for one delivery day

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod report;
mod unit;

pub use report::{
    DROPPED_COLUMNS, DayReport, EfaBlock, HOURS_PER_EFA_BLOCK, PUBLICATION_NOTICE, UnitReport,
    format_earnings, to_number,
};
pub use unit::{
    CLEARED_VOLUME_COLUMN, CLEARING_PRICE_COLUMN, DATE_COLUMN, DeliveryDay, EFA_COLUMN,
    SERVICE_COLUMN, UNIT_COLUMN, UNIT_STREAM, Unit,
};
