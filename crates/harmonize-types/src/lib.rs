//! Core types for the harmonize National Grid datastore client.
//!
//! This crate provides the fundamental data structures used throughout harmonize:
//!
//! - [`Stream`] - A named datastore resource
//! - [`Table`] - Records normalized into named columns and rows
//! - [`HarmonizeError`] - The error taxonomy shared by every crate

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod stream;
mod table;

pub use error::{FilterError, HarmonizeError, Result, TransportError};
pub use stream::Stream;
pub use table::{Record, Table};
