//! Filtering and aggregation engine behind the movie dataset dashboard.
//!
//! The dashboard binary is only a thin caller: every table, chart and export
//! it shows is computed here from an immutable [`data::model::MovieTable`].

pub mod data;
pub mod error;

pub use error::{DatasetError, Result};
