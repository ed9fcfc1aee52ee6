//! Domain logic for the popdash dashboard.
//!
//! This crate has no database or HTTP dependencies. It owns the wire row
//! types, the time-bucket and window rules, and the regrouping pipeline that
//! turns flat aggregation rows into chart-ready series.

pub mod areas;
pub mod bucket;
pub mod change;
pub mod chart;
pub mod error;
pub mod palette;
pub mod placeholder;
pub mod refresh;
pub mod rows;
pub mod series;
pub mod types;
pub mod window;
