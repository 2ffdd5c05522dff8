//! Erlang C staffing core.
//!
//! Layers, leaves first: `erlang` (probability of waiting),
//! `service_level`, `staffing` (minimum agents search), `scenario`
//! (named target comparison). `demand` and `plan` feed it from call logs.

pub mod config;
pub mod demand;
pub mod erlang;
pub mod error;
pub mod plan;
pub mod scenario;
pub mod service_level;
pub mod staffing;
pub mod types;
