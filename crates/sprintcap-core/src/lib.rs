//! # sprintcap Core Library
//!
//! This library provides the business logic for the sprint-capacity
//! calculator. The CLI binary is a thin presentation layer over it.
//!
//! ## Architecture
//!
//! - **State Store**: single owner of the editable sprint (countries, PTO,
//!   scalars). Every mutation synchronously re-derives the results.
//! - **Derivation Engine**: pure function from sprint state to dev-days,
//!   capacity ratio and target points.
//! - **Input**: coercion of free-text form input to numbers and typed updates.
//! - **Report**: shared text formatting and JSON snapshot.
//! - **Config**: TOML user preferences (sprint defaults, display options).
//!
//! ## Key Components
//!
//! - [`SprintStore`]: state store
//! - [`derive()`]: derivation engine
//! - [`Config`]: user configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod report;
pub mod store;

pub use config::{Config, DisplayConfig, OutputFormat};
pub use engine::{derive, DerivedResults};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use input::{coerce_float, coerce_int, resolve_country};
pub use model::{Country, CountryId, PtoEntry, PtoId, SprintConfig, SprintDefaults};
pub use report::Snapshot;
pub use store::{CountryUpdate, PtoUpdate, ScalarUpdate, SprintStore};
