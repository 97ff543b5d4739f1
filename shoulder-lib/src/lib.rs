#![doc(hidden)]

//! Core library for shoulder
//!
//! This library holds all functionality for the shoulder tool, which finds the projects
//! that depend on an npm package and ranks them by download count or GitHub stars.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface, configuration, and logging
//! - [`facts`]: Identity resolution and upstream data providers
//! - [`project`]: Dependent projects and their verification
//! - [`stats`]: Metrics, aggregation, and ranking
//! - [`pipeline`]: End-to-end discovery, verification, and ranking
//! - [`reports`]: Output renderers

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod facts;
pub mod pipeline;
pub mod project;
pub mod reports;
pub mod stats;

pub use crate::commands::{Host, run};
