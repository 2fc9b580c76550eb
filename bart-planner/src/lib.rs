//! BART trip planner.
//!
//! A small web application that resolves station names to BART codes,
//! fetches arrival predictions and service alerts from a BART prediction
//! API, and renders them.

pub mod bart;
pub mod board;
pub mod config;
pub mod domain;
pub mod pipeline;
pub mod query;
pub mod stations;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;
