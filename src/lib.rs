//! Formflow - Form builder backend
//!
//! This crate implements structured form authoring with conditional field
//! visibility, response validation against a published schema, and
//! incrementally aggregated response analytics pushed to live dashboards.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
