//! Amateur radio assistant served over the Model Context Protocol.
//!
//! Answers callsign lookups, antenna bearings between coordinates or
//! stations, Parks on the Air reference lookups and live POTA spots.

pub mod callook;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod geodesic;
pub mod mcp;
pub mod parks;
pub mod pota;
