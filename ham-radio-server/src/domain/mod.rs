//! Core domain types.
//!
//! Identifiers accepted at the tool boundary (callsigns and park
//! references) and decimal-degree coordinates. Each type is valid by
//! construction, so code past the boundary never re-checks them.

mod callsign;
mod coordinate;
mod error;
mod reference;

pub use callsign::Callsign;
pub use coordinate::Coordinate;
pub use error::ValidationError;
pub use reference::ParkRef;
