//! Tool definitions and execution.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::format;
use super::protocol::{ToolCallParams, ToolResult, ToolSchema};
use crate::callook::CallsignDirectory;
use crate::domain::{Callsign, Coordinate, ParkRef, ValidationError};
use crate::fetch::FetchError;
use crate::geodesic;
use crate::parks::{ParkError, ReferenceCache};
use crate::pota::{ParkDetailSource, SpotFilter, SpotSource};

const CALLSIGN_PATTERN: &str = "^[A-Za-z0-9]{1,2}[0-9][A-Za-z]{1,3}$";
const REFERENCE_PATTERN: &str = "^[A-Za-z0-9]{1,4}-[0-9]{1,5}$";

/// Everything a tool call may need.
#[derive(Clone)]
pub struct ToolContext {
    pub parks: Arc<ReferenceCache>,
    pub park_details: Arc<dyn ParkDetailSource>,
    pub callsigns: Arc<dyn CallsignDirectory>,
    pub spots: Arc<dyn SpotSource>,
}

/// Errors that turn a tool call into an `isError` result.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Park(#[from] ParkError),

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

pub fn tool_definitions() -> Vec<ToolSchema> {
    vec![
        ToolSchema {
            name: "callsign-lookup",
            description: "Look up an amateur radio callsign and return license information",
            input_schema: json!({
                "type": "object",
                "required": ["callsign"],
                "properties": {
                    "callsign": {
                        "type": "string",
                        "description": "Amateur radio callsign to look up",
                        "pattern": CALLSIGN_PATTERN
                    }
                }
            }),
        },
        ToolSchema {
            name: "antenna-bearing",
            description: "Calculate distance and antenna bearing between two coordinates",
            input_schema: json!({
                "type": "object",
                "required": [
                    "origin-latitude",
                    "origin-longitude",
                    "destination-latitude",
                    "destination-longitude"
                ],
                "properties": {
                    "origin-latitude": {
                        "type": "string",
                        "description": "Origin latitude in decimal degrees"
                    },
                    "origin-longitude": {
                        "type": "string",
                        "description": "Origin longitude in decimal degrees"
                    },
                    "destination-latitude": {
                        "type": "string",
                        "description": "Destination latitude in decimal degrees"
                    },
                    "destination-longitude": {
                        "type": "string",
                        "description": "Destination longitude in decimal degrees"
                    }
                }
            }),
        },
        ToolSchema {
            name: "callsign-bearing",
            description: "Calculate distance and antenna bearing between two licensed stations",
            input_schema: json!({
                "type": "object",
                "required": ["origin-callsign", "destination-callsign"],
                "properties": {
                    "origin-callsign": {
                        "type": "string",
                        "description": "Callsign of the origin station",
                        "pattern": CALLSIGN_PATTERN
                    },
                    "destination-callsign": {
                        "type": "string",
                        "description": "Callsign of the destination station",
                        "pattern": CALLSIGN_PATTERN
                    }
                }
            }),
        },
        ToolSchema {
            name: "pota-park-lookup",
            description: "Look up a Parks on the Air park by reference (e.g. US-2312)",
            input_schema: json!({
                "type": "object",
                "required": ["reference"],
                "properties": {
                    "reference": {
                        "type": "string",
                        "description": "POTA park reference",
                        "pattern": REFERENCE_PATTERN
                    }
                }
            }),
        },
        ToolSchema {
            name: "pota-spots",
            description: "List current Parks on the Air activations, optionally filtered",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "callsign": {
                        "type": "string",
                        "description": "Only show spots for this activator"
                    },
                    "mode": {
                        "type": "string",
                        "description": "Only show spots in this mode (e.g. CW, SSB, FT8)"
                    }
                }
            }),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct CallsignLookupArgs {
    callsign: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AntennaBearingArgs {
    origin_latitude: String,
    origin_longitude: String,
    destination_latitude: String,
    destination_longitude: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CallsignBearingArgs {
    origin_callsign: String,
    destination_callsign: String,
}

#[derive(Debug, Deserialize)]
struct ParkLookupArgs {
    reference: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpotsArgs {
    callsign: Option<String>,
    mode: Option<String>,
}

/// Run a tool. Failures come back as `isError` results, never as panics
/// or protocol errors.
pub async fn call_tool(ctx: &ToolContext, params: &ToolCallParams) -> ToolResult {
    debug!(tool = %params.name, "calling tool");
    match run_tool(ctx, params).await {
        Ok(text) => ToolResult::text(text),
        Err(e) => {
            warn!(tool = %params.name, error = %e, "tool call failed");
            ToolResult::error(e.to_string())
        }
    }
}

async fn run_tool(ctx: &ToolContext, params: &ToolCallParams) -> Result<String, ToolError> {
    let name = params.name.as_str();
    match name {
        "callsign-lookup" => callsign_lookup(ctx, parse_args(name, params)?).await,
        "antenna-bearing" => antenna_bearing(parse_args(name, params)?),
        "callsign-bearing" => callsign_bearing(ctx, parse_args(name, params)?).await,
        "pota-park-lookup" => park_lookup(ctx, parse_args(name, params)?).await,
        "pota-spots" => pota_spots(ctx, parse_args(name, params)?).await,
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, params: &ToolCallParams) -> Result<T, ToolError> {
    let arguments = params.arguments.clone().unwrap_or_else(|| json!({}));
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

async fn callsign_lookup(ctx: &ToolContext, args: CallsignLookupArgs) -> Result<String, ToolError> {
    let callsign = Callsign::parse_normalized(&args.callsign)?;
    let record = ctx.callsigns.lookup(&callsign).await?;

    if !record.is_valid() {
        return Ok(format::callsign_not_valid("", &callsign));
    }
    Ok(format::callsign_record(&record))
}

fn antenna_bearing(args: AntennaBearingArgs) -> Result<String, ToolError> {
    let origin = Coordinate::parse_named(
        ("origin-latitude", &args.origin_latitude),
        ("origin-longitude", &args.origin_longitude),
    )?;
    let destination = Coordinate::parse_named(
        ("destination-latitude", &args.destination_latitude),
        ("destination-longitude", &args.destination_longitude),
    )?;

    Ok(format::antenna_bearing(&geodesic::compute(origin, destination)))
}

async fn callsign_bearing(ctx: &ToolContext, args: CallsignBearingArgs) -> Result<String, ToolError> {
    let origin = Callsign::parse_normalized(&args.origin_callsign)?;
    let destination = Callsign::parse_normalized(&args.destination_callsign)?;

    let (origin_record, destination_record) = futures::try_join!(
        ctx.callsigns.lookup(&origin),
        ctx.callsigns.lookup(&destination),
    )?;

    if !origin_record.is_valid() {
        return Ok(format::callsign_not_valid("Origin", &origin));
    }
    if !destination_record.is_valid() {
        return Ok(format::callsign_not_valid("Destination", &destination));
    }

    let g = geodesic::compute(origin_record.coordinate()?, destination_record.coordinate()?);

    Ok(format::callsign_bearing(
        &format::Station {
            callsign: &origin,
            record: &origin_record,
        },
        &format::Station {
            callsign: &destination,
            record: &destination_record,
        },
        &g,
    ))
}

async fn park_lookup(ctx: &ToolContext, args: ParkLookupArgs) -> Result<String, ToolError> {
    let reference = ParkRef::parse_normalized(&args.reference)?;

    let Some(park) = ctx.parks.lookup(reference.as_str()).await? else {
        return Ok(format::park_not_found(&reference));
    };

    // Detail only enriches the answer; the dataset row is authoritative
    let details = match ctx.park_details.park_details(&reference).await {
        Ok(details) => Some(details),
        Err(e) => {
            warn!(%reference, error = %e, "park detail unavailable, using dataset only");
            None
        }
    };

    Ok(format::park(&park, details.as_ref()))
}

async fn pota_spots(ctx: &ToolContext, args: SpotsArgs) -> Result<String, ToolError> {
    let filter = SpotFilter::new(args.callsign.as_deref(), args.mode.as_deref());
    let spots = filter.apply(ctx.spots.current_spots().await?);
    debug!(count = spots.len(), "spots after filtering");

    Ok(format::spots(&spots, &filter))
}
