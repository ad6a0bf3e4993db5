//! Markdown rendering of tool results.

use std::fmt::Write;

use crate::callook::CallsignRecord;
use crate::domain::{Callsign, ParkRef};
use crate::geodesic::Geodesic;
use crate::parks::ParkReference;
use crate::pota::{ParkDetails, Spot, SpotFilter};

/// Park page on the POTA website.
fn park_url(reference: &str) -> String {
    format!("https://pota.app/#/park/{reference}")
}

fn status(active: bool) -> &'static str {
    if active { "Active" } else { "Inactive" }
}

// Writing into a String is infallible.

pub fn callsign_record(record: &CallsignRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Callsign Information for {}\n", record.current.callsign);
    let _ = writeln!(out, "**License Class:** {}", record.current.oper_class);
    let _ = writeln!(out, "**Name:** {}", record.name);
    let _ = writeln!(out, "**Type:** {}\n", record.license_type);

    if !record.trustee.callsign.is_empty() {
        let _ = writeln!(
            out,
            "**Trustee:** {} ({})\n",
            record.trustee.callsign, record.trustee.name
        );
    }

    out.push_str("### Location\n");
    let _ = writeln!(
        out,
        "**Address:** {}, {}",
        record.address.line1, record.address.line2
    );
    let _ = writeln!(out, "**Grid Square:** {}", record.location.gridsquare);
    let _ = writeln!(
        out,
        "**Coordinates:** {}, {}\n",
        record.location.latitude, record.location.longitude
    );

    out.push_str("### License Information\n");
    let _ = writeln!(out, "**Grant Date:** {}", record.other_info.grant_date);
    let _ = writeln!(out, "**Expiry Date:** {}", record.other_info.expiry_date);
    let _ = writeln!(
        out,
        "**Last Action Date:** {}",
        record.other_info.last_action_date
    );
    let _ = writeln!(out, "**FRN:** {}", record.other_info.frn);

    if !record.previous.callsign.is_empty() {
        let _ = writeln!(
            out,
            "\n**Previous Callsign:** {} ({})",
            record.previous.callsign, record.previous.oper_class
        );
    }

    let _ = write!(out, "\n[View on ULS]({})", record.other_info.uls_url);
    out
}

pub fn callsign_not_valid(label: &str, callsign: &Callsign) -> String {
    if label.is_empty() {
        format!("Callsign {callsign} is not valid")
    } else {
        format!("{label} callsign {callsign} is not valid")
    }
}

pub fn antenna_bearing(g: &Geodesic) -> String {
    format!(
        "## Antenna Bearing Results\n\n\
         **Distance:** {:.2} miles ({:.2} km)\n\n\
         **Bearing:** {:.2} degrees from North",
        g.distance_miles, g.distance_km, g.bearing_deg
    )
}

/// One end of a callsign-to-callsign bearing.
pub struct Station<'a> {
    pub callsign: &'a Callsign,
    pub record: &'a CallsignRecord,
}

pub fn callsign_bearing(origin: &Station<'_>, destination: &Station<'_>, g: &Geodesic) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## Antenna Bearing: {} to {}\n",
        origin.callsign, destination.callsign
    );
    for station in [origin, destination] {
        let _ = writeln!(
            out,
            "**{} Location:** {}, {}",
            station.callsign, station.record.location.latitude, station.record.location.longitude
        );
        let _ = writeln!(
            out,
            "**Grid Square:** {}\n",
            station.record.location.gridsquare
        );
    }
    let _ = writeln!(
        out,
        "**Distance:** {:.2} miles ({:.2} km)\n",
        g.distance_miles, g.distance_km
    );
    let _ = write!(out, "**Bearing:** {:.1} degrees from North", g.bearing_deg);
    out
}

/// Park summary from the dataset row, enriched with API detail when available.
pub fn park(park: &ParkReference, details: Option<&ParkDetails>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## POTA Park: {}\n", park.reference);
    let _ = writeln!(out, "**Name:** {}", park.name);

    let location_name = details.map(|d| d.location_name.as_str()).unwrap_or("");
    match (park.location_desc.is_empty(), location_name.is_empty()) {
        (false, false) => {
            let _ = writeln!(out, "**Location:** {}, {location_name}", park.location_desc);
        }
        (false, true) => {
            let _ = writeln!(out, "**Location:** {}", park.location_desc);
        }
        (true, false) => {
            let _ = writeln!(out, "**Location:** {location_name}");
        }
        (true, true) => {}
    }
    let _ = writeln!(out, "**Status:** {}", status(park.active));
    if let Some(d) = details.filter(|d| !d.parktype_desc.is_empty()) {
        let _ = writeln!(out, "**Park Type:** {}", d.parktype_desc);
    }
    let _ = writeln!(out, "**Entity ID:** {}\n", park.entity_id);

    if let Some(d) = details.filter(|d| !d.park_comments.is_empty()) {
        let _ = writeln!(out, "**Comments:** {}\n", d.park_comments);
    }

    out.push_str("### Geographic Information\n");
    let _ = writeln!(out, "**Coordinates:** {}", park.coordinate());
    match details {
        Some(d) if !d.grid4.is_empty() && !d.grid6.is_empty() => {
            let _ = writeln!(out, "**Grid Square:** {} ({})", d.grid4, d.grid6);
        }
        _ if !park.grid.is_empty() => {
            let _ = writeln!(out, "**Grid Square:** {}", park.grid);
        }
        _ => {}
    }

    if let Some(d) = details {
        let mut extra = String::new();
        if !d.access_methods.is_empty() {
            let _ = writeln!(extra, "**Access Methods:** {}", d.access_methods);
        }
        if !d.activation_methods.is_empty() {
            let _ = writeln!(extra, "**Activation Methods:** {}", d.activation_methods);
        }
        if !d.website.is_empty() {
            let _ = writeln!(extra, "**Website:** [{0}]({0})", d.website);
        }
        if !d.first_activator.is_empty() {
            let _ = writeln!(
                extra,
                "**First Activated By:** {} on {}",
                d.first_activator, d.first_activation_date
            );
        }
        if !extra.is_empty() {
            out.push('\n');
            out.push_str(&extra);
        }
    }

    let _ = write!(out, "\n[View on POTA website]({})", park_url(&park.reference));
    out
}

pub fn park_not_found(reference: &ParkRef) -> String {
    format!("Park with reference {reference} not found")
}

/// Render spots as a Markdown table, or a "none found" sentence.
pub fn spots(spots: &[Spot], filter: &SpotFilter) -> String {
    if spots.is_empty() {
        return no_spots(filter);
    }

    let mut out = String::from("# Current POTA Activations\n\n");
    if let Some(activator) = &filter.activator {
        let _ = writeln!(out, "Filtered by activator: **{activator}**\n");
    }
    if let Some(mode) = &filter.mode {
        let _ = writeln!(out, "Filtered by mode: **{mode}**\n");
    }

    out.push_str(
        "| Activator | Reference | Park Name | Frequency | Mode | Location | Spotted At | Spotted By | Comments |\n",
    );
    out.push_str(
        "|-----------|-----------|-----------|-----------|------|----------|------------|------------|----------|\n",
    );

    for spot in spots {
        let spotted_at = spot
            .spotted_at()
            .map(|t| t.format("%H:%M UTC").to_string())
            .unwrap_or_else(|| spot.spot_time.clone());

        let _ = writeln!(
            out,
            "| {} | [{}]({}) | {} | {} | {} | {} | {} | {} | {} |",
            cell(&spot.activator),
            cell(&spot.reference),
            park_url(&spot.reference),
            cell(&spot.name),
            cell(&spot.frequency),
            cell(&spot.mode),
            cell(&spot.location_desc),
            spotted_at,
            cell(&spot.spotter),
            cell(&spot.comments),
        );
    }

    out.push_str("\n\nData provided by [Parks on the Air API](https://pota.app)");
    out
}

fn no_spots(filter: &SpotFilter) -> String {
    let mut message = String::from("No active POTA spots found");
    if let Some(activator) = &filter.activator {
        let _ = write!(message, " for activator {activator}");
    }
    if let Some(mode) = &filter.mode {
        let joiner = if filter.activator.is_some() { " and" } else { " for" };
        let _ = write!(message, "{joiner} mode {mode}");
    }
    message
}

/// Keep free-text spotter comments from breaking the table.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::geodesic::compute;

    fn record(call: &str, lat: &str, lon: &str, grid: &str) -> CallsignRecord {
        let mut r = CallsignRecord {
            status: "VALID".into(),
            license_type: "PERSON".into(),
            name: "TEST OPERATOR".into(),
            ..Default::default()
        };
        r.current.callsign = call.into();
        r.current.oper_class = "EXTRA".into();
        r.location.latitude = lat.into();
        r.location.longitude = lon.into();
        r.location.gridsquare = grid.into();
        r.other_info.uls_url = "http://example.invalid/uls".into();
        r
    }

    #[test]
    fn callsign_record_sections() {
        let text = callsign_record(&record("W1AW", "41.714775", "-72.727260", "FN31pr"));

        assert!(text.starts_with("## Callsign Information for W1AW\n\n"));
        assert!(text.contains("**License Class:** EXTRA\n"));
        assert!(text.contains("**Grid Square:** FN31pr\n"));
        assert!(text.contains("**Coordinates:** 41.714775, -72.727260\n"));
        assert!(text.ends_with("[View on ULS](http://example.invalid/uls)"));
        assert!(!text.contains("Previous Callsign"));
        assert!(!text.contains("Trustee"));
    }

    #[test]
    fn callsign_record_previous_and_trustee() {
        let mut r = record("W1AW", "0", "0", "");
        r.previous.callsign = "KA1XYZ".into();
        r.previous.oper_class = "GENERAL".into();
        r.trustee.callsign = "K1ABC".into();
        r.trustee.name = "A TRUSTEE".into();
        let text = callsign_record(&r);

        assert!(text.contains("**Previous Callsign:** KA1XYZ (GENERAL)"));
        assert!(text.contains("**Trustee:** K1ABC (A TRUSTEE)"));
    }

    #[test]
    fn antenna_bearing_two_decimals() {
        let g = compute(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));
        assert_eq!(
            antenna_bearing(&g),
            "## Antenna Bearing Results\n\n\
             **Distance:** 6218.40 miles (10007.54 km)\n\n\
             **Bearing:** 90.00 degrees from North"
        );
    }

    #[test]
    fn callsign_bearing_lists_both_stations() {
        let a = Callsign::parse("W1AW").unwrap();
        let b = Callsign::parse("K2A").unwrap();
        let ra = record("W1AW", "0", "0", "JJ00aa");
        let rb = record("K2A", "0", "90", "PJ00aa");
        let g = compute(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));

        let text = callsign_bearing(
            &Station { callsign: &a, record: &ra },
            &Station { callsign: &b, record: &rb },
            &g,
        );

        assert!(text.starts_with("## Antenna Bearing: W1AW to K2A\n\n"));
        assert!(text.contains("**W1AW Location:** 0, 0\n**Grid Square:** JJ00aa\n"));
        assert!(text.contains("**K2A Location:** 0, 90\n**Grid Square:** PJ00aa\n"));
        assert!(text.ends_with("**Bearing:** 90.0 degrees from North"));
    }

    fn talcott() -> ParkReference {
        ParkReference {
            reference: "US-2312".into(),
            name: "Talcott Mountain State Park".into(),
            active: false,
            entity_id: 291,
            location_desc: "US-CT".into(),
            latitude: 41.8378,
            longitude: -72.7982,
            grid: "FN31oa".into(),
        }
    }

    #[test]
    fn park_summary() {
        let text = park(&talcott(), None);

        assert!(text.starts_with("## POTA Park: US-2312\n\n"));
        assert!(text.contains("**Name:** Talcott Mountain State Park\n"));
        assert!(text.contains("**Location:** US-CT\n"));
        assert!(text.contains("**Status:** Inactive\n"));
        assert!(text.contains("**Coordinates:** 41.837800, -72.798200\n"));
        assert!(text.contains("**Grid Square:** FN31oa\n"));
        assert!(text.ends_with("[View on POTA website](https://pota.app/#/park/US-2312)"));
    }

    #[test]
    fn park_summary_with_details() {
        let details = ParkDetails {
            reference: "US-2312".into(),
            parktype_desc: "State Park".into(),
            location_name: "Connecticut".into(),
            park_comments: "Hike to the tower".into(),
            access_methods: "Automobile,Foot".into(),
            activation_methods: "Pedestrian".into(),
            website: "https://portal.ct.gov/DEEP".into(),
            grid4: "FN31".into(),
            grid6: "FN31oa".into(),
            first_activator: "KX1X".into(),
            first_activation_date: "2021-04-03".into(),
            ..Default::default()
        };
        let text = park(&talcott(), Some(&details));

        assert!(text.contains("**Location:** US-CT, Connecticut\n"));
        assert!(text.contains("**Status:** Inactive\n**Park Type:** State Park\n"));
        assert!(text.contains("**Comments:** Hike to the tower\n"));
        assert!(text.contains("**Grid Square:** FN31 (FN31oa)\n"));
        assert!(text.contains("**Access Methods:** Automobile,Foot\n"));
        assert!(text.contains("**Activation Methods:** Pedestrian\n"));
        assert!(text.contains(
            "**Website:** [https://portal.ct.gov/DEEP](https://portal.ct.gov/DEEP)\n"
        ));
        assert!(text.contains("**First Activated By:** KX1X on 2021-04-03\n"));
        assert!(text.ends_with("[View on POTA website](https://pota.app/#/park/US-2312)"));
    }

    #[test]
    fn park_details_with_blank_fields_add_nothing() {
        let details = ParkDetails::default();
        assert_eq!(park(&talcott(), Some(&details)), park(&talcott(), None));
    }

    #[test]
    fn spots_table() {
        let s = Spot {
            activator: "KD9ABC".into(),
            reference: "US-2312".into(),
            name: "Talcott Mountain State Park".into(),
            frequency: "14062".into(),
            mode: "CW".into(),
            location_desc: "US-CT".into(),
            spot_time: "2024-03-15T14:05:09".into(),
            spotter: "W1AW".into(),
            comments: "QRT | QSY\n20m".into(),
            ..Default::default()
        };
        let text = spots(&[s], &SpotFilter::new(Some("KD9ABC"), None));

        assert!(text.starts_with("# Current POTA Activations\n\n"));
        assert!(text.contains("Filtered by activator: **KD9ABC**\n"));
        assert!(!text.contains("Filtered by mode"));
        assert!(text.contains(
            "| KD9ABC | [US-2312](https://pota.app/#/park/US-2312) | Talcott Mountain State Park | 14062 | CW | US-CT | 14:05 UTC | W1AW | QRT \\| QSY 20m |"
        ));
        assert!(text.ends_with("Data provided by [Parks on the Air API](https://pota.app)"));
    }

    #[test]
    fn unparsable_spot_time_shown_raw() {
        let s = Spot {
            spot_time: "soon".into(),
            ..Default::default()
        };
        assert!(spots(&[s], &SpotFilter::default()).contains("| soon |"));
    }

    #[test]
    fn no_spots_messages() {
        assert_eq!(spots(&[], &SpotFilter::default()), "No active POTA spots found");
        assert_eq!(
            spots(&[], &SpotFilter::new(Some("W1AW"), None)),
            "No active POTA spots found for activator W1AW"
        );
        assert_eq!(
            spots(&[], &SpotFilter::new(None, Some("FT8"))),
            "No active POTA spots found for mode FT8"
        );
        assert_eq!(
            spots(&[], &SpotFilter::new(Some("W1AW"), Some("FT8"))),
            "No active POTA spots found for activator W1AW and mode FT8"
        );
    }
}
