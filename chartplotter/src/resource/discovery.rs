//! Name-based discovery of the dashboard's sensors.
//!
//! Gauge and AIS sensors are found by naming convention among the device's
//! `component`/`sensor` resources. Names are usually prefixed with the
//! machine part (`boat:n2k-ais`), so patterns match at the end or on a word
//! boundary.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::directory::{
    all_matching_names, first_matching_name, Resource, COMPONENT_TYPE, SENSOR_SUBTYPE,
};

/// Sensor names resolved from the resource list.
///
/// An empty string means no matching sensor was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SensorNames {
    pub ais: String,
    pub all_pgn: String,
    pub seatemp: String,
    pub depth: String,
    pub wind: String,
    pub spotzero_fw: String,
    pub spotzero_sw: String,
    pub seakeeper: String,
    /// AC power monitors (`ac-<bank>-<line>`), sorted.
    pub ac_powers: Vec<String>,
}

struct Patterns {
    ais: Regex,
    all_pgn: Regex,
    seatemp: Regex,
    depth: Regex,
    wind: Regex,
    spotzero_fw: Regex,
    spotzero_sw: Regex,
    seakeeper: Regex,
    ac_power: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        ais: Regex::new(r"\bais$").unwrap(),
        all_pgn: Regex::new(r"\ball.pgn$").unwrap(),
        seatemp: Regex::new(r"\bseatemp$").unwrap(),
        depth: Regex::new("depth").unwrap(),
        wind: Regex::new("wind").unwrap(),
        spotzero_fw: Regex::new("spotzero-fw").unwrap(),
        spotzero_sw: Regex::new("spotzero-sw").unwrap(),
        seakeeper: Regex::new("seakeeper").unwrap(),
        ac_power: Regex::new(r"\bac-\d-\d$").unwrap(),
    })
}

/// Resolve every known sensor role from `resources`.
pub fn discover_sensor_names(resources: &[Resource]) -> SensorNames {
    let p = patterns();
    let first =
        |re: &Regex| first_matching_name(resources, COMPONENT_TYPE, SENSOR_SUBTYPE, Some(re));

    let names = SensorNames {
        ais: first(&p.ais),
        all_pgn: first(&p.all_pgn),
        seatemp: first(&p.seatemp),
        depth: first(&p.depth),
        wind: first(&p.wind),
        spotzero_fw: first(&p.spotzero_fw),
        spotzero_sw: first(&p.spotzero_sw),
        seakeeper: first(&p.seakeeper),
        ac_powers: all_matching_names(
            resources,
            COMPONENT_TYPE,
            SENSOR_SUBTYPE,
            Some(&p.ac_power),
        ),
    };

    tracing::debug!(?names, "Sensor names discovered");
    names
}
