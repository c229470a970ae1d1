//! Rebuild a route from a PGN 129285 document.

use std::path::Path;

use chartplotter::collection::OrderedStore;
use chartplotter::config::ConfigFile;
use chartplotter::feature::Geometry;
use chartplotter::route::RouteDocument;

use super::common::build_session;
use crate::error::CliError;

pub fn run(document: &Path, config: &ConfigFile) -> Result<(), CliError> {
    let json = std::fs::read_to_string(document).map_err(|error| CliError::FileRead {
        path: document.display().to_string(),
        error,
    })?;
    let doc = RouteDocument::from_json(&json)?;

    let mut session = build_session(config)?;
    session.apply_route(&doc);

    if session.route().is_empty() {
        println!("No route (fewer than two waypoints)");
        return Ok(());
    }

    println!("Route: {} segment(s)", session.route().len());
    for (i, segment) in session.route().iter().enumerate() {
        if let Geometry::LineString { coordinates } = segment.geometry() {
            if let [[lon0, lat0], [lon1, lat1]] = coordinates.as_slice() {
                println!(
                    "  {:>3}: {:.5}, {:.5} -> {:.5}, {:.5}",
                    i + 1,
                    lat0,
                    lon0,
                    lat1,
                    lon1
                );
            }
        }
    }

    Ok(())
}
