//! Replay recorded AIS snapshots through the reconciler.

use std::path::Path;

use chartplotter::ais::LiveSnapshot;
use chartplotter::config::ConfigFile;

use super::common::{build_session, read_json};
use crate::error::CliError;

/// Apply each snapshot in `snapshots` in order and print the live vessels
/// after every tick.
pub fn run(snapshots: &Path, config: &ConfigFile) -> Result<(), CliError> {
    let ticks: Vec<LiveSnapshot> = read_json(snapshots)?;
    let mut session = build_session(config)?;

    for (tick, snapshot) in ticks.iter().enumerate() {
        let stats = session.apply_ais(snapshot);

        println!(
            "Tick {}: +{} ~{} -{} ({} skipped)",
            tick + 1,
            stats.added,
            stats.updated,
            stats.removed,
            stats.skipped
        );
        for vessel in session.ais().iter() {
            let mmsi = vessel.identity_key().unwrap_or("?");
            match (vessel.position(), vessel.heading()) {
                (Some([lon, lat]), Some(heading)) => {
                    println!("  {}  {:.5}, {:.5}  {:.0}°", mmsi, lat, lon, heading)
                }
                (Some([lon, lat]), None) => println!("  {}  {:.5}, {:.5}", mmsi, lat, lon),
                (None, _) => println!("  {}", mmsi),
            }
        }
    }

    Ok(())
}
