//! Show the reconciled chart layer stack.

use chartplotter::config::ConfigFile;
use chartplotter::layers::{find_active_index, LayerPosition, LayerSource};

use super::common::build_session;
use crate::error::CliError;

/// Apply `off` then `on` on top of the configured visibility and print
/// every layer with its position in the active stack.
pub fn run(on: &[String], off: &[String], config: &ConfigFile) -> Result<(), CliError> {
    let mut session = build_session(config)?;

    for name in off {
        session
            .set_layer(name, false)
            .ok_or_else(|| CliError::UnknownLayer(name.clone()))?;
    }
    for name in on {
        session
            .set_layer(name, true)
            .ok_or_else(|| CliError::UnknownLayer(name.clone()))?;
    }

    let descriptors = session.layer_options().descriptors();
    println!("{:<16} {:<7} {:<6} SOURCE", "LAYER", "STATE", "INDEX");
    for descriptor in descriptors {
        let position = find_active_index(descriptors, session.active_layers(), &descriptor.name);
        let (state, index) = match position {
            LayerPosition::Active(i) => ("on", i.to_string()),
            LayerPosition::Inactive => ("off", "-".to_string()),
            LayerPosition::NotConfigured => continue,
        };
        let source = match &descriptor.renderable.source {
            LayerSource::Xyz { url, .. } => format!("xyz {}", url),
            LayerSource::Wms { url, .. } => format!("wms {}", url),
            LayerSource::Features(set) => format!("features {:?}", set).to_lowercase(),
        };
        println!("{:<16} {:<7} {:<6} {}", descriptor.name, state, index, source);
    }

    Ok(())
}
