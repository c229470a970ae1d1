//! AIS vessel tracking.
//!
//! The device's AIS sensor reports every vessel it currently hears. Each
//! polling tick the snapshot is reconciled into the AIS feature collection:
//! known vessels move, new ones appear and vessels missing from the feed
//! disappear.
//!
//! # Example
//!
//! ```
//! use chartplotter::ais::{reconcile_ais, LiveSnapshot, VesselReport};
//! use chartplotter::collection::{Collection, OrderedStore};
//!
//! let mut vessels = Collection::new();
//! let snapshot = LiveSnapshot::new()
//!     .with_vessel("367000001", VesselReport::new(42.35, -71.05, Some(180.0)));
//!
//! reconcile_ais(&mut vessels, &snapshot);
//! assert_eq!(vessels.len(), 1);
//! ```

mod reconciler;
mod snapshot;

pub use reconciler::{reconcile_ais, ReconcileStats};
pub use snapshot::{LiveSnapshot, VesselReport};
