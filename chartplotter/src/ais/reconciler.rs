//! Sync a live AIS snapshot into a feature store.

use std::collections::HashSet;

use crate::collection::OrderedStore;
use crate::feature::{self, Entity, EntityKind, Geometry};

use super::snapshot::LiveSnapshot;

/// Counts from a single reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Vessels created this pass.
    pub added: usize,
    /// Existing vessels moved to their new position.
    pub updated: usize,
    /// Stale vessels removed.
    pub removed: usize,
    /// Snapshot entries ignored as malformed.
    pub skipped: usize,
}

/// Bring `store` in line with `snapshot`.
///
/// For every well-formed report the matching vessel (by MMSI) is moved to
/// the reported position, or a new vessel is appended. Afterwards every
/// vessel whose MMSI was not well-formed in this snapshot is removed, so
/// the store's vessel identities equal the snapshot's valid keys.
///
/// Heading is only taken from the report when a vessel is first created;
/// updates move the vessel but leave its heading untouched.
///
/// Non-vessel entities in the store are never touched. Lookup is a linear
/// scan per key, which is fine for the tens of vessels a receiver sees.
pub fn reconcile_ais<S>(store: &mut S, snapshot: &LiveSnapshot) -> ReconcileStats
where
    S: OrderedStore<Entity> + ?Sized,
{
    let mut stats = ReconcileStats::default();
    let mut good: HashSet<&str> = HashSet::with_capacity(snapshot.len());

    for (mmsi, report) in snapshot.iter() {
        let Some(report) = report else {
            stats.skipped += 1;
            continue;
        };
        let Some((lat, lon)) = report.lat_lon() else {
            stats.skipped += 1;
            continue;
        };

        good.insert(mmsi);
        let coordinates = [lon, lat];

        match find_vessel(store, mmsi) {
            Some(index) => {
                if let Some(existing) = store.item_at_mut(index) {
                    existing.set_geometry(Geometry::point(coordinates));
                    stats.updated += 1;
                }
            }
            None => {
                store.append(feature::vessel(mmsi, coordinates, report.heading_deg()));
                stats.added += 1;
            }
        }
    }

    let mut i = 0;
    while i < store.len() {
        let stale = store.item_at(i).is_some_and(|e| {
            e.kind() == EntityKind::Vessel
                && !e.identity_key().is_some_and(|key| good.contains(key))
        });
        if stale {
            store.remove_at(i);
            stats.removed += 1;
        } else {
            i += 1;
        }
    }

    tracing::debug!(
        added = stats.added,
        updated = stats.updated,
        removed = stats.removed,
        skipped = stats.skipped,
        vessels = store.len(),
        "AIS reconciled"
    );

    stats
}

fn find_vessel<S>(store: &S, mmsi: &str) -> Option<usize>
where
    S: OrderedStore<Entity> + ?Sized,
{
    (0..store.len()).find(|&i| {
        store.item_at(i).is_some_and(|e| {
            e.kind() == EntityKind::Vessel && e.identity_key() == Some(mmsi)
        })
    })
}
