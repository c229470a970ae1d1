//! Sync desired layer visibility into the active render stack.

use crate::collection::OrderedStore;

use super::descriptor::{LayerDescriptor, Renderable, RenderableId};

/// Where a named layer currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPosition {
    /// No descriptor has this name.
    NotConfigured,
    /// Configured, but its renderable is not in the active stack.
    Inactive,
    /// Present in the active stack at this index.
    Active(usize),
}

impl LayerPosition {
    /// Integer form: `-2` not configured, `-1` inactive, else the index.
    pub fn sentinel(&self) -> i64 {
        match self {
            LayerPosition::NotConfigured => -2,
            LayerPosition::Inactive => -1,
            LayerPosition::Active(i) => *i as i64,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            LayerPosition::Active(i) => Some(*i),
            _ => None,
        }
    }
}

/// Changes made by a reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerChanges {
    pub added: usize,
    pub removed: usize,
}

/// Find a descriptor by name.
pub fn find_layer<'a, R>(
    descriptors: &'a [LayerDescriptor<R>],
    name: &str,
) -> Option<&'a LayerDescriptor<R>> {
    descriptors.iter().find(|d| d.name == name)
}

/// Locate the named layer's renderable in `stack`, matching by identity.
pub fn find_active_index<R, S>(
    descriptors: &[LayerDescriptor<R>],
    stack: &S,
    name: &str,
) -> LayerPosition
where
    R: Renderable,
    S: OrderedStore<R> + ?Sized,
{
    let Some(descriptor) = find_layer(descriptors, name) else {
        return LayerPosition::NotConfigured;
    };

    match stack_position(stack, descriptor.renderable.render_id()) {
        Some(i) => LayerPosition::Active(i),
        None => LayerPosition::Inactive,
    }
}

/// Bring `stack` in line with the descriptors' desired visibility.
///
/// Descriptors are visited in declaration order. A desired-on layer missing
/// from the stack is appended at the end; a desired-off layer present in the
/// stack is removed. Layers already in the right state are left where they
/// are, so repeated calls are no-ops and existing layers are never
/// reordered.
pub fn reconcile_layers<R, S>(descriptors: &[LayerDescriptor<R>], stack: &mut S) -> LayerChanges
where
    R: Renderable + Clone,
    S: OrderedStore<R> + ?Sized,
{
    let mut changes = LayerChanges::default();

    for descriptor in descriptors {
        let position = stack_position(stack, descriptor.renderable.render_id());

        match (descriptor.desired_on, position) {
            (true, None) => {
                stack.append(descriptor.renderable.clone());
                changes.added += 1;
                tracing::debug!(layer = %descriptor.name, "Layer on");
            }
            (false, Some(index)) => {
                stack.remove_at(index);
                changes.removed += 1;
                tracing::debug!(layer = %descriptor.name, "Layer off");
            }
            _ => {}
        }
    }

    changes
}

fn stack_position<R, S>(stack: &S, id: RenderableId) -> Option<usize>
where
    R: Renderable,
    S: OrderedStore<R> + ?Sized,
{
    (0..stack.len()).find(|&i| stack.item_at(i).is_some_and(|r| r.render_id() == id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;
    use crate::layers::IdIssuer;

    fn ids(stack: &Collection<RenderableId>) -> Vec<RenderableId> {
        stack.iter().copied().collect()
    }

    #[test]
    fn test_reconcile_twice_keeps_single_entry() {
        let issuer = IdIssuer::new();
        let r = issuer.issue();
        let descriptors = vec![LayerDescriptor::new("ais", true, r)];
        let mut stack = Collection::new();

        reconcile_layers(&descriptors, &mut stack);
        let second = reconcile_layers(&descriptors, &mut stack);

        assert_eq!(ids(&stack), vec![r]);
        assert_eq!(second, LayerChanges::default());
    }

    #[test]
    fn test_desired_off_removes_from_stack() {
        let issuer = IdIssuer::new();
        let (a, b) = (issuer.issue(), issuer.issue());
        let mut descriptors = vec![
            LayerDescriptor::new("noaa", true, a),
            LayerDescriptor::new("ais", true, b),
        ];
        let mut stack = Collection::new();
        reconcile_layers(&descriptors, &mut stack);

        descriptors[0].desired_on = false;
        let changes = reconcile_layers(&descriptors, &mut stack);

        assert_eq!(changes.removed, 1);
        assert_eq!(ids(&stack), vec![b]);
    }

    #[test]
    fn test_new_layers_append_after_existing() {
        let issuer = IdIssuer::new();
        let (a, b, c) = (issuer.issue(), issuer.issue(), issuer.issue());
        let mut descriptors = vec![
            LayerDescriptor::new("osm", false, a),
            LayerDescriptor::new("noaa", true, b),
            LayerDescriptor::new("ais", true, c),
        ];
        let mut stack = Collection::new();
        reconcile_layers(&descriptors, &mut stack);
        assert_eq!(ids(&stack), vec![b, c]);

        // Turning on a layer declared first still puts it on top.
        descriptors[0].desired_on = true;
        reconcile_layers(&descriptors, &mut stack);
        assert_eq!(ids(&stack), vec![b, c, a]);
    }

    #[test]
    fn test_matching_uses_identity_not_name() {
        let issuer = IdIssuer::new();
        let stale = issuer.issue();
        let fresh = issuer.issue();
        let descriptors = vec![LayerDescriptor::new("ais", true, fresh)];
        let mut stack: Collection<RenderableId> = vec![stale].into();

        reconcile_layers(&descriptors, &mut stack);

        assert_eq!(ids(&stack), vec![stale, fresh]);
    }

    #[test]
    fn test_find_active_index_sentinels() {
        let issuer = IdIssuer::new();
        let (a, b) = (issuer.issue(), issuer.issue());
        let descriptors = vec![
            LayerDescriptor::new("noaa", true, a),
            LayerDescriptor::new("depth", false, b),
        ];
        let mut stack = Collection::new();
        reconcile_layers(&descriptors, &mut stack);

        let noaa = find_active_index(&descriptors, &stack, "noaa");
        let depth = find_active_index(&descriptors, &stack, "depth");
        let missing = find_active_index(&descriptors, &stack, "radar");

        assert_eq!(noaa, LayerPosition::Active(0));
        assert_eq!(depth.sentinel(), -1);
        assert_eq!(missing, LayerPosition::NotConfigured);
        assert_eq!(missing.sentinel(), -2);
        assert_eq!(noaa.index(), Some(0));
    }
}
