//! Layer descriptors and renderable identity.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Stable identity token for a renderable.
///
/// Tokens are issued once when a renderable is created and are the only
/// thing the layer reconciler compares. Two handles with the same token are
/// the same layer no matter what else they contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RenderableId(u64);

impl RenderableId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RenderableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Issues unique [`RenderableId`]s.
#[derive(Debug, Default)]
pub struct IdIssuer {
    next: AtomicU64,
}

impl IdIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next unused identity.
    pub fn issue(&self) -> RenderableId {
        RenderableId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Anything that can sit in the active layer stack.
pub trait Renderable {
    /// The handle's stable identity.
    fn render_id(&self) -> RenderableId;
}

impl Renderable for RenderableId {
    fn render_id(&self) -> RenderableId {
        *self
    }
}

impl<R: Renderable + ?Sized> Renderable for std::sync::Arc<R> {
    fn render_id(&self) -> RenderableId {
        (**self).render_id()
    }
}

/// A declared layer and whether it should currently be visible.
#[derive(Debug, Clone)]
pub struct LayerDescriptor<R> {
    /// Unique layer name.
    pub name: String,
    /// Whether the layer should be in the active stack.
    pub desired_on: bool,
    /// Handle pushed onto the active stack when the layer is on.
    pub renderable: R,
}

impl<R> LayerDescriptor<R> {
    pub fn new(name: impl Into<String>, desired_on: bool, renderable: R) -> Self {
        Self {
            name: name.into(),
            desired_on,
            renderable,
        }
    }
}

/// Ordered, name-addressed set of layer descriptors.
#[derive(Debug, Clone)]
pub struct LayerOptions<R> {
    descriptors: Vec<LayerDescriptor<R>>,
}

impl<R> Default for LayerOptions<R> {
    fn default() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }
}

impl<R> LayerOptions<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a layer at the end of the list.
    pub fn push(&mut self, descriptor: LayerDescriptor<R>) {
        self.descriptors.push(descriptor);
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> &[LayerDescriptor<R>] {
        &self.descriptors
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&LayerDescriptor<R>> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Change a layer's desired visibility.
    ///
    /// Returns `false` if no layer has that name.
    pub fn set_desired(&mut self, name: &str, on: bool) -> bool {
        match self.descriptors.iter_mut().find(|d| d.name == name) {
            Some(d) => {
                d.desired_on = on;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name.as_str())
    }
}

impl<R> FromIterator<LayerDescriptor<R>> for LayerOptions<R> {
    fn from_iter<I: IntoIterator<Item = LayerDescriptor<R>>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}
