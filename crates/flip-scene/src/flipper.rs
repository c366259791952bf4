//! One container's flip state in a single owner.
//!
//! [`Flipper`] keeps the cached snapshot, the registry and the cycle
//! defaults together, which is how a component normally uses the driver:
//! record before a state change, animate after it, tick every frame.

use crate::animation::events::FlipEventHandler;
use crate::config::AnimationDefaults;
use crate::driver::{self, AnimateMove, FlipRegistry};
use crate::host::FlipHost;
use crate::snapshot::{SnapshotMap, capture_snapshot};

#[derive(Debug)]
pub struct Flipper<E> {
    container: E,
    cached: SnapshotMap,
    registry: FlipRegistry<E>,
    defaults: AnimationDefaults,
}

impl<E: Clone> Flipper<E> {
    pub fn new(container: E, defaults: AnimationDefaults) -> Self {
        Self {
            container,
            cached: SnapshotMap::new(),
            registry: FlipRegistry::new(),
            defaults,
        }
    }

    /// Take the "First" snapshot.
    pub fn record<H>(&mut self, host: &H)
    where
        H: FlipHost<Element = E>,
    {
        self.cached = capture_snapshot(host, &self.container);
    }

    /// Animate from the cached snapshot to the current layout, then cache the
    /// current layout for the next cycle.
    pub fn animate<H, F>(&mut self, host: &mut H, handler: &mut F)
    where
        H: FlipHost<Element = E>,
        F: FlipEventHandler<E> + ?Sized,
    {
        self.cached = driver::animate_move(
            host,
            &mut self.registry,
            handler,
            AnimateMove {
                container: &self.container,
                cached: &self.cached,
                defaults: self.defaults,
            },
        );
    }

    pub fn tick<H, F>(&mut self, host: &mut H, handler: &mut F, delta_ms: f32)
    where
        H: FlipHost<Element = E>,
        F: FlipEventHandler<E> + ?Sized,
    {
        driver::tick(host, &mut self.registry, handler, delta_ms);
    }

    pub fn has_pending_work(&self) -> bool {
        self.registry.has_pending_work()
    }

    pub fn registry(&self) -> &FlipRegistry<E> {
        &self.registry
    }

    pub fn cached(&self) -> &SnapshotMap {
        &self.cached
    }

    pub fn container(&self) -> &E {
        &self.container
    }

    pub fn defaults(&self) -> AnimationDefaults {
        self.defaults
    }

    pub fn set_defaults(&mut self, defaults: AnimationDefaults) {
        self.defaults = defaults;
    }
}

static_assertions::assert_impl_all!(Flipper<crate::memory::NodeId>: Send);
