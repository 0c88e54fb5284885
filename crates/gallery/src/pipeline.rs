use feed::{ObservationEntry, ScrollSpy, Subscribers, SubscriptionId};
use project::PhotoRecord;

use crate::backend::{FeedScroller, MapBackend};
use crate::sync::{MapSync, SyncConfig};

/// Payload pushed to gallery listeners when the active photo changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    /// Feed element id of the newly active card.
    pub active_id: String,
    /// Its position in the photo list.
    pub index: usize,
}

/// One gallery instance: the active-item resolver and the map synchronizer
/// wired together. Observation batches flow in, map updates and listener
/// notifications flow out.
///
/// Each gallery owns its own resolver/synchronizer pair; independent
/// galleries share nothing.
pub struct Gallery<B: MapBackend> {
    spy: ScrollSpy,
    sync: MapSync<B>,
    subscribers: Subscribers<ActiveChange>,
}

impl<B: MapBackend> Gallery<B> {
    pub fn new(backend: B, photos: Vec<PhotoRecord>) -> Self {
        Self::with_config(backend, photos, SyncConfig::default())
    }

    pub fn with_config(backend: B, photos: Vec<PhotoRecord>, config: SyncConfig) -> Self {
        Self {
            spy: ScrollSpy::new(),
            sync: MapSync::with_config(backend, photos, config),
            subscribers: Subscribers::new(),
        }
    }

    /// Sets up markers and the overview camera.
    pub fn initialize(&mut self) {
        self.sync.initialize();
    }

    /// Feed element ids the viewport observer should watch, in feed order.
    pub fn watched_ids(&self) -> Vec<String> {
        self.sync.photos().iter().map(|p| p.element_id()).collect()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.spy.active_id()
    }

    pub fn current_index(&self) -> usize {
        self.sync.current_index()
    }

    pub fn sync(&self) -> &MapSync<B> {
        &self.sync
    }

    /// Registers a listener for active-photo changes (feed card highlight,
    /// info overlays). Listeners fire after the map has been updated.
    pub fn subscribe(&mut self, listener: impl FnMut(&ActiveChange) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Feeds one observer callback's worth of entries through the pipeline.
    ///
    /// Returns the new current index when the active photo changed, `None`
    /// otherwise (including after `close`).
    pub fn handle_observations(&mut self, batch: &[ObservationEntry]) -> Option<usize> {
        let active = self.spy.apply_batch(batch)?;
        if !self.sync.set_active_id(Some(&active)) {
            return None;
        }
        let change = ActiveChange {
            active_id: active,
            index: self.sync.current_index(),
        };
        self.subscribers.notify(&change);
        Some(change.index)
    }

    /// Back-channel for a marker click; see [`MapSync::marker_clicked`].
    pub fn marker_clicked(&self, index: usize, scroller: &mut dyn FeedScroller) {
        self.sync.marker_clicked(index, scroller);
    }

    /// Stops the resolver. Late observation batches are dropped; idempotent.
    pub fn close(&mut self) {
        self.spy.close();
    }

    pub fn is_closed(&self) -> bool {
        self.spy.is_closed()
    }

    /// Releases the map handle on teardown.
    pub fn into_backend(self) -> B {
        self.sync.into_backend()
    }
}

impl<B: MapBackend + std::fmt::Debug> std::fmt::Debug for Gallery<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("spy", &self.spy)
            .field("sync", &self.sync)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}
