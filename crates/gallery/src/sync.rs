use project::PhotoRecord;

use crate::backend::{FeedScroller, MapBackend};
use crate::markers::marker_states;
use crate::path::visited_path;

/// Camera and transition settings for the synchronized map.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Zoom used when flying to the active photo.
    pub photo_zoom: f64,
    /// Zoom of the initial overview camera.
    pub overview_zoom: f64,
    pub fly_duration_ms: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            photo_zoom: 8.0,
            overview_zoom: 2.0,
            fly_duration_ms: 2000,
        }
    }
}

/// Drives a map backend from the active feed item.
///
/// Owns the backend handle for its whole lifetime; no other code touches the
/// map. `into_backend` releases the handle on teardown.
#[derive(Debug)]
pub struct MapSync<B: MapBackend> {
    backend: B,
    photos: Vec<PhotoRecord>,
    config: SyncConfig,
    /// Index last applied to the map; `None` until the first activation, so
    /// the first active photo always moves the camera even at index 0.
    applied: Option<usize>,
}

impl<B: MapBackend> MapSync<B> {
    pub fn new(backend: B, photos: Vec<PhotoRecord>) -> Self {
        Self::with_config(backend, photos, SyncConfig::default())
    }

    pub fn with_config(backend: B, photos: Vec<PhotoRecord>, config: SyncConfig) -> Self {
        Self {
            backend,
            photos,
            config,
            applied: None,
        }
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    /// Index of the photo the map currently presents; 0 before any
    /// activation. Always in range for a non-empty photo list.
    pub fn current_index(&self) -> usize {
        self.applied.unwrap_or(0)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Places one marker per located photo and centers the overview camera
    /// on the first photo, or on a neutral origin for an empty list.
    pub fn initialize(&mut self) {
        self.backend.clear_markers();
        for (index, photo) in self.photos.iter().enumerate() {
            if let Some(position) = photo.location.lng_lat() {
                self.backend.add_marker(index, position);
            }
        }

        let center = self
            .photos
            .first()
            .and_then(|p| p.location.lng_lat())
            .unwrap_or([0.0, 0.0]);
        self.backend.fly_to(center, self.config.overview_zoom, 0);
        self.backend
            .set_marker_states(&marker_states(self.photos.len(), 0));
    }

    /// Recomputes the derived map state for a new active feed item.
    ///
    /// The id may be a raw photo id or a feed element id; ids not in the
    /// photo list (and `None`) resolve to index 0. Returns `true` when the
    /// resolved index changed and the map was updated.
    pub fn set_active_id(&mut self, active_id: Option<&str>) -> bool {
        let index = active_id.and_then(|id| self.photo_index(id)).unwrap_or(0);
        if self.applied == Some(index) {
            return false;
        }
        self.applied = Some(index);
        self.apply(index);
        true
    }

    fn photo_index(&self, id: &str) -> Option<usize> {
        self.photos
            .iter()
            .position(|p| p.id == id || p.element_id() == id)
    }

    fn apply(&mut self, index: usize) {
        if let Some(photo) = self.photos.get(index)
            && let Some(center) = photo.location.lng_lat()
        {
            self.backend
                .fly_to(center, self.config.photo_zoom, self.config.fly_duration_ms);
        }
        self.backend.set_route(&visited_path(&self.photos, index));
        self.backend
            .set_marker_states(&marker_states(self.photos.len(), index));
    }

    /// Back-channel for a marker click: asks the feed to scroll the photo's
    /// card into view. Does not change the active photo itself; that happens
    /// only once the observer sees the resulting scroll.
    pub fn marker_clicked(&self, index: usize, scroller: &mut dyn FeedScroller) {
        if let Some(photo) = self.photos.get(index) {
            scroller.scroll_to_item(&photo.element_id());
        }
    }
}
