use crate::markers::MarkerState;

/// Map camera and overlay operations the synchronizer drives.
///
/// Coordinates are [lng, lat] pairs in GeoJSON order. Implementations render
/// however they like; only start and end state of a `fly_to` matter to the
/// synchronizer.
pub trait MapBackend {
    /// Animated transition of the camera to `center` at `zoom`.
    /// `duration_ms = 0` means an immediate jump.
    fn fly_to(&mut self, center: [f64; 2], zoom: f64, duration_ms: u32);

    /// Replaces the travel-path geometry. An empty slice clears the path.
    fn set_route(&mut self, coordinates: &[[f64; 2]]);

    fn add_marker(&mut self, index: usize, position: [f64; 2]);

    fn clear_markers(&mut self);

    /// Restyles all markers; `states[i]` belongs to the marker at photo
    /// index `i`.
    fn set_marker_states(&mut self, states: &[MarkerState]);
}

/// Scrolls the photo feed. The reverse channel from map markers back to the
/// feed; scrolling here changes the active photo only through the viewport
/// observer noticing the movement.
pub trait FeedScroller {
    fn scroll_to_item(&mut self, element_id: &str);
}

/// A camera movement captured by [`RecordingMapBackend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    pub center: [f64; 2],
    pub zoom: f64,
    pub duration_ms: u32,
}

/// Records every backend call; the map stand-in for tests and headless runs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingMapBackend {
    pub camera: Vec<CameraMove>,
    pub route: Vec<[f64; 2]>,
    pub markers: Vec<(usize, [f64; 2])>,
    pub marker_states: Vec<MarkerState>,
}

impl RecordingMapBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_camera(&self) -> Option<&CameraMove> {
        self.camera.last()
    }
}

impl MapBackend for RecordingMapBackend {
    fn fly_to(&mut self, center: [f64; 2], zoom: f64, duration_ms: u32) {
        self.camera.push(CameraMove {
            center,
            zoom,
            duration_ms,
        });
    }

    fn set_route(&mut self, coordinates: &[[f64; 2]]) {
        self.route = coordinates.to_vec();
    }

    fn add_marker(&mut self, index: usize, position: [f64; 2]) {
        self.markers.push((index, position));
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn set_marker_states(&mut self, states: &[MarkerState]) {
        self.marker_states = states.to_vec();
    }
}

/// Records scroll requests; the feed stand-in for tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingScroller {
    pub requests: Vec<String>,
}

impl FeedScroller for RecordingScroller {
    fn scroll_to_item(&mut self, element_id: &str) {
        self.requests.push(element_id.to_string());
    }
}
