//! Bridges the synchronizer to the host page: the JS map on one side, the
//! DOM feed on the other.

use gallery::{FeedScroller, MapBackend, MarkerState};
use wasm_bindgen::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = mapFlyTo)]
    fn map_fly_to(lng: f64, lat: f64, zoom: f64, duration_ms: u32);

    #[wasm_bindgen(js_name = mapSetRoute)]
    fn map_set_route(coordinates_json: &str);

    #[wasm_bindgen(js_name = mapAddMarker)]
    fn map_add_marker(index: u32, lng: f64, lat: f64);

    #[wasm_bindgen(js_name = mapClearMarkers)]
    fn map_clear_markers();

    #[wasm_bindgen(js_name = mapSetMarkerStates)]
    fn map_set_marker_states(states_json: &str);
}

/// [`MapBackend`] over the host page's map functions. Route coordinates and
/// marker states cross the boundary as JSON.
#[derive(Debug, Default)]
pub struct JsMapBackend;

impl MapBackend for JsMapBackend {
    fn fly_to(&mut self, center: [f64; 2], zoom: f64, duration_ms: u32) {
        map_fly_to(center[0], center[1], zoom, duration_ms);
    }

    fn set_route(&mut self, coordinates: &[[f64; 2]]) {
        match serde_json::to_string(coordinates) {
            Ok(payload) => map_set_route(&payload),
            Err(err) => web_sys::console::error_1(&JsValue::from_str(&format!(
                "route encode failed: {err}"
            ))),
        }
    }

    fn add_marker(&mut self, index: usize, position: [f64; 2]) {
        map_add_marker(index as u32, position[0], position[1]);
    }

    fn clear_markers(&mut self) {
        map_clear_markers();
    }

    fn set_marker_states(&mut self, states: &[MarkerState]) {
        let labels: Vec<&str> = states.iter().map(MarkerState::as_str).collect();
        match serde_json::to_string(&labels) {
            Ok(payload) => map_set_marker_states(&payload),
            Err(err) => web_sys::console::error_1(&JsValue::from_str(&format!(
                "marker state encode failed: {err}"
            ))),
        }
    }
}

/// Scrolls feed cards into view, centered, with smooth behavior.
#[derive(Debug, Default)]
pub struct DomFeedScroller;

impl FeedScroller for DomFeedScroller {
    fn scroll_to_item(&mut self, element_id: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(element) = document.get_element_by_id(element_id) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
