//! Wasm entry point for the synchronized photo gallery.
//!
//! The host page provides the feed markup and the map functions (see
//! `map_bridge`); this crate fetches the project database, wires the
//! IntersectionObserver to the resolver, and drives the map.

mod map_bridge;
mod observer;

use std::cell::RefCell;
use std::rc::Rc;

use feed::ObserverConfig;
use gallery::Gallery;
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;

use map_bridge::{DomFeedScroller, JsMapBackend};
use observer::IntersectionWatcher;
use project::ProjectData;

thread_local! {
    static APP: RefCell<Option<GalleryApp>> = const { RefCell::new(None) };
}

struct GalleryApp {
    gallery: Rc<RefCell<Gallery<JsMapBackend>>>,
    watcher: IntersectionWatcher,
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = feedActiveChanged)]
    fn feed_active_changed(active_id: &str, index: u32);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Fetches `{base_url}/db.json` and starts the gallery against the feed
/// container `feed_id`.
///
/// A fetch or decode failure rejects the returned promise and the gallery
/// simply does not start; retries are the host page's business.
#[wasm_bindgen]
pub async fn gallery_start(base_url: String, feed_id: String) -> Result<(), JsValue> {
    let url = format!("{}/db.json", base_url.trim_end_matches('/'));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&format!("project fetch failed: {e}")))?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "project fetch failed: HTTP {}",
            response.status()
        )));
    }
    let raw = response
        .text()
        .await
        .map_err(|e| JsValue::from_str(&format!("project read failed: {e}")))?;

    let mut data =
        ProjectData::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if data.base_url.is_none() {
        data.base_url = Some(base_url);
    }
    project::resolve_photo_urls(&mut data);

    gallery_init(&feed_id, data)
}

fn gallery_init(feed_id: &str, data: ProjectData) -> Result<(), JsValue> {
    // A previous instance (hot reload, project switch) must be fully torn
    // down before the new observer attaches.
    gallery_stop();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let root = document
        .get_element_by_id(feed_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing feed container #{feed_id}")))?;

    let photo_count = data.photos.len();
    let mut inner = Gallery::new(JsMapBackend, data.photos);
    inner.initialize();
    inner.subscribe(|change| feed_active_changed(&change.active_id, change.index as u32));
    let watched = inner.watched_ids();

    let gallery = Rc::new(RefCell::new(inner));
    let sink = gallery.clone();
    let mut watcher =
        IntersectionWatcher::new(&root, &ObserverConfig::default(), move |batch| {
            sink.borrow_mut().handle_observations(&batch);
        })?;
    watcher.rewatch(&watched);

    web_sys::console::log_1(&JsValue::from_str(&format!(
        "gallery started: {photo_count} photos, {} cards watched",
        watcher.watched_len()
    )));

    APP.with(|slot| {
        *slot.borrow_mut() = Some(GalleryApp { gallery, watcher });
    });
    Ok(())
}

/// Marker click from the host page: scrolls the feed to the photo at
/// `index`. The active photo follows via the observer, not directly.
#[wasm_bindgen]
pub fn gallery_marker_clicked(index: u32) {
    APP.with(|slot| {
        if let Some(app) = slot.borrow().as_ref() {
            app.gallery
                .borrow()
                .marker_clicked(index as usize, &mut DomFeedScroller);
        }
    });
}

/// Re-runs element lookup after the feed re-renders; cards that were missing
/// from the DOM at start are picked up here.
#[wasm_bindgen]
pub fn gallery_refresh_watched() {
    APP.with(|slot| {
        if let Some(app) = slot.borrow_mut().as_mut() {
            let watched = app.gallery.borrow().watched_ids();
            app.watcher.rewatch(&watched);
        }
    });
}

/// Current photo index for the host page (info overlay, card highlight).
#[wasm_bindgen]
pub fn gallery_current_index() -> u32 {
    APP.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|app| app.gallery.borrow().current_index() as u32)
            .unwrap_or(0)
    })
}

/// Tears the gallery down. Idempotent; observer callbacks already queued
/// are dropped instead of reaching the closed resolver.
#[wasm_bindgen]
pub fn gallery_stop() {
    APP.with(|slot| {
        if let Some(mut app) = slot.borrow_mut().take() {
            app.watcher.disconnect();
            app.gallery.borrow_mut().close();
        }
    });
}
