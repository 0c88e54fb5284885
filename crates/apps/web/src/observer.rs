//! IntersectionObserver wiring for the photo feed.

use std::cell::Cell;
use std::rc::Rc;

use feed::{ObservationEntry, ObserverConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

/// Watches feed elements against a scrollable root and forwards each browser
/// callback's entries as one batch.
///
/// Ids whose DOM element does not exist yet are skipped silently; a later
/// `rewatch` picks them up once rendered.
pub struct IntersectionWatcher {
    observer: IntersectionObserver,
    // Kept alive for the observer's lifetime; dropping it would invalidate
    // the browser-side callback.
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    watched: Vec<String>,
    closed: Rc<Cell<bool>>,
}

impl IntersectionWatcher {
    /// `root` is the scrollable feed container; `on_batch` receives all
    /// entries of one observer callback at once.
    pub fn new(
        root: &Element,
        config: &ObserverConfig,
        mut on_batch: impl FnMut(Vec<ObservationEntry>) + 'static,
    ) -> Result<Self, JsValue> {
        let closed = Rc::new(Cell::new(false));

        let closed_flag = closed.clone();
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                // A callback already queued when the watcher was torn down
                // must not reach the resolver.
                if closed_flag.get() {
                    return;
                }
                let batch: Vec<ObservationEntry> = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| {
                        let id = entry.target().id();
                        if entry.is_intersecting() {
                            ObservationEntry::enter(id, entry.intersection_ratio())
                        } else {
                            ObservationEntry::leave(id)
                        }
                    })
                    .collect();
                if !batch.is_empty() {
                    on_batch(batch);
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root(Some(root));
        options.set_root_margin(&config.root_margin());
        let thresholds = js_sys::Array::new();
        for t in &config.thresholds {
            thresholds.push(&JsValue::from_f64(*t));
        }
        options.set_threshold(&thresholds.into());

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            _callback: callback,
            watched: Vec::new(),
            closed,
        })
    }

    /// Aligns observation with `ids`: elements no longer in the set stop
    /// being watched, new ones are watched from their current state.
    pub fn rewatch(&mut self, ids: &[String]) {
        if self.closed.get() {
            return;
        }
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let observer = &self.observer;
        self.watched.retain(|id| {
            if ids.iter().any(|n| n == id) {
                return true;
            }
            if let Some(element) = document.get_element_by_id(id) {
                observer.unobserve(&element);
            }
            false
        });

        for id in ids {
            if self.watched.iter().any(|w| w == id) {
                continue;
            }
            // Render timing: the card may not be in the DOM yet.
            let Some(element) = document.get_element_by_id(id) else {
                continue;
            };
            self.observer.observe(&element);
            self.watched.push(id.clone());
        }
    }

    pub fn watched_len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Stops all observation. Safe to call more than once; once closed the
    /// watcher stays closed.
    pub fn disconnect(&mut self) {
        if self.closed.get() {
            return;
        }
        self.closed.set(true);
        self.observer.disconnect();
        self.watched.clear();
    }
}

impl Drop for IntersectionWatcher {
    fn drop(&mut self) {
        self.disconnect();
    }
}
