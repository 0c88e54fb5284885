use crate::observation::ObservationEntry;

/// One currently intersecting feed item.
#[derive(Debug, Clone, PartialEq)]
struct VisibleItem {
    id: String,
    ratio: f64,
    /// Monotonic recency stamp; refreshed on every intersecting entry.
    seq: u64,
}

/// Reduces viewport observation batches to the single active feed item.
///
/// Invariants:
/// - An id is tracked iff its most recent entry had `is_intersecting = true`.
/// - The active id is the tracked item with the highest ratio; equal ratios
///   prefer the most recently signaled item.
/// - The active id is sticky: once set it is never cleared, even when every
///   item leaves the viewport mid-scroll. Reverting to "no active item"
///   would snap the map back to the first photo.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    visible: Vec<VisibleItem>,
    active: Option<String>,
    next_seq: u64,
    closed: bool,
}

impl ScrollSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_ratio(&self, item_id: &str) -> Option<f64> {
        self.visible.iter().find(|v| v.id == item_id).map(|v| v.ratio)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Stops the spy. Later batches are ignored; calling this again is a
    /// no-op.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Applies one observer callback's worth of entries and recomputes the
    /// active id exactly once for the whole batch, so multiple items changing
    /// in the same frame cannot produce transient actives.
    ///
    /// Returns the new active id when it changed, `None` otherwise.
    pub fn apply_batch(&mut self, entries: &[ObservationEntry]) -> Option<String> {
        if self.closed || entries.is_empty() {
            return None;
        }

        for entry in entries {
            if entry.is_intersecting {
                self.upsert(&entry.item_id, entry.ratio);
            } else {
                self.visible.retain(|v| v.id != entry.item_id);
            }
        }

        let best = self
            .visible
            .iter()
            .max_by(|a, b| {
                a.ratio
                    .partial_cmp(&b.ratio)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|v| v.id.clone());

        match best {
            Some(id) if self.active.as_deref() != Some(id.as_str()) => {
                self.active = Some(id.clone());
                Some(id)
            }
            // No candidate (set emptied): hold the last known active id.
            _ => None,
        }
    }

    fn upsert(&mut self, id: &str, ratio: f64) {
        self.next_seq += 1;
        let seq = self.next_seq;
        match self.visible.iter_mut().find(|v| v.id == id) {
            Some(item) => {
                item.ratio = ratio;
                item.seq = seq;
            }
            None => self.visible.push(VisibleItem {
                id: id.to_string(),
                ratio,
                seq,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollSpy;
    use crate::observation::ObservationEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn active_is_null_before_any_intersection() {
        let mut spy = ScrollSpy::new();
        assert_eq!(spy.active_id(), None);

        // A batch of pure departures changes nothing.
        assert_eq!(spy.apply_batch(&[ObservationEntry::leave("a")]), None);
        assert_eq!(spy.active_id(), None);
    }

    #[test]
    fn first_intersecting_item_becomes_active() {
        let mut spy = ScrollSpy::new();
        let changed = spy.apply_batch(&[ObservationEntry::enter("a", 0.8)]);
        assert_eq!(changed.as_deref(), Some("a"));
        assert_eq!(spy.active_id(), Some("a"));
    }

    #[test]
    fn highest_ratio_wins() {
        let mut spy = ScrollSpy::new();
        spy.apply_batch(&[ObservationEntry::enter("a", 0.8)]);
        let changed = spy.apply_batch(&[
            ObservationEntry::enter("b", 0.5),
            ObservationEntry::enter("a", 0.3),
        ]);
        assert_eq!(changed.as_deref(), Some("b"));
        assert_eq!(spy.visible_ratio("a"), Some(0.3));
        assert_eq!(spy.visible_ratio("b"), Some(0.5));
    }

    #[test]
    fn equal_ratio_tie_breaks_to_most_recent() {
        let mut spy = ScrollSpy::new();
        let changed = spy.apply_batch(&[
            ObservationEntry::enter("a", 0.5),
            ObservationEntry::enter("b", 0.5),
        ]);
        assert_eq!(changed.as_deref(), Some("b"));

        // A re-signaled intersection counts as the most recent again.
        let changed = spy.apply_batch(&[ObservationEntry::enter("a", 0.5)]);
        assert_eq!(changed.as_deref(), Some("a"));
    }

    #[test]
    fn active_is_sticky_when_all_items_leave() {
        let mut spy = ScrollSpy::new();
        spy.apply_batch(&[ObservationEntry::enter("b", 0.6)]);
        let changed = spy.apply_batch(&[ObservationEntry::leave("b")]);
        assert_eq!(changed, None);
        assert_eq!(spy.active_id(), Some("b"));
        assert_eq!(spy.visible_len(), 0);
    }

    #[test]
    fn batch_is_reduced_once_not_per_entry() {
        let mut spy = ScrollSpy::new();
        // "a" is only transiently the best item inside the batch; the single
        // recomputation must never surface it.
        let changed = spy.apply_batch(&[
            ObservationEntry::enter("a", 0.9),
            ObservationEntry::leave("a"),
            ObservationEntry::enter("b", 0.4),
        ]);
        assert_eq!(changed.as_deref(), Some("b"));
        assert_eq!(spy.active_id(), Some("b"));
    }

    #[test]
    fn unchanged_active_reports_no_change() {
        let mut spy = ScrollSpy::new();
        spy.apply_batch(&[ObservationEntry::enter("a", 0.8)]);
        let changed = spy.apply_batch(&[ObservationEntry::enter("a", 0.9)]);
        assert_eq!(changed, None);
        assert_eq!(spy.active_id(), Some("a"));
    }

    #[test]
    fn closed_spy_ignores_late_batches() {
        let mut spy = ScrollSpy::new();
        spy.apply_batch(&[ObservationEntry::enter("a", 0.8)]);
        spy.close();
        spy.close();

        let changed = spy.apply_batch(&[ObservationEntry::enter("b", 1.0)]);
        assert_eq!(changed, None);
        assert_eq!(spy.active_id(), Some("a"));
        assert_eq!(spy.visible_len(), 1);
    }
}
