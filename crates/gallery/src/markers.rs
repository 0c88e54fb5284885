/// Presentation state of a map marker relative to the active photo.
///
/// A pure function of index comparison, not a transition system.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerState {
    Visited,
    Current,
    Upcoming,
}

impl MarkerState {
    /// Stable label, usable as a CSS class on the marker element.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerState::Visited => "visited",
            MarkerState::Current => "current",
            MarkerState::Upcoming => "upcoming",
        }
    }
}

pub fn marker_state(index: usize, current_index: usize) -> MarkerState {
    use std::cmp::Ordering;
    match index.cmp(&current_index) {
        Ordering::Less => MarkerState::Visited,
        Ordering::Equal => MarkerState::Current,
        Ordering::Greater => MarkerState::Upcoming,
    }
}

/// Marker states for all `len` photos given the active index.
pub fn marker_states(len: usize, current_index: usize) -> Vec<MarkerState> {
    (0..len).map(|i| marker_state(i, current_index)).collect()
}

#[cfg(test)]
mod tests {
    use super::{MarkerState, marker_states};
    use pretty_assertions::assert_eq;

    #[test]
    fn states_split_around_the_current_index() {
        assert_eq!(
            marker_states(4, 2),
            vec![
                MarkerState::Visited,
                MarkerState::Visited,
                MarkerState::Current,
                MarkerState::Upcoming,
            ]
        );
    }

    #[test]
    fn first_photo_active_leaves_nothing_visited() {
        assert_eq!(
            marker_states(3, 0),
            vec![
                MarkerState::Current,
                MarkerState::Upcoming,
                MarkerState::Upcoming,
            ]
        );
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(MarkerState::Visited.as_str(), "visited");
        assert_eq!(MarkerState::Current.as_str(), "current");
        assert_eq!(MarkerState::Upcoming.as_str(), "upcoming");
    }
}
