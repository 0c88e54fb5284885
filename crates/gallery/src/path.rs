use project::PhotoRecord;

/// Route geometry through all photos visited so far, as [lng, lat] pairs.
///
/// Covers photos `0..=current_index`. A single point draws no line, so an
/// active first photo yields an empty path. Photos without coordinates are
/// skipped; `current_index` past the end is clamped.
pub fn visited_path(photos: &[PhotoRecord], current_index: usize) -> Vec<[f64; 2]> {
    if photos.is_empty() || current_index == 0 {
        return Vec::new();
    }

    let end = current_index.min(photos.len() - 1);
    photos[..=end]
        .iter()
        .filter_map(|p| p.location.lng_lat())
        .collect()
}
