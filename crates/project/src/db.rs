//! Photo database maintenance: merge, ordering, validation.
//!
//! The database is rebuilt by scanning photo directories; records carry
//! hand-edited fields (titles, captions) that a rescan must never clobber.
//! Merging therefore only fills fields that are still unset.

use crate::model::PhotoRecord;

/// Fills unset fields of `existing` from `incoming`. Set fields win; tags
/// are only adopted when `existing` has none.
pub fn merge_photo(existing: &mut PhotoRecord, incoming: &PhotoRecord) {
    fill(&mut existing.title, &incoming.title);
    fill(&mut existing.caption, &incoming.caption);
    fill(&mut existing.thumbnail, &incoming.thumbnail);
    fill(&mut existing.preview, &incoming.preview);
    fill(&mut existing.full_size, &incoming.full_size);
    fill(&mut existing.aspect_ratio, &incoming.aspect_ratio);
    fill(&mut existing.date_taken, &incoming.date_taken);

    fill(&mut existing.location.lat, &incoming.location.lat);
    fill(&mut existing.location.lng, &incoming.location.lng);
    fill(&mut existing.location.name, &incoming.location.name);

    fill(&mut existing.metadata.camera, &incoming.metadata.camera);
    fill(&mut existing.metadata.lens, &incoming.metadata.lens);
    fill(&mut existing.metadata.focal, &incoming.metadata.focal);
    fill(&mut existing.metadata.iso, &incoming.metadata.iso);
    fill(&mut existing.metadata.aperture, &incoming.metadata.aperture);
    fill(
        &mut existing.metadata.shutter_speed,
        &incoming.metadata.shutter_speed,
    );

    if existing.tags.is_empty() {
        existing.tags = incoming.tags.clone();
    }
}

fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if slot.is_none() {
        *slot = value.clone();
    }
}

/// Merges freshly scanned records into the database by id; unknown ids are
/// appended in their incoming order.
pub fn merge_databases(db: &mut Vec<PhotoRecord>, incoming: Vec<PhotoRecord>) {
    for record in incoming {
        match db.iter_mut().find(|p| p.id == record.id) {
            Some(existing) => merge_photo(existing, &record),
            None => db.push(record),
        }
    }
}

/// Orders photos chronologically.
///
/// `date_taken` is `"YYYY/MM/DD HH:MM:SS"`, so plain string comparison is
/// chronological. Undated photos sort first (they compare as the empty key);
/// the sort is stable, so equal keys keep their database order.
pub fn sort_by_date_taken(photos: &mut [PhotoRecord]) {
    photos.sort_by(|a, b| {
        let ka = a.date_taken.as_deref().unwrap_or("");
        let kb = b.date_taken.as_deref().unwrap_or("");
        ka.cmp(kb)
    });
}

/// A non-fatal defect found in the photo database.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    EmptyId,
    DuplicateId(String),
    MissingCoordinates(String),
    BadAspectRatio(String, f64),
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::EmptyId => write!(f, "photo with empty id"),
            ValidationIssue::DuplicateId(id) => write!(f, "duplicate photo id: {id}"),
            ValidationIssue::MissingCoordinates(id) => {
                write!(f, "photo {id} has no usable coordinates")
            }
            ValidationIssue::BadAspectRatio(id, ratio) => {
                write!(f, "photo {id} has implausible aspect ratio {ratio}")
            }
        }
    }
}

/// Reports database defects without failing: the gallery tolerates all of
/// them (unlocated photos simply get no marker), but the maintainer should
/// know.
pub fn validate(photos: &[PhotoRecord]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: Vec<&str> = Vec::with_capacity(photos.len());

    for photo in photos {
        if photo.id.is_empty() {
            issues.push(ValidationIssue::EmptyId);
            continue;
        }
        if seen.contains(&photo.id.as_str()) {
            issues.push(ValidationIssue::DuplicateId(photo.id.clone()));
        } else {
            seen.push(&photo.id);
        }
        if photo.location.lng_lat().is_none() {
            issues.push(ValidationIssue::MissingCoordinates(photo.id.clone()));
        }
        if let Some(ratio) = photo.aspect_ratio
            && !(0.1..=10.0).contains(&ratio)
        {
            issues.push(ValidationIssue::BadAspectRatio(photo.id.clone(), ratio));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::{ValidationIssue, merge_databases, merge_photo, sort_by_date_taken, validate};
    use crate::model::PhotoRecord;
    use pretty_assertions::assert_eq;

    fn located(id: &str, date: Option<&str>) -> PhotoRecord {
        let mut p = PhotoRecord::new(id);
        p.location.lat = Some(10.0);
        p.location.lng = Some(20.0);
        p.date_taken = date.map(str::to_string);
        p
    }

    #[test]
    fn merge_fills_only_unset_fields() {
        let mut existing = PhotoRecord::new("1");
        existing.title = Some("A hand-written title".to_string());

        let mut incoming = PhotoRecord::new("1");
        incoming.title = Some("Scanner title".to_string());
        incoming.caption = Some("Scanner caption".to_string());
        incoming.metadata.iso = Some(200);
        incoming.tags = vec!["street".to_string()];

        merge_photo(&mut existing, &incoming);
        assert_eq!(existing.title.as_deref(), Some("A hand-written title"));
        assert_eq!(existing.caption.as_deref(), Some("Scanner caption"));
        assert_eq!(existing.metadata.iso, Some(200));
        assert_eq!(existing.tags, vec!["street".to_string()]);
    }

    #[test]
    fn merge_databases_appends_unknown_ids() {
        let mut db = vec![located("1", None)];
        merge_databases(&mut db, vec![located("1", Some("2024/01/01 00:00:00")), located("2", None)]);
        assert_eq!(db.len(), 2);
        assert_eq!(db[0].date_taken.as_deref(), Some("2024/01/01 00:00:00"));
        assert_eq!(db[1].id, "2");
    }

    #[test]
    fn sort_is_chronological_with_undated_first() {
        let mut photos = vec![
            located("late", Some("2024/06/18 16:20:00")),
            located("undated", None),
            located("early", Some("2024/01/15 08:30:00")),
        ];
        sort_by_date_taken(&mut photos);
        let ids: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["undated", "early", "late"]);
    }

    #[test]
    fn validate_reports_duplicates_and_gaps() {
        let mut unlocated = PhotoRecord::new("3");
        unlocated.aspect_ratio = Some(55.0);

        let photos = vec![located("1", None), located("1", None), unlocated];
        let issues = validate(&photos);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::DuplicateId("1".to_string()),
                ValidationIssue::MissingCoordinates("3".to_string()),
                ValidationIssue::BadAspectRatio("3".to_string(), 55.0),
            ]
        );
    }

    #[test]
    fn validate_accepts_a_clean_database() {
        let photos = vec![located("1", None), located("2", None)];
        assert!(validate(&photos).is_empty());
    }
}
