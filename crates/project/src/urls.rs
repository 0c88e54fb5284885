use crate::model::ProjectData;

/// Resolves the photo asset fields of a project against its `base_url`.
///
/// Relative paths are joined with the base; absolute URLs and data URIs pass
/// through untouched. Without a `base_url` this is a no-op.
pub fn resolve_photo_urls(project: &mut ProjectData) {
    let Some(base) = project.base_url.clone() else {
        return;
    };
    let base = base.trim_end_matches('/');

    for photo in &mut project.photos {
        for field in [
            &mut photo.thumbnail,
            &mut photo.preview,
            &mut photo.full_size,
        ] {
            if let Some(url) = field.as_mut()
                && !is_absolute_url(url)
            {
                *url = join_url(base, url);
            }
        }
    }
}

pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:")
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}
