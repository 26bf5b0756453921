//! Filename and extension derivation from URLs.

/// Extracts the last path segment from a URL.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    last_segment(&parsed)
}

fn last_segment(parsed: &url::Url) -> Option<String> {
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Last segment of a string that `url` could not parse: split on `/` and `\`,
/// query and fragment dropped.
fn filename_from_raw(url: &str) -> Option<String> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let segment = url[..end].rsplit(['/', '\\']).next()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Extension of a file name including the leading dot (`"a.tar.gz"` -> `".gz"`).
///
/// Leading dots do not start an extension (`".bashrc"` -> `""`), and a
/// trailing dot yields nothing.
pub fn extension_of(name: &str) -> &str {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(i) if i > 0 && stem_start + i + 1 < name.len() => &name[stem_start + i..],
        _ => "",
    }
}

/// Suffix to give a temp file holding the resource at `url`: the extension of
/// the URL path's last segment, or `""` when there is none.
///
/// # Examples
///
/// - `extension_from_url("http://example.com/a.json")` → `".json"`
/// - `extension_from_url("https://example.com/file.zip?token=abc")` → `".zip"`
/// - `extension_from_url("https://example.com/")` → `""`
pub fn extension_from_url(url: &str) -> String {
    let name = match url::Url::parse(url) {
        Ok(parsed) => last_segment(&parsed),
        Err(_) => filename_from_raw(url),
    };
    name.map(|n| extension_of(&n).to_string()).unwrap_or_default()
}
