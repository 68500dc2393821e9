//! Display-name derivation from an archive entry path.

const SEPARATOR: char = '/';

/// Derives a display name from an entry path: extension stripped, directories dropped.
///
/// Purely syntactic. `"cvs/Jane Doe.pdf"` → `"Jane Doe"`, `"resume.docx"` → `"resume"`.
pub fn derive_name(path: &str) -> String {
    let stem = strip_extension(path);
    match stem.rsplit_once(SEPARATOR) {
        Some((_, last)) => last.replace(SEPARATOR, " "),
        None => stem.to_string(),
    }
}

/// Drops the final `.ext` of the last path component.
///
/// Leading dots of the component do not start an extension, so `".profile"` is kept whole.
fn strip_extension(path: &str) -> &str {
    let component_start = path.rfind(SEPARATOR).map(|i| i + 1).unwrap_or(0);
    let component = &path[component_start..];
    let leading_dots = component.len() - component.trim_start_matches('.').len();

    match component[leading_dots..].rfind('.') {
        Some(dot) => &path[..component_start + leading_dots + dot],
        None => path,
    }
}
