use std::path::{Path, PathBuf};

/// Returns true if this path consists of a single file name component (no
/// directory separators). Used to decide whether stripping a matcher's root
/// prefix from a candidate path would accidentally eat into the file name
/// itself.
pub(crate) fn is_file_name<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.file_name().map_or(false, |name| path.as_os_str() == name)
}

/// Strips `prefix` from `path`, treating both as plain strings rather than
/// `Path` components, which lets a bare "./" prefix be stripped even on
/// platforms where it wouldn't otherwise be treated as a meaningful path
/// component.
pub(crate) fn strip_prefix<'a, P: AsRef<Path> + ?Sized>(
    prefix: &str,
    path: &'a P,
) -> Option<&'a Path> {
    let path = path.as_ref();
    let path_bytes = path.as_os_str().to_str()?.as_bytes();
    if path_bytes.len() < prefix.len() || &path_bytes[..prefix.len()] != prefix.as_bytes() {
        return None;
    }
    Some(Path::new(std::str::from_utf8(&path_bytes[prefix.len()..]).ok()?))
}

/// Normalizes a path to use forward slashes and strips a leading `./`,
/// returning an empty string for an empty path or `.`.
pub fn normalize_relative(path: &Path) -> String {
    let mut s = path.to_string_lossy().replace('\\', "/");
    while let Some(stripped) = s.strip_prefix("./") {
        s = stripped.to_string();
    }
    if s == "." {
        s.clear();
    }
    s
}

/// Joins a directory-only marker onto a normalized relative path when
/// `is_dir` is true, so directory-only glob patterns (trailing `/`) can
/// match it.
pub fn with_dir_suffix(mut relpath: String, is_dir: bool) -> String {
    if is_dir && !relpath.is_empty() && !relpath.ends_with('/') {
        relpath.push('/');
    }
    relpath
}

pub(crate) fn to_slash_path(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}
