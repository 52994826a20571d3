//! Path strings as handed over by the host and after repair
//!
//! The host passes paths around as plain strings whose separators and
//! absoluteness depend on the platform it runs on. [`HostPath`] keeps such a
//! string untouched; [`NormalizedPath`] is only produced by
//! [`PathNormalizer`](crate::PathNormalizer) and is the form every command
//! argument, input and output declaration is built from.

use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Separator and root conventions of a platform's path strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `/`-separated, absolute paths start with `/`
    Posix,
    /// `\`-separated (`/` accepted), drive letters and UNC shares
    Windows,
}

impl PathStyle {
    /// Style of the platform this process runs on.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// The separator written when building paths in this style.
    pub fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }

    /// Whether `c` separates components in this style.
    pub fn is_separator(self, c: char) -> bool {
        match self {
            Self::Posix => c == '/',
            Self::Windows => c == '/' || c == '\\',
        }
    }

    /// Whether `path` is absolute in this style.
    pub fn is_absolute(self, path: &str) -> bool {
        match self {
            Self::Posix => path.starts_with('/'),
            Self::Windows => {
                let (root, _) = split_root(path, self);
                root.len() > 2 || (root.len() == 2 && root.chars().all(|c| self.is_separator(c)))
            }
        }
    }

    /// Whether two path components name the same entry.
    pub fn component_eq(self, a: &str, b: &str) -> bool {
        match self {
            Self::Posix => a == b,
            Self::Windows => a.eq_ignore_ascii_case(b),
        }
    }
}

/// Splits `path` into its root prefix and the remainder.
///
/// The root keeps its trailing separator when it has one (`/`, `C:\`);
/// UNC roots (`\\server\share`) and drive-relative roots (`C:`) do not.
pub(crate) fn split_root(path: &str, style: PathStyle) -> (&str, &str) {
    let is_sep = |c: char| style.is_separator(c);
    match style {
        PathStyle::Posix => {
            if path.starts_with('/') {
                path.split_at(1)
            } else {
                ("", path)
            }
        }
        PathStyle::Windows => {
            let bytes = path.as_bytes();
            if path.starts_with(r"\\?\") || path.starts_with(r"\\.\") {
                return match path[4..].find(is_sep) {
                    Some(idx) => path.split_at(4 + idx + 1),
                    None => (path, ""),
                };
            }
            if bytes.len() >= 2 && is_sep(bytes[0] as char) && is_sep(bytes[1] as char) {
                let server_end = path[2..].find(is_sep).map(|i| i + 2);
                let Some(server_end) = server_end else {
                    return (path, "");
                };
                return match path[server_end + 1..].find(is_sep) {
                    Some(i) => path.split_at(server_end + 1 + i),
                    None => (path, ""),
                };
            }
            if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
                if bytes.len() >= 3 && is_sep(bytes[2] as char) {
                    return path.split_at(3);
                }
                return path.split_at(2);
            }
            if bytes.first().is_some_and(|b| is_sep(*b as char)) {
                return path.split_at(1);
            }
            ("", path)
        }
    }
}

/// Reassembles a root and its components with the style's separator.
pub(crate) fn rebuild<S: AsRef<str>>(root: &str, components: &[S], style: PathStyle) -> String {
    let sep = style.separator();
    let body = components
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&sep.to_string());

    let root_is_open = root.is_empty()
        || root.ends_with(|c| style.is_separator(c))
        || (style == PathStyle::Windows && root.len() == 2 && root.ends_with(':'));

    if body.is_empty() || root_is_open {
        format!("{root}{body}")
    } else {
        format!("{root}{sep}{body}")
    }
}

/// Last non-empty component of `path`, splitting on any of `separators`.
fn last_component<'a>(path: &'a str, is_sep: impl Fn(char) -> bool) -> Option<&'a str> {
    path.trim_end_matches(&is_sep)
        .rsplit(is_sep)
        .next()
        .filter(|name| !name.is_empty())
}

fn stem_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

fn extension_of(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if idx == 0 { None } else { Some(&name[idx + 1..]) }
}

/// A path string exactly as the host handed it over.
///
/// Host paths may mix separators, start with a slash before a drive letter,
/// or be relative to a directory the plugin cannot see. They are fine for
/// deriving names, but must go through
/// [`PathNormalizer`](crate::PathNormalizer) before being compared or passed
/// to another process.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostPath(String);

impl HostPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append `segment` with a forward slash, the separator every host accepts.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.trim_start_matches(['/', '\\']);
        if self.0.is_empty() {
            return Self(segment.to_string());
        }
        let base = self.0.trim_end_matches(['/', '\\']);
        if base.is_empty() {
            // The host path was a bare root such as "/"
            return Self(format!("{}{}", &self.0[..1], segment));
        }
        Self(format!("{base}/{segment}"))
    }

    /// The last component, treating both `/` and `\` as separators.
    pub fn file_name(&self) -> Option<&str> {
        last_component(&self.0, |c| c == '/' || c == '\\')
    }

    /// The file name without its final extension.
    pub fn file_stem(&self) -> Option<&str> {
        self.file_name().map(stem_of)
    }

    /// The final extension, without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(extension_of)
    }

    /// Whether the file name ends with `suffix` (e.g. `".in"`).
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.file_name().is_some_and(|name| name.ends_with(suffix))
    }
}

impl std::fmt::Display for HostPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for HostPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for HostPath {
    fn from(p: &Path) -> Self {
        Self::new(p.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for HostPath {
    fn from(p: PathBuf) -> Self {
        Self::from(p.as_path())
    }
}

impl From<&NormalizedPath> for HostPath {
    fn from(p: &NormalizedPath) -> Self {
        Self::new(p.as_str())
    }
}

/// A path repaired into the canonical form of its [`PathStyle`].
///
/// Only [`PathNormalizer`](crate::PathNormalizer) creates these from host
/// strings. Joining clean components onto a normalized path keeps it
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    inner: String,
    style: PathStyle,
}

impl NormalizedPath {
    pub(crate) fn from_repaired(inner: String, style: PathStyle) -> Self {
        Self { inner, style }
    }

    /// Get the repaired string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is absolute in its style.
    pub fn is_absolute(&self) -> bool {
        self.style.is_absolute(&self.inner)
    }

    /// The non-empty components after the root.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        let (_, rest) = split_root(&self.inner, self.style);
        let style = self.style;
        rest.split(move |c| style.is_separator(c))
            .filter(|c| !c.is_empty())
    }

    /// Join this path with a relative segment.
    ///
    /// Separators in `segment` are rewritten to the style's separator,
    /// `.` components are dropped and `..` removes the previous component
    /// without ever climbing above the root.
    pub fn join(&self, segment: &str) -> Self {
        let (root, _) = split_root(&self.inner, self.style);
        let mut components: Vec<&str> = self.components().collect();
        for part in segment.split(|c| self.style.is_separator(c)) {
            match part {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
        Self {
            inner: rebuild(root, &components, self.style),
            style: self.style,
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let (root, _) = split_root(&self.inner, self.style);
        let mut components: Vec<&str> = self.components().collect();
        if components.is_empty() || (root.is_empty() && components.len() == 1) {
            return None;
        }
        components.pop();
        Some(Self {
            inner: rebuild(root, &components, self.style),
            style: self.style,
        })
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.components().last()
    }

    /// The file name without its final extension.
    pub fn file_stem(&self) -> Option<&str> {
        self.file_name().map(stem_of)
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(extension_of)
    }

    /// Remove `suffix` from the tail of the components.
    ///
    /// Returns `None` if the trailing components do not match `suffix`.
    /// Components compare case-insensitively in the Windows style.
    pub fn strip_component_suffix<S: AsRef<str>>(&self, suffix: &[S]) -> Option<Self> {
        let (root, _) = split_root(&self.inner, self.style);
        let components: Vec<&str> = self.components().collect();
        if suffix.len() > components.len() {
            return None;
        }
        let keep = components.len() - suffix.len();
        let matches = components[keep..]
            .iter()
            .zip(suffix)
            .all(|(have, want)| self.style.component_eq(have, want.as_ref()));
        matches.then(|| Self {
            inner: rebuild(root, &components[..keep], self.style),
            style: self.style,
        })
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}
