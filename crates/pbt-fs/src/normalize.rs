//! Repair of host path strings into canonical absolute form
//!
//! The host's path strings are unreliable on Windows: separators are mixed,
//! drive letters can appear behind a leading slash (`/C:/work`), and nothing
//! guarantees the string is absolute. Handing such a string to another
//! process makes it look for files that are not there. The Windows repair
//! resolves the string the way the platform's full-path API does; on POSIX
//! the host strings are already usable and normalization is the identity.

use crate::error::{Error, Result};
use crate::path::{HostPath, NormalizedPath, PathStyle, rebuild, split_root};

/// Longest path, in UTF-16 units, the Windows full-path API can return.
const MAX_WINDOWS_PATH: usize = 32_767;

/// Turns [`HostPath`]s into [`NormalizedPath`]s for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    style: PathStyle,
    repair: bool,
    base: Option<String>,
}

impl PathNormalizer {
    /// Create a normalizer.
    ///
    /// `base` is the directory relative paths are resolved against when
    /// `repair` is on; it is the only context the repair ever consults.
    pub fn new(style: PathStyle, repair: bool, base: Option<String>) -> Self {
        Self { style, repair, base }
    }

    /// Identity normalizer for POSIX hosts.
    pub fn posix() -> Self {
        Self::new(PathStyle::Posix, false, None)
    }

    /// Repairing normalizer for Windows hosts, resolving relative paths
    /// against `base`.
    pub fn windows(base: impl Into<String>) -> Self {
        Self::new(PathStyle::Windows, true, Some(base.into()))
    }

    /// Identity normalizer in the style of the running platform.
    ///
    /// Used by generator executables, whose arguments were already repaired
    /// by the plugin that declared the command.
    pub fn native() -> Self {
        Self::new(PathStyle::native(), false, None)
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    pub fn repairs(&self) -> bool {
        self.repair
    }

    /// Repair `raw` into its canonical form.
    ///
    /// Normalizing an already normalized path returns it unchanged.
    pub fn normalize(&self, raw: &HostPath) -> Result<NormalizedPath> {
        self.normalize_str(raw.as_str())
    }

    pub fn normalize_str(&self, raw: &str) -> Result<NormalizedPath> {
        if !self.repair {
            return Ok(NormalizedPath::from_repaired(raw.to_string(), self.style));
        }
        let repaired = match self.style {
            PathStyle::Windows => full_windows_path(raw, self.base.as_deref())?,
            PathStyle::Posix => full_posix_path(raw, self.base.as_deref())?,
        };
        Ok(NormalizedPath::from_repaired(repaired, self.style))
    }

    /// Normalize every path, failing on the first one that cannot be repaired.
    pub fn normalize_all<'a>(
        &self,
        raws: impl IntoIterator<Item = &'a HostPath>,
    ) -> Result<Vec<NormalizedPath>> {
        raws.into_iter().map(|raw| self.normalize(raw)).collect()
    }
}

fn is_invalid_windows_char(c: char) -> bool {
    c < ' ' || matches!(c, '<' | '>' | '"' | '|' | '?' | '*')
}

/// Split an absolute Windows path into its root and resolved components.
fn absolute_windows_parts(raw: &str) -> Result<(String, Vec<String>)> {
    let full = full_windows_path(raw, None)?;
    let (root, rest) = split_root(&full, PathStyle::Windows);
    let components = rest
        .split('\\')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    Ok((root.to_string(), components))
}

fn base_parts(raw: &str, base: Option<&str>) -> Result<(String, Vec<String>)> {
    let base = base.ok_or_else(|| {
        Error::path_resolution(raw, "relative path requires a base directory")
    })?;
    absolute_windows_parts(base).map_err(|_| {
        Error::path_resolution(raw, format!("base directory {base:?} is not an absolute path"))
    })
}

/// Resolve `raw` like `GetFullPathNameW` does, without touching the filesystem.
fn full_windows_path(raw: &str, base: Option<&str>) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::path_resolution(raw, "empty path"));
    }
    // Verbatim and device paths are exempt from any processing
    if raw.starts_with(r"\\?\") || raw.starts_with(r"\\.\") {
        return Ok(raw.to_string());
    }
    if let Some(c) = raw.chars().find(|c| is_invalid_windows_char(*c)) {
        return Err(Error::path_resolution(raw, format!("invalid character {c:?}")));
    }

    let unified = raw.replace('/', "\\");
    let mut s = unified.as_str();
    let b = s.as_bytes();
    if b.len() >= 3 && b[0] == b'\\' && b[1].is_ascii_alphabetic() && b[2] == b':' {
        s = &s[1..];
    }

    let (root, mut components, rest) = if let Some(body) = s.strip_prefix(r"\\") {
        let mut parts = body.splitn(3, '\\');
        let server = parts.next().filter(|p| !p.is_empty());
        let share = parts.next().filter(|p| !p.is_empty());
        let (Some(server), Some(share)) = (server, share) else {
            return Err(Error::path_resolution(raw, "incomplete UNC path"));
        };
        if server.contains(':') || share.contains(':') {
            return Err(Error::path_resolution(raw, "invalid character ':'"));
        }
        (format!(r"\\{server}\{share}"), Vec::new(), parts.next().unwrap_or(""))
    } else if s.len() >= 2 && s.as_bytes()[0].is_ascii_alphabetic() && s.as_bytes()[1] == b':' {
        let drive = s.as_bytes()[0].to_ascii_uppercase() as char;
        let drive_root = format!("{drive}:\\");
        if s[2..].starts_with('\\') {
            (drive_root, Vec::new(), &s[3..])
        } else {
            // Drive-relative: resolve against the base only when it is on the same drive
            match base.map(|_| base_parts(raw, base)).transpose()? {
                Some((base_root, base_components)) if base_root == drive_root => {
                    (base_root, base_components, &s[2..])
                }
                _ => (drive_root, Vec::new(), &s[2..]),
            }
        }
    } else if let Some(rest) = s.strip_prefix('\\') {
        let (base_root, _) = base_parts(raw, base)?;
        (base_root, Vec::new(), rest)
    } else {
        let (base_root, base_components) = base_parts(raw, base)?;
        (base_root, base_components, s)
    };

    for part in rest.split('\\') {
        match part {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            other => {
                let trimmed = other.trim_end_matches(['.', ' ']);
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.contains(':') {
                    return Err(Error::path_resolution(raw, "invalid character ':'"));
                }
                components.push(trimmed.to_string());
            }
        }
    }

    let full = rebuild(&root, &components, PathStyle::Windows);
    if full.encode_utf16().count() > MAX_WINDOWS_PATH {
        return Err(Error::path_resolution(
            raw,
            format!("path exceeds {MAX_WINDOWS_PATH} UTF-16 units"),
        ));
    }
    Ok(full)
}

/// Lexical absolute form of a POSIX path, for hosts that ask for repair
/// even though the platform does not need it.
fn full_posix_path(raw: &str, base: Option<&str>) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::path_resolution(raw, "empty path"));
    }
    if raw.contains('\0') {
        return Err(Error::path_resolution(raw, "invalid character '\\0'"));
    }
    let mut components: Vec<&str> = Vec::new();
    if !raw.starts_with('/') {
        let base = base
            .filter(|b| b.starts_with('/'))
            .ok_or_else(|| Error::path_resolution(raw, "relative path requires a base directory"))?;
        components.extend(base.split('/').filter(|c| !c.is_empty() && *c != "."));
    }
    for part in raw.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            other => components.push(other),
        }
    }
    Ok(rebuild("/", &components, PathStyle::Posix))
}
