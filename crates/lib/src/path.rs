//! Path types for hierarchical resource addressing.
//!
//! Both logical configuration names and physical store locations are
//! `/`-separated sequences of segments. The Path/PathBuf types follow the same
//! borrowed/owned pattern as std::path::Path/PathBuf.
//!
//! # Core Types
//!
//! - [`Path`] - An unsized borrowed path type (always behind a reference)
//! - [`PathBuf`] - An owned path type that can be constructed and modified
//!
//! Paths are always stored normalized: no leading or trailing separators and
//! no empty segments. The empty path refers to the store root.
//!
//! # Usage
//!
//! ```rust
//! use caconf::path::PathBuf;
//! use std::str::FromStr;
//!
//! // Construct from string (automatically normalized)
//! let path = PathBuf::from_str("/conf/site//cfg/")?;
//! assert_eq!(path.as_str(), "conf/site/cfg");
//!
//! // Build incrementally (infallible)
//! let path = PathBuf::new().push("conf").push("site").push("cfg");
//! assert_eq!(path.file_name(), Some("cfg"));
//! # Ok::<(), std::convert::Infallible>(())
//! ```

use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

/// Segment separator for all paths.
pub const SEPARATOR: char = '/';

/// Normalizes a path string by removing empty segments, including leading
/// and trailing separators. The empty string refers to the root.
fn normalize_path(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    input
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// An owned, normalized path into the resource tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PathBuf {
    inner: String,
}

/// A borrowed, normalized path into the resource tree.
///
/// `Path` is the borrowed counterpart to `PathBuf`, similar to how `&str`
/// relates to `String`. This type is unsized and must always be used behind
/// a reference.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Path {
    inner: str,
}

impl PathBuf {
    /// Creates a new empty (root) path.
    pub fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Appends a path string to the end of this path.
    ///
    /// The input is normalized first, so it may itself contain several
    /// segments. Pushing an empty string is a no-op.
    pub fn push(mut self, path: impl AsRef<str>) -> Self {
        let normalized = normalize_path(path.as_ref());
        if normalized.is_empty() {
            return self;
        }

        if self.inner.is_empty() {
            self.inner = normalized;
        } else {
            self.inner.push(SEPARATOR);
            self.inner.push_str(&normalized);
        }
        self
    }

    /// Joins this path with another path.
    pub fn join(mut self, other: impl AsRef<Path>) -> Self {
        let other_path = other.as_ref();
        if self.inner.is_empty() {
            self.inner = other_path.inner.to_string();
        } else if !other_path.inner.is_empty() {
            self.inner.push(SEPARATOR);
            self.inner.push_str(&other_path.inner);
        }
        self
    }

    /// Returns the parent path, or `None` if this is a top-level or root path.
    pub fn parent(&self) -> Option<PathBuf> {
        self.inner.rfind(SEPARATOR).map(|last| PathBuf {
            inner: self.inner[..last].to_string(),
        })
    }

    /// Creates a PathBuf by normalizing the input string.
    pub fn normalize(path: &str) -> Self {
        Self {
            inner: normalize_path(path),
        }
    }
}

impl Path {
    /// Creates a Path from a string without normalization.
    ///
    /// # Safety
    /// The caller must ensure the string is already normalized: no leading
    /// or trailing separators and no empty segments.
    pub unsafe fn from_str_unchecked(s: &str) -> &Path {
        // SAFETY: Path is repr(transparent) over str
        unsafe { &*(s as *const str as *const Path) }
    }

    /// Returns an iterator over the path segments as string slices.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.components().count()
    }

    /// Returns `true` if this is the root path.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the last segment of the path, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        if self.inner.is_empty() {
            None
        } else {
            self.inner.split(SEPARATOR).next_back()
        }
    }

    /// Returns the parent path, treating top-level paths as children of the
    /// root. `None` only for the root itself.
    pub fn parent_or_root(&self) -> Option<PathBuf> {
        if self.inner.is_empty() {
            return None;
        }
        Some(match self.inner.rfind(SEPARATOR) {
            Some(last) => PathBuf {
                inner: self.inner[..last].to_string(),
            },
            None => PathBuf::new(),
        })
    }

    /// Returns `true` if any segment of the path equals `segment`.
    pub fn contains_component(&self, segment: &str) -> bool {
        self.components().any(|c| c == segment)
    }

    /// Returns `true` if `self` equals `base` or lies below it.
    pub fn starts_with(&self, base: &Path) -> bool {
        if base.is_empty() {
            return true;
        }
        match self.inner.strip_prefix(&base.inner) {
            Some("") => true,
            Some(rest) => rest.starts_with(SEPARATOR),
            None => false,
        }
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the path in absolute notation with a leading `/`.
    pub fn to_absolute_string(&self) -> String {
        format!("/{}", &self.inner)
    }

    /// Creates an owned path with `child` appended.
    pub fn child(&self, child: impl AsRef<str>) -> PathBuf {
        self.to_path_buf().push(child)
    }

    /// Converts this `Path` to an owned `PathBuf`.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf {
            inner: self.inner.to_string(),
        }
    }
}

impl Default for PathBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for PathBuf {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        // SAFETY: PathBuf only ever holds normalized strings
        unsafe { Path::from_str_unchecked(self.inner.as_str()) }
    }
}

impl AsRef<Path> for PathBuf {
    fn as_ref(&self) -> &Path {
        self.deref()
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<Path> for PathBuf {
    fn borrow(&self) -> &Path {
        self.deref()
    }
}

impl ToOwned for Path {
    type Owned = PathBuf;

    fn to_owned(&self) -> PathBuf {
        self.to_path_buf()
    }
}

impl FromStr for PathBuf {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<String> for PathBuf {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

impl From<&str> for PathBuf {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<&Path> for PathBuf {
    fn from(path: &Path) -> Self {
        path.to_path_buf()
    }
}

impl From<PathBuf> for String {
    fn from(path: PathBuf) -> Self {
        path.inner
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.deref(), f)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", &self.inner)
        }
    }
}
