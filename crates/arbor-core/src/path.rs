//! Hierarchical path values and the normalization algorithm.
//!
//! A [`Path`] is an immutable slash-separated location in a component
//! tree. Paths come in two forms: **absolute** (leading separator,
//! anchored at the tree root) and **relative** (interpreted against a
//! context node via [`Path::resolve`]). Normalization folds `.` and `..`
//! segments away; a `..` with nothing left to pop is an error, never a
//! silent clamp to root.
//!
//! Everything here is a pure transformation over strings; registry
//! lookup against the resulting absolute path lives in `arbor-tree`.

use crate::error::PathError;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// The path separator character.
pub const SEPARATOR: char = '/';

/// Segment buffer sized for typical tree depths.
type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Whether `name` is usable as a node name: non-empty and free of the
/// separator character.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(SEPARATOR)
}

/// An immutable hierarchical path.
///
/// Construction never validates: a `Path` may hold `.`/`..` segments or
/// repeated separators until [`normalize`](Path::normalize) or
/// [`resolve`](Path::resolve) is applied. Repeated separators are
/// tolerated by tokenization (they produce no empty segments).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    repr: String,
}

impl Path {
    /// The absolute root path, `"/"`.
    pub fn root() -> Self {
        Self {
            repr: String::from(SEPARATOR),
        }
    }

    /// Wrap a string as a path, verbatim.
    pub fn new(repr: impl Into<String>) -> Self {
        Self { repr: repr.into() }
    }

    /// The underlying string representation.
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// `true` if the path begins with the separator.
    pub fn is_absolute(&self) -> bool {
        self.repr.starts_with(SEPARATOR)
    }

    /// `true` if the path does not begin with the separator.
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// `true` if this is exactly the root path.
    pub fn is_root(&self) -> bool {
        self.repr.len() == 1 && self.is_absolute()
    }

    /// Iterate over the non-empty segments, in order.
    ///
    /// Repeated separators contribute nothing: `"/a//b"` yields `a`, `b`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.repr.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// The last segment, or `""` for the root (and for an empty path).
    pub fn name(&self) -> &str {
        self.segments().last().unwrap_or("")
    }

    /// The path with the last segment removed.
    ///
    /// Returns `None` for the root and for single-segment relative paths.
    pub fn parent(&self) -> Option<Path> {
        let segs: Segments<'_> = self.segments().collect();
        if self.is_absolute() {
            match segs.len() {
                0 => None,
                _ => Some(Self::from_absolute_segments(&segs[..segs.len() - 1])),
            }
        } else {
            match segs.len() {
                0 | 1 => None,
                n => Some(Self::new(segs[..n - 1].join("/"))),
            }
        }
    }

    /// Append one segment, validating it as a node name.
    pub fn join(&self, name: &str) -> Result<Path, PathError> {
        if !is_valid_name(name) {
            return Err(PathError::InvalidName { name: name.into() });
        }
        let repr = if self.repr.is_empty() {
            name.to_string()
        } else if self.is_root() {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.repr)
        };
        Ok(Self::new(repr))
    }

    /// Fold `.` and `..` segments away, producing a canonical absolute path.
    ///
    /// The accumulator starts at the root, so a relative path normalizes
    /// as if anchored there. Fails with [`PathError::EscapesRoot`] when a
    /// `..` has nothing left to pop, and [`PathError::Malformed`] on an
    /// empty path string.
    pub fn normalize(&self) -> Result<Path, PathError> {
        if self.repr.is_empty() {
            return Err(PathError::Malformed {
                path: self.repr.clone(),
                reason: "empty path".into(),
            });
        }
        let folded = self.fold_onto(Segments::new(), self.segments())?;
        Ok(Self::from_absolute_segments(&folded))
    }

    /// Resolve against a context node's location, producing a normalized
    /// absolute path.
    ///
    /// `context` is the context node's absolute path and `context_parent`
    /// its parent's, if it has one. An absolute `self` ignores both. For a
    /// relative `self`, a leading `..` substitutes `context_parent` (an
    /// error if absent), a leading `.` substitutes `context`, and a bare
    /// first segment is resolved against `context` directly. The remaining
    /// segments are folded as in [`normalize`](Path::normalize).
    pub fn resolve(
        &self,
        context: &Path,
        context_parent: Option<&Path>,
    ) -> Result<Path, PathError> {
        if self.repr.is_empty() {
            return Err(PathError::Malformed {
                path: self.repr.clone(),
                reason: "empty path".into(),
            });
        }
        if self.is_absolute() {
            return self.normalize();
        }
        if context.is_relative() {
            return Err(PathError::NoContext {
                path: self.repr.clone(),
            });
        }

        let mut rest = self.segments().peekable();
        let base: Segments<'_> = match rest.peek().copied() {
            Some("..") => {
                let parent = context_parent.ok_or_else(|| PathError::NoContext {
                    path: self.repr.clone(),
                })?;
                rest.next();
                parent.segments().collect()
            }
            Some(".") => {
                rest.next();
                context.segments().collect()
            }
            _ => context.segments().collect(),
        };

        let folded = self.fold_onto(base, rest)?;
        Ok(Self::from_absolute_segments(&folded))
    }

    /// Fold `iter` onto `acc`: drop `.`, pop on `..`, append otherwise.
    fn fold_onto<'a>(
        &self,
        mut acc: Segments<'a>,
        iter: impl Iterator<Item = &'a str>,
    ) -> Result<Segments<'a>, PathError> {
        for seg in iter {
            match seg {
                "." => {}
                ".." => {
                    if acc.pop().is_none() {
                        return Err(PathError::EscapesRoot {
                            path: self.repr.clone(),
                        });
                    }
                }
                s => acc.push(s),
            }
        }
        Ok(acc)
    }

    fn from_absolute_segments(segs: &[&str]) -> Path {
        if segs.is_empty() {
            Self::root()
        } else {
            Self::new(format!("/{}", segs.join("/")))
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Malformed {
                path: String::new(),
                reason: "empty path".into(),
            });
        }
        Ok(Self::new(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.repr
    }
}
