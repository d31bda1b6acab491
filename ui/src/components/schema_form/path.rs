//! Deep paths into documents
//!
//! A [`DocPath`] locates a nested value (`location.place`, `tags[0]`,
//! `subtasks[2].done`). The setters return a new document and never touch
//! the input; on a malformed path they log and hand back the document
//! unchanged.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::model::json_kind;

/// How far past the end of an array a set may pad with `null`
const MAX_PADDING: usize = 64;

// ============================================================================
// Path
// ============================================================================

/// Segment of a document path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key: `.name`
    Key(String),
    /// Array index: `[0]`
    Index(usize),
}

/// Ordered list of keys and indices
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<PathSegment>,
}

impl DocPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push_key(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Key(key.to_string()));
        next
    }

    pub fn push_index(&self, idx: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Index(idx));
        next
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn parent(&self) -> Self {
        let mut parent = self.clone();
        parent.segments.pop();
        parent
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Parse dotted notation: `a.b[0].c`
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = s.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }
                    let mut index = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        index.push(c);
                    }
                    if !closed {
                        return Err(PathError::InvalidIndex(index));
                    }
                    let idx = index
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| PathError::InvalidIndex(index.clone()))?;
                    segments.push(PathSegment::Index(idx));
                }
                _ => current.push(ch),
            }
        }

        if !current.is_empty() {
            segments.push(PathSegment::Key(current));
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path cannot address a value")]
    EmptyPath,

    #[error("expected an object at '{at}', found {found}")]
    ExpectedObject { at: String, found: &'static str },

    #[error("expected an array at '{at}', found {found}")]
    ExpectedArray { at: String, found: &'static str },

    #[error("nothing at '{0}'")]
    Missing(String),

    #[error("invalid array index '{0}'")]
    InvalidIndex(String),
}

// ============================================================================
// Access
// ============================================================================

/// Value at `path`, if present
pub fn get_at<'a>(doc: &'a Value, path: &DocPath) -> Option<&'a Value> {
    path.segments().try_fold(doc, |current, seg| match seg {
        PathSegment::Key(key) => current.as_object()?.get(key),
        PathSegment::Index(idx) => current.as_array()?.get(*idx),
    })
}

/// New document with `value` at `path`; intermediate containers are created.
///
/// `null` (or a missing entry) along the way is replaced by an object for a
/// key segment and an array for an index segment. Arrays are padded with
/// `null` up to the index, at most [`MAX_PADDING`] slots past the end.
pub fn try_set_at(doc: &Value, path: &DocPath, value: Value) -> Result<Value, PathError> {
    if path.is_root() {
        return Err(PathError::EmptyPath);
    }

    let mut out = doc.clone();
    let mut current = &mut out;
    let mut walked = DocPath::root();

    for seg in path.segments() {
        current = match seg {
            PathSegment::Key(key) => {
                if current.is_null() {
                    *current = Value::Object(Map::new());
                }
                let found = json_kind(current);
                let Value::Object(map) = current else {
                    return Err(PathError::ExpectedObject { at: walked.to_string(), found });
                };
                walked = walked.push_key(key);
                map.entry(key.clone()).or_insert(Value::Null)
            }
            PathSegment::Index(idx) => {
                if current.is_null() {
                    *current = Value::Array(Vec::new());
                }
                let found = json_kind(current);
                let Value::Array(items) = current else {
                    return Err(PathError::ExpectedArray { at: walked.to_string(), found });
                };
                if items.len() <= *idx {
                    let len = idx
                        .checked_add(1)
                        .filter(|len| *len - items.len() <= MAX_PADDING)
                        .ok_or_else(|| PathError::InvalidIndex(idx.to_string()))?;
                    items.resize(len, Value::Null);
                }
                walked = walked.push_index(*idx);
                &mut items[*idx]
            }
        };
    }

    *current = value;
    Ok(out)
}

/// Like [`try_set_at`], but logs failures and returns the input unchanged
pub fn set_at(doc: &Value, path: &DocPath, value: Value) -> Value {
    match try_set_at(doc, path, value) {
        Ok(next) => next,
        Err(e) => {
            log::error!("Cannot set '{}': {}", path, e);
            doc.clone()
        }
    }
}

/// New document without the value at `path`.
///
/// Removing an array element shifts the later elements down.
pub fn try_remove_at(doc: &Value, path: &DocPath) -> Result<Value, PathError> {
    let Some(last) = path.last() else {
        return Err(PathError::EmptyPath);
    };

    let parent_path = path.parent();
    let mut out = doc.clone();
    let mut parent = &mut out;
    for seg in parent_path.segments() {
        let next = match seg {
            PathSegment::Key(key) => parent.as_object_mut().and_then(|m| m.get_mut(key)),
            PathSegment::Index(idx) => parent.as_array_mut().and_then(|a| a.get_mut(*idx)),
        };
        parent = next.ok_or_else(|| PathError::Missing(path.to_string()))?;
    }

    let found = json_kind(parent);
    match (last, parent) {
        (PathSegment::Key(key), Value::Object(map)) => {
            // shift_remove keeps the remaining key order intact
            map.shift_remove(key)
                .ok_or_else(|| PathError::Missing(path.to_string()))?;
        }
        (PathSegment::Index(idx), Value::Array(items)) => {
            if *idx >= items.len() {
                return Err(PathError::Missing(path.to_string()));
            }
            items.remove(*idx);
        }
        (PathSegment::Key(_), _) => {
            return Err(PathError::ExpectedObject { at: parent_path.to_string(), found });
        }
        (PathSegment::Index(_), _) => {
            return Err(PathError::ExpectedArray { at: parent_path.to_string(), found });
        }
    }

    Ok(out)
}

/// Like [`try_remove_at`], but logs failures and returns the input unchanged
pub fn remove_at(doc: &Value, path: &DocPath) -> Value {
    match try_remove_at(doc, path) {
        Ok(next) => next,
        Err(e) => {
            log::error!("Cannot remove '{}': {}", path, e);
            doc.clone()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
