use std::borrow::Borrow;

use derive_more::{Deref, Display, From};

const SEPARATOR: char = '/';

/// One slash-delimited component of a path.
///
/// Segments are purely syntactic: the resolver never rejects one, so an empty
/// segment is a perfectly valid value here and is only refused by the tree when
/// something is about to be created under that name.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Deref,
)]
pub struct Segment(String);

impl Segment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment(value.to_string())
    }
}

impl Borrow<str> for Segment {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Segment {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Segment {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Splits a path into its segments.
///
/// The whole path is trimmed, split on `/`, and everything before the first
/// slash is dropped. `""` and `"/"` both resolve to the root (no segments).
/// Repeated slashes keep their empty segments, and `.`/`..` are ordinary names.
pub fn segments(path: &str) -> Vec<Segment> {
    let path = path.trim();
    if path.len() == 1 && path.starts_with(SEPARATOR) {
        return Vec::new();
    }

    path.split(SEPARATOR).skip(1).map(Segment::from).collect()
}

/// Rebuilds an absolute path from segments, the inverse of [`segments`] for
/// paths with a leading slash.
pub fn join<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> String {
    let joined = segments
        .into_iter()
        .fold(String::new(), |mut acc, segment| {
            acc.push(SEPARATOR);
            acc.push_str(segment);
            acc
        });

    if joined.is_empty() {
        SEPARATOR.to_string()
    } else {
        joined
    }
}
