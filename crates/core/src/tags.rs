//! Scene tags.
//!
//! The API stores tags as a single comma-separated string
//! (`"action, funny, drama"`). [`TagSet`] is the in-memory form: an ordered
//! set of trimmed, non-empty tags with duplicates removed.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when a tag set is written back to the wire.
const WIRE_SEPARATOR: &str = ", ";

/// Ordered set of scene tags.
///
/// - Entries are trimmed; empty entries are dropped.
/// - Duplicates are detected case-insensitively; the first spelling wins.
/// - Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-separated wire form.
    ///
    /// ```
    /// use scenevault_core::tags::TagSet;
    ///
    /// let tags = TagSet::parse(" action, funny ,, Action ,drama");
    /// assert_eq!(tags.as_slice(), ["action", "funny", "drama"]);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for tag in raw.split(',') {
            set.insert(tag);
        }
        set
    }

    /// Add a tag. Returns `false` when the tag was empty or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Case-insensitive membership test on the trimmed tag.
    pub fn contains(&self, tag: &str) -> bool {
        let needle = normalize_tag(tag).to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// The wire form, or `None` for an empty set.
    pub fn to_wire(&self) -> Option<String> {
        if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(WIRE_SEPARATOR))
        }
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(WIRE_SEPARATOR))
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Normalize a clicked or typed tag: trim surrounding whitespace.
pub fn normalize_tag(tag: &str) -> &str {
    tag.trim()
}
