//! Layer 5: Item metadata records
//!
//! Tag: named string content with optional checksum/algorithm
//! Attribute: named signed point score
//! ItemEvent: named timestamp

use serde::{Deserialize, Serialize};

use super::time::Timestamp;

/// String metadata on an item.
///
/// `checksum` and `algorithm` default to empty. On update, an omitted
/// checksum resets to empty while an omitted algorithm keeps its prior
/// value — asymmetric on purpose, matching the reference semantics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub content: String,
    pub checksum: String,
    pub algorithm: String,
}

impl Tag {
    pub fn new(content: String, checksum: Option<String>, algorithm: Option<String>) -> Self {
        Self {
            content,
            checksum: checksum.unwrap_or_default(),
            algorithm: algorithm.unwrap_or_default(),
        }
    }

    /// Replace content; checksum resets unless supplied, algorithm persists
    /// unless supplied.
    pub fn update(
        &mut self,
        new_content: String,
        new_checksum: Option<String>,
        new_algorithm: Option<String>,
    ) {
        self.content = new_content;
        self.checksum = new_checksum.unwrap_or_default();
        if let Some(algo) = new_algorithm {
            self.algorithm = algo;
        }
    }
}

/// Signed numeric metadata on an item. No clamping: points may go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub points: i64,
}

impl Attribute {
    pub fn new(points: i64) -> Self {
        Self { points }
    }
}

/// Timestamped metadata on an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEvent {
    pub event_time: Timestamp,
}

impl ItemEvent {
    pub fn new(event_time: Timestamp) -> Self {
        Self { event_time }
    }

    /// Add the given time to the stored one.
    ///
    /// The reference implementation updates event times additively rather
    /// than by replacement; that behavior is kept as observed.
    pub fn add_time(&mut self, delta: Timestamp) {
        self.event_time = self.event_time.saturating_add(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_update_resets_checksum_keeps_algorithm() {
        let mut tag = Tag::new("v1".into(), Some("abc123".into()), Some("sha256".into()));
        tag.update("v2".into(), None, None);
        assert_eq!(tag.content, "v2");
        assert_eq!(tag.checksum, "");
        assert_eq!(tag.algorithm, "sha256");
    }

    #[test]
    fn tag_update_takes_supplied_fields() {
        let mut tag = Tag::new("v1".into(), None, None);
        tag.update("v2".into(), Some("def456".into()), Some("md5".into()));
        assert_eq!(tag.checksum, "def456");
        assert_eq!(tag.algorithm, "md5");
    }

    #[test]
    fn event_time_updates_are_additive() {
        let mut event = ItemEvent::new(Timestamp::from_secs(100));
        event.add_time(Timestamp::from_secs(50));
        assert_eq!(event.event_time, Timestamp::from_secs(150));
    }
}
