//! Topic page revision event kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of edit recorded in a topic page's append-only history.
///
/// Publish and unpublish requests force the matching kind; everything else
/// defaults to a generic [`RevisionKind::Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionKind {
    Edit,
    Publish,
    Unpublish,
}

impl RevisionKind {
    /// Database representation, matching the `topic_page_revisions.event`
    /// CHECK constraint.
    pub fn as_str(&self) -> &'static str {
        match self {
            RevisionKind::Edit => "edit",
            RevisionKind::Publish => "publish",
            RevisionKind::Unpublish => "unpublish",
        }
    }

    /// Parse a client-supplied event name, falling back to `Edit` for
    /// anything unrecognized.
    pub fn parse_or_edit(value: Option<&str>) -> Self {
        match value {
            Some("publish") => RevisionKind::Publish,
            Some("unpublish") => RevisionKind::Unpublish,
            _ => RevisionKind::Edit,
        }
    }
}

impl fmt::Display for RevisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!(
            RevisionKind::parse_or_edit(Some("publish")),
            RevisionKind::Publish
        );
        assert_eq!(
            RevisionKind::parse_or_edit(Some("unpublish")),
            RevisionKind::Unpublish
        );
        assert_eq!(RevisionKind::parse_or_edit(Some("edit")), RevisionKind::Edit);
    }

    #[test]
    fn unknown_or_missing_kind_defaults_to_edit() {
        assert_eq!(
            RevisionKind::parse_or_edit(Some("banana")),
            RevisionKind::Edit
        );
        assert_eq!(RevisionKind::parse_or_edit(None), RevisionKind::Edit);
    }

    #[test]
    fn as_str_round_trips_through_display() {
        for kind in [
            RevisionKind::Edit,
            RevisionKind::Publish,
            RevisionKind::Unpublish,
        ] {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
