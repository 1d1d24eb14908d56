//! Storage key generation for uploaded topic images.

use uuid::Uuid;

/// Object-store namespace for topic page images.
pub const TOPIC_IMAGES_PREFIX: &str = "topic_images";

/// Generate a collision-resistant storage key under the topic-images
/// namespace, e.g. `topic_images/6f2a...c9`.
///
/// Keys are derived from a fresh UUID v4 per request and never reused.
pub fn topic_image_key() -> String {
    format!("{TOPIC_IMAGES_PREFIX}/{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_namespaced() {
        let key = topic_image_key();
        assert!(key.starts_with("topic_images/"));
    }

    #[test]
    fn consecutive_keys_differ() {
        assert_ne!(topic_image_key(), topic_image_key());
    }

    #[test]
    fn key_has_no_dots_or_spaces() {
        let key = topic_image_key();
        assert!(!key.contains('.'));
        assert!(!key.contains(' '));
    }
}
