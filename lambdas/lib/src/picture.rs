use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One indexed picture: the document written to the search index.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PictureItem {
    pub id: String,
    /// Display path of the object, `<bucket><suffix>/<decoded key>`.
    pub path: String,
    pub labels: Vec<String>,
    /// Reserved for a resized-copy reference; nothing writes it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl PictureItem {
    /// Builds the document for one upload.
    ///
    /// The id is a digest of the key exactly as it arrived in the event, so a
    /// re-delivery of the same object overwrites the previous document
    /// instead of duplicating it.
    pub fn build(
        raw_key: &str,
        bucket: &str,
        bucket_suffix: &str,
        decoded_key: &str,
        labels: Vec<String>,
    ) -> Self {
        Self {
            id: hex::encode(Sha256::digest(raw_key.as_bytes())),
            path: format!("{}{}/{}", bucket, bucket_suffix, decoded_key),
            labels,
            thumbnail_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_raw_key_produces_the_same_id() {
        let first = PictureItem::build("users/abc/img+1.jpg", "b", "", "users/abc/img 1.jpg", vec![]);
        let second = PictureItem::build("users/abc/img+1.jpg", "b", "", "users/abc/img 1.jpg", vec![]);
        let other = PictureItem::build("users/abc/img+2.jpg", "b", "", "users/abc/img 2.jpg", vec![]);

        assert_eq!(first.id, second.id);
        assert_ne!(first.id, other.id);
    }

    #[test]
    fn path_joins_bucket_suffix_and_decoded_key() {
        let picture = PictureItem::build(
            "photos/tenant42/vacation.jpg",
            "photos-bucket",
            "-resized",
            "photos/tenant42/vacation.jpg",
            vec!["dog".to_owned()],
        );

        assert_eq!(
            picture.path,
            "photos-bucket-resized/photos/tenant42/vacation.jpg"
        );
    }

    #[test]
    fn placeholder_field_is_absent_from_the_wire_format() {
        let picture = PictureItem::build("a/b/c.jpg", "b", "", "a/b/c.jpg", vec!["cat".to_owned()]);

        let value = serde_json::to_value(&picture).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("id"));
        assert!(object.contains_key("path"));
        assert!(object.contains_key("labels"));
        assert!(!object.contains_key("thumbnail_url"));
    }
}
