//! Comma-joined image references.
//!
//! Proof images, annotation evidence and reference pictures travel as a single
//! string of URLs separated by commas. Empty segments are dropped on both
//! sides.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageList(Vec<String>);

impl ImageList {
    /// Entries holding commas are split, so the list reads back unchanged.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            urls.into_iter()
                .flat_map(|url| {
                    url.as_ref()
                        .split(',')
                        .map(str::trim)
                        .filter(|url| !url.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .collect(),
        )
    }

    pub fn parse(joined: &str) -> Self {
        Self::new([joined])
    }

    pub fn urls(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl Serialize for ImageList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.joined())
    }
}

impl<'de> Deserialize<'de> for ImageList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(ImageList::parse).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_blank_segments() {
        let list = ImageList::parse("https://a/1.png, ,https://a/2.png,");
        assert_eq!(list.len(), 2);
        assert_eq!(list.joined(), "https://a/1.png,https://a/2.png");
    }

    #[test]
    fn null_decodes_to_empty_list() {
        let list: ImageList = serde_json::from_str("null").unwrap();
        assert!(list.is_empty());
        assert_eq!(serde_json::to_string(&list).unwrap(), "\"\"");
    }

    #[test]
    fn commas_inside_an_entry_split_it() {
        let list = ImageList::new(["https://a/1.png,https://a/2.png", "https://a/3.png"]);
        assert_eq!(list.len(), 3);
        let back: ImageList = serde_json::from_value(serde_json::to_value(&list).unwrap()).unwrap();
        assert_eq!(back, list);
    }
}
