//! Headline batch type

use heapless::{String, Vec};

/// Maximum headlines kept from one fetch
pub const MAX_HEADLINES: usize = 16;

/// Maximum headline length in bytes
pub const MAX_HEADLINE_LEN: usize = 160;

/// A single headline
pub type Headline = String<MAX_HEADLINE_LEN>;

/// Ordered headlines from one successful fetch
///
/// Replaced wholesale on every successful refetch, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadlineBatch {
    headlines: Vec<Headline, MAX_HEADLINES>,
}

impl HeadlineBatch {
    /// Create an empty batch
    pub const fn new() -> Self {
        Self {
            headlines: Vec::new(),
        }
    }

    /// Build a batch from titles in feed order
    ///
    /// Titles beyond `MAX_HEADLINES` are dropped.
    pub fn from_titles<'a, I>(titles: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut batch = Self::new();
        for title in titles {
            if !batch.push(title) {
                break;
            }
        }
        batch
    }

    /// Append a headline, truncating it to `MAX_HEADLINE_LEN`
    ///
    /// Returns false if the batch is full.
    pub fn push(&mut self, title: &str) -> bool {
        if self.headlines.is_full() {
            return false;
        }

        let mut end = title.len().min(MAX_HEADLINE_LEN);
        while !title.is_char_boundary(end) {
            end -= 1;
        }

        let mut headline = Headline::new();
        // Cannot fail, `end` is within capacity
        let _ = headline.push_str(&title[..end]);
        self.headlines.push(headline).is_ok()
    }

    pub fn len(&self) -> usize {
        self.headlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.headlines.get(index).map(|h| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.headlines.iter().map(|h| h.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_titles_keeps_order() {
        let batch = HeadlineBatch::from_titles(["first", "second", "third"]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.get(0), Some("first"));
        assert_eq!(batch.get(2), Some("third"));
        assert_eq!(batch.get(3), None);
    }

    #[test]
    fn test_capacity_limit() {
        let titles = ["x"; MAX_HEADLINES + 4];
        let mut batch = HeadlineBatch::from_titles(titles);
        assert_eq!(batch.len(), MAX_HEADLINES);
        assert!(!batch.push("overflow"));
    }

    #[test]
    fn test_long_headline_truncated_on_char_boundary() {
        // 'é' is two bytes, so a naive byte cut would split it
        let mut long = heapless::String::<400>::new();
        let _ = long.push('a');
        for _ in 0..150 {
            let _ = long.push('é');
        }

        let mut batch = HeadlineBatch::new();
        assert!(batch.push(&long));

        let stored = batch.get(0).unwrap();
        assert!(stored.len() <= MAX_HEADLINE_LEN);
        assert_eq!(stored.len(), MAX_HEADLINE_LEN - 1);
        assert!(stored.starts_with("aé"));
    }

    #[test]
    fn test_empty_batch() {
        let batch = HeadlineBatch::from_titles([]);
        assert!(batch.is_empty());
        assert_eq!(batch.iter().count(), 0);
    }
}
