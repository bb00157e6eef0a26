use crate::config::config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestbookEntry {
    pub text: String,
    pub author: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppendError {
    /// Entry text longer than the configured character limit.
    TooLong,
    /// Only a non-empty authenticated username may sign the book.
    AnonymousAuthor,
}

/// The append-only, ordered guestbook.
///
/// Length validation happens here at write time; escaping happens at
/// render time in the view layer.
pub struct GuestbookStore {
    entries: Vec<GuestbookEntry>,
}

impl GuestbookStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, text: &str, author: &str) -> Result<(), AppendError> {
        if author.is_empty() {
            return Err(AppendError::AnonymousAuthor);
        }
        if text.chars().count() > config().max_entry_len {
            return Err(AppendError::TooLong);
        }
        self.entries.push(GuestbookEntry {
            text: text.to_string(),
            author: author.to_string(),
        });
        Ok(())
    }

    pub fn entries(&self) -> &[GuestbookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GuestbookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order() {
        let mut book = GuestbookStore::new();
        book.append("first", "crashoverride").unwrap();
        book.append("second", "cerealkiller").unwrap();
        let texts: Vec<&str> = book.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let mut book = GuestbookStore::new();
        // 100 two-byte characters: within the character limit.
        let ok = "é".repeat(100);
        assert_eq!(book.append(&ok, "crashoverride"), Ok(()));

        let too_long = "é".repeat(101);
        assert_eq!(
            book.append(&too_long, "crashoverride"),
            Err(AppendError::TooLong)
        );
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn anonymous_author_is_rejected() {
        let mut book = GuestbookStore::new();
        assert_eq!(book.append("hi", ""), Err(AppendError::AnonymousAuthor));
        assert!(book.is_empty());
    }
}
