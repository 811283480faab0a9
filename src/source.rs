//! Source text coercion.
//!
//! The engine accepts whatever the caller has on hand — owned strings,
//! byte buffers, readers, or file paths — and coerces it to one owned
//! text blob up front. Invalid UTF-8 is replaced rather than rejected;
//! only a source that cannot be read at all is an input error.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use crate::error::{InputError, Result};

/// An owned, immutable source text blob.
///
/// # Examples
///
/// ```
/// use gist_rs::SourceText;
///
/// let source = SourceText::from("some text");
/// assert_eq!(source.len(), 9);
/// assert!(!source.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText(String);

impl SourceText {
    /// Reads the entire contents of a reader into a source text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ReadFailed`] if the reader fails.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(InputError::from)?;
        Ok(Self::from(bytes))
    }

    /// Reads a file into a source text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ReadFailed`] if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(InputError::from)?;
        Ok(Self::from(bytes))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the byte length of the text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the source and returns the owned text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<Vec<u8>> for SourceText {
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8_lossy(&bytes) {
            Cow::Borrowed(_) => {
                // Valid UTF-8; reuse the allocation.
                Self(String::from_utf8(bytes).unwrap_or_default())
            }
            Cow::Owned(replaced) => Self(replaced),
        }
    }
}

impl From<&[u8]> for SourceText {
    fn from(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_str() {
        let source = SourceText::from("hello");
        assert_eq!(source.as_str(), "hello");
        assert_eq!(source.len(), 5);
    }

    #[test]
    fn test_from_string() {
        let source = SourceText::from("hello".to_string());
        assert_eq!(source.into_inner(), "hello");
    }

    #[test]
    fn test_from_valid_bytes() {
        let source = SourceText::from(b"hello".to_vec());
        assert_eq!(source.as_str(), "hello");
    }

    #[test]
    fn test_from_invalid_bytes_is_lossy() {
        let source = SourceText::from(vec![b'h', b'i', 0xff, b'!']);
        assert!(source.as_str().starts_with("hi"));
        assert!(source.as_str().contains('\u{fffd}'));
    }

    #[test]
    fn test_from_byte_slice() {
        let source = SourceText::from(b"slice".as_slice());
        assert_eq!(source.as_str(), "slice");
    }

    #[test]
    fn test_empty() {
        let source = SourceText::from("");
        assert!(source.is_empty());
        assert_eq!(source.len(), 0);
    }

    #[test]
    fn test_from_reader() {
        let source = SourceText::from_reader(std::io::Cursor::new(b"streamed".to_vec())).unwrap();
        assert_eq!(source.as_str(), "streamed");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file contents").unwrap();
        let source = SourceText::from_path(file.path()).unwrap();
        assert_eq!(source.as_str(), "file contents");
    }

    #[test]
    fn test_from_path_missing() {
        let result = SourceText::from_path("/definitely/not/here.txt");
        assert!(result.is_err());
    }
}
