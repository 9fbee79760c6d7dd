//! Text encoding used for reading filters and templates and writing outputs.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{Error, Result};

/// A resolved text encoding.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    /// Looks up an encoding by label (`UTF-8`, `ISO-8859-1`, `windows-1252`, ...).
    pub fn for_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decodes `bytes`, dropping a leading byte order mark for this encoding.
    ///
    /// Returns `None` when the input is malformed.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, had_errors) = self.0.decode_with_bom_removal(bytes);
        if had_errors {
            None
        } else {
            Some(text.into_owned())
        }
    }

    /// Encodes `text`, returning `None` when a character cannot be represented.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        let (bytes, _, had_unmappable) = self.0.encode(text);
        if had_unmappable {
            None
        } else {
            Some(bytes.into_owned())
        }
    }

    /// Reads and decodes a whole file.
    ///
    /// `on_io_error` turns a failed read into the caller's error kind.
    pub fn read_to_string<F>(&self, path: &Path, on_io_error: F) -> Result<String>
    where
        F: FnOnce(io::Error) -> Error,
    {
        let bytes = fs::read(path).map_err(on_io_error)?;
        self.decode(&bytes).ok_or_else(|| Error::EncodingError {
            path: path.to_path_buf(),
            encoding: self.name().to_string(),
        })
    }

    /// Encodes `text` for writing to `path`.
    pub fn encode_for(&self, path: &Path, text: &str) -> Result<Vec<u8>> {
        self.encode(text).ok_or_else(|| Error::EncodingError {
            path: path.to_path_buf(),
            encoding: self.name().to_string(),
        })
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding(encoding_rs::UTF_8)
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
