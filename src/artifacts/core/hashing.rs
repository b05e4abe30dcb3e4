//! Content hashes used for interdiff equality checks and comment anchors
//!
//! A `ContentHash` is the SHA-1 digest of a line's bytes followed by a
//! newline marker byte, so `"a"` and `"a\n"` hash differently. Range hashes
//! chain the per-line digests in order.

use sha1::{Digest, Sha1};

const NEWLINE_MARKER: u8 = 1;
const NO_NEWLINE_MARKER: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ContentHash([u8; 20]);

impl ContentHash {
    pub fn of_line(content: &str, has_newline: bool) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content.as_bytes());
        hasher.update([if has_newline {
            NEWLINE_MARKER
        } else {
            NO_NEWLINE_MARKER
        }]);
        Self(hasher.finalize().into())
    }

    /// Hash of a whole file's content, used as a revision id
    pub fn of_text(text: &str) -> Self {
        Self(Sha1::digest(text.as_bytes()).into())
    }

    /// Hash of an ordered run of hashes
    pub fn of_sequence<'h, I>(hashes: I) -> Self
    where
        I: IntoIterator<Item = &'h ContentHash>,
    {
        let mut hasher = Sha1::new();
        for hash in hashes {
            hasher.update(hash.0);
        }
        Self(hasher.finalize().into())
    }

    /// Abbreviated hex form, as used in debug output
    pub fn to_short_hex(&self) -> String {
        self.to_string().split_at(7).0.to_string()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
