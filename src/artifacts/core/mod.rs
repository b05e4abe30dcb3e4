//! Core utilities and shared types
//!
//! This module contains the types shared by every pipeline stage:
//!
//! - `config`: display policy and resource budget
//! - `error`: the pipeline's error taxonomy
//! - `hashing`: content hashes for equality checks and comment anchors
//!
//! It also carries the pager adapter the CLI writes through.

pub mod config;
pub mod error;
pub mod hashing;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding rendered diffs into the minus pager
///
/// The pager only accepts whole strings. Diff rows are written piecewise
/// through `writeln!`, so a multi-byte character can be split across two
/// writes; the incomplete tail is held back until the rest arrives.
///
/// ```ignore
/// let pager = Pager::new();
/// let session = Session::new(Box::new(PagerWriter::new(pager.clone())), config);
/// session.diff(old, new)?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
    #[new(default)]
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let complete = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                self.pending.clear();
                return Err(io::Error::new(io::ErrorKind::InvalidData, e));
            }
        };

        let rest = self.pending.split_off(complete);
        let text = String::from_utf8(std::mem::replace(&mut self.pending, rest))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if !text.is_empty() {
            self.pager.push_str(text).map_err(io::Error::other)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
