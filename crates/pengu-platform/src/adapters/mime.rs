//! Extension-based MIME sniffing
//!
//! Stands in for the OS content-type facility with the `mime_guess` table.

use std::ffi::OsStr;
use std::path::Path;

use pengu_core::{ports::MimeSnifferPort, MimeType};

/// MIME sniffer backed by the `mime_guess` extension table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeGuessSniffer;

impl MimeGuessSniffer {
    pub fn new() -> Self {
        Self
    }
}

impl MimeSnifferPort for MimeGuessSniffer {
    fn guess_mime_type(&self, file_name: &OsStr) -> Option<MimeType> {
        mime_guess::from_path(Path::new(file_name))
            .first_raw()
            .map(MimeType::from)
    }
}
