use std::path::Path;

use crate::mime::MimeType;

pub const HEADER_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const HEADER_CACHE_CONTROL: &str = "Cache-Control";
pub const HEADER_ETAG: &str = "Etag";

const CACHE_NO_STORE: &str = "no-store";
const CACHE_IMMUTABLE: &str = "max-age=31536000, immutable";

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Caching headers attached to accepted responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// No caching headers; the host decides.
    #[default]
    Disabled,
    /// Scripts get `no-store`; everything else is immutable for a year and
    /// tagged with a hash of its path.
    Immutable,
}

impl CachePolicy {
    pub fn from_cache_flag(cache_headers: bool) -> Self {
        if cache_headers {
            CachePolicy::Immutable
        } else {
            CachePolicy::Disabled
        }
    }
}

/// Response metadata produced once per accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    /// Sniffed content type; empty when sniffing failed.
    pub mime_type: MimeType,
    pub headers: Vec<(String, String)>,
    /// Total body length in bytes, always counted from offset zero.
    pub content_length: u64,
    /// Never set by the asset handler; kept for hosts that model redirects.
    pub redirect_url: Option<String>,
}

impl ResponseHead {
    /// Full-body `200` response with the permissive cross-origin header.
    pub fn ok(mime_type: MimeType, content_length: u64) -> Self {
        Self {
            status: 200,
            mime_type,
            headers: vec![(HEADER_ALLOW_ORIGIN.to_string(), "*".to_string())],
            content_length,
            redirect_url: None,
        }
    }

    /// Adds `Cache-Control` (and `Etag` for cacheable assets) for `path`.
    pub fn with_cache_headers(mut self, path: &Path) -> Self {
        if is_script(&self.mime_type) {
            self.push_header(HEADER_CACHE_CONTROL, CACHE_NO_STORE);
        } else {
            self.push_header(HEADER_CACHE_CONTROL, CACHE_IMMUTABLE);
            self.push_header(HEADER_ETAG, etag_for(path));
        }
        self
    }

    fn push_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Result of one body pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// `n` bytes were written into the buffer; more may follow.
    Data(usize),
    /// Zero bytes; the body is exhausted or the stream is gone.
    Done,
}

impl ReadOutcome {
    pub fn bytes_read(&self) -> usize {
        match self {
            ReadOutcome::Data(n) => *n,
            ReadOutcome::Done => 0,
        }
    }

    pub fn has_more(&self) -> bool {
        matches!(self, ReadOutcome::Data(_))
    }
}

fn is_script(mime_type: &MimeType) -> bool {
    matches!(
        mime_type.as_str(),
        "text/javascript" | "application/javascript"
    )
}

/// Quoted 64-bit FNV-1a hash of the path, as 16 hex digits.
fn etag_for(path: &Path) -> String {
    format!("\"{:016x}\"", fnv1a_64(path.to_string_lossy().as_bytes()))
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_head_allows_any_origin() {
        let head = ResponseHead::ok(MimeType::from("text/html"), 17);

        assert_eq!(head.status, 200);
        assert_eq!(head.content_length, 17);
        assert_eq!(head.header("access-control-allow-origin"), Some("*"));
        assert!(head.redirect_url.is_none());
    }

    #[test]
    fn fnv1a_matches_reference_vectors() {
        assert_eq!(fnv1a_64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn cacheable_asset_is_immutable_and_tagged() {
        let path = Path::new("/assets/www/logo.png");
        let head = ResponseHead::ok(MimeType::from("image/png"), 10).with_cache_headers(path);

        assert_eq!(
            head.header("cache-control"),
            Some("max-age=31536000, immutable")
        );
        let etag = head.header("etag").unwrap();
        assert_eq!(etag.len(), 18);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, etag_for(path));
        assert_ne!(etag, etag_for(Path::new("/assets/www/other.png")));
    }

    #[test]
    fn scripts_are_never_stored() {
        for mime in ["text/javascript", "application/javascript"] {
            let head = ResponseHead::ok(MimeType::from(mime), 10)
                .with_cache_headers(Path::new("/assets/www/app.js"));

            assert_eq!(head.header("cache-control"), Some("no-store"), "{mime}");
            assert!(head.header("etag").is_none(), "{mime}");
        }
    }

    #[test]
    fn cache_flag_maps_to_policy() {
        assert_eq!(CachePolicy::from_cache_flag(true), CachePolicy::Immutable);
        assert_eq!(CachePolicy::from_cache_flag(false), CachePolicy::Disabled);
        assert_eq!(CachePolicy::default(), CachePolicy::Disabled);
    }

    #[test]
    fn done_reports_zero_bytes() {
        assert_eq!(ReadOutcome::Done.bytes_read(), 0);
        assert!(!ReadOutcome::Done.has_more());
        assert_eq!(ReadOutcome::Data(4).bytes_read(), 4);
        assert!(ReadOutcome::Data(0).has_more());
    }
}
