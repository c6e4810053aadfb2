use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use pengu_core::{ports::SchemeRequest, RejectReason, ResolvedPath, ResponseHead};

use super::SchemeHandlerFactory;

/// Chunk size used when pulling the body, matching a typical host read buffer.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Fully buffered asset response.
#[derive(Debug, Clone)]
pub struct ServedAsset {
    pub head: ResponseHead,
    pub path: Option<PathBuf>,
    pub body: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("request rejected: {0}")]
    Rejected(#[from] RejectReason),

    #[error("failed to write asset body: {0}")]
    Write(#[source] io::Error),

    /// The asset stopped short of the length announced in the head.
    #[error("asset body truncated: {written} of {expected} bytes served")]
    Truncated { expected: u64, written: u64 },
}

impl ServeError {
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            ServeError::Rejected(reason) => Some(*reason),
            ServeError::Write(_) | ServeError::Truncated { .. } => None,
        }
    }
}

/// Drives one handler through its whole lifecycle, the way a webview host
/// does: create, process, query headers, then pull the body chunk by chunk
/// until the handler reports it is done.
pub struct ServeAssetUseCase {
    factory: Arc<SchemeHandlerFactory>,
    chunk_size: usize,
}

impl ServeAssetUseCase {
    pub fn new(factory: Arc<SchemeHandlerFactory>) -> Self {
        Self {
            factory,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Serves `request` into memory.
    pub fn execute<R: SchemeRequest + ?Sized>(&self, request: &R) -> Result<ServedAsset, ServeError> {
        let mut body = Vec::new();
        let (head, path) = self.stream_into(request, &mut body)?;
        Ok(ServedAsset { head, path, body })
    }

    /// Serves `request` into `writer`, returning the response head and the
    /// resolved path. The handler is cancelled if the writer fails.
    ///
    /// A body that ends before the length announced in the head is reported as
    /// [`ServeError::Truncated`]; whatever was already written stays written.
    pub fn stream_into<R: SchemeRequest + ?Sized, W: Write>(
        &self,
        request: &R,
        writer: &mut W,
    ) -> Result<(ResponseHead, Option<PathBuf>), ServeError> {
        let mut handler = self.factory.create(self.factory.scheme_name(), request);

        let continued = Arc::new(AtomicBool::new(false));
        let signal = Arc::clone(&continued);
        handler.process_request(
            request,
            Box::new(move || signal.store(true, Ordering::SeqCst)),
        )?;
        debug_assert!(continued.load(Ordering::SeqCst));

        let head = handler.response_headers();
        let path = handler
            .resolved_path()
            .cloned()
            .map(ResolvedPath::into_path_buf);

        let mut chunk = vec![0u8; self.chunk_size];
        let mut written: u64 = 0;
        loop {
            let outcome = handler.read_response(&mut chunk);
            if !outcome.has_more() {
                break;
            }
            let read = outcome.bytes_read();
            if let Err(err) = writer.write_all(&chunk[..read]) {
                handler.cancel();
                return Err(ServeError::Write(err));
            }
            written += read as u64;
        }

        if written < head.content_length {
            warn!(
                url = request.url(),
                written,
                length = head.content_length,
                "pengu asset body ended early"
            );
            return Err(ServeError::Truncated {
                expected: head.content_length,
                written,
            });
        }

        debug!(
            url = request.url(),
            written,
            length = head.content_length,
            "pengu asset served"
        );

        Ok((head, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pengu_core::{
        ports::{AssetFileSystemPort, AssetStream, EntryKind, MimeSnifferPort},
        MimeType, SchemeRoot,
    };
    use std::ffi::OsStr;
    use std::io::Cursor;
    use std::path::Path;

    struct HtmlOnly;

    impl MimeSnifferPort for HtmlOnly {
        fn guess_mime_type(&self, file_name: &OsStr) -> Option<MimeType> {
            file_name
                .to_str()
                .filter(|name| name.ends_with(".html"))
                .map(|_| MimeType::from("text/html"))
        }
    }

    struct SingleFile(&'static [u8]);

    impl AssetFileSystemPort for SingleFile {
        fn entry_kind(&self, path: &Path) -> EntryKind {
            if path == Path::new("/assets/www/index.html") {
                EntryKind::File
            } else {
                EntryKind::Missing
            }
        }

        fn open(&self, _path: &Path) -> io::Result<Box<dyn AssetStream>> {
            Ok(Box::new(Cursor::new(self.0.to_vec())))
        }
    }

    /// Stream that announces `length` bytes but fails after `good`.
    struct ShortStream {
        position: u64,
        length: u64,
        good: u64,
    }

    impl io::Read for ShortStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.position >= self.good {
                return Err(io::Error::other("device removed"));
            }
            let n = (self.good - self.position).min(buf.len() as u64) as usize;
            buf[..n].fill(b'x');
            self.position += n as u64;
            Ok(n)
        }
    }

    impl io::Seek for ShortStream {
        fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
            self.position = match pos {
                io::SeekFrom::Start(offset) => offset,
                io::SeekFrom::End(offset) => (self.length as i64 + offset) as u64,
                io::SeekFrom::Current(offset) => (self.position as i64 + offset) as u64,
            };
            Ok(self.position)
        }
    }

    struct ShortFile;

    impl AssetFileSystemPort for ShortFile {
        fn entry_kind(&self, _path: &Path) -> EntryKind {
            EntryKind::File
        }

        fn open(&self, _path: &Path) -> io::Result<Box<dyn AssetStream>> {
            Ok(Box::new(ShortStream {
                position: 0,
                length: 32,
                good: 4,
            }))
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn use_case(bytes: &'static [u8]) -> ServeAssetUseCase {
        let factory = SchemeHandlerFactory::new(
            SchemeRoot::from("/assets"),
            Arc::new(HtmlOnly),
            Arc::new(SingleFile(bytes)),
        );
        ServeAssetUseCase::new(Arc::new(factory))
    }

    #[test]
    fn serves_whole_body_with_head() {
        let served = use_case(b"<html></html>\n")
            .with_chunk_size(4)
            .execute("pengu://www/index.html")
            .unwrap();

        assert_eq!(served.head.status, 200);
        assert_eq!(served.head.mime_type.as_str(), "text/html");
        assert_eq!(served.head.content_length, 14);
        assert_eq!(served.body, b"<html></html>\n");
        assert_eq!(served.path, Some(PathBuf::from("/assets/www/index.html")));
    }

    #[test]
    fn missing_asset_surfaces_reject_reason() {
        let err = use_case(b"").execute("pengu://www/missing.html").unwrap_err();

        assert_eq!(err.reject_reason(), Some(RejectReason::NotAFile));
    }

    #[test]
    fn writer_failure_is_reported() {
        let err = use_case(b"<html></html>\n")
            .stream_into("pengu://www/index.html", &mut FailingWriter)
            .unwrap_err();

        assert!(matches!(err, ServeError::Write(_)));
        assert_eq!(err.reject_reason(), None);
    }

    #[test]
    fn body_shorter_than_announced_length_is_an_error() {
        let factory = SchemeHandlerFactory::new(
            SchemeRoot::from("/assets"),
            Arc::new(HtmlOnly),
            Arc::new(ShortFile),
        );
        let use_case = ServeAssetUseCase::new(Arc::new(factory));
        let mut body = Vec::new();

        let err = use_case
            .stream_into("pengu://www/a.bin", &mut body)
            .unwrap_err();

        assert!(matches!(
            err,
            ServeError::Truncated {
                expected: 32,
                written: 4
            }
        ));
        assert_eq!(err.reject_reason(), None);
        assert_eq!(body, b"xxxx");
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let served = use_case(b"abc")
            .with_chunk_size(0)
            .execute("pengu://www/index.html")
            .unwrap();

        assert_eq!(served.body, b"abc");
    }
}
