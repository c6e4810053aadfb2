use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use pengu_core::{
    ports::{AssetFileSystemPort, AssetStream, EntryKind, MimeSnifferPort, RequestCallback, SchemeRequest},
    CachePolicy, HandlerState, MimeType, PathPolicy, ReadOutcome, RejectReason, ResolvedPath,
    ResponseHead, SchemeRoot,
};

/// Serves one `pengu://` request from the scheme root.
///
/// The host drives it through [`process_request`](Self::process_request),
/// [`response_headers`](Self::response_headers) and repeated
/// [`read_response`](Self::read_response) calls, and may
/// [`cancel`](Self::cancel) at any point. The open stream is released on
/// exhaustion, read failure, cancellation or drop, and is never reopened.
pub struct AssetRequestHandler {
    root: Arc<SchemeRoot>,
    policy: PathPolicy,
    cache_policy: CachePolicy,
    mime_sniffer: Arc<dyn MimeSnifferPort>,
    file_system: Arc<dyn AssetFileSystemPort>,
    state: HandlerState,
    resolved: Option<ResolvedPath>,
    mime_type: MimeType,
    stream: Option<Box<dyn AssetStream>>,
    length: u64,
}

impl AssetRequestHandler {
    pub(crate) fn new(
        root: Arc<SchemeRoot>,
        policy: PathPolicy,
        cache_policy: CachePolicy,
        mime_sniffer: Arc<dyn MimeSnifferPort>,
        file_system: Arc<dyn AssetFileSystemPort>,
    ) -> Self {
        Self {
            root,
            policy,
            cache_policy,
            mime_sniffer,
            file_system,
            state: HandlerState::Idle,
            resolved: None,
            mime_type: MimeType::empty(),
            stream: None,
            length: 0,
        }
    }

    /// Resolves the request URL and opens the asset.
    ///
    /// On acceptance `callback` is fired exactly once before returning. On
    /// rejection it is dropped without being fired and no stream stays open.
    pub fn process_request<R: SchemeRequest + ?Sized>(
        &mut self,
        request: &R,
        callback: Box<dyn RequestCallback>,
    ) -> Result<(), RejectReason> {
        if self.state != HandlerState::Idle {
            return Err(RejectReason::AlreadyProcessed);
        }
        self.state = HandlerState::Processing;

        match self.open_asset(request.url()) {
            Ok(()) => {
                self.state = HandlerState::Serving;
                callback.cont();
                Ok(())
            }
            Err(reason) => {
                self.stream = None;
                self.state = HandlerState::Rejected;
                debug!(url = request.url(), %reason, "pengu request rejected");
                Err(reason)
            }
        }
    }

    fn open_asset(&mut self, raw_url: &str) -> Result<(), RejectReason> {
        let url = Url::parse(raw_url).map_err(|err| {
            debug!(url = raw_url, error = %err, "failed to parse pengu url");
            RejectReason::UnparseableUrl
        })?;

        let resolved = ResolvedPath::resolve(
            &self.root,
            url.host_str().unwrap_or_default(),
            url.path(),
            self.policy,
        )?;

        self.mime_type = resolved
            .file_name()
            .and_then(|name| self.mime_sniffer.guess_mime_type(name))
            .unwrap_or_default();

        debug!(path = %resolved.as_path().display(), mime = %self.mime_type, "pengu request resolved");

        let path = self.resolved.insert(resolved).as_path();
        if self.file_system.entry_kind(path) != EntryKind::File {
            return Err(RejectReason::NotAFile);
        }

        let mut stream = self.file_system.open(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "failed to open asset");
            RejectReason::NotAFile
        })?;

        self.length = measure_length(&mut stream).map_err(|err| {
            warn!(path = %path.display(), error = %err, "failed to measure asset length");
            RejectReason::NotAFile
        })?;
        self.stream = Some(stream);

        Ok(())
    }

    /// Status, content type and total length of the accepted asset, plus
    /// caching headers when the factory enables them.
    pub fn response_headers(&self) -> ResponseHead {
        let head = ResponseHead::ok(self.mime_type.clone(), self.length);
        match (self.cache_policy, &self.resolved) {
            (CachePolicy::Immutable, Some(resolved)) => {
                head.with_cache_headers(resolved.as_path())
            }
            _ => head,
        }
    }

    /// Copies the next slice of the body into `buffer`.
    pub fn read_response(&mut self, buffer: &mut [u8]) -> ReadOutcome {
        let Some(stream) = self.stream.as_mut() else {
            return ReadOutcome::Done;
        };

        let cursor = match stream.stream_position() {
            Ok(cursor) => cursor,
            Err(err) => {
                warn!(error = %err, "asset stream position unavailable");
                self.close();
                return ReadOutcome::Done;
            }
        };

        if cursor >= self.length {
            self.close();
            return ReadOutcome::Done;
        }

        if buffer.is_empty() {
            return ReadOutcome::Data(0);
        }

        let remaining = self.length - cursor;
        let wanted = remaining.min(buffer.len() as u64) as usize;

        match read_retrying(stream, &mut buffer[..wanted]) {
            Ok(0) => {
                warn!(cursor, length = self.length, "asset ended before its measured length");
                self.close();
                ReadOutcome::Done
            }
            Ok(read) => ReadOutcome::Data(read),
            Err(err) => {
                warn!(cursor, error = %err, "failed to read asset");
                self.close();
                ReadOutcome::Done
            }
        }
    }

    /// Aborts the response and releases the stream. Safe in any state.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.stream = None;
        self.state = HandlerState::Closed;
    }

    pub fn state(&self) -> HandlerState {
        self.state
    }

    /// Path the request URL resolved to, if resolution got that far.
    pub fn resolved_path(&self) -> Option<&ResolvedPath> {
        self.resolved.as_ref()
    }

    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    pub fn content_length(&self) -> u64 {
        self.length
    }

    pub fn is_stream_open(&self) -> bool {
        self.stream.is_some()
    }
}

fn measure_length(stream: &mut Box<dyn AssetStream>) -> io::Result<u64> {
    let length = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;
    Ok(length)
}

fn read_retrying(stream: &mut Box<dyn AssetStream>, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buffer) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
