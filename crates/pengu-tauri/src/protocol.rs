use http::{header, Request, Response, StatusCode};

use pengu_app::{ServeAssetUseCase, ServeError, ServedAsset};
use pengu_core::{ports::SchemeRequest, RejectReason};

/// Parsed `pengu://` request handed to the scheme handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenguRequest {
    url: String,
}

impl SchemeRequest for PenguRequest {
    fn url(&self) -> &str {
        &self.url
    }
}

/// Errors when translating a host request into a `pengu://` request.
#[derive(Debug, thiserror::Error)]
pub enum PenguRequestError {
    #[error("Unsupported request scheme: {0}")]
    UnsupportedScheme(String),
}

impl PenguRequestError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn response_message(&self) -> &'static str {
        match self {
            PenguRequestError::UnsupportedScheme(_) => "Unsupported request scheme",
        }
    }
}

/// Parse a host request into a `pengu://` URL.
///
/// Webviews that cannot load custom schemes directly (WebView2, Android)
/// deliver them as `http(s)://<scheme>.localhost/<host>/<path>`; those are
/// mapped back so the first path segment becomes the host again.
pub fn parse_pengu_request<B>(
    request: &Request<B>,
    scheme: &str,
) -> Result<PenguRequest, PenguRequestError> {
    let uri = request.uri();
    let request_scheme = uri.scheme_str().unwrap_or_default();

    if request_scheme.eq_ignore_ascii_case(scheme) {
        return Ok(PenguRequest {
            url: uri.to_string(),
        });
    }

    let localhost = format!("{scheme}.localhost");
    let is_localhost_alias = matches!(request_scheme, "http" | "https")
        && uri
            .host()
            .is_some_and(|host| host.eq_ignore_ascii_case(&localhost));

    if is_localhost_alias {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        return Ok(PenguRequest {
            url: format!("{scheme}://{}", path_and_query.trim_start_matches('/')),
        });
    }

    Err(PenguRequestError::UnsupportedScheme(request_scheme.to_string()))
}

/// Build the host response for an accepted request.
///
/// `Content-Type` is only set when sniffing produced a type.
pub fn build_response(served: ServedAsset) -> Response<Vec<u8>> {
    let head = served.head;
    tracing::debug!(
        path = ?served.path,
        status = head.status,
        length = head.content_length,
        "pengu response built"
    );
    let mut builder = Response::builder()
        .status(head.status)
        .header(header::CONTENT_LENGTH, head.content_length);

    if !head.mime_type.is_empty() {
        builder = builder.header(header::CONTENT_TYPE, head.mime_type.as_str());
    }
    for (name, value) in &head.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder.body(served.body).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid pengu response head");
        empty_response(StatusCode::INTERNAL_SERVER_ERROR)
    })
}

/// Map a refused or failed request onto the host's generic failure response.
///
/// A body that ended early is never sent with a `200`, since its
/// `Content-Length` would no longer match.
pub fn rejection_response(error: &ServeError) -> Response<Vec<u8>> {
    let status = match error.reject_reason() {
        Some(RejectReason::NotAFile) | Some(RejectReason::EscapesRoot) => StatusCode::NOT_FOUND,
        Some(RejectReason::UnparseableUrl) | Some(RejectReason::AlreadyProcessed) => {
            StatusCode::BAD_REQUEST
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    };
    empty_response(status)
}

/// Serve one host request end to end.
pub fn handle_pengu_request<B>(
    use_case: &ServeAssetUseCase,
    scheme: &str,
    request: &Request<B>,
) -> Response<Vec<u8>> {
    let pengu_request = match parse_pengu_request(request, scheme) {
        Ok(pengu_request) => pengu_request,
        Err(err) => {
            tracing::debug!(uri = %request.uri(), error = %err, "not a pengu request");
            return Response::builder()
                .status(err.status_code())
                .body(err.response_message().as_bytes().to_vec())
                .unwrap_or_else(|_| empty_response(err.status_code()));
        }
    };

    match use_case.execute(&pengu_request) {
        Ok(served) => build_response(served),
        Err(err) => rejection_response(&err),
    }
}

fn empty_response(status: StatusCode) -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Vec<u8>> {
        Request::builder()
            .uri(uri)
            .body(Vec::new())
            .expect("build request")
    }

    #[test]
    fn test_pengu_scheme_is_passed_through() {
        let parsed = parse_pengu_request(&request("pengu://www/index.html"), "pengu")
            .expect("expected pengu request");

        assert_eq!(parsed.url(), "pengu://www/index.html");
    }

    #[test]
    fn test_localhost_alias_is_mapped_back() {
        let parsed = parse_pengu_request(&request("http://pengu.localhost/www/index.html"), "pengu")
            .expect("expected pengu request");

        assert_eq!(parsed.url(), "pengu://www/index.html");
    }

    #[test]
    fn test_other_schemes_are_refused() {
        let err = parse_pengu_request(&request("https://example.com/index.html"), "pengu")
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, PenguRequestError::UnsupportedScheme(ref s) if s == "https"));
    }

    #[test]
    fn test_rejections_map_to_generic_failures() {
        let not_found = rejection_response(&ServeError::Rejected(RejectReason::NotAFile));
        let bad_url = rejection_response(&ServeError::Rejected(RejectReason::UnparseableUrl));

        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(bad_url.status(), StatusCode::BAD_REQUEST);
        assert!(not_found.body().is_empty());
    }
}
