/// Read-only view of a host-owned request.
///
/// The asset handler only ever looks at the URL.
pub trait SchemeRequest {
    fn url(&self) -> &str;
}

impl SchemeRequest for str {
    fn url(&self) -> &str {
        self
    }
}

impl SchemeRequest for String {
    fn url(&self) -> &str {
        self.as_str()
    }
}
