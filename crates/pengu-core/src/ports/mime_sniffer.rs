use std::ffi::OsStr;
use std::sync::Arc;

use crate::mime::MimeType;

/// Best-guess content type for a file name.
///
/// Implementations usually look at the extension only. `None` means the type
/// is unknown and the asset is served with an empty content type.
pub trait MimeSnifferPort: Send + Sync {
    fn guess_mime_type(&self, file_name: &OsStr) -> Option<MimeType>;
}

impl<T: MimeSnifferPort + ?Sized> MimeSnifferPort for Arc<T> {
    fn guess_mime_type(&self, file_name: &OsStr) -> Option<MimeType> {
        (**self).guess_mime_type(file_name)
    }
}
