/// Host signal telling the runtime that a request was accepted and headers
/// may be queried.
///
/// Consumed on use, so a handler can fire it at most once.
pub trait RequestCallback: Send {
    fn cont(self: Box<Self>);
}

impl<F: FnOnce() + Send> RequestCallback for F {
    fn cont(self: Box<Self>) {
        (*self)()
    }
}
