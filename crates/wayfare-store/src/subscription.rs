use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;
use wayfare_types::{Document, Filter};

use crate::error::Result;

/// Every document matching a live query at one moment, in insertion order.
pub type Snapshot = Vec<Document>;

/// Live query handle.
///
/// Yields a full [`Snapshot`] each time the matching set changes, starting with
/// the current contents. The backend stops delivering as soon as the handle is
/// dropped or [`Subscription::unsubscribe`] is called; snapshots still queued at
/// that point are discarded with the handle.
pub struct Subscription {
    collection: String,
    filter: Filter,
    receiver: UnboundedReceiver<Result<Snapshot>>,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(
        collection: impl Into<String>,
        filter: Filter,
        receiver: UnboundedReceiver<Result<Snapshot>>,
        cancel: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            collection: collection.into(),
            filter,
            receiver,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Poll for the next snapshot (non-blocking).
    ///
    /// Returns `None` if nothing is queued right now or the feed has ended.
    pub fn try_next(&mut self) -> Option<Result<Snapshot>> {
        match self.try_poll_next() {
            Poll::Ready(item) => item,
            Poll::Pending => None,
        }
    }

    /// Non-blocking poll with stream semantics: `Pending` when nothing is
    /// queued, `Ready(None)` once the backend has closed the feed.
    pub fn try_poll_next(&mut self) -> Poll<Option<Result<Snapshot>>> {
        match self.receiver.try_recv() {
            Ok(item) => Poll::Ready(Some(item)),
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Disconnected) => Poll::Ready(None),
        }
    }

    /// Stop the live query now. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.terminate();
    }

    fn terminate(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            tracing::debug!(collection = %self.collection, filter = %self.filter, "unsubscribe");
            cancel();
        }
        self.receiver.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl Stream for Subscription {
    type Item = Result<Snapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("collection", &self.collection)
            .field("filter", &self.filter)
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
