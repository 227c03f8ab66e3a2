//! Async counterparts of `Sequence` and `Cursor`.

use std::future::Future;

use seqflow_core::Result;
use tokio_util::sync::CancellationToken;

/// Traversal state with an awaitable advance and an awaitable release.
///
/// Same positioning rules as the synchronous cursor: `current()` is valid
/// only after `advance()` resolved to `Ok(true)`, and only until the next
/// `advance()`. After `Ok(false)` or an error the cursor must not be advanced
/// again; it must still be released.
pub trait AsyncCursor {
    type Item;

    /// Resolves to `Ok(true)` if `current()` is now valid, `Ok(false)` at the
    /// end, `Err(Cancelled)` once the traversal's token has fired.
    fn advance(&mut self) -> impl Future<Output = Result<bool>>;

    fn current(&self) -> &Self::Item;

    /// Release held resources. Called exactly once per cursor by whoever
    /// drives it.
    fn release(&mut self) -> impl Future<Output = ()> {
        async {}
    }
}

/// Immutable description of an asynchronous iteration.
pub trait AsyncSequence {
    type Item;
    type Cursor<'s>: AsyncCursor<Item = Self::Item>
    where
        Self: 's;

    /// Start an independent traversal observing `token`.
    fn cursor(&self, token: CancellationToken) -> Self::Cursor<'_>;
}

impl<S: AsyncSequence + ?Sized> AsyncSequence for &S {
    type Item = S::Item;
    type Cursor<'s> = S::Cursor<'s> where Self: 's;

    fn cursor(&self, token: CancellationToken) -> Self::Cursor<'_> {
        (**self).cursor(token)
    }
}

/// Fails `Cancelled` if `token` has fired.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        Err(seqflow_core::Error::Cancelled)
    } else {
        Ok(())
    }
}
