//! Entry points into the async world: synchronous sequences and `futures`
//! streams.

use futures::{Stream, StreamExt};
use seqflow_core::{Cursor, Error, Result, Sequence, NOT_POSITIONED};
use tokio_util::sync::CancellationToken;

use crate::sequence::{check_cancelled, AsyncCursor, AsyncSequence};

// ----- sync -> async -----

/// A synchronous sequence seen as an async one. Advancing never suspends;
/// cancellation is still checked per element.
#[derive(Debug, Clone)]
pub struct AsAsync<S> {
    source: S,
}

pub fn as_async<S: Sequence>(source: S) -> AsAsync<S> {
    AsAsync { source }
}

/// Method form of [`as_async`].
pub trait IntoAsync: Sequence + Sized {
    fn as_async(self) -> AsAsync<Self> {
        as_async(self)
    }
}

impl<S: Sequence> IntoAsync for S {}

pub struct AsAsyncCursor<C> {
    inner: C,
    token: CancellationToken,
}

impl<C: Cursor> AsyncCursor for AsAsyncCursor<C> {
    type Item = C::Item;

    async fn advance(&mut self) -> Result<bool> {
        check_cancelled(&self.token)?;
        Ok(self.inner.advance())
    }

    fn current(&self) -> &C::Item {
        self.inner.current()
    }
}

impl<S: Sequence> AsyncSequence for AsAsync<S> {
    type Item = S::Item;
    type Cursor<'s> = AsAsyncCursor<S::Cursor<'s>> where Self: 's;

    fn cursor(&self, token: CancellationToken) -> Self::Cursor<'_> {
        AsAsyncCursor {
            inner: self.source.cursor(),
            token,
        }
    }
}

// ----- Stream -> async -----

/// An async sequence backed by a stream factory. Each traversal calls the
/// factory for a fresh stream.
#[derive(Debug, Clone)]
pub struct FromStream<F> {
    factory: F,
}

pub fn from_stream<F, St>(factory: F) -> FromStream<F>
where
    F: Fn() -> St,
    St: Stream + Unpin,
{
    FromStream { factory }
}

pub struct StreamCursor<St: Stream> {
    stream: St,
    current: Option<St::Item>,
    token: CancellationToken,
}

impl<St: Stream + Unpin> AsyncCursor for StreamCursor<St> {
    type Item = St::Item;

    async fn advance(&mut self) -> Result<bool> {
        check_cancelled(&self.token)?;
        // A stream that never yields must still observe cancellation.
        let next = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(Error::Cancelled),
            item = self.stream.next() => item,
        };
        self.current = next;
        Ok(self.current.is_some())
    }

    fn current(&self) -> &St::Item {
        self.current.as_ref().expect(NOT_POSITIONED)
    }

    async fn release(&mut self) {
        self.current = None;
    }
}

impl<F, St> AsyncSequence for FromStream<F>
where
    F: Fn() -> St,
    St: Stream + Unpin,
{
    type Item = St::Item;
    type Cursor<'s> = StreamCursor<St> where Self: 's;

    fn cursor(&self, token: CancellationToken) -> StreamCursor<St> {
        StreamCursor {
            stream: (self.factory)(),
            current: None,
            token,
        }
    }
}
