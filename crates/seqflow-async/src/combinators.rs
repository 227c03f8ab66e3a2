//! Async filter and projections.
//!
//! Every cursor here forwards `release` to its upstream cursor, so a single
//! release at the end of a pipeline reaches the source.

use std::future::Future;

use seqflow_core::{Error, Result, NOT_POSITIONED};
use tokio_util::sync::CancellationToken;

use crate::sequence::{AsyncCursor, AsyncSequence};

// ----- filter -----

#[derive(Debug, Clone)]
pub struct AsyncFilter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> AsyncFilter<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> AsyncFilter<S, P>
where
    S: AsyncSequence,
    P: Fn(&S::Item) -> bool,
{
    /// `filter(a).filter(b)` becomes a single `filter(a && b)`.
    pub fn filter<Q>(self, next: Q) -> AsyncFilter<S, impl Fn(&S::Item) -> bool>
    where
        Q: Fn(&S::Item) -> bool,
    {
        let first = self.predicate;
        AsyncFilter::new(self.source, move |item: &S::Item| first(item) && next(item))
    }
}

pub struct AsyncFilterCursor<C, P> {
    inner: C,
    predicate: P,
}

impl<C, P> AsyncCursor for AsyncFilterCursor<C, P>
where
    C: AsyncCursor,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    async fn advance(&mut self) -> Result<bool> {
        while self.inner.advance().await? {
            if (self.predicate)(self.inner.current()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn current(&self) -> &C::Item {
        self.inner.current()
    }

    async fn release(&mut self) {
        self.inner.release().await;
    }
}

impl<S, P> AsyncSequence for AsyncFilter<S, P>
where
    S: AsyncSequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor<'s> = AsyncFilterCursor<S::Cursor<'s>, &'s P> where Self: 's;

    fn cursor(&self, token: CancellationToken) -> Self::Cursor<'_> {
        AsyncFilterCursor {
            inner: self.source.cursor(token),
            predicate: &self.predicate,
        }
    }
}

// ----- select -----

#[derive(Debug, Clone)]
pub struct AsyncSelect<S, F> {
    source: S,
    selector: F,
}

impl<S, F> AsyncSelect<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

impl<S, F, U> AsyncSelect<S, F>
where
    S: AsyncSequence,
    F: Fn(&S::Item) -> U,
{
    /// `select(f).select(g)` becomes a single `select(g(f(x)))`.
    pub fn select<G, V>(self, next: G) -> AsyncSelect<S, impl Fn(&S::Item) -> V>
    where
        G: Fn(&U) -> V,
    {
        let first = self.selector;
        AsyncSelect::new(self.source, move |item: &S::Item| next(&first(item)))
    }
}

pub struct AsyncSelectCursor<C, F, U> {
    inner: C,
    selector: F,
    current: Option<U>,
}

impl<C, F, U> AsyncCursor for AsyncSelectCursor<C, F, U>
where
    C: AsyncCursor,
    F: Fn(&C::Item) -> U,
{
    type Item = U;

    async fn advance(&mut self) -> Result<bool> {
        if self.inner.advance().await? {
            self.current = Some((self.selector)(self.inner.current()));
            Ok(true)
        } else {
            self.current = None;
            Ok(false)
        }
    }

    fn current(&self) -> &U {
        self.current.as_ref().expect(NOT_POSITIONED)
    }

    async fn release(&mut self) {
        self.current = None;
        self.inner.release().await;
    }
}

impl<S, F, U> AsyncSequence for AsyncSelect<S, F>
where
    S: AsyncSequence,
    F: Fn(&S::Item) -> U,
{
    type Item = U;
    type Cursor<'s> = AsyncSelectCursor<S::Cursor<'s>, &'s F, U> where Self: 's;

    fn cursor(&self, token: CancellationToken) -> Self::Cursor<'_> {
        AsyncSelectCursor {
            inner: self.source.cursor(token),
            selector: &self.selector,
            current: None,
        }
    }
}

// ----- select with an async selector -----

/// Projection whose selector is itself asynchronous and fallible. A pending
/// selector still observes the traversal's token.
#[derive(Debug, Clone)]
pub struct AsyncSelectAsync<S, F> {
    source: S,
    selector: F,
}

impl<S, F> AsyncSelectAsync<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

pub struct AsyncSelectAsyncCursor<C, F, U> {
    inner: C,
    selector: F,
    current: Option<U>,
    token: CancellationToken,
}

impl<C, F, Fut, U> AsyncCursor for AsyncSelectAsyncCursor<C, F, U>
where
    C: AsyncCursor,
    F: Fn(&C::Item) -> Fut,
    Fut: Future<Output = Result<U>>,
{
    type Item = U;

    async fn advance(&mut self) -> Result<bool> {
        self.current = None;
        if !self.inner.advance().await? {
            return Ok(false);
        }
        let pending = (self.selector)(self.inner.current());
        let value = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(Error::Cancelled),
            value = pending => value?,
        };
        self.current = Some(value);
        Ok(true)
    }

    fn current(&self) -> &U {
        self.current.as_ref().expect(NOT_POSITIONED)
    }

    async fn release(&mut self) {
        self.current = None;
        self.inner.release().await;
    }
}

impl<S, F, Fut, U> AsyncSequence for AsyncSelectAsync<S, F>
where
    S: AsyncSequence,
    F: Fn(&S::Item) -> Fut,
    Fut: Future<Output = Result<U>>,
{
    type Item = U;
    type Cursor<'s> = AsyncSelectAsyncCursor<S::Cursor<'s>, &'s F, U> where Self: 's;

    fn cursor(&self, token: CancellationToken) -> Self::Cursor<'_> {
        AsyncSelectAsyncCursor {
            inner: self.source.cursor(token.clone()),
            selector: &self.selector,
            current: None,
            token,
        }
    }
}

// ----- extension -----

pub trait AsyncSequenceExt: AsyncSequence + Sized {
    fn filter<P>(self, predicate: P) -> AsyncFilter<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        AsyncFilter::new(self, predicate)
    }

    fn select<F, U>(self, selector: F) -> AsyncSelect<Self, F>
    where
        F: Fn(&Self::Item) -> U,
    {
        AsyncSelect::new(self, selector)
    }

    fn select_async<F, Fut, U>(self, selector: F) -> AsyncSelectAsync<Self, F>
    where
        F: Fn(&Self::Item) -> Fut,
        Fut: Future<Output = Result<U>>,
    {
        AsyncSelectAsync::new(self, selector)
    }
}

impl<S: AsyncSequence> AsyncSequenceExt for S {}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::bridge::as_async;

    async fn drain<S: AsyncSequence>(seq: &S) -> Result<Vec<S::Item>>
    where
        S::Item: Clone,
    {
        let mut cursor = seq.cursor(CancellationToken::new());
        let mut out = Vec::new();
        let outcome = async {
            while cursor.advance().await? {
                out.push(cursor.current().clone());
            }
            Ok(())
        }
        .await;
        cursor.release().await;
        outcome.map(|()| out)
    }

    #[tokio::test]
    async fn filter_then_select() {
        let seq = as_async(vec![1, 2, 3, 4]).select(|x| x * x).filter(|x| *x > 5);
        assert_eq!(drain(&seq).await, Ok(vec![9, 16]));
    }

    #[tokio::test]
    async fn chained_filters_fuse_in_order() {
        let log = RefCell::new(Vec::new());
        let seq: AsyncFilter<_, _> = as_async(vec![1, 2, 3])
            .filter(|x| {
                log.borrow_mut().push(format!("a{x}"));
                *x > 1
            })
            .filter(|x| {
                log.borrow_mut().push(format!("b{x}"));
                true
            });
        assert_eq!(drain(&seq).await, Ok(vec![2, 3]));
        assert_eq!(*log.borrow(), ["a1", "a2", "b2", "a3", "b3"]);
    }

    #[tokio::test]
    async fn chained_selects_fuse() {
        let seq: AsyncSelect<_, _> = as_async(vec![1, 2]).select(|x| x + 1).select(|x| x * 10);
        assert_eq!(drain(&seq).await, Ok(vec![20, 30]));
    }

    #[tokio::test]
    async fn async_selector_is_awaited() {
        let seq = as_async(vec![1, 2, 3]).select_async(|x: &i32| {
            let x = *x;
            async move {
                tokio::task::yield_now().await;
                Ok(x * 2)
            }
        });
        assert_eq!(drain(&seq).await, Ok(vec![2, 4, 6]));
    }

    #[tokio::test]
    async fn async_selector_error_surfaces() {
        let seq = as_async(vec![1, 2, 3]).select_async(|x: &i32| {
            let x = *x;
            async move {
                if x == 2 {
                    Err(Error::InvalidArgument("two".into()))
                } else {
                    Ok(x)
                }
            }
        });
        assert_eq!(drain(&seq).await, Err(Error::InvalidArgument("two".into())));
    }

    #[tokio::test]
    async fn pending_selector_observes_cancellation() {
        let token = CancellationToken::new();
        let seq = as_async(vec![1]).select_async(|_: &i32| std::future::pending::<Result<i32>>());
        let mut cursor = seq.cursor(token.clone());
        let cancel = async {
            token.cancel();
        };
        let (advanced, ()) = tokio::join!(cursor.advance(), cancel);
        assert_eq!(advanced, Err(Error::Cancelled));
        cursor.release().await;
    }
}
