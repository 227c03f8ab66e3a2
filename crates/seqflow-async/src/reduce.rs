//! Async terminal reducers.
//!
//! Each reducer opens one cursor, drives it, then awaits `release` before
//! returning, whether the traversal ran to the end, short-circuited, failed,
//! or was cancelled. A reducer future dropped mid-flight cannot await the
//! release; the cursor is then only dropped.

use std::future::Future;

use seqflow_core::{Error, Result};
use seqflow_mem::GrowableBuffer;
use tokio_util::sync::CancellationToken;

use crate::sequence::{AsyncCursor, AsyncSequence};

// ----- free functions -----

pub async fn count<S>(seq: &S, token: CancellationToken) -> Result<usize>
where
    S: AsyncSequence + ?Sized,
{
    let mut cursor = seq.cursor(token);
    let outcome = count_items(&mut cursor).await;
    cursor.release().await;
    outcome
}

async fn count_items<C: AsyncCursor>(cursor: &mut C) -> Result<usize> {
    let mut n = 0usize;
    while cursor.advance().await? {
        n = n.checked_add(1).ok_or(Error::ArithmeticOverflow("count"))?;
    }
    Ok(n)
}

pub async fn any<S>(seq: &S, token: CancellationToken) -> Result<bool>
where
    S: AsyncSequence + ?Sized,
{
    let mut cursor = seq.cursor(token);
    let outcome = cursor.advance().await;
    cursor.release().await;
    outcome
}

pub async fn all<S, P>(seq: &S, token: CancellationToken, predicate: P) -> Result<bool>
where
    S: AsyncSequence + ?Sized,
    P: Fn(&S::Item) -> bool,
{
    let mut cursor = seq.cursor(token);
    let outcome = all_items(&mut cursor, predicate).await;
    cursor.release().await;
    outcome
}

async fn all_items<C, P>(cursor: &mut C, predicate: P) -> Result<bool>
where
    C: AsyncCursor,
    P: Fn(&C::Item) -> bool,
{
    while cursor.advance().await? {
        if !predicate(cursor.current()) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// First item, or `None` if the sequence is empty.
pub async fn try_first<S>(seq: &S, token: CancellationToken) -> Result<Option<S::Item>>
where
    S: AsyncSequence + ?Sized,
    S::Item: Clone,
{
    let mut cursor = seq.cursor(token);
    let outcome = match cursor.advance().await {
        Ok(true) => Ok(Some(cursor.current().clone())),
        Ok(false) => Ok(None),
        Err(e) => Err(e),
    };
    cursor.release().await;
    outcome
}

pub async fn first<S>(seq: &S, token: CancellationToken) -> Result<S::Item>
where
    S: AsyncSequence + ?Sized,
    S::Item: Clone,
{
    try_first(seq, token).await?.ok_or(Error::EmptySequence)
}

/// The only item. Fails `EmptySequence` or `MoreThanOneElement`; stops
/// reading at the second item.
pub async fn single<S>(seq: &S, token: CancellationToken) -> Result<S::Item>
where
    S: AsyncSequence + ?Sized,
    S::Item: Clone,
{
    let mut cursor = seq.cursor(token);
    let outcome = single_item(&mut cursor).await;
    cursor.release().await;
    outcome
}

async fn single_item<C>(cursor: &mut C) -> Result<C::Item>
where
    C: AsyncCursor,
    C::Item: Clone,
{
    if !cursor.advance().await? {
        return Err(Error::EmptySequence);
    }
    let value = cursor.current().clone();
    if cursor.advance().await? {
        return Err(Error::MoreThanOneElement);
    }
    Ok(value)
}

/// Item at `index`, or `None` past the end.
pub async fn element_at<S>(seq: &S, token: CancellationToken, index: usize) -> Result<Option<S::Item>>
where
    S: AsyncSequence + ?Sized,
    S::Item: Clone,
{
    let mut cursor = seq.cursor(token);
    let outcome = element_at_index(&mut cursor, index).await;
    cursor.release().await;
    outcome
}

async fn element_at_index<C>(cursor: &mut C, index: usize) -> Result<Option<C::Item>>
where
    C: AsyncCursor,
    C::Item: Clone,
{
    let mut seen = 0usize;
    while cursor.advance().await? {
        if seen == index {
            return Ok(Some(cursor.current().clone()));
        }
        seen += 1;
    }
    Ok(None)
}

/// Collect every item through a growable buffer.
pub async fn to_vec<S>(seq: &S, token: CancellationToken) -> Result<Vec<S::Item>>
where
    S: AsyncSequence + ?Sized,
    S::Item: Clone,
{
    let mut cursor = seq.cursor(token);
    let outcome = collect_items(&mut cursor).await;
    cursor.release().await;
    outcome
}

async fn collect_items<C>(cursor: &mut C) -> Result<Vec<C::Item>>
where
    C: AsyncCursor,
    C::Item: Clone,
{
    let mut buffer = GrowableBuffer::new();
    while cursor.advance().await? {
        buffer.push(cursor.current().clone())?;
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(count = buffer.len(), buffers = buffer.buffer_count(), "async to_vec");
    Ok(buffer.into_vec())
}

// ----- trait -----

/// The reducers above as methods on any [`AsyncSequence`].
pub trait AsyncReduce: AsyncSequence {
    fn count(&self, token: CancellationToken) -> impl Future<Output = Result<usize>> {
        count(self, token)
    }

    fn any(&self, token: CancellationToken) -> impl Future<Output = Result<bool>> {
        any(self, token)
    }

    fn all<P>(&self, token: CancellationToken, predicate: P) -> impl Future<Output = Result<bool>>
    where
        P: Fn(&Self::Item) -> bool,
    {
        all(self, token, predicate)
    }

    fn first(&self, token: CancellationToken) -> impl Future<Output = Result<Self::Item>>
    where
        Self::Item: Clone,
    {
        first(self, token)
    }

    fn try_first(&self, token: CancellationToken) -> impl Future<Output = Result<Option<Self::Item>>>
    where
        Self::Item: Clone,
    {
        try_first(self, token)
    }

    fn single(&self, token: CancellationToken) -> impl Future<Output = Result<Self::Item>>
    where
        Self::Item: Clone,
    {
        single(self, token)
    }

    fn element_at(
        &self,
        token: CancellationToken,
        index: usize,
    ) -> impl Future<Output = Result<Option<Self::Item>>>
    where
        Self::Item: Clone,
    {
        element_at(self, token, index)
    }

    fn to_vec(&self, token: CancellationToken) -> impl Future<Output = Result<Vec<Self::Item>>>
    where
        Self::Item: Clone,
    {
        to_vec(self, token)
    }
}

impl<S: AsyncSequence + ?Sized> AsyncReduce for S {}
