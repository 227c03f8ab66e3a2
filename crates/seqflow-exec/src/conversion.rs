//! Materialization: `Vec`, boxed slice, pooled buffer and map.
//!
//! When the exact count is known the result is allocated once at its final
//! size and filled by bulk copy if the source offers one. Otherwise items go
//! through a [`GrowableBuffer`], which costs O(log N) allocations and at most
//! one final copy.

use std::collections::hash_map::{Entry, HashMap};
use std::hash::Hash;

use ahash::RandomState;
use seqflow_core::{BufferConfig, Cursor, Error, Result, Sequence};
use seqflow_mem::{BufferPool, GrowableBuffer, PooledBuf};

use crate::metrics::emit_event;

/// Map type produced by [`to_map`] and [`to_map_with`].
pub type SeqMap<K, V> = HashMap<K, V, RandomState>;

/// Collect every item, tuned by the process-wide [`BufferConfig`].
pub fn to_vec<S>(seq: &S) -> Result<Vec<S::Item>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    to_vec_with(seq, BufferConfig::global())
}

/// Collect every item. Fails `CapacityExceeded` past `cfg.max_capacity`.
pub fn to_vec_with<S>(seq: &S, cfg: &BufferConfig) -> Result<Vec<S::Item>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    if let Some(n) = seq.exact_count() {
        if n > cfg.max_capacity {
            return Err(Error::CapacityExceeded {
                requested: n,
                max: cfg.max_capacity,
            });
        }
        let mut out = Vec::with_capacity(n);
        let bulk = seq.copy_into(&mut out);
        if !bulk {
            let mut cursor = seq.cursor();
            while cursor.advance() {
                out.push(cursor.current().clone());
            }
        }
        emit_event("to_vec", &[("count", out.len()), ("presized", 1), ("bulk", bulk as usize)]);
        return Ok(out);
    }

    let mut buffer = GrowableBuffer::with_config(cfg);
    let mut cursor = seq.cursor();
    while cursor.advance() {
        buffer.push(cursor.current().clone())?;
    }
    emit_event(
        "to_vec",
        &[("count", buffer.len()), ("presized", 0), ("buffers", buffer.buffer_count())],
    );
    Ok(buffer.into_vec())
}

pub fn to_array<S>(seq: &S) -> Result<Box<[S::Item]>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    Ok(to_vec(seq)?.into_boxed_slice())
}

/// Collect into storage rented from `pool`; the storage goes back to the
/// pool when the result is dropped.
pub fn to_pooled<'p, S>(seq: &S, pool: &'p BufferPool<S::Item>) -> PooledBuf<'p, S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    let mut out = pool.rent(seq.exact_count().unwrap_or(0));
    let mut cursor = seq.cursor();
    while cursor.advance() {
        out.push(cursor.current().clone());
    }
    out
}

/// Key every item by `key`. Fails `InvalidArgument` on a duplicate key.
pub fn to_map<S, K, FK>(seq: &S, key: FK) -> Result<SeqMap<K, S::Item>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    K: Eq + Hash,
    FK: Fn(&S::Item) -> K,
{
    to_map_with(seq, key, |item| item.clone())
}

pub fn to_map_with<S, K, V, FK, FV>(seq: &S, key: FK, value: FV) -> Result<SeqMap<K, V>>
where
    S: Sequence + ?Sized,
    K: Eq + Hash,
    FK: Fn(&S::Item) -> K,
    FV: Fn(&S::Item) -> V,
{
    let mut map = HashMap::with_capacity_and_hasher(seq.exact_count().unwrap_or(0), RandomState::new());
    let mut cursor = seq.cursor();
    while cursor.advance() {
        let item = cursor.current();
        match map.entry(key(item)) {
            Entry::Occupied(_) => {
                return Err(Error::InvalidArgument(
                    "an item with the same key has already been added".into(),
                ))
            }
            Entry::Vacant(slot) => {
                slot.insert(value(item));
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use seqflow_core::source::{from_iterable, range};
    use seqflow_operators::SequenceExt;

    use super::*;

    #[test]
    fn filtered_projection_materializes() {
        let data = [1, 2, 3, 4];
        let seq = (&data).select(|x| x * x).filter(|x| *x > 5);
        assert_eq!(to_vec(&seq), Ok(vec![9, 16]));
    }

    #[test]
    fn known_count_is_presized() {
        let data = vec![1, 2, 3];
        let out = to_vec(&data).unwrap();
        assert_eq!(out, data);
        assert_eq!(out.capacity(), 3);

        let projected = to_vec(&range(0, 5).select(|x| x + 1)).unwrap();
        assert_eq!(projected, vec![1, 2, 3, 4, 5]);
        assert_eq!(projected.capacity(), 5);
    }

    #[test]
    fn unknown_count_goes_through_the_growable_buffer() {
        for n in [0, 1, 3, 4, 8, 9, 10_000] {
            let out = to_vec(&from_iterable(0..n)).unwrap();
            assert_eq!(out, (0..n).collect::<Vec<_>>(), "n={n}");
        }
    }

    #[test]
    fn borrowed_items_materialize() {
        let text = String::from("a bb ccc dddd");
        let words = to_vec(&from_iterable(text.split(' '))).unwrap();
        assert_eq!(words, ["a", "bb", "ccc", "dddd"]);

        let long = to_vec(&from_iterable(text.split(' ')).filter(|w| w.len() > 1)).unwrap();
        assert_eq!(long, ["bb", "ccc", "dddd"]);
    }

    #[test]
    fn max_capacity_applies_to_both_paths() {
        let cfg = BufferConfig {
            max_capacity: 3,
            ..BufferConfig::default()
        };
        assert_eq!(
            to_vec_with(&range(0, 4), &cfg),
            Err(Error::CapacityExceeded { requested: 4, max: 3 })
        );
        assert_eq!(
            to_vec_with(&from_iterable(0..4), &cfg),
            Err(Error::CapacityExceeded { requested: 4, max: 3 })
        );
        assert_eq!(to_vec_with(&from_iterable(0..3), &cfg), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn to_array_is_exactly_sized() {
        let boxed = to_array(&from_iterable("abc".chars())).unwrap();
        assert_eq!(&*boxed, &['a', 'b', 'c']);
    }

    #[test]
    fn pooled_result_returns_its_storage() {
        let pool: BufferPool<i32> = BufferPool::new(2);
        {
            let out = to_pooled(&range(0, 10), &pool);
            assert_eq!(&*out, (0..10).collect::<Vec<_>>().as_slice());
        }
        assert_eq!(pool.idle_count(), 1);
        let again = to_pooled(&range(0, 4), &pool);
        assert_eq!(&*again, &[0, 1, 2, 3]);
        assert_eq!(pool.tracker().reused(), 1);
    }

    #[test]
    fn maps_by_key() {
        let words = ["apple", "banana", "cherry"];
        let by_initial = to_map(&words, |w| w.chars().next()).unwrap();
        assert_eq!(by_initial.len(), 3);
        assert_eq!(by_initial[&Some('b')], "banana");

        let lengths = to_map_with(&words, |w| w.to_string(), |w| w.len()).unwrap();
        assert_eq!(lengths["cherry"], 6);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let words = ["apple", "avocado"];
        let err = to_map(&words, |w| w.chars().next()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
