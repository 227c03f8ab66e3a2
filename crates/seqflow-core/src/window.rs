//! Skip/Take window arithmetic.
//!
//! A window is `(start, len)` relative to its source. When the source length
//! is known every operation clamps into `[0, N]`; when it is not, negative
//! counts still clamp to zero and `len` stays open until a `take` closes it.
//! Composing windows never allocates and is O(1).

/// `(start, len)` partition of a source sequence. `len == None` means
/// "until the source is exhausted".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub len: Option<usize>,
}

impl Window {
    /// The whole source. `source_len` is the source's exact count, if known.
    pub fn full(source_len: Option<usize>) -> Self {
        Self {
            start: 0,
            len: source_len,
        }
    }

    /// Drop the first `count` items of this window.
    pub fn skip(self, count: isize) -> Self {
        let count = clamp_count(count);
        match self.len {
            Some(len) => {
                let skipped = count.min(len);
                Self {
                    start: self.start + skipped,
                    len: Some(len - skipped),
                }
            }
            None => Self {
                start: self.start.saturating_add(count),
                len: None,
            },
        }
    }

    /// Keep at most `count` items of this window.
    pub fn take(self, count: isize) -> Self {
        let count = clamp_count(count);
        Self {
            start: self.start,
            len: Some(self.len.map_or(count, |len| len.min(count))),
        }
    }

    /// Window for `skip(skip).take(take)` applied to a fresh source.
    pub fn skip_take(source_len: Option<usize>, skip: isize, take: isize) -> Self {
        Self::full(source_len).skip(skip).take(take)
    }

    /// Position in the source of the `index`-th item of this window.
    pub fn source_index(&self, index: usize) -> usize {
        self.start + index
    }

    pub fn is_empty(&self) -> bool {
        self.len == Some(0)
    }
}

fn clamp_count(count: isize) -> usize {
    if count < 0 {
        0
    } else {
        count as usize
    }
}
