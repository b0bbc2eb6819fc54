//! Offset/limit pagination windows.
//!
//! A [`PageRequest`] selects a contiguous subrange of an ordered result set and
//! a [`Page`] carries that subrange together with the size of the unrestricted
//! set.

use serde::Serialize;

/// Requested pagination window.
///
/// A missing limit means "everything after the offset". An offset beyond the
/// end of the result set yields an empty page rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageRequest {
    limit: Option<u32>,
    offset: u32,
}

impl PageRequest {
    /// Creates a window from raw caller-supplied values.
    ///
    /// A `limit` of zero or below disables the limit; a negative `offset` is
    /// treated as zero. Values beyond `u32::MAX` saturate.
    #[must_use]
    pub fn new(limit: i64, offset: i64) -> Self {
        let limit = (limit > 0).then(|| saturate(limit));
        Self {
            limit,
            offset: saturate(offset.max(0)),
        }
    }

    /// Creates a window covering the whole result set.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            limit: None,
            offset: 0,
        }
    }

    /// Returns the maximum number of items, if limited.
    #[must_use]
    pub const fn limit(self) -> Option<u32> {
        self.limit
    }

    /// Returns the number of leading items to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Selects this window from an already ordered slice.
    #[must_use]
    pub fn window<T: Clone>(self, items: &[T]) -> Vec<T> {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = self
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));
        items.iter().skip(skip).take(take).cloned().collect()
    }
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// One page of results plus the total size of the unrestricted set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items inside the requested window.
    pub items: Vec<T>,
    /// Number of items in the unrestricted result set.
    pub total: u64,
}

impl<T> Page<T> {
    /// Creates a page.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Creates a page from a full, ordered result set.
    #[must_use]
    pub fn from_ordered(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let total = u64::try_from(all.len()).unwrap_or(u64::MAX);
        Self::new(request.window(all), total)
    }

    /// Transforms every item while keeping the total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
