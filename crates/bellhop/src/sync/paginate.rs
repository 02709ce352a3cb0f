//! Offset pagination over a remote collection of known size.

use crate::platform::PageRequest;

/// Yields `{offset, limit}` windows from 0 until `offset >= total`.
///
/// The total is fixed at construction; items added or removed remotely
/// during the walk show up as short or repeated pages.
#[derive(Debug, Clone)]
pub struct PageWalker {
    total: u64,
    limit: u64,
    next_offset: u64,
}

impl PageWalker {
    /// A zero `limit` is clamped to 1.
    #[must_use]
    pub fn new(total: u64, limit: u64) -> Self {
        Self {
            total,
            limit: limit.max(1),
            next_offset: 0,
        }
    }
}

impl Iterator for PageWalker {
    type Item = PageRequest;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset >= self.total {
            return None;
        }
        let request = PageRequest::new(self.next_offset, self.limit);
        self.next_offset = self.next_offset.saturating_add(self.limit);
        Some(request)
    }
}
