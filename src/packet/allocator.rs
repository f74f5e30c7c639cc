//! Packet identity allocation
//!
//! Ids are plain counters handed out under a mutex, so they are unique
//! and strictly increasing in the order the lock serializes callers.

use chrono::{DateTime, Utc};
use parking_lot::{const_mutex, Mutex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique packet identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct PacketId(pub u64);

impl PacketId {
    pub const ZERO: PacketId = PacketId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        PacketId(id)
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packet({})", self.0)
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static GLOBAL_ALLOCATOR: PacketIdAllocator = PacketIdAllocator::new();

/// Monotonic id generator shared by every packet creator that holds it
pub struct PacketIdAllocator {
    next_id: Mutex<u64>,
}

impl Default for PacketIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketIdAllocator {
    /// Create an allocator whose first id is 0
    pub const fn new() -> Self {
        Self {
            next_id: const_mutex(0),
        }
    }

    /// Process-wide allocator, starting at 0 for the life of the process
    pub fn global() -> &'static PacketIdAllocator {
        &GLOBAL_ALLOCATOR
    }

    /// Issue the next unused id
    pub fn next(&self) -> PacketId {
        let mut next_id = self.next_id.lock();
        let id = PacketId(*next_id);
        *next_id += 1;
        id
    }

    /// Issue the next id together with the creation instant.
    ///
    /// The clock is read while the lock is held, so timestamps follow id
    /// order as far as the system clock itself is monotonic.
    pub fn next_stamped(&self) -> (PacketId, DateTime<Utc>) {
        let mut next_id = self.next_id.lock();
        let id = PacketId(*next_id);
        let now = Utc::now();
        *next_id += 1;
        (id, now)
    }

    /// Id the next call to [`next`](Self::next) would return
    pub fn peek(&self) -> PacketId {
        PacketId(*self.next_id.lock())
    }

    /// Restart the sequence at 0.
    ///
    /// Needs exclusive access, so the shared process-wide allocator can
    /// never be rewound:
    ///
    /// ```compile_fail
    /// spraywait::PacketIdAllocator::global().reset();
    /// ```
    pub fn reset(&mut self) {
        *self.next_id.get_mut() = 0;
        tracing::debug!("packet id allocator reset");
    }
}

impl fmt::Debug for PacketIdAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketIdAllocator")
            .field("next_id", &self.peek())
            .finish()
    }
}
