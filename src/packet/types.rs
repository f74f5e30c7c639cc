//! Packet record and configuration

use crate::metrics;
use crate::packet::allocator::{PacketId, PacketIdAllocator};
use crate::packet::copies::{CopyBudget, CopyState};
use crate::packet::error::{CopyAccountingError, PacketError, PacketResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Default replication budget for new packets
pub const DEFAULT_NUM_COPIES: u32 = 8;

/// Configuration for packet creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketConfig {
    /// Copies assigned to every newly created packet
    #[serde(alias = "num-copies", default = "default_num_copies")]
    pub num_copies: NonZeroU32,
}

fn default_num_copies() -> NonZeroU32 {
    NonZeroU32::new(DEFAULT_NUM_COPIES).unwrap_or(NonZeroU32::MIN)
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            num_copies: default_num_copies(),
        }
    }
}

impl PacketConfig {
    /// Create a config, rejecting a zero budget
    pub fn new(num_copies: u32) -> PacketResult<Self> {
        let num_copies = NonZeroU32::new(num_copies).ok_or_else(|| {
            PacketError::InvalidConfig("number of copies must be positive".into())
        })?;
        Ok(Self { num_copies })
    }

    /// Parse a config from JSON
    pub fn from_json(json: &str) -> PacketResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A packet generated by a sensor, carrying its replication budget
#[derive(Debug, Clone, Serialize)]
pub struct Packet {
    id: PacketId,
    parent_id: i64,
    timestamp: DateTime<Utc>,
    copies: CopyBudget,
}

impl Packet {
    /// Create a packet with the configured default budget
    pub fn new(parent_id: i64, allocator: &PacketIdAllocator, config: &PacketConfig) -> Self {
        Self::with_copies(parent_id, allocator, config.num_copies)
    }

    /// Create a packet with an explicit initial budget
    pub fn with_copies(parent_id: i64, allocator: &PacketIdAllocator, copies: NonZeroU32) -> Self {
        let (id, timestamp) = allocator.next_stamped();
        let packet = Self {
            id,
            parent_id,
            timestamp,
            copies: CopyBudget::new(copies),
        };

        metrics::record_packet_created(copies.get());
        tracing::trace!(%id, parent_id, copies = copies.get(), "created packet");
        packet
    }

    pub fn id(&self) -> PacketId {
        self.id
    }

    /// The sensor which generated the packet
    pub fn parent_id(&self) -> i64 {
        self.parent_id
    }

    /// Creation time
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.timestamp
    }

    pub fn copies(&self) -> u32 {
        self.copies.copies()
    }

    pub fn state(&self) -> CopyState {
        self.copies.state()
    }

    pub fn exists(&self) -> bool {
        self.copies.exists()
    }

    pub fn deliverable(&self) -> bool {
        self.copies.deliverable()
    }

    /// Consume `n` copies after an acknowledgment from a receiver
    pub fn decrease_copies(&mut self, n: i64) -> Result<(), CopyAccountingError> {
        let result = self.copies.decrease_copies(n);
        if let Err(err) = &result {
            tracing::debug!(id = %self.id, error = %err, "copy decrease failed");
        }
        result
    }

    pub fn set_copies(&mut self, n: i64) -> Result<(), CopyAccountingError> {
        let result = self.copies.set_copies(n);
        if let Err(err) = &result {
            tracing::debug!(id = %self.id, error = %err, "set copies failed");
        }
        result
    }

    /// Discard the packet; it no longer exists for routing
    pub fn zero(&mut self) {
        self.copies.zero();
        tracing::trace!(id = %self.id, "zeroed packet");
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packet {} from sensor {}: {} copies ({:?})",
            self.id,
            self.parent_id,
            self.copies(),
            self.state()
        )
    }
}
