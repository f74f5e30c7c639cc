//! Packet creation entry point for sensors
//!
//! A factory pairs an id allocator with the packet configuration so that
//! callers only supply the originating sensor.

use crate::packet::allocator::PacketIdAllocator;
use crate::packet::types::{Packet, PacketConfig};
use std::num::NonZeroU32;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum AllocatorHandle {
    Global,
    Owned(Arc<PacketIdAllocator>),
}

impl AllocatorHandle {
    fn get(&self) -> &PacketIdAllocator {
        match self {
            AllocatorHandle::Global => PacketIdAllocator::global(),
            AllocatorHandle::Owned(allocator) => allocator.as_ref(),
        }
    }
}

/// Creates packets with ids from one allocator and a fixed default budget
#[derive(Debug, Clone)]
pub struct PacketFactory {
    allocator: AllocatorHandle,
    config: PacketConfig,
}

impl Default for PacketFactory {
    fn default() -> Self {
        Self::new(PacketConfig::default())
    }
}

impl PacketFactory {
    /// Factory backed by the process-wide allocator
    pub fn new(config: PacketConfig) -> Self {
        Self {
            allocator: AllocatorHandle::Global,
            config,
        }
    }

    /// Factory backed by a caller-supplied allocator
    pub fn with_allocator(allocator: Arc<PacketIdAllocator>, config: PacketConfig) -> Self {
        Self {
            allocator: AllocatorHandle::Owned(allocator),
            config,
        }
    }

    pub fn config(&self) -> &PacketConfig {
        &self.config
    }

    pub fn allocator(&self) -> &PacketIdAllocator {
        self.allocator.get()
    }

    /// Create a packet for `parent_id` with the configured budget
    pub fn create(&self, parent_id: i64) -> Packet {
        Packet::new(parent_id, self.allocator.get(), &self.config)
    }

    /// Create a packet with an explicit budget
    pub fn create_with_copies(&self, parent_id: i64, copies: NonZeroU32) -> Packet {
        Packet::with_copies(parent_id, self.allocator.get(), copies)
    }
}
