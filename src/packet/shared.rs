//! Lock-protected packet handle
//!
//! [`Packet`] itself is single-writer: mutation needs `&mut`. When several
//! threads must account against the same packet instance, wrap it in a
//! [`SharedPacket`]; every operation then runs under one mutex.

use crate::packet::allocator::PacketId;
use crate::packet::copies::CopyState;
use crate::packet::error::CopyAccountingError;
use crate::packet::types::Packet;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedPacket {
    id: PacketId,
    inner: Arc<Mutex<Packet>>,
}

impl SharedPacket {
    pub fn new(packet: Packet) -> Self {
        Self {
            id: packet.id(),
            inner: Arc::new(Mutex::new(packet)),
        }
    }

    pub fn id(&self) -> PacketId {
        self.id
    }

    /// Copy of the current packet state
    pub fn snapshot(&self) -> Packet {
        self.inner.lock().clone()
    }

    /// Run a compound operation while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&mut Packet) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn copies(&self) -> u32 {
        self.inner.lock().copies()
    }

    pub fn state(&self) -> CopyState {
        self.inner.lock().state()
    }

    pub fn exists(&self) -> bool {
        self.inner.lock().exists()
    }

    pub fn deliverable(&self) -> bool {
        self.inner.lock().deliverable()
    }

    pub fn decrease_copies(&self, n: i64) -> Result<(), CopyAccountingError> {
        self.inner.lock().decrease_copies(n)
    }

    pub fn set_copies(&self, n: i64) -> Result<(), CopyAccountingError> {
        self.inner.lock().set_copies(n)
    }

    pub fn zero(&self) {
        self.inner.lock().zero()
    }

    /// Take the packet back out if this is the last handle
    pub fn try_unwrap(self) -> Result<Packet, SharedPacket> {
        let id = self.id;
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| SharedPacket { id, inner })
    }
}

impl From<Packet> for SharedPacket {
    fn from(packet: Packet) -> Self {
        Self::new(packet)
    }
}
