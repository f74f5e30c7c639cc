//! Spray-and-wait packet module
//!
//! A packet carries a replication budget: the number of copies it may
//! still hand out to relays before it has to wait for direct delivery.
//!
//! Key features:
//! - Unique, strictly increasing packet ids from a mutex-guarded allocator
//! - Copy accounting that never overspends and never partially updates
//! - Explicit default budget configuration instead of global flags
//! - Optional lock-protected handle for multi-writer accounting

pub mod allocator;
pub mod copies;
pub mod error;
pub mod factory;
pub mod shared;
pub mod types;

pub use allocator::{PacketId, PacketIdAllocator};
pub use copies::{CopyBudget, CopyState};
pub use error::{CopyAccountingError, PacketError, PacketResult};
pub use factory::PacketFactory;
pub use shared::SharedPacket;
pub use types::{Packet, PacketConfig, DEFAULT_NUM_COPIES};
