pub mod metrics;
pub mod packet;

pub use packet::{
    CopyAccountingError, CopyBudget, CopyState, Packet, PacketConfig, PacketError, PacketFactory,
    PacketId, PacketIdAllocator, PacketResult, SharedPacket,
};
