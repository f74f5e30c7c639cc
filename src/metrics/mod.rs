//! Metrics and observability module
//!
//! Key metrics exposed:
//! - Packets created and their initial replication budget
//! - Rejected copy accounting requests, by operation
//! - Explicit discards and budget revivals

pub mod recorder;

pub use recorder::{
    init_metrics, record_accounting_error, record_packet_created, record_packet_revived,
    record_packet_zeroed,
};
