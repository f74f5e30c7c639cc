//! Metrics recorder for packet accounting
//!
//! Records packet creation and copy-budget events through the `metrics`
//! facade. Nothing is exported unless the embedding application installs
//! a recorder.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::sync::atomic::{AtomicBool, Ordering};

static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize metric descriptions (call once at startup)
pub fn init_metrics() {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return; // Already initialized
    }

    describe_counter!(
        "spraywait_packets_created_total",
        "Total number of packets created"
    );
    describe_counter!(
        "spraywait_copy_accounting_errors_total",
        "Total number of rejected copy accounting requests"
    );
    describe_counter!(
        "spraywait_packets_zeroed_total",
        "Total number of packets explicitly discarded"
    );
    describe_counter!(
        "spraywait_packets_revived_total",
        "Total number of exhausted packets given a new budget"
    );

    describe_histogram!(
        "spraywait_initial_copies",
        "Replication budget assigned to new packets"
    );
}

/// Record a packet being created with its initial budget
pub fn record_packet_created(initial_copies: u32) {
    counter!("spraywait_packets_created_total").increment(1);
    histogram!("spraywait_initial_copies").record(initial_copies as f64);
}

/// Record a rejected accounting request
pub fn record_accounting_error(operation: &'static str) {
    counter!("spraywait_copy_accounting_errors_total", "operation" => operation).increment(1);
}

/// Record an explicit discard
pub fn record_packet_zeroed() {
    counter!("spraywait_packets_zeroed_total").increment(1);
}

/// Record an exhausted budget being reset to a positive value
pub fn record_packet_revived() {
    counter!("spraywait_packets_revived_total").increment(1);
}
