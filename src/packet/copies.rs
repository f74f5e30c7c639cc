//! Replication budget accounting
//!
//! A budget is either Active (copies > 0) or Exhausted (copies == 0).
//! Every fallible operation validates before it mutates, so a rejected
//! request never leaves a partial update behind.

use crate::metrics;
use crate::packet::error::CopyAccountingError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyState {
    Active,
    Exhausted,
}

impl CopyState {
    pub fn is_active(&self) -> bool {
        matches!(self, CopyState::Active)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, CopyState::Exhausted)
    }
}

/// Remaining replication budget of one packet instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyBudget {
    copies: u32,
}

impl CopyBudget {
    pub fn new(initial: NonZeroU32) -> Self {
        Self {
            copies: initial.get(),
        }
    }

    /// Remaining copies
    pub fn copies(&self) -> u32 {
        self.copies
    }

    pub fn state(&self) -> CopyState {
        if self.copies == 0 {
            CopyState::Exhausted
        } else {
            CopyState::Active
        }
    }

    /// Whether the packet is still alive for routing
    pub fn exists(&self) -> bool {
        self.copies != 0
    }

    /// Whether the packet may be sprayed to another relay.
    ///
    /// One copy is always held back for direct delivery to the
    /// destination, so this needs at least two.
    pub fn deliverable(&self) -> bool {
        self.copies > 1
    }

    /// Consume `n` copies after an acknowledgment.
    ///
    /// At least one copy must remain: fails when `copies <= n`. A negative
    /// `n` grows the budget, and also fails with `OutOfRange` when the
    /// result would not fit in a `u32`, even though `copies > n`.
    pub fn decrease_copies(&mut self, n: i64) -> Result<(), CopyAccountingError> {
        let available = i64::from(self.copies);
        if available <= n {
            metrics::record_accounting_error("decrease_copies");
            return Err(CopyAccountingError::Decrease {
                requested: n,
                available: self.copies,
            });
        }

        let remaining = available
            .checked_sub(n)
            .and_then(|remaining| u32::try_from(remaining).ok())
            .ok_or_else(|| {
                metrics::record_accounting_error("decrease_copies");
                CopyAccountingError::OutOfRange { requested: n }
            })?;

        self.assign(remaining);
        Ok(())
    }

    /// Overwrite the budget with a positive value.
    ///
    /// This also applies to an exhausted budget, bringing it back to life.
    pub fn set_copies(&mut self, n: i64) -> Result<(), CopyAccountingError> {
        if n <= 0 {
            metrics::record_accounting_error("set_copies");
            return Err(CopyAccountingError::NonPositive { requested: n });
        }

        let copies = u32::try_from(n).map_err(|_| {
            metrics::record_accounting_error("set_copies");
            CopyAccountingError::OutOfRange { requested: n }
        })?;

        self.assign(copies);
        Ok(())
    }

    // Every successful transition into Active from Exhausted is a revival
    fn assign(&mut self, copies: u32) {
        if self.copies == 0 && copies != 0 {
            metrics::record_packet_revived();
            tracing::debug!(copies, "reviving exhausted packet");
        }
        tracing::trace!(from = self.copies, to = copies, "updated copies");
        self.copies = copies;
    }

    /// Discard: drop the budget to zero regardless of current state
    pub fn zero(&mut self) {
        if self.copies != 0 {
            metrics::record_packet_zeroed();
        }
        self.copies = 0;
    }
}
