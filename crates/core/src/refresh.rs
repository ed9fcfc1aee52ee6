//! Per-chart refresh gating.
//!
//! Timer ticks and filter changes both trigger a refetch. Without gating, a
//! slow response can land after a newer one and overwrite it. A
//! [`RefreshGate`] issues a ticket per refresh and only lets the newest
//! ticket's response through:
//!
//! - a timer tick while a refresh is in flight is coalesced (no new fetch),
//! - a filter change always starts a new refresh, superseding the old one,
//! - a response whose ticket is not the newest is dropped.

/// Identifies one refresh attempt. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What asked for the refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Timer,
    FilterChange,
}

#[derive(Debug, Default)]
pub struct RefreshGate {
    issued: u64,
    in_flight: bool,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh, or return `None` if a timer tick was coalesced into
    /// the one already in flight.
    pub fn begin(&mut self, trigger: RefreshTrigger) -> Option<RefreshTicket> {
        if trigger == RefreshTrigger::Timer && self.in_flight {
            return None;
        }
        self.issued += 1;
        self.in_flight = true;
        Some(RefreshTicket(self.issued))
    }

    /// Report that the fetch for `ticket` finished, successfully or not.
    ///
    /// Returns `true` if its result should be applied. Superseded tickets
    /// return `false` and leave the newer refresh in flight.
    pub fn complete(&mut self, ticket: RefreshTicket) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
