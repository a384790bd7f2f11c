use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::watch;

use crate::blend::mode::BlendMode;

/// Result of the asynchronous correctness probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// The probe has not finished; the safe set may still shrink.
    Pending,
    /// The probed mode rendered correctly and stays native.
    Verified,
    /// The probed mode rendered incorrectly and was removed.
    Disqualified,
    /// The reference image could not be prepared; nothing was removed.
    ReferenceUnavailable,
    /// The probe was not run.
    Skipped,
}

impl ProbeOutcome {
    /// Whether the registry will not change any more.
    pub fn is_final(self) -> bool {
        self != ProbeOutcome::Pending
    }
}

/// The set of modes the native backend may be trusted with, plus a completion signal.
///
/// Membership is a bitset read without locking on every composite call. After the initial
/// populate the set only ever shrinks, so a reader that races a removal sees either the old
/// or the new membership and both are acceptable.
#[derive(Debug)]
pub struct CapabilityRegistry {
    safe: AtomicU32,
    outcome: watch::Sender<ProbeOutcome>,
}

impl CapabilityRegistry {
    /// A registry with no native modes whose probe is already complete.
    pub fn empty() -> Self {
        Self::with_modes([], ProbeOutcome::Skipped)
    }

    /// A pre-populated registry.
    pub fn with_modes(modes: impl IntoIterator<Item = BlendMode>, outcome: ProbeOutcome) -> Self {
        let bits = modes.into_iter().fold(0, |acc, m| acc | m.bit());
        let (tx, _rx) = watch::channel(outcome);
        Self {
            safe: AtomicU32::new(bits),
            outcome: tx,
        }
    }

    /// Whether `mode` may currently be routed to the native backend.
    pub fn contains(&self, mode: BlendMode) -> bool {
        self.safe.load(Ordering::Acquire) & mode.bit() != 0
    }

    /// Current members, in canonical order.
    pub fn modes(&self) -> Vec<BlendMode> {
        let bits = self.safe.load(Ordering::Acquire);
        BlendMode::ALL
            .into_iter()
            .filter(|m| bits & m.bit() != 0)
            .collect()
    }

    /// Drop `mode` from the set. Returns whether it was present.
    pub fn remove(&self, mode: BlendMode) -> bool {
        self.safe.fetch_and(!mode.bit(), Ordering::AcqRel) & mode.bit() != 0
    }

    /// Current probe state, without waiting.
    pub fn outcome(&self) -> ProbeOutcome {
        *self.outcome.borrow()
    }

    /// Whether the probe has finished.
    pub fn is_probed(&self) -> bool {
        self.outcome().is_final()
    }

    /// Wait until the probe has finished and return its outcome.
    pub async fn probed(&self) -> ProbeOutcome {
        let mut rx = self.outcome.subscribe();
        match rx.wait_for(|o| o.is_final()).await {
            Ok(o) => *o,
            // The sender lives in `self`, so it cannot be dropped while we hold `&self`.
            Err(_) => self.outcome(),
        }
    }

    pub(crate) fn finish(&self, outcome: ProbeOutcome) {
        self.outcome.send_replace(outcome);
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/probe/registry.rs"]
mod tests;
