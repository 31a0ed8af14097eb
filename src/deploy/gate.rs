// ABOUTME: Busy gate that admits at most one in-flight deployment.
// ABOUTME: Non-blocking test-and-set with a guard that releases on drop, including during panics.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use super::{DeployError, DeploymentKind};

/// Information about the deployment currently holding the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InFlight {
    /// Kind being deployed.
    pub kind: DeploymentKind,
    /// When the gate was acquired.
    pub started_at: DateTime<Utc>,
}

impl InFlight {
    fn new(kind: DeploymentKind) -> Self {
        Self {
            kind,
            started_at: Utc::now(),
        }
    }
}

/// Single-permit admission control.
///
/// There is no wait queue: a caller arriving while the gate is held is
/// rejected with [`DeployError::Busy`] and must retry on its own.
#[derive(Debug, Clone, Default)]
pub struct DeployGate {
    slot: Arc<Mutex<Option<InFlight>>>,
}

impl DeployGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the gate for a deployment of `kind`.
    ///
    /// The check and the set happen under one lock, so two racing callers can
    /// never both observe an idle gate.
    pub fn try_acquire(&self, kind: DeploymentKind) -> Result<GateGuard, DeployError> {
        let mut slot = self.slot.lock();
        if let Some(current) = slot.as_ref() {
            return Err(DeployError::Busy(current.clone()));
        }
        *slot = Some(InFlight::new(kind));
        tracing::debug!(%kind, "deploy gate acquired");

        Ok(GateGuard {
            slot: Arc::clone(&self.slot),
        })
    }

    /// The deployment holding the gate, if any.
    pub fn current(&self) -> Option<InFlight> {
        self.slot.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.slot.lock().is_some()
    }
}

/// A held gate. Dropping it makes the gate available to the next caller.
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct GateGuard {
    slot: Arc<Mutex<Option<InFlight>>>,
}

impl std::fmt::Debug for GateGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateGuard")
            .field("in_flight", &*self.slot.lock())
            .finish()
    }
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        if let Some(released) = self.slot.lock().take() {
            tracing::debug!(kind = %released.kind, "deploy gate released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::DeployErrorKind;

    #[test]
    fn new_gate_is_idle() {
        let gate = DeployGate::new();
        assert!(!gate.is_busy());
        assert!(gate.current().is_none());
    }

    #[test]
    fn second_acquire_is_rejected_with_holder_info() {
        let gate = DeployGate::new();
        let _guard = gate.try_acquire(DeploymentKind::Token).unwrap();

        let err = gate.try_acquire(DeploymentKind::Staking).unwrap_err();
        assert_eq!(err.kind(), DeployErrorKind::Busy);
        assert_eq!(err.in_flight().unwrap().kind, DeploymentKind::Token);
    }

    #[test]
    fn dropping_guard_releases_gate() {
        let gate = DeployGate::new();
        let guard = gate.try_acquire(DeploymentKind::Iao).unwrap();
        assert!(gate.is_busy());

        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire(DeploymentKind::Iao).is_ok());
    }

    #[test]
    fn clones_share_the_same_permit() {
        let gate = DeployGate::new();
        let other = gate.clone();
        let _guard = gate.try_acquire(DeploymentKind::Payment).unwrap();
        assert!(other.try_acquire(DeploymentKind::Payment).is_err());
    }

    #[test]
    fn panic_while_held_still_releases() {
        let gate = DeployGate::new();
        let inner = gate.clone();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = inner.try_acquire(DeploymentKind::Staking).unwrap();
            panic!("toolchain blew up");
        }));

        assert!(result.is_err());
        assert!(!gate.is_busy());
    }

    #[test]
    fn racing_threads_admit_exactly_one() {
        let gate = DeployGate::new();
        let barrier = Arc::new(std::sync::Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gate = gate.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    // Keep the winner's guard alive until every thread has tried.
                    gate.try_acquire(DeploymentKind::Token).ok()
                })
            })
            .collect();

        let guards: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();
        assert_eq!(guards.iter().filter(|g| g.is_some()).count(), 1);
    }
}
