use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Serializes probes against the target.
///
/// The guard returned by [`ProbeGate::enter`] must be held for the whole
/// request: timing measurements are only meaningful when no other probe is
/// in flight. An optional pause spaces consecutive probes.
#[derive(Clone)]
pub struct ProbeGate {
    pause: Duration,
    last_probe: Arc<Mutex<Option<Instant>>>,
}

pub struct GateGuard<'a> {
    last_probe: MutexGuard<'a, Option<Instant>>,
}

impl ProbeGate {
    pub fn new(pause: Duration) -> Self {
        Self {
            pause,
            last_probe: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn enter(&self) -> GateGuard<'_> {
        let last = self.last_probe.lock().await;

        if let Some(at) = *last {
            let elapsed = at.elapsed();
            if elapsed < self.pause {
                tokio::time::sleep(self.pause - elapsed).await;
            }
        }

        GateGuard { last_probe: last }
    }
}

impl Default for ProbeGate {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        *self.last_probe = Some(Instant::now());
    }
}
