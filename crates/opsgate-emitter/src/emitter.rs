//! Timer-driven emit loop.
//!
//! The loop suspends in exactly two places: the next tick and the shutdown
//! future. The first tick fires one full interval after `run` starts.

use std::future::Future;
use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use opsgate_core::error::{OpsGateError, Result};

use crate::config::EmitterConfig;
use crate::sample::MetricSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    Running,
    Stopped,
}

pub struct Emitter<R = StdRng> {
    cfg: EmitterConfig,
    rng: R,
    state: EmitterState,
}

impl Emitter<StdRng> {
    pub fn new(cfg: EmitterConfig) -> Self {
        Self::with_rng(cfg, StdRng::from_entropy())
    }
}

impl<R: Rng> Emitter<R> {
    pub fn with_rng(cfg: EmitterConfig, rng: R) -> Self {
        Self {
            cfg,
            rng,
            state: EmitterState::Stopped,
        }
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    pub fn sample(&mut self) -> MetricSample {
        MetricSample::new(&self.cfg.log_name, &mut self.rng)
    }

    /// Sample once and write one JSON line.
    pub fn emit_one<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let line = serde_json::to_string(&self.sample())?;
        writeln!(out, "{line}")
            .and_then(|_| out.flush())
            .map_err(|e| OpsGateError::Internal(format!("write sample: {e}")))
    }

    /// Emit on every tick until `shutdown` resolves. Returns the number of
    /// lines written.
    pub async fn run<W, F>(&mut self, out: &mut W, shutdown: F) -> u64
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let period = self.cfg.interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        self.state = EmitterState::Running;
        tracing::info!(interval_ms = self.cfg.interval_ms, log_name = %self.cfg.log_name, "emitter running");

        let mut emitted = 0u64;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.emit_one(out) {
                        Ok(()) => emitted += 1,
                        Err(e) => {
                            tracing::error!(error = %e, "emit failed");
                            let _ = writeln!(out, "Error: {e}");
                        }
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        self.state = EmitterState::Stopped;
        tracing::info!(emitted, "emitter stopped");
        emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::sync::oneshot;

    fn seeded() -> Emitter {
        Emitter::with_rng(EmitterConfig::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn starts_stopped() {
        assert_eq!(seeded().state(), EmitterState::Stopped);
    }

    #[test]
    fn emit_one_writes_a_json_line() {
        let mut e = seeded();
        let mut buf = Vec::new();
        e.emit_one(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let s: MetricSample = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(s.log_name, "json_outputer");
    }

    #[tokio::test(start_paused = true)]
    async fn emits_once_per_interval_until_shutdown() {
        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut e = seeded();
            let mut buf = Vec::new();
            let n = e
                .run(&mut buf, async {
                    let _ = rx.await;
                })
                .await;
            (n, buf, e.state())
        });

        tokio::time::sleep(Duration::from_secs(95)).await;
        tx.send(()).unwrap();
        let (n, buf, state) = task.await.unwrap();

        assert_eq!(n, 3);
        assert_eq!(state, EmitterState::Stopped);
        let lines: Vec<_> = String::from_utf8(buf).unwrap().lines().map(str::to_owned).collect();
        assert_eq!(lines.len(), 3);
        for l in lines {
            let s: MetricSample = serde_json::from_str(&l).unwrap();
            assert!((0.0..1.0).contains(&s.value));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_first_tick_emits_nothing() {
        let mut e = seeded();
        let mut buf = Vec::new();
        let n = e
            .run(&mut buf, tokio::time::sleep(Duration::from_secs(29)))
            .await;
        assert_eq!(n, 0);
        assert!(buf.is_empty());
        assert_eq!(e.state(), EmitterState::Stopped);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn write_failures_do_not_stop_the_loop() {
        let mut e = seeded();
        let n = e
            .run(&mut FailingWriter, tokio::time::sleep(Duration::from_secs(65)))
            .await;
        assert_eq!(n, 0);
        assert_eq!(e.state(), EmitterState::Stopped);
    }
}
