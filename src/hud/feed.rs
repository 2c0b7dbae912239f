use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::session::Hud;
use crate::telemetry::PositionSample;

const CHANNEL_CAPACITY: usize = 64;

/// What a position source can emit.
#[derive(Debug, Clone)]
pub enum PositionEvent {
    Sample(PositionSample),
    /// The source failed to produce a fix; the estimator is not invoked.
    Error(String),
}

/// Live subscription of a position source to a HUD session. Must be
/// cancelled on teardown.
#[derive(Debug)]
pub struct Subscription {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<usize>,
    source: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Ties the producer task to this subscription so `cancel` releases it too.
    pub fn with_source(mut self, source: JoinHandle<()>) -> Self {
        self.source = Some(source);
        self
    }

    /// Stops the worker and returns how many samples it processed.
    pub async fn cancel(self) -> usize {
        let _ = self.stop_tx.send(());
        let processed = self.join.await.unwrap_or(0);

        if let Some(source) = self.source {
            source.abort();
            // Cancelled is the expected outcome here.
            let _ = source.await;
        }
        processed
    }
}

pub fn subscribe(mut events: mpsc::Receiver<PositionEvent>, hud: Arc<Mutex<Hud>>) -> Subscription {
    let (stop_tx, mut stop_rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        let mut processed = 0;
        loop {
            let event = tokio::select! {
                _ = &mut stop_rx => break,
                event = events.recv() => event,
            };

            match event {
                Some(PositionEvent::Sample(sample)) => {
                    hud.lock().await.ingest_position(sample);
                    processed += 1;
                }
                Some(PositionEvent::Error(reason)) => {
                    log::warn!("Position source error: {}", reason);
                }
                None => break,
            }
        }
        log::info!("Position subscription ended after {} samples", processed);
        processed
    });

    Subscription {
        stop_tx,
        join,
        source: None,
    }
}

/// Replays a recorded track as a position source. Samples are spaced by
/// `pace`, or by their recorded timestamp deltas when `pace` is `None`.
pub fn replay_track(
    samples: Vec<PositionSample>,
    pace: Option<Duration>,
) -> (mpsc::Receiver<PositionEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    let producer = tokio::spawn(async move {
        let mut last_timestamp: Option<i64> = None;
        for sample in samples {
            let delay = match (pace, last_timestamp) {
                (Some(pace), Some(_)) => pace,
                (None, Some(prev)) => recorded_delay(prev, sample.timestamp_ms),
                (_, None) => Duration::ZERO,
            };
            if !delay.is_zero() {
                sleep(delay).await;
            }

            last_timestamp = Some(sample.timestamp_ms);
            if tx.send(PositionEvent::Sample(sample)).await.is_err() {
                // Subscriber went away.
                return;
            }
        }
    });

    (rx, producer)
}

fn recorded_delay(previous_ms: i64, current_ms: i64) -> Duration {
    let delta = current_ms.saturating_sub(previous_ms).max(0);
    Duration::from_millis(delta as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::HudSettings;
    use chrono::Utc;

    const T0: i64 = 1_700_000_000_000;

    fn new_hud() -> Arc<Mutex<Hud>> {
        Arc::new(Mutex::new(Hud::new(HudSettings::default())))
    }

    fn sample(latitude: f64, timestamp_ms: i64) -> PositionEvent {
        PositionEvent::Sample(PositionSample::new(latitude, 27.5153, timestamp_ms))
    }

    #[tokio::test]
    async fn processes_samples_until_source_closes() {
        let hud = new_hud();
        let (tx, rx) = mpsc::channel(8);
        let subscription = subscribe(rx, hud.clone());

        tx.send(sample(40.978, T0)).await.unwrap();
        let error = PositionEvent::Error("permission denied".into());
        tx.send(error).await.unwrap();
        tx.send(sample(40.979, T0 + 1000)).await.unwrap();
        drop(tx);

        let processed = subscription.join.await.unwrap();
        assert_eq!(processed, 2);
        let speed = hud.lock().await.velocity().speed_kmh;
        assert!((speed - 400.30).abs() < 0.01);
    }

    #[tokio::test]
    async fn source_error_leaves_previous_values() {
        let hud = new_hud();
        let (tx, rx) = mpsc::channel(8);
        let subscription = subscribe(rx, hud.clone());

        let moving = PositionSample::new(40.978, 27.5153, T0);
        let moving = PositionEvent::Sample(moving.with_speed_mps(10.0));
        tx.send(moving).await.unwrap();
        let error = PositionEvent::Error("timeout".into());
        tx.send(error).await.unwrap();
        drop(tx);

        assert_eq!(subscription.join.await.unwrap(), 1);
        let speed = hud.lock().await.velocity().speed_kmh;
        assert!((speed - 36.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn cancel_stops_an_open_subscription() {
        let hud = new_hud();
        let (tx, rx) = mpsc::channel(8);
        let subscription = subscribe(rx, hud);

        assert_eq!(subscription.cancel().await, 0);
        // The receiver is gone once the worker stops.
        assert!(tx.send(sample(0.0, 0)).await.is_err());
    }

    #[tokio::test]
    async fn cancel_aborts_a_sleeping_producer() {
        let hud = new_hud();
        let (tx, rx) = mpsc::channel(8);
        let alive = Arc::new(());
        let guard = alive.clone();
        let producer = tokio::spawn(async move {
            let _guard = guard;
            let _ = tx.send(sample(40.978, T0)).await;
            sleep(Duration::from_secs(3600)).await;
        });

        let subscription = subscribe(rx, hud.clone()).with_source(producer);
        while hud.lock().await.report(Utc::now()).last_fix.is_none() {
            tokio::task::yield_now().await;
        }

        assert_eq!(subscription.cancel().await, 1);
        assert_eq!(Arc::strong_count(&alive), 1);
    }

    #[tokio::test]
    async fn replay_feeds_recorded_track() {
        let hud = new_hud();
        let track = vec![
            PositionSample::new(40.978, 27.5153, T0),
            PositionSample::new(40.979, 27.5153, T0 + 1000).with_heading(10.0),
        ];
        let pace = Some(Duration::from_millis(1));
        let (events, producer) = replay_track(track, pace);
        let subscription = subscribe(events, hud.clone());

        producer.await.unwrap();
        assert_eq!(subscription.join.await.unwrap(), 2);

        let hud = hud.lock().await;
        assert!((hud.velocity().speed_kmh - 400.30).abs() < 0.01);
        assert_eq!(hud.velocity().heading_label, "N (10°)");
    }

    #[test]
    fn recorded_delay_never_negative() {
        assert_eq!(recorded_delay(2000, 1000), Duration::ZERO);
        assert_eq!(recorded_delay(1000, 1250), Duration::from_millis(250));
    }
}
