//! Per-topic impulse history and frequency estimation.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::debug;

/// Instantaneous frequencies above this are discarded as duplicates or
/// clock jitter.
const MAX_FREQUENCY_HZ: f64 = 1000.0;
/// Inter-arrival gaps below this are ignored for the same reason.
const MIN_GAP_SECS: f64 = 0.001;
/// How many instantaneous frequency samples feed the rolling average.
const FREQUENCY_SAMPLES: usize = 10;

/// Point-in-time view of one stream, safe to hand across threads.
#[derive(Debug, Clone, Serialize)]
pub struct StreamSnapshot {
    pub topic: String,
    pub message_count: u64,
    /// Rolling mean of the instantaneous message frequency, Hz.
    pub frequency: f64,
    /// Messages inside the observation window.
    pub recent: usize,
    pub last_payload: Option<Value>,
}

#[derive(Debug, Default)]
struct StreamInner {
    impulses: VecDeque<(f64, Value)>,
    frequencies: VecDeque<f64>,
    current_frequency: f64,
    last_message_at: Option<f64>,
    last_payload: Option<Value>,
    message_count: u64,
}

/// One monitored topic. All mutation happens under the internal lock,
/// held only long enough to update the deques.
#[derive(Debug)]
pub struct StreamLine {
    topic: String,
    window_secs: f64,
    max_impulses: usize,
    inner: Mutex<StreamInner>,
}

impl StreamLine {
    pub fn new(topic: impl Into<String>, window_secs: f64, max_impulses: usize) -> Self {
        Self {
            topic: topic.into(),
            window_secs,
            max_impulses,
            inner: Mutex::new(StreamInner::default()),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Record one message at `now` (seconds on the caller's clock).
    pub fn record(&self, now: f64, payload: Value) {
        let mut inner = self.inner.lock().expect("stream lock poisoned");

        if inner.impulses.len() == self.max_impulses {
            inner.impulses.pop_front();
        }
        inner.impulses.push_back((now, payload.clone()));
        inner.message_count += 1;
        inner.last_payload = Some(payload);

        if let Some(last) = inner.last_message_at {
            let dt = now - last;
            if dt > MIN_GAP_SECS {
                let instant_freq = 1.0 / dt;
                if instant_freq < MAX_FREQUENCY_HZ {
                    if inner.frequencies.len() == FREQUENCY_SAMPLES {
                        inner.frequencies.pop_front();
                    }
                    inner.frequencies.push_back(instant_freq);
                    inner.current_frequency =
                        inner.frequencies.iter().sum::<f64>() / inner.frequencies.len() as f64;
                }
            }
        }
        inner.last_message_at = Some(now);
    }

    pub fn frequency(&self) -> f64 {
        self.inner.lock().expect("stream lock poisoned").current_frequency
    }

    /// Impulse timestamps within the window ending at `now`.
    pub fn recent_impulses(&self, now: f64) -> Vec<(f64, Value)> {
        let inner = self.inner.lock().expect("stream lock poisoned");
        let cutoff = now - self.window_secs;
        inner
            .impulses
            .iter()
            .filter(|(ts, _)| *ts >= cutoff)
            .cloned()
            .collect()
    }

    pub fn snapshot(&self, now: f64) -> StreamSnapshot {
        let inner = self.inner.lock().expect("stream lock poisoned");
        let cutoff = now - self.window_secs;
        StreamSnapshot {
            topic: self.topic.clone(),
            message_count: inner.message_count,
            frequency: inner.current_frequency,
            recent: inner.impulses.iter().filter(|(ts, _)| *ts >= cutoff).count(),
            last_payload: inner.last_payload.clone(),
        }
    }
}

/// Registry of monitored topics sharing one clock.
pub struct MonitorHub {
    started: Instant,
    window_secs: f64,
    max_impulses: usize,
    streams: Mutex<BTreeMap<String, Arc<StreamLine>>>,
}

impl MonitorHub {
    pub fn new(window_secs: f64, max_impulses: usize) -> Self {
        Self {
            started: Instant::now(),
            window_secs,
            max_impulses,
            streams: Mutex::new(BTreeMap::new()),
        }
    }

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Get or create the stream for a topic. The returned handle can be
    /// recorded to without touching the registry lock again.
    pub fn stream(&self, topic: &str) -> Arc<StreamLine> {
        let mut streams = self.streams.lock().expect("registry lock poisoned");
        streams
            .entry(topic.to_string())
            .or_insert_with(|| {
                debug!(topic, "registering stream");
                Arc::new(StreamLine::new(topic, self.window_secs, self.max_impulses))
            })
            .clone()
    }

    pub fn record(&self, topic: &str, payload: Value) {
        let stream = self.stream(topic);
        stream.record(self.now(), payload);
    }

    /// Snapshots for every registered topic, in topic order.
    pub fn snapshots(&self) -> Vec<StreamSnapshot> {
        let now = self.now();
        let streams = self.streams.lock().expect("registry lock poisoned");
        streams.values().map(|s| s.snapshot(now)).collect()
    }
}

impl Default for MonitorHub {
    fn default() -> Self {
        // 5 s window, 1000 retained impulses
        Self::new(5.0, 1000)
    }
}
