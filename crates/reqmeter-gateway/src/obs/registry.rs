//! In-process metrics registry.
//!
//! Names are created on first use. Timer samples are kept in nanoseconds as
//! `u64` (saturating) so no floating point math happens on the hot path; only
//! count/total/min/max are aggregated, bucketing is left to real exporters.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;

use reqmeter_core::error::{ReqMeterError, Result};
use reqmeter_core::{CounterHandle, MetricsSink, TimerHandle};

fn saturating_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

pub struct Timer {
    count: AtomicU64,
    total_nanos: AtomicU64,
    min_nanos: AtomicU64,
    max_nanos: AtomicU64,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            total_nanos: AtomicU64::new(0),
            min_nanos: AtomicU64::new(u64::MAX),
            max_nanos: AtomicU64::new(0),
        }
    }
}

impl Timer {
    /// Record one sample (nanosecond resolution).
    pub fn update(&self, duration: Duration) {
        let nanos = saturating_nanos(duration);
        self.count.fetch_add(1, Ordering::Relaxed);
        // Saturate instead of wrapping on very long-lived timers.
        let _ = self
            .total_nanos
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| {
                Some(t.saturating_add(nanos))
            });
        self.min_nanos.fetch_min(nanos, Ordering::Relaxed);
        self.max_nanos.fetch_max(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let count = self.count.load(Ordering::Relaxed);
        let min = self.min_nanos.load(Ordering::Relaxed);
        TimerSnapshot {
            count,
            total_nanos: self.total_nanos.load(Ordering::Relaxed),
            min_nanos: if count == 0 { 0 } else { min },
            max_nanos: self.max_nanos.load(Ordering::Relaxed),
        }
    }
}

impl TimerHandle for Timer {
    fn record(&self, duration: Duration) -> Result<()> {
        self.update(duration);
        Ok(())
    }
}

#[derive(Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl CounterHandle for Counter {
    fn increment(&self) -> Result<()> {
        self.inc();
        Ok(())
    }
}

/// Point-in-time copy of one timer (all values in nanoseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub count: u64,
    pub total_nanos: u64,
    pub min_nanos: u64,
    pub max_nanos: u64,
}

/// Point-in-time copy of the whole registry, sorted by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrySnapshot {
    pub timers: BTreeMap<String, TimerSnapshot>,
    pub counters: BTreeMap<String, u64>,
}

impl RegistrySnapshot {
    pub fn timer(&self, name: &str) -> Option<&TimerSnapshot> {
        self.timers.get(name)
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn timer_samples(&self) -> u64 {
        self.timers.values().map(|t| t.count).sum()
    }

    pub fn counter_total(&self) -> u64 {
        self.counters.values().sum()
    }
}

/// Name-keyed timers and counters with a cap on distinct names per kind.
///
/// The cap is best-effort: concurrent first uses of different names may
/// overshoot it by a few entries.
pub struct MetricsRegistry {
    timers: DashMap<String, Arc<Timer>>,
    counters: DashMap<String, Arc<Counter>>,
    max_names: usize,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl MetricsRegistry {
    pub fn new(max_names: usize) -> Self {
        Self {
            timers: DashMap::new(),
            counters: DashMap::new(),
            max_names: max_names.max(1),
        }
    }

    /// Look up or create a timer.
    pub fn timer_entry(&self, name: &str) -> Result<Arc<Timer>> {
        get_or_create(&self.timers, name, self.max_names)
    }

    /// Look up or create a counter.
    pub fn counter_entry(&self, name: &str) -> Result<Arc<Counter>> {
        get_or_create(&self.counters, name, self.max_names)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            timers: self
                .timers
                .iter()
                .map(|r| (r.key().clone(), r.value().snapshot()))
                .collect(),
            counters: self
                .counters
                .iter()
                .map(|r| (r.key().clone(), r.value().get()))
                .collect(),
        }
    }
}

fn get_or_create<T: Default>(
    map: &DashMap<String, Arc<T>>,
    name: &str,
    max_names: usize,
) -> Result<Arc<T>> {
    if let Some(existing) = map.get(name) {
        return Ok(Arc::clone(existing.value()));
    }
    if map.len() >= max_names {
        return Err(ReqMeterError::RegistryFull(max_names));
    }
    let entry = map
        .entry(name.to_string())
        .or_insert_with(|| Arc::new(T::default()));
    Ok(Arc::clone(entry.value()))
}

impl MetricsSink for MetricsRegistry {
    fn timer(&self, name: &str) -> Result<Arc<dyn TimerHandle>> {
        let t: Arc<dyn TimerHandle> = self.timer_entry(name)?;
        Ok(t)
    }

    fn counter(&self, name: &str) -> Result<Arc<dyn CounterHandle>> {
        let c: Arc<dyn CounterHandle> = self.counter_entry(name)?;
        Ok(c)
    }
}
