//! Frame stats sink
//!
//! The engine reports per-frame counters (batches, visible sprites,
//! triangle counts) through this trait. The embedding application decides
//! what to do with them; the engine ships a discarding sink and a
//! collecting one for tests.

use std::collections::HashMap;

/// Receiver for named per-frame counters
pub trait ProfilerSink {
    /// Record one counter for the current frame
    fn record(&mut self, name: &str, value: f64);
}

/// Sink that discards every counter
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProfiler;

impl ProfilerSink for NullProfiler {
    fn record(&mut self, _name: &str, _value: f64) {}
}

/// Sink that keeps the latest value of each counter
#[derive(Debug, Default)]
pub struct CollectingProfiler {
    /// Latest value recorded per counter name
    pub counters: HashMap<String, f64>,
}

impl ProfilerSink for CollectingProfiler {
    fn record(&mut self, name: &str, value: f64) {
        self.counters.insert(name.to_owned(), value);
    }
}
