use crate::parser::MetricSample;
use prometheus::{
    core::Collector as _,
    proto::MetricFamily,
    CounterVec,
    Opts,
};
use std::collections::BTreeMap;

pub const ADDRESS_LABEL: &str = "address";

/// Receives samples as a scrape produces them.
pub trait SampleSink {
    fn push(&mut self, sample: MetricSample);
}

impl SampleSink for Vec<MetricSample> {
    fn push(&mut self, sample: MetricSample) {
        Vec::push(self, sample);
    }
}

/// Groups samples into one counter family per metric name, labeled by `address`.
#[derive(Default)]
pub struct FamilySink {
    counters: BTreeMap<String, CounterVec>,
}

impl FamilySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_families(self) -> Vec<MetricFamily> {
        self.counters.into_values().flat_map(|counter| counter.collect()).collect()
    }
}

impl SampleSink for FamilySink {
    fn push(&mut self, sample: MetricSample) {
        if !self.counters.contains_key(&sample.name) {
            match CounterVec::new(Opts::new(sample.name.clone(), sample.help), &[ADDRESS_LABEL]) {
                Ok(counter) => {
                    self.counters.insert(sample.name.clone(), counter);
                }
                Err(err) => {
                    warn!(name = %sample.name, %err, "dropping sample with invalid metric name");
                    return;
                }
            }
        }
        let Some(counter) = self.counters.get(&sample.name) else {
            return;
        };

        // Same home server listed twice: keep the latest report.
        let series = counter.with_label_values(&[sample.label.as_str()]);
        series.reset();
        series.inc_by(sample.value);
    }
}
