//! # radmin output parser
//!
//! Turns the text printed by `radmin -E -e "stats home_server <addr> <port>"` into
//! [`MetricSample`]s. Two line shapes matter:
//!
//! - `stats home_server <address> <port>`: the echoed command. Every stat that
//!   follows belongs to this home server until the next header.
//! - `elapsed.<bucket>\t<count>`: a latency bucket counter.
//!
//! Everything else (banners, other counters, blank lines) is skipped. Stats that
//! appear before any header are attributed to [`DEFAULT_ENDPOINT`].

use crate::endpoint::DEFAULT_ENDPOINT;
use regex::Regex;
use std::str::Split;

pub const METRIC_PREFIX: &str = "freeradius_latency_";

lazy_static::lazy_static! {
    static ref HEADER_LINE: Regex =
        Regex::new(r"^stats home_server (.+) ([0-9]+)$").expect("valid header pattern");
    static ref ELAPSED_LINE: Regex =
        Regex::new(r"^elapsed\.([^\t]+)\t([0-9]+)$").expect("valid elapsed pattern");
}

/// One labeled counter value taken from a single `elapsed.*` line.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: String,
    pub help: String,
    pub value: f64,
    /// `address:port` of the home server the line was reported for.
    pub label: String,
}

impl MetricSample {
    fn elapsed(bucket: &str, value: f64, label: &str) -> Self {
        Self {
            name: format!("{METRIC_PREFIX}{bucket}"),
            help: format!("Total requests taking over {bucket}"),
            value,
            label: label.to_string(),
        }
    }
}

/// Lazily parses `raw`. The returned iterator is single-pass.
pub fn parse(raw: &str) -> Samples<'_> {
    Samples {
        lines: raw.split('\n'),
        current_host: DEFAULT_ENDPOINT.to_string(),
    }
}

/// Iterator over the samples in one radmin output blob.
#[derive(Debug)]
pub struct Samples<'a> {
    lines: Split<'a, char>,
    current_host: String,
}

impl Samples<'_> {
    /// Home server that the next `elapsed.*` line would be attributed to.
    pub fn current_host(&self) -> &str {
        &self.current_host
    }
}

impl Iterator for Samples<'_> {
    type Item = MetricSample;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(header) = HEADER_LINE.captures(line) {
                self.current_host = format!("{}:{}", &header[1], &header[2]);
                continue;
            }

            let Some(elapsed) = ELAPSED_LINE.captures(line) else {
                continue;
            };
            let bucket = &elapsed[1];
            match elapsed[2].parse::<f64>() {
                Ok(value) => return Some(MetricSample::elapsed(bucket, value, &self.current_host)),
                Err(err) => {
                    trace!(line, %err, "skipping elapsed line with unparsable count");
                }
            }
        }
        None
    }
}
