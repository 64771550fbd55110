//! # FreeRADIUS radmin collector
//!
//! Collects home server latency statistics from a running FreeRADIUS daemon by
//! shelling out to `radmin` and exposes them as Prometheus counters.
//!
//! ## Architecture
//!
//! - **`endpoint`**: `address:port` home server entries
//! - **`command`**: The radmin argument vector, inline `-e` or commands file `-i`
//! - **`runner`**: The `RadminRunner` seam and the child-process implementation
//! - **`parser`**: Turns radmin output into `MetricSample`s
//! - **`sink`**: Where samples go during a scrape
//! - **`collector`**: `RadminCollector`, the `prometheus::core::Collector` that ties it together
//!
//! ## Output format
//!
//! ```text
//! stats home_server 10.0.0.1 1812
//! elapsed.1ms	800
//! elapsed.10ms	205
//! ```
//!
//! becomes `freeradius_latency_1ms{address="10.0.0.1:1812"} 800` and
//! `freeradius_latency_10ms{address="10.0.0.1:1812"} 205`.

#[macro_use]
extern crate tracing;

pub mod collector;
pub mod command;
pub mod endpoint;
pub mod error;
pub mod parser;
pub mod runner;
pub mod sink;

pub use collector::RadminCollector;
pub use command::{
    InvocationMode,
    RadminCommand,
};
pub use endpoint::{
    HostEndpoint,
    DEFAULT_ENDPOINT,
};
pub use error::{
    Error,
    RunError,
};
pub use parser::{
    parse,
    MetricSample,
};
pub use runner::{
    ProcessRunner,
    RadminRunner,
};
pub use sink::{
    FamilySink,
    SampleSink,
};
