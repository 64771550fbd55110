use crate::{
    command::RadminCommand,
    error::Error,
    parser,
    runner::RadminRunner,
    sink::{
        FamilySink,
        SampleSink,
    },
};
use prometheus::{
    core::{
        Collector,
        Desc,
    },
    proto::MetricFamily,
};
use std::sync::Mutex;

/// Scrapes `radmin` once per [`collect`](Collector::collect) and reports the
/// home server latency buckets as counters.
///
/// Scrapes are serialised: a caller that arrives while another scrape is running
/// waits for it and then runs its own.
pub struct RadminCollector {
    command: RadminCommand,
    args: Vec<String>,
    runner: Box<dyn RadminRunner>,
    gate: Mutex<()>,
}

impl RadminCollector {
    /// Builds the collector and, in commands-file mode, writes the commands file.
    pub fn new(command: RadminCommand, runner: impl RadminRunner + 'static) -> Result<Self, Error> {
        command.prepare()?;
        let args = command.args();
        Ok(Self {
            command,
            args,
            runner: Box::new(runner),
            gate: Mutex::new(()),
        })
    }

    pub fn command(&self) -> &RadminCommand {
        &self.command
    }

    /// Runs one scrape cycle and pushes every sample into `sink`.
    ///
    /// Nothing is pushed when no home servers are configured or when radmin fails.
    pub fn collect_into<S: SampleSink + ?Sized>(&self, sink: &mut S) {
        if !self.command.has_endpoints() {
            return;
        }

        let _guard = self.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        debug!(args = ?self.args, "running radmin");
        let output = match self.runner.run(&self.args) {
            Ok(output) => output,
            Err(err) => {
                error!(%err, "radmin error");
                error!(output = err.output(), "radmin output");
                return;
            }
        };

        let mut count = 0usize;
        for sample in parser::parse(&output) {
            sink.push(sample);
            count += 1;
        }
        debug!(samples = count, "radmin scrape finished");
    }
}

impl Collector for RadminCollector {
    /// Metric names depend on the buckets radmin reports, so nothing is described up front.
    fn desc(&self) -> Vec<&Desc> {
        Vec::new()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut sink = FamilySink::new();
        self.collect_into(&mut sink);
        sink.into_families()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::RunError,
        parser::MetricSample,
    };
    use pretty_assertions::assert_eq;
    use std::{
        sync::Arc,
        thread,
        time::{
            Duration,
            Instant,
        },
    };

    const REPORT: &str = "\
stats home_server 10.0.0.1 1812
elapsed.1\t5
stats home_server 10.0.0.2 1813
elapsed.1\t9
";

    /// Records every invocation window and replies with a canned report.
    #[derive(Clone, Default)]
    struct FakeRadmin {
        reply: Option<&'static str>,
        delay: Duration,
        calls: Arc<Mutex<Vec<(Vec<String>, Instant, Instant)>>>,
    }

    impl FakeRadmin {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self::default()
        }

        fn calls(&self) -> Vec<(Vec<String>, Instant, Instant)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RadminRunner for FakeRadmin {
        fn run(&self, args: &[String]) -> Result<String, RunError> {
            let started = Instant::now();
            thread::sleep(self.delay);
            let finished = Instant::now();
            self.calls.lock().unwrap().push((args.to_vec(), started, finished));
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(RunError::Spawn {
                    binary: "/opt/sbin/radmin".into(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                }),
            }
        }
    }

    fn command(home_servers: &[&str]) -> RadminCommand {
        RadminCommand::from_home_servers("/var/run/radiusd/radiusd.sock", home_servers).unwrap()
    }

    fn scrape(collector: &RadminCollector) -> Vec<MetricSample> {
        let mut samples = Vec::new();
        collector.collect_into(&mut samples);
        samples
    }

    #[test]
    fn forwards_parsed_samples() {
        let radmin = FakeRadmin::replying(REPORT);
        let collector = RadminCollector::new(command(&["10.0.0.1:1812", "10.0.0.2:1813"]), radmin.clone()).unwrap();

        let samples = scrape(&collector);

        assert_eq!(
            samples.iter().map(|s| (s.label.as_str(), s.value)).collect::<Vec<_>>(),
            vec![("10.0.0.1:1812", 5.0), ("10.0.0.2:1813", 9.0)]
        );
        let calls = radmin.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, collector.command().args());
    }

    #[test]
    fn every_collect_runs_radmin_again() {
        let radmin = FakeRadmin::replying(REPORT);
        let collector = RadminCollector::new(command(&["10.0.0.1:1812"]), radmin.clone()).unwrap();

        assert_eq!(scrape(&collector).len(), 2);
        assert_eq!(scrape(&collector).len(), 2);
        assert_eq!(radmin.calls().len(), 2);
    }

    #[test]
    fn no_home_servers_means_no_radmin_call() {
        let radmin = FakeRadmin::replying(REPORT);
        let collector = RadminCollector::new(command(&["", ""]), radmin.clone()).unwrap();

        assert!(scrape(&collector).is_empty());
        assert!(Collector::collect(&collector).is_empty());
        assert!(radmin.calls().is_empty());
    }

    #[test]
    fn radmin_failure_yields_no_samples() {
        let radmin = FakeRadmin::failing();
        let collector = RadminCollector::new(command(&["10.0.0.1:1812"]), radmin.clone()).unwrap();

        assert!(scrape(&collector).is_empty());
        assert!(Collector::collect(&collector).is_empty());
        assert_eq!(radmin.calls().len(), 2);
    }

    #[test]
    fn concurrent_scrapes_do_not_overlap() {
        let radmin = FakeRadmin {
            delay: Duration::from_millis(50),
            ..FakeRadmin::replying(REPORT)
        };
        let collector = Arc::new(RadminCollector::new(command(&["10.0.0.1:1812"]), radmin.clone()).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let collector = Arc::clone(&collector);
                thread::spawn(move || scrape(&collector).len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }

        let mut windows: Vec<_> = radmin.calls().into_iter().map(|(_, start, end)| (start, end)).collect();
        assert_eq!(windows.len(), 4);
        windows.sort();
        for pair in windows.windows(2) {
            assert!(pair[0].1 <= pair[1].0, "radmin invocations overlapped");
        }
    }

    #[test]
    fn describes_nothing() {
        let collector = RadminCollector::new(command(&["10.0.0.1:1812"]), FakeRadmin::replying(REPORT)).unwrap();
        assert!(collector.desc().is_empty());
    }

    #[test]
    fn registry_exposes_counters_per_home_server() {
        let collector = RadminCollector::new(command(&["10.0.0.1:1812"]), FakeRadmin::replying(REPORT)).unwrap();
        let registry = prometheus::Registry::new();
        registry.register(Box::new(collector)).unwrap();

        let families = registry.gather();

        assert_eq!(families.len(), 1);
        let family = &families[0];
        assert_eq!(family.get_name(), "freeradius_latency_1");
        assert_eq!(family.get_field_type(), prometheus::proto::MetricType::COUNTER);
        let mut series: Vec<_> = family
            .get_metric()
            .iter()
            .map(|m| (m.get_label()[0].get_value().to_string(), m.get_counter().get_value()))
            .collect();
        series.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            series,
            vec![("10.0.0.1:1812".to_string(), 5.0), ("10.0.0.2:1813".to_string(), 9.0)]
        );
    }
}
