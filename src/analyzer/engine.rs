//! Fan-out/fan-in orchestration for a batch of files
//!
//! One thread per path, two crossbeam channels back to the caller. The
//! channels disconnect once every unit has dropped its senders, which is the
//! barrier the collector waits on.

use crossbeam_channel::{select, unbounded, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use super::sampler::{RandomSampler, Sampler};
use super::types::{
    AnalysisBatch, AnalysisFailure, AnalysisResult, EngineConfig, Tagged, UnitPlan,
};
use super::worker::{analyze_file, unit_thread, UnitFn};

/// Concurrent analysis engine
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: EngineConfig,
}

impl Analyzer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze every path concurrently and return once all of them reported
    ///
    /// Per-file problems are returned as failures; this call itself never
    /// fails. Duplicated paths are analyzed independently.
    pub fn analyze<S: Sampler + ?Sized>(&self, paths: &[String], sampler: &mut S) -> AnalysisBatch {
        self.run_units(paths, sampler, analyze_file)
    }

    fn run_units<S: Sampler + ?Sized>(
        &self,
        paths: &[String],
        sampler: &mut S,
        unit: UnitFn,
    ) -> AnalysisBatch {
        let started = Instant::now();
        tracing::info!(units = paths.len(), "starting analysis batch");

        let (result_sender, result_receiver) = unbounded::<Tagged<AnalysisResult>>();
        let (failure_sender, failure_receiver) = unbounded::<Tagged<AnalysisFailure>>();
        let mut handles = Vec::with_capacity(paths.len());

        for (index, path) in paths.iter().enumerate() {
            let plan = UnitPlan {
                index,
                path: path.clone(),
                latency: sampler.latency(),
                malformed: sampler.is_malformed(),
            };
            tracing::debug!(path = %plan.path, latency_ms = plan.latency.as_millis() as u64, "spawning unit");

            let unit_results = result_sender.clone();
            let unit_failures = failure_sender.clone();
            let spawned = thread::Builder::new()
                .name(format!("loganizer-unit-{index}"))
                .spawn(move || unit_thread(plan, unit, unit_results, unit_failures));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "failed to spawn unit");
                    let failure = AnalysisFailure::Aborted {
                        file_path: path.clone(),
                        reason: format!("failed to spawn worker thread: {e}"),
                    };
                    let _ = failure_sender.send((index, failure));
                }
            }
        }

        // Only the units hold senders from here on
        drop(result_sender);
        drop(failure_sender);

        let mut collector = Collector::new(paths.len());
        let finished = collector.collect(result_receiver, failure_receiver, started, &self.config);

        if finished {
            for handle in handles {
                if handle.join().is_err() {
                    tracing::warn!("unit thread terminated abnormally after reporting");
                }
            }
        } else {
            // Stragglers keep running detached; their late sends are discarded
            let waited = Duration::from_millis(started.elapsed().as_millis() as u64);
            for (index, path) in paths.iter().enumerate() {
                if !collector.reported[index] {
                    collector.failures.push(AnalysisFailure::TimedOut {
                        file_path: path.clone(),
                        waited,
                    });
                }
            }
            tracing::warn!(
                timed_out = collector.pending(),
                waited_ms = waited.as_millis() as u64,
                "analysis deadline expired"
            );
        }

        let batch = AnalysisBatch {
            results: collector.results,
            failures: collector.failures,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            results = batch.results.len(),
            failures = batch.failures.len(),
            elapsed_ms = batch.elapsed.as_millis() as u64,
            "analysis batch complete"
        );
        batch
    }
}

/// Accumulates outcomes and remembers which input indices reported
struct Collector {
    results: Vec<AnalysisResult>,
    failures: Vec<AnalysisFailure>,
    reported: Vec<bool>,
}

impl Collector {
    fn new(units: usize) -> Self {
        Self {
            results: Vec::with_capacity(units),
            failures: Vec::new(),
            reported: vec![false; units],
        }
    }

    fn pending(&self) -> usize {
        self.reported.iter().filter(|done| !**done).count()
    }

    /// Drain both channels until they disconnect or the deadline passes
    ///
    /// Returns `false` when the deadline cut collection short.
    fn collect(
        &mut self,
        mut result_receiver: Receiver<Tagged<AnalysisResult>>,
        mut failure_receiver: Receiver<Tagged<AnalysisFailure>>,
        started: Instant,
        config: &EngineConfig,
    ) -> bool {
        // A deadline past the end of the clock means no deadline
        let deadline = config
            .timeout
            .and_then(|timeout| started.checked_add(timeout))
            .map_or_else(crossbeam_channel::never, crossbeam_channel::at);

        let mut results_open = true;
        let mut failures_open = true;

        while results_open || failures_open {
            select! {
                recv(result_receiver) -> msg => match msg {
                    Ok((index, result)) => {
                        self.reported[index] = true;
                        self.results.push(result);
                    }
                    Err(_) => {
                        results_open = false;
                        result_receiver = crossbeam_channel::never();
                    }
                },
                recv(failure_receiver) -> msg => match msg {
                    Ok((index, failure)) => {
                        self.reported[index] = true;
                        self.failures.push(failure);
                    }
                    Err(_) => {
                        failures_open = false;
                        failure_receiver = crossbeam_channel::never();
                    }
                },
                recv(deadline) -> _ => {
                    // select! picks randomly among ready operations
                    self.drain(&result_receiver, &failure_receiver);
                    return false;
                }
            }
        }

        true
    }

    /// Take whatever outcomes are already queued without blocking
    fn drain(
        &mut self,
        result_receiver: &Receiver<Tagged<AnalysisResult>>,
        failure_receiver: &Receiver<Tagged<AnalysisFailure>>,
    ) {
        for (index, result) in result_receiver.try_iter() {
            self.reported[index] = true;
            self.results.push(result);
        }
        for (index, failure) in failure_receiver.try_iter() {
            self.reported[index] = true;
            self.failures.push(failure);
        }
    }
}

/// Analyze `paths` with default settings and an entropy-seeded sampler
pub fn analyze_logs(paths: &[String]) -> AnalysisBatch {
    let analyzer = Analyzer::default();
    let mut sampler = RandomSampler::from_entropy(analyzer.config());
    analyzer.analyze(paths, &mut sampler)
}
