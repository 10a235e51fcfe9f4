//! Unit of work for a single log file
//!
//! Each unit runs on its own thread, reads and counts one file, and reports
//! exactly one outcome on the matching channel.

use crossbeam_channel::Sender;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crate::decompression::{count_lines, DecompressionReader};

use super::types::{AnalysisFailure, AnalysisResult, Tagged, UnitPlan};

/// Work performed by one unit for its plan
pub(crate) type UnitFn = fn(&UnitPlan) -> Result<AnalysisResult, AnalysisFailure>;

/// Thread body: run `unit` and send its single outcome
///
/// A panic inside `unit` is caught here and reported as `Aborted`.
pub(crate) fn unit_thread(
    plan: UnitPlan,
    unit: UnitFn,
    result_sender: Sender<Tagged<AnalysisResult>>,
    failure_sender: Sender<Tagged<AnalysisFailure>>,
) {
    let index = plan.index;
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| unit(&plan)));

    // A send only fails once the collector stopped waiting (deadline expired)
    match outcome {
        Ok(Ok(result)) => {
            tracing::debug!(path = %result.file_path, entries = result.entry_count, "unit finished");
            let _ = result_sender.send((index, result));
        }
        Ok(Err(failure)) => {
            tracing::debug!(path = %plan.path, kind = %failure.kind(), "unit failed");
            let _ = failure_sender.send((index, failure));
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(path = %plan.path, %reason, "unit panicked");
            let failure = AnalysisFailure::Aborted {
                file_path: plan.path.clone(),
                reason: format!("worker panicked: {reason}"),
            };
            let _ = failure_sender.send((index, failure));
        }
    }
}

/// Simulate latency, then open, count and check one file
pub(crate) fn analyze_file(plan: &UnitPlan) -> Result<AnalysisResult, AnalysisFailure> {
    thread::sleep(plan.latency);

    let unreadable = |source| AnalysisFailure::Unreadable {
        file_path: plan.path.clone(),
        source,
    };

    let mut reader = DecompressionReader::open(&plan.path).map_err(unreadable)?;
    let entry_count = count_lines(&mut reader).map_err(unreadable)?;
    drop(reader);

    if plan.malformed {
        return Err(AnalysisFailure::Malformed {
            file_path: plan.path.clone(),
        });
    }

    Ok(AnalysisResult {
        file_path: plan.path.clone(),
        entry_count,
        duration: plan.latency,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::FailureKind;
    use crossbeam_channel::unbounded;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn plan(path: &str, malformed: bool) -> UnitPlan {
        UnitPlan {
            index: 0,
            path: path.to_string(),
            latency: Duration::from_millis(1),
            malformed,
        }
    }

    #[test]
    fn counts_lines_of_readable_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "one\ntwo\nthree\nfour\nfive\n").unwrap();
        let path = file.path().to_str().unwrap();

        let result = analyze_file(&plan(path, false)).unwrap();
        assert_eq!(result.file_path, path);
        assert_eq!(result.entry_count, 5);
        assert_eq!(result.duration, Duration::from_millis(1));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.log");
        let path = path.to_str().unwrap();

        let failure = analyze_file(&plan(path, false)).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Unreadable);
        assert_eq!(failure.file_path(), path);
    }

    #[test]
    fn unreadable_wins_over_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.log");

        let failure = analyze_file(&plan(path.to_str().unwrap(), true)).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Unreadable);
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let failure = analyze_file(&plan(dir.path().to_str().unwrap(), false)).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Unreadable);
    }

    #[test]
    fn content_check_rejects_readable_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "line").unwrap();

        let failure = analyze_file(&plan(file.path().to_str().unwrap(), true)).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Malformed);
        assert!(failure.to_string().starts_with("parsing error for file"));
    }

    #[test]
    fn panicking_unit_reports_aborted() {
        let (result_sender, result_receiver) = unbounded();
        let (failure_sender, failure_receiver) = unbounded();
        let mut unit = plan("explodes.log", false);
        unit.index = 3;

        unit_thread(unit, |_| panic!("boom"), result_sender, failure_sender);

        assert!(result_receiver.try_recv().is_err());
        let (index, failure) = failure_receiver.try_recv().unwrap();
        assert_eq!(index, 3);
        assert_eq!(failure.kind(), FailureKind::Aborted);
        assert_eq!(failure.file_path(), "explodes.log");
        assert!(failure.to_string().contains("worker panicked: boom"));
    }

    #[test]
    fn panic_payloads_are_described() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(17_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
