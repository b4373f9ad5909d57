//! # procpulse Telemetry
//!
//! CPU utilization sampling from the kernel counter source.
//!
//! ## Important: CPU Usage Measurement
//!
//! The counters in `/proc/stat` are cumulative ticks since boot, so a
//! utilization figure needs two samples. The caller keeps the previous
//! [`CpuTimes`], computes the [`delta`] against the current one, and
//! [`normalize`]s the delta into percentage shares of the interval.

pub mod cpu;
pub mod delta;
pub mod error;
pub mod percent;

pub use cpu::CpuTimes;
pub use delta::{delta, CpuDelta};
pub use error::{Result, TelemetryError};
pub use percent::{normalize, CpuPercents};

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

/// Default location of the kernel counter source.
pub const DEFAULT_STAT_PATH: &str = "/proc/stat";

/// Sampler for the cumulative CPU counters.
///
/// Holds the counter source open for the lifetime of the process and rewinds
/// it before every read, since the source reports cumulative state rather
/// than a stream of events. No caching: every [`sample`](Self::sample) hits
/// the source.
#[derive(Debug)]
pub struct StatSampler {
    reader: BufReader<File>,
    path: PathBuf,
}

impl StatSampler {
    /// Open the counter source at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| TelemetryError::SourceUnavailable {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "Opened counter source");

        Ok(Self {
            reader: BufReader::new(file),
            path,
        })
    }

    /// Read the current cumulative counters.
    ///
    /// Rewinds to the start of the source and scans for the whole-system
    /// `cpu` row. Fails with [`TelemetryError::SourceUnavailable`] if the
    /// source cannot be read, and with [`TelemetryError::ParseError`] if the
    /// row is missing or malformed.
    pub fn sample(&mut self) -> Result<CpuTimes> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|source| self.unavailable(source))?;

        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|source| self.unavailable(source))?;
            if read == 0 {
                return Err(TelemetryError::ParseError(
                    "aggregate cpu row not found".into(),
                ));
            }

            if cpu::is_aggregate_line(&line) {
                let times = cpu::parse_aggregate_line(&line)?;
                trace!(total = times.total, "Sampled cumulative counters");
                return Ok(times);
            }
        }
    }

    fn unavailable(&self, source: std::io::Error) -> TelemetryError {
        TelemetryError::SourceUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}
