//! Wall-clock timing of kernel passes
//!
//! The numeric pass logs its duration at `info`, the compaction pass at
//! `debug`. Both announce themselves one level lower when they start.

use std::time::{Duration, Instant};

/// Scoped timer for one pass of the kernel
///
/// Logs `"<pass>: <elapsed>"` at its level when dropped.
///
/// # Example
/// ```
/// use hashspgemm::utils::Timed;
///
/// {
///     let _t = Timed::debug("compaction");
///     // re-pack rows here
/// } // logs "compaction: 12.345µs" at DEBUG
/// ```
pub struct Timed {
    pass: &'static str,
    start: Instant,
    level: log::Level,
}

impl Timed {
    fn start(pass: &'static str, level: log::Level, announce: log::Level) -> Self {
        log::log!(announce, "{} started", pass);
        Self {
            pass,
            start: Instant::now(),
            level,
        }
    }

    /// Timer for a top-level pass, reported at INFO
    pub fn info(pass: &'static str) -> Self {
        Self::start(pass, log::Level::Info, log::Level::Debug)
    }

    /// Timer for a sub-pass, reported at DEBUG
    pub fn debug(pass: &'static str) -> Self {
        Self::start(pass, log::Level::Debug, log::Level::Trace)
    }

    /// Time since the pass started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        log::log!(self.level, "{}: {:.3?}", self.pass, self.elapsed());
    }
}
