//! Monotonic Timing
//!
//! Wraps `std::time::Instant` (monotonic by contract on every supported
//! platform) behind the opaque time-point interface the execution engine
//! uses. Timing is infallible: there is no error path that could abort a
//! benchmark run.

use std::time::Instant;

/// Opaque monotonic time point. Only meaningful to [`Clock::duration`].
#[derive(Debug, Clone, Copy)]
pub struct TimePoint(Instant);

/// Monotonic time source.
pub struct Clock;

impl Clock {
    /// Capture the current time point.
    #[inline(always)]
    pub fn now() -> TimePoint {
        TimePoint(Instant::now())
    }

    /// Nanoseconds between two time points, saturating at zero.
    #[inline(always)]
    pub fn duration(start: TimePoint, end: TimePoint) -> u64 {
        end.0.saturating_duration_since(start.0).as_nanos() as u64
    }

    /// Name of the underlying time source, for report metadata.
    pub fn description() -> &'static str {
        "std::time::Instant"
    }
}

/// Timer for measuring one timed window.
pub struct Timer {
    start: TimePoint,
}

impl Timer {
    /// Start a new timer.
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Clock::now(),
        }
    }

    /// Stop the timer and return elapsed nanoseconds.
    #[inline(always)]
    pub fn stop(&self) -> u64 {
        Clock::duration(self.start, Clock::now())
    }
}

/// Pin the current thread to a specific CPU core.
///
/// Reduces scheduler-induced jitter in the measured windows.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Pin the current thread to a specific CPU core.
///
/// CPU pinning is not supported on this platform; always succeeds.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
