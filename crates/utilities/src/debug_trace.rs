//! Tracing of intermediate results that is too expensive to format in normal
//! builds, such as complete antichains after every worklist step.

/// Forwards to [`log::trace!`] when the `omega_debug-trace` feature is
/// enabled, and expands to nothing otherwise, so that the arguments are not
/// even evaluated.
///
/// ```
/// omega_utilities::debug_trace!("antichain for state {}: {:?}", 3, [1, 2]);
/// ```
#[macro_export]
#[cfg(feature = "omega_debug-trace")]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        log::trace!($($arg)*)
    };
}

#[macro_export]
#[cfg(not(feature = "omega_debug-trace"))]
macro_rules! debug_trace {
    ($($arg:tt)*) => {{}};
}
