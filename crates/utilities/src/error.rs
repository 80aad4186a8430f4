use core::error::Error;
use core::fmt::Debug;
use core::fmt::Display;

/// The error type of the omega tools. Any type implementing [`Error`] (and
/// plain strings) converts into it, so `?` works across crate boundaries. A
/// backtrace is captured on creation and shown by the [`Debug`] output when
/// `RUST_BACKTRACE` is set.
pub struct OmegaError {
    inner: Box<ErrorWithBacktrace>,
}

impl OmegaError {
    /// Returns the underlying error when it has type `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.error.downcast_ref::<E>()
    }
}

/// Kept behind a single box so that `Result<T, OmegaError>` stays one pointer wide.
struct ErrorWithBacktrace {
    error: Box<dyn Error + Send + Sync + 'static>,
    backtrace: std::backtrace::Backtrace,
}

impl<E> From<E> for OmegaError
where
    Box<dyn Error + Send + Sync + 'static>: From<E>,
{
    #[cold]
    fn from(error: E) -> Self {
        OmegaError {
            inner: Box::new(ErrorWithBacktrace {
                error: error.into(),
                backtrace: std::backtrace::Backtrace::capture(),
            }),
        }
    }
}

impl Display for OmegaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.inner.error)
    }
}

impl Debug for OmegaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self.inner.error)?;

        let backtrace = &self.inner.backtrace;
        if let std::backtrace::BacktraceStatus::Captured = backtrace.status() {
            writeln!(f, "{backtrace}")?;
        }

        Ok(())
    }
}
