use std::borrow::Cow;
use vitae_platform::PlatformError;

/// A specialized [`PerformanceError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum PerformanceError {
    /// The host refused the load listener.
    #[error("Performance platform error{}: {source}", format_context(.context))]
    Platform {
        #[source]
        source: PlatformError,
        context: Option<Cow<'static, str>>,
    },
}

impl From<PlatformError> for PerformanceError {
    fn from(source: PlatformError) -> Self {
        Self::Platform { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
