use std::borrow::Cow;
use vitae_platform::PlatformError;

/// A specialized [`NavigationError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The host refused a listener or timer during setup.
    #[error("Navigation platform error{}: {source}", format_context(.context))]
    Platform {
        #[source]
        source: PlatformError,
        context: Option<Cow<'static, str>>,
    },
}

impl From<PlatformError> for NavigationError {
    fn from(source: PlatformError) -> Self {
        Self::Platform { source, context: None }
    }
}

pub trait NavigationErrorExt<T> {
    /// Converts the error and attaches context.
    ///
    /// # Errors
    /// Returns the converted error with its context set.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, NavigationError>;
}

impl<T> NavigationErrorExt<T> for Result<T, PlatformError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, NavigationError> {
        self.map_err(|source| NavigationError::Platform { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
