use std::borrow::Cow;

/// Errors raised by a [`Platform`](crate::Platform) implementation.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// A call into the host environment threw or returned an unusable value.
    #[error("Host call failed{}: {message}", format_context(.context))]
    Host { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The handle does not refer to an element known to the platform.
    #[error("Node not found{}: {message}", format_context(.context))]
    NodeNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The element or host lacks the capability required by the operation.
    #[error("Unsupported operation{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub trait PlatformErrorExt<T> {
    /// Attaches context to the error, replacing any previous context.
    ///
    /// # Errors
    /// Returns the original error with its context set.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, PlatformError>;
}

impl<T> PlatformErrorExt<T> for Result<T, PlatformError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut err| {
            match &mut err {
                PlatformError::Host { context: c, .. }
                | PlatformError::NodeNotFound { context: c, .. }
                | PlatformError::Unsupported { context: c, .. } => *c = Some(context.into()),
            }
            err
        })
    }
}

impl PlatformError {
    pub(crate) fn node_not_found(node: crate::NodeRef) -> Self {
        Self::NodeNotFound { message: format!("node #{}", node.raw()).into(), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered_in_message() {
        let result: Result<(), PlatformError> =
            Err(PlatformError::node_not_found(crate::NodeRef::new(7)));
        let err = result.context("toggle class").unwrap_err();
        assert_eq!(err.to_string(), "Node not found (toggle class): node #7");
    }
}
