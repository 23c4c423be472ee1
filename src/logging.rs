/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        self.map_err(|e| tracing::warn!("{}: {}", context, e)).ok()
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        self.log_warn(context).unwrap_or_default()
    }
}
