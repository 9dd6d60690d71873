/// Domain errors raised by a [`StringService`](crate::StringService).
///
/// Variants are compared structurally; callers match on the kind rather than
/// on a shared sentinel instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The input string was empty.
    #[error("empty string")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_display() {
        assert_eq!(ServiceError::EmptyInput.to_string(), "empty string");
    }

    #[test]
    fn errors_compare_by_kind() {
        assert_eq!(ServiceError::EmptyInput, ServiceError::EmptyInput.clone());
    }
}
