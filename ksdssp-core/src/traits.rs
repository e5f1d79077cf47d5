//! Core traits shared across the ksdssp workspace.

/// A type that carries a human-readable identity.
pub trait Annotated {
    /// A human-readable name or identifier.
    fn name(&self) -> &str;

    /// An optional description.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing;

    impl Annotated for Thing {
        fn name(&self) -> &str {
            "thing"
        }
    }

    impl Summarizable for Thing {
        fn summary(&self) -> String {
            format!("{} (1 item)", self.name())
        }
    }

    #[test]
    fn test_default_description() {
        assert_eq!(Thing.description(), None);
    }

    #[test]
    fn test_summary() {
        assert_eq!(Thing.summary(), "thing (1 item)");
    }
}
