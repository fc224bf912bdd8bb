//! Shared utility functions for CWR map crates.

/// Element identifier helpers
pub mod ids {
    /// Derive the identifier a map element is addressed by.
    ///
    /// All whitespace is removed, so "Los Angeles" becomes "LosAngeles".
    /// Identifiers are case sensitive.
    pub fn element_id(name: &str) -> String {
        name.chars().filter(|c| !c.is_whitespace()).collect()
    }

}

/// Reservoir measurement parsing and display
pub mod measurements {
    /// Parse a measurement field leniently.
    ///
    /// Placeholder values ("", "null", "n/a", "na") and anything that
    /// isn't a number come back as `None`.
    pub fn parse_measurement(s: &str) -> Option<f64> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "" | "null" | "n/a" | "na" => None,
            v => v.replace(',', "").parse::<f64>().ok(),
        }
    }

    /// Format a measurement for display. Whole numbers print without a
    /// fractional part; missing values print as "n/a".
    pub fn format_measurement(value: Option<f64>) -> String {
        match value {
            Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
            Some(v) => format!("{}", v),
            None => "n/a".to_string(),
        }
    }

}

/// Error types
pub mod error {
    use std::fmt;

    /// Which data layer a load failure belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Layer {
        Counties,
        Reservoirs,
        Connections,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Layer::Counties => write!(f, "county boundaries"),
                Layer::Reservoirs => write!(f, "reservoir records"),
                Layer::Connections => write!(f, "connection tables"),
            }
        }
    }

    /// A data-load failure tagged with the layer that failed.
    #[derive(Debug)]
    pub struct LoadError {
        pub layer: Layer,
        pub message: String,
    }

    impl LoadError {
        pub fn new(layer: Layer, err: impl fmt::Display) -> Self {
            Self {
                layer,
                message: err.to_string(),
            }
        }
    }

    impl fmt::Display for LoadError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Failed to load {}: {}", self.layer, self.message)
        }
    }

    impl std::error::Error for LoadError {}

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_load_error_display() {
            let err = LoadError::new(Layer::Reservoirs, "expected value at line 1 column 1");
            assert_eq!(
                err.to_string(),
                "Failed to load reservoir records: expected value at line 1 column 1"
            );
        }

        #[test]
        fn test_load_error_into_anyhow() {
            let err: anyhow::Error = LoadError::new(Layer::Counties, "404").into();
            let load = err.downcast_ref::<LoadError>().unwrap();
            assert_eq!(load.layer, Layer::Counties);
        }
    }
}
