/// Error returned when the evolve builder has invalid or missing configuration.
/// Contains a descriptive message about what went wrong (e.g. missing data,
/// population size below the minimum).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromEvolveBuilderError(pub &'static str);

impl std::fmt::Display for TryFromEvolveBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid evolve configuration: {}", self.0)
    }
}
impl std::error::Error for TryFromEvolveBuilderError {}
