//! Resolver configuration

/// Switches for the diagnostics a resolution run reports beyond dangling
/// references. The defaults report dangling references only; none of the
/// switches change the resolved sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Report each composition cycle once, before resolving
    pub report_cycles: bool,
    /// Report every name declared more than once in the same list
    pub report_duplicates: bool,
    /// Stop collecting diagnostics after this many; `None` keeps them all
    pub max_diagnostics: Option<usize>,
}

impl ResolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported, nothing capped
    pub fn strict() -> Self {
        Self::new().with_report_cycles(true).with_report_duplicates(true)
    }

    pub fn with_report_cycles(mut self, report_cycles: bool) -> Self {
        self.report_cycles = report_cycles;
        self
    }

    pub fn with_report_duplicates(mut self, report_duplicates: bool) -> Self {
        self.report_duplicates = report_duplicates;
        self
    }

    pub fn with_max_diagnostics(mut self, max_diagnostics: usize) -> Self {
        self.max_diagnostics = Some(max_diagnostics);
        self
    }
}
