//! Solver configuration. Small value type, no environment parsing crate —
//! callers (library or CLI) construct it directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub time_limit_seconds: u32,
    pub workers: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 20,
            workers: 8,
        }
    }
}
