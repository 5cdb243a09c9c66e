//! Run results

use serde::Serialize;

/// Outcome of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// 1-based position in the plan
    pub index: usize,
    pub name: String,
    pub contract: String,
    pub passed: bool,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub base_url: String,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            steps: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.steps.len() - self.passed_count()
    }

    /// Look up a step by name
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }
}
