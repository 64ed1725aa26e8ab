/// Accumulated outcome of one runner pass. Each list holds human-readable
/// entries in suite-then-test discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestResults {
    pub passes: Vec<String>,
    pub fails: Vec<String>,
    pub errors: Vec<String>,
}

impl TestResults {
    pub fn new() -> TestResults {
        TestResults::default()
    }

    pub fn total(&self) -> usize {
        self.passes.len() + self.fails.len() + self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.fails.is_empty() && self.errors.is_empty()
    }
}
