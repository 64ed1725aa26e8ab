//! The test runner: iterate suites, discover `test`-prefixed methods,
//! classify outcomes.

use crate::harness::results::TestResults;
use crate::runtime::class::ClassHandle;
use crate::runtime::value::Value;

/// Name prefix marking an instance method as a test.
pub const TEST_PREFIX: &str = "test";

/// Runs registered suite classes strictly sequentially and collects a
/// [`TestResults`] record. Runtime errors thrown by suites are contained
/// here; declaration errors never reach the runner.
#[derive(Default)]
pub struct TestRunner {
    suites: Vec<ClassHandle>,
}

impl TestRunner {
    pub fn new() -> TestRunner {
        TestRunner { suites: Vec::new() }
    }

    pub fn add_suite(&mut self, suite: ClassHandle) {
        self.suites.push(suite);
    }

    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    /// Run every suite in registration order and return the accumulated
    /// results. Never panics and never aborts early: each suite and each
    /// test has its own error boundary.
    pub fn run(&self) -> TestResults {
        let mut results = TestResults::new();
        for suite in &self.suites {
            self.run_suite(suite, &mut results);
        }
        results
    }

    fn run_suite(&self, suite: &ClassHandle, results: &mut TestResults) {
        // A suiteSetUp failure voids the whole suite: no tests, no
        // suiteTearDown.
        if !self.run_static_catching(suite, "suiteSetUp", results) {
            return;
        }

        let tests = self.discover_tests(suite);

        for test in &tests {
            let instance = match suite.construct(&[]) {
                Ok(instance) => instance,
                Err(e) => {
                    results.errors.push(format!(
                        "{}: error instantiating class: {}",
                        suite.name(),
                        e
                    ));
                    // Construction is broken for every remaining test too.
                    return;
                }
            };
            self.run_test(suite, &instance, test, results);
        }

        self.run_static_catching(suite, "suiteTearDown", results);
    }

    /// Test discovery happens once per suite, against the class's
    /// instance-method surface, in declaration order.
    fn discover_tests(&self, suite: &ClassHandle) -> Vec<String> {
        suite
            .instance_method_names()
            .into_iter()
            .filter(|name| name.starts_with(TEST_PREFIX))
            .collect()
    }

    fn run_test(
        &self,
        suite: &ClassHandle,
        instance: &Value,
        test: &str,
        results: &mut TestResults,
    ) {
        if !self.run_instance_catching(suite, instance, "setUp", results) {
            return;
        }

        let title = format!("{} : {}", suite.name(), test);

        let mut passed = false;
        match suite.registry().call_method(instance, test, &[]) {
            Ok(_) => passed = true,
            Err(e) => {
                if e.is_assertion() {
                    results
                        .fails
                        .push(format!("{} : assertion failed: {}", title, e));
                } else {
                    results.errors.push(format!("{} : error: {}", title, e));
                }
            }
        }

        // A tearDown failure is an error in its own right but does not
        // retract a pass the test body already earned.
        self.run_instance_catching(suite, instance, "tearDown", results);

        if passed {
            results.passes.push(title);
        }
    }

    fn run_static_catching(
        &self,
        suite: &ClassHandle,
        method: &str,
        results: &mut TestResults,
    ) -> bool {
        if !suite.has_static_method(method) {
            return true;
        }
        match suite.call_static(method, &[]) {
            Ok(_) => true,
            Err(e) => {
                results.errors.push(format!(
                    "{}: error running {}: {}",
                    suite.name(),
                    method,
                    e
                ));
                false
            }
        }
    }

    fn run_instance_catching(
        &self,
        suite: &ClassHandle,
        instance: &Value,
        method: &str,
        results: &mut TestResults,
    ) -> bool {
        if !suite.registry().has_instance_method(instance, method) {
            return true;
        }
        match suite.registry().call_method(instance, method, &[]) {
            Ok(_) => true,
            Err(e) => {
                results.errors.push(format!(
                    "{}: error running {}: {}",
                    suite.name(),
                    method,
                    e
                ));
                false
            }
        }
    }
}
