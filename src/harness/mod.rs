//! Minimal test harness exercising the class system: suite base class,
//! runner and result reporting.

pub mod report;
pub mod results;
pub mod runner;
pub mod suite;

pub use self::results::TestResults;
pub use self::runner::TestRunner;
pub use self::suite::define_base_suite;
