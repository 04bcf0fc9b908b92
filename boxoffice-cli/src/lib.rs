pub mod app_config;
pub mod report;
pub mod scenario;

pub use app_config::Config;
pub use report::{ConsoleObserver, ReportFormat};
pub use scenario::{Demo, RunSummary, ScenarioError, Step};
