// insiders-core/src/domain/report/mod.rs

pub mod notification;
pub mod status;

pub use notification::{LogFile, Notification, compose_report};
pub use status::{JobOutcome, JobStatus, StatusSource, count_logging_calls, resolve_status};
