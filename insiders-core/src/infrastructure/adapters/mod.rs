// insiders-core/src/infrastructure/adapters/mod.rs

pub mod process;
pub mod smtp;
pub mod stdout;

pub use process::ProcessRunner;
pub use smtp::SmtpNotifier;
pub use stdout::StdoutNotifier;
