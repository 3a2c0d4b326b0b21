pub mod lifecycle;

pub use lifecycle::{LoggingContentChangedEmitter, LoggingLaunchStateEmitter};
