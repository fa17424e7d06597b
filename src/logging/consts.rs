pub const DEFAULT_LOGGING_BATCH_SIZE: usize = 100;
pub const QUICKWIT_LOGGING_CHANNEL_CAPACITY: usize = 10_000;
pub const MARKER_FIELD: &str = "task";
