use std::time::Duration;

pub const DEFAULT_GAME_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);
