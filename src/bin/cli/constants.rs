pub const VERSION: &str = "v0.1.0";
// Poll interval of the event loop.
pub const TICK_MS: u64 = 16;
// How long the transient "saved" acknowledgment stays visible.
pub const SAVED_INDICATOR_MS: u64 = 1400;
// Fallback timer clearing the "updating" preview state.
pub const PREVIEW_UPDATING_MS: u64 = 250;
// How long transient status messages stay visible.
pub const STATUS_MESSAGE_MS: u64 = 4000;
