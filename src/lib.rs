//! Core of the minipen playground: a persisted editor snapshot, the
//! assembler that combines the three fragments into one standalone HTML
//! document, the auto-run debounce, the preview surface, and the export
//! bundle builder. The TUI in `bin/cli` is a thin adapter over these.

pub mod assemble;
pub mod autorun;
pub mod export;
pub mod preview;
pub mod snapshot;
pub mod store;
