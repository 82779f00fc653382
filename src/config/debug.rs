//! Debugging feature flags.
//!
//! Toggle individual diagnostics here. Every use is additionally gated by
//! `cfg(debug_assertions)`, so release builds never print these.

pub struct DebugFlags {
    /// Emit a line for every API call dispatched by the engine.
    pub print_api_calls: bool,
    /// Emit a line every time the poll deadline fires.
    pub print_poll_ticks: bool,
    /// Emit replies that were dropped because they belong to a replaced job.
    pub print_stale_replies: bool,
    /// Emit UI interaction logs (tab switches, ticker toggles, copy actions).
    pub print_ui_interactions: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_api_calls: true,
    print_poll_ticks: false,
    print_stale_replies: true,
    print_ui_interactions: false,
    print_shutdown: false,
};
