//! Tracing targets for the AT-SPI bridge.
//!
//! ```text
//! RUST_LOG=horizon_lattice_atspi::dispatch=trace
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Method dispatch and property reads.
    pub const DISPATCH: &str = "horizon_lattice_atspi::dispatch";
    /// D-Bus object registration and calls.
    pub const DBUS: &str = "horizon_lattice_atspi::dbus";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_lattice_atspi::config";
}
