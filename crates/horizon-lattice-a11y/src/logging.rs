//! Tracing targets for accessible text.
//!
//! Use these with `tracing` directives to filter logs, e.g.
//! `RUST_LOG=horizon_lattice_a11y::text=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Text buffer mutations and queries.
    pub const TEXT: &str = "horizon_lattice_a11y::text";
}
