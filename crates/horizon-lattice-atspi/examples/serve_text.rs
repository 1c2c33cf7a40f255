//! Serve a text buffer as `org.a11y.atspi.Text` on the session bus.
//!
//! ```text
//! cargo run --example serve_text -- [config.toml]
//! busctl --user call <unique-name> /org/a11y/atspi/accessible/text \
//!     org.a11y.atspi.Text GetText ii 0 -1
//! ```

use std::sync::Arc;

use horizon_lattice_a11y::attributes::names;
use horizon_lattice_a11y::{TextBuffer, TextRange};
use horizon_lattice_atspi::BridgeConfig;
use horizon_lattice_atspi::dbus::connect_session;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("horizon_lattice_atspi=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };

    let buffer = Arc::new(TextBuffer::new(
        "Horizon Lattice speaks AT-SPI. Screen readers can now read this label.\n\
         A second paragraph follows.",
    ));
    buffer.add_attribute(TextRange::new(0, 15), names::WEIGHT, "700")?;
    buffer.add_attribute(TextRange::new(23, 6), names::STYLE, "italic")?;
    buffer.select(TextRange::new(31, 14))?;
    buffer.set_caret_position(31);

    pollster::block_on(async {
        let connection = connect_session(&config, buffer).await?;
        println!(
            "Serving {} at {} (unique name {:?}); press Ctrl+C to quit",
            "org.a11y.atspi.Text",
            config.object_path,
            connection.unique_name()
        );
        std::future::pending::<()>().await;
        Ok::<_, Box<dyn std::error::Error>>(())
    })
}
