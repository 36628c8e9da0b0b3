//! Text-mode host for the Rally navigation core.
//!
//! The host plays the part of the app shell: it owns a
//! [`NavigationCoordinator`](rally_nav::NavigationCoordinator), turns input
//! lines into navigation events and renders the tab row and body after each
//! one.

pub mod data;
pub mod render;
pub mod shell;

pub use crate::{
    data::UserData,
    shell::{Command, Flow, Shell},
};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise only errors and the host's own info
/// events are printed.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,rally=info,rally_nav=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
