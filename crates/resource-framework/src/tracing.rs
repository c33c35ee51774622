//! # Tracing Setup
//!
//! Every client operation is wrapped in an `#[instrument]` span carrying the
//! collection path, so a compact formatter shows lines such as
//! `create{collection="/accounts"}: Sending request`.
//!
//! Control verbosity with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run --bin smc-accounts
//! RUST_LOG=resource_framework=debug,smc_provider=debug cargo run --bin smc-accounts
//! ```

/// Installs the global fmt subscriber, filtered by `RUST_LOG`.
///
/// Call once at process start. Later calls are ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
