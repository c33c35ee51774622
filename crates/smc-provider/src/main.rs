//! # smc-accounts
//!
//! Lists every account on the configured SMC appliance.
//!
//! ```bash
//! SMC_HOSTNAME=https://smc.example.com SMC_API_KEY=... RUST_LOG=info cargo run --bin smc-accounts
//! ```

use resource_framework::tracing::setup_tracing;
use resource_framework::CancellationToken;
use smc_provider::lifecycle::{ProviderConfig, SmcProvider};
use std::process::ExitCode;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let span = tracing::info_span!("list_accounts");
    let result = async {
        let provider = SmcProvider::configure(&ProviderConfig::default())?;
        provider.accounts_source.list_all(&cancel).await
    }
    .instrument(span)
    .await;

    match result {
        Ok(accounts) => {
            for account in &accounts {
                info!(
                    uuid = account.uuid.as_deref().unwrap_or_default(),
                    identifier = account.identifier.as_deref().unwrap_or_default(),
                    kind = account.kind.as_deref().unwrap_or_default(),
                    "Account"
                );
            }
            info!(count = accounts.len(), "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let diagnostic = e.diagnostic();
            error!(kind = ?diagnostic.kind, detail = %diagnostic.detail, "{}", diagnostic.summary);
            ExitCode::FAILURE
        }
    }
}
