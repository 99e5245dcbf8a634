//! End-to-end demo: sign in, load history, ask a question.
//!
//! Needs a reachable DataChat backend. Configure via environment:
//!
//! ```bash
//! DATACHAT_API_BASE_URL=https://api.datachat.example/api \
//! DATACHAT_TENANT_ID=acme \
//! DEMO_EMAIL=ada@example.com DEMO_PASSWORD=... \
//! cargo run --example ask -p dc_client
//! ```

use std::sync::Arc;

use dc_client::{ApiClient, ClientConfig, HttpAuthGateway, HttpQueryGateway, MemoryTokenStore};
use dc_core::services::chat::{ChatEngine, ChatIdentity};
use dc_core::services::registration::AuthGateway;
use dc_core::services::session::SessionManager;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let client = Arc::new(ApiClient::new(config.api.base_url.clone()));

    // Sign in and derive the identity from the issued token
    let email = std::env::var("DEMO_EMAIL")?;
    let password = std::env::var("DEMO_PASSWORD")?;
    let auth = HttpAuthGateway::new(Arc::clone(&client));
    let token = auth.login(&email, &password).await?;

    let sessions = SessionManager::new(MemoryTokenStore::new());
    let session = sessions.sign_in(&token)?;
    client.set_token(token.clone()).await;
    println!(
        "signed in as user {} in tenant {}",
        session.claims.user_id, session.claims.tenant_id
    );

    // Build the engine and restore previous conversations
    let gateway = Arc::new(HttpQueryGateway::new(Arc::clone(&client)));
    let identity = ChatIdentity {
        user_id: session.claims.user_id,
        tenant_id: session.claims.tenant_id.clone(),
        permission_scope: None,
    };
    let mut engine = ChatEngine::new(gateway, identity, config.api.poll_interval());

    engine.load_history().await?;
    println!("{} thread(s) restored", engine.store().threads().len());

    // Ask a question on a fresh thread and wait for the answer
    engine.create_thread();
    engine.ask("show total sales by month").await?;

    if let Some(thread) = engine.store().active_thread() {
        for message in &thread.messages {
            println!("> {}", message.question);
            if let Some(answer) = &message.result {
                println!("sql: {}", answer.sql);
                println!(
                    "{} row(s), success: {}",
                    answer.result.row_count, answer.result.success
                );
                if let Some(error) = &answer.result.error {
                    println!("error: {}", error);
                }
            }
        }
    }

    sessions.sign_out();
    client.clear_token().await;
    Ok(())
}
