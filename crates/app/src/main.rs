//! Prospect - Main Entry Point
//!
//! Composition root for the dashboard client: wires configuration, the
//! identity client, the session controller and the API gateway together,
//! signs the user in and loads the role-appropriate dashboard.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use prospect_application::{
    ApplicationError, LoadAdminDashboard, LoadCustomerDashboard, RouteOutcome, ScopedFetch,
    SessionController, TokenCache, TokenProvider, View, resolve,
};
use prospect_domain::Route;
use prospect_infrastructure::{AppConfig, OAuthIdentityClient, RestApiGateway};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(badge) = config.environment_badge() {
        info!(environment = badge, "non-production environment");
    }

    let identity =
        OAuthIdentityClient::new(config.identity.clone()).map_err(|e| e.to_string())?;
    let cache = TokenCache::new();
    let scopes = config.identity.scopes.clone();

    let controller =
        SessionController::new(Arc::clone(&identity), cache.clone(), scopes.clone());

    // Initialization failure is the one fatal error path.
    if let Err(err) = controller.initialize().await {
        if let ApplicationError::Initialization(init) = &err {
            for hint in init.remediation() {
                warn!(hint, "remediation");
            }
        }
        return Err(err.to_string());
    }

    // Adopt a cached account when one exists; sign in interactively otherwise.
    let session = if controller.restore().await.is_authenticated() {
        controller.session().await
    } else {
        controller.login().await.map_err(|e| e.to_string())?
    };
    info!(
        user = session.account().map_or("", |a| a.username.as_str()),
        role = %session.role(),
        "session ready"
    );

    let tokens = Arc::new(TokenProvider::new(identity, cache, scopes));
    let gateway =
        Arc::new(RestApiGateway::new(config.api_base_url, tokens).map_err(|e| e.to_string())?);

    match resolve(&controller.state().await, Route::Home) {
        RouteOutcome::Redirect {
            target: Route::Admin,
            ..
        }
        | RouteOutcome::Render(View::AdminDashboard) => {
            let load = LoadAdminDashboard::new(gateway);
            let session = session.clone();
            let fetch = ScopedFetch::spawn(async move { load.execute(&session).await });
            if let Some(view) = fetch.join().await {
                info!(
                    analytics_ready = view.analytics.is_ready(),
                    users_ready = view.users.is_ready(),
                    "admin dashboard loaded"
                );
                report_errors(&[view.analytics.error(), view.users.error()]);
            }
        }
        _ => {
            let load = LoadCustomerDashboard::new(gateway);
            let session = session.clone();
            let fetch = ScopedFetch::spawn(async move { load.execute(&session).await });
            if let Some(view) = fetch.join().await {
                if let Some(stats) = &view.stats {
                    info!(
                        total = stats.total,
                        submitted = stats.submitted,
                        avg_completion = stats.avg_completion,
                        "proposal stats"
                    );
                }
                report_errors(&[view.profile.error(), view.proposals.error()]);
            }
        }
    }

    Ok(())
}

/// Logs per-fetch failures; they never abort the run.
fn report_errors(errors: &[Option<&str>]) {
    for message in errors.iter().flatten() {
        warn!(error = message, "dashboard fetch failed");
    }
}
