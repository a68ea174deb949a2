//! Storefront JSON API Server

use std::process;

use salvo::prelude::*;
use tracing::{error, info, warn};

use storefront_app::{
    context::{AppContext, AppSettings},
    notifications::NotificationDispatcher,
};

use crate::{config::ServerConfig, hosts::AllowedHosts, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod categories;
mod config;
mod customers;
mod errors;
mod extensions;
mod healthcheck;
mod hosts;
mod notifications;
mod observability;
mod orders;
mod pagination;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Storefront JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so there is nothing to log through"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let (dispatcher, notification_worker) =
        NotificationDispatcher::spawn(notifications::channels(&config.notifications));

    let settings = AppSettings {
        tokens: config.auth.token_issuer(),
        oidc: config.auth.oidc(),
        migrate: config.database.run_migrations,
    };

    let app = match AppContext::from_database_url(&config.database.database_url, settings, dispatcher)
        .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            observability.shutdown();
            process::exit(1);
        }
    };

    let hosts = AllowedHosts::new(config.server.allowed_hosts.clone());

    let mut router = router::app_router(State::from_app_context(app), hosts);

    if config.server.debug {
        router = router::with_docs(router);

        info!("serving API docs at /docs");
    }

    let service = Service::new(router).catcher(errors::catcher());

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    tokio::spawn(shutdown::listen(
        server.handle(),
        config.server.shutdown_grace(),
    ));

    server.serve(service).await;

    // The worker stops once the last dispatcher handle, owned by the service, is dropped.
    match tokio::time::timeout(config.server.shutdown_grace(), notification_worker).await {
        Ok(Ok(())) => {}
        Ok(Err(join_error)) => warn!("notification worker ended abnormally: {join_error}"),
        Err(_elapsed) => warn!("notification worker still busy; pending notifications dropped"),
    }

    info!("server stopped");

    observability.shutdown();
}
