//! Provider request execution.
//!
//! [`ProviderBridge`] turns a [`ProviderRequest`] into a [`ProviderResponse`]
//! by calling the wrapped [`CatalogProvider`]. Fetch failures become `Error`
//! responses carrying the provider's message; they never escape as panics or
//! bubbled errors. The host owns where and when this runs (on a worker
//! thread, inside its executor, or inline in tests) and feeds each response
//! back to the core as an event in whatever order they complete.

use crate::domain::error::Result;
use crate::provider::backend::CatalogProvider;
use crate::provider::messages::{ProviderRequest, ProviderResponse, RequestToken};

/// Executes provider requests and converts outcomes into responses.
pub struct ProviderBridge {
    provider: Box<dyn CatalogProvider>,
}

impl ProviderBridge {
    /// Wraps a provider implementation.
    #[must_use]
    pub fn new(provider: Box<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Runs one request to completion and returns its response.
    ///
    /// Never fails: provider errors are folded into
    /// [`ProviderResponse::Error`] with the request's token, so the stores can
    /// match the failure against their latest issued fetch.
    pub fn handle_request(&mut self, request: ProviderRequest) -> ProviderResponse {
        let span = tracing::debug_span!("provider_request", token = %request.token());
        let _guard = span.entered();

        match request {
            ProviderRequest::FetchGames { query, token } => Self::respond(
                "fetch games",
                token,
                self.provider.fetch_games(&query),
                |page| ProviderResponse::GamesLoaded { token, page },
            ),
            ProviderRequest::FetchGameDetails { id, token } => Self::respond(
                "fetch game details",
                token,
                self.provider.fetch_game_details(id),
                |game| ProviderResponse::GameDetailsLoaded { token, game },
            ),
            ProviderRequest::FetchPublishers { query, token } => Self::respond(
                "fetch publishers",
                token,
                self.provider.fetch_publishers(&query),
                |page| ProviderResponse::PublishersLoaded { token, page },
            ),
            ProviderRequest::FetchEvents { token } => Self::respond(
                "fetch events",
                token,
                self.provider.fetch_events(),
                |events| ProviderResponse::EventsLoaded { token, events },
            ),
        }
    }

    /// Shared success/failure folding with consistent logging.
    fn respond<T, F>(
        operation: &str,
        token: RequestToken,
        result: Result<T>,
        on_success: F,
    ) -> ProviderResponse
    where
        F: FnOnce(T) -> ProviderResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "provider fetch resolved");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "provider fetch failed");
                ProviderResponse::Error {
                    token,
                    message: e.to_string(),
                }
            }
        }
    }
}
