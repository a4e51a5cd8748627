//! Maps transport results onto [`NetworkFailure`].

use std::sync::Arc;

use crate::error::NetworkFailure;
use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};

const HTTP_FORBIDDEN: u16 = 403;
const HTTP_TOO_MANY_REQUESTS: u16 = 429;

/// Executes requests and turns every non-success into a [`NetworkFailure`].
#[derive(Clone)]
pub struct NetworkService {
    client: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for NetworkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkService").finish_non_exhaustive()
    }
}

impl NetworkService {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkFailure> {
        let url = request.url.clone();
        let result = self.client.execute(request).await;
        let mapped = map_response(result);
        if let Err(failure) = &mapped {
            tracing::debug!(%url, error = %failure, "request failed");
        }
        mapped
    }
}

/// Classify a finished transport call.
///
/// A successful status with an empty body counts as a server failure, since
/// the API never answers with an empty document.
pub fn map_response(
    result: Result<HttpResponse, HttpError>,
) -> Result<HttpResponse, NetworkFailure> {
    let response = match result {
        Ok(response) => response,
        Err(error) if error.retryable() => return Err(NetworkFailure::NetworkError),
        Err(_) => return Err(NetworkFailure::UnknownError),
    };

    match response.status {
        _ if response.is_success() => {
            if response.body.trim().is_empty() {
                Err(NetworkFailure::ServerError)
            } else {
                Ok(response)
            }
        }
        HTTP_FORBIDDEN | HTTP_TOO_MANY_REQUESTS => Err(NetworkFailure::ApiLimitExceeded),
        status if status >= 500 => Err(NetworkFailure::ServerError),
        status => Err(NetworkFailure::ApiError {
            code: status,
            message: response.reason().to_owned(),
        }),
    }
}
