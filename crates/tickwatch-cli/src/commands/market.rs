use std::sync::Arc;

use serde::Serialize;
use tickwatch_core::{
    CacheMode, Failure, FreshnessTracker, MarketClient, NetworkService, Outcome,
    ReqwestHttpClient, Settings, Symbol,
};

use crate::cli::{MarketArgs, MarketCommand};
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &MarketArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    let network = NetworkService::new(Arc::new(ReqwestHttpClient::new()));
    let tracker = Arc::new(FreshnessTracker::new(settings.cache_ttl()));
    let client = MarketClient::new(network, settings.api_key.as_str(), tracker);
    fetch(&client, args).await
}

async fn fetch(client: &MarketClient, args: &MarketArgs) -> Result<CommandResult, CliError> {
    let mode = if args.refresh {
        CacheMode::Refresh
    } else {
        CacheMode::Use
    };

    match &args.command {
        MarketCommand::Movers => render(client.top_movers(mode).await),
        MarketCommand::Detail { symbol } => match Symbol::parse(symbol) {
            Ok(symbol) => render(client.stock_detail(&symbol, mode).await),
            Err(failure) => Ok(CommandResult::from_failure(&Failure::from(failure))),
        },
        MarketCommand::Series { symbol } => match Symbol::parse(symbol) {
            Ok(symbol) => render(client.time_series(&symbol, mode).await),
            Err(failure) => Ok(CommandResult::from_failure(&Failure::from(failure))),
        },
        MarketCommand::Search { query } => render(client.search(query, mode).await),
    }
}

fn render<T: Serialize>(outcome: Outcome<T>) -> Result<CommandResult, CliError> {
    match outcome {
        Outcome::Success(value) => Ok(CommandResult::ok(serde_json::to_value(value)?)),
        Outcome::Error(failure) => Ok(CommandResult::from_failure(&failure)),
        Outcome::Loading => Err(CliError::Command(String::from("market data is still loading"))),
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use tickwatch_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

    use super::*;

    struct CannedClient(&'static str);

    impl HttpClient for CannedClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let body = self.0;
            Box::pin(async move { Ok(HttpResponse::new(200, body)) })
        }
    }

    fn client(body: &'static str) -> MarketClient {
        MarketClient::new(
            NetworkService::new(Arc::new(CannedClient(body))),
            "test",
            Arc::new(FreshnessTracker::default()),
        )
    }

    fn args(command: MarketCommand) -> MarketArgs {
        MarketArgs {
            refresh: false,
            command,
        }
    }

    #[tokio::test]
    async fn search_results_are_printed() {
        let body = r#"{"bestMatches": [{"1. symbol": "TSCO.LON", "9. matchScore": "0.72"}]}"#;

        let result = fetch(
            &client(body),
            &args(MarketCommand::Search {
                query: String::from("tesco"),
            }),
        )
        .await
        .expect("search");

        assert!(!result.failed);
        assert_eq!(result.data[0]["symbol"], "TSCO.LON");
    }

    #[tokio::test]
    async fn throttled_movers_report_a_classified_failure() {
        let result = fetch(&client(r#"{"Note": "slow down"}"#), &args(MarketCommand::Movers))
            .await
            .expect("movers");

        assert!(result.failed);
        assert_eq!(result.data["error"]["category"], "STOCK");
        assert_eq!(result.data["error"]["retryable"], true);
    }

    #[tokio::test]
    async fn invalid_symbol_never_reaches_the_network() {
        let result = fetch(
            &client("unreachable"),
            &args(MarketCommand::Series {
                symbol: String::from("BRK.B"),
            }),
        )
        .await
        .expect("series");

        assert!(result.failed);
        assert_eq!(result.data["error"]["category"], "VALIDATION");
    }
}
