mod error;
mod live;

pub use error::Error;
pub use live::{ConnectionState, Subscription};

use std::time::Duration;

use tokio_tungstenite::tungstenite::client::ClientRequestBuilder;

/// Builds a [`ConsoleClient`] for one event-channel endpoint.
///
/// The endpoint accepts `http(s)` or `ws(s)` URLs; http schemes are
/// normalized to their websocket counterparts. An API key, when set, is sent
/// as a bearer `Authorization` header during the handshake.
#[derive(Default)]
pub struct ConsoleClientBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    keep_alive: Option<Duration>,
}

impl ConsoleClientBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Send a `KeepAlive` control frame whenever the subscription has been
    /// idle for `period`. Off by default.
    pub fn keep_alive(mut self, period: Duration) -> Self {
        self.keep_alive = Some(period);
        self
    }

    pub fn build(self) -> Result<ConsoleClient, Error> {
        let raw = self.endpoint.ok_or(Error::MissingEndpoint)?;
        let mut url: url::Url = raw.parse()?;
        normalize_ws_scheme(&mut url)?;

        Ok(ConsoleClient {
            url,
            api_key: self.api_key,
            keep_alive: self.keep_alive,
        })
    }
}

/// Handle to the agent's event channel. Owned by whoever owns the consuming
/// view and passed in explicitly; there is no process-wide shared
/// connection. Each [`subscribe`](ConsoleClient::subscribe) call opens one
/// connection whose lifetime is bound to the returned [`Subscription`].
pub struct ConsoleClient {
    url: url::Url,
    api_key: Option<String>,
    keep_alive: Option<Duration>,
}

impl ConsoleClient {
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::default()
    }

    pub fn endpoint(&self) -> &url::Url {
        &self.url
    }

    pub(crate) fn build_request(&self) -> Result<ClientRequestBuilder, Error> {
        let uri = self.url.to_string().parse()?;
        let mut request = ClientRequestBuilder::new(uri);

        if let Some(api_key) = &self.api_key {
            request = request.with_header("Authorization", format!("Bearer {api_key}"));
        }

        Ok(request)
    }

    pub(crate) fn keep_alive(&self) -> Option<Duration> {
        self.keep_alive
    }
}

fn normalize_ws_scheme(url: &mut url::Url) -> Result<(), Error> {
    let scheme = match url.scheme() {
        "ws" | "wss" => return Ok(()),
        "http" => "ws",
        "https" => "wss",
        other => return Err(Error::UnsupportedScheme(other.to_string())),
    };

    url.set_scheme(scheme)
        .map_err(|_| Error::UnsupportedScheme(url.scheme().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_schemes_normalize_to_websocket() {
        let client = ConsoleClient::builder()
            .endpoint("http://localhost:5001/events")
            .build()
            .unwrap();
        assert_eq!(client.endpoint().scheme(), "ws");

        let client = ConsoleClient::builder()
            .endpoint("https://agent.example.com/events")
            .build()
            .unwrap();
        assert_eq!(client.endpoint().scheme(), "wss");
    }

    #[test]
    fn websocket_schemes_pass_through() {
        let client = ConsoleClient::builder()
            .endpoint("ws://localhost:5001")
            .build()
            .unwrap();
        assert_eq!(client.endpoint().as_str(), "ws://localhost:5001/");
    }

    #[test]
    fn endpoint_is_required() {
        assert!(matches!(
            ConsoleClientBuilder::default().build(),
            Err(Error::MissingEndpoint)
        ));
    }

    #[test]
    fn non_web_schemes_are_rejected() {
        let result = ConsoleClient::builder().endpoint("ftp://host").build();
        assert!(matches!(result, Err(Error::UnsupportedScheme(s)) if s == "ftp"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        assert!(matches!(
            ConsoleClient::builder().endpoint("not a url").build(),
            Err(Error::InvalidEndpoint(_))
        ));
    }
}
