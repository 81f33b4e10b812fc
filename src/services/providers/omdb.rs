//! OMDb poster provider
//!
//! Looks a title up by name on the OMDb API and returns its `Poster` URL. The
//! literal value "N/A" means OMDb has the title but no poster.

use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::instrument;

use crate::{
    error::AppResult,
    models::OmdbResponse,
    services::providers::{PosterLookupError, PosterProvider},
};

const NO_POSTER: &str = "N/A";

#[derive(Clone)]
pub struct OmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbPosterProvider {
    /// Every request made by this provider is bounded by `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    fn poster_from_response(response: OmdbResponse) -> Result<String, PosterLookupError> {
        match response.poster {
            Some(poster) if !poster.trim().is_empty() && poster != NO_POSTER => Ok(poster),
            _ => Err(PosterLookupError::NotAvailable),
        }
    }
}

fn classify_transport_error(error: reqwest::Error) -> PosterLookupError {
    if error.is_timeout() {
        PosterLookupError::Timeout
    } else if error.is_decode() {
        PosterLookupError::MalformedResponse(error.to_string())
    } else {
        PosterLookupError::Network(error.to_string())
    }
}

#[async_trait::async_trait]
impl PosterProvider for OmdbPosterProvider {
    #[instrument(skip(self), fields(provider = "omdb"))]
    async fn lookup_poster(&self, title: &str) -> Result<String, PosterLookupError> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
            .map_err(classify_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::debug!(status = %status, "OMDb returned an error status");
            return Err(PosterLookupError::Status(status.as_u16()));
        }

        let body: OmdbResponse = response.json().await.map_err(classify_transport_error)?;

        if let Some(error) = body.error.as_deref() {
            tracing::debug!(error = %error, "OMDb reported no match");
        }

        let poster = Self::poster_from_response(body)?;

        tracing::debug!("Poster found");

        Ok(poster)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn response(poster: Option<&str>) -> OmdbResponse {
        OmdbResponse {
            poster: poster.map(str::to_string),
            ..Default::default()
        }
    }

    /// Serves a single canned HTTP response per connection
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let reply = format!(
                    "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
            }
        });
        format!("http://{}/", addr)
    }

    fn provider(url: String, timeout: Duration) -> OmdbPosterProvider {
        OmdbPosterProvider::new("test_key".to_string(), url, timeout).unwrap()
    }

    #[test]
    fn test_poster_from_response_found() {
        let result = OmdbPosterProvider::poster_from_response(response(Some("https://m.media-amazon.com/a.jpg")));
        assert_eq!(result, Ok("https://m.media-amazon.com/a.jpg".to_string()));
    }

    #[test]
    fn test_poster_from_response_not_available() {
        assert_eq!(
            OmdbPosterProvider::poster_from_response(response(Some("N/A"))),
            Err(PosterLookupError::NotAvailable)
        );
        assert_eq!(
            OmdbPosterProvider::poster_from_response(response(None)),
            Err(PosterLookupError::NotAvailable)
        );
        assert_eq!(
            OmdbPosterProvider::poster_from_response(response(Some(""))),
            Err(PosterLookupError::NotAvailable)
        );
    }

    #[tokio::test]
    async fn test_lookup_poster_success() {
        let url = serve(
            "HTTP/1.1 200 OK",
            r#"{"Title":"Avatar","Poster":"https://posters.example/avatar.jpg","Response":"True"}"#,
        )
        .await;
        let result = provider(url, Duration::from_secs(5)).lookup_poster("Avatar").await;
        assert_eq!(result, Ok("https://posters.example/avatar.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_lookup_poster_not_found() {
        let url = serve(
            "HTTP/1.1 200 OK",
            r#"{"Response":"False","Error":"Movie not found!"}"#,
        )
        .await;
        let result = provider(url, Duration::from_secs(5)).lookup_poster("Nope").await;
        assert_eq!(result, Err(PosterLookupError::NotAvailable));
    }

    #[tokio::test]
    async fn test_lookup_poster_error_status() {
        let url = serve("HTTP/1.1 401 Unauthorized", r#"{"Response":"False"}"#).await;
        let result = provider(url, Duration::from_secs(5)).lookup_poster("Avatar").await;
        assert_eq!(result, Err(PosterLookupError::Status(401)));
    }

    #[tokio::test]
    async fn test_lookup_poster_malformed_body() {
        let url = serve("HTTP/1.1 200 OK", "<html>not json</html>").await;
        let result = provider(url, Duration::from_secs(5)).lookup_poster("Avatar").await;
        assert!(matches!(result, Err(PosterLookupError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_lookup_poster_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without ever replying
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let result = provider(format!("http://{}/", addr), Duration::from_millis(200))
            .lookup_poster("Avatar")
            .await;
        assert_eq!(result, Err(PosterLookupError::Timeout));
    }

    #[tokio::test]
    async fn test_lookup_poster_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = provider(format!("http://{}/", addr), Duration::from_secs(5))
            .lookup_poster("Avatar")
            .await;
        assert!(matches!(result, Err(PosterLookupError::Network(_))));
    }
}
