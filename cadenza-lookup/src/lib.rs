use async_trait::async_trait;
use cadenza_core::{CoreError, LookupConfig, MusicProvider, MusicQuery, MusicRecord};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fallback request timeout when the config carries none (30 seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default number of retry attempts
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Message shown when the service gives no usable error body
const GENERIC_FAILURE_MESSAGE: &str = "Failed to reach the music service";

/// HTTP provider backed by the remote music lookup API
pub struct HttpMusicProvider {
    client: ClientWithMiddleware,
    base_url: String,
}

impl HttpMusicProvider {
    /// Create a provider from the lookup configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &LookupConfig) -> Result<Self, CoreError> {
        let timeout_secs = if config.timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            config.timeout_secs
        };

        // Base client with timeout
        let base_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("Cadenza/0.1 (https://github.com/cadenza-player/cadenza)")
            .build()?;

        // Wrap with retry middleware (exponential backoff)
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(DEFAULT_MAX_RETRIES);
        let client = ClientBuilder::new(base_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Build the lookup URL for a query
fn lookup_url(base_url: &str, query: &MusicQuery) -> String {
    match query {
        MusicQuery::Id(id) => {
            format!("{base_url}/getMusic?id={}", urlencoding::encode(id))
        }
        MusicQuery::Name(name) => {
            format!("{base_url}/getMusic?name={}", urlencoding::encode(name))
        }
        MusicQuery::Random => format!("{base_url}/getMusic?random=1"),
    }
}

/// Response from the lookup service.
/// Note: the API returns additional fields we don't use; serde ignores
/// unknown fields by default.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    author: String,
    lrc: String,
    pic: String,
    songid: SongId,
    title: String,
    url: String,
}

/// The service returns the track ID as either a number or a string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SongId {
    Number(i64),
    Text(String),
}

impl SongId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

impl From<LookupResponse> for MusicRecord {
    fn from(response: LookupResponse) -> Self {
        Self {
            id: response.songid.into_string(),
            title: response.title,
            author: response.author,
            cover_url: response.pic,
            stream_url: response.url,
            lyric_text: response.lrc,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
}

/// Extract a user-facing message from an error response body
fn failure_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.msg)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

#[async_trait]
impl MusicProvider for HttpMusicProvider {
    fn name(&self) -> &'static str {
        "music-api"
    }

    async fn lookup(&self, query: &MusicQuery) -> Result<MusicRecord, CoreError> {
        let url = lookup_url(&self.base_url, query);
        info!("Music lookup ({query}): {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!("Lookup response status: {status}");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CoreError::MusicNotFound {
                query: query.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = failure_message(&body);
            warn!("Lookup returned status {status}: {reason}");
            return Err(CoreError::LookupFailed {
                provider: self.name().to_string(),
                reason,
            });
        }

        let response: LookupResponse = response.json().await?;
        let record = MusicRecord::from(response);
        info!(
            "Lookup found track: {} - {} (id: {})",
            record.author, record.title, record.id
        );
        Ok(record)
    }
}
