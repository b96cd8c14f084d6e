use crate::error::CoreError;
use crate::timeline::LyricTimeline;
use async_trait::async_trait;

/// Selector for a music lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicQuery {
    /// Look up a specific track by its identifier
    Id(String),
    /// Look up a track by name
    Name(String),
    /// Ask the service to pick a track
    Random,
}

impl std::fmt::Display for MusicQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Name(name) => write!(f, "name={name}"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// One track as returned by the music lookup service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Cover image URL
    pub cover_url: String,
    /// Audio stream URL
    pub stream_url: String,
    /// Raw LRC text for this track
    pub lyric_text: String,
}

impl MusicRecord {
    /// Parse the embedded LRC text into a caption timeline.
    #[must_use]
    pub fn timeline(&self) -> LyricTimeline {
        LyricTimeline::parse(&self.lyric_text)
    }
}

/// Trait for music lookup providers
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Fetch the music record matching a query
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or no track matches the query.
    async fn lookup(&self, query: &MusicQuery) -> Result<MusicRecord, CoreError>;
}
