pub mod config;
pub mod error;
pub mod paths;
pub mod playback;
pub mod provider;
pub mod throttle;
pub mod time;
pub mod timeline;

pub use config::{Config, LookupConfig};
pub use error::CoreError;
pub use paths::{config_dir, config_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use playback::PlaybackState;
pub use provider::{MusicProvider, MusicQuery, MusicRecord};
pub use throttle::Throttle;
pub use time::format_position;
pub use timeline::{CaptionEntry, LyricTimeline, TimelineMetadata};
