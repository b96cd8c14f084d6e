/// Parsed lyric timeline containing metadata and time-ordered captions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricTimeline {
    pub metadata: TimelineMetadata,
    pub captions: Vec<CaptionEntry>,
}

/// Song attribution from LRC ID tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub author: Option<String>,
    pub offset: Option<i64>, // milliseconds, can be negative
}

/// A single caption with its playback timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    /// Seconds from track start, rounded to millisecond precision
    pub timestamp: f64,
    /// Caption text, never empty
    pub text: String,
}

impl LyricTimeline {
    /// Parse raw LRC text into a timeline.
    ///
    /// Parsing is total: malformed lines are skipped rather than reported,
    /// and any string input yields a (possibly empty) timeline. Captions are
    /// sorted ascending by timestamp; equal timestamps keep input order.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut metadata = TimelineMetadata::default();
        let mut captions = Vec::new();

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            parse_line(line, &mut metadata, &mut captions);
        }

        // Stable sort: equal timestamps retain input order
        captions.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        Self { metadata, captions }
    }

    /// Find the caption active at the given playback position.
    ///
    /// Returns the last caption whose timestamp is at or before the position,
    /// or `None` before the first caption starts.
    #[must_use]
    pub fn caption_at(&self, position_secs: f64) -> Option<&CaptionEntry> {
        self.captions
            .iter()
            .rev()
            .find(|caption| caption.timestamp <= position_secs)
    }

    /// Find the index of the caption active at the given playback position.
    #[must_use]
    pub fn caption_index_at(&self, position_secs: f64) -> Option<usize> {
        self.captions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, caption)| caption.timestamp <= position_secs)
            .map(|(i, _)| i)
    }

    /// Check whether the timeline carries any captions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

/// Dispatch one non-empty line to the metadata or caption branch.
///
/// The first bracketed tag decides the branch: a tag name that parses as an
/// integer marks a caption line, anything else a metadata line. Lines without
/// a usable `[name:value]` tag carry nothing and are dropped.
fn parse_line(line: &str, metadata: &mut TimelineMetadata, captions: &mut Vec<CaptionEntry>) {
    let Some((open, close)) = first_bracket_span(line) else {
        return;
    };
    let body = &line[open + 1..close];
    let Some((head, rest)) = body.split_once(':') else {
        return;
    };

    if head.parse::<i64>().is_ok() {
        parse_caption_line(line, rest, captions);
    } else {
        store_metadata(head, rest, metadata);
    }
}

/// Locate the first `[` and first `]` of a line, in that order.
fn first_bracket_span(line: &str) -> Option<(usize, usize)> {
    let open = line.find('[')?;
    let close = line.find(']')?;
    (open < close).then_some((open, close))
}

fn store_metadata(name: &str, value: &str, metadata: &mut TimelineMetadata) {
    let value = value.trim();
    match name.to_lowercase().as_str() {
        "ti" => metadata.title = Some(value.to_string()),
        "ar" => metadata.artist = Some(value.to_string()),
        "al" => metadata.album = Some(value.to_string()),
        "by" => metadata.author = Some(value.to_string()),
        "offset" => {
            if let Ok(offset) = value.parse::<i64>() {
                metadata.offset = Some(offset);
            }
        }
        _ => {} // Ignore unknown tags
    }
}

/// Emit captions for a line carrying one or more leading timestamp tags.
///
/// The seconds component for every tag on the line is the one parsed from the
/// line's first colon-split; each tag contributes only its own minutes, so
/// repeated-caption lines share a single seconds value. Kept deliberately,
/// not corrected (see DESIGN.md).
fn parse_caption_line(line: &str, first_rest: &str, captions: &mut Vec<CaptionEntry>) {
    let seconds_segment = first_rest.split_once(':').map_or(first_rest, |(s, _)| s);
    let Ok(line_seconds) = seconds_segment.parse::<f64>() else {
        return;
    };
    if !line_seconds.is_finite() {
        return;
    }

    let mut tag_minutes = Vec::new();
    let mut consumed = 0;
    while let Some((len, minutes)) = leading_timestamp_tag(&line[consumed..]) {
        tag_minutes.push(minutes);
        consumed += len;
    }
    if tag_minutes.is_empty() {
        return;
    }

    // Caption text is whatever follows the run of leading tags
    let text = line[consumed..].trim();
    if text.is_empty() {
        return;
    }

    for minutes in tag_minutes {
        let timestamp = round_millis(f64::from(minutes) * 60.0 + line_seconds);
        if timestamp < 0.0 {
            continue;
        }
        captions.push(CaptionEntry {
            timestamp,
            text: text.to_string(),
        });
    }
}

/// Match one leading `[digits:rest]` timestamp tag.
///
/// Returns the number of bytes consumed and the minutes component, or `None`
/// if the input does not start with a timestamp tag.
fn leading_timestamp_tag(s: &str) -> Option<(usize, u32)> {
    let rest = s.strip_prefix('[')?;
    let close = rest.find(']')?;
    let body = &rest[..close];
    let colon = body.find(':')?;
    let digits = &body[..colon];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if colon + 1 == body.len() {
        return None; // a timestamp tag needs at least one char after the colon
    }
    let minutes = digits.parse::<u32>().ok()?;
    Some((close + 2, minutes))
}

fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        let result = LyricTimeline::parse("[00:12.34]Hello world");
        assert_eq!(result.captions.len(), 1);
        assert_eq!(result.captions[0].timestamp, 12.34);
        assert_eq!(result.captions[0].text, "Hello world");
    }

    #[test]
    fn test_parse_metadata_tags() {
        let input = "[ti:Song Title]\n[ar:Artist Name]\n[al:Album Name]\n[by:Author]\n[offset:-500]";
        let result = LyricTimeline::parse(input);
        assert_eq!(result.metadata.title, Some("Song Title".to_string()));
        assert_eq!(result.metadata.artist, Some("Artist Name".to_string()));
        assert_eq!(result.metadata.album, Some("Album Name".to_string()));
        assert_eq!(result.metadata.author, Some("Author".to_string()));
        assert_eq!(result.metadata.offset, Some(-500));
        assert!(result.captions.is_empty());
    }

    #[test]
    fn test_parse_metadata_case_insensitive() {
        let result = LyricTimeline::parse("[TI:Loud Title]\n[Ar:Mixed Artist]");
        assert_eq!(result.metadata.title, Some("Loud Title".to_string()));
        assert_eq!(result.metadata.artist, Some("Mixed Artist".to_string()));
    }

    #[test]
    fn test_parse_unknown_metadata_ignored() {
        let result = LyricTimeline::parse("[re:lrc maker]\n[ve:1.0]");
        assert_eq!(result.metadata, TimelineMetadata::default());
        assert!(result.captions.is_empty());
    }

    #[test]
    fn test_parse_unparseable_offset_ignored() {
        let result = LyricTimeline::parse("[offset:fast]");
        assert_eq!(result.metadata.offset, None);
    }

    #[test]
    fn test_parse_sorts_reversed_input() {
        let result = LyricTimeline::parse("[ar:Artist]\n[00:01.500]Hello\n[00:00.000]World");
        assert_eq!(result.metadata.artist, Some("Artist".to_string()));
        assert_eq!(result.captions.len(), 2);
        assert_eq!(result.captions[0].timestamp, 0.0);
        assert_eq!(result.captions[0].text, "World");
        assert_eq!(result.captions[1].timestamp, 1.5);
        assert_eq!(result.captions[1].text, "Hello");
    }

    #[test]
    fn test_parse_sorted_postcondition() {
        let input = "[02:10.0]d\n[00:30.0]b\n[01:00.0]c\n[00:05.0]a";
        let result = LyricTimeline::parse(input);
        let timestamps: Vec<f64> = result.captions.iter().map(|c| c.timestamp).collect();
        assert_eq!(timestamps, vec![5.0, 30.0, 60.0, 130.0]);
    }

    #[test]
    fn test_parse_equal_timestamps_keep_input_order() {
        let result = LyricTimeline::parse("[00:05.0]first\n[00:05.0]second");
        assert_eq!(result.captions[0].text, "first");
        assert_eq!(result.captions[1].text, "second");
    }

    #[test]
    fn test_parse_multi_tag_line_shares_first_seconds() {
        // Both tags reuse the first tag's seconds component; the second tag
        // contributes only its minutes.
        let result = LyricTimeline::parse("[00:05.00][01:15.00]Chorus");
        assert_eq!(result.captions.len(), 2);
        assert_eq!(result.captions[0].timestamp, 5.0);
        assert_eq!(result.captions[1].timestamp, 65.0);
        assert_eq!(result.captions[0].text, "Chorus");
        assert_eq!(result.captions[1].text, "Chorus");
    }

    #[test]
    fn test_parse_multi_tag_line_identical_minutes() {
        let result = LyricTimeline::parse("[01:23.456][01:45.000]some caption");
        assert_eq!(result.captions.len(), 2);
        assert_eq!(result.captions[0].timestamp, 83.456);
        assert_eq!(result.captions[1].timestamp, 83.456);
    }

    #[test]
    fn test_parse_empty_caption_text_dropped() {
        let result = LyricTimeline::parse("[00:05.00]   \n[00:06.00][00:07.00]");
        assert!(result.captions.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let result = LyricTimeline::parse("");
        assert_eq!(result, LyricTimeline::default());
    }

    #[test]
    fn test_parse_blank_lines_skipped() {
        let result = LyricTimeline::parse("\n   \n[00:05.00]First\n\n[00:10.00]Second\n");
        assert_eq!(result.captions.len(), 2);
    }

    #[test]
    fn test_parse_malformed_lines_skipped() {
        let input = "no brackets here\n]00:01[backwards\n[no colon]\n[12:xx]bad seconds\n[00:02.0]kept";
        let result = LyricTimeline::parse(input);
        assert_eq!(result.captions.len(), 1);
        assert_eq!(result.captions[0].text, "kept");
    }

    #[test]
    fn test_parse_rounds_to_milliseconds() {
        let result = LyricTimeline::parse("[00:01.23456]precise");
        assert_eq!(result.captions[0].timestamp, 1.235);
    }

    #[test]
    fn test_parse_cjk_caption() {
        let result = LyricTimeline::parse("[00:05.00]你好世界");
        assert_eq!(result.captions[0].text, "你好世界");
    }

    #[test]
    fn test_parse_metadata_value_keeps_later_colons() {
        let result = LyricTimeline::parse("[ti:Part 1: The Beginning]");
        assert_eq!(
            result.metadata.title,
            Some("Part 1: The Beginning".to_string())
        );
    }

    #[test]
    fn test_parse_first_tag_decides_metadata_branch() {
        // Only the first bracketed tag is consulted; the rest of the line
        // carries nothing once the line is classified as metadata.
        let result = LyricTimeline::parse("[ti:Song][00:05.00]not a caption");
        assert_eq!(result.metadata.title, Some("Song".to_string()));
        assert!(result.captions.is_empty());
    }

    #[test]
    fn test_caption_at() {
        let timeline = LyricTimeline::parse("[00:05.0]First\n[00:10.0]Second\n[00:15.0]Third");
        assert!(timeline.caption_at(0.0).is_none());
        assert_eq!(timeline.caption_at(5.0).map(|c| c.text.as_str()), Some("First"));
        assert_eq!(timeline.caption_at(12.0).map(|c| c.text.as_str()), Some("Second"));
        assert_eq!(timeline.caption_at(60.0).map(|c| c.text.as_str()), Some("Third"));
    }

    #[test]
    fn test_caption_index_at() {
        let timeline = LyricTimeline::parse("[00:05.0]First\n[00:10.0]Second");
        assert_eq!(timeline.caption_index_at(2.0), None);
        assert_eq!(timeline.caption_index_at(7.0), Some(0));
        assert_eq!(timeline.caption_index_at(11.0), Some(1));
    }

    #[test]
    fn test_is_empty() {
        assert!(LyricTimeline::parse("[ti:Only Metadata]").is_empty());
        assert!(!LyricTimeline::parse("[00:01.0]text").is_empty());
    }
}
