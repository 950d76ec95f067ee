//! Audio Player state machine.
//!
//! The player owns one media element and mirrors its native events into
//! [`PlaybackState`]. It keeps no timer of its own: position and duration are
//! only ever what the element last reported.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

use super::form::GeneratedAudio;

pub const COPY_CONFIRMATION: &str = "Link copied to clipboard!";
const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";

/// The host's playback element (an `<audio>` tag, a native sink, a test fake).
pub trait MediaElement {
    fn set_source(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn set_current_time(&mut self, seconds: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    Play,
    Pause,
    TimeUpdate { current_time: f64 },
    LoadedMetadata { duration: f64 },
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Idle,
    Loaded,
    Playing,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub current_time: f64,
    pub duration: f64,
    pub is_playing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    Clipboard,
}

impl From<&str> for SharePlatform {
    fn from(s: &str) -> Self {
        match s {
            "facebook" => SharePlatform::Facebook,
            "twitter" => SharePlatform::Twitter,
            _ => SharePlatform::Clipboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    OpenWindow { url: String },
    CopyToClipboard { text: String, confirmation: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
}

pub struct AudioPlayer<M: MediaElement> {
    media: M,
    source: Option<GeneratedAudio>,
    title: String,
    state: PlayerState,
    playback: PlaybackState,
}

impl<M: MediaElement> AudioPlayer<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            source: None,
            title: String::new(),
            state: PlayerState::Idle,
            playback: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn source(&self) -> Option<&GeneratedAudio> {
        self.source.as_ref()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Active mode: a non-empty audio URL is present.
    pub fn is_active(&self) -> bool {
        self.source.as_ref().is_some_and(|a| !a.url.is_empty())
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Your Podcast"
        } else {
            &self.title
        }
    }

    /// Swaps in a new audio URL. Any change pauses the element and rewinds it,
    /// whatever it was doing. Loading the URL already in place is a no-op.
    pub fn load(&mut self, audio: GeneratedAudio) -> bool {
        if self.source.as_ref() == Some(&audio) {
            return false;
        }

        self.media.pause();
        self.playback = PlaybackState::default();

        if audio.url.is_empty() {
            self.source = None;
            self.state = PlayerState::Idle;
            return true;
        }

        self.media.set_source(&audio.url);
        self.media.set_current_time(0.0);
        debug!(url = %audio.url, "audio source changed");
        self.source = Some(audio);
        self.state = PlayerState::Loaded;
        true
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        if self.state == PlayerState::Idle {
            debug!(?event, "media event ignored while idle");
            return;
        }

        match event {
            MediaEvent::Play => {
                self.playback.is_playing = true;
                self.state = PlayerState::Playing;
            }
            MediaEvent::Pause => {
                self.playback.is_playing = false;
                if self.state == PlayerState::Playing {
                    self.state = PlayerState::Paused;
                }
            }
            MediaEvent::TimeUpdate { current_time } => {
                self.playback.current_time = finite_or_zero(current_time);
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.playback.duration = finite_or_zero(duration);
            }
            MediaEvent::Ended => {
                self.playback.is_playing = false;
                self.state = PlayerState::Ended;
            }
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.media.is_paused() {
            self.media.play();
        } else {
            self.media.pause();
        }
    }

    /// Maps a click `click_x` pixels into a bar `width` pixels wide onto
    /// `[0, duration]`. Returns false when nothing was changed.
    pub fn seek(&mut self, click_x: f64, width: f64) -> bool {
        let duration = self.playback.duration;
        if !self.is_active() || duration <= 0.0 || !(width > 0.0) {
            return false;
        }

        let target = (click_x / width * duration).clamp(0.0, duration);
        self.media.set_current_time(target);
        true
    }

    pub fn progress_percent(&self) -> f64 {
        if self.playback.duration > 0.0 {
            self.playback.current_time / self.playback.duration * 100.0
        } else {
            0.0
        }
    }

    pub fn download(&self) -> Option<DownloadLink> {
        let audio = self.source.as_ref()?;
        Some(download_link(&audio.url, &self.title))
    }

    pub fn share(&self, platform: SharePlatform, page_url: &str) -> ShareAction {
        share_action(platform, &self.title, page_url)
    }
}

pub fn download_link(url: &str, title: &str) -> DownloadLink {
    let stem = if title.is_empty() { "podcast" } else { title };
    DownloadLink {
        href: url.to_string(),
        filename: format!("{}.mp3", stem),
    }
}

pub fn share_text(title: &str) -> String {
    format!("Check out my AI-generated podcast: {}", title)
}

pub fn share_action(platform: SharePlatform, title: &str, page_url: &str) -> ShareAction {
    let text = share_text(title);
    match platform {
        SharePlatform::Facebook => {
            ShareAction::OpenWindow {
                url: format!(
                    "{}?u={}&quote={}",
                    FACEBOOK_SHARER,
                    encode_component(page_url),
                    encode_component(&text)
                ),
            }
        }
        SharePlatform::Twitter => {
            ShareAction::OpenWindow {
                url: format!(
                    "{}?text={}&url={}",
                    TWITTER_INTENT,
                    encode_component(&text),
                    encode_component(page_url)
                ),
            }
        }
        SharePlatform::Clipboard => ShareAction::CopyToClipboard {
            text: format!("{} - {}", text, page_url),
            confirmation: COPY_CONFIRMATION,
        },
    }
}

/// Percent-encodes a query component with spaces as `%20`. The form encoder
/// writes a literal `+` as `%2B`, so every `+` it emits stands for a space.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `m:ss`; anything non-finite shows as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct FakeMedia {
        pub src: Option<String>,
        pub paused: bool,
        pub current_time: f64,
        pub pause_calls: usize,
        pub play_calls: usize,
    }

    impl MediaElement for FakeMedia {
        fn set_source(&mut self, url: &str) {
            self.src = Some(url.to_string());
        }
        fn play(&mut self) {
            self.play_calls += 1;
            self.paused = false;
        }
        fn pause(&mut self) {
            self.pause_calls += 1;
            self.paused = true;
        }
        fn is_paused(&self) -> bool {
            self.paused
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.current_time = seconds;
        }
    }

    fn audio(url: &str) -> GeneratedAudio {
        GeneratedAudio { url: url.to_string() }
    }

    fn loaded(url: &str, duration: f64) -> AudioPlayer<FakeMedia> {
        let mut p = AudioPlayer::new(FakeMedia { paused: true, ..FakeMedia::default() });
        p.load(audio(url));
        p.handle_event(MediaEvent::LoadedMetadata { duration });
        p
    }

    #[test]
    fn starts_idle_and_ignores_events() {
        let mut p = AudioPlayer::new(FakeMedia::default());
        assert_eq!(p.state(), PlayerState::Idle);
        assert!(!p.is_active());
        p.handle_event(MediaEvent::Play);
        assert_eq!(p.state(), PlayerState::Idle);
        assert!(!p.is_playing());
        assert!(p.download().is_none());
    }

    #[test]
    fn load_moves_idle_to_loaded() {
        let mut p = AudioPlayer::new(FakeMedia::default());
        assert!(p.load(audio("https://cdn/a.mp3")));
        assert_eq!(p.state(), PlayerState::Loaded);
        assert!(p.is_active());
        assert_eq!(p.media().src.as_deref(), Some("https://cdn/a.mp3"));
        assert_eq!(p.playback(), PlaybackState::default());
    }

    #[test]
    fn event_driven_transitions() {
        let mut p = loaded("https://cdn/a.mp3", 60.0);
        p.handle_event(MediaEvent::Play);
        assert_eq!(p.state(), PlayerState::Playing);
        assert!(p.is_playing());

        p.handle_event(MediaEvent::TimeUpdate { current_time: 12.5 });
        p.handle_event(MediaEvent::Pause);
        assert_eq!(p.state(), PlayerState::Paused);
        assert!(!p.is_playing());

        p.handle_event(MediaEvent::Play);
        p.handle_event(MediaEvent::TimeUpdate { current_time: 60.0 });
        p.handle_event(MediaEvent::Pause);
        p.handle_event(MediaEvent::Ended);
        assert_eq!(p.state(), PlayerState::Ended);
        assert!(!p.is_playing());
        // Ended keeps its position.
        assert_eq!(p.playback().current_time, 60.0);
    }

    #[test]
    fn new_url_resets_even_while_playing() {
        let mut p = loaded("https://cdn/a.mp3", 60.0);
        p.toggle_play_pause();
        p.handle_event(MediaEvent::Play);
        p.handle_event(MediaEvent::TimeUpdate { current_time: 31.0 });
        p.media.current_time = 31.0;
        assert_eq!(p.state(), PlayerState::Playing);

        assert!(p.load(audio("https://cdn/b.mp3")));
        assert_eq!(p.state(), PlayerState::Loaded);
        assert_eq!(p.playback(), PlaybackState::default());
        assert!(p.media().paused);
        assert_eq!(p.media().current_time, 0.0);
        assert_eq!(p.media().src.as_deref(), Some("https://cdn/b.mp3"));
    }

    #[test]
    fn reloading_same_url_keeps_position() {
        let mut p = loaded("https://cdn/a.mp3", 60.0);
        p.handle_event(MediaEvent::TimeUpdate { current_time: 10.0 });
        assert!(!p.load(audio("https://cdn/a.mp3")));
        assert_eq!(p.playback().current_time, 10.0);
    }

    #[test]
    fn empty_url_returns_to_idle() {
        let mut p = loaded("https://cdn/a.mp3", 60.0);
        assert!(p.load(audio("")));
        assert_eq!(p.state(), PlayerState::Idle);
        assert!(!p.is_active());
    }

    #[test]
    fn toggle_drives_the_element() {
        let mut p = loaded("https://cdn/a.mp3", 60.0);
        p.toggle_play_pause();
        assert_eq!(p.media().play_calls, 1);
        // State follows events, not the call.
        assert_eq!(p.state(), PlayerState::Loaded);
        p.toggle_play_pause();
        assert!(p.media().paused);
    }

    #[test]
    fn seek_maps_click_to_duration() {
        let mut p = loaded("https://cdn/a.mp3", 120.0);
        assert!(p.seek(0.0, 300.0));
        assert_eq!(p.media().current_time, 0.0);
        assert!(p.seek(300.0, 300.0));
        assert_eq!(p.media().current_time, 120.0);
        assert!(p.seek(75.0, 300.0));
        assert_eq!(p.media().current_time, 30.0);
    }

    #[test]
    fn seek_before_metadata_is_a_no_op() {
        let mut p = AudioPlayer::new(FakeMedia::default());
        p.load(audio("https://cdn/a.mp3"));
        p.media.current_time = 4.0;
        assert!(!p.seek(150.0, 300.0));
        assert_eq!(p.media().current_time, 4.0);
    }

    #[test]
    fn non_finite_metadata_reads_as_zero() {
        let mut p = loaded("https://cdn/a.mp3", f64::NAN);
        assert_eq!(p.playback().duration, 0.0);
        assert!(!p.seek(10.0, 100.0));
        p.handle_event(MediaEvent::LoadedMetadata { duration: f64::INFINITY });
        assert_eq!(p.progress_percent(), 0.0);
    }

    #[test]
    fn download_uses_title_or_fallback() {
        let mut p = loaded("https://cdn/a.wav", 10.0);
        assert_eq!(
            p.download(),
            Some(DownloadLink {
                href: "https://cdn/a.wav".into(),
                filename: "podcast.mp3".into()
            })
        );
        p.set_title("City Life");
        assert_eq!(p.download().unwrap().filename, "City Life.mp3");
    }

    #[test]
    fn share_components_use_percent_twenty_for_spaces() {
        assert_eq!(encode_component("City Life"), "City%20Life");
        assert_eq!(encode_component("a+b c"), "a%2Bb%20c");
        match share_action(SharePlatform::Twitter, "A B", "https://x/") {
            ShareAction::OpenWindow { url } => assert!(!url.contains('+')),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn share_targets() {
        let page = "https://studio.example/?a=1";
        match share_action(SharePlatform::from("facebook"), "City Life", page) {
            ShareAction::OpenWindow { url } => {
                assert!(url.starts_with("https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fstudio.example%2F%3Fa%3D1&quote="));
                assert!(url.ends_with("&quote=Check%20out%20my%20AI-generated%20podcast%3A%20City%20Life"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match share_action(SharePlatform::from("twitter"), "City Life", page) {
            ShareAction::OpenWindow { url } => {
                assert!(url.starts_with("https://twitter.com/intent/tweet?text=Check%20out"));
                assert!(url.ends_with("&url=https%3A%2F%2Fstudio.example%2F%3Fa%3D1"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            share_action(SharePlatform::from("line"), "City Life", page),
            ShareAction::CopyToClipboard {
                text: "Check out my AI-generated podcast: City Life - https://studio.example/?a=1".into(),
                confirmation: COPY_CONFIRMATION,
            }
        );
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn display_title_falls_back() {
        let mut p = AudioPlayer::new(FakeMedia::default());
        assert_eq!(p.display_title(), "Your Podcast");
        p.set_title("Ep. 1");
        assert_eq!(p.display_title(), "Ep. 1");
    }
}
