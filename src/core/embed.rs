//! Descriptors for the third-party embeds on the page
//!
//! Each embed is loaded through a [`ResourceLoader`](super::ResourceLoader)
//! and rendered in one of three shapes given by [`EmbedStatus`].

use serde::{Deserialize, Serialize};

use super::loader::{LoadState, ScriptSpec};

/// Message browsers report for errors thrown by cross-origin scripts
pub const CROSS_ORIGIN_SCRIPT_ERROR: &str = "Script error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedKind {
    /// Booking calendar
    Scheduling,
    /// Chat/voice assistant bubble
    Chat,
    /// 3D scene behind the page
    Backdrop,
}

impl EmbedKind {
    /// Stable id of the injected script element
    pub fn script_id(&self) -> &'static str {
        match self {
            EmbedKind::Scheduling => "calendly-widget-script",
            EmbedKind::Chat => "voiceglow-script",
            EmbedKind::Backdrop => "spline-viewer-script",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedKind::Scheduling => "scheduling",
            EmbedKind::Chat => "chat",
            EmbedKind::Backdrop => "backdrop",
        }
    }

    /// Substrings identifying this embed in global error messages
    pub fn error_markers(&self) -> &'static [&'static str] {
        match self {
            EmbedKind::Scheduling => &["Calendly", "calendly"],
            EmbedKind::Chat => &["VoiceGlow", "VG_CONFIG", "vg_bundle"],
            EmbedKind::Backdrop => &["Spline", "WebGL", "spline-viewer"],
        }
    }
}

/// What an embed region should display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedStatus {
    /// Still loading, show a placeholder
    Pending,
    /// Third-party content is live
    Ready,
    /// Show the static replacement
    Fallback,
}

impl EmbedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedStatus::Pending => "pending",
            EmbedStatus::Ready => "ready",
            EmbedStatus::Fallback => "fallback",
        }
    }
}

impl From<&LoadState> for EmbedStatus {
    fn from(state: &LoadState) -> Self {
        match state {
            LoadState::Unloaded | LoadState::Loading => EmbedStatus::Pending,
            LoadState::Loaded => EmbedStatus::Ready,
            LoadState::Failed(_) => EmbedStatus::Fallback,
        }
    }
}

/// How long the booking calendar may stay blank before the fallback shows
pub const BOOKING_LOAD_TIMEOUT_MS: u32 = 15_000;

/// Status of the booking region
///
/// The iframe is the calendar itself; the provider script only adds helpers.
/// Once the iframe has loaded the region stays live whatever the script does.
/// Until then a failed script or an elapsed load timeout shows the fallback.
pub fn booking_status(script: &LoadState, frame_loaded: bool, timed_out: bool) -> EmbedStatus {
    if frame_loaded {
        EmbedStatus::Ready
    } else if script.is_failed() || timed_out {
        EmbedStatus::Fallback
    } else {
        EmbedStatus::Pending
    }
}

/// Decides whether a window `error` event was caused by a given embed
#[derive(Debug, Clone)]
pub struct ErrorFilter {
    kind: EmbedKind,
    match_cross_origin: bool,
}

impl ErrorFilter {
    pub fn new(kind: EmbedKind) -> Self {
        Self {
            kind,
            match_cross_origin: true,
        }
    }

    /// Do not claim opaque cross-origin errors. Use when several embeds
    /// share the page and only one of them should react.
    pub fn ignore_cross_origin(mut self) -> Self {
        self.match_cross_origin = false;
        self
    }

    pub fn kind(&self) -> EmbedKind {
        self.kind
    }

    pub fn matches(&self, message: &str, target_id: Option<&str>) -> bool {
        if target_id == Some(self.kind.script_id()) {
            return true;
        }
        if self.match_cross_origin && message == CROSS_ORIGIN_SCRIPT_ERROR {
            return true;
        }
        self.kind
            .error_markers()
            .iter()
            .any(|marker| message.contains(marker))
    }
}

/// Booking calendar settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingEmbed {
    /// Provider base URL, e.g. `https://calendly.com`
    pub provider_url: String,
    /// Public calendar slug, e.g. `acme/30min`
    pub slug: String,
    pub script_src: String,
    pub height_px: u32,
    pub title: String,
    /// Domain reported to the provider, set by the server from its config
    pub embed_domain: Option<String>,
}

impl Default for SchedulingEmbed {
    fn default() -> Self {
        Self {
            provider_url: "https://calendly.com".to_string(),
            slug: "selenica3/30min".to_string(),
            script_src: "https://assets.calendly.com/assets/external/widget.js".to_string(),
            height_px: 700,
            title: "Schedule a meeting with OritechAI".to_string(),
            embed_domain: None,
        }
    }
}

impl SchedulingEmbed {
    /// Link that opens the calendar outside the page
    pub fn public_url(&self) -> String {
        format!(
            "{}/{}",
            self.provider_url.trim_end_matches('/'),
            self.slug.trim_matches('/')
        )
    }

    /// Inline iframe source for the given embedding domain
    ///
    /// The domain is percent-encoded, so it cannot add query parameters or a
    /// fragment of its own.
    pub fn embed_url(&self, embed_domain: &str) -> String {
        format!(
            "{}?embed_domain={}&embed_type=Inline",
            self.public_url(),
            urlencoding::encode(embed_domain)
        )
    }

    /// Iframe source for the configured domain, `localhost` when unset
    pub fn inline_url(&self) -> String {
        self.embed_url(self.embed_domain.as_deref().unwrap_or("localhost"))
    }

    pub fn script(&self) -> ScriptSpec {
        ScriptSpec::new(EmbedKind::Scheduling.script_id(), self.script_src.clone())
    }
}

/// Configuration object the chat bundle reads from `window.VG_CONFIG`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatWidgetConfig {
    #[serde(rename = "ID")]
    pub id: String,
    pub region: String,
    pub render: String,
    pub stylesheets: Vec<String>,
}

/// Chat widget settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatEmbed {
    /// Name of the window global the bundle reads
    pub global_name: String,
    pub script_src: String,
    pub config: ChatWidgetConfig,
}

impl Default for ChatEmbed {
    fn default() -> Self {
        Self {
            global_name: "VG_CONFIG".to_string(),
            script_src: "https://vg-bunny-cdn.b-cdn.net/vg_live_build/vg_bundle.js".to_string(),
            config: ChatWidgetConfig {
                id: "slnx0jaui0hlms5n".to_string(),
                region: "eu".to_string(),
                render: "bottom-right".to_string(),
                stylesheets: vec![
                    "https://vg-bunny-cdn.b-cdn.net/vg_live_build/styles.css".to_string(),
                ],
            },
        }
    }
}

impl ChatEmbed {
    pub fn script(&self) -> ScriptSpec {
        ScriptSpec::new(EmbedKind::Chat.script_id(), self.script_src.clone()).deferred()
    }

    /// Container element the bundle renders into
    pub fn container_id(&self) -> &'static str {
        "VG_OVERLAY_CONTAINER"
    }
}

/// Browser features the backdrop depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub webgl: bool,
    pub video: bool,
}

impl Capabilities {
    pub fn none() -> Self {
        Self {
            webgl: false,
            video: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropMode {
    /// Interactive 3D scene
    Scene,
    /// Looping muted video with poster
    Video,
    /// Static gradient, always available
    Gradient,
}

/// Background settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub video_src: String,
    /// Required still image, shown before playback and when video is unsupported
    pub poster: String,
    pub description: String,
    /// Optional 3D scene shown instead of the video when WebGL is available
    pub scene_url: Option<String>,
    pub scene_script_src: String,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            video_src: "/Robot Website.mp4".to_string(),
            poster: "/video-fallback.jpg".to_string(),
            description: "AI consulting and automation technology background".to_string(),
            scene_url: None,
            scene_script_src: "https://unpkg.com/@splinetool/viewer@1.9.82/build/spline-viewer.js"
                .to_string(),
        }
    }
}

impl BackdropConfig {
    /// Richest mode the browser supports
    pub fn mode(&self, caps: Capabilities) -> BackdropMode {
        if self.scene_url.is_some() && caps.webgl {
            BackdropMode::Scene
        } else if caps.video && !self.video_src.is_empty() {
            BackdropMode::Video
        } else {
            BackdropMode::Gradient
        }
    }

    pub fn scene_script(&self) -> ScriptSpec {
        ScriptSpec::new(EmbedKind::Backdrop.script_id(), self.scene_script_src.clone())
    }
}
