//! Print configuration.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::term::FrameRenderer;
use crate::types::Rgba;

/// Longest image side after resizing, in cells.
pub const DEFAULT_MAX_LEN: u32 = 100;

/// Vertical squash applied before resizing (terminal cells are taller than wide).
pub const DEFAULT_ASPECT_RATIO: f32 = 0.3;

/// Pause between images in a slideshow.
pub const DEFAULT_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct PrintConfig {
    /// `None` keeps the decoded size (after the aspect ratio change).
    pub max_len: Option<u32>,
    pub aspect_ratio: f32,
    /// Smooth (Lanczos3) instead of nearest-neighbour resizing.
    pub antialias: bool,
    /// Opaque background to composite partially transparent pixels onto.
    pub background: Option<Rgba>,
    pub delay_ms: u64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            max_len: Some(DEFAULT_MAX_LEN),
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            antialias: false,
            background: None,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl PrintConfig {
    /// Create from environment variables.
    ///
    /// Unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let max_len = match get("ANSIPIX_MAX_LEN") {
            None => defaults.max_len,
            Some(s) => match parse_or_warn::<u32>("ANSIPIX_MAX_LEN", &s) {
                Some(0) => None,
                Some(n) => Some(n),
                None => defaults.max_len,
            },
        };

        let aspect_ratio = get("ANSIPIX_ASPECT")
            .and_then(|s| parse_or_warn::<f32>("ANSIPIX_ASPECT", &s))
            .filter(|r| {
                let ok = r.is_finite() && *r > 0.0;
                if !ok {
                    warn!(value = *r, "ANSIPIX_ASPECT must be positive, using default");
                }
                ok
            })
            .unwrap_or(defaults.aspect_ratio);

        let antialias = get("ANSIPIX_ANTIALIAS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.antialias);

        let background = get("ANSIPIX_BG").and_then(|s| {
            let c = parse_hex_color(&s);
            if c.is_none() {
                warn!(value = %s, "ANSIPIX_BG is not a #rrggbb color, ignoring");
            }
            c
        });

        let delay_ms = get("ANSIPIX_DELAY_MS")
            .and_then(|s| parse_or_warn::<u64>("ANSIPIX_DELAY_MS", &s))
            .unwrap_or(defaults.delay_ms);

        Self {
            max_len,
            aspect_ratio,
            antialias,
            background,
            delay_ms,
        }
    }

    /// Renderer configured for this print setup.
    pub fn renderer(&self) -> FrameRenderer {
        FrameRenderer::default().with_background(self.background)
    }
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        warn!(key, value, "unparsable setting, using default");
    }
    parsed
}

/// Parse `#rrggbb` (leading `#` optional) into an opaque color.
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgba::opaque(channel(0)?, channel(2)?, channel(4)?))
}
