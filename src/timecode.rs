/*!
 * Frame-accurate timecode handling for DCP subtitles.
 *
 * CineCanvas timecodes use the `HH:MM:SS:mmm` layout with a colon before the
 * millisecond field. Exported timestamps are snapped to the frame grid of the
 * selected rate so that cinema servers see cue times that land exactly on a
 * frame boundary; imported timestamps are taken as-is.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Regex for the CineCanvas timecode layout, accepting both the colon and the
/// period form before the millisecond field
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})[:.](\d{1,3})$").expect("Invalid timecode regex")
});

/// Frame rates selectable for DCP subtitle export
///
/// Rates are stored as exact rationals so NTSC-family rates do not
/// accumulate rounding drift over long reels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrameRate {
    /// 23.976 fps (common for cinema)
    Fps23_976,
    /// 24 fps (standard cinema)
    #[default]
    Fps24,
    /// 25 fps (PAL)
    Fps25,
    /// 29.97 fps (NTSC)
    Fps29_97,
    /// 30 fps
    Fps30,
    /// 48 fps (HFR cinema)
    Fps48,
    /// 50 fps (HFR PAL)
    Fps50,
    /// 59.94 fps (HFR NTSC)
    Fps59_94,
    /// 60 fps (HFR)
    Fps60,
}

impl FrameRate {
    /// Numerator and denominator of the exact rational frame rate
    pub fn as_rational(self) -> (u64, u64) {
        match self {
            Self::Fps23_976 => (24000, 1001),
            Self::Fps24 => (24, 1),
            Self::Fps25 => (25, 1),
            Self::Fps29_97 => (30000, 1001),
            Self::Fps30 => (30, 1),
            Self::Fps48 => (48, 1),
            Self::Fps50 => (50, 1),
            Self::Fps59_94 => (60000, 1001),
            Self::Fps60 => (60, 1),
        }
    }

    /// Frame rate as frames per second
    pub fn fps(self) -> f64 {
        let (num, den) = self.as_rational();
        num as f64 / den as f64
    }

    /// Map a detected video frame rate to the closest selectable rate
    ///
    /// Rates within 0.1 fps of a known value snap to it; anything else
    /// falls back to 24 fps.
    pub fn from_fps(rate: f64) -> Self {
        const CANDIDATES: [FrameRate; 9] = [
            FrameRate::Fps23_976,
            FrameRate::Fps24,
            FrameRate::Fps25,
            FrameRate::Fps29_97,
            FrameRate::Fps30,
            FrameRate::Fps48,
            FrameRate::Fps50,
            FrameRate::Fps59_94,
            FrameRate::Fps60,
        ];
        CANDIDATES
            .into_iter()
            .find(|candidate| (candidate.fps() - rate).abs() < 0.1)
            .unwrap_or_default()
    }

    /// Index of the frame whose span contains the rounded timestamp
    fn frame_at_time(self, ms: u64) -> u64 {
        let (num, den) = self.as_rational();
        (ms * num + 500 * den) / (1000 * den)
    }

    /// Start-of-frame timestamp in milliseconds for a frame index
    fn time_at_frame(self, frame: u64) -> u64 {
        let (num, den) = self.as_rational();
        (frame * 1000 * den + num / 2) / num
    }

    /// Snap a millisecond timestamp to the nearest frame boundary
    pub fn quantize(self, ms: u64) -> u64 {
        self.time_at_frame(self.frame_at_time(ms))
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fps23_976 => write!(f, "23.976"),
            Self::Fps29_97 => write!(f, "29.97"),
            Self::Fps59_94 => write!(f, "59.94"),
            other => write!(f, "{}", other.fps() as u64),
        }
    }
}

/// Format a millisecond timestamp as a CineCanvas `HH:MM:SS:mmm` timecode
///
/// When a frame rate is given the timestamp is quantized to its frame grid
/// first. There is no upper bound on the hour field.
pub fn to_timecode(ms: u64, rate: Option<FrameRate>) -> String {
    let ms = match rate {
        Some(rate) => rate.quantize(ms),
        None => ms,
    };

    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}:{:03}", hours, minutes, seconds, millis)
}

/// Parse a CineCanvas timecode back to milliseconds
///
/// Accepts `HH:MM:SS:mmm` and the `HH:MM:SS.mmm` variant some mastering
/// tools emit. Returns 0 when the string matches neither form; no frame
/// quantization is applied on import.
pub fn from_timecode(timecode: &str) -> u64 {
    let Some(caps) = TIMECODE_REGEX.captures(timecode.trim()) else {
        return 0;
    };

    let field = |index: usize| -> u64 { caps[index].parse().unwrap_or(0) };

    field(1) * 3_600_000 + field(2) * 60_000 + field(3) * 1_000 + field(4)
}
