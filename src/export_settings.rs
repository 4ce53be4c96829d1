/*!
 * Export configuration for CineCanvas conversion.
 *
 * Settings are either derived from the conversion context (output filename,
 * detected video frame rate) or loaded from a JSON settings file; `save`
 * mirrors every field back to the same file. All values pass through the
 * `cinecanvas::rules` validators, which silently substitute defaults for
 * anything out of range.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cinecanvas::rules;
use crate::timecode::FrameRate;

/// User configuration for CineCanvas XML export
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportSettings {
    /// Frame rate used for timecode quantization
    #[serde(default)]
    pub frame_rate: FrameRate,

    /// Title of the movie/project, written into the MovieTitle element
    #[serde(default = "default_movie_title")]
    pub movie_title: String,

    /// DCP reel number (1-based)
    #[serde(default = "default_reel_number")]
    pub reel_number: i32,

    /// ISO 639 language code (e.g. "en", "fr", "deu")
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Font size in points, used when the document defines no styles
    #[serde(default = "default_font_size")]
    pub font_size_pt: i32,

    /// Fade duration in milliseconds, kept for the settings contract
    #[serde(default = "default_fade_duration")]
    pub fade_duration_ms: i32,

    /// Whether the LoadFont element should reference a font file
    #[serde(default)]
    pub include_font_reference: bool,

    /// Path of the font file for the LoadFont reference
    #[serde(default)]
    pub font_uri: String,
}

fn default_movie_title() -> String {
    rules::DEFAULT_MOVIE_TITLE.to_string()
}

fn default_reel_number() -> i32 {
    rules::DEFAULT_REEL_NUMBER
}

fn default_language_code() -> String {
    rules::DEFAULT_LANGUAGE_CODE.to_string()
}

fn default_font_size() -> i32 {
    rules::DEFAULT_FONT_SIZE
}

fn default_fade_duration() -> i32 {
    rules::DEFAULT_FADE_DURATION
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            frame_rate: FrameRate::default(),
            movie_title: default_movie_title(),
            reel_number: default_reel_number(),
            language_code: default_language_code(),
            font_size_pt: default_font_size(),
            fade_duration_ms: default_fade_duration(),
            include_font_reference: false,
            font_uri: String::new(),
        }
    }
}

impl ExportSettings {
    /// Build settings from the conversion context
    ///
    /// The movie title is derived from the output filename stem; the frame
    /// rate from the detected video rate when one is available.
    pub fn from_context(output_path: &Path, video_fps: Option<f64>) -> Self {
        let stem = output_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        ExportSettings {
            movie_title: rules::validate_movie_title(&stem),
            frame_rate: video_fps.map(FrameRate::from_fps).unwrap_or_default(),
            ..ExportSettings::default()
        }
    }

    /// Load settings from a JSON file, sanitizing every field
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        let mut settings: ExportSettings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path.as_ref()))?;
        settings.sanitize();
        Ok(settings)
    }

    /// Save settings to a JSON file, mirroring every field
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Run every field through its validator, substituting defaults in place
    pub fn sanitize(&mut self) {
        self.movie_title = rules::validate_movie_title(&self.movie_title);
        self.reel_number = rules::validate_reel_number(self.reel_number);
        self.language_code = rules::validate_language_code(&self.language_code);
        self.font_size_pt = rules::validate_font_size(self.font_size_pt);
        self.fade_duration_ms = rules::validate_fade_duration(self.fade_duration_ms);
    }
}
