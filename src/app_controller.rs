use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::cinecanvas::{self, reader, writer};
use crate::export_settings::ExportSettings;
use crate::file_utils::FileManager;
use crate::subtitle_document::SubtitleDocument;
use crate::validation;

/// Direction of one conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// ASS document → CineCanvas XML
    Export,
    /// CineCanvas XML → ASS document
    Import,
}

/// Main application controller for CineCanvas conversion
pub struct Controller {
    settings: ExportSettings,
}

impl Controller {
    /// Create a new controller with the given export settings
    pub fn with_settings(settings: ExportSettings) -> Result<Self> {
        Ok(Self { settings })
    }

    /// Determine the conversion direction for an input file
    ///
    /// The extension is a fast pre-filter; for XML input the root element
    /// is the authoritative check.
    pub fn detect_direction(input_file: &Path, content: &str) -> Result<Direction> {
        let extension = input_file
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ass" | "ssa" => Ok(Direction::Export),
            "xml" if reader::is_cinecanvas(content) => Ok(Direction::Import),
            "xml" => Err(anyhow!(
                "Not a CineCanvas file (missing {} root element): {:?}",
                cinecanvas::ROOT_ELEMENT,
                input_file
            )),
            _ => Err(anyhow!("Unsupported input file type: {:?}", input_file)),
        }
    }

    /// Convert a single file, deriving the output path when none is given
    pub fn run(
        &self,
        input_file: PathBuf,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<()> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let content = FileManager::read_to_string(&input_file)?;
        let direction = Self::detect_direction(&input_file, &content)?;

        let output_file = output_file.unwrap_or_else(|| {
            let extension = match direction {
                Direction::Export => "xml",
                Direction::Import => "ass",
            };
            FileManager::generate_output_path(&input_file, extension)
        });

        if output_file.exists() && !force_overwrite {
            warn!(
                "Skipping file, output already exists (use -f to force overwrite): {:?}",
                output_file
            );
            return Ok(());
        }

        let start_time = std::time::Instant::now();
        match direction {
            Direction::Export => self.export_file(&content, &output_file)?,
            Direction::Import => self.import_file(&content, &output_file)?,
        }
        info!(
            "Converted {:?} -> {:?} in {} ms",
            input_file,
            output_file,
            start_time.elapsed().as_millis()
        );

        Ok(())
    }

    /// Convert every recognized subtitle file under a directory
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let mut subtitle_files = Vec::new();
        for extension in ["ass", "ssa", "xml"] {
            let mut files = FileManager::find_files(&input_dir, extension)?;
            subtitle_files.append(&mut files);
        }
        subtitle_files.sort();

        if subtitle_files.is_empty() {
            return Err(anyhow!(
                "No subtitle files found in directory: {:?}",
                input_dir
            ));
        }

        let progress = ProgressBar::new(subtitle_files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style);
        progress.set_message("Converting files");

        let mut success_count = 0;
        let mut error_count = 0;

        for file in &subtitle_files {
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress.set_message(format!("Converting: {}", file_name));

            match self.run(file.clone(), None, force_overwrite) {
                Ok(_) => success_count += 1,
                Err(e) => {
                    error!("Error converting {}: {}", file_name, e);
                    error_count += 1;
                }
            }
            progress.inc(1);
        }

        progress.finish_with_message(format!(
            "Converted {} file(s), {} error(s)",
            success_count, error_count
        ));
        info!(
            "Finished folder conversion: {} ok, {} failed",
            success_count, error_count
        );

        Ok(())
    }

    /// Export an ASS document to a CineCanvas XML file
    fn export_file(&self, content: &str, output_file: &Path) -> Result<()> {
        let doc = SubtitleDocument::from_ass_str(content)
            .context("Failed to parse ASS subtitle file")?;
        debug!(
            "Exporting {} event(s) on the {} fps frame grid",
            doc.events.len(),
            self.settings.frame_rate
        );

        // Compatibility warnings are advisory; surface them and continue
        for line in validation::validate_for_export(&doc, &self.settings).lines() {
            warn!("{}", line);
        }

        let xml = writer::write_document(&doc, &self.settings)
            .context("Failed to generate CineCanvas XML")?;
        FileManager::write_to_file(output_file, &xml)
    }

    /// Import a CineCanvas XML file to an ASS document
    fn import_file(&self, content: &str, output_file: &Path) -> Result<()> {
        let doc = reader::read_document(content).context("Failed to parse CineCanvas XML")?;
        FileManager::write_to_file(output_file, &doc.to_ass_string())
    }
}
