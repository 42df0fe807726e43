//! Card export pipeline
//!
//! A card is rendered to SVG, rasterized, encoded as JPEG and handed to a
//! [`FileSink`]. Failures never propagate: each export resolves to an
//! [`ExportOutcome`] and the error is logged.

pub mod batch;
pub mod raster;
pub mod sink;

pub use batch::{BatchReport, ExportUpdate, run_batch, spawn_single};
pub use raster::{RasterOptions, Rasterizer, ResvgRasterizer, encode_jpeg};
pub use sink::{DirectorySink, FileSink};

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error};

use crate::card::{CardLayout, render_svg};
use crate::error::ExportError;

/// Title used in the filename when the activity cannot be found
const FALLBACK_TITLE: &str = "activity";

/// One card to export. `card` is absent when nothing is rendered for `id`.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub id: u32,
    pub card: Option<CardLayout>,
    pub title: Option<String>,
}

/// How a single export ended
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// No rendered card for the id
    Skipped,
    Failed(String),
}

impl ExportOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ExportOutcome::Saved(_))
    }
}

/// Replace every character outside `[A-Za-z0-9]` with `_` and lowercase.
///
/// Characters outside the basic plane become two underscores, matching the
/// UTF-16 length a browser-side export would have produced.
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else {
            for _ in 0..c.len_utf16() {
                out.push('_');
            }
        }
    }
    out
}

/// `rhetoric_card_<id>_<sanitized title>.jpg`
pub fn card_filename(id: u32, title: Option<&str>) -> String {
    let safe = sanitize_title(title.unwrap_or(FALLBACK_TITLE));
    format!("rhetoric_card_{}_{}.jpg", id, safe)
}

/// Renders, encodes and saves cards
pub struct Exporter {
    rasterizer: Arc<dyn Rasterizer>,
    sink: Arc<dyn FileSink>,
    options: RasterOptions,
    jpeg_quality: u8,
}

impl Exporter {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        sink: Arc<dyn FileSink>,
        options: RasterOptions,
        jpeg_quality: u8,
    ) -> Self {
        Self {
            rasterizer,
            sink,
            options,
            jpeg_quality,
        }
    }

    /// Export one card. Never fails outward; errors are logged.
    pub fn export(&self, job: &ExportJob) -> ExportOutcome {
        let Some(card) = job.card.as_ref() else {
            debug!("card {} is not rendered, skipping", job.id);
            return ExportOutcome::Skipped;
        };

        let filename = card_filename(job.id, job.title.as_deref());
        match self.render_and_save(card, &filename) {
            Ok(path) => {
                debug!("saved card {} to {}", job.id, path.display());
                ExportOutcome::Saved(path)
            }
            Err(e) => {
                error!("Error generating image for card {}: {}", job.id, e);
                ExportOutcome::Failed(e.to_string())
            }
        }
    }

    fn render_and_save(&self, card: &CardLayout, filename: &str) -> Result<PathBuf, ExportError> {
        let svg = render_svg(card);
        let pixels = self.rasterizer.rasterize(&svg, &self.options)?;
        let bytes = encode_jpeg(pixels, self.jpeg_quality)?;
        let save_error = |source| ExportError::Save {
            filename: filename.to_string(),
            source,
        };
        self.sink.save(filename, &bytes).map_err(save_error)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory rasterizer and sink shared by export tests

    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use image::RgbaImage;

    use super::*;

    /// Produces a tiny image; fails for documents containing `fail_marker`
    pub struct FakeRasterizer {
        pub fail_marker: Option<String>,
    }

    impl Rasterizer for FakeRasterizer {
        fn rasterize(&self, svg: &str, _opts: &RasterOptions) -> Result<RgbaImage, ExportError> {
            if let Some(marker) = &self.fail_marker {
                if svg.contains(marker.as_str()) {
                    return Err(ExportError::Raster("boom".to_string()));
                }
            }
            Ok(RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255])))
        }
    }

    /// Records every save
    #[derive(Default)]
    pub struct MemorySink {
        pub saved: Mutex<Vec<(String, usize)>>,
    }

    impl MemorySink {
        /// Saved filenames in save order
        pub fn names(&self) -> Vec<String> {
            let saved = self.saved.lock().unwrap();
            saved.iter().map(|(name, _)| name.clone()).collect()
        }
    }

    impl FileSink for MemorySink {
        fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
            if let Ok(mut saved) = self.saved.lock() {
                saved.push((filename.to_string(), bytes.len()));
            }
            Ok(PathBuf::from(filename))
        }
    }

    pub fn exporter(fail_marker: Option<&str>, sink: Arc<MemorySink>) -> Exporter {
        Exporter::new(
            Arc::new(FakeRasterizer {
                fail_marker: fail_marker.map(str::to_string),
            }),
            sink,
            RasterOptions::default(),
            95,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{MemorySink, exporter};
    use super::*;
    use crate::i18n::Translations;
    use crate::models::Language;
    use crate::models::activity::sample;

    fn job(id: u32, title: &str) -> ExportJob {
        let tr = Translations::builtin().unwrap();
        let act = sample(id, title, "Theme", "8-10", "Beginner");
        ExportJob {
            id,
            card: Some(CardLayout::build(&act, tr.get(Language::En))),
            title: Some(title.to_string()),
        }
    }

    #[test]
    fn test_card_filename_sanitizes_title() {
        assert_eq!(
            card_filename(7, Some("Ethos & Pathos!")),
            "rhetoric_card_7_ethos___pathos_.jpg"
        );
        assert_eq!(card_filename(3, None), "rhetoric_card_3_activity.jpg");
    }

    #[test]
    fn test_sanitize_title_non_ascii() {
        assert_eq!(sanitize_title("Ομιλία 1"), "_______1");
        assert_eq!(sanitize_title("Año"), "a_o");
        // Astral characters take two code units
        assert_eq!(sanitize_title("a🎤b"), "a__b");
    }

    #[test]
    fn test_export_saves_named_jpeg() {
        let sink = Arc::new(MemorySink::default());
        let exp = exporter(None, sink.clone());

        let outcome = exp.export(&job(2, "Story Power"));
        assert_eq!(
            outcome,
            ExportOutcome::Saved(PathBuf::from("rhetoric_card_2_story_power.jpg"))
        );
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].1 > 0);
    }

    #[test]
    fn test_export_without_card_is_skipped() {
        let sink = Arc::new(MemorySink::default());
        let exp = exporter(None, sink.clone());

        let outcome = exp.export(&ExportJob {
            id: 9,
            card: None,
            title: None,
        });
        assert_eq!(outcome, ExportOutcome::Skipped);
        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_export_failure_is_contained() {
        let sink = Arc::new(MemorySink::default());
        let exp = exporter(Some("Broken"), sink.clone());

        let outcome = exp.export(&job(4, "Broken"));
        match outcome {
            ExportOutcome::Failed(msg) => assert!(msg.contains("boom")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(sink.saved.lock().unwrap().is_empty());
    }
}
