//! Card rasterization and JPEG encoding

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use log::debug;
use resvg::tiny_skia;
use resvg::usvg;

use crate::error::ExportError;

/// Options handed to the rasterizer for every card
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Pixel density multiplier
    pub scale: f32,
    /// Opaque background colour (RGB)
    pub background: [u8; 3],
    /// Resolve images referenced by relative paths
    pub allow_external_resources: bool,
    /// Emit per-step debug logging
    pub verbose: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: [255, 255, 255],
            allow_external_resources: true,
            verbose: false,
        }
    }
}

/// Turns a card document into pixels
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, svg: &str, options: &RasterOptions) -> Result<RgbaImage, ExportError>;
}

/// resvg-backed rasterizer with a font database loaded once
pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    resources_dir: Option<PathBuf>,
}

impl ResvgRasterizer {
    pub fn new(resources_dir: Option<PathBuf>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        debug!("loaded {} font faces", db.len());
        Self {
            fontdb: Arc::new(db),
            resources_dir,
        }
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, options: &RasterOptions) -> Result<RgbaImage, ExportError> {
        let mut opt = usvg::Options::default();
        opt.fontdb = self.fontdb.clone();
        if options.allow_external_resources {
            opt.resources_dir = self.resources_dir.clone();
        }

        let raster_error = |e: usvg::Error| ExportError::Raster(e.to_string());
        let tree = usvg::Tree::from_str(svg, &opt).map_err(raster_error)?;

        let scale = options.scale;
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;
        if options.verbose {
            debug!("rasterizing {}x{} at scale {}", width, height, scale);
        }

        let Some(mut pixmap) = tiny_skia::Pixmap::new(width, height) else {
            let msg = format!("cannot allocate {}x{} pixmap", width, height);
            return Err(ExportError::Raster(msg));
        };
        let [r, g, b] = options.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));

        let transform = tiny_skia::Transform::from_scale(scale, scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // Opaque background means premultiplied and straight alpha coincide
        match RgbaImage::from_raw(width, height, pixmap.take()) {
            Some(image) => Ok(image),
            None => Err(ExportError::Raster("pixel buffer size mismatch".into())),
        }
    }
}

/// Encode pixels as JPEG at the given quality (1-100)
pub fn encode_jpeg(image: RgbaImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode_image(&rgb)?;
    Ok(buf.into_inner())
}
