//! Quote card composer
//!
//! Draws a date, a wrapped quote, and an author line centered on a fixed
//! background image, and writes the result to a deterministic path derived
//! from the quote date.

use crate::config::RenderConfig;
use ab_glyph::{FontArc, PxScale};
use image::Rgb;
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Vertical position of the date line
const DATE_Y: i32 = 350;

/// Gap between the date line and the first quote line
const QUOTE_OFFSET: i32 = 100;

/// Gap between the first quote line and the author line
const AUTHOR_OFFSET: i32 = 200;

/// Extra pixels between wrapped quote lines
const LINE_SPACING: i32 = 10;

/// Prefix drawn before the author name
const AUTHOR_PREFIX: &str = "---";

/// Errors that can occur during image composition
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::error::ImageError),

    #[error("Failed to load font {path}")]
    Font { path: String },
}

/// Encodings the composer can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }
}

/// Renders quote cards from a background template
pub struct QuoteComposer {
    config: RenderConfig,
}

impl QuoteComposer {
    /// Creates a composer and ensures the output directory exists
    pub fn new(config: &RenderConfig) -> Result<Self, ComposeError> {
        std::fs::create_dir_all(&config.output_dir)?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Renders one quote card
    ///
    /// # Arguments
    ///
    /// * `date` - Canonical `YYYY.MM.DD` date, also drives the output name
    /// * `author` - Author name, drawn with the `---` prefix
    /// * `quote` - Quote text, wrapped at the configured column width
    /// * `format` - Output encoding
    ///
    /// # Returns
    ///
    /// * `Ok(Some(path))` - Card written to the returned path
    /// * `Ok(None)` - Background or font missing; logged and skipped
    /// * `Err(ComposeError)` - Decode, draw, or write failure
    pub fn compose(
        &self,
        date: &str,
        author: &str,
        quote: &str,
        format: OutputFormat,
    ) -> Result<Option<PathBuf>, ComposeError> {
        let background = Path::new(&self.config.background_path);
        if !background.exists() {
            tracing::warn!(
                "Background image {} not found, skipping render",
                self.config.background_path
            );
            return Ok(None);
        }

        let font_path = Path::new(&self.config.font_path);
        if !font_path.exists() {
            tracing::warn!(
                "Font {} not found, skipping render",
                self.config.font_path
            );
            return Ok(None);
        }

        let font_data = std::fs::read(font_path)?;
        let font = FontArc::try_from_vec(font_data).map_err(|_| ComposeError::Font {
            path: self.config.font_path.clone(),
        })?;

        let mut image = image::open(background)?.to_rgb8();
        let width = image.width();
        let black = Rgb([0u8, 0u8, 0u8]);

        let date_scale = PxScale::from(self.config.date_size);
        let quote_scale = PxScale::from(self.config.quote_size);
        let author_scale = PxScale::from(self.config.author_size);

        // Date, centered
        draw_centered(&mut image, black, DATE_Y, date_scale, &font, date, width);

        // Quote, wrapped and centered line by line
        let quote_y = DATE_Y + QUOTE_OFFSET;
        let line_height = self.config.quote_size as i32 + LINE_SPACING;
        for (i, line) in wrap_text(quote, self.config.wrap_width).iter().enumerate() {
            let y = quote_y + i as i32 * line_height;
            draw_centered(&mut image, black, y, quote_scale, &font, line, width);
        }

        // Author, centered below the quote block
        let author_line = format!("{}{}", AUTHOR_PREFIX, author);
        draw_centered(
            &mut image,
            black,
            quote_y + AUTHOR_OFFSET,
            author_scale,
            &font,
            &author_line,
            width,
        );

        let output_path = self.output_path(date, format);
        tracing::info!("Saving quote card to {}", output_path.display());
        image.save(&output_path)?;

        Ok(Some(output_path))
    }

    /// Deterministic output path for a quote date
    fn output_path(&self, date: &str, format: OutputFormat) -> PathBuf {
        let safe_date = date.replace('.', "-");
        Path::new(&self.config.output_dir)
            .join(format!("quote_{}.{}", safe_date, format.extension()))
    }
}

/// Draws one line of text horizontally centered at the given baseline
fn draw_centered(
    image: &mut image::RgbImage,
    color: Rgb<u8>,
    y: i32,
    scale: PxScale,
    font: &FontArc,
    text: &str,
    canvas_width: u32,
) {
    let (text_width, _) = text_size(scale, font, text);
    let x = (canvas_width.saturating_sub(text_width) / 2) as i32;
    draw_text_mut(image, color, x, y, scale, font, text);
}

/// Greedy word wrap at the given column width
///
/// Words longer than the width stand on their own line rather than being
/// split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
