pub mod frequency;
pub mod layout;

use crate::config::RenderConfig;
use crate::filter::StopwordSet;
use ab_glyph::FontVec;
use frequency::{WordCount, count_words};
use image::{Rgba, RgbaImage};
use layout::{Occupancy, next_font_size, place_word};
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Colours cycled through for the placed words
const PALETTE: [[u8; 3]; 10] = [
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x49, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6e, 0xce, 0x58],
    [0xb5, 0xde, 0x2b],
    [0xfd, 0xe7, 0x25],
];

/// Where the text fed to the word cloud came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Articles scraped from the site
    Scrape,
    /// One column of an uploaded spreadsheet
    Spreadsheet,
}

/// Coarse classification of a visualization failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidFont,
    EmptyCorpus,
    Generic,
}

#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error("{} is not a valid font file", path.display())]
    InvalidFont { path: PathBuf },

    #[error("no words left to plot after stopword filtering")]
    EmptyCorpus { input: InputSource },

    #[error("word cloud generation failed: {0}")]
    Generic(String),
}

impl VisualizeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            VisualizeError::InvalidFont { .. } => FailureKind::InvalidFont,
            VisualizeError::EmptyCorpus { .. } => FailureKind::EmptyCorpus,
            VisualizeError::Generic(_) => FailureKind::Generic,
        }
    }

    /// Message shown to the operator. An empty corpus is worded after its
    /// likely cause, which differs per input source.
    pub fn user_message(&self) -> String {
        match self {
            VisualizeError::InvalidFont { .. } => {
                "指定されたファイルはフォントファイルではない可能性があります。フォントファイルを確認してください。"
                    .to_string()
            }
            VisualizeError::EmptyCorpus {
                input: InputSource::Spreadsheet,
            } => "選ばれたCSVの列にテキストが含まれていないため、ワードクラウドが作成できません。".to_string(),
            VisualizeError::EmptyCorpus {
                input: InputSource::Scrape,
            } => "取得した記事から単語を抽出できなかったため、ワードクラウドが作成できません。".to_string(),
            VisualizeError::Generic(message) => {
                format!("ワードクラウドの生成中にエラーが発生しました: {}", message)
            }
        }
    }
}

/// One word as drawn on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A rendered word cloud
#[derive(Debug, Clone)]
pub struct WordCloudImage {
    pub image: RgbaImage,
    pub words: Vec<PlacedWord>,
}

impl WordCloudImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Write the image to `path`; the format follows the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.image.save(path)
    }
}

/// Renders token frequencies as a word cloud
#[derive(Debug, Clone)]
pub struct WordCloud {
    config: RenderConfig,
    stopwords: StopwordSet,
    pattern: Regex,
    background: Rgba<u8>,
}

impl WordCloud {
    pub fn new(config: &RenderConfig, stopwords: StopwordSet) -> Result<Self, VisualizeError> {
        if config.width == 0 || config.height == 0 {
            return Err(VisualizeError::Generic(format!(
                "canvas size {}x{} is empty",
                config.width, config.height
            )));
        }
        let pattern = Regex::new(&config.token_pattern).map_err(|e| {
            VisualizeError::Generic(format!("invalid token pattern {}: {}", config.token_pattern, e))
        })?;
        let background = parse_color(&config.background).ok_or_else(|| {
            VisualizeError::Generic(format!("invalid background colour {}", config.background))
        })?;

        Ok(Self {
            config: config.clone(),
            stopwords,
            pattern,
            background,
        })
    }

    /// Built-in stopwords plus the configured extra words
    pub fn from_config(config: &RenderConfig) -> Result<Self, VisualizeError> {
        Self::new(config, StopwordSet::new(&config.extra_stopwords))
    }

    /// Counts the words of `text` and draws them with the font at
    /// `font_path`. `input` only affects how an empty corpus is reported.
    pub fn generate(
        &self,
        text: &str,
        font_path: &Path,
        input: InputSource,
    ) -> Result<WordCloudImage, VisualizeError> {
        let mut counts = count_words(text, &self.pattern, &self.stopwords);
        counts.truncate(self.config.max_words);
        if counts.is_empty() {
            ::log::warn!("No words left after stopword filtering");
            return Err(VisualizeError::EmptyCorpus { input });
        }
        ::log::info!("Drawing up to {} distinct words", counts.len());

        let font = load_font(font_path)?;
        let words = self.layout(&font, &counts);
        if words.is_empty() {
            return Err(VisualizeError::Generic(
                "couldn't find space to draw; the canvas is too small".to_string(),
            ));
        }

        let image = self.render(&words);
        let words = words.into_iter().map(|(placed, _)| placed).collect();
        Ok(WordCloudImage { image, words })
    }

    fn layout(&self, font: &FontVec, counts: &[WordCount]) -> Vec<(PlacedWord, layout::GlyphMask)> {
        let config = &self.config;
        let mut occupancy = Occupancy::new(config.width, config.height);
        let mut placed = Vec::new();

        let mut font_size = config.max_font_size.unwrap_or(config.height as f32);
        let mut previous_count = counts[0].count;

        for entry in counts {
            font_size = next_font_size(font_size, entry.count, previous_count, config.relative_scaling);
            previous_count = entry.count;

            let Some(placement) = place_word(
                font,
                &occupancy,
                &entry.word,
                font_size,
                config.min_font_size,
                config.margin,
            ) else {
                ::log::debug!("No room left for '{}', stopping", entry.word);
                break;
            };

            occupancy.occupy(placement.x, placement.y, &placement.mask);
            font_size = placement.font_size;
            ::log::trace!(
                "Placed '{}' x{} at ({}, {}) size {}",
                entry.word,
                entry.count,
                placement.x,
                placement.y,
                placement.font_size
            );

            placed.push((
                PlacedWord {
                    text: entry.word.clone(),
                    count: entry.count,
                    font_size: placement.font_size,
                    x: placement.x,
                    y: placement.y,
                    width: placement.mask.width,
                    height: placement.mask.height,
                },
                placement.mask,
            ));
        }

        ::log::info!("Placed {} of {} words", placed.len(), counts.len());
        placed
    }

    fn render(&self, words: &[(PlacedWord, layout::GlyphMask)]) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(self.config.width, self.config.height, self.background);

        for (i, (word, mask)) in words.iter().enumerate() {
            let colour = PALETTE[(i * 3) % PALETTE.len()];
            for my in 0..mask.height {
                for mx in 0..mask.width {
                    let c = mask.coverage(mx, my);
                    let (px, py) = (word.x + mx, word.y + my);
                    if c <= 0.0 || px >= image.width() || py >= image.height() {
                        continue;
                    }
                    let pixel = image.get_pixel_mut(px, py);
                    for ch in 0..3 {
                        let blended = pixel[ch] as f32 * (1.0 - c) + colour[ch] as f32 * c;
                        pixel[ch] = blended.round() as u8;
                    }
                }
            }
        }
        image
    }
}

fn load_font(path: &Path) -> Result<FontVec, VisualizeError> {
    let data = std::fs::read(path).map_err(|e| {
        VisualizeError::Generic(format!("cannot open font {}: {}", path.display(), e))
    })?;
    FontVec::try_from_vec(data).map_err(|_| VisualizeError::InvalidFont {
        path: path.to_path_buf(),
    })
}

/// Parses `#rrggbb`, `white` or `black`
fn parse_color(value: &str) -> Option<Rgba<u8>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "white" => Some(Rgba([255, 255, 255, 255])),
        "black" => Some(Rgba([0, 0, 0, 255])),
        hex => {
            let hex = hex.strip_prefix('#')?;
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
        }
    }
}
