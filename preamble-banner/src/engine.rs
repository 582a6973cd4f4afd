//! [`BannerRenderer`] trait and the FIGlet implementation.

use std::path::Path;

use figlet_rs::FIGfont;

use crate::error::RenderError;

/// Turns a title into multi-line text, one banner row per `\n`-separated
/// line. The output usually ends in a newline.
pub trait BannerRenderer {
    fn render(&self, title: &str) -> Result<String, RenderError>;
}

impl<R: BannerRenderer + ?Sized> BannerRenderer for &R {
    fn render(&self, title: &str) -> Result<String, RenderError> {
        (**self).render(title)
    }
}

impl<R: BannerRenderer + ?Sized> BannerRenderer for Box<R> {
    fn render(&self, title: &str) -> Result<String, RenderError> {
        (**self).render(title)
    }
}

/// FIGlet renderer, built-in "standard" font unless a `.flf` file is given.
pub struct FigletRenderer {
    font: FIGfont,
}

impl FigletRenderer {
    /// Renderer with the built-in standard font.
    pub fn new() -> Result<Self, RenderError> {
        let font = FIGfont::standard().map_err(RenderError::Font)?;
        Ok(Self { font })
    }

    /// Renderer with a font loaded from a `.flf` file.
    pub fn from_font_file(path: &Path) -> Result<Self, RenderError> {
        let contents = std::fs::read_to_string(path).map_err(|e| RenderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let font = FIGfont::from_content(&contents).map_err(RenderError::Font)?;
        Ok(Self { font })
    }

    /// `from_font_file` when a path is given, the standard font otherwise.
    pub fn with_font(path: Option<&Path>) -> Result<Self, RenderError> {
        match path {
            Some(path) => Self::from_font_file(path),
            None => Self::new(),
        }
    }
}

impl BannerRenderer for FigletRenderer {
    fn render(&self, title: &str) -> Result<String, RenderError> {
        let unrenderable = || RenderError::Unrenderable {
            title: title.to_string(),
        };
        if title.trim().is_empty() {
            return Err(unrenderable());
        }
        let figure = self
            .font
            .convert(title)
            .ok_or_else(unrenderable)?;
        Ok(figure.to_string())
    }
}
