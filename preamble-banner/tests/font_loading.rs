use std::fs;

use preamble_banner::{BannerRenderer, FigletRenderer, RenderError};
use tempfile::TempDir;

#[test]
fn missing_font_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.flf");
    let err = FigletRenderer::from_font_file(&path).err().expect("should fail");
    assert!(matches!(err, RenderError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("nope.flf"));
}

#[test]
fn garbage_font_file_is_font_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.flf");
    fs::write(&path, "garbage\n").unwrap();
    let err = FigletRenderer::from_font_file(&path).err().expect("should fail");
    assert!(matches!(err, RenderError::Font(_)), "got: {err}");
}

#[test]
fn with_font_none_uses_standard_font() {
    let a = FigletRenderer::with_font(None).unwrap().render("io").unwrap();
    let b = FigletRenderer::new().unwrap().render("io").unwrap();
    assert_eq!(a, b);
}
