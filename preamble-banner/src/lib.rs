//! # preamble-banner
//!
//! Renders a title as multi-line ASCII art for the preamble banner.
//!
//! The synchronization code only sees the [`BannerRenderer`] trait; the
//! FIGlet-backed [`FigletRenderer`] is the default implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use preamble_banner::{BannerRenderer, FigletRenderer};
//!
//! fn show(title: &str) {
//!     if let Ok(renderer) = FigletRenderer::new() {
//!         if let Ok(text) = renderer.render(title) {
//!             print!("{text}");
//!         }
//!     }
//! }
//! ```

pub mod engine;
pub mod error;

pub use engine::{BannerRenderer, FigletRenderer};
pub use error::RenderError;
