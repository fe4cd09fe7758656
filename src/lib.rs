//! Curvy - A terminal-based line and curve plotter.
//!
//! Curvy turns typed or imported (x, y) pairs into a connected line, an
//! interpolated smooth curve or a least-squares polynomial fit, and can reveal
//! the curve progressively as an animation.
//!
//! # Features
//!
//! - Forgiving data entry: bad rows are skipped and reported
//! - Linear, quadratic and cubic interpolation with graceful fallbacks
//! - Polynomial fitting with R² and a printable equation
//! - Superscript labels (`x^2` becomes `x²`)
//! - PNG/SVG export and clipboard integration
//!
//! # Example
//!
//! ```
//! use curvy::curve::{build_curve, PlotConfiguration, PlotStyle};
//! use curvy::data::normalize;
//!
//! let rows = [("0", "1"), ("1", "3"), ("2", "5")];
//! let points = normalize(rows).points;
//!
//! let config = PlotConfiguration::default()
//!     .with_style(PlotStyle::PolynomialFit)
//!     .with_polynomial_degree(1);
//! let curve = build_curve(&points, &config)?;
//!
//! let fit = curve.fit.expect("polynomial fit");
//! assert_eq!(fit.equation(), "y = 2.0000x + 1.0000");
//! # Ok::<(), curvy::PlotError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod animation;
pub mod app;
pub mod clipboard;
pub mod curve;
pub mod data;
pub mod error;
pub mod export;
pub mod labels;
pub mod ui;
pub mod util;

pub use error::{PlotError, Result};
