//! # qrgen
//!
//! A Rust library for generating ISO/IEC 18004 QR codes with Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Automatic mode selection**: Numeric, alphanumeric or byte, whichever packs the data tightest
//! - **Automatic version selection**: Smallest of the 40 versions that fits the data
//! - **Reed-Solomon Error Correction**: Configurable levels (L, M, Q, H)
//! - **Penalty-scored masking**: All 8 masks are scored in parallel and the best one is kept
//! - **Rendering**: Grayscale images, SVG and terminal strings
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrgen::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! let img = qr.to_image(4); // 4x scale factor
//! # let _ = img;
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrgen::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::Normal(2))  // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::M)         // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)   // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! println!("{}", qr.metadata());
//! println!("{}", qr.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - **Normal QR**: Versions 1-40, with sizes from 21x21 to 177x177 modules
//! - **Micro QR**: Versions 1-4 are recognised but rejected with [`QRError::UnsupportedVersion`]
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod common;

pub use builder::{QRBuilder, QRCode};
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Metadata, Version};
