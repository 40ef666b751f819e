#![forbid(unsafe_code)]
//! Generate Android and iOS string resources from one translations table.
//!
//! A semicolon-separated table lists every translatable key with the
//! platforms it belongs to and one column per language. Clients can ship an
//! additional table whose rows override (or extend) the default ones.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use transgen::{Generator, GeneratorOptions};
//!
//! let generator = Generator::prepare(GeneratorOptions {
//!     project_path: "..".into(),
//!     csv_folder: Some("translations".into()),
//!     ..GeneratorOptions::default()
//! })?;
//! let report = generator.write_all();
//! assert!(report.is_success());
//! # Ok::<(), transgen::Error>(())
//! ```
//!
//! # Outputs
//!
//! - **Android `strings.xml`**: `<client>/src/main/res/values[-<code>]/strings.xml`
//! - **Apple `.strings`**: `<client>/Localization/<code>.lproj/Localizable.strings`
//! - **Swift keys**: `<client>/Localization/TranslationKey.swift`
//!
//! # Lifecycle
//!
//! A table is read into a [`TranslationSet`], copied into a
//! [`TranslationSetBuilder`] to apply client overrides, and frozen into a
//! [`Catalog`] that the emitters only read from.

pub mod error;
pub mod formats;
pub mod generator;
pub mod language;
pub mod merge;
pub mod settings;
pub mod traits;
pub mod types;
pub mod writer;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::csv::IngestOptions,
    generator::{GenerationReport, Generator, GeneratorOptions},
    language::LanguageRegistry,
    merge::{OverrideReport, TranslationSetBuilder},
    settings::{TargetSetting, TranslationsSettings},
    types::{Catalog, Platform, Translation, TranslationItem, TranslationSet, Translations},
    writer::{TranslationWriter, WriteReport},
};
