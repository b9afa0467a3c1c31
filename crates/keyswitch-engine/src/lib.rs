//! Wrong-layout detection for English, Ukrainian and Russian keyboards.
//!
//! Characters are pushed into a [`LayoutDetector`] as they are typed. At each
//! word boundary the detector decides whether the word was typed under the
//! wrong layout and, if so, what was meant.
//!
//! # Architecture
//!
//! - [`config`] -- Detector and loader settings (TOML)
//! - [`mapper`] -- Key tables and text conversion between layouts
//! - [`validator`] -- Ordered gates deciding whether a word belongs to a language
//! - [`detector`] -- Word buffering, the transition function and correction decisions

pub mod config;
pub mod detector;
pub mod mapper;
pub mod validator;

pub use config::{ConfigError, DetectorConfig, Settings};
pub use detector::state::{Effect, Event, Phase, Transition, transition};
pub use detector::{CorrectionSink, DetectionResult, LayoutDetector};
pub use validator::{Validation, WordValidator};
