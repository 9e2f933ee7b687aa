//! bonesay core
//!
//! Speech and thought balloons above template-driven ASCII-art figures.
//!
//! # Architecture
//!
//! - **Balloon**: word-wrapped, bordered bubble layout
//! - **Template**: placeholder substitution for bonefiles
//! - **Library**: built-in figures plus `BONEPATH` directories
//! - **Bone**: explicit configuration and the resolved figure
//! - **Config**: optional TOML settings file

pub mod balloon;
pub mod bone;
pub mod config;
pub mod error;
pub mod library;
pub mod template;

pub use balloon::{render_balloon, BalloonLayout, BorderPair, BorderSet};
pub use bone::{adjust_to_two_chars, say, Bone, BoneConfig, FigureSelection};
pub use config::{ConfigError, OutputStyle, Settings};
pub use error::{BoneError, Result};
pub use library::{FigureFile, FigureLibrary, FigurePath, Location};
pub use template::{Figure, Placeholders};
