//! Bone
//!
//! A `Bone` is a resolved figure plus the settings used to draw it. It is
//! built once per invocation from an explicit [`BoneConfig`] and is
//! read-only afterwards.

use rand::Rng;
use tracing::debug;

use crate::balloon::BalloonLayout;
use crate::error::{BoneError, Result};
use crate::library::{FigureFile, FigureLibrary};
use crate::template::{self, Figure, Placeholders};

/// Figure used when none is named
pub const DEFAULT_FIGURE: &str = "default";

/// Which figure to draw
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FigureSelection {
    /// Look up a figure by name
    Named(String),
    /// Pick one at random from the library
    Random,
}

impl Default for FigureSelection {
    fn default() -> Self {
        Self::Named(DEFAULT_FIGURE.to_string())
    }
}

/// Everything needed to build a [`Bone`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoneConfig {
    pub figure: FigureSelection,
    /// Always exactly two characters, see [`BoneConfig::set_eyes`]
    pub eyes: String,
    /// Always exactly two characters, see [`BoneConfig::set_tongue`]
    pub tongue: String,
    /// Connector drawn between the balloon and the figure
    pub thoughts: char,
    /// Thought balloon instead of speech balloon
    pub thinking: bool,
    /// Wrap column of the balloon
    pub balloon_width: usize,
    pub word_wrap: bool,
}

impl Default for BoneConfig {
    fn default() -> Self {
        Self {
            figure: FigureSelection::default(),
            eyes: "oo".to_string(),
            tongue: "  ".to_string(),
            thoughts: '/',
            thinking: false,
            balloon_width: 40,
            word_wrap: true,
        }
    }
}

impl BoneConfig {
    /// Configuration for thinking mode (`bonethink`)
    pub fn thinking() -> Self {
        Self {
            thinking: true,
            thoughts: 'o',
            ..Self::default()
        }
    }

    pub fn set_eyes(&mut self, eyes: &str) {
        self.eyes = adjust_to_two_chars(eyes);
    }

    pub fn set_tongue(&mut self, tongue: &str) {
        self.tongue = adjust_to_two_chars(tongue);
    }

    pub fn validate(&self) -> Result<()> {
        if self.balloon_width == 0 {
            return Err(BoneError::InvalidConfig(
                "balloon width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Truncate or pad to exactly two characters
pub fn adjust_to_two_chars(s: &str) -> String {
    let mut out: String = s.chars().take(2).collect();
    while out.chars().count() < 2 {
        out.push(' ');
    }
    out
}

/// A figure ready to speak
#[derive(Clone, Debug)]
pub struct Bone {
    config: BoneConfig,
    file: FigureFile,
    template: String,
}

impl Bone {
    /// Validate the configuration and resolve its figure
    pub fn new<R: Rng + ?Sized>(
        config: BoneConfig,
        library: &FigureLibrary,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let file = match &config.figure {
            FigureSelection::Named(name) => {
                library.lookup(name).ok_or_else(|| BoneError::NotFound { name: name.clone() })?
            }
            FigureSelection::Random => library.pick(rng)?,
        };
        let template = file.read()?;
        debug!(figure = %file.name, path = ?file.base_path, "Resolved figure");

        Ok(Self {
            config,
            file,
            template,
        })
    }

    pub fn config(&self) -> &BoneConfig {
        &self.config
    }

    pub fn file(&self) -> &FigureFile {
        &self.file
    }

    /// Parse the template with this bone's eyes, tongue and thoughts
    pub fn figure(&self) -> Figure {
        let placeholders = Placeholders {
            eyes: self.config.eyes.clone(),
            tongue: self.config.tongue.clone(),
            thoughts: self.config.thoughts,
        };
        template::parse(&self.template, &placeholders)
    }

    pub fn layout(&self, offset: usize) -> BalloonLayout {
        BalloonLayout {
            width: self.config.balloon_width,
            word_wrap: self.config.word_wrap,
            thinking: self.config.thinking,
            offset,
        }
    }

    /// Balloon for `phrase`, shifted by `offset`
    pub fn balloon(&self, phrase: &str, offset: usize) -> String {
        self.layout(offset).render(phrase)
    }

    /// Balloon and figure together
    pub fn say(&self, phrase: &str) -> String {
        let figure = self.figure();
        let mut said = self.balloon(phrase, figure.balloon_offset);
        said.push_str(&figure.text);
        said
    }

    /// The same figure with a blank thought connector
    pub fn silent(&self) -> Self {
        let mut bone = self.clone();
        bone.config.thoughts = ' ';
        bone
    }
}

/// Build a bone and render `phrase` in one step
pub fn say<R: Rng + ?Sized>(
    phrase: &str,
    config: BoneConfig,
    library: &FigureLibrary,
    rng: &mut R,
) -> Result<String> {
    Ok(Bone::new(config, library, rng)?.say(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_adjust_to_two_chars() {
        assert_eq!(adjust_to_two_chars("xyz"), "xy");
        assert_eq!(adjust_to_two_chars("x"), "x ");
        assert_eq!(adjust_to_two_chars(""), "  ");
        assert_eq!(adjust_to_two_chars("ö"), "ö ");
    }

    #[test]
    fn test_default_config() {
        let config = BoneConfig::default();
        assert_eq!(config.eyes, "oo");
        assert_eq!(config.tongue, "  ");
        assert_eq!(config.thoughts, '/');
        assert_eq!(config.balloon_width, 40);
        assert!(config.word_wrap);
        assert!(!config.thinking);
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = BoneConfig {
            balloon_width: 0,
            ..BoneConfig::default()
        };
        let err = Bone::new(config, &FigureLibrary::embedded(), &mut rng()).unwrap_err();
        assert!(matches!(err, BoneError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_figure() {
        let config = BoneConfig {
            figure: FigureSelection::Named("nope".to_string()),
            ..BoneConfig::default()
        };
        let err = Bone::new(config, &FigureLibrary::embedded(), &mut rng()).unwrap_err();
        assert!(matches!(err, BoneError::NotFound { ref name } if name == "nope"));
        assert_eq!(err.to_string(), "not found \"nope\" bonefile");
    }

    #[test]
    fn test_say_applies_offset_and_placeholders() {
        let mut config = BoneConfig::default();
        config.set_eyes("@@");
        let bone = Bone::new(config, &FigureLibrary::embedded(), &mut rng()).unwrap();
        let figure = bone.figure();
        let said = bone.say("hi");

        assert!(figure.text.contains("@@"));
        assert!(!said.contains("$eyes"));
        let first = said.lines().next().unwrap();
        let indent = first.len() - first.trim_start().len();
        assert_eq!(indent, figure.balloon_offset);
        assert!(said.ends_with(&figure.text));
    }

    #[test]
    fn test_silent_blanks_thoughts() {
        let bone = Bone::new(BoneConfig::default(), &FigureLibrary::embedded(), &mut rng()).unwrap();
        let silent = bone.silent();
        assert_eq!(silent.config().thoughts, ' ');
        assert_ne!(silent.figure().text, bone.figure().text);
        assert_eq!(silent.figure().text.lines().count(), bone.figure().text.lines().count());
    }

    #[test]
    fn test_random_figure_is_in_library() {
        let config = BoneConfig {
            figure: FigureSelection::Random,
            ..BoneConfig::default()
        };
        let library = FigureLibrary::embedded();
        let bone = Bone::new(config, &library, &mut rng()).unwrap();
        assert!(library.lookup(&bone.file().name).is_some());
    }
}
