//! Command Line Arguments
//!
//! Flags are layered over the settings file: anything given on the command
//! line wins, then `[figure]`/`[balloon]`/`[output]` settings, then defaults.

use std::num::NonZeroUsize;

use clap::Parser;
use rand::Rng;

use bonesay_core::{BoneConfig, FigureSelection, Settings};

use crate::decoration::{ColorStyle, Decoration};
use crate::Program;

/// Configurable speaking/thinking skeleton
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Original Author: (c) 1999 Tony Monroe")]
pub struct Args {
    /// Eyes (two characters)
    #[arg(short = 'e', long, value_name = "EYES")]
    pub eyes: Option<String>,

    /// Tongue (two characters)
    #[arg(short = 'T', long, value_name = "TONGUE")]
    pub tongue: Option<String>,

    /// Balloon wrap column
    #[arg(short = 'W', long = "width", value_name = "WRAPCOLUMN")]
    pub width: Option<NonZeroUsize>,

    /// Borg mode
    #[arg(short = 'b')]
    pub borg: bool,

    /// Dead
    #[arg(short = 'd')]
    pub dead: bool,

    /// Greedy
    #[arg(short = 'g')]
    pub greedy: bool,

    /// Paranoid
    #[arg(short = 'p')]
    pub paranoia: bool,

    /// Stoned
    #[arg(short = 's')]
    pub stoned: bool,

    /// Tired
    #[arg(short = 't')]
    pub tired: bool,

    /// Wired
    #[arg(short = 'w')]
    pub wired: bool,

    /// Youthful
    #[arg(short = 'y')]
    pub youthful: bool,

    /// List figures in every search path
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Keep the message's own line breaks (no word wrap)
    #[arg(short = 'n')]
    pub no_wrap: bool,

    /// Figure to draw
    #[arg(short = 'f', long = "file", value_name = "BONEFILE")]
    pub file: Option<String>,

    /// Bold output
    #[arg(long)]
    pub bold: bool,

    /// Animate across the terminal
    #[arg(long = "super")]
    pub super_mode: bool,

    /// Pick a random figure
    #[arg(long)]
    pub random: bool,

    /// Rainbow colors
    #[arg(long)]
    pub rainbow: bool,

    /// Aurora colors
    #[arg(long)]
    pub aurora: bool,

    /// Message, read from stdin when empty
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,
}

/// Eye and tongue presets, earlier variants win
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Borg,
    Dead,
    Greedy,
    Paranoia,
    Stoned,
    Tired,
    Wired,
    Youthful,
}

impl Face {
    pub fn eyes(self) -> &'static str {
        match self {
            Self::Borg => "==",
            Self::Dead => "xx",
            Self::Greedy => "$$",
            Self::Paranoia => "@@",
            Self::Stoned => "**",
            Self::Tired => "--",
            Self::Wired => "OO",
            Self::Youthful => "..",
        }
    }

    pub fn tongue(self) -> &'static str {
        match self {
            Self::Dead | Self::Stoned => "U ",
            _ => "  ",
        }
    }
}

impl Args {
    /// First selected face preset
    pub fn face(&self) -> Option<Face> {
        [
            (self.borg, Face::Borg),
            (self.dead, Face::Dead),
            (self.greedy, Face::Greedy),
            (self.paranoia, Face::Paranoia),
            (self.stoned, Face::Stoned),
            (self.tired, Face::Tired),
            (self.wired, Face::Wired),
            (self.youthful, Face::Youthful),
        ]
        .into_iter()
        .find_map(|(selected, face)| selected.then_some(face))
    }

    /// Message words joined by spaces, `None` when stdin should be read
    pub fn phrase(&self) -> Option<String> {
        if self.message.is_empty() {
            None
        } else {
            Some(self.message.join(" "))
        }
    }

    pub fn bone_config(&self, program: Program, settings: &Settings) -> BoneConfig {
        let mut config = match program {
            Program::Say => BoneConfig::default(),
            Program::Think => BoneConfig::thinking(),
        };
        settings.apply(&mut config);

        if let Some(name) = &self.file {
            config.figure = FigureSelection::Named(name.clone());
        }
        if self.random {
            config.figure = FigureSelection::Random;
        }
        if let Some(eyes) = self.eyes.as_deref().filter(|e| !e.is_empty()) {
            config.set_eyes(eyes);
        }
        if let Some(tongue) = self.tongue.as_deref().filter(|t| !t.is_empty()) {
            config.set_tongue(tongue);
        }
        if let Some(width) = self.width {
            config.balloon_width = width.get();
        }
        if self.no_wrap {
            config.word_wrap = false;
        }
        if let Some(face) = self.face() {
            config.set_eyes(face.eyes());
            config.set_tongue(face.tongue());
        }
        config
    }

    pub fn bold(&self, settings: &Settings) -> bool {
        self.bold || settings.output.bold.unwrap_or(false)
    }

    /// Decoration for plain (non-animated) output
    pub fn decoration<R: Rng + ?Sized>(&self, settings: &Settings, rng: &mut R) -> Decoration {
        let style = if self.aurora {
            ColorStyle::Aurora
        } else if self.rainbow {
            ColorStyle::Rainbow
        } else {
            settings.output.style.unwrap_or_default().into()
        };

        let mut decoration = Decoration::new(style, self.bold(settings));
        if style == ColorStyle::Aurora {
            decoration.set_base(rng.gen_range(0..256));
        }
        decoration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonesay_core::OutputStyle;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bonesay").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_clap_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_message_words_are_joined() {
        let args = parse(&["-e", "^^", "hello", "bony", "world"]);
        assert_eq!(args.phrase().as_deref(), Some("hello bony world"));
        assert_eq!(args.eyes.as_deref(), Some("^^"));
        assert_eq!(parse(&[]).phrase(), None);
    }

    #[test]
    fn test_zero_width_rejected_by_parser() {
        let argv = ["bonesay", "-W", "0", "hi"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_first_face_wins() {
        let args = parse(&["-y", "-d", "-b"]);
        assert_eq!(args.face(), Some(Face::Borg));
        let config = parse(&["-s"]).bone_config(Program::Say, &Settings::default());
        assert_eq!(config.eyes, "**");
        assert_eq!(config.tongue, "U ");
    }

    #[test]
    fn test_face_overrides_explicit_eyes() {
        let config = parse(&["-e", "^^", "-g"]).bone_config(Program::Say, &Settings::default());
        assert_eq!(config.eyes, "$$");
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings::parse(
            "[balloon]\nwidth = 20\n[figure]\nname = \"cat\"\neyes = \"^^\"\n",
        )
        .unwrap();

        let config = parse(&[]).bone_config(Program::Say, &settings);
        assert_eq!(config.balloon_width, 20);
        assert_eq!(config.figure, FigureSelection::Named("cat".to_string()));
        assert_eq!(config.eyes, "^^");

        let config = parse(&["-W", "60", "-f", "dog", "-n"]).bone_config(Program::Say, &settings);
        assert_eq!(config.balloon_width, 60);
        assert_eq!(config.figure, FigureSelection::Named("dog".to_string()));
        assert!(!config.word_wrap);
    }

    #[test]
    fn test_random_overrides_file() {
        let config =
            parse(&["-f", "cat", "--random"]).bone_config(Program::Say, &Settings::default());
        assert_eq!(config.figure, FigureSelection::Random);
    }

    #[test]
    fn test_think_program() {
        let config = parse(&[]).bone_config(Program::Think, &Settings::default());
        assert!(config.thinking);
        assert_eq!(config.thoughts, 'o');
    }

    #[test]
    fn test_decoration_resolution() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut settings = Settings::default();
        settings.output.style = Some(OutputStyle::Rainbow);

        let decoration = parse(&[]).decoration(&settings, &mut rng);
        assert_eq!(decoration.style, ColorStyle::Rainbow);
        assert!(!decoration.bold);

        let decoration = parse(&["--aurora", "--bold"]).decoration(&settings, &mut rng);
        assert_eq!(decoration.style, ColorStyle::Aurora);
        assert!(decoration.bold);
        assert!(decoration.base < 256);
    }
}
