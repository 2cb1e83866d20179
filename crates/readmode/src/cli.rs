// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use readmode_core::{Palette, Selection};

#[derive(Debug, Parser)]
#[command(name = "readmode", version, about = "Read Mode — tint the screen, rest the eyes.")]
pub struct Args {
    /// Override IPC socket path (default: $XDG_RUNTIME_DIR/readmode/readmode.sock)
    #[arg(long)]
    pub socket: Option<PathBuf>,

    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/readmode/readmode.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Show daemon status and the layers being painted
    Status,

    /// Turn the overlay on
    On,

    /// Turn the overlay off
    Off,

    /// Flip the overlay on/off
    Toggle,

    /// Select a tint colour: none, custom, or a preset name (e.g. soft-beige)
    Colour { selection: Selection },

    /// Select by colour dropdown position (0 = none, last = custom)
    Pick { position: u32 },

    /// Set the custom colour (#RRGGBB) and select it
    Custom { hex: String },

    /// Set intensity, 0..=100
    Intensity { value: u32 },

    /// Set brightness, 0..=100
    Brightness { value: u32 },

    /// Share one intensity/brightness pair across all colours
    Shared { state: Switch },

    /// Print the full settings snapshot
    Settings,

    /// Print the ARGB layers a render target should paint
    Layers,

    /// Follow changes as they happen (stream of events)
    Watch,

    /// List dropdown entries for a palette (no daemon needed)
    Palette {
        #[arg(long, value_enum, default_value_t = Palette::Soft)]
        palette: Palette,
    },

    /// Show button swatch and contrast colours for a hex colour (no daemon needed)
    Swatch { hex: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use readmode_core::PresetColour;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn colour_parses_preset_names() {
        let args = Args::try_parse_from(["readmode", "colour", "warm-sepia"]).unwrap();
        match args.cmd {
            Cmd::Colour { selection } => {
                assert_eq!(selection, Selection::Preset(PresetColour::WarmSepia))
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Args::try_parse_from(["readmode", "colour", "teal"]).is_err());
    }

    #[test]
    fn palette_defaults_to_soft() {
        let args = Args::try_parse_from(["readmode", "palette"]).unwrap();
        assert!(matches!(args.cmd, Cmd::Palette { palette: Palette::Soft }));
    }
}
