use clap::{Parser, Subcommand};
use config::Config;
use std::io;
use tabseq::command::{
    groove_commands, instrument_pairs, picking_commands, picking_setup, track_sequence_command,
    GrooveOptions,
};
use tabseq::TabError as LibTabError;
use tabseq::{FingerpickingParams, PercussionParams};

mod config;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tabseq=info"))
        .init();

    // args
    let args = CliArgs::parse();

    // read local config
    let local_config = Config::read_config()?;

    let commands = match args.command {
        Command::Groove {
            name,
            body,
            beats_per_bar,
            level,
            rtime,
            rvolume,
            clear,
            seq_size,
        } => {
            let params = PercussionParams {
                beats_per_bar: beats_per_bar
                    .or(local_config.get_beats_per_bar())
                    .unwrap_or(4),
                max_level: level.or(local_config.get_max_level()).unwrap_or(9),
            };
            let opts = GrooveOptions {
                time_randomization: rtime,
                volume_randomization: rvolume,
                seq_clear: clear,
                seq_size,
            };
            let pairs = instrument_pairs(&body);
            if pairs.is_empty() {
                let err = AppError::ConfigError(format!(
                    "No instrument/tab pairs in {body:?}"
                ));
                return Err(err);
            }
            groove_commands(&name, &pairs, &params, &opts)?
        }
        Command::Track {
            track,
            tab,
            beats_per_bar,
            level,
            in_begin_block,
        } => {
            let params = PercussionParams {
                beats_per_bar: beats_per_bar
                    .or(local_config.get_beats_per_bar())
                    .unwrap_or(4),
                max_level: level.or(local_config.get_max_level()).unwrap_or(9),
            };
            vec![track_sequence_command(&track, &tab, &params, in_begin_block)?]
        }
        Command::Pick {
            pattern,
            tabs,
            track,
            beats_per_bar,
            beat_division,
            meter,
            in_begin_block,
            setup,
        } => {
            let meter = meter.map(|m| parse_meter(&m)).transpose()?;
            let params = FingerpickingParams {
                beats_per_bar: beats_per_bar
                    .or(meter.map(|(numerator, _)| numerator))
                    .or(local_config.get_beats_per_bar())
                    .unwrap_or(4),
                beat_division: beat_division
                    .or(meter.map(|(_, denominator)| denominator))
                    .unwrap_or(4),
            };
            // the pattern name doubles as the tab when no rows are given
            let rows = if tabs.is_empty() {
                vec![pattern.clone()]
            } else {
                tabs
            };
            let mut commands = picking_commands(&track, &pattern, &rows, &params, in_begin_block)?;
            if setup {
                let voice = local_config
                    .get_voice()
                    .unwrap_or_else(|| "NylonGuitar".to_string());
                commands.extend(picking_setup(&track, &voice, None, None));
            }
            commands
        }
    };

    for command in commands {
        println!("{command}");
    }
    Ok(())
}

fn parse_meter(meter: &str) -> Result<(u32, u32), AppError> {
    let mut parts = meter.splitn(2, '/');
    let numerator = parts.next().and_then(|part| part.parse().ok());
    let denominator = parts.next().and_then(|part| part.parse().ok());
    match (numerator, denominator) {
        (Some(numerator), Some(denominator)) => Ok((numerator, denominator)),
        _ => Err(AppError::ConfigError(format!(
            "Invalid meter {meter:?}, expected n/d"
        ))),
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Define a percussion groove from instrument/tab pairs.
    Groove {
        /// Groove name to define.
        name: String,
        /// Instrument and tab pairs, e.g. "Kick |9-9-| Snare |--9-|".
        body: String,
        /// Beats per bar.
        #[arg(long)]
        beats_per_bar: Option<u32>,
        /// Max volume value of the tab digits.
        #[arg(long)]
        level: Option<u8>,
        /// Time randomizer pass-through.
        #[arg(long, default_value_t = 0)]
        rtime: u32,
        /// Volume randomizer pass-through.
        #[arg(long, default_value_t = 0)]
        rvolume: u32,
        /// Issue a leading SeqClear.
        #[arg(long, default_value_t = false)]
        clear: bool,
        /// Issue SeqSize with the given size.
        #[arg(long, default_value_t = 0)]
        seq_size: u32,
    },
    /// Emit a single track-level percussion sequence command.
    Track {
        /// Target track, e.g. Drum-Kick.
        track: String,
        /// Percussion tab.
        tab: String,
        /// Beats per bar.
        #[arg(long)]
        beats_per_bar: Option<u32>,
        /// Max volume value of the tab digits.
        #[arg(long)]
        level: Option<u8>,
        /// The command is issued inside a Begin/End block.
        #[arg(long, default_value_t = false)]
        in_begin_block: bool,
    },
    /// Define a fingerpicking pattern from per-string tab rows.
    Pick {
        /// Pattern name, also used as the tab when no rows are given.
        pattern: String,
        /// Per-string tab rows.
        tabs: Vec<String>,
        /// Target track.
        #[arg(long, default_value = "Plectrum")]
        track: String,
        /// Beats per bar.
        #[arg(long)]
        beats_per_bar: Option<u32>,
        /// Beat length denominator (8, 4).
        #[arg(long)]
        beat_division: Option<u32>,
        /// Time signature n/d resolving both beat parameters.
        #[arg(long)]
        meter: Option<String>,
        /// The command is issued inside a Begin/End block.
        #[arg(long, default_value_t = false)]
        in_begin_block: bool,
        /// Also emit default voice and volume setup.
        #[arg(long, default_value_t = false)]
        setup: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("tab error: {0}")]
    TabError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<LibTabError> for AppError {
    fn from(error: LibTabError) -> Self {
        Self::TabError(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meter() {
        assert_eq!(parse_meter("3/4").unwrap(), (3, 4));
        assert_eq!(parse_meter("6/8").unwrap(), (6, 8));
        assert!(parse_meter("3-4").is_err());
        assert!(parse_meter("waltz").is_err());
    }
}
