//! Shared pieces of the terminal demo: argument parsing and frame
//! rendering.

use std::fmt;
use std::fmt::Write as _;

use pathviz_mapgen::Preset;
use pathviz_paths::Algorithm;
use pathviz_replay::{DEFAULT_SPEED, Session, Stats, Track};

pub const USAGE: &str = "\
pathviz - animate a grid search in the terminal

USAGE:
    pathviz [ALGORITHM] [PRESET] [OPTIONS]

ARGS:
    ALGORITHM    bfs | dfs | dijkstra | astar       (default: bfs)
                 A path length marked * may not be the shortest.
    PRESET       empty | small-maze | recursive-division | prims | ellers | random
                                                    (default: empty)

OPTIONS:
    --compare <ALGORITHM>   Race ALGORITHM against a second one side by side
    --speed <N>             Raw speed, 10 (slow) to 200 (fast)   (default: 50)
    --seed <N>              Seed for generated presets
    -h, --help              Print this help
";

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub algorithm: Algorithm,
    pub preset: Preset,
    pub compare: Option<Algorithm>,
    pub speed: u32,
    pub seed: Option<u64>,
    pub help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bfs,
            preset: Preset::Empty,
            compare: None,
            speed: DEFAULT_SPEED,
            seed: None,
            help: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue(String),
    BadValue { flag: String, value: String },
    Unexpected(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::BadValue { flag, value } => write!(f, "invalid value for {flag}: {value}"),
            Self::Unexpected(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl Args {
    /// Parse arguments, not including the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut out = Args::default();
        let mut positional = 0;
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "-h" | "--help" => out.help = true,
                "--compare" | "--speed" | "--seed" => {
                    let value = it.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                    let bad = || ArgsError::BadValue {
                        flag: arg.clone(),
                        value: value.clone(),
                    };
                    match arg.as_str() {
                        "--compare" => out.compare = Some(value.parse().map_err(|_| bad())?),
                        "--speed" => out.speed = value.parse().map_err(|_| bad())?,
                        _ => out.seed = Some(value.parse().map_err(|_| bad())?),
                    }
                }
                _ if arg.starts_with('-') => return Err(ArgsError::Unexpected(arg)),
                _ => {
                    let bad = || ArgsError::BadValue {
                        flag: if positional == 0 { "ALGORITHM" } else { "PRESET" }.to_string(),
                        value: arg.clone(),
                    };
                    match positional {
                        0 => out.algorithm = arg.parse().map_err(|_| bad())?,
                        1 => out.preset = arg.parse().map_err(|_| bad())?,
                        _ => return Err(ArgsError::Unexpected(arg)),
                    }
                    positional += 1;
                }
            }
        }
        Ok(out)
    }
}

fn stats_line(label: &str, track: &Track) -> String {
    let Stats { visited, path_len } = track.stats();
    let path = match path_len {
        None => "-".to_string(),
        Some(0) => "none".to_string(),
        Some(n) if track.algorithm().is_optimal() => n.to_string(),
        Some(n) => format!("{n}*"),
    };
    let progress = track
        .sequencer()
        .map_or(0.0, |s| s.progress() * 100.0);
    format!(
        "{label:<10} visited {visited:>4}  path {path:>4}  {progress:>5.1}%",
        label = format!("{label}:"),
    )
}

/// Render the session as text: one grid, or two side by side in
/// comparison mode, followed by a stats line per track.
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    if session.is_comparison() {
        let a = session.grid_a().to_string();
        let b = session.grid_b().to_string();
        for (la, lb) in a.lines().zip(b.lines()) {
            let _ = writeln!(out, "{la}  {lb}");
        }
        let _ = writeln!(
            out,
            "{}",
            stats_line(session.algorithm_a().label(), session.track_a())
        );
        let _ = writeln!(
            out,
            "{}",
            stats_line(session.algorithm_b().label(), session.track_b())
        );
    } else {
        out.push_str(&session.grid().to_string());
        let _ = writeln!(
            out,
            "{}",
            stats_line(session.algorithm().label(), session.track())
        );
    }
    let _ = writeln!(
        out,
        "{:?} at {} ms/step",
        session.state(),
        session.speed().delay_ms()
    );
    out
}
