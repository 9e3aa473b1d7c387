use std::fmt;
use std::str::FromStr;

/// A named starting layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Preset {
    /// No walls.
    #[default]
    Empty,
    /// A wall on every cell whose row and column are both even.
    SmallMaze,
    RecursiveDivision,
    Prims,
    Ellers,
    /// Scattered walls, re-rolled until solvable.
    Random,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Self::Empty,
        Self::SmallMaze,
        Self::RecursiveDivision,
        Self::Prims,
        Self::Ellers,
        Self::Random,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::SmallMaze => "small-maze",
            Self::RecursiveDivision => "recursive-division",
            Self::Prims => "prims",
            Self::Ellers => "ellers",
            Self::Random => "random",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::SmallMaze => "Small maze",
            Self::RecursiveDivision => "Recursive division",
            Self::Prims => "Prim's",
            Self::Ellers => "Eller's",
            Self::Random => "Random",
        }
    }

    /// Whether the layout depends on the generator's RNG.
    pub const fn is_random(self) -> bool {
        !matches!(self, Self::Empty | Self::SmallMaze)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A preset name that [`Preset::from_str`] does not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown preset \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '\''))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "empty" | "blank" => Ok(Self::Empty),
            "smallmaze" | "small" => Ok(Self::SmallMaze),
            "recursivedivision" | "division" => Ok(Self::RecursiveDivision),
            "prims" | "prim" => Ok(Self::Prims),
            "ellers" | "eller" => Ok(Self::Ellers),
            "random" => Ok(Self::Random),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}
