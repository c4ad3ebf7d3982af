//! Classification of launch arguments into a charge source and grid spacing.
//!
//! Positional arguments follow a loose contract: an integer selects a built-in
//! scenario, a path to an existing file selects file loading (and wins over
//! any scenario), `-g<W>x<H>` sets the background grid spacing. Anything else
//! is reported and ignored.

use crate::error::FieldError;
use crate::scenario::Scenario;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default spacing of background grid lines, in pixels.
pub const DEFAULT_GRID_SPACING: usize = 50;

/// Where the initial charges come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchSource {
    Scenario(Scenario),
    File(PathBuf),
}

impl Default for LaunchSource {
    fn default() -> Self {
        LaunchSource::Scenario(Scenario::default())
    }
}

/// Horizontal and vertical spacing of the background grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpacing {
    pub x: usize,
    pub y: usize,
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            x: DEFAULT_GRID_SPACING,
            y: DEFAULT_GRID_SPACING,
        }
    }
}

impl FromStr for GridSpacing {
    type Err = FieldError;

    /// Parses `<W>x<H>` with both parts positive integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::InvalidGridSpacing(s.to_string());
        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let x = w.trim().parse::<usize>().map_err(|_| invalid())?;
        let y = h.trim().parse::<usize>().map_err(|_| invalid())?;
        if x == 0 || y == 0 {
            return Err(invalid());
        }
        Ok(Self { x, y })
    }
}

impl fmt::Display for GridSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// The result of classifying launch arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchArgs {
    pub source: LaunchSource,
    pub grid_spacing: GridSpacing,
    /// Human-readable notes about arguments that were ignored or corrected.
    pub warnings: Vec<String>,
}

impl LaunchArgs {
    /// Classifies `args` (program name excluded).
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scenario = Scenario::default();
        let mut file: Option<PathBuf> = None;
        let mut grid_spacing = GridSpacing::default();
        let mut warnings = Vec::new();

        for arg in args {
            let arg = arg.as_ref();
            if let Ok(index) = arg.parse::<i64>() {
                scenario = Scenario::from_index_or_default(index);
                if scenario.index() as i64 != index {
                    warnings.push(format!("scenario {index} does not exist, using scenario 0"));
                }
            } else if Path::new(arg).is_file() {
                file = Some(PathBuf::from(arg));
            } else if let Some(spacing) = arg.strip_prefix("-g") {
                match spacing.parse::<GridSpacing>() {
                    Ok(parsed) => grid_spacing = parsed,
                    Err(e) => warnings.push(e.to_string()),
                }
            } else {
                warnings.push(format!(
                    "unrecognized argument '{arg}' (not a scenario number or an existing file), using scenario 0"
                ));
            }
        }

        for warning in &warnings {
            log::warn!("{warning}");
        }

        let source = match file {
            Some(path) => LaunchSource::File(path),
            None => LaunchSource::Scenario(scenario),
        };
        Self {
            source,
            grid_spacing,
            warnings,
        }
    }
}
