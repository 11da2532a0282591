//! Court records, grid positions and skill levels.

use crate::models::court_layout::GridError;
use crate::models::RgbColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skill level assigned to a court (and to players on the roster).
///
/// Serialized lowercase (`"beginner"`); parsed case-insensitively so
/// roster entries written as `"Beginner"` load as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SkillLevel {
    /// Beginner courts (green)
    Beginner,
    /// Intermediate courts (orange)
    Intermediate,
    /// Advanced courts (red)
    Advanced,
}

impl SkillLevel {
    /// All levels in legend order.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Lowercase identifier used in data files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Title-cased label drawn on courts and in the legend.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Fill color used by the layout renderer.
    #[must_use]
    pub const fn color(self) -> RgbColor {
        match self {
            Self::Beginner => RgbColor::new(0x28, 0xa7, 0x45),
            Self::Intermediate => RgbColor::new(0xfd, 0x7e, 0x14),
            Self::Advanced => RgbColor::new(0xdc, 0x35, 0x45),
        }
    }

    /// Level used for the `index`-th generated court (cycles through [`Self::ALL`]).
    #[must_use]
    pub const fn cycled(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(GridError::UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for SkillLevel {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Zero-indexed `(row, col)` cell in the court grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Grid row (0-based)
    pub row: u32,
    /// Grid column (0-based)
    pub col: u32,
}

impl GridPosition {
    /// Creates a new position.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A court placed on the layout grid.
///
/// Courts are never physically removed; deleting one clears `active` so the
/// id stays reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourtRecord")]
pub struct Court {
    /// Unique, never reused identifier
    pub id: u32,
    /// Display name (unique among active courts)
    pub name: String,
    /// Skill level, determines the fill color
    pub level: SkillLevel,
    /// Cell occupied by the court
    pub position: GridPosition,
    /// False once the court has been deleted
    pub active: bool,
}

impl Court {
    /// Creates a new active court.
    pub fn new(id: u32, name: impl Into<String>, level: SkillLevel, position: GridPosition) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            position,
            active: true,
        }
    }
}

/// On-disk shape of a court, tolerant of the fields older files omit.
#[derive(Debug, Deserialize)]
struct CourtRecord {
    id: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    position: GridPosition,
    #[serde(default = "default_active")]
    active: bool,
}

const fn default_active() -> bool {
    true
}

impl TryFrom<CourtRecord> for Court {
    type Error = GridError;

    fn try_from(record: CourtRecord) -> Result<Self, Self::Error> {
        let level = match record.level {
            Some(level) => level.parse()?,
            None => return Err(GridError::UnknownLevel("<missing>".to_string())),
        };

        Ok(Self {
            id: record.id,
            name: record
                .name
                .unwrap_or_else(|| format!("Court {}", record.id)),
            level,
            position: record.position,
            active: record.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_parse_case_insensitive() {
        assert_eq!("beginner".parse::<SkillLevel>().unwrap(), SkillLevel::Beginner);
        assert_eq!("Intermediate".parse::<SkillLevel>().unwrap(), SkillLevel::Intermediate);
        assert_eq!(" ADVANCED ".parse::<SkillLevel>().unwrap(), SkillLevel::Advanced);
    }

    #[test]
    fn test_skill_level_unknown() {
        let err = "expert".parse::<SkillLevel>().unwrap_err();
        assert!(matches!(err, GridError::UnknownLevel(ref s) if s == "expert"));
    }

    #[test]
    fn test_skill_level_cycle() {
        let levels: Vec<_> = (0..4).map(SkillLevel::cycled).collect();
        assert_eq!(
            levels,
            vec![
                SkillLevel::Beginner,
                SkillLevel::Intermediate,
                SkillLevel::Advanced,
                SkillLevel::Beginner
            ]
        );
    }

    #[test]
    fn test_court_serializes_lowercase_level() {
        let court = Court::new(3, "Court 3", SkillLevel::Intermediate, GridPosition::new(1, 0));
        let json = serde_json::to_value(&court).unwrap();
        assert_eq!(json["level"], "intermediate");
        assert_eq!(json["position"]["row"], 1);
        assert_eq!(json["active"], true);
    }

    #[test]
    fn test_court_defaults_missing_active_and_position() {
        let court: Court =
            serde_json::from_str(r#"{"id": 7, "name": "Court 7", "level": "advanced"}"#).unwrap();
        assert!(court.active);
        assert_eq!(court.position, GridPosition::new(0, 0));
        assert_eq!(court.level, SkillLevel::Advanced);
    }

    #[test]
    fn test_court_unknown_level_fails_load() {
        let err = serde_json::from_str::<Court>(
            r#"{"id": 1, "name": "Court 1", "level": "pro", "position": {"row": 0, "col": 0}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown court level"));
    }

    #[test]
    fn test_court_missing_level_fails_load() {
        let err = serde_json::from_str::<Court>(r#"{"id": 1, "name": "Court 1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown court level"));
    }
}
