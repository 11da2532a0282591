//! Weekly player roster: a main list and a waitlist per club night.

use crate::constants::{DEFAULT_MAX_PLAYERS, DEFAULT_MAX_WAITLIST};
use crate::models::court::SkillLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Roster validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Player name was blank.
    #[error("player name cannot be empty")]
    EmptyName,
    /// Both the list and the waitlist are at capacity.
    #[error("both lists are full for {day} ({max_players} players, {max_waitlist} waitlisted)")]
    DayFull {
        /// Day that is full
        day: Weekday,
        /// Main list capacity
        max_players: usize,
        /// Waitlist capacity
        max_waitlist: usize,
    },
    /// Day name is not recognised or not a club night.
    #[error("'{0}' is not a club day")]
    UnknownDay(String),
    /// No player of that name on the chosen list.
    #[error("'{name}' is not on the {day} {list}")]
    PlayerNotFound {
        /// Requested name
        name: String,
        /// Day searched
        day: Weekday,
        /// List searched
        list: ListKind,
    },
}

/// Day of the week, serialized by its English name ("Monday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    const NAMES: [(Self, &'static str); 7] = [
        (Self::Monday, "Monday"),
        (Self::Tuesday, "Tuesday"),
        (Self::Wednesday, "Wednesday"),
        (Self::Thursday, "Thursday"),
        (Self::Friday, "Friday"),
        (Self::Saturday, "Saturday"),
        (Self::Sunday, "Sunday"),
    ];

    /// English day name.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(day, _)| *day == self)
            .map_or("", |(_, name)| name)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(wanted))
            .map(|(day, _)| *day)
            .ok_or_else(|| RosterError::UnknownDay(s.to_string()))
    }
}

/// Which of a day's two lists a player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// The main player list
    Players,
    /// The overflow waitlist
    Waitlist,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Players => f.write_str("list"),
            Self::Waitlist => f.write_str("waitlist"),
        }
    }
}

/// A registered player. Stored on disk as a `[name, level]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlayerRecord", into = "(String, SkillLevel)")]
pub struct Player {
    /// Player name
    pub name: String,
    /// Self-reported skill level
    pub level: SkillLevel,
}

impl Player {
    /// Creates a player.
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// Accepts both the current `[name, level]` pairs and the older bare names.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlayerRecord {
    Rated(String, SkillLevel),
    Named(String),
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        match record {
            PlayerRecord::Rated(name, level) => Self::new(name, level),
            PlayerRecord::Named(name) => Self::new(name, SkillLevel::Beginner),
        }
    }
}

impl From<Player> for (String, SkillLevel) {
    fn from(player: Player) -> Self {
        (player.name, player.level)
    }
}

/// Capacity limits applied to every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterLimits {
    /// Main list capacity
    pub max_players: usize,
    /// Waitlist capacity
    pub max_waitlist: usize,
}

impl Default for RosterLimits {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            max_waitlist: DEFAULT_MAX_WAITLIST,
        }
    }
}

/// One day's sign-ups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRoster {
    /// Confirmed players, in sign-up order
    #[serde(rename = "Players", default)]
    pub players: Vec<Player>,
    /// Overflow players, in sign-up order
    #[serde(rename = "Waitlist", default)]
    pub waitlist: Vec<Player>,
}

impl DayRoster {
    /// The requested list.
    #[must_use]
    pub fn list(&self, kind: ListKind) -> &[Player] {
        match kind {
            ListKind::Players => &self.players,
            ListKind::Waitlist => &self.waitlist,
        }
    }

    /// Mutable access to the requested list.
    pub fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Player> {
        match kind {
            ListKind::Players => &mut self.players,
            ListKind::Waitlist => &mut self.waitlist,
        }
    }

    /// List a new sign-up lands on, or `None` when both are full.
    #[must_use]
    pub fn placement_for_new(&self, limits: &RosterLimits) -> Option<ListKind> {
        if self.players.len() < limits.max_players {
            Some(ListKind::Players)
        } else if self.waitlist.len() < limits.max_waitlist {
            Some(ListKind::Waitlist)
        } else {
            None
        }
    }
}

/// The roster document persisted as `player_list.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    days: BTreeMap<Weekday, DayRoster>,
}

impl Roster {
    /// First-run roster: empty lists for the three club nights.
    #[must_use]
    pub fn seed() -> Self {
        let days = [Weekday::Monday, Weekday::Tuesday, Weekday::Thursday]
            .into_iter()
            .map(|day| (day, DayRoster::default()))
            .collect();
        Self { days }
    }

    /// Club days in week order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DayRoster)> {
        self.days.iter().map(|(day, roster)| (*day, roster))
    }

    /// A day's sign-ups.
    pub fn day(&self, day: Weekday) -> Result<&DayRoster, RosterError> {
        self.days
            .get(&day)
            .ok_or_else(|| RosterError::UnknownDay(day.to_string()))
    }

    /// Mutable access to a day's sign-ups.
    pub fn day_mut(&mut self, day: Weekday) -> Result<&mut DayRoster, RosterError> {
        self.days
            .get_mut(&day)
            .ok_or_else(|| RosterError::UnknownDay(day.to_string()))
    }

    /// Players on main lists across all days.
    #[must_use]
    pub fn total_players(&self) -> usize {
        self.days.values().map(|d| d.players.len()).sum()
    }

    /// Players on waitlists across all days.
    #[must_use]
    pub fn total_waitlisted(&self) -> usize {
        self.days.values().map(|d| d.waitlist.len()).sum()
    }
}
