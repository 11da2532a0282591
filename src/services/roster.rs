//! Player sign-up and removal for club nights.

use crate::models::{
    AuditEntry, AuditSink, CourtLayout, ListKind, Player, Roster, RosterError, RosterLimits,
    SkillLevel, UserType, Weekday,
};
use serde::Serialize;
use tracing::info;

/// Roster mutations with capacity limits and auditing.
pub struct RosterService<'a> {
    roster: &'a mut Roster,
    limits: RosterLimits,
    audit: &'a mut dyn AuditSink,
}

impl<'a> RosterService<'a> {
    /// Wraps a roster and the sink its changes are recorded in.
    pub fn new(roster: &'a mut Roster, limits: RosterLimits, audit: &'a mut dyn AuditSink) -> Self {
        Self {
            roster,
            limits,
            audit,
        }
    }

    /// Signs a player up for `day`.
    ///
    /// The player lands on the main list while it has room, then on the
    /// waitlist. Returns the list the player was added to.
    pub fn add_player(
        &mut self,
        day: Weekday,
        name: &str,
        level: SkillLevel,
    ) -> Result<ListKind, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }

        let limits = self.limits;
        let day_roster = self.roster.day_mut(day)?;
        let kind = day_roster
            .placement_for_new(&limits)
            .ok_or(RosterError::DayFull {
                day,
                max_players: limits.max_players,
                max_waitlist: limits.max_waitlist,
            })?;
        day_roster.list_mut(kind).push(Player::new(name, level));

        info!(%day, name, %kind, "player added");
        self.audit.append(AuditEntry::now(
            "Added",
            format!("{name} ({}) - {day}", level.title()),
            UserType::User,
        ));
        Ok(kind)
    }

    /// Removes the first player called `name` from the chosen list.
    ///
    /// The name is trimmed the same way sign-up trims it.
    pub fn remove_player(
        &mut self,
        day: Weekday,
        name: &str,
        kind: ListKind,
    ) -> Result<Player, RosterError> {
        let name = name.trim();
        let list = self.roster.day_mut(day)?.list_mut(kind);
        let index = list
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| RosterError::PlayerNotFound {
                name: name.to_string(),
                day,
                list: kind,
            })?;
        let player = list.remove(index);

        info!(%day, name, %kind, "player removed");
        self.audit.append(AuditEntry::now(
            "Removed",
            format!("{name} from {day} {kind}"),
            UserType::User,
        ));
        Ok(player)
    }
}

/// Headline numbers for the whole club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClubStats {
    /// Players on main lists across all days
    pub total_players: usize,
    /// Players on waitlists across all days
    pub total_waitlisted: usize,
    /// Courts not deleted
    pub active_courts: usize,
}

impl ClubStats {
    /// Collects stats from the roster and layout.
    #[must_use]
    pub fn collect(roster: &Roster, layout: &CourtLayout) -> Self {
        Self {
            total_players: roster.total_players(),
            total_waitlisted: roster.total_waitlisted(),
            active_courts: layout.active_courts().count(),
        }
    }
}
