//! Canonical ladder records shared by the rule modules.
//!
//! The data-access layer is expected to normalize whatever shape the backing
//! store returns into a [`PlayerLadderEntry`] before calling into this crate.

use crate::error::LeagueError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skill tier a ladder covers, keyed by Fargo rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LadderName {
    #[serde(rename = "499-under")]
    Under500,
    #[serde(rename = "500-549")]
    From500To549,
    #[serde(rename = "550-plus")]
    From550,
}

impl LadderName {
    pub const ALL: [LadderName; 3] = [Self::Under500, Self::From500To549, Self::From550];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Under500 => "499-under",
            Self::From500To549 => "500-549",
            Self::From550 => "550-plus",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Under500 => "499 & Under",
            Self::From500To549 => "500 - 549",
            Self::From550 => "550+",
        }
    }

    /// Ladder a player with the given Fargo rating belongs on.
    pub fn for_rating(rating: u32) -> Self {
        match rating {
            0..=499 => Self::Under500,
            500..=549 => Self::From500To549,
            _ => Self::From550,
        }
    }
}

impl fmt::Display for LadderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LadderName {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LeagueError::UnknownLadder(wanted.to_string()))
    }
}

/// The kind of match a challenge produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeType {
    Challenge,
    Smackdown,
    Smackback,
    FastTrack,
}

impl ChallengeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Challenge => "challenge",
            Self::Smackdown => "smackdown",
            Self::Smackback => "smackback",
            Self::FastTrack => "fast-track",
        }
    }
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's standing on one ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLadderEntry {
    /// Ladder slot id; `None` for placeholder slots.
    #[serde(default)]
    pub player_id: Option<String>,
    /// Stable account id of the person holding the slot.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: String,
    pub ladder_name: LadderName,
    /// Rank on the ladder, 1 = top.
    pub position: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub immunity_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub smackback_eligible_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fast_track_challenges_remaining: u32,
    #[serde(default)]
    pub fast_track_expiration_date: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl PlayerLadderEntry {
    /// An active, unlinked slot with no grants.
    pub fn new(name: impl Into<String>, ladder_name: LadderName, position: u32) -> Self {
        Self {
            player_id: None,
            user_id: None,
            email: None,
            name: name.into(),
            ladder_name,
            position,
            is_active: true,
            immunity_until: None,
            smackback_eligible_until: None,
            fast_track_challenges_remaining: 0,
            fast_track_expiration_date: None,
        }
    }

    /// Attach the account that holds this slot.
    pub fn linked(mut self, user_id: impl Into<String>, email: impl Into<String>) -> Self {
        let user_id = user_id.into();
        if self.player_id.is_none() {
            self.player_id = Some(format!("{}:{}", self.ladder_name, user_id));
        }
        self.user_id = Some(user_id);
        self.email = Some(email.into());
        self
    }

    /// Both a stable account id and an email must be present.
    pub fn has_linked_account(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.user_id) && present(&self.email)
    }

    pub fn is_immune(&self, now: DateTime<Utc>) -> bool {
        self.immunity_until.is_some_and(|until| now < until)
    }

    pub fn has_smackback(&self, now: DateTime<Utc>) -> bool {
        self.smackback_eligible_until.is_some_and(|until| now < until)
    }

    pub fn has_fast_track(&self, now: DateTime<Utc>) -> bool {
        self.fast_track_challenges_remaining > 0
            && self.fast_track_expiration_date.is_some_and(|until| now < until)
    }

    /// Case-insensitive email match, falling back to an identical slot id.
    pub fn same_person(&self, other: &PlayerLadderEntry) -> bool {
        match (self.email.as_deref(), other.email.as_deref()) {
            (Some(a), Some(b)) if !a.trim().is_empty() => {
                return a.trim().eq_ignore_ascii_case(b.trim());
            }
            _ => {}
        }
        matches!((&self.player_id, &other.player_id), (Some(a), Some(b)) if a == b)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Vacant slot"
        } else {
            &self.name
        }
    }
}
