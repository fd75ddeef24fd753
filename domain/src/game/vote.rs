//! Votes and vote tallies
//!
//! Each active player casts exactly one vote per voting round. Self-votes are
//! allowed. A vote whose agent call degraded, or whose target is not an
//! active player, is recorded as an abstention and does not count.

use super::player::PlayerId;
use super::tie_break::TieBreakPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single recorded vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voting_round: u32,
    pub voter_id: PlayerId,
    /// `None` is an abstention
    pub target: Option<PlayerId>,
    pub rationale: String,
    pub confidence: u8,
    pub degraded: bool,
}

impl Vote {
    pub fn is_abstention(&self) -> bool {
        self.target.is_none()
    }
}

/// Vote counts per target for one voting round
///
/// # Example
///
/// ```
/// use imposter_domain::game::{PlayerId, TallyOutcome, TieBreakPolicy, VoteTally};
///
/// let mut tally = VoteTally::new();
/// tally.record(&PlayerId::from("Player_2"));
/// tally.record(&PlayerId::from("Player_2"));
/// tally.record(&PlayerId::from("Player_4"));
///
/// let order: Vec<PlayerId> = (0..4).map(PlayerId::from_seat).collect();
/// assert_eq!(
///     tally.resolve(TieBreakPolicy::NoElimination, &order),
///     TallyOutcome::Eliminate(PlayerId::from("Player_2"))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally {
    counts: BTreeMap<PlayerId, usize>,
}

/// How a voting round resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyOutcome {
    /// A single candidate leads, or the tie-break picked one
    Eliminate(PlayerId),
    /// Tied leaders and the policy eliminates nobody
    Tie(Vec<PlayerId>),
    /// Every vote was an abstention
    NoVotes,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally the non-abstaining votes of a round
    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> Self {
        let mut tally = Self::new();
        for vote in votes {
            if let Some(target) = &vote.target {
                tally.record(target);
            }
        }
        tally
    }

    pub fn record(&mut self, target: &PlayerId) {
        *self.counts.entry(target.clone()).or_insert(0) += 1;
    }

    pub fn count(&self, target: &PlayerId) -> usize {
        self.counts.get(target).copied().unwrap_or(0)
    }

    /// Total counted (non-abstaining) votes
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &BTreeMap<PlayerId, usize> {
        &self.counts
    }

    /// Candidates sharing the highest count, in seat order
    pub fn leaders(&self, seat_order: &[PlayerId]) -> Vec<PlayerId> {
        let Some(max) = self.counts.values().copied().max() else {
            return Vec::new();
        };
        let mut leaders: Vec<PlayerId> = self
            .counts
            .iter()
            .filter(|(_, count)| **count == max)
            .map(|(id, _)| id.clone())
            .collect();
        leaders.sort_by_key(|id| seat_index(seat_order, id));
        leaders
    }

    /// Resolve the round: strict plurality wins, ties go through `policy`
    pub fn resolve(&self, policy: TieBreakPolicy, seat_order: &[PlayerId]) -> TallyOutcome {
        let leaders = self.leaders(seat_order);
        match leaders.len() {
            0 => TallyOutcome::NoVotes,
            1 => TallyOutcome::Eliminate(leaders[0].clone()),
            _ => match policy {
                TieBreakPolicy::NoElimination => TallyOutcome::Tie(leaders),
                TieBreakPolicy::FirstInPlayerOrder => TallyOutcome::Eliminate(leaders[0].clone()),
            },
        }
    }
}

fn seat_index(seat_order: &[PlayerId], id: &PlayerId) -> usize {
    seat_order
        .iter()
        .position(|seat| seat == id)
        .unwrap_or(usize::MAX)
}
