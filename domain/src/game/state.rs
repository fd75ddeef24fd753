//! The `Game` aggregate
//!
//! Owns the roster, the append-only clue, vote and elimination logs, and the
//! current phase. Every mutation is checked against the phase so that the
//! controllers cannot record out of order.

use super::clue::{Clue, PublicClue};
use super::config::GameConfig;
use super::context::{CastVote, ClueContext, VoteContext};
use super::elimination::Elimination;
use super::outcome::{GameResult, WinCheck, detection_accuracy};
use super::phase::GamePhase;
use super::player::{Player, PlayerId, Role};
use super::tie_break::TieBreakPolicy;
use super::vote::{TallyOutcome, Vote, VoteTally};
use crate::core::error::DomainError;
use crate::core::model::ModelRegistry;
use rand::Rng;

/// A single game instance (Aggregate Root)
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    phase: GamePhase,
    clues: Vec<Clue>,
    votes: Vec<Vote>,
    eliminations: Vec<Elimination>,
    result: Option<GameResult>,
}

impl Game {
    /// Validate the configuration and deal roles and models
    pub fn setup<R: Rng + ?Sized>(
        config: GameConfig,
        registry: &ModelRegistry,
        rng: &mut R,
    ) -> Result<Self, DomainError> {
        config.validate(registry)?;

        let imposter_seats =
            config
                .role_assignment
                .imposter_seats(config.num_players, config.num_imposters, rng);
        let models = config
            .model_strategy
            .assign(config.num_players, &imposter_seats, rng);

        let players = models
            .into_iter()
            .enumerate()
            .map(|(seat, model)| {
                let role = if imposter_seats.contains(&seat) {
                    Role::Imposter
                } else {
                    Role::NonImposter
                };
                Player::new(PlayerId::from_seat(seat), model, role, config.word.as_str())
            })
            .collect();

        Ok(Self {
            config,
            players,
            phase: GamePhase::Setup,
            clues: Vec::new(),
            votes: Vec::new(),
            eliminations: Vec::new(),
            result: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn eliminations(&self) -> &[Elimination] {
        &self.eliminations
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Fixed call order: every player by seat
    pub fn seat_order(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id().clone()).collect()
    }

    /// Active players in seat order
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.id().clone())
            .collect()
    }

    pub fn imposters(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_imposter())
            .map(|p| p.id().clone())
            .collect()
    }

    /// Eliminated players in elimination order
    pub fn eliminated_players(&self) -> Vec<PlayerId> {
        self.eliminations
            .iter()
            .filter_map(|e| e.eliminated.clone())
            .collect()
    }

    pub fn win_check(&self) -> WinCheck {
        WinCheck::evaluate(&self.players)
    }

    /// Move to the next phase
    pub fn advance(&mut self, next: GamePhase) -> Result<(), DomainError> {
        if self.phase.is_terminal() {
            return Err(DomainError::GameComplete);
        }
        if !self.phase.can_transition_to(
            next,
            self.config.num_clue_rounds,
            self.config.num_voting_rounds,
        ) {
            return Err(DomainError::InvalidTransition {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        self.phase = next;
        Ok(())
    }

    fn current_clue_round(&self) -> Result<u32, DomainError> {
        match self.phase {
            GamePhase::ClueRound(round) => Ok(round),
            GamePhase::Result => Err(DomainError::GameComplete),
            other => Err(DomainError::WrongPhase(other.to_string())),
        }
    }

    fn current_voting_round(&self) -> Result<u32, DomainError> {
        match self.phase {
            GamePhase::VotingRound(round) => Ok(round),
            GamePhase::Result => Err(DomainError::GameComplete),
            other => Err(DomainError::WrongPhase(other.to_string())),
        }
    }

    fn active_player(&self, id: &PlayerId) -> Result<&Player, DomainError> {
        let player = self
            .player(id)
            .ok_or_else(|| DomainError::UnknownPlayer(id.to_string()))?;
        if !player.is_active() {
            return Err(DomainError::PlayerEliminated(id.to_string()));
        }
        Ok(player)
    }

    fn active_player_mut(&mut self, id: &PlayerId) -> Result<&mut Player, DomainError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| DomainError::UnknownPlayer(id.to_string()))?;
        if !player.is_active() {
            return Err(DomainError::PlayerEliminated(id.to_string()));
        }
        Ok(player)
    }

    fn public_clues(&self) -> Vec<PublicClue> {
        self.clues.iter().map(Clue::public_view).collect()
    }

    /// Snapshot of what `player_id` may see before giving a clue now
    pub fn clue_context(&self, player_id: &PlayerId) -> Result<ClueContext, DomainError> {
        let round = self.current_clue_round()?;
        let player = self.active_player(player_id)?;
        Ok(ClueContext {
            player_id: player.id().clone(),
            role: player.role(),
            secret_word: player.secret_word().map(str::to_string),
            category: self.config.category.clone(),
            total_players: self.players.len(),
            num_imposters: self.config.num_imposters,
            round,
            total_rounds: self.config.num_clue_rounds,
            visible_clues: self.public_clues(),
            own_answers: player.answers().to_vec(),
        })
    }

    /// Append a clue for the current clue round and return it as recorded
    ///
    /// A civilian's word hypothesis is dropped.
    pub fn record_clue(&mut self, mut clue: Clue) -> Result<&Clue, DomainError> {
        let round = self.current_clue_round()?;
        if clue.round != round {
            return Err(DomainError::WrongPhase(format!(
                "clue for round {} during {}",
                clue.round, self.phase
            )));
        }
        let already_given = self
            .clues
            .iter()
            .any(|c| c.round == round && c.player_id == clue.player_id);
        if already_given {
            return Err(DomainError::WrongPhase(format!(
                "{} already gave a clue in round {}",
                clue.player_id, round
            )));
        }

        let player = self.active_player_mut(&clue.player_id)?;
        if !player.is_imposter() {
            clue.word_hypothesis = None;
        }
        player.record_clue(round, clue.text.as_str());
        self.clues.push(clue);
        Ok(&self.clues[self.clues.len() - 1])
    }

    /// Store a player's own answer so later prompts can replay it
    pub fn remember_answer(
        &mut self,
        player_id: &PlayerId,
        answer: impl Into<String>,
    ) -> Result<(), DomainError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id() == player_id)
            .ok_or_else(|| DomainError::UnknownPlayer(player_id.to_string()))?;
        player.remember_answer(answer);
        Ok(())
    }

    pub fn votes_in_round(&self, voting_round: u32) -> impl Iterator<Item = &Vote> {
        self.votes
            .iter()
            .filter(move |v| v.voting_round == voting_round)
    }

    pub fn tally(&self, voting_round: u32) -> VoteTally {
        VoteTally::from_votes(self.votes_in_round(voting_round))
    }

    /// Snapshot of what `player_id` may see before voting now
    pub fn vote_context(&self, player_id: &PlayerId) -> Result<VoteContext, DomainError> {
        let voting_round = self.current_voting_round()?;
        let player = self.active_player(player_id)?;
        Ok(VoteContext {
            player_id: player.id().clone(),
            role: player.role(),
            secret_word: player.secret_word().map(str::to_string),
            category: self.config.category.clone(),
            num_imposters: self.config.num_imposters,
            voting_round,
            total_voting_rounds: self.config.num_voting_rounds,
            clue_history: self.public_clues(),
            votes_so_far: self
                .votes_in_round(voting_round)
                .map(|v| CastVote {
                    voter_id: v.voter_id.clone(),
                    target: v.target.clone(),
                })
                .collect(),
            running_tally: self.tally(voting_round),
            eligible_targets: self.active_players(),
            eliminated: self.eliminated_players(),
            own_answers: player.answers().to_vec(),
        })
    }

    /// Append a vote for the current voting round
    pub fn record_vote(&mut self, vote: Vote) -> Result<(), DomainError> {
        let voting_round = self.current_voting_round()?;
        if vote.voting_round != voting_round {
            return Err(DomainError::WrongPhase(format!(
                "vote for voting round {} during {}",
                vote.voting_round, self.phase
            )));
        }
        self.active_player(&vote.voter_id)?;
        if let Some(target) = &vote.target {
            self.active_player(target)?;
        }
        if self
            .votes_in_round(voting_round)
            .any(|v| v.voter_id == vote.voter_id)
        {
            return Err(DomainError::WrongPhase(format!(
                "{} already voted in voting round {}",
                vote.voter_id, voting_round
            )));
        }
        self.votes.push(vote);
        Ok(())
    }

    /// Close the current voting round: tally, apply the tie-break policy and
    /// record the elimination (possibly empty)
    pub fn eliminate(&mut self, policy: TieBreakPolicy) -> Result<Elimination, DomainError> {
        let voting_round = self.current_voting_round()?;
        if self
            .eliminations
            .iter()
            .any(|e| e.voting_round == voting_round)
        {
            return Err(DomainError::WrongPhase(format!(
                "voting round {} already closed",
                voting_round
            )));
        }

        let tally = self.tally(voting_round);
        let (eliminated, tied) = match tally.resolve(policy, &self.seat_order()) {
            TallyOutcome::Eliminate(id) => (Some(id), Vec::new()),
            TallyOutcome::Tie(leaders) => (None, leaders),
            TallyOutcome::NoVotes => (None, Vec::new()),
        };

        let mut was_imposter = false;
        if let Some(id) = &eliminated {
            let player = self.active_player_mut(id)?;
            was_imposter = player.is_imposter();
            player.eliminate(voting_round)?;
        }

        let elimination = Elimination {
            voting_round,
            eliminated,
            vote_counts: tally,
            was_imposter,
            remaining_imposters: self.win_check().surviving_imposters.len(),
            tied,
        };
        self.eliminations.push(elimination.clone());
        Ok(elimination)
    }

    /// Enter RESULT and compute the final result
    pub fn finish(&mut self) -> Result<GameResult, DomainError> {
        self.advance(GamePhase::Result)?;

        let actual_imposters = self.imposters();
        let eliminated_players = self.eliminated_players();
        let result = GameResult {
            word: self.config.word.clone(),
            category: self.config.category.clone(),
            detection_accuracy: detection_accuracy(&actual_imposters, &eliminated_players),
            actual_imposters,
            eliminated_players,
            total_clue_rounds: self.config.num_clue_rounds,
            winner: self.win_check().winner(),
            clues: self.clues.clone(),
            votes: self.votes.clone(),
            eliminations: self.eliminations.clone(),
        };
        self.result = Some(result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelKey;
    use crate::game::config::{ModelStrategy, RoleAssignment};
    use crate::game::outcome::Winner;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(players: usize, imposters: &[usize], clue_rounds: u32, voting_rounds: u32) -> Game {
        let config = GameConfig::new("lighthouse", "places")
            .with_players(players, imposters.len())
            .with_rounds(clue_rounds, voting_rounds)
            .with_model_strategy(ModelStrategy::single("llama"))
            .with_role_assignment(RoleAssignment::Fixed {
                seats: imposters.to_vec(),
            });
        Game::setup(config, &ModelRegistry::with_defaults(), &mut StdRng::seed_from_u64(0))
            .unwrap()
    }

    fn clue(round: u32, player: &str, text: &str) -> Clue {
        Clue {
            round,
            player_id: PlayerId::from(player),
            text: text.to_string(),
            rationale: "it fits the category".to_string(),
            confidence: 70,
            word_hypothesis: Some("beacon".to_string()),
            degraded: false,
        }
    }

    fn vote(round: u32, voter: &str, target: &str) -> Vote {
        Vote {
            voting_round: round,
            voter_id: PlayerId::from(voter),
            target: Some(PlayerId::from(target)),
            rationale: "their clue was suspiciously vague".to_string(),
            confidence: 55,
            degraded: false,
        }
    }

    #[test]
    fn test_setup_deals_roles() {
        let g = game(4, &[2], 1, 1);
        assert_eq!(g.phase(), GamePhase::Setup);
        assert_eq!(g.players().len(), 4);
        assert_eq!(g.imposters(), vec![PlayerId::from("Player_3")]);
        assert_eq!(g.players()[2].secret_word(), None);
        assert_eq!(g.players()[0].secret_word(), Some("lighthouse"));
        assert!(g.players().iter().all(|p| p.model() == &ModelKey::new("llama")));
    }

    #[test]
    fn test_setup_rejects_invalid_config() {
        let config = GameConfig::new("lighthouse", "places").with_players(3, 3);
        let mut rng = StdRng::seed_from_u64(0);
        let err = Game::setup(config, &ModelRegistry::with_defaults(), &mut rng).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_clue_context_sees_only_earlier_clues() {
        let mut g = game(3, &[0], 2, 1);
        g.advance(GamePhase::ClueRound(1)).unwrap();

        let ctx = g.clue_context(&PlayerId::from("Player_1")).unwrap();
        assert!(ctx.visible_clues.is_empty());
        assert!(ctx.is_imposter());
        assert_eq!(ctx.secret_word, None);

        g.record_clue(clue(1, "Player_1", "light")).unwrap();
        let ctx = g.clue_context(&PlayerId::from("Player_2")).unwrap();
        assert_eq!(ctx.visible_clues.len(), 1);
        assert_eq!(ctx.visible_clues[0].text, "light");
        assert_eq!(ctx.secret_word.as_deref(), Some("lighthouse"));
    }

    #[test]
    fn test_civilian_hypothesis_dropped() {
        let mut g = game(3, &[0], 1, 1);
        g.advance(GamePhase::ClueRound(1)).unwrap();
        g.record_clue(clue(1, "Player_1", "shore")).unwrap();
        g.record_clue(clue(1, "Player_2", "beam")).unwrap();
        assert_eq!(g.clues()[0].word_hypothesis.as_deref(), Some("beacon"));
        assert_eq!(g.clues()[1].word_hypothesis, None);
    }

    #[test]
    fn test_record_clue_checks_phase_and_duplicates() {
        let mut g = game(3, &[0], 1, 1);
        assert!(matches!(
            g.record_clue(clue(1, "Player_1", "x")),
            Err(DomainError::WrongPhase(_))
        ));
        g.advance(GamePhase::ClueRound(1)).unwrap();
        g.record_clue(clue(1, "Player_1", "x")).unwrap();
        assert!(g.record_clue(clue(1, "Player_1", "y")).is_err());
        assert!(g.record_clue(clue(2, "Player_2", "y")).is_err());
        assert!(matches!(
            g.record_clue(clue(1, "Player_9", "y")),
            Err(DomainError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_vote_context_shows_running_tally() {
        let mut g = game(4, &[3], 1, 1);
        g.advance(GamePhase::ClueRound(1)).unwrap();
        g.advance(GamePhase::VotingRound(1)).unwrap();

        g.record_vote(vote(1, "Player_1", "Player_4")).unwrap();
        let ctx = g.vote_context(&PlayerId::from("Player_2")).unwrap();
        assert_eq!(ctx.votes_so_far.len(), 1);
        assert_eq!(ctx.running_tally.count(&PlayerId::from("Player_4")), 1);
        assert_eq!(ctx.eligible_targets.len(), 4);
        assert!(g.record_vote(vote(1, "Player_1", "Player_2")).is_err());
    }

    #[test]
    fn test_full_game_civilians_win() {
        let mut g = game(4, &[3], 1, 1);
        g.advance(GamePhase::ClueRound(1)).unwrap();
        for p in g.seat_order() {
            g.record_clue(clue(1, p.as_str(), "glow")).unwrap();
        }
        g.advance(GamePhase::VotingRound(1)).unwrap();
        g.record_vote(vote(1, "Player_1", "Player_4")).unwrap();
        g.record_vote(vote(1, "Player_2", "Player_4")).unwrap();
        g.record_vote(vote(1, "Player_3", "Player_4")).unwrap();
        g.record_vote(vote(1, "Player_4", "Player_1")).unwrap();

        let elimination = g.eliminate(TieBreakPolicy::NoElimination).unwrap();
        assert_eq!(elimination.eliminated, Some(PlayerId::from("Player_4")));
        assert!(elimination.was_imposter);
        assert_eq!(elimination.remaining_imposters, 0);
        assert!(g.win_check().all_imposters_caught());

        let result = g.finish().unwrap();
        assert_eq!(result.detection_accuracy, 1.0);
        assert_eq!(result.winner, Winner::Civilians);
        assert_eq!(g.phase(), GamePhase::Result);
        assert!(matches!(
            g.advance(GamePhase::Result),
            Err(DomainError::GameComplete)
        ));
    }

    #[test]
    fn test_tie_records_empty_elimination() {
        let mut g = game(4, &[0], 1, 1);
        g.advance(GamePhase::ClueRound(1)).unwrap();
        for p in g.seat_order() {
            g.record_clue(clue(1, p.as_str(), "glow")).unwrap();
        }
        g.advance(GamePhase::VotingRound(1)).unwrap();
        g.record_vote(vote(1, "Player_1", "Player_2")).unwrap();
        g.record_vote(vote(1, "Player_2", "Player_1")).unwrap();

        let elimination = g.eliminate(TieBreakPolicy::NoElimination).unwrap();
        assert!(elimination.is_empty());
        assert_eq!(elimination.tied.len(), 2);
        assert!(g.eliminate(TieBreakPolicy::NoElimination).is_err());

        let result = g.finish().unwrap();
        assert_eq!(result.winner, Winner::Imposters);
        assert!(result.eliminated_players.is_empty());
    }
}
