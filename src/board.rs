use rand::Rng;
use serde::Serialize;

use crate::roster::{shuffle, Roster, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub is_completed: bool,
}

impl Team {
    fn fresh(id: &TeamId) -> Self {
        Self {
            id: id.clone(),
            name: id.to_string(),
            is_completed: false,
        }
    }
}

/// Live collection of teams and their completion flags.
///
/// `teams` is kept in display order, which is a random permutation of the
/// roster. Candidate selection only ever walks the roster. Every mutation
/// returns a new `Board`; the receiver is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    #[serde(skip)]
    roster: Roster,
    teams: Vec<Team>,
}

impl Board {
    /// One incomplete team per roster entry, in shuffled display order
    pub fn initialize<R: Rng + ?Sized>(roster: Roster, rng: &mut R) -> Self {
        let ordered: Vec<Team> = roster.ids().iter().map(Team::fresh).collect();
        let teams = shuffle(&ordered, rng);

        tracing::debug!(teams = teams.len(), "Board initialized");
        Self { roster, teams }
    }

    /// Same roster, all completion state discarded, new display order
    pub fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self::initialize(self.roster.clone(), rng)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Teams in display order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| &team.id == id)
    }

    /// Case-insensitive lookup of a team by id or display name
    pub fn resolve(&self, query: &str) -> Option<&Team> {
        let query = query.trim();
        if let Some(team) = self.teams.iter().find(|team| team.id.as_str() == query) {
            return Some(team);
        }
        self.teams.iter().find(|team| {
            team.id.as_str().eq_ignore_ascii_case(query) || team.name.eq_ignore_ascii_case(query)
        })
    }

    /// First incomplete team in roster order, `None` once everyone has gone.
    ///
    /// Full scan on every call: manual toggles can move the earliest
    /// incomplete team backwards, so no position is remembered.
    pub fn next_candidate(&self) -> Option<&Team> {
        self.roster
            .ids()
            .iter()
            .filter_map(|id| self.team(id))
            .find(|team| !team.is_completed)
    }

    pub fn mark_completed(&self, id: &TeamId) -> Self {
        self.with_flag(id, |_| true)
    }

    /// Flip the flag either way. Restoring a team is always allowed.
    pub fn toggle_completed(&self, id: &TeamId) -> Self {
        self.with_flag(id, |completed| !completed)
    }

    pub fn remaining_count(&self) -> usize {
        self.teams.iter().filter(|team| !team.is_completed).count()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_count() == 0
    }

    fn with_flag(&self, id: &TeamId, update: impl Fn(bool) -> bool) -> Self {
        if self.team(id).is_none() {
            tracing::warn!(team = %id, "Ignoring update for team not on the board");
            return self.clone();
        }

        let teams = self
            .teams
            .iter()
            .map(|team| {
                if &team.id == id {
                    Team {
                        is_completed: update(team.is_completed),
                        ..team.clone()
                    }
                } else {
                    team.clone()
                }
            })
            .collect();

        Self {
            roster: self.roster.clone(),
            teams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn abc_board() -> Board {
        let roster = Roster::new(["A", "B", "C"]).unwrap();
        Board::initialize(roster, &mut StdRng::seed_from_u64(3))
    }

    fn id(name: &str) -> TeamId {
        TeamId::from(name)
    }

    fn assert_matches_roster(board: &Board) {
        assert_eq!(board.teams().len(), board.roster().len());
        let board_ids: HashSet<_> = board.teams().iter().map(|t| t.id.clone()).collect();
        let roster_ids: HashSet<_> = board.roster().ids().iter().cloned().collect();
        assert_eq!(board_ids, roster_ids);
    }

    #[test]
    fn test_initialize_creates_incomplete_team_per_roster_entry() {
        let board = abc_board();
        assert_matches_roster(&board);
        assert_eq!(board.remaining_count(), 3);
        assert!(board.teams().iter().all(|t| !t.is_completed));
        assert!(board.teams().iter().all(|t| t.id.as_str() == t.name));
    }

    #[test]
    fn test_next_candidate_follows_roster_not_display_order() {
        let roster = Roster::default();
        for seed in 0..20 {
            let board = Board::initialize(roster.clone(), &mut StdRng::seed_from_u64(seed));
            assert_eq!(board.next_candidate().map(|t| t.id.clone()), Some(id("Mission")));
        }
    }

    #[test]
    fn test_next_candidate_exhaustion_is_stable() {
        let mut board = abc_board();
        for name in ["A", "B", "C"] {
            board = board.mark_completed(&id(name));
        }
        assert!(board.next_candidate().is_none());
        assert!(board.next_candidate().is_none());
        assert!(board.is_finished());
    }

    #[test]
    fn test_mark_completed_is_idempotent_and_pure() {
        let board = abc_board();
        let once = board.mark_completed(&id("B"));
        let twice = once.mark_completed(&id("B"));

        assert_eq!(once, twice);
        assert_eq!(board.remaining_count(), 3);
        assert_eq!(once.remaining_count(), 2);
    }

    #[test]
    fn test_mutations_preserve_display_order() {
        let board = abc_board();
        let order: Vec<_> = board.teams().iter().map(|t| t.id.clone()).collect();
        let updated = board.mark_completed(&id("C")).toggle_completed(&id("A"));
        let updated_order: Vec<_> = updated.teams().iter().map(|t| t.id.clone()).collect();
        assert_eq!(order, updated_order);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let board = abc_board().mark_completed(&id("A"));
        for name in ["A", "B", "C"] {
            let round_trip = board.toggle_completed(&id(name)).toggle_completed(&id(name));
            assert_eq!(round_trip, board);
        }
    }

    #[test]
    fn test_toggle_restores_earlier_team_as_candidate() {
        let board = abc_board()
            .mark_completed(&id("A"))
            .mark_completed(&id("B"));
        assert_eq!(board.next_candidate().unwrap().id, id("C"));

        let restored = board.toggle_completed(&id("A"));
        assert_eq!(restored.next_candidate().unwrap().id, id("A"));
    }

    #[test]
    fn test_unknown_ids_leave_board_untouched() {
        let board = abc_board();
        assert_eq!(board.mark_completed(&id("Z")), board);
        assert_eq!(board.toggle_completed(&id("Z")), board);
        assert_matches_roster(&board.toggle_completed(&id("Z")));
    }

    #[test]
    fn test_reset_clears_completion() {
        let board = abc_board()
            .mark_completed(&id("A"))
            .toggle_completed(&id("C"));
        let fresh = board.reset(&mut StdRng::seed_from_u64(9));

        assert_matches_roster(&fresh);
        assert_eq!(fresh.remaining_count(), 3);
        assert!(fresh.teams().iter().all(|t| !t.is_completed));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let board = Board::initialize(Roster::default(), &mut StdRng::seed_from_u64(0));
        assert_eq!(board.resolve("ddil").unwrap().id, id("DDIL"));
        assert_eq!(board.resolve(" devops ").unwrap().id, id("DevOps"));
        assert!(board.resolve("Marketing").is_none());
    }
}
