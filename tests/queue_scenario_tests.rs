//! Tests for the board and selection workflow working together.
//! Testing library/framework: Rust built-in test framework.

use rand::rngs::StdRng;
use rand::SeedableRng;
use standup_picker::{Board, Notice, Phase, PickerEvent, Roster, SelectionWorkflow, TeamId};
use std::collections::HashSet;

fn id(name: &str) -> TeamId {
    TeamId::from(name)
}

fn abc_workflow(seed: u64) -> SelectionWorkflow {
    let mut rng = StdRng::seed_from_u64(seed);
    let board = Board::initialize(Roster::new(["A", "B", "C"]).unwrap(), &mut rng);
    SelectionWorkflow::new(board, rng)
}

fn pick(workflow: &mut SelectionWorkflow) -> Phase {
    workflow.handle(&PickerEvent::RequestPick);
    workflow.handle(&PickerEvent::DelayElapsed)
}

fn candidate(workflow: &SelectionWorkflow) -> Option<TeamId> {
    workflow.session().candidate().map(|team| team.id.clone())
}

fn assert_board_matches_roster(board: &Board) {
    let ids: HashSet<_> = board.teams().iter().map(|t| t.id.clone()).collect();
    let roster: HashSet<_> = board.roster().ids().iter().cloned().collect();
    assert_eq!(board.teams().len(), board.roster().len());
    assert_eq!(ids, roster);
}

#[test]
fn abc_walkthrough_with_cancel_and_manual_toggle() {
    let mut wf = abc_workflow(1);
    assert_eq!(wf.board().next_candidate().unwrap().id, id("A"));

    // Confirm A
    assert_eq!(pick(&mut wf), Phase::PendingConfirm);
    assert_eq!(candidate(&wf), Some(id("A")));
    wf.handle(&PickerEvent::Confirm);
    wf.handle(&PickerEvent::Finish);
    assert!(wf.board().team(&id("A")).unwrap().is_completed);
    assert_eq!(wf.board().next_candidate().unwrap().id, id("B"));

    // Cancel B
    let before_cancel = wf.board().clone();
    pick(&mut wf);
    assert_eq!(candidate(&wf), Some(id("B")));
    assert_eq!(wf.handle(&PickerEvent::Cancel), Phase::Idle);
    assert_eq!(wf.board(), &before_cancel);
    assert!(!wf.board().team(&id("B")).unwrap().is_completed);

    // Manually complete C; B is still the earliest incomplete team
    wf.handle(&PickerEvent::Toggle(id("C")));
    assert_eq!(wf.board().next_candidate().unwrap().id, id("B"));

    // Complete B
    pick(&mut wf);
    assert_eq!(candidate(&wf), Some(id("B")));
    wf.handle(&PickerEvent::Confirm);
    wf.handle(&PickerEvent::Finish);

    assert!(wf.board().next_candidate().is_none());
    assert_eq!(wf.board().remaining_count(), 0);
    assert_eq!(wf.handle(&PickerEvent::RequestPick), Phase::Idle);
    assert_eq!(wf.session().notice(), Some(&Notice::AllTeamsCompleted));
}

#[test]
fn every_team_is_called_exactly_once_in_roster_order() {
    let roster = Roster::default();
    let mut rng = StdRng::seed_from_u64(77);
    let board = Board::initialize(roster.clone(), &mut rng);
    let mut wf = SelectionWorkflow::new(board, rng);

    let mut called = Vec::new();
    while pick(&mut wf) == Phase::PendingConfirm {
        called.push(candidate(&wf).unwrap());
        wf.handle(&PickerEvent::Confirm);
        assert_board_matches_roster(wf.board());
        wf.handle(&PickerEvent::Finish);
    }

    assert_eq!(called, roster.ids().to_vec());
    assert_eq!(wf.handle(&PickerEvent::RequestPick), Phase::Idle);
    assert_eq!(wf.session().notice(), Some(&Notice::AllTeamsCompleted));
}

#[test]
fn display_order_does_not_leak_roster_order() {
    let roster = Roster::default();
    let mut first_positions = HashSet::new();

    for seed in 0..50 {
        let board = Board::initialize(roster.clone(), &mut StdRng::seed_from_u64(seed));
        assert_board_matches_roster(&board);
        first_positions.insert(board.teams()[0].id.clone());
        assert_eq!(board.next_candidate().unwrap().id, id("Mission"));
    }

    assert!(first_positions.len() > 1);
}

#[test]
fn restoring_a_team_makes_it_eligible_again() {
    let mut wf = abc_workflow(4);
    pick(&mut wf);
    wf.handle(&PickerEvent::Confirm);
    wf.handle(&PickerEvent::Finish);

    wf.handle(&PickerEvent::Toggle(id("A")));
    pick(&mut wf);
    assert_eq!(candidate(&wf), Some(id("A")));
}

#[test]
fn reset_restores_full_queue_from_any_phase() {
    for setup in 0..4 {
        let mut wf = abc_workflow(setup);
        pick(&mut wf);
        wf.handle(&PickerEvent::Confirm);
        match setup {
            0 => {}
            1 => {
                wf.handle(&PickerEvent::Finish);
            }
            2 => {
                wf.handle(&PickerEvent::Finish);
                pick(&mut wf);
            }
            _ => {
                wf.handle(&PickerEvent::Toggle(id("C")));
            }
        }

        assert_eq!(wf.handle(&PickerEvent::Reset), Phase::Idle);
        assert_eq!(wf.board().remaining_count(), 3);
        assert!(wf.board().teams().iter().all(|t| !t.is_completed));
        assert!(wf.session().candidate().is_none());
        assert!(wf.session().speaker().is_none());
        assert_board_matches_roster(wf.board());
    }
}
