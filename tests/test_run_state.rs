use summit_climb::error::GameError;
use summit_climb::run_state::{RunPhase, Trigger};

#[test]
fn transition_table() {
    assert_eq!(RunPhase::Idle.transition(Trigger::AvatarSelected).unwrap(), RunPhase::Running);
    assert_eq!(
        RunPhase::Running.transition(Trigger::CheckpointReached(4)).unwrap(),
        RunPhase::CheckpointOpen(4)
    );
    assert_eq!(
        RunPhase::CheckpointOpen(4).transition(Trigger::Acknowledged).unwrap(),
        RunPhase::Running
    );
    assert_eq!(RunPhase::Running.transition(Trigger::Summit).unwrap(), RunPhase::Won);
    assert_eq!(RunPhase::Running.transition(Trigger::HealthExhausted).unwrap(), RunPhase::Lost);
}

#[test]
fn terminal_phases_accept_nothing() {
    let triggers = [
        Trigger::AvatarSelected,
        Trigger::CheckpointReached(0),
        Trigger::Acknowledged,
        Trigger::Summit,
        Trigger::HealthExhausted,
    ];
    for phase in [RunPhase::Won, RunPhase::Lost] {
        for trigger in triggers {
            assert!(matches!(
                phase.transition(trigger),
                Err(GameError::InvalidTransition { .. })
            ));
        }
    }
}

#[test]
fn checkpoint_open_cannot_win_or_reopen() {
    let open = RunPhase::CheckpointOpen(2);
    assert!(open.transition(Trigger::Summit).is_err());
    assert!(open.transition(Trigger::CheckpointReached(3)).is_err());
    assert!(RunPhase::Running.transition(Trigger::Acknowledged).is_err());
    assert!(RunPhase::Idle.transition(Trigger::Summit).is_err());
}

#[test]
fn phase_helpers() {
    assert_eq!(RunPhase::default(), RunPhase::Idle);
    assert!(RunPhase::Won.is_terminal());
    assert!(RunPhase::Lost.is_terminal());
    assert!(!RunPhase::CheckpointOpen(0).is_terminal());
    assert!(RunPhase::CheckpointOpen(0).is_paused());
    assert!(!RunPhase::Running.is_paused());
    assert_eq!(RunPhase::CheckpointOpen(5).open_checkpoint(), Some(5));
    assert_eq!(RunPhase::Running.open_checkpoint(), None);
    assert_eq!(RunPhase::CheckpointOpen(1).label(), "checkpoint_open");
}

#[test]
fn invalid_transition_message_names_both_sides() {
    let err = RunPhase::Won.transition(Trigger::Acknowledged).unwrap_err();
    assert_eq!(err.to_string(), "cannot apply Acknowledged while Won");
}
