use crate::model::{BattleResult, BattleState, ResultType, Side, TurnResult};
use std::cmp::Ordering;
use tracing::debug;

fn finish(state: &BattleState, history: &[TurnResult], result_type: ResultType, reason: String) -> BattleResult {
    let mut final_state = state.clone();
    final_state.is_finished = true;
    debug!(?result_type, %reason, "battle finished");
    BattleResult {
        result_type,
        final_state,
        turn_history: history.to_vec(),
        reason,
    }
}

/// Knock-out check. `None` means the battle continues.
pub fn check_after_turn(state: &BattleState, history: &[TurnResult]) -> Option<BattleResult> {
    let down1 = state.combatant1.is_down();
    let down2 = state.combatant2.is_down();
    match (down1, down2) {
        (true, true) => Some(finish(
            state,
            history,
            ResultType::Draw,
            "both combatants were knocked out".to_string(),
        )),
        (false, true) => Some(finish(
            state,
            history,
            ResultType::Player1Win,
            format!("{} was knocked out", state.combatant2.definition_id),
        )),
        (true, false) => Some(finish(
            state,
            history,
            ResultType::Player2Win,
            format!("{} was knocked out", state.combatant1.definition_id),
        )),
        (false, false) => None,
    }
}

/// The clock ran out: the side with more HP left wins.
pub fn check_on_timeout(state: &BattleState, history: &[TurnResult]) -> BattleResult {
    let mut timed_out = state.clone();
    timed_out.remaining_time = 0;
    let hp1 = timed_out.combatant1.current_hp;
    let hp2 = timed_out.combatant2.current_hp;
    let (result_type, reason) = match hp1.cmp(&hp2) {
        Ordering::Greater => (
            ResultType::Player1Win,
            format!("time up, {} has more HP ({hp1} vs {hp2})", timed_out.combatant1.definition_id),
        ),
        Ordering::Less => (
            ResultType::Player2Win,
            format!("time up, {} has more HP ({hp2} vs {hp1})", timed_out.combatant2.definition_id),
        ),
        Ordering::Equal => (ResultType::Draw, format!("time up with equal HP ({hp1})")),
    };
    finish(&timed_out, history, result_type, reason)
}

pub fn check_on_give_up(state: &BattleState, history: &[TurnResult], gave_up: Side) -> BattleResult {
    let reason = format!("{} gave up", state.combatant(gave_up).definition_id);
    finish(state, history, ResultType::winner(gave_up.opponent()), reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Distance;
    use crate::roster::find_definition;

    fn state_with_hp(hp1: u32, hp2: u32) -> BattleState {
        let def = find_definition("ironclad").expect("bundled definition");
        let mut state = BattleState::new(def, def, Distance::Mid, 120);
        state.combatant1.current_hp = hp1;
        state.combatant2.current_hp = hp2;
        state
    }

    #[test]
    fn after_turn_table() {
        let draw = check_after_turn(&state_with_hp(0, 0), &[]).expect("terminal");
        assert_eq!(draw.result_type, ResultType::Draw);
        assert!(draw.final_state.is_finished);
        let p1 = check_after_turn(&state_with_hp(10, 0), &[]).expect("terminal");
        assert_eq!(p1.result_type, ResultType::Player1Win);
        let p2 = check_after_turn(&state_with_hp(0, 10), &[]).expect("terminal");
        assert_eq!(p2.result_type, ResultType::Player2Win);
        assert!(check_after_turn(&state_with_hp(10, 10), &[]).is_none());
    }

    #[test]
    fn timeout_prefers_higher_hp_and_zeroes_the_clock() {
        let win = check_on_timeout(&state_with_hp(30, 20), &[]);
        assert_eq!(win.result_type, ResultType::Player1Win);
        assert_eq!(win.final_state.remaining_time, 0);
        assert!(win.final_state.is_finished);
        let lose = check_on_timeout(&state_with_hp(5, 20), &[]);
        assert_eq!(lose.result_type, ResultType::Player2Win);
        let draw = check_on_timeout(&state_with_hp(20, 20), &[]);
        assert_eq!(draw.result_type, ResultType::Draw);
    }

    #[test]
    fn give_up_ignores_hp() {
        let result = check_on_give_up(&state_with_hp(100, 1), &[], Side::Player1);
        assert_eq!(result.result_type, ResultType::Player2Win);
        assert!(result.final_state.is_finished);
        assert!(result.reason.contains("gave up"));
    }
}
