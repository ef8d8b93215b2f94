//! Per-kind action handlers.

use crate::feature::Feature;
use crate::island::{Action, ActionKind, GEM_ITEM, Island};
use crate::state::RunState;

use super::reducer::RunReducer;
use super::{GameEvent, format_count};

/// Result of dispatching one action against a working state.
pub(super) enum Outcome {
    /// Keep the working state and report these events.
    Applied(Vec<GameEvent>),
    /// Discard the working state; the caller's state stands.
    Rejected(Vec<GameEvent>),
}

/// Routes an action to its handler.
pub(super) fn dispatch(
    island: &Island,
    working: &mut RunState,
    action: &Action,
    feature: Option<&Feature>,
) -> Outcome {
    let mut reducer = RunReducer::new(working);
    match &action.kind {
        ActionKind::Move { to } => {
            reducer.enter(to);
            Outcome::Applied(Vec::new())
        }
        ActionKind::Pickup { item, amount } => pickup(&mut reducer, action, feature, item, *amount),
        ActionKind::Ship => depart(island, &mut reducer, action, feature),
        ActionKind::Say { line } => {
            if reducer.complete(&action.id, feature) {
                Outcome::Applied(vec![GameEvent::toast(line.clone())])
            } else {
                Outcome::Applied(Vec::new())
            }
        }
        ActionKind::Reset => Outcome::Applied(Vec::new()),
    }
}

fn pickup(
    reducer: &mut RunReducer<'_>,
    action: &Action,
    feature: Option<&Feature>,
    item: &str,
    amount: Option<u32>,
) -> Outcome {
    if reducer.state().is_action_completed(&action.id) {
        return Outcome::Applied(Vec::new());
    }
    reducer.complete(&action.id, feature);
    tracing::debug!("pickup {} granted {:?} {}", action.id, amount, item);

    // Only gems count toward departure.
    if !action.is_gem_pickup() {
        return Outcome::Applied(vec![GameEvent::toast(format!("You picked up a {item}!"))]);
    }
    let total = reducer.add_gems(amount.unwrap_or(0));
    Outcome::Applied(vec![GameEvent::toast(format!(
        "You picked up a {item}! Now you have {}.",
        format_count(total, GEM_ITEM)
    ))])
}

fn depart(
    island: &Island,
    reducer: &mut RunReducer<'_>,
    action: &Action,
    feature: Option<&Feature>,
) -> Outcome {
    let collected = reducer.state().gems_collected;
    if island.required_gems() > collected {
        return Outcome::Rejected(vec![GameEvent::toast(format!(
            "You need {} to finish. You have {} right now.",
            format_count(island.required_gems(), "gem"),
            format_count(collected, "gem")
        ))]);
    }
    reducer.complete(&action.id, feature);
    reducer.finish();
    Outcome::Applied(vec![GameEvent::toast("Success!")])
}
