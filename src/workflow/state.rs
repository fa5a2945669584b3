use std::fmt;

use serde::{Deserialize, Serialize};

/// States of a single trigger run.
///
/// IDLE → FETCHING_METADATA → TRIGGERING_(UN)PARAMETERIZED → SUCCEEDED,
/// with FAILED reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Idle,
    FetchingMetadata,
    TriggeringUnparameterized,
    TriggeringParameterized,
    Succeeded,
    Failed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Idle => write!(f, "IDLE"),
            State::FetchingMetadata => write!(f, "FETCHING_METADATA"),
            State::TriggeringUnparameterized => write!(f, "TRIGGERING_UNPARAMETERIZED"),
            State::TriggeringParameterized => write!(f, "TRIGGERING_PARAMETERIZED"),
            State::Succeeded => write!(f, "SUCCEEDED"),
            State::Failed => write!(f, "FAILED"),
        }
    }
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Succeeded | State::Failed)
    }

    /// Whether `next` directly follows `self`.
    pub fn can_advance_to(self, next: State) -> bool {
        match (self, next) {
            (from, State::Failed) => !from.is_terminal(),
            (State::Idle, State::FetchingMetadata) => true,
            (
                State::FetchingMetadata,
                State::TriggeringUnparameterized | State::TriggeringParameterized,
            ) => true,
            (
                State::TriggeringUnparameterized | State::TriggeringParameterized,
                State::Succeeded,
            ) => true,
            _ => false,
        }
    }
}

/// Progress record of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRun {
    pub state: State,
    pub state_history: Vec<State>,
    /// Queue item number reported by Jenkins, if any.
    pub queue_item: Option<u64>,
    pub failure: Option<String>,
}

impl Default for TriggerRun {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerRun {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            state_history: Vec::new(),
            queue_item: None,
            failure: None,
        }
    }

    /// Moves to `next` if the edge exists. Returns whether the move happened.
    pub fn advance(&mut self, next: State) -> bool {
        if !self.state.can_advance_to(next) {
            return false;
        }
        self.state_history.push(self.state);
        self.state = next;
        true
    }

    pub fn succeed(&mut self, queue_item: Option<u64>) -> bool {
        let moved = self.advance(State::Succeeded);
        if moved {
            self.queue_item = queue_item;
        }
        moved
    }

    pub fn fail(&mut self, message: &str) -> bool {
        let moved = self.advance(State::Failed);
        if moved {
            self.failure = Some(message.to_string());
        }
        moved
    }

    /// `IDLE → FETCHING_METADATA → ...` including the current state.
    pub fn path(&self) -> String {
        self.state_history
            .iter()
            .chain(std::iter::once(&self.state))
            .map(State::to_string)
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_path_walks_all_states() {
        let mut run = TriggerRun::new();
        assert!(run.advance(State::FetchingMetadata));
        assert!(run.advance(State::TriggeringParameterized));
        assert!(run.succeed(Some(7)));
        assert_eq!(run.state, State::Succeeded);
        assert_eq!(run.queue_item, Some(7));
        assert_eq!(
            run.state_history,
            vec![
                State::Idle,
                State::FetchingMetadata,
                State::TriggeringParameterized
            ]
        );
    }

    #[test]
    fn failed_reachable_from_any_non_terminal_state() {
        for steps in [
            vec![],
            vec![State::FetchingMetadata],
            vec![State::FetchingMetadata, State::TriggeringUnparameterized],
        ] {
            let mut run = TriggerRun::new();
            for s in steps {
                assert!(run.advance(s));
            }
            assert!(run.fail("boom"));
            assert_eq!(run.state, State::Failed);
            assert_eq!(run.failure.as_deref(), Some("boom"));
        }
    }

    #[test]
    fn succeeded_requires_a_trigger_state() {
        let mut run = TriggerRun::new();
        assert!(!run.succeed(None));
        run.advance(State::FetchingMetadata);
        assert!(!run.succeed(None));
        assert_eq!(run.state, State::FetchingMetadata);
    }

    #[test]
    fn terminal_states_are_final() {
        let mut run = TriggerRun::new();
        run.fail("first");
        assert!(!run.fail("second"));
        assert!(!run.advance(State::FetchingMetadata));
        assert_eq!(run.failure.as_deref(), Some("first"));

        let mut run = TriggerRun::new();
        run.advance(State::FetchingMetadata);
        run.advance(State::TriggeringUnparameterized);
        run.succeed(None);
        assert!(!run.fail("late"));
        assert_eq!(run.state, State::Succeeded);
    }

    #[test]
    fn cannot_skip_metadata_fetch() {
        let mut run = TriggerRun::new();
        assert!(!run.advance(State::TriggeringParameterized));
        assert_eq!(run.state, State::Idle);
        assert!(run.state_history.is_empty());
    }

    #[test]
    fn path_renders_history() {
        let mut run = TriggerRun::new();
        run.advance(State::FetchingMetadata);
        run.fail("x");
        assert_eq!(run.path(), "IDLE → FETCHING_METADATA → FAILED");
    }

    #[test]
    fn state_display() {
        assert_eq!(State::Idle.to_string(), "IDLE");
        assert_eq!(
            State::TriggeringUnparameterized.to_string(),
            "TRIGGERING_UNPARAMETERIZED"
        );
        assert_eq!(State::Failed.to_string(), "FAILED");
    }
}
