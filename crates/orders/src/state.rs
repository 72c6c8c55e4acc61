//! Order lifecycle: design state, settlement state and the transition rules
//! between snapshots.

use serde::{Deserialize, Serialize};

use dispatch_core::{DomainError, DomainResult};

/// Design state lifecycle, as coded on the wire (1..=10).
///
/// The main line runs pending-dispatch → hall/group → dispatched → accepted →
/// first draft → revision → completed. Returned and refunded branch off from
/// any non-terminal state and end the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum DesignState {
    PendingDispatch = 1,
    DispatchHall = 2,
    DispatchGroup = 3,
    Dispatched = 4,
    Accepted = 5,
    FirstDraftInProgress = 6,
    RevisionInProgress = 7,
    Returned = 8,
    Refunded = 9,
    Completed = 10,
}

impl DesignState {
    pub const ALL: [DesignState; 10] = [
        DesignState::PendingDispatch,
        DesignState::DispatchHall,
        DesignState::DispatchGroup,
        DesignState::Dispatched,
        DesignState::Accepted,
        DesignState::FirstDraftInProgress,
        DesignState::RevisionInProgress,
        DesignState::Returned,
        DesignState::Refunded,
        DesignState::Completed,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            DesignState::PendingDispatch => "pending dispatch",
            DesignState::DispatchHall => "dispatch hall",
            DesignState::DispatchGroup => "dispatch group",
            DesignState::Dispatched => "dispatched",
            DesignState::Accepted => "accepted",
            DesignState::FirstDraftInProgress => "first draft in progress",
            DesignState::RevisionInProgress => "revision in progress",
            DesignState::Returned => "returned",
            DesignState::Refunded => "refunded",
            DesignState::Completed => "completed",
        }
    }

    /// Returned and refunded leave the main line.
    pub fn is_branch(self) -> bool {
        matches!(self, DesignState::Returned | DesignState::Refunded)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DesignState::Returned | DesignState::Refunded | DesignState::Completed
        )
    }

    /// Whether an order still sits in a dispatch queue and can be seized.
    pub fn is_open_for_seize(self) -> bool {
        matches!(self, DesignState::DispatchHall | DesignState::DispatchGroup)
    }

    /// Whether a snapshot in `self` may be followed by a snapshot in `next`.
    ///
    /// Re-reading the same state is not a transition and is always allowed.
    pub fn can_transition_to(self, next: DesignState) -> bool {
        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        if next.is_branch() {
            return true;
        }
        next.code() > self.code()
    }

    /// Check a single transition, naming both ends on failure.
    pub fn ensure_transition(self, next: DesignState) -> DomainResult<()> {
        if self.can_transition_to(next) {
            return Ok(());
        }
        Err(DomainError::invariant(format!(
            "design state cannot move from {} ({}) to {} ({})",
            self.label(),
            self.code(),
            next.label(),
            next.code()
        )))
    }

    /// State reached after a successful first-draft upload.
    pub fn after_first_draft(self) -> DomainResult<DesignState> {
        match self {
            DesignState::Accepted | DesignState::FirstDraftInProgress => {
                Ok(DesignState::RevisionInProgress)
            }
            other => Err(DomainError::invariant(format!(
                "first draft not accepted while {}",
                other.label()
            ))),
        }
    }

    /// State reached after a successful final-draft upload.
    pub fn after_final_draft(self) -> DomainResult<DesignState> {
        match self {
            DesignState::RevisionInProgress => Ok(DesignState::Completed),
            other => Err(DomainError::invariant(format!(
                "final draft not accepted while {}",
                other.label()
            ))),
        }
    }
}

impl TryFrom<i64> for DesignState {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        DesignState::ALL
            .into_iter()
            .find(|state| state.code() == value)
            .ok_or_else(|| DomainError::unknown_code("designState", value))
    }
}

impl From<DesignState> for i64 {
    fn from(value: DesignState) -> Self {
        value.code()
    }
}

impl core::fmt::Display for DesignState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Query-side grouping of design states.
///
/// The order list filter does not take a raw design state; it takes one of
/// three buckets, coded 6, 7 and 8 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum StateBucket {
    InTransit = 6,
    Completed = 7,
    Returned = 8,
}

impl StateBucket {
    pub fn contains(self, state: DesignState) -> bool {
        match self {
            StateBucket::InTransit => matches!(
                state,
                DesignState::Dispatched
                    | DesignState::Accepted
                    | DesignState::FirstDraftInProgress
                    | DesignState::RevisionInProgress
            ),
            StateBucket::Completed => state == DesignState::Completed,
            StateBucket::Returned => state.is_branch(),
        }
    }
}

impl TryFrom<i64> for StateBucket {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(StateBucket::InTransit),
            7 => Ok(StateBucket::Completed),
            8 => Ok(StateBucket::Returned),
            other => Err(DomainError::unknown_code("designState bucket", other)),
        }
    }
}

impl From<StateBucket> for i64 {
    fn from(value: StateBucket) -> Self {
        value as i64
    }
}

/// Settlement state (0 unsettled, 1 settled).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum SettlementState {
    #[default]
    Unsettled = 0,
    Settled = 1,
}

impl SettlementState {
    /// Settlement only follows completion.
    pub fn ensure_consistent_with(self, design: DesignState) -> DomainResult<()> {
        if self == SettlementState::Settled && design != DesignState::Completed {
            return Err(DomainError::invariant(format!(
                "order settled while {}",
                design.label()
            )));
        }
        Ok(())
    }
}

impl TryFrom<i64> for SettlementState {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SettlementState::Unsettled),
            1 => Ok(SettlementState::Settled),
            other => Err(DomainError::unknown_code("settlementState", other)),
        }
    }
}

impl From<SettlementState> for i64 {
    fn from(value: SettlementState) -> Self {
        value as i64
    }
}

/// Observed lifecycle of one order across successive snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    current: DesignState,
    settlement: SettlementState,
    history: Vec<DesignState>,
}

impl Timeline {
    pub fn start(state: DesignState) -> Self {
        Self {
            current: state,
            settlement: SettlementState::Unsettled,
            history: vec![state],
        }
    }

    pub fn current(&self) -> DesignState {
        self.current
    }

    pub fn settlement(&self) -> SettlementState {
        self.settlement
    }

    pub fn history(&self) -> &[DesignState] {
        &self.history
    }

    /// Record the next observed design state; rejects regressions.
    pub fn record(&mut self, next: DesignState) -> DomainResult<()> {
        self.current.ensure_transition(next)?;
        if next != self.current {
            self.history.push(next);
            self.current = next;
        }
        Ok(())
    }

    /// Record the next observed settlement state.
    pub fn record_settlement(&mut self, settlement: SettlementState) -> DomainResult<()> {
        settlement.ensure_consistent_with(self.current)?;
        if self.settlement == SettlementState::Settled && settlement == SettlementState::Unsettled
        {
            return Err(DomainError::invariant("settlement cannot be reverted"));
        }
        self.settlement = settlement;
        Ok(())
    }
}

/// Validate a whole fixture sequence of design states.
pub fn validate_sequence(states: &[DesignState]) -> DomainResult<()> {
    let Some((first, rest)) = states.split_first() else {
        return Ok(());
    };
    let mut timeline = Timeline::start(*first);
    rest.iter().try_for_each(|next| timeline.record(*next))
}
