//! The instruction record produced by [`crate::decode::Decoder::decode`]
//! (RP2040 datasheet §3.4).

use crate::state::State;

/// Rule by which an external executor advances the program counter after
/// applying an instruction's effect.
///
/// The decoder only *describes* the rule; applying it is the executor's
/// responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramCounterAdvance {
    /// The program counter increments regardless of condition or effect.
    Always,
    /// The program counter is set exclusively by the effect; the executor
    /// must not also increment it.
    Never,
    /// The program counter increments only if the condition evaluated true.
    WhenConditionMet,
    /// The program counter increments only if the condition evaluated
    /// false.
    WhenConditionNotMet,
}

/// A decoded, stateless PIO instruction.
///
/// `condition` and `effect` are pure functions of a [`State`]; the same
/// `Instruction` may be cached and evaluated against any number of states,
/// concurrently, without synchronization.
pub struct Instruction {
    condition: Box<dyn Fn(&State) -> bool + Send + Sync>,
    effect: Box<dyn Fn(&State) -> State + Send + Sync>,
    pc_advance_policy: ProgramCounterAdvance,
}

impl Instruction {
    /// Builds an instruction from a condition, an effect, and a PC-advance
    /// policy.
    pub fn new(
        condition: impl Fn(&State) -> bool + Send + Sync + 'static,
        effect: impl Fn(&State) -> State + Send + Sync + 'static,
        pc_advance_policy: ProgramCounterAdvance,
    ) -> Self {
        Instruction {
            condition: Box::new(condition),
            effect: Box::new(effect),
            pc_advance_policy,
        }
    }

    /// Evaluates this instruction's condition against `state`.
    pub fn condition(&self, state: &State) -> bool {
        (self.condition)(state)
    }

    /// Applies this instruction's effect to `state`, producing a new state.
    pub fn effect(&self, state: &State) -> State {
        (self.effect)(state)
    }

    /// This instruction's program-counter advance policy.
    pub const fn pc_advance_policy(&self) -> ProgramCounterAdvance {
        self.pc_advance_policy
    }
}

impl std::fmt::Debug for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instruction")
            .field("pc_advance_policy", &self.pc_advance_policy)
            .finish_non_exhaustive()
    }
}
