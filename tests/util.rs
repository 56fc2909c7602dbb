use pioemu_core::{Decoder, Instruction, ProgramCounterAdvance, State};

/// Applies one decoded instruction to `state` the way an external executor
/// would: evaluate the condition, apply the effect only if the policy calls
/// for it, then advance the program counter per [`ProgramCounterAdvance`].
///
/// This is test-only scaffolding, not part of the crate under test — the
/// core only describes the policy (`spec.md` §1), it does not apply it.
pub fn step(instruction: &Instruction, state: &State) -> State {
    let condition_met = instruction.condition(state);

    let after_effect = if condition_met {
        instruction.effect(state)
    } else {
        state.clone()
    };

    match instruction.pc_advance_policy() {
        ProgramCounterAdvance::Always => after_effect.with_program_counter_incremented(),
        ProgramCounterAdvance::Never => after_effect,
        ProgramCounterAdvance::WhenConditionMet if condition_met => {
            after_effect.with_program_counter_incremented()
        }
        ProgramCounterAdvance::WhenConditionNotMet if !condition_met => {
            after_effect.with_program_counter_incremented()
        }
        _ => after_effect,
    }
}

/// Runs `opcode` against `state` through a single-instruction program,
/// reusing `decoder`.
pub fn run_one(decoder: &Decoder, opcode: u16, state: &State) -> State {
    let instruction = decoder.decode(opcode).expect("opcode should decode");
    step(&instruction, state)
}
