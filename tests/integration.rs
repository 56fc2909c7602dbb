#[cfg(test)]
mod util;

use pioemu_core::{Decoder, ShiftDirection, State};
use util::{run_one, step};

fn decoder() -> Decoder {
    Decoder::new(ShiftDirection::Left, ShiftDirection::Right, 2)
}

#[test]
fn jmp_always_sets_program_counter_and_does_not_double_advance() {
    let state = State::new();
    let after = run_one(&decoder(), 0x0005, &state); // JMP always, address 5
    assert_eq!(after.program_counter(), 5);
}

#[test]
fn jmp_conditional_branch_or_fallthrough() {
    let taken = run_one(&decoder(), 0x0025, &State::new().with_x_register(0)); // JMP X==0, 5
    assert_eq!(taken.program_counter(), 5);

    let not_taken = run_one(&decoder(), 0x0025, &State::new().with_x_register(1));
    assert_eq!(not_taken.program_counter(), 1); // fell through from 0
}

#[test]
fn wait_stalls_the_program_counter_until_the_pin_is_ready() {
    let decoder = decoder();
    let instruction = decoder.decode(0x2080).expect("WAIT 1, GPIO, 0");

    let low = State::new();
    let stalled = step(&instruction, &low);
    assert_eq!(stalled.program_counter(), 0, "still waiting, PC doesn't move");

    let high = low.with_pin_values(1);
    let advanced = step(&instruction, &high);
    assert_eq!(advanced.program_counter(), 1);
}

#[test]
fn in_then_out_round_trips_through_the_pin_bitmap() {
    let decoder = decoder();
    let state = State::new().with_pin_values(0b1011);

    let after_in = run_one(&decoder, 0x4004, &state); // IN PINS, 4
    assert_eq!(after_in.input_shift_register().contents(), 0b1011);
    assert_eq!(after_in.input_shift_register().counter(), 4);

    // MOV OSR, ISR to stage the captured bits for OUT, then drain them back
    // out to the pin bitmap via the opposite (right) shift direction.
    let after_mov = run_one(&decoder, 0xA0E6, &after_in); // MOV OSR, ISR
    let after_out = run_one(&decoder, 0x6004, &after_mov.with_pin_values(0)); // OUT PINS, 4
    assert_eq!(after_out.pin_values(), 0b1011);
}

#[test]
fn push_pull_move_words_through_the_fifos() {
    let decoder = decoder();
    let state = State::new()
        .with_input_shift_register(pioemu_core::ShiftRegister::new(0xDEAD_BEEF, 32));

    let after_push = run_one(&decoder, 0x8020, &state); // PUSH blocking
    assert_eq!(after_push.receive_fifo().front(), Some(&0xDEAD_BEEF));
    assert_eq!(after_push.program_counter(), 1);

    let mut fifo = pioemu_core::Fifo::new();
    fifo.push_back(0xCAFE_F00D);
    let staged = State::new().with_transmit_fifo(fifo);

    let after_pull = run_one(&decoder, 0x80A0, &staged); // PULL blocking
    assert_eq!(after_pull.output_shift_register().contents(), 0xCAFE_F00D);
    assert_eq!(after_pull.output_shift_register().counter(), 0);
    assert_eq!(after_pull.program_counter(), 1);
}

#[test]
fn pull_blocking_never_advances_past_an_empty_transmit_fifo() {
    let decoder = decoder();
    let instruction = decoder.decode(0x80A0).expect("PULL blocking");
    let stalled = step(&instruction, &State::new());
    assert_eq!(stalled.program_counter(), 0);
}

#[test]
fn a_tiny_program_runs_in_sequence() {
    // 0: SET X, 3
    // 1: JMP X != 0, 2   (branch taken: X is still 3)
    // 2: SET Y, 1
    let decoder = decoder();
    let set_x = decoder.decode(0xE023).expect("SET X, 3");
    let jmp_x_nonzero = decoder.decode(0x0042).expect("JMP X!=0, address 2");
    let set_y = decoder.decode(0xE041).expect("SET Y, 1");

    let state = step(&set_x, &State::new());
    assert_eq!(state.x_register(), 3);
    assert_eq!(state.program_counter(), 1);

    let state = step(&jmp_x_nonzero, &state);
    assert_eq!(state.program_counter(), 2, "branch taken, PC not separately incremented");

    let state = step(&set_y, &state);
    assert_eq!(state.y_register(), 1);
    assert_eq!(state.program_counter(), 3);
}

#[test]
fn always_policy_wraps_the_program_counter_at_the_top_of_memory() {
    let decoder = decoder();
    let set_x = decoder.decode(0xE021).expect("SET X, 1");
    let state = step(&set_x, &State::new().with_program_counter(31));
    assert_eq!(state.program_counter(), 0);
}

#[test]
fn decoding_every_opcode_never_panics_and_effects_stay_total() {
    let decoder = decoder();
    let state = State::new();
    for opcode in 0..=u16::MAX {
        if let Some(instruction) = decoder.decode(opcode) {
            let next = instruction.effect(&state);
            assert!(next.program_counter() <= 31);
            assert!(next.input_shift_register().counter() <= 32);
            assert!(next.output_shift_register().counter() <= 32);
        }
    }
}
