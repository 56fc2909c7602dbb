//! Pure predicates over [`State`] (RP2040 datasheet §3.4.2), used as the
//! `condition` half of an [`crate::instruction::Instruction`].

use crate::state::{State, RX_TX_FIFO_DEPTH};

/// Always true; used by unconditional instructions (`JMP` always, `MOV`,
/// non-blocking `PUSH`/`PULL`, `SET`).
pub fn always(_state: &State) -> bool {
    true
}

/// True when GPIO pin `pin` reads high.
pub fn gpio_high(pin: u8, state: &State) -> bool {
    state.pin_level(pin)
}

/// True when GPIO pin `pin` reads low.
pub fn gpio_low(pin: u8, state: &State) -> bool {
    !state.pin_level(pin)
}

/// True when the `X` scratch register is zero.
pub fn x_register_equals_zero(state: &State) -> bool {
    state.x_register() == 0
}

/// True when the `X` scratch register is non-zero.
pub fn x_register_not_equal_to_zero(state: &State) -> bool {
    state.x_register() != 0
}

/// True when the `Y` scratch register is zero.
pub fn y_register_equals_zero(state: &State) -> bool {
    state.y_register() == 0
}

/// True when the `Y` scratch register is non-zero.
pub fn y_register_not_equal_to_zero(state: &State) -> bool {
    state.y_register() != 0
}

/// True when `X` and `Y` hold different values.
pub fn x_register_not_equal_to_y_register(state: &State) -> bool {
    state.x_register() != state.y_register()
}

/// True when the Output Shift Register still has unshifted bits, i.e. its
/// counter has not reached 32.
pub fn output_shift_register_not_empty(state: &State) -> bool {
    state.output_shift_register().counter() < 32
}

/// True when the receive FIFO (state machine to host) has room for another
/// word, i.e. it holds fewer than [`RX_TX_FIFO_DEPTH`] words — the RP2040's
/// fixed per-direction FIFO depth.
pub fn receive_fifo_not_full(state: &State) -> bool {
    state.receive_fifo().len() < RX_TX_FIFO_DEPTH
}

/// True when the transmit FIFO (host to state machine) has a word available
/// to pull.
pub fn transmit_fifo_not_empty(state: &State) -> bool {
    !state.transmit_fifo().is_empty()
}
