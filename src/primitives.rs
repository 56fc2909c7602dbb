//! Source readers and destination writers (RP2040 datasheet §3.4.2).
//!
//! A *source* reads a 32-bit word out of a [`State`]. A *destination* takes
//! a source (the "supplier") and a [`State`] and returns a new `State` with
//! the supplied value written somewhere.

use crate::state::State;

/// Reads the current GPIO pin-value bitmap.
pub fn read_from_pins(state: &State) -> u32 {
    state.pin_values()
}

/// Reads the `X` scratch register.
pub fn read_from_x(state: &State) -> u32 {
    state.x_register()
}

/// Reads the `Y` scratch register.
pub fn read_from_y(state: &State) -> u32 {
    state.y_register()
}

/// Reads the Input Shift Register's contents.
pub fn read_from_isr(state: &State) -> u32 {
    state.input_shift_register().contents()
}

/// Reads the Output Shift Register's contents.
pub fn read_from_osr(state: &State) -> u32 {
    state.output_shift_register().contents()
}

/// A source that ignores the state and always supplies `value`.
///
/// Used both for the `NULL` source (`supplies_value(0)`) and for constant
/// operands (`JMP` addresses, `SET` values).
pub fn supplies_value(value: u32) -> impl Fn(&State) -> u32 + Copy {
    move |_state: &State| value
}

/// Placeholder source for a datasheet-reserved encoding.
///
/// `decode` never actually calls this: reserved source slots are `None` in
/// the decoder's lookup tables, and the class decoder returns an absent
/// instruction before evaluating the source. This function exists only to
/// give the reserved slot a name in the public API.
pub fn reserved(_state: &State) -> u32 {
    unreachable!("a reserved source must never be invoked")
}

/// Writes `supplier(state)` into the GPIO pin-value bitmap.
pub fn write_to_pins(supplier: impl Fn(&State) -> u32, state: &State) -> State {
    state.with_pin_values(supplier(state))
}

/// Writes `supplier(state)` into the `X` scratch register.
pub fn write_to_x(supplier: impl Fn(&State) -> u32, state: &State) -> State {
    state.with_x_register(supplier(state))
}

/// Writes `supplier(state)` into the `Y` scratch register.
pub fn write_to_y(supplier: impl Fn(&State) -> u32, state: &State) -> State {
    state.with_y_register(supplier(state))
}

/// Writes `supplier(state)` into the GPIO pin-direction bitmap.
pub fn write_to_pin_directions(supplier: impl Fn(&State) -> u32, state: &State) -> State {
    state.with_pin_directions(supplier(state))
}

/// Writes the low 5 bits of `supplier(state)` into the program counter.
pub fn write_to_program_counter(supplier: impl Fn(&State) -> u32, state: &State) -> State {
    state.with_program_counter((supplier(state) & 0x1F) as u8)
}

/// Writes `supplier(state)` into the Input Shift Register's contents.
///
/// `reset_counter`, when `Some`, replaces the ISR's bit counter; this is
/// the hook `OUT ISR` uses to set the counter to the instruction's bit
/// count (RP2040 datasheet §3.4.5.2). Every other writer of the ISR (e.g.
/// `MOV ISR, ...`) passes `None` and leaves the counter as it was.
pub fn write_to_isr(
    supplier: impl Fn(&State) -> u32,
    state: &State,
    reset_counter: Option<u8>,
) -> State {
    use crate::state::ShiftRegister;
    let contents = supplier(state);
    let counter = reset_counter.unwrap_or_else(|| state.input_shift_register().counter());
    state.with_input_shift_register(ShiftRegister::new(contents, counter))
}

/// Writes `supplier(state)` into the Output Shift Register's contents,
/// leaving its bit counter unchanged.
pub fn write_to_osr(supplier: impl Fn(&State) -> u32, state: &State) -> State {
    use crate::state::ShiftRegister;
    let contents = supplier(state);
    let counter = state.output_shift_register().counter();
    state.with_output_shift_register(ShiftRegister::new(contents, counter))
}

/// Discards `supplier(state)`, returning the state unchanged.
pub fn write_to_null(_supplier: impl Fn(&State) -> u32, state: &State) -> State {
    state.clone()
}

/// Moves the Input Shift Register's contents to the back of the receive
/// FIFO and resets the ISR to empty.
///
/// Shared by [`push_blocking`] and [`push_nonblocking`]; the two only
/// differ in which condition the decoder pairs them with (RP2040 datasheet
/// §3.4.5.1). Overflowing the FIFO's nominal depth is not rejected here —
/// that is the executor's concern.
fn push(state: &State) -> State {
    use crate::state::ShiftRegister;
    let mut receive_fifo = state.receive_fifo().clone();
    receive_fifo.push_back(state.input_shift_register().contents());
    state
        .with_receive_fifo(receive_fifo)
        .with_input_shift_register(ShiftRegister::empty_isr())
}

/// `PUSH` effect for the blocking encoding (`opcode[5] == 1`). Only called
/// by the executor once [`crate::conditions::receive_fifo_not_full`] holds.
pub fn push_blocking(state: &State) -> State {
    push(state)
}

/// `PUSH` effect for the non-blocking encoding (`opcode[5] == 0`).
pub fn push_nonblocking(state: &State) -> State {
    push(state)
}

/// Moves the word at the front of the transmit FIFO into the Output Shift
/// Register, resetting its counter to 0 (freshly loaded, nothing shifted
/// out yet).
///
/// If the transmit FIFO is empty, the state is returned unchanged: the
/// blocking encoding never calls this effect in that situation (gated by
/// [`crate::conditions::transmit_fifo_not_empty`]), and the non-blocking
/// encoding's behavior on an empty FIFO is left to the executor, so this
/// core takes the safe, total option of a no-op.
fn pull(state: &State) -> State {
    use crate::state::ShiftRegister;
    let mut transmit_fifo = state.transmit_fifo().clone();
    match transmit_fifo.pop_front() {
        Some(value) => state
            .with_transmit_fifo(transmit_fifo)
            .with_output_shift_register(ShiftRegister::new(value, 0)),
        None => state.clone(),
    }
}

/// `PULL` effect for the blocking encoding (`opcode[5] == 1`). Only called
/// by the executor once [`crate::conditions::transmit_fifo_not_empty`]
/// holds.
pub fn pull_blocking(state: &State) -> State {
    pull(state)
}

/// `PULL` effect for the non-blocking encoding (`opcode[5] == 0`).
pub fn pull_nonblocking(state: &State) -> State {
    pull(state)
}

/// The sources a decoded `IN`/`MOV` instruction may read from.
///
/// An enum, rather than a table of function pointers, so that a reserved or
/// unimplemented encoding (see [`crate::decode`]) is ruled out at the call
/// site instead of needing a runtime sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// GPIO pin-value bitmap.
    Pins,
    /// `X` scratch register.
    X,
    /// `Y` scratch register.
    Y,
    /// Constant zero.
    Null,
    /// Input Shift Register.
    Isr,
    /// Output Shift Register.
    Osr,
}

impl Source {
    /// Reads this source out of `state`.
    pub fn read(self, state: &State) -> u32 {
        match self {
            Source::Pins => read_from_pins(state),
            Source::X => read_from_x(state),
            Source::Y => read_from_y(state),
            Source::Null => 0,
            Source::Isr => read_from_isr(state),
            Source::Osr => read_from_osr(state),
        }
    }
}

/// The destinations a decoded `OUT`/`MOV`/`SET` instruction may write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// GPIO pin-value bitmap.
    Pins,
    /// `X` scratch register.
    X,
    /// `Y` scratch register.
    Y,
    /// Discards the value.
    Null,
    /// GPIO pin-direction bitmap.
    PinDirections,
    /// Program counter.
    ProgramCounter,
    /// Input Shift Register (without the `OUT ISR` counter side effect; see
    /// [`crate::decode`] for that case).
    Isr,
    /// Output Shift Register.
    Osr,
}

impl Destination {
    /// Writes `value` to this destination in `state`.
    pub fn write(self, value: u32, state: &State) -> State {
        let supplier = supplies_value(value);
        match self {
            Destination::Pins => write_to_pins(supplier, state),
            Destination::X => write_to_x(supplier, state),
            Destination::Y => write_to_y(supplier, state),
            Destination::Null => write_to_null(supplier, state),
            Destination::PinDirections => write_to_pin_directions(supplier, state),
            Destination::ProgramCounter => write_to_program_counter(supplier, state),
            Destination::Isr => write_to_isr(supplier, state, None),
            Destination::Osr => write_to_osr(supplier, state),
        }
    }
}
