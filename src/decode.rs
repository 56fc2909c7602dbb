//! The instruction decoder: an 8-way dispatch on opcode bits `[15:13]`,
//! followed by per-class bitfield extraction and table lookup.

use crate::bits;
use crate::conditions;
use crate::instruction::{Instruction, ProgramCounterAdvance};
use crate::primitives::{self, Destination, Source};
use crate::shift;
use crate::state::{ShiftDirection, State};

/// Decodes 16-bit PIO opcodes into [`Instruction`]s.
///
/// Parameterized over the configurable parts of the RP2040 PIO state
/// machine that the opcode alone does not determine: the ISR/OSR shift
/// direction, and the GPIO pin tested by `JMP PIN`.
pub struct Decoder {
    shift_isr_direction: ShiftDirection,
    shift_osr_direction: ShiftDirection,
    jmp_pin: u8,
}

impl Decoder {
    /// Builds a decoder.
    ///
    /// `shift_isr_direction` and `shift_osr_direction` select how `IN`/`OUT`
    /// merge and extract bits. `jmp_pin` (`0..=31`) is the GPIO pin tested
    /// by the `JMP PIN` condition.
    pub fn new(
        shift_isr_direction: ShiftDirection,
        shift_osr_direction: ShiftDirection,
        jmp_pin: u8,
    ) -> Self {
        Decoder {
            shift_isr_direction,
            shift_osr_direction,
            jmp_pin,
        }
    }

    /// Decodes `opcode`, returning `None` for a reserved or unimplemented
    /// encoding.
    pub fn decode(&self, opcode: u16) -> Option<Instruction> {
        match bits::class(opcode) {
            0 => self.decode_jmp(opcode),
            1 => Self::decode_wait(opcode),
            2 => self.decode_in(opcode),
            3 => self.decode_out(opcode),
            4 => Self::decode_push_pull(opcode),
            5 => self.decode_mov(opcode),
            6 => None, // IRQ: unimplemented
            7 => Self::decode_set(opcode),
            _ => unreachable!("class is a 3-bit field"),
        }
    }

    fn decode_jmp(&self, opcode: u16) -> Option<Instruction> {
        let address = bits::field(opcode, 0, 5) as u8;
        let condition_index = bits::field(opcode, 5, 3);
        let jmp_pin = self.jmp_pin;

        let condition: Box<dyn Fn(&State) -> bool + Send + Sync> = match condition_index {
            0 => Box::new(conditions::always),
            1 => Box::new(conditions::x_register_equals_zero),
            2 => Box::new(conditions::x_register_not_equal_to_zero),
            3 => Box::new(conditions::y_register_equals_zero),
            4 => Box::new(conditions::y_register_not_equal_to_zero),
            5 => Box::new(conditions::x_register_not_equal_to_y_register),
            6 => Box::new(move |state: &State| conditions::gpio_high(jmp_pin, state)),
            7 => Box::new(conditions::output_shift_register_not_empty),
            _ => unreachable!("condition index is a 3-bit field"),
        };

        Some(Instruction::new(
            condition,
            move |state: &State| state.with_program_counter(address),
            ProgramCounterAdvance::WhenConditionNotMet,
        ))
    }

    fn decode_wait(opcode: u16) -> Option<Instruction> {
        let index = bits::field(opcode, 0, 5) as u8;
        let polarity_high = bits::field(opcode, 7, 1) != 0;

        let condition = move |state: &State| {
            if polarity_high {
                conditions::gpio_high(index, state)
            } else {
                conditions::gpio_low(index, state)
            }
        };

        Some(Instruction::new(
            condition,
            |state: &State| state.clone(),
            ProgramCounterAdvance::WhenConditionMet,
        ))
    }

    /// Reserved `IN` source slots (source index 4 or 5) decode to an absent
    /// instruction, the same way `MOV` and `SET` treat their reserved
    /// slots, so that every produced `Instruction`'s effect stays total
    /// over all valid states.
    fn decode_in(&self, opcode: u16) -> Option<Instruction> {
        let source = match bits::field(opcode, 5, 3) {
            0 => Source::Pins,
            1 => Source::X,
            2 => Source::Y,
            3 => Source::Null,
            4 | 5 => return None,
            6 => Source::Isr,
            7 => Source::Osr,
            _ => unreachable!("source index is a 3-bit field"),
        };
        let bit_count = bits::zero_means_32(bits::field(opcode, 0, 5));
        let shift_isr_direction = self.shift_isr_direction;

        let effect = move |state: &State| {
            let value = source.read(state);
            let shifted = shift::shift_in(
                shift_isr_direction,
                state.input_shift_register(),
                bit_count,
                value,
            );
            state.with_input_shift_register(shifted)
        };

        Some(Instruction::new(
            conditions::always,
            effect,
            ProgramCounterAdvance::Always,
        ))
    }

    fn decode_out(&self, opcode: u16) -> Option<Instruction> {
        let destination = match bits::field(opcode, 5, 3) {
            0 => Destination::Pins,
            1 => Destination::X,
            2 => Destination::Y,
            3 => Destination::Null,
            4 => Destination::PinDirections,
            5 => Destination::ProgramCounter,
            6 => Destination::Isr,
            7 => return None, // EXEC: unimplemented
            _ => unreachable!("destination index is a 3-bit field"),
        };
        let bit_count = bits::zero_means_32(bits::field(opcode, 0, 5));
        let shift_osr_direction = self.shift_osr_direction;

        let effect = move |state: &State| {
            let (new_osr, value) =
                shift::shift_out(shift_osr_direction, state.output_shift_register(), bit_count);
            let state = state.with_output_shift_register(new_osr);

            // OUT, ISR additionally resets the ISR's shift counter to the
            // instruction's bit count; the one destination-specific side
            // effect in the whole decoder (RP2040 datasheet §3.4.5.2).
            if destination == Destination::Isr {
                primitives::write_to_isr(
                    primitives::supplies_value(value),
                    &state,
                    Some(bit_count as u8),
                )
            } else {
                destination.write(value, &state)
            }
        };

        let pc_advance_policy = if destination == Destination::ProgramCounter {
            ProgramCounterAdvance::Never
        } else {
            ProgramCounterAdvance::Always
        };

        Some(Instruction::new(conditions::always, effect, pc_advance_policy))
    }

    fn decode_push_pull(opcode: u16) -> Option<Instruction> {
        let is_pull = bits::field(opcode, 7, 1) != 0;
        let is_blocking = bits::field(opcode, 5, 1) != 0;

        Some(match (is_pull, is_blocking) {
            (false, true) => Instruction::new(
                conditions::receive_fifo_not_full,
                primitives::push_blocking,
                ProgramCounterAdvance::WhenConditionMet,
            ),
            (false, false) => Instruction::new(
                conditions::always,
                primitives::push_nonblocking,
                ProgramCounterAdvance::Always,
            ),
            (true, true) => Instruction::new(
                conditions::transmit_fifo_not_empty,
                primitives::pull_blocking,
                ProgramCounterAdvance::WhenConditionMet,
            ),
            (true, false) => Instruction::new(
                conditions::always,
                primitives::pull_nonblocking,
                ProgramCounterAdvance::Always,
            ),
        })
    }

    fn decode_mov(&self, opcode: u16) -> Option<Instruction> {
        let source = match bits::field(opcode, 0, 3) {
            0 => Source::Pins,
            1 => Source::X,
            2 => Source::Y,
            3 => Source::Null,
            4 | 5 => return None, // reserved, STATUS (unimplemented)
            6 => Source::Isr,
            7 => Source::Osr,
            _ => unreachable!("source index is a 3-bit field"),
        };
        let destination = match bits::field(opcode, 5, 3) {
            0 => Destination::Pins,
            1 => Destination::X,
            2 => Destination::Y,
            3 | 4 => return None, // reserved, EXEC (unimplemented)
            5 => Destination::ProgramCounter,
            6 => Destination::Isr,
            7 => Destination::Osr,
            _ => unreachable!("destination index is a 3-bit field"),
        };
        // Operations 2 and 3 (bit-reverse in the real ISA) are not
        // implemented and fall through to identity, same as operation 0.
        let complement = bits::field(opcode, 3, 2) == 1;

        let effect = move |state: &State| {
            let raw = source.read(state);
            let value = if complement { raw ^ 0xFFFF_FFFF } else { raw };
            destination.write(value, state)
        };

        let pc_advance_policy = if destination == Destination::ProgramCounter {
            ProgramCounterAdvance::Never
        } else {
            ProgramCounterAdvance::Always
        };

        Some(Instruction::new(conditions::always, effect, pc_advance_policy))
    }

    fn decode_set(opcode: u16) -> Option<Instruction> {
        let destination = match bits::field(opcode, 5, 3) {
            0 => Destination::Pins,
            1 => Destination::X,
            2 => Destination::Y,
            4 => Destination::PinDirections,
            3 | 5 | 6 | 7 => return None,
            _ => unreachable!("destination index is a 3-bit field"),
        };
        let value = bits::field(opcode, 0, 5) as u32;

        Some(Instruction::new(
            conditions::always,
            move |state: &State| destination.write(value, state),
            ProgramCounterAdvance::Always,
        ))
    }
}
