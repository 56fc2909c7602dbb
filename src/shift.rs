//! Shift-in / shift-out semantics for the ISR and OSR (RP2040 datasheet
//! §3.4.5).

use crate::bits::{high_bits, low_bits, shl_zeroing, shr_zeroing};
use crate::state::{ShiftDirection, ShiftRegister};

/// Shifts `k` bits of `value` into `register`, merging according to
/// `direction` and saturating the counter at 32.
///
/// `value` is masked to its low `k` bits before merging; only `k` in
/// `1..=32` is meaningful (a bit count of 0 is treated as 32 at the call
/// site, not here).
pub fn shift_in(
    direction: ShiftDirection,
    register: ShiftRegister,
    k: u32,
    value: u32,
) -> ShiftRegister {
    let incoming = low_bits(value, k);
    let merged = match direction {
        ShiftDirection::Left => shl_zeroing(register.contents(), k) | incoming,
        ShiftDirection::Right => shr_zeroing(register.contents(), k) | shl_zeroing(incoming, 32 - k),
    };
    let counter = (register.counter() as u32 + k).min(32) as u8;
    ShiftRegister::new(merged, counter)
}

/// Shifts `k` bits out of `register`, returning the updated register and the
/// extracted word (right-aligned in the returned `u32`).
///
/// A left-shifting register extracts from the high end; a right-shifting
/// register extracts from the low end. The counter decreases by `k`,
/// clamped at 0.
pub fn shift_out(direction: ShiftDirection, register: ShiftRegister, k: u32) -> (ShiftRegister, u32) {
    let extracted = match direction {
        ShiftDirection::Left => high_bits(register.contents(), k),
        ShiftDirection::Right => low_bits(register.contents(), k),
    };
    let remaining = match direction {
        ShiftDirection::Left => shl_zeroing(register.contents(), k),
        ShiftDirection::Right => shr_zeroing(register.contents(), k),
    };
    let counter = register.counter().saturating_sub(k as u8);
    (ShiftRegister::new(remaining, counter), extracted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_in_left_merges_low_end() {
        let register = ShiftRegister::new(0, 0);
        let result = shift_in(ShiftDirection::Left, register, 1, 1);
        assert_eq!(result, ShiftRegister::new(1, 1));
    }

    #[test]
    fn shift_in_right_merges_high_end() {
        let register = ShiftRegister::new(0, 0);
        let result = shift_in(ShiftDirection::Right, register, 1, 1);
        assert_eq!(result, ShiftRegister::new(0x8000_0000, 1));
    }

    #[test]
    fn shift_in_saturates_counter_at_32() {
        let register = ShiftRegister::new(0, 31);
        let result = shift_in(ShiftDirection::Left, register, 8, 0xFF);
        assert_eq!(result.counter(), 32);
    }

    #[test]
    fn shift_out_right_extracts_low_bits() {
        let register = ShiftRegister::new(0x8000_0001, 32);
        let (new_register, extracted) = shift_out(ShiftDirection::Right, register, 1);
        assert_eq!(extracted, 1);
        assert_eq!(new_register.counter(), 31);
        assert_eq!(new_register.contents(), 0x4000_0000);
    }

    #[test]
    fn shift_out_left_extracts_high_bits() {
        let register = ShiftRegister::new(0x8000_0001, 32);
        let (new_register, extracted) = shift_out(ShiftDirection::Left, register, 1);
        assert_eq!(extracted, 1);
        assert_eq!(new_register.contents(), 0x0000_0002);
    }

    #[test]
    fn shift_out_counter_clamps_at_zero() {
        let register = ShiftRegister::new(0, 1);
        let (new_register, _) = shift_out(ShiftDirection::Right, register, 32);
        assert_eq!(new_register.counter(), 0);
    }
}
