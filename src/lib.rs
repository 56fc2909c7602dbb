#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod conditions;
pub mod decode;
pub mod instruction;
pub mod primitives;
pub mod shift;
pub mod state;

pub(crate) mod bits;

pub use decode::Decoder;
pub use instruction::{Instruction, ProgramCounterAdvance};
pub use primitives::{Destination, Source};
pub use state::{Fifo, ShiftDirection, ShiftRegister, State, RX_TX_FIFO_DEPTH};
