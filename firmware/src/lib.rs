#![cfg_attr(not(test), no_std)]

//! Firmware support for the CH32V203 focus timer board

pub mod board;
pub mod ch32v203_hardware;
pub mod interrupt;

pub use focus_core::*;

pub use crate::board::{Board, PinMap, BOARD};
pub use crate::ch32v203_hardware::{enable_peripheral_clocks, GpioLine, Line, Port, Tim2Source, TIM2_IRQ};
