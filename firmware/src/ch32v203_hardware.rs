//! CH32V203 Hardware Implementation
//!
//! Register-level GPIO lines and TIM2 as the 1 Hz tick source. Clocks are left at
//! the reset default (8 MHz HSI, APB1 undivided).

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use focus_core::{Duration, PeriodicSource};

// ========================================
// CH32V203 Hardware Definitions
// ========================================

/// CH32V203 Memory Map and Register Base Addresses
const RCC_BASE: u32 = 0x4002_1000;
const GPIOA_BASE: u32 = 0x4001_0800;
const GPIOB_BASE: u32 = 0x4001_0C00;
const GPIOC_BASE: u32 = 0x4001_1000;
const TIM2_BASE: u32 = 0x4000_0000;

/// RCC Register offsets
const RCC_APB2PCENR: u32 = 0x18; // APB2 peripheral clock enable register
const RCC_APB1PCENR: u32 = 0x1C; // APB1 peripheral clock enable register

/// GPIO Register offsets
const GPIO_CFGLR: u32 = 0x00; // Configuration Register Low (pins 0-7)
const GPIO_CFGHR: u32 = 0x04; // Configuration Register High (pins 8-15)
const GPIO_INDR: u32 = 0x08; // Input Data Register
const GPIO_OUTDR: u32 = 0x0C; // Output Data Register
const GPIO_BSHR: u32 = 0x10; // Bit Set/Reset Register

/// TIM2 Register offsets
const TIM_CTLR1: u32 = 0x00; // Control Register 1
const TIM_DMAINTENR: u32 = 0x0C; // DMA/Interrupt Enable Register
const TIM_INTFR: u32 = 0x10; // Interrupt Flag Register
const TIM_SWEVGR: u32 = 0x14; // Software Event Generation Register
const TIM_CNT: u32 = 0x24; // Counter
const TIM_PSC: u32 = 0x28; // Prescaler
const TIM_ATRLR: u32 = 0x2C; // Auto-reload Register

const TIM_CTLR1_CEN: u32 = 1 << 0;
const TIM_CTLR1_OPM: u32 = 1 << 3;
const TIM_CTLR1_ARPE: u32 = 1 << 7;
const TIM_UIE: u32 = 1 << 0;
const TIM_UIF: u32 = 1 << 0;
const TIM_UG: u32 = 1 << 0;

/// TIM2 global interrupt number in the PFIC
pub const TIM2_IRQ: u32 = 44;

/// Timer input clock after reset (HSI)
const TIMER_CLOCK_HZ: u32 = 8_000_000;

/// TIM2 counts milliseconds
const TIMER_TICK_HZ: u32 = 1_000;

/// Pin configuration nibbles (CNF[1:0] MODE[1:0])
const CFG_OUTPUT_PUSH_PULL_50MHZ: u32 = 0x3;
const CFG_INPUT_PULL: u32 = 0x8;

#[inline(always)]
fn read_reg(addr: u32) -> u32 {
    // SAFETY: `addr` is one of the peripheral registers defined above
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

#[inline(always)]
fn write_reg(addr: u32, value: u32) {
    // SAFETY: `addr` is one of the peripheral registers defined above
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

#[inline(always)]
fn modify_reg(addr: u32, f: impl FnOnce(u32) -> u32) {
    write_reg(addr, f(read_reg(addr)));
}

/// Enable clocks for GPIOA, GPIOB, AFIO and TIM2
pub fn enable_peripheral_clocks() {
    // Bit 0 = AFIO, Bit 2 = GPIOA, Bit 3 = GPIOB
    modify_reg(RCC_BASE + RCC_APB2PCENR, |v| v | (1 << 0) | (1 << 2) | (1 << 3));
    // Bit 0 = TIM2
    modify_reg(RCC_BASE + RCC_APB1PCENR, |v| v | (1 << 0));
}

// ========================================
// GPIO
// ========================================

/// GPIO port
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
}

impl Port {
    const fn base(self) -> u32 {
        match self {
            Port::A => GPIOA_BASE,
            Port::B => GPIOB_BASE,
            Port::C => GPIOC_BASE,
        }
    }
}

/// Physical line: port plus pin number (0-15)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub port: Port,
    pub pin: u8,
}

impl Line {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }
}

/// One configured GPIO line
#[derive(Debug)]
pub struct GpioLine {
    base: u32,
    pin: u8,
}

impl GpioLine {
    /// Configure `line` as a 50 MHz push-pull output, driven low
    pub fn push_pull_output(line: Line) -> Self {
        let gpio = Self::configure(line, CFG_OUTPUT_PUSH_PULL_50MHZ);
        write_reg(gpio.base + GPIO_BSHR, 1 << (gpio.pin + 16));
        gpio
    }

    /// Configure `line` as an input with the internal pull-down
    pub fn pull_down_input(line: Line) -> Self {
        let gpio = Self::configure(line, CFG_INPUT_PULL);
        // OUTDR selects pull direction: 0 = down
        modify_reg(gpio.base + GPIO_OUTDR, |v| v & !(1 << gpio.pin));
        gpio
    }

    fn configure(line: Line, cfg: u32) -> Self {
        let (reg, shift) = if line.pin < 8 {
            (GPIO_CFGLR, u32::from(line.pin) * 4)
        } else {
            (GPIO_CFGHR, u32::from(line.pin - 8) * 4)
        };
        let base = line.port.base();
        modify_reg(base + reg, |v| (v & !(0xF << shift)) | (cfg << shift));
        Self { base, pin: line.pin }
    }
}

impl ErrorType for GpioLine {
    type Error = Infallible;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        // BSHR upper half resets
        write_reg(self.base + GPIO_BSHR, 1 << (self.pin + 16));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        write_reg(self.base + GPIO_BSHR, 1 << self.pin);
        Ok(())
    }
}

impl InputPin for GpioLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(read_reg(self.base + GPIO_INDR) & (1 << self.pin) != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ========================================
// TIM2 periodic source
// ========================================

/// TIM2 as the tick source: update interrupt every `period`
pub struct Tim2Source;

impl Tim2Source {
    pub const fn new() -> Self {
        Self
    }

    /// Acknowledge the update interrupt; call first thing in the handler
    pub fn clear_interrupt() {
        modify_reg(TIM2_BASE + TIM_INTFR, |v| v & !TIM_UIF);
    }

    /// Reload value for `period`, clamped to the 16-bit counter
    fn reload_for(period: Duration) -> u32 {
        let ticks = period.as_millis() * u64::from(TIMER_TICK_HZ) / 1_000;
        (ticks.clamp(1, 0x1_0000) - 1) as u32
    }
}

impl Default for Tim2Source {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodicSource for Tim2Source {
    fn start(&mut self, period: Duration, repeating: bool) {
        write_reg(TIM2_BASE + TIM_PSC, TIMER_CLOCK_HZ / TIMER_TICK_HZ - 1);
        write_reg(TIM2_BASE + TIM_ATRLR, Self::reload_for(period));

        let mut ctlr1 = TIM_CTLR1_ARPE;
        if !repeating {
            ctlr1 |= TIM_CTLR1_OPM;
        }
        write_reg(TIM2_BASE + TIM_CTLR1, ctlr1);

        // Latch prescaler and reload, then drop the flag the update event raised
        write_reg(TIM2_BASE + TIM_SWEVGR, TIM_UG);
        Self::clear_interrupt();

        modify_reg(TIM2_BASE + TIM_DMAINTENR, |v| v | TIM_UIE);
        modify_reg(TIM2_BASE + TIM_CTLR1, |v| v | TIM_CTLR1_CEN);
    }

    fn stop(&mut self) {
        modify_reg(TIM2_BASE + TIM_CTLR1, |v| v & !TIM_CTLR1_CEN);
        modify_reg(TIM2_BASE + TIM_DMAINTENR, |v| v & !TIM_UIE);
        Self::clear_interrupt();
    }

    fn reset_elapsed(&mut self) {
        write_reg(TIM2_BASE + TIM_CNT, 0);
        Self::clear_interrupt();
    }
}
