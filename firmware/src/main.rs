#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// Panic handler
use panic_halt as _;

use riscv_rt::entry;

use focus_core::{ButtonConfig, CountdownApp, CountdownTimer, TimerConfig};
use focus_firmware::{interrupt, Board, Tim2Source, BOARD, TIM2_IRQ};

// Shared between the TIM2 handler and the main loop
static TIMER: CountdownTimer<Tim2Source> =
    CountdownTimer::new(Tim2Source::new(), TimerConfig::POMODORO);

#[entry]
fn main() -> ! {
    #[cfg(feature = "defmt")]
    defmt::info!("Focus timer starting");

    focus_firmware::enable_peripheral_clocks();

    let Ok(board) = Board::new(&BOARD) else {
        #[cfg(feature = "defmt")]
        defmt::error!("Pin map rejected");
        interrupt::halt();
    };

    interrupt::enable_irq(TIM2_IRQ);
    interrupt::enable_global();

    let mut app = CountdownApp::new(&TIMER, board.display, board.button, ButtonConfig::PULL_DOWN);
    if app.init().is_err() {
        #[cfg(feature = "defmt")]
        defmt::warn!("Initial blank failed");
    }

    #[cfg(feature = "defmt")]
    defmt::info!("Ready");

    app.run()
}

/// TIM2 update interrupt: one countdown tick
#[no_mangle]
extern "C" fn TIM2_IRQHandler() {
    Tim2Source::clear_interrupt();
    TIMER.tick();
}
