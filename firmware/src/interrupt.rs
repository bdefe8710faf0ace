//! Interrupt plumbing: critical sections and PFIC enables

#[cfg(target_arch = "riscv32")]
mod critical {
    // Critical section implementation for single-core RISC-V: mask MIE
    struct RiscvCriticalSection;
    critical_section::set_impl!(RiscvCriticalSection);

    unsafe impl critical_section::Impl for RiscvCriticalSection {
        unsafe fn acquire() -> critical_section::RawRestoreState {
            let mstatus = riscv::register::mstatus::read();
            riscv::register::mstatus::clear_mie();
            mstatus.mie()
        }

        unsafe fn release(was_enabled: critical_section::RawRestoreState) {
            if was_enabled {
                riscv::register::mstatus::set_mie();
            }
        }
    }
}

const PFIC_BASE: u32 = 0xE000_E000;
/// Interrupt Enable Set registers, one bit per IRQ
const PFIC_IENR: u32 = 0x100;

/// Unmask `irq` in the PFIC
pub fn enable_irq(irq: u32) {
    let reg = PFIC_BASE + PFIC_IENR + (irq / 32) * 4;
    // SAFETY: IENR is write-one-to-set, other bits are unaffected
    unsafe { core::ptr::write_volatile(reg as *mut u32, 1 << (irq % 32)) }
}

/// Turn on machine-level interrupts
pub fn enable_global() {
    // SAFETY: called once after every shared resource is initialized
    unsafe { riscv::register::mstatus::set_mie() }
}

/// Sleep until the next interrupt, forever
pub fn halt() -> ! {
    loop {
        // SAFETY: wfi only stalls the hart
        unsafe { riscv::asm::wfi() }
    }
}
