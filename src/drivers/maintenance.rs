//! Maintenance-mode trigger.
//!
//! ## Hardware
//!
//! The BOOT button is active-low with a pull-up. Its falling-edge ISR only
//! latches a request into an atomic; the acquisition thread polls the latch
//! between iterations and, when set, restarts the chip into the ROM serial
//! download mode so new firmware can be flashed without touching the board.
//!
//! No debounce is needed: the first edge wins and the chip never comes back
//! to see the bounces.

use core::sync::atomic::{AtomicBool, Ordering};

use log::warn;

/// Set by the ISR, cleared by [`take_request`].
static MAINTENANCE_REQUESTED: AtomicBool = AtomicBool::new(false);

/// ISR handler: register on the button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic store).
pub fn request_from_isr() {
    MAINTENANCE_REQUESTED.store(true, Ordering::Release);
}

/// Consume a pending request, if any.
pub fn take_request() -> bool {
    MAINTENANCE_REQUESTED.swap(false, Ordering::AcqRel)
}

/// Service a pending request. Call from the acquisition loop's idle hook.
pub fn service() {
    if take_request() {
        enter_maintenance_mode();
    }
}

/// `RTC_CNTL_OPTION1_REG` on the ESP32-S3.
#[cfg(target_os = "espidf")]
const RTC_CNTL_OPTION1_REG: usize = 0x6000_812C;
/// `RTC_CNTL_FORCE_DOWNLOAD_BOOT`: the next reset enters the ROM downloader.
#[cfg(target_os = "espidf")]
const FORCE_DOWNLOAD_BOOT: u32 = 1 << 0;

/// Force the ROM download boot mode and restart. Never returns.
#[cfg(target_os = "espidf")]
pub fn enter_maintenance_mode() -> ! {
    warn!("Maintenance requested: rebooting into ROM download mode");
    // SAFETY: RTC_CNTL_OPTION1_REG is a memory-mapped RTC register; the
    // chip is restarted right after, so no other code observes the write.
    unsafe {
        let reg = RTC_CNTL_OPTION1_REG as *mut u32;
        reg.write_volatile(reg.read_volatile() | FORCE_DOWNLOAD_BOOT);
        esp_idf_svc::sys::esp_restart();
    }
}

/// Simulation fallback: there is no ROM downloader to reboot into.
#[cfg(not(target_os = "espidf"))]
pub fn enter_maintenance_mode() -> ! {
    warn!("Maintenance requested (sim): exiting");
    std::process::exit(0)
}
