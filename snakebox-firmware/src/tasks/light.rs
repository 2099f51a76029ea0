//! Light sensor edge task
//!
//! Waits on both edges of the sensor output and latches the new level for
//! the loop to pick up on its next tick.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::LIGHT_LATCH;

#[embassy_executor::task]
pub async fn light_task(mut sensor: Input<'static>) {
    info!("Light task started");

    // Report the level at boot so the display starts in the right mode
    LIGHT_LATCH.record(sensor.is_high());

    loop {
        sensor.wait_for_any_edge().await;
        let dark = sensor.is_high();
        trace!("Light edge: dark={}", dark);
        LIGHT_LATCH.record(dark);
    }
}
