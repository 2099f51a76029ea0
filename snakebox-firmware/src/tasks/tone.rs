//! Buzzer playback task

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::board::PwmBuzzer;
use crate::channels::TONE_QUEUE;

/// Advances the tone queue once per millisecond
#[embassy_executor::task]
pub async fn tone_task(mut buzzer: PwmBuzzer) {
    info!("Tone task started");

    let mut ticker = Ticker::every(Duration::from_millis(1));

    loop {
        ticker.next().await;
        TONE_QUEUE.lock(|queue| queue.borrow_mut().tick_1ms(&mut buzzer));
    }
}
