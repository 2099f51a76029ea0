//! Tick task running the orchestration loop
//!
//! Paces [`Controller::tick`] with a fixed ticker and logs what each tick
//! did. The loop never blocks, so a late tick just runs on the next beat.

use defmt::*;
use embassy_time::{Duration, Ticker};

use snakebox_core::game::XorShift32;
use snakebox_core::runtime::{Controller, LoopEvent, TickReport};

use crate::board::Board;

/// Tick task - drives the controller on the configured cadence
#[embassy_executor::task]
pub async fn tick_task(mut board: Board, mut controller: Controller<XorShift32>) {
    info!("Tick task started");

    let interval_ms = controller.config().tick_interval_ms;
    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;

        let report = controller.tick(&mut board);
        log_report(&report);
    }
}

fn log_report(report: &TickReport) {
    for event in report.events() {
        match event {
            LoopEvent::ModeChanged(mode) => info!("[{}] mode -> {:?}", report.now_ms(), mode),
            LoopEvent::Stepped(outcome) => trace!("step {:?}", outcome),
            LoopEvent::GameOver {
                score,
                collision,
                reported,
            } => info!(
                "Game over: score={} collision={:?} reported={}",
                score, collision, reported
            ),
            LoopEvent::FrameSent(kind) => debug!("Frame sent: {:?}", kind),
            LoopEvent::DisplaySleep => info!("Display sleeping"),
            LoopEvent::DisplayWake => info!("Display awake"),
            LoopEvent::AmbientChanged(ambient) => debug!("Ambient {:?}", ambient),
            LoopEvent::NewBest(score) => info!("New best score: {}", score),
            LoopEvent::ClockFault(e) => warn!("RTC read failed: {:?}", e),
            LoopEvent::RecordFault(e) => warn!("Best score not saved: {:?}", e),
        }
    }
}
