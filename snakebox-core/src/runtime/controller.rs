//! The cooperative tick loop
//!
//! Per tick, in order: ambient light, presence, input, engine step, render,
//! heartbeat. All timing is next-due deadlines on the monotonic clock.

use snakebox_protocol::{RtcTime, ScoreReport, TelemetryFrame, SECONDS_PER_DAY};

use super::report::{FrameKind, LoopEvent, TickReport};
use super::tones;
use crate::config::{AsleepGameOverPolicy, LoopConfig};
use crate::game::{
    Collision, Grid, RandomSource, SnakeGame, StepOutcome, BOARD_HEIGHT, BOARD_WIDTH,
};
use crate::presence::{PresenceAction, PresenceMonitor};
use crate::records::{BestScore, RecordError};
use crate::scheduler::{elapsed_ms, Deadline};
use crate::state::{Event, Mode};
use crate::traits::{Hardware, InputSample};

/// Where the current session started
#[derive(Debug, Clone, Copy)]
struct SessionStart {
    /// Wall-clock start, if the RTC could be read
    rtc: Option<RtcTime>,
    /// Monotonic start
    ms: u32,
}

/// Orchestration loop state
///
/// Owns the engine, the mode machine, and every timer. Created once at boot
/// and driven by [`Controller::tick`] for the life of the device.
pub struct Controller<R> {
    config: LoopConfig,
    game: SnakeGame<R>,
    grid: Grid<BOARD_WIDTH, BOARD_HEIGHT>,
    mode: Mode,
    presence: PresenceMonitor,
    step: Deadline,
    heartbeat: Deadline,
    lockout: Deadline,
    /// Input sample recorded when waiting began; taken on the first
    /// waiting tick after boot
    baseline: Option<InputSample>,
    session: SessionStart,
    last_good_time: Option<RtcTime>,
    best: Option<BestScore>,
}

impl<R: RandomSource> Controller<R> {
    /// Create the loop state; time zero is boot
    pub fn new(config: LoopConfig, rng: R) -> Self {
        let mut heartbeat = Deadline::new(config.heartbeat_interval_ms);
        heartbeat.arm(0);

        Self {
            game: SnakeGame::new(rng),
            grid: Grid::new(),
            mode: Mode::Waiting,
            presence: PresenceMonitor::new(config.idle_threshold_ms, 0),
            step: Deadline::new(config.step_interval_ms),
            heartbeat,
            lockout: Deadline::new(config.debounce_ms),
            baseline: None,
            session: SessionStart { rtc: None, ms: 0 },
            last_good_time: None,
            best: None,
            config,
        }
    }

    /// Load the best score from scratch memory
    ///
    /// A blank or corrupt record leaves no best score.
    pub fn restore_best<H: Hardware>(
        &mut self,
        hw: &mut H,
    ) -> Result<Option<BestScore>, RecordError> {
        self.best = BestScore::load(hw)?;
        Ok(self.best)
    }

    /// Run one loop iteration
    pub fn tick<H: Hardware>(&mut self, hw: &mut H) -> TickReport {
        let now = hw.now_ms();
        let mut report = TickReport::new(now);

        if let Some(ambient) = hw.take_transition() {
            hw.set_ambient(ambient);
            report.push(LoopEvent::AmbientChanged(ambient));
        }

        let present = hw.is_present();
        match self.presence.update(present, now) {
            PresenceAction::Wake => {
                hw.set_sleep(false);
                report.push(LoopEvent::DisplayWake);
                self.render(hw);
            }
            PresenceAction::Sleep => {
                hw.set_sleep(true);
                report.push(LoopEvent::DisplaySleep);
            }
            PresenceAction::None => {}
        }

        match self.mode {
            Mode::Waiting => self.tick_waiting(hw, now, &mut report),
            Mode::Playing => self.tick_playing(hw, now, &mut report),
        }

        report
    }

    fn tick_waiting<H: Hardware>(&mut self, hw: &mut H, now: u32, report: &mut TickReport) {
        let sample = hw.sample();
        match self.baseline {
            None => {
                self.baseline = Some(sample);
                return;
            }
            Some(baseline) if baseline == sample => return,
            Some(_) => {}
        }

        self.set_mode(self.mode.transition(Event::InputChanged), report);
        self.begin_session(hw, now, report);
        self.lockout.disarm();
        self.cue(hw, tones::START);
        self.render(hw);
    }

    fn tick_playing<H: Hardware>(&mut self, hw: &mut H, now: u32, report: &mut TickReport) {
        if !self.lockout.is_pending(now) {
            if let Some(direction) = hw.sample().direction() {
                self.game.set_direction(direction);
                self.lockout.arm(now);
            }
        }

        if self.step.poll(now) {
            let outcome = self.game.update();
            report.push(LoopEvent::Stepped(outcome));
            match outcome {
                StepOutcome::Moved => {}
                StepOutcome::Ate => self.cue(hw, tones::EAT),
                StepOutcome::GameOver(collision) => self.finish_game(hw, now, collision, report),
            }
            self.render(hw);
        }

        if self.mode.sends_heartbeat() && self.heartbeat.poll(now) {
            self.send_frame(hw, &TelemetryFrame::Heartbeat, report);
        }
    }

    fn finish_game<H: Hardware>(
        &mut self,
        hw: &mut H,
        now: u32,
        collision: Collision,
        report: &mut TickReport,
    ) {
        let score = self.game.score();
        let suppressed = self.presence.is_sleeping()
            && self.config.asleep_game_over == AsleepGameOverPolicy::Suppress;

        if !suppressed {
            let (finished_at, elapsed_s) = self.session_elapsed(hw, now, report);
            let frame = TelemetryFrame::ScoreReport(ScoreReport {
                finished_at,
                elapsed_s,
                score,
            });
            self.send_frame(hw, &frame, report);
            self.record_best(hw, score, finished_at, report);
            self.cue(hw, tones::GAME_OVER);
        }

        report.push(LoopEvent::GameOver {
            score,
            collision,
            reported: !suppressed,
        });

        self.game.setup();
        self.begin_session(hw, now, report);
        self.lockout.disarm();

        let event = if suppressed {
            self.heartbeat.arm(now);
            Event::GameOverSuppressed
        } else {
            Event::GameOverReported
        };
        self.set_mode(self.mode.transition(event), report);

        if self.mode == Mode::Waiting {
            self.step.disarm();
            self.baseline = Some(hw.sample());
        }
    }

    /// Record a new session start and arm the step deadline
    fn begin_session<H: Hardware>(&mut self, hw: &mut H, now: u32, report: &mut TickReport) {
        let rtc = match hw.read_time() {
            Ok(time) => {
                self.last_good_time = Some(time);
                Some(time)
            }
            Err(e) => {
                report.push(LoopEvent::ClockFault(e));
                None
            }
        };
        self.session = SessionStart { rtc, ms: now };
        self.step.arm(now);
    }

    /// End timestamp and session length in whole seconds
    ///
    /// Falls back to the monotonic clock and the last good RTC reading when
    /// the RTC cannot be read.
    fn session_elapsed<H: Hardware>(
        &mut self,
        hw: &mut H,
        now: u32,
        report: &mut TickReport,
    ) -> (RtcTime, u32) {
        let monotonic_s = (elapsed_ms(now, self.session.ms) / 1000).min(SECONDS_PER_DAY - 1);

        match hw.read_time() {
            Ok(end) => {
                self.last_good_time = Some(end);
                let elapsed = match self.session.rtc {
                    Some(start) => start.seconds_until(&end),
                    None => monotonic_s,
                };
                (end, elapsed)
            }
            Err(e) => {
                report.push(LoopEvent::ClockFault(e));
                (self.last_good_time.unwrap_or_default(), monotonic_s)
            }
        }
    }

    fn record_best<H: Hardware>(
        &mut self,
        hw: &mut H,
        score: u16,
        recorded_at: RtcTime,
        report: &mut TickReport,
    ) {
        let beaten = match self.best {
            Some(best) => best.is_beaten_by(score),
            None => score > 0,
        };
        if !beaten {
            return;
        }

        let record = BestScore::new(score, recorded_at);
        self.best = Some(record);
        report.push(LoopEvent::NewBest(score));

        if let Err(e) = record.store(hw) {
            report.push(LoopEvent::RecordFault(e));
        }
    }

    fn send_frame<H: Hardware>(
        &mut self,
        hw: &mut H,
        frame: &TelemetryFrame,
        report: &mut TickReport,
    ) {
        let kind = match frame {
            TelemetryFrame::ScoreReport(_) => FrameKind::ScoreReport,
            TelemetryFrame::Heartbeat => FrameKind::Heartbeat,
        };

        // Every frame fits a line; a failed encode would mean nothing to send
        if let Ok(line) = frame.encode() {
            hw.send(line.as_bytes());
            report.push(LoopEvent::FrameSent(kind));
        }
    }

    fn set_mode(&mut self, next: Mode, report: &mut TickReport) {
        if next != self.mode {
            self.mode = next;
            report.push(LoopEvent::ModeChanged(next));
        }
    }

    fn render<H: Hardware>(&mut self, hw: &mut H) {
        self.game.to_grid(&mut self.grid);
        hw.draw(&self.grid);
    }

    fn cue<H: Hardware>(&self, hw: &mut H, cue: &[tones::Tone]) {
        if self.config.sound_enabled {
            tones::play(hw, cue);
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn game(&self) -> &SnakeGame<R> {
        &self.game
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Best score seen since boot or restored from scratch
    pub fn best(&self) -> Option<BestScore> {
        self.best
    }

    /// Check if the presence monitor has put the display to sleep
    pub fn is_sleeping(&self) -> bool {
        self.presence.is_sleeping()
    }

    /// Monotonic time of the last heartbeat (or boot)
    pub fn last_heartbeat_ms(&self) -> u32 {
        self.heartbeat.armed_at()
    }
}
