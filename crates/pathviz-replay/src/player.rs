//! The playback controller.
//!
//! A [`Player`] drives one or more [`Track`]s in lockstep from a single
//! repeating play timer, plus a hold timer for press-and-hold stepping.
//! Both timers belong to the player, so independent players never cancel
//! each other's ticks.

use pathviz_core::ConfigError;

use crate::app::{Effect, TickToken, TimerId};
use crate::msg::HoldAction;
use crate::speed::Speed;
use crate::timer::Timer;
use crate::track::Track;

/// Playback state machine: `Idle → Running ⇄ Paused → Idle`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayState {
    /// No log yet, or the run was reset.
    #[default]
    Idle,
    Running,
    Paused,
}

#[derive(Clone, Debug)]
pub struct Player {
    tracks: Vec<Track>,
    play: Timer,
    hold: Timer,
    hold_action: Option<HoldAction>,
    speed: Speed,
    state: PlayState,
}

impl Player {
    /// A player over `tracks`, using `play` and `hold` as its timer ids.
    pub fn new(tracks: Vec<Track>, speed: Speed, play: TimerId, hold: TimerId) -> Self {
        Self {
            tracks,
            play: Timer::new(play),
            hold: Timer::new(hold),
            hold_action: None,
            speed,
            state: PlayState::Idle,
        }
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn track(&self, i: usize) -> Option<&Track> {
        self.tracks.get(i)
    }

    pub(crate) fn track_mut(&mut self, i: usize) -> Option<&mut Track> {
        self.tracks.get_mut(i)
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Running
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        self.hold_action.is_some()
    }

    /// Whether `token` was issued by one of this player's timers.
    pub fn owns(&self, token: TickToken) -> bool {
        token.timer == self.play.id() || token.timer == self.hold.id()
    }

    /// Every track has a log and is at its end.
    pub fn is_finished(&self) -> bool {
        self.tracks.iter().all(Track::is_finished)
    }

    fn build_logs(&mut self) -> Result<(), ConfigError> {
        for (i, t) in self.tracks.iter_mut().enumerate() {
            if t.ensure_log()? {
                log::debug!(
                    "track {i}: {} built {} steps ({} visited, path {:?})",
                    t.algorithm(),
                    t.sequencer().map_or(0, |s| s.len()),
                    t.stats().visited,
                    t.stats().path_len
                );
            }
        }
        if self.state == PlayState::Idle {
            self.state = PlayState::Paused;
        }
        Ok(())
    }

    fn forward_all(&mut self) -> bool {
        let mut moved = false;
        for t in &mut self.tracks {
            moved |= t.forward();
        }
        moved
    }

    fn backward_all(&mut self) -> bool {
        let mut moved = false;
        for t in &mut self.tracks {
            moved |= t.backward();
        }
        moved
    }

    /// Start autoplay, building logs first if needed.
    ///
    /// A no-op while running. When every track is already at its end the
    /// player stays paused instead of starting a timer.
    pub fn play(&mut self) -> Result<Option<Effect>, ConfigError> {
        if self.state == PlayState::Running {
            return Ok(None);
        }
        self.build_logs()?;
        if self.is_finished() {
            self.state = PlayState::Paused;
            return Ok(None);
        }
        self.state = PlayState::Running;
        log::debug!("playing at {} ms per step", self.speed.delay_ms());
        Ok(Some(self.play.start(self.speed.delay())))
    }

    /// Stop autoplay. Idempotent; an idle player stays idle.
    pub fn pause(&mut self) -> Option<Effect> {
        if self.state == PlayState::Running {
            self.state = PlayState::Paused;
            log::debug!("paused");
        }
        self.play.cancel()
    }

    pub fn toggle(&mut self) -> Result<Option<Effect>, ConfigError> {
        if self.is_playing() {
            Ok(self.pause())
        } else {
            self.play()
        }
    }

    /// Apply one forward step on every track, building logs first if
    /// needed. The play timer is left alone.
    pub fn step(&mut self) -> Result<bool, ConfigError> {
        self.build_logs()?;
        Ok(self.forward_all())
    }

    /// Undo one step on every track. Never builds a log.
    pub fn back(&mut self) -> bool {
        self.backward_all()
    }

    /// Scrub every track to step `target`, clamped per track.
    pub fn seek(&mut self, target: usize) -> Result<(), ConfigError> {
        self.build_logs()?;
        for t in &mut self.tracks {
            t.seek(target);
        }
        Ok(())
    }

    /// Change speed, restarting any running timer at the new delay.
    pub fn change_speed(&mut self, speed: Speed) -> Option<Effect> {
        self.speed = speed;
        let delay = speed.delay();
        let mut effects = Vec::new();
        if self.state == PlayState::Running {
            effects.push(self.play.cancel());
            effects.push(Some(self.play.start(delay)));
        }
        if self.hold_action.is_some() {
            effects.push(self.hold.cancel());
            effects.push(Some(self.hold.start(delay)));
        }
        Effect::batch(effects)
    }

    /// Begin press-and-hold: act once now, then repeat every delay until
    /// [`hold_end`](Self::hold_end).
    pub fn hold_start(&mut self, action: HoldAction) -> Result<Option<Effect>, ConfigError> {
        match action {
            HoldAction::Step => {
                self.step()?;
            }
            HoldAction::Back => {
                self.back();
            }
        }
        let cancel = self.hold.cancel();
        self.hold_action = Some(action);
        Ok(Effect::batch([cancel, Some(self.hold.start(self.speed.delay()))]))
    }

    pub fn hold_end(&mut self) -> Option<Effect> {
        self.hold_action = None;
        self.hold.cancel()
    }

    /// Handle a timer tick. Stale or foreign tokens are ignored.
    pub fn tick(&mut self, token: TickToken) -> Option<Effect> {
        if self.play.accepts(token) {
            self.forward_all();
            log::trace!("play tick {token}");
            if self.is_finished() {
                self.state = PlayState::Paused;
                log::debug!("playback reached the end");
                return self.play.cancel();
            }
            return Some(self.play.rearm(self.speed.delay()));
        }
        if self.hold.accepts(token) {
            match self.hold_action {
                Some(HoldAction::Step) => {
                    self.forward_all();
                }
                Some(HoldAction::Back) => {
                    self.backward_all();
                }
                None => return self.hold.cancel(),
            }
            log::trace!("hold tick {token}");
            return Some(self.hold.rearm(self.speed.delay()));
        }
        log::trace!("ignoring stale tick {token}");
        None
    }

    /// Cancel both timers, leaving logs in place.
    pub fn suspend(&mut self) -> Option<Effect> {
        let hold = self.hold_end();
        let play = self.pause();
        Effect::batch([play, hold])
    }

    /// Cancel both timers, then discard every track's run.
    pub fn reset_path(&mut self) -> Option<Effect> {
        let effect = self.suspend();
        for t in &mut self.tracks {
            t.reset_path();
        }
        self.state = PlayState::Idle;
        effect
    }

    /// Reset one track's run; the player goes idle once no track has a log.
    pub(crate) fn reset_track(&mut self, i: usize) -> Option<Effect> {
        let effect = self.suspend();
        if let Some(t) = self.tracks.get_mut(i) {
            t.reset_path();
        }
        if !self.tracks.iter().any(Track::has_log) {
            self.state = PlayState::Idle;
        }
        effect
    }
}
