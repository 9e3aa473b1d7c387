//! The top-level model: a single-run player, a two-track comparison
//! player, and the message routing between them.
//!
//! The single track's grid is the canonical layout. Edits always land
//! there; while comparison mode is on, both comparison tracks are
//! re-snapshotted from it after every edit.

use pathviz_core::{ConfigError, END, GRID_COLS, GRID_ROWS, Grid, GridError, Point, START};
use pathviz_paths::Algorithm;

use crate::app::{Effect, Model, TimerId};
use crate::msg::{HoldAction, Msg};
use crate::player::{PlayState, Player};
use crate::speed::{DEFAULT_SPEED, Speed};
use crate::track::{Stats, Track};

const SINGLE_PLAY: TimerId = TimerId(0);
const SINGLE_HOLD: TimerId = TimerId(1);
const COMPARE_PLAY: TimerId = TimerId(2);
const COMPARE_HOLD: TimerId = TimerId(3);

/// Session construction parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub end: Point,
    /// Raw speed; see [`Speed`].
    pub speed: u32,
    pub algorithm: Algorithm,
    pub algorithm_a: Algorithm,
    pub algorithm_b: Algorithm,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: GRID_COLS,
            height: GRID_ROWS,
            start: START,
            end: END,
            speed: DEFAULT_SPEED,
            algorithm: Algorithm::Bfs,
            algorithm_a: Algorithm::Bfs,
            algorithm_b: Algorithm::Dfs,
        }
    }
}

impl SessionConfig {
    /// The blank layout restored by [`Msg::ResetGrid`].
    pub fn blank_grid(&self) -> Result<Grid, GridError> {
        Grid::with_endpoints(self.width, self.height, self.start, self.end)
    }
}

/// The pathfinding session.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    single: Player,
    compare: Player,
    comparison: bool,
    last_error: Option<ConfigError>,
}

impl Session {
    /// A session on the config's blank layout.
    pub fn new(config: SessionConfig) -> Result<Self, GridError> {
        let grid = config.blank_grid()?;
        Ok(Self::with_grid(config, grid))
    }

    /// A session starting from an existing layout.
    pub fn with_grid(config: SessionConfig, grid: Grid) -> Self {
        let speed = Speed::new(config.speed);
        let single = Player::new(
            vec![Track::new(grid.snapshot(), config.algorithm)],
            speed,
            SINGLE_PLAY,
            SINGLE_HOLD,
        );
        let compare = Player::new(
            vec![
                Track::new(grid.snapshot(), config.algorithm_a),
                Track::new(grid, config.algorithm_b),
            ],
            speed,
            COMPARE_PLAY,
            COMPARE_HOLD,
        );
        Self {
            config,
            single,
            compare,
            comparison: false,
            last_error: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn is_comparison(&self) -> bool {
        self.comparison
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.single.speed()
    }

    /// The most recent refused run, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&ConfigError> {
        self.last_error.as_ref()
    }

    pub fn player(&self) -> &Player {
        &self.single
    }

    pub fn comparison_player(&self) -> &Player {
        &self.compare
    }

    /// Single-mode track; its grid is the canonical layout.
    pub fn track(&self) -> &Track {
        &self.single.tracks()[0]
    }

    pub fn track_a(&self) -> &Track {
        &self.compare.tracks()[0]
    }

    pub fn track_b(&self) -> &Track {
        &self.compare.tracks()[1]
    }

    pub fn grid(&self) -> &Grid {
        self.track().grid()
    }

    pub fn grid_a(&self) -> &Grid {
        self.track_a().grid()
    }

    pub fn grid_b(&self) -> &Grid {
        self.track_b().grid()
    }

    pub fn stats(&self) -> Stats {
        self.track().stats()
    }

    pub fn stats_a(&self) -> Stats {
        self.track_a().stats()
    }

    pub fn stats_b(&self) -> Stats {
        self.track_b().stats()
    }

    pub fn no_path_found(&self) -> bool {
        self.track().no_path_found()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.track().algorithm()
    }

    pub fn algorithm_a(&self) -> Algorithm {
        self.track_a().algorithm()
    }

    pub fn algorithm_b(&self) -> Algorithm {
        self.track_b().algorithm()
    }

    /// State of whichever player is active.
    pub fn state(&self) -> PlayState {
        self.active().state()
    }

    pub fn is_playing(&self) -> bool {
        self.active().is_playing()
    }

    fn active(&self) -> &Player {
        if self.comparison {
            &self.compare
        } else {
            &self.single
        }
    }

    fn active_mut(&mut self) -> &mut Player {
        if self.comparison {
            &mut self.compare
        } else {
            &mut self.single
        }
    }

    /// Record the outcome of a run request.
    fn run<T>(&mut self, result: Result<T, ConfigError>) -> Option<T> {
        match result {
            Ok(v) => {
                self.last_error = None;
                Some(v)
            }
            Err(e) => {
                log::warn!("cannot run search: {e}");
                self.last_error = Some(e);
                None
            }
        }
    }

    /// Copy the canonical layout into both comparison tracks.
    fn resnapshot(&mut self) -> Option<Effect> {
        let effect = self.compare.reset_path();
        let layout = self.grid().snapshot();
        for i in 0..2 {
            if let Some(t) = self.compare.track_mut(i) {
                t.load(layout.snapshot());
            }
        }
        effect
    }

    /// Apply a layout edit to a copy first; only a successful edit cancels
    /// timers and replaces the canonical grid.
    fn edit(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut Grid) -> Result<(), GridError>,
    ) -> Option<Effect> {
        let mut next = self.grid().snapshot();
        if let Err(e) = f(&mut next) {
            log::warn!("{what} refused: {e}");
            return None;
        }
        self.load(next)
    }

    fn load(&mut self, grid: Grid) -> Option<Effect> {
        let mut effects = vec![self.single.reset_path()];
        if let Some(t) = self.single.track_mut(0) {
            t.load(grid);
        }
        if self.comparison {
            effects.push(self.resnapshot());
        }
        Effect::batch(effects)
    }

    fn select_side(&mut self, i: usize, algorithm: Algorithm) -> Option<Effect> {
        let layout = self.grid().snapshot();
        let effect = self.compare.reset_track(i);
        if let Some(t) = self.compare.track_mut(i) {
            t.load(layout);
            t.set_algorithm(algorithm);
        }
        effect
    }

    fn set_comparison(&mut self, on: bool) -> Option<Effect> {
        if on == self.comparison {
            return None;
        }
        self.comparison = on;
        if on {
            log::debug!("entering comparison mode");
            let suspended = self.single.suspend();
            Effect::batch([suspended, self.resnapshot()])
        } else {
            log::debug!("leaving comparison mode");
            self.compare.suspend()
        }
    }

    fn hold_start(&mut self, action: HoldAction) -> Option<Effect> {
        let result = self.active_mut().hold_start(action);
        self.run(result).flatten()
    }
}

impl Model for Session {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::ToggleWall(p) => self.edit("toggle wall", |g| g.toggle_wall(p).map(drop)),
            Msg::MoveStart(p) => self.edit("move start", |g| g.move_start(p)),
            Msg::MoveEnd(p) => self.edit("move end", |g| g.move_end(p)),
            Msg::SetWeight(p, w) => self.edit("set weight", |g| g.set_weight(p, w)),
            Msg::LoadGrid(grid) => self.load(grid),
            Msg::ResetGrid => match self.config.blank_grid() {
                Ok(grid) => self.load(grid),
                Err(e) => {
                    log::warn!("reset grid refused: {e}");
                    None
                }
            },
            Msg::ResetPath => self.active_mut().reset_path(),
            Msg::SelectAlgorithm(a) => {
                let effect = self.single.reset_path();
                if let Some(t) = self.single.track_mut(0) {
                    t.set_algorithm(a);
                }
                effect
            }
            Msg::SelectAlgorithmA(a) => self.select_side(0, a),
            Msg::SelectAlgorithmB(a) => self.select_side(1, a),
            Msg::SetSpeed(raw) => {
                let speed = Speed::new(raw);
                self.config.speed = speed.raw();
                Effect::batch([
                    self.single.change_speed(speed),
                    self.compare.change_speed(speed),
                ])
            }
            Msg::Play => {
                let result = self.active_mut().play();
                self.run(result).flatten()
            }
            Msg::Pause => self.active_mut().pause(),
            Msg::TogglePlay => {
                let result = self.active_mut().toggle();
                self.run(result).flatten()
            }
            Msg::Step => {
                let result = self.active_mut().step();
                self.run(result);
                None
            }
            Msg::Back => {
                self.active_mut().back();
                None
            }
            Msg::Seek(n) => {
                let result = self.active_mut().seek(n);
                self.run(result);
                None
            }
            Msg::HoldStart(action) => self.hold_start(action),
            Msg::HoldEnd => self.active_mut().hold_end(),
            Msg::SetComparison(on) => self.set_comparison(on),
            Msg::Tick(token) => {
                if self.single.owns(token) {
                    self.single.tick(token)
                } else if self.compare.owns(token) {
                    self.compare.tick(token)
                } else {
                    log::trace!("tick for unknown {token}");
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pathviz_mapgen::{MapGen, Preset};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::app::TickToken;
    use crate::scheduler::Scheduler;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn session() -> Session {
        init();
        Session::new(SessionConfig::default()).unwrap()
    }

    fn delay(s: &Session) -> Duration {
        s.speed().delay()
    }

    fn first_tick(e: Option<Effect>) -> TickToken {
        let found = e.into_iter().flat_map(Effect::into_vec).find_map(|e| match e {
            Effect::Tick { token, .. } => Some(token),
            _ => None,
        });
        found.unwrap()
    }

    #[test]
    fn default_session_is_canonical() {
        let s = session();
        assert_eq!(s.grid(), &Grid::default());
        assert_eq!(s.state(), PlayState::Idle);
        assert_eq!(s.stats(), Stats::default());
        assert_eq!(s.algorithm_a(), Algorithm::Bfs);
        assert_eq!(s.algorithm_b(), Algorithm::Dfs);
        assert_eq!(s.speed().delay_ms(), 160);
    }

    #[test]
    fn autoplay_runs_to_completion() {
        let mut s = session();
        let mut sched = Scheduler::new();
        sched.dispatch(&mut s, Msg::Play);
        assert!(s.is_playing());
        let len = s.track().sequencer().unwrap().len();
        let fired = sched.run_until_idle(&mut s, 10_000);
        assert_eq!(fired, len);
        assert_eq!(s.state(), PlayState::Paused);
        assert!(s.track().is_finished());
        assert_eq!(s.stats().path_len, Some(41));
        assert_eq!(s.grid().count_fn(|_, c| c.marks.path), 41);
        assert_eq!(sched.now(), delay(&s) * len as u32);
    }

    #[test]
    fn no_path_scenario() {
        let mut s = session();
        for y in 0..GRID_ROWS {
            s.update(Msg::ToggleWall(Point::new(25, y)));
        }
        for algo in Algorithm::ALL {
            s.update(Msg::SelectAlgorithm(algo));
            s.update(Msg::Step);
            assert!(s.no_path_found(), "{algo}");
            assert_eq!(s.stats().path_len, Some(0));
            assert!(s.last_error().is_none());
        }
    }

    #[test]
    fn move_start_onto_wall() {
        let mut s = session();
        let p = Point::new(8, 3);
        s.update(Msg::ToggleWall(p));
        assert!(s.grid().at(p).unwrap().wall);
        s.update(Msg::MoveStart(p));
        assert!(!s.grid().at(p).unwrap().wall);
        assert!(s.grid().is_start(p));
        assert!(!s.grid().is_start(START));
    }

    #[test]
    fn refused_edit_keeps_run() {
        let mut s = session();
        s.update(Msg::Seek(5));
        assert_eq!(s.track().index(), 5);
        assert_eq!(s.update(Msg::ToggleWall(START)), None);
        assert_eq!(s.update(Msg::MoveEnd(START)), None);
        assert_eq!(s.update(Msg::SetWeight(Point::new(99, 0), 3)), None);
        assert_eq!(s.track().index(), 5);
        assert!(s.grid().at(START).is_some_and(|c| !c.wall));
    }

    #[test]
    fn edit_discards_run() {
        let mut s = session();
        let mut sched = Scheduler::new();
        sched.dispatch(&mut s, Msg::Play);
        let d = delay(&s);
        sched.advance(&mut s, d * 3);
        assert_eq!(s.track().index(), 3);
        sched.dispatch(&mut s, Msg::SetWeight(Point::new(20, 10), 5));
        assert_eq!(s.state(), PlayState::Idle);
        assert!(!s.track().has_log());
        assert!(sched.is_idle());
        assert!(s.grid().iter().all(|(_, c)| c.marks.is_clear()));
        assert_eq!(s.grid().at(Point::new(20, 10)).unwrap().weight, 5);
    }

    #[test]
    fn stale_tick_after_reset_is_noop() {
        let mut s = session();
        let token = first_tick(s.update(Msg::Play));
        assert!(s.update(Msg::Tick(token)).is_some());
        assert_eq!(s.track().index(), 1);
        s.update(Msg::ResetPath);
        assert_eq!(s.update(Msg::Tick(token)), None);
        assert_eq!(s.state(), PlayState::Idle);
        assert!(!s.track().has_log());
        assert!(s.grid().iter().all(|(_, c)| c.marks.is_clear()));

        // Same after a full grid reset.
        let token = first_tick(s.update(Msg::Play));
        s.update(Msg::ResetGrid);
        assert_eq!(s.update(Msg::Tick(token)), None);
        assert_eq!(s.grid(), &Grid::default());
    }

    #[test]
    fn select_algorithm_resets_run() {
        let mut s = session();
        s.update(Msg::Seek(12));
        s.update(Msg::SelectAlgorithm(Algorithm::AStar));
        assert_eq!(s.state(), PlayState::Idle);
        assert_eq!(s.algorithm(), Algorithm::AStar);
        s.update(Msg::Step);
        // A* on an open row goes straight for the end.
        assert_eq!(s.stats().visited, 41);
    }

    #[test]
    fn speed_change_keeps_cadence_consistent() {
        let mut s = session();
        let mut sched = Scheduler::new();
        sched.dispatch(&mut s, Msg::Play);
        sched.advance(&mut s, Duration::from_millis(100));
        assert_eq!(s.track().index(), 0);
        sched.dispatch(&mut s, Msg::SetSpeed(200));
        assert_eq!(s.speed().delay_ms(), 10);
        assert_eq!(sched.pending(), 1);
        sched.advance(&mut s, Duration::from_millis(50));
        assert_eq!(s.track().index(), 5);
        assert_eq!(s.config().speed, 200);
    }

    #[test]
    fn hold_step_repeats_until_release() {
        let mut s = session();
        let mut sched = Scheduler::new();
        let d = delay(&s);
        sched.dispatch(&mut s, Msg::HoldStart(HoldAction::Step));
        assert_eq!(s.track().index(), 1);
        sched.advance(&mut s, d * 3 + d / 2);
        assert!(s.track().index() >= 4);
        let held = s.track().index();
        sched.dispatch(&mut s, Msg::HoldEnd);
        assert!(sched.is_idle());
        sched.advance(&mut s, d * 10);
        assert_eq!(s.track().index(), held);
    }

    #[test]
    fn hold_back_rewinds() {
        let mut s = session();
        let mut sched = Scheduler::new();
        let d = delay(&s);
        sched.dispatch(&mut s, Msg::Seek(10));
        sched.dispatch(&mut s, Msg::HoldStart(HoldAction::Back));
        sched.advance(&mut s, d * 2);
        assert_eq!(s.track().index(), 7);
        sched.dispatch(&mut s, Msg::HoldEnd);
        sched.advance(&mut s, d * 5);
        assert_eq!(s.track().index(), 7);
    }

    #[test]
    fn comparison_steps_both_sides_independently() {
        let mut s = session();
        s.update(Msg::SetComparison(true));
        assert!(s.is_comparison());
        s.update(Msg::Step);
        assert_eq!(s.track_a().index(), 1);
        assert_eq!(s.track_b().index(), 1);
        assert_eq!(s.grid_a().count_fn(|_, c| c.marks.visited), 1);
        assert_eq!(s.grid_b().count_fn(|_, c| c.marks.visited), 1);
        // The single-mode track is untouched.
        assert!(!s.track().has_log());

        let a = s.stats_a();
        let b = s.stats_b();
        assert_eq!(a.path_len, Some(41));
        assert!(b.path_len > a.path_len);
    }

    #[test]
    fn comparison_shares_speed_and_tick() {
        let mut s = session();
        let mut sched = Scheduler::new();
        sched.dispatch(&mut s, Msg::SetComparison(true));
        sched.dispatch(&mut s, Msg::Play);
        assert_eq!(sched.pending(), 1);
        let d = delay(&s);
        sched.advance(&mut s, d * 4);
        assert_eq!(s.track_a().index(), 4);
        assert_eq!(s.track_b().index(), 4);
        sched.dispatch(&mut s, Msg::SetSpeed(150));
        assert_eq!(sched.pending(), 1);
        sched.advance(&mut s, Speed::new(150).delay() * 2);
        assert_eq!(s.track_a().index(), 6);
        assert_eq!(s.track_b().index(), 6);
    }

    #[test]
    fn comparison_runs_until_both_finish() {
        let mut s = session();
        let mut sched = Scheduler::new();
        sched.dispatch(&mut s, Msg::SetComparison(true));
        sched.dispatch(&mut s, Msg::Play);
        sched.run_until_idle(&mut s, 100_000);
        assert!(s.track_a().is_finished());
        assert!(s.track_b().is_finished());
        assert_eq!(s.state(), PlayState::Paused);
    }

    #[test]
    fn entering_comparison_suspends_single() {
        let mut s = session();
        let mut sched = Scheduler::new();
        sched.dispatch(&mut s, Msg::Play);
        let d = delay(&s);
        sched.advance(&mut s, d * 2);
        sched.dispatch(&mut s, Msg::SetComparison(true));
        assert!(sched.is_idle());
        assert_eq!(s.player().state(), PlayState::Paused);
        assert_eq!(s.state(), PlayState::Idle);
        sched.advance(&mut s, d * 5);
        assert_eq!(s.track().index(), 2);

        sched.dispatch(&mut s, Msg::Play);
        sched.dispatch(&mut s, Msg::SetComparison(false));
        assert!(sched.is_idle());
        assert_eq!(s.comparison_player().state(), PlayState::Paused);
    }

    #[test]
    fn comparison_snapshots_layout() {
        let mut s = session();
        let wall = Point::new(30, 10);
        s.update(Msg::ToggleWall(wall));
        s.update(Msg::SetComparison(true));
        assert!(s.grid_a().at(wall).unwrap().wall);
        assert!(s.grid_b().at(wall).unwrap().wall);

        s.update(Msg::Step);
        let other = Point::new(31, 10);
        s.update(Msg::ToggleWall(other));
        assert!(s.grid_a().at(other).unwrap().wall);
        assert!(!s.track_a().has_log());
        assert_eq!(s.state(), PlayState::Idle);
    }

    #[test]
    fn select_side_resets_only_that_side() {
        let mut s = session();
        s.update(Msg::SetComparison(true));
        s.update(Msg::Seek(3));
        s.update(Msg::SelectAlgorithmB(Algorithm::Dijkstra));
        assert_eq!(s.algorithm_b(), Algorithm::Dijkstra);
        assert!(!s.track_b().has_log());
        assert_eq!(s.track_a().index(), 3);
        assert_eq!(s.state(), PlayState::Paused);

        s.update(Msg::SelectAlgorithmA(Algorithm::AStar));
        assert_eq!(s.state(), PlayState::Idle);
    }

    #[test]
    fn missing_endpoint_is_reported() {
        let mut s = session();
        let mut grid = Grid::new(6, 4);
        grid.move_start(Point::new(0, 0)).unwrap();
        s.update(Msg::LoadGrid(grid));
        assert_eq!(s.update(Msg::Play), None);
        assert_eq!(s.last_error(), Some(&ConfigError::MissingEnd));
        assert_eq!(s.state(), PlayState::Idle);
        s.update(Msg::MoveEnd(Point::new(5, 3)));
        s.update(Msg::Step);
        assert_eq!(s.last_error(), None);
        assert_eq!(s.track().index(), 1);
    }

    #[test]
    fn generated_presets_play_through() {
        let mut mg = MapGen::new(StdRng::seed_from_u64(11));
        for preset in Preset::ALL {
            let mut s = session();
            let mut sched = Scheduler::new();
            sched.dispatch(&mut s, Msg::LoadGrid(mg.generate(preset).unwrap()));
            sched.dispatch(&mut s, Msg::SelectAlgorithm(Algorithm::AStar));
            sched.dispatch(&mut s, Msg::Play);
            sched.run_until_idle(&mut s, 100_000);
            assert!(s.track().is_finished(), "{preset}");
            assert!(!s.no_path_found(), "{preset}");
        }
    }

    #[test]
    fn toggle_play() {
        let mut s = session();
        assert!(s.update(Msg::TogglePlay).is_some());
        assert!(s.is_playing());
        assert_eq!(s.update(Msg::TogglePlay), Some(Effect::Cancel(TimerId(0))));
        assert_eq!(s.state(), PlayState::Paused);
    }
}
