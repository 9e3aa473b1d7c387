use pathviz_core::{ConfigError, Grid};
use pathviz_paths::Algorithm;

use crate::sequencer::{Sequencer, StepLog};

/// Per-run statistics shown next to a track.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Cells the search finalized.
    pub visited: usize,
    /// Path cell count once a log exists; 0 when there is no path.
    pub path_len: Option<usize>,
}

/// One side of playback: a display grid, its algorithm, and the step log
/// built from running that algorithm on the grid's layout.
///
/// The display grid only ever carries replay marks. Searches run on a
/// snapshot, so its search annotations stay at their defaults.
#[derive(Clone, Debug)]
pub struct Track {
    grid: Grid,
    algorithm: Algorithm,
    seq: Option<Sequencer>,
    stats: Stats,
    no_path_found: bool,
}

impl Track {
    pub fn new(mut grid: Grid, algorithm: Algorithm) -> Self {
        grid.reset_annotations();
        Self {
            grid,
            algorithm,
            seq: None,
            stats: Stats::default(),
            no_path_found: false,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    pub fn no_path_found(&self) -> bool {
        self.no_path_found
    }

    #[inline]
    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.seq.as_ref()
    }

    #[inline]
    pub fn has_log(&self) -> bool {
        self.seq.is_some()
    }

    /// Index of the next step, 0 without a log.
    pub fn index(&self) -> usize {
        self.seq.as_ref().map_or(0, Sequencer::index)
    }

    /// Whether a log exists and has been fully applied.
    pub fn is_finished(&self) -> bool {
        self.seq.as_ref().is_some_and(Sequencer::is_finished)
    }

    /// Run the search and build the log, unless one already exists.
    ///
    /// Returns whether a log was built. On error the track is untouched.
    pub fn ensure_log(&mut self) -> Result<bool, ConfigError> {
        if self.seq.is_some() {
            return Ok(false);
        }
        let (_, result) = self.algorithm.search(&self.grid)?;
        self.grid.clear_marks();
        self.stats = Stats {
            visited: result.visited_order.len(),
            path_len: Some(result.path.len()),
        };
        self.no_path_found = result.path.is_empty();
        self.seq = Some(Sequencer::new(StepLog::build(&result)));
        Ok(true)
    }

    pub fn forward(&mut self) -> bool {
        match self.seq.as_mut() {
            Some(seq) => seq.forward(&mut self.grid),
            None => false,
        }
    }

    pub fn backward(&mut self) -> bool {
        match self.seq.as_mut() {
            Some(seq) => seq.backward(&mut self.grid),
            None => false,
        }
    }

    pub fn seek(&mut self, target: usize) -> usize {
        match self.seq.as_mut() {
            Some(seq) => seq.seek(&mut self.grid, target),
            None => 0,
        }
    }

    /// Discard the log and statistics and clear the grid's marks.
    pub fn reset_path(&mut self) {
        self.seq = None;
        self.stats = Stats::default();
        self.no_path_found = false;
        self.grid.reset_annotations();
    }

    /// Switch algorithm, discarding the current run.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.reset_path();
        self.algorithm = algorithm;
    }

    /// Replace the layout, discarding the current run.
    pub fn load(&mut self, grid: Grid) {
        self.reset_path();
        self.grid = grid;
        self.grid.reset_annotations();
    }
}

#[cfg(test)]
mod tests {
    use pathviz_core::Point;

    use super::*;

    #[test]
    fn log_is_built_once() {
        let mut t = Track::new(Grid::parse("S..E").unwrap(), Algorithm::Bfs);
        assert!(!t.has_log());
        assert_eq!(t.stats(), Stats::default());
        assert_eq!(t.ensure_log(), Ok(true));
        assert_eq!(
            t.stats(),
            Stats {
                visited: 4,
                path_len: Some(4)
            }
        );
        t.forward();
        assert_eq!(t.ensure_log(), Ok(false));
        assert_eq!(t.index(), 1);
    }

    #[test]
    fn unreachable_sets_flag() {
        let mut t = Track::new(Grid::parse("S#E").unwrap(), Algorithm::AStar);
        t.ensure_log().unwrap();
        assert!(t.no_path_found());
        assert_eq!(t.stats().path_len, Some(0));
        t.reset_path();
        assert!(!t.no_path_found());
        assert_eq!(t.stats().path_len, None);
    }

    #[test]
    fn config_error_leaves_track_untouched() {
        let mut t = Track::new(Grid::new(3, 3), Algorithm::Dijkstra);
        assert_eq!(t.ensure_log(), Err(ConfigError::MissingStart));
        assert!(!t.has_log());
        assert!(!t.forward());
        assert_eq!(t.seek(5), 0);
    }

    #[test]
    fn display_grid_keeps_default_search_state() {
        let mut t = Track::new(Grid::default(), Algorithm::Bfs);
        t.ensure_log().unwrap();
        t.seek(10);
        let c = t.grid().at(Point::new(5, 10)).unwrap();
        assert!(c.marks.visited);
        assert!(!c.search.visited);
    }

    #[test]
    fn load_and_switch_discard_run() {
        let mut t = Track::new(Grid::default(), Algorithm::Bfs);
        t.ensure_log().unwrap();
        t.seek(3);
        t.set_algorithm(Algorithm::Dfs);
        assert!(!t.has_log());
        assert!(t.grid().iter().all(|(_, c)| c.marks.is_clear()));
        t.ensure_log().unwrap();
        t.forward();
        t.load(Grid::parse("S.E").unwrap());
        assert!(!t.has_log());
        assert_eq!(t.grid().width(), 3);
        assert_eq!(t.algorithm(), Algorithm::Dfs);
    }
}
