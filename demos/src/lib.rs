//! Interactive editing model shared by the visualizer front-ends.
//!
//! The [`Editor`] owns the grid and turns user [`Input`]s into grid edits
//! using the classic placement rules: the first click sets the start, the
//! second the end, later clicks and drags draw barriers, the secondary
//! button erases. Running a search is left to the front-end, which gets a
//! [`Command::Search`] once both endpoints exist.

use pathgrid_core::{Grid, GridConfig, GridError, Pos, Role};
use pathgrid_crossterm::Input;
use pathgrid_paths::{Checkpoint, Outcome, SearchError, astar};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Share of free cells turned into barriers by [`Input::Scatter`].
pub const SCATTER_DENSITY: f64 = 0.3;

pub const HELP_TEXT: &str =
    "click: start, end, then walls | right-click: erase | space: run | r: random walls | /: reset | q: quit";

/// What the front-end should do after an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Nothing changed.
    None,
    /// Repaint these cells.
    Repaint(Vec<(Pos, Role)>),
    /// Repaint the whole grid.
    RepaintAll,
    /// Run a search between these endpoints.
    Search { start: Pos, end: Pos },
    Quit,
}

/// Grid plus the placement rules.
pub struct Editor {
    grid: Grid,
    rng: StdRng,
}

impl Editor {
    /// Build an empty grid from `config`; `seed` drives random barriers.
    pub fn new(config: &GridConfig, seed: u64) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::build(config.dimension)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn repaint(&self, cells: &[Pos]) -> Result<Command, GridError> {
        let cells = cells
            .iter()
            .map(|&p| self.grid.role(p).map(|r| (p, r)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Command::Repaint(cells))
    }

    fn primary(&mut self, pos: Pos) -> Result<Command, GridError> {
        let (start, end) = (self.grid.start(), self.grid.end());
        if start.is_none() && end != Some(pos) {
            self.grid.place_start(pos)?;
            return self.repaint(&[pos]);
        }
        if end.is_none() && start != Some(pos) {
            self.grid.place_end(pos)?;
            return self.repaint(&[pos]);
        }
        if start != Some(pos) && end != Some(pos) {
            if self.grid.cell(pos)?.is_barrier() {
                return Ok(Command::None);
            }
            self.grid.place_barrier(pos)?;
            return self.repaint(&[pos]);
        }
        Ok(Command::None)
    }

    fn secondary(&mut self, pos: Pos) -> Result<Command, GridError> {
        if self.grid.role(pos)? == Role::Empty {
            return Ok(Command::None);
        }
        self.grid.erase(pos)?;
        self.repaint(&[pos])
    }

    /// Turn free cells into barriers with probability `density`.
    pub fn scatter(&mut self, density: f64) -> Result<(), GridError> {
        self.grid.clear_search_marks();
        let free: Vec<Pos> = self
            .grid
            .roles()
            .filter(|(_, role)| *role == Role::Empty)
            .map(|(p, _)| p)
            .collect();
        for p in free {
            if self.rng.random_bool(density) {
                self.grid.place_barrier(p)?;
            }
        }
        Ok(())
    }

    /// Apply one input. Cells outside the grid are rejected with
    /// [`GridError::OutOfBounds`].
    pub fn apply(&mut self, input: Input) -> Result<Command, GridError> {
        match input {
            Input::Primary(pos) => self.primary(pos),
            Input::Secondary(pos) => self.secondary(pos),
            Input::Run => match (self.grid.start(), self.grid.end()) {
                (Some(start), Some(end)) => {
                    self.grid.clear_search_marks();
                    Ok(Command::Search { start, end })
                }
                _ => {
                    log::debug!("run ignored: start and end are not both placed");
                    Ok(Command::None)
                }
            },
            Input::Reset => {
                self.grid.reset();
                Ok(Command::RepaintAll)
            }
            Input::Scatter => {
                self.scatter(SCATTER_DENSITY)?;
                Ok(Command::RepaintAll)
            }
            Input::Quit => Ok(Command::Quit),
        }
    }

    /// Run A* on the edited grid.
    pub fn search<C: Checkpoint>(
        &mut self,
        start: Pos,
        end: Pos,
        checkpoint: C,
    ) -> Result<Outcome, SearchError> {
        astar(&mut self.grid, start, end, checkpoint)
    }
}

/// One-line summary of a finished search.
pub fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Succeeded(path) => format!(
            "path found: {} steps from {} to {}",
            path.len(),
            path.start(),
            path.end()
        ),
        Outcome::Exhausted => "no path: the end cannot be reached".to_string(),
        Outcome::Cancelled => "search cancelled".to_string(),
    }
}

/// Problems with the visualizer's command line.
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("unknown argument `{0}`")]
    Unknown(String),
    #[error("`{0}` needs a value")]
    MissingValue(String),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: String, value: String },
    #[error(transparent)]
    Config(#[from] GridError),
}

/// Build a [`GridConfig`] from `--dimension N` and `--delay MS` flags.
pub fn config_from_args<I>(args: I) -> Result<GridConfig, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = GridConfig::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        if flag != "--dimension" && flag != "--delay" {
            return Err(ArgsError::Unknown(flag));
        }
        let value = args
            .next()
            .ok_or_else(|| ArgsError::MissingValue(flag.clone()))?;
        let invalid = || ArgsError::InvalidValue {
            flag: flag.clone(),
            value: value.clone(),
        };
        if flag == "--dimension" {
            config.dimension = value.parse().map_err(|_| invalid())?;
        } else {
            config.step_delay_ms = value.parse().map_err(|_| invalid())?;
        }
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_paths::Unobserved;

    fn editor(dimension: i32) -> Editor {
        let config = GridConfig {
            dimension,
            ..GridConfig::default()
        };
        Editor::new(&config, 7).unwrap()
    }

    #[test]
    fn clicks_place_start_end_then_barriers() {
        let mut ed = editor(5);
        let p = |r, c| Input::Primary(Pos::new(r, c));

        assert_eq!(
            ed.apply(p(0, 0)).unwrap(),
            Command::Repaint(vec![(Pos::new(0, 0), Role::Start)])
        );
        // Clicking the start again does not make it the end.
        assert_eq!(ed.apply(p(0, 0)).unwrap(), Command::None);
        assert_eq!(
            ed.apply(p(4, 4)).unwrap(),
            Command::Repaint(vec![(Pos::new(4, 4), Role::End)])
        );
        assert_eq!(
            ed.apply(p(2, 2)).unwrap(),
            Command::Repaint(vec![(Pos::new(2, 2), Role::Barrier)])
        );
        // Dragging over an existing barrier is a no-op.
        assert_eq!(ed.apply(p(2, 2)).unwrap(), Command::None);
        assert_eq!(ed.apply(p(4, 4)).unwrap(), Command::None);
        assert_eq!(ed.grid().start(), Some(Pos::new(0, 0)));
        assert_eq!(ed.grid().end(), Some(Pos::new(4, 4)));
    }

    #[test]
    fn erase_releases_endpoints() {
        let mut ed = editor(5);
        ed.apply(Input::Primary(Pos::new(0, 0))).unwrap();
        ed.apply(Input::Primary(Pos::new(1, 1))).unwrap();
        assert_eq!(
            ed.apply(Input::Secondary(Pos::new(0, 0))).unwrap(),
            Command::Repaint(vec![(Pos::new(0, 0), Role::Empty)])
        );
        assert_eq!(ed.grid().start(), None);
        assert_eq!(ed.apply(Input::Secondary(Pos::new(3, 3))).unwrap(), Command::None);

        // The next primary click places a new start.
        ed.apply(Input::Primary(Pos::new(2, 0))).unwrap();
        assert_eq!(ed.grid().start(), Some(Pos::new(2, 0)));
    }

    #[test]
    fn run_needs_both_endpoints() {
        let mut ed = editor(5);
        assert_eq!(ed.apply(Input::Run).unwrap(), Command::None);
        ed.apply(Input::Primary(Pos::new(0, 0))).unwrap();
        assert_eq!(ed.apply(Input::Run).unwrap(), Command::None);
        ed.apply(Input::Primary(Pos::new(0, 4))).unwrap();
        assert_eq!(
            ed.apply(Input::Run).unwrap(),
            Command::Search {
                start: Pos::new(0, 0),
                end: Pos::new(0, 4)
            }
        );
    }

    #[test]
    fn search_then_rerun_clears_marks() {
        let mut ed = editor(5);
        ed.apply(Input::Primary(Pos::new(0, 0))).unwrap();
        ed.apply(Input::Primary(Pos::new(0, 4))).unwrap();
        let outcome = ed.search(Pos::new(0, 0), Pos::new(0, 4), Unobserved).unwrap();
        assert_eq!(describe(&outcome), "path found: 4 steps from (0, 0) to (0, 4)");
        assert!(ed.grid().snapshot().contains(&Role::Path));

        ed.apply(Input::Run).unwrap();
        assert!(!ed.grid().snapshot().contains(&Role::Path));
        assert_eq!(ed.grid().role(Pos::new(0, 0)).unwrap(), Role::Start);
    }

    #[test]
    fn reset_and_quit() {
        let mut ed = editor(4);
        ed.apply(Input::Primary(Pos::new(0, 0))).unwrap();
        ed.apply(Input::Primary(Pos::new(3, 3))).unwrap();
        ed.apply(Input::Primary(Pos::new(1, 1))).unwrap();
        assert_eq!(ed.apply(Input::Reset).unwrap(), Command::RepaintAll);
        assert!(ed.grid().snapshot().iter().all(|r| *r == Role::Empty));
        assert_eq!(ed.apply(Input::Quit).unwrap(), Command::Quit);
    }

    #[test]
    fn scatter_spares_endpoints() {
        let mut ed = editor(20);
        ed.apply(Input::Primary(Pos::new(0, 0))).unwrap();
        ed.apply(Input::Primary(Pos::new(19, 19))).unwrap();
        ed.scatter(1.0).unwrap();
        assert_eq!(ed.grid().start(), Some(Pos::new(0, 0)));
        assert_eq!(ed.grid().end(), Some(Pos::new(19, 19)));
        let barriers = ed
            .grid()
            .snapshot()
            .iter()
            .filter(|r| **r == Role::Barrier)
            .count();
        assert_eq!(barriers, 400 - 2);
        let outcome = ed.search(Pos::new(0, 0), Pos::new(19, 19), Unobserved).unwrap();
        assert_eq!(describe(&outcome), "no path: the end cannot be reached");
    }

    #[test]
    fn scatter_key_clears_marks_and_repaints() {
        let mut ed = editor(6);
        ed.apply(Input::Primary(Pos::new(0, 0))).unwrap();
        ed.apply(Input::Primary(Pos::new(5, 5))).unwrap();
        ed.search(Pos::new(0, 0), Pos::new(5, 5), Unobserved).unwrap();
        assert_eq!(ed.apply(Input::Scatter).unwrap(), Command::RepaintAll);
        let snapshot = ed.grid().snapshot();
        assert!(
            snapshot
                .iter()
                .all(|r| matches!(r, Role::Empty | Role::Barrier | Role::Start | Role::End))
        );
        assert_eq!(ed.grid().start(), Some(Pos::new(0, 0)));
        assert_eq!(ed.grid().end(), Some(Pos::new(5, 5)));
    }

    #[test]
    fn out_of_grid_click_is_an_error() {
        let mut ed = editor(3);
        assert!(matches!(
            ed.apply(Input::Primary(Pos::new(5, 5))),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn args_override_defaults() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let c = config_from_args(args(&["--dimension", "20", "--delay", "5"])).unwrap();
        assert_eq!(c.dimension, 20);
        assert_eq!(c.step_delay_ms, 5);
        assert_eq!(config_from_args(args(&[])).unwrap(), GridConfig::default());

        assert!(matches!(
            config_from_args(args(&["--size"])),
            Err(ArgsError::Unknown(_))
        ));
        assert!(matches!(
            config_from_args(args(&["--delay"])),
            Err(ArgsError::MissingValue(_))
        ));
        assert!(matches!(
            config_from_args(args(&["--dimension", "x"])),
            Err(ArgsError::InvalidValue { .. })
        ));
        assert!(matches!(
            config_from_args(args(&["--dimension", "0"])),
            Err(ArgsError::Config(GridError::InvalidDimension(0)))
        ));
    }
}
