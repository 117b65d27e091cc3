use crate::agent::Agent;
use crate::canvas::Canvas;
use crate::config::SimConfig;
use crate::effects::{self, CollectionEvent};
use crate::grid::{Dir, Grid, Pos};
use crate::random::{RandSource, RandomSource};
use crate::render;
use log::{debug, info, trace, warn};
use rand::rngs::SmallRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    Wall,
    SelfCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Grid too small to host the agent; nothing moved.
    Idle,
    Moved,
    Collected(Pos),
    Reset(ResetReason),
}

/// A snake that wanders a grid collecting coins on its own.
///
/// All state lives here. [`tick`](Self::tick) advances the agent by one cell,
/// [`render`](Self::render) paints a frame and ages the pickup bursts. A wall
/// or self collision is not an error: the simulation silently reinitializes
/// for the last viewport it was given.
pub struct GridAgentSimulation<R = RandSource<SmallRng>> {
    config: SimConfig,
    viewport: (u32, u32),
    grid: Grid,
    agent: Agent,
    targets: Vec<Pos>,
    effects: Vec<CollectionEvent>,
    rng: R,
    collected: u64,
    resets: u64,
}

impl GridAgentSimulation {
    pub fn with_entropy(config: SimConfig, width: u32, height: u32) -> Self {
        Self::new(config, width, height, RandSource::from_entropy())
    }
}

impl<R: RandomSource> GridAgentSimulation<R> {
    /// An invalid `config` is replaced by [`SimConfig::default`].
    pub fn new(config: SimConfig, width: u32, height: u32, rng: R) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!("{err}; using the default simulation config");
                SimConfig::default()
            }
        };
        let mut sim = Self {
            config,
            viewport: (width, height),
            grid: Grid::default(),
            agent: Agent::empty(Dir::Right),
            targets: Vec::new(),
            effects: Vec::new(),
            rng,
            collected: 0,
            resets: 0,
        };
        sim.initialize(width, height);
        sim
    }

    /// Rebuilds grid, agent and targets for a `width x height` pixel viewport.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.grid = Grid::from_viewport(width, height, self.config.cell_size);
        self.targets.clear();
        self.effects.clear();

        let length = self.config.initial_length;
        if !self.grid.can_host(length) {
            debug!("grid {}x{} too small for a {length}-cell agent, staying dormant", self.grid.cols, self.grid.rows);
            self.agent = Agent::empty(Dir::Right);
            return;
        }

        // Keep the tail on the board on narrow grids.
        let start_x = (self.grid.cols / 4).max(length as i32 - 1);
        let head = Pos::new(start_x, self.grid.rows / 2);
        self.agent = Agent::straight(head, length, Dir::Right);

        // A failed placement means the board is crowded; later ones would fail too.
        for _ in 0..self.config.target_count {
            if self.place_target().is_none() {
                break;
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.initialize(width, height);
        info!("viewport {width}x{height} -> grid {}x{}", self.grid.cols, self.grid.rows);
    }

    pub fn reset(&mut self) {
        let (width, height) = self.viewport;
        self.initialize(width, height);
    }

    /// Drops one coin on a random free interior cell. Gives up after the
    /// configured number of attempts.
    pub fn place_target(&mut self) -> Option<Pos> {
        let (span_x, span_y) = self.grid.interior_span()?;
        for _ in 0..self.config.placement_attempts {
            let x = 1 + self.rng.below(span_x) as i32;
            let y = 1 + self.rng.below(span_y) as i32;
            let p = Pos::new(x, y);
            if !self.agent.occupies(p) && !self.targets.contains(&p) {
                self.targets.push(p);
                return Some(p);
            }
        }
        debug!("no free cell for a coin after {} attempts", self.config.placement_attempts);
        None
    }

    /// Picks the next heading: never a reversal, never into a wall or the
    /// body while a safe option exists. Usually heads for the nearest coin.
    pub fn choose_direction(&mut self) -> Dir {
        let current = self.agent.dir();
        let Some(head) = self.agent.head() else {
            return current;
        };

        let mut safe: Vec<(Dir, Pos)> = Dir::ALL
            .into_iter()
            .filter(|&d| d != current.opposite())
            .map(|d| (d, head.step(d)))
            .filter(|&(_, p)| self.grid.contains(p) && !self.agent.occupies(p))
            .collect();
        if safe.is_empty() {
            return current;
        }

        match self.nearest_target(head) {
            Some(target) => {
                safe.sort_by_key(|&(_, p)| p.manhattan(target));
                let roll = self.rng.unit();
                let pick = if safe.len() == 1 || roll < 1.0 - self.config.off_best_probability { 0 } else { 1 };
                safe[pick].0
            }
            None => safe[self.rng.below(safe.len())].0,
        }
    }

    fn nearest_target(&self, from: Pos) -> Option<Pos> {
        self.targets.iter().copied().min_by_key(|t| t.manhattan(from))
    }

    pub fn tick(&mut self) -> TickOutcome {
        let Some(head) = self.agent.head() else {
            return TickOutcome::Idle;
        };

        let dir = self.choose_direction();
        self.agent.set_dir(dir);
        let next = head.step(dir);

        let crash = if !self.grid.contains(next) {
            Some(ResetReason::Wall)
        } else if self.agent.occupies(next) {
            Some(ResetReason::SelfCollision)
        } else {
            None
        };
        if let Some(reason) = crash {
            self.resets += 1;
            debug!("{reason:?} at {next:?} with length {}, resetting", self.agent.len());
            self.reset();
            return TickOutcome::Reset(reason);
        }

        self.agent.push_head(next);
        let outcome = match self.targets.iter().position(|&t| t == next) {
            Some(i) => {
                self.targets.remove(i);
                self.effects.push(CollectionEvent::new(next));
                self.collected += 1;
                trace!("coin at {next:?}, length {}", self.agent.len());
                self.place_target();
                TickOutcome::Collected(next)
            }
            None => {
                self.agent.pop_tail();
                TickOutcome::Moved
            }
        };

        if self.agent.len() > self.config.max_length {
            self.agent.pop_tail();
        }
        // Refill after an earlier placement gave up.
        if self.targets.len() < self.config.target_count {
            self.place_target();
        }
        outcome
    }

    /// Paints one frame, then ages pickup bursts by a frame. Nothing else changes.
    pub fn render(&mut self, canvas: &mut Canvas, timestamp_ms: f64) {
        render::paint(self, canvas, timestamp_ms);
        effects::advance(&mut self.effects, self.config.effect_lifetime_frames);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn targets(&self) -> &[Pos] {
        &self.targets
    }

    pub fn effects(&self) -> &[CollectionEvent] {
        &self.effects
    }

    pub fn is_dormant(&self) -> bool {
        self.agent.is_empty()
    }

    pub fn collected(&self) -> u64 {
        self.collected
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }
}
