use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::{
    clock::GameClock,
    config::GameConfig,
    direction::{Direction, DirectionController},
    error::GameError,
    fruit::{Fruit, FruitSpawner},
    grid::{Cell, Grid},
    snake::{Color, Segment, Snake},
};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Booted, waiting for the first start
    Idle,
    Running,
    Paused,
    /// The snake ran into itself; only `start` leaves this state
    GameOver,
}

/// Events emitted by the session for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    ScoreChanged(u32),
    /// Start the pulse animation; report back through `complete_fruit_pulse`
    FruitEaten { cell: Cell, color: Color },
    FruitRespawned { cell: Cell },
    GameOver { final_score: u32 },
}

/// Read-only view of everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub grid: Grid,
    pub segments: &'a [Segment],
    pub fruit: &'a Fruit,
    pub state: SessionState,
    pub score: u32,
    /// The fruit has been eaten and waits for its animation before moving
    pub fruit_respawn_pending: bool,
}

/// Owns all mutable game state and drives it through its lifecycle
pub struct GameSession<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    state: SessionState,
    snake: Snake,
    fruit: Fruit,
    score: u32,
    ticks: u64,
    direction: DirectionController,
    clock: GameClock,
    spawner: FruitSpawner<R>,
    respawn_pending: bool,
}

impl GameSession<StdRng> {
    /// Create a session seeded from the operating system
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a session with a reproducible fruit sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Create an idle session with the snake and fruit in their boot positions
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let grid = config.grid();
        let snake = Snake::new(&grid, config.initial_snake_length);
        let mut fruit = Fruit::default();
        let mut spawner = FruitSpawner::new(rng, config.max_spawn_attempts);
        spawner.respawn(&mut fruit, &snake, &grid)?;

        Ok(Self {
            clock: GameClock::new(config.tick_interval(), config.max_catch_up_ticks),
            config,
            grid,
            state: SessionState::Idle,
            snake,
            fruit,
            score: 0,
            ticks: 0,
            direction: DirectionController::new(),
            spawner,
            respawn_pending: false,
        })
    }

    /// Begin a fresh game from any state
    pub fn start(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.score = 0;
        self.ticks = 0;
        self.snake = Snake::new(&self.grid, self.config.initial_snake_length);
        self.direction.reset();
        self.respawn_pending = false;
        let cell = self
            .spawner
            .respawn(&mut self.fruit, &self.snake, &self.grid)?;
        self.clock.reset();
        self.state = SessionState::Running;

        info!(
            "Session started on a {}x{} grid",
            self.grid.columns(),
            self.grid.rows()
        );

        Ok(vec![
            GameEvent::Started,
            GameEvent::ScoreChanged(0),
            GameEvent::FruitRespawned { cell },
        ])
    }

    /// Flip between running and paused; returns the new state, or `None` when
    /// there is no game to pause
    pub fn toggle_pause(&mut self) -> Option<SessionState> {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            SessionState::Idle | SessionState::GameOver => return None,
        };
        debug!("Session is now {:?}", self.state);
        Some(self.state)
    }

    /// Forward a steering request; reversals are dropped
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.direction.request_change(direction)
    }

    /// Execute one simulation step
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.state != SessionState::Running {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();

        // The eaten fruit stays in place during its pulse but cannot be eaten again
        let edible = (!self.respawn_pending).then_some(&self.fruit);
        let outcome = self
            .snake
            .step(self.direction.current(), &self.grid, edible);
        self.ticks += 1;

        if outcome.grew {
            self.score += 1;
            debug!(
                "Fruit eaten at ({}, {}), score {}",
                outcome.new_head.x, outcome.new_head.z, self.score
            );
            events.push(GameEvent::ScoreChanged(self.score));
            events.push(GameEvent::FruitEaten {
                cell: outcome.new_head,
                color: self.fruit.color,
            });

            if self.config.defer_fruit_respawn {
                self.respawn_pending = true;
            } else {
                self.respawn_fruit(&mut events)?;
            }

            // A head on the fruit cell cannot also be on the body
            return Ok(events);
        }

        if self.snake.has_collided() {
            self.end_game(&mut events);
        }

        Ok(events)
    }

    /// Feed one frame's elapsed time and run every tick that falls due
    ///
    /// Time is only accumulated while running, so a pause keeps the partial
    /// tick it started with.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Vec<GameEvent>, GameError> {
        if self.state != SessionState::Running {
            return Ok(Vec::new());
        }

        let due = self.clock.advance(elapsed);
        let mut events = Vec::new();

        for _ in 0..due {
            events.extend(self.tick()?);
            if self.state != SessionState::Running {
                break;
            }
        }

        Ok(events)
    }

    /// Called by the renderer once the eat animation has finished; moves the
    /// fruit if a move is pending
    pub fn complete_fruit_pulse(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        if !self.respawn_pending {
            return Ok(events);
        }

        self.respawn_pending = false;
        self.respawn_fruit(&mut events)?;
        Ok(events)
    }

    /// Place the fruit on a specific free cell
    ///
    /// Scenario seam for scripted setups and tests; normal play only moves
    /// the fruit through respawns. Returns false, leaving the fruit where it
    /// is, if the cell is off the grid or under the snake.
    #[doc(hidden)]
    pub fn place_fruit(&mut self, cell: Cell) -> bool {
        if !self.grid.contains(cell) || self.snake.occupies(cell) {
            return false;
        }

        self.fruit.cell = cell;
        self.respawn_pending = false;
        true
    }

    /// Whether the front end should keep requesting frames
    pub fn wants_frames(&self, animation_active: bool) -> bool {
        self.state == SessionState::Running || animation_active
    }

    /// Move the fruit mid-game; a snake that fills the board ends the game
    fn respawn_fruit(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        match self
            .spawner
            .respawn(&mut self.fruit, &self.snake, &self.grid)
        {
            Ok(cell) => events.push(GameEvent::FruitRespawned { cell }),
            Err(GameError::NoFreeCell { cells }) => {
                warn!("Snake filled all {} cells", cells);
                if matches!(self.state, SessionState::Running | SessionState::Paused) {
                    self.end_game(events);
                }
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn end_game(&mut self, events: &mut Vec<GameEvent>) {
        self.state = SessionState::GameOver;
        info!("Game over after {} ticks, final score {}", self.ticks, self.score);
        events.push(GameEvent::GameOver {
            final_score: self.score,
        });
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> &Fruit {
        &self.fruit
    }

    pub fn direction(&self) -> Direction {
        self.direction.current()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_respawn_pending(&self) -> bool {
        self.respawn_pending
    }

    pub fn scene(&self) -> SceneView<'_> {
        SceneView {
            grid: self.grid,
            segments: self.snake.segments(),
            fruit: &self.fruit,
            state: self.state,
            score: self.score,
            fruit_respawn_pending: self.respawn_pending,
        }
    }
}
