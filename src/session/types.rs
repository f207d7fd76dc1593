//! Session state shared by the reveal engine, challenge, and navigation.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{generate_board, Board, Cell};
use crate::challenge::{DefuseChallenge, ProblemHistory};
use crate::core::{GameConfig, Result};
use crate::pointer::{CameraState, Viewport};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting gameplay input.
    Playing,
    /// A mine was revealed; only challenge keystrokes are accepted.
    Defusing(DefuseChallenge),
    /// Layer cleared; input frozen until the transition delay elapses.
    LayerComplete { elapsed_ms: u64 },
    /// A defuse failed. Terminal until reset.
    GameOver,
    /// Final layer cleared. Terminal until reset.
    Won,
}

impl SessionPhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn is_defusing(&self) -> bool {
        matches!(self, Self::Defusing(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// A complete single-player session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    /// The active layer.
    pub board: Board,
    pub phase: SessionPhase,
    /// Zero-based index of the active layer.
    pub current_layer: u32,
    pub score: u64,
    /// Safe cells revealed on the active layer, defused mines included.
    pub safe_cells_revealed: usize,
    pub flags_placed: usize,
    pub scanner_charges: u32,
    /// Selection cursor as `(row, col)`.
    pub selection: (usize, usize),
    /// Unrevealed cell under the pointer, if any.
    pub hover: Option<(usize, usize)>,
    pub hack_mode: bool,
    pub camera: CameraState,
    pub viewport: Viewport,
    pub problem_history: ProblemHistory,
    pub(super) rng: StdRng,
}

fn center_of(board: &Board) -> (usize, usize) {
    (board.height / 2, board.width / 2)
}

impl GameSession {
    /// Validate `config` and generate the first layer.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = generate_board(config.width, config.height, config.mine_density, &mut rng)?;
        Ok(Self::assemble(config, board, rng))
    }

    /// Start a session on a prepared first layer. Later layers are generated
    /// from `config`, whose dimensions are taken from `board`.
    pub fn with_board(mut config: GameConfig, board: Board) -> Result<Self> {
        config.width = board.width;
        config.height = board.height;
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::assemble(config, board, rng))
    }

    fn assemble(config: GameConfig, board: Board, rng: StdRng) -> Self {
        tracing::info!(
            width = board.width,
            height = board.height,
            mines = board.mine_count(),
            layers = config.total_layers,
            "session started"
        );
        Self {
            selection: center_of(&board),
            scanner_charges: config.scanner_charges,
            config,
            board,
            phase: SessionPhase::Playing,
            current_layer: 0,
            score: 0,
            safe_cells_revealed: 0,
            flags_placed: 0,
            hover: None,
            hack_mode: false,
            camera: CameraState::default(),
            viewport: Viewport::default(),
            problem_history: ProblemHistory::new(),
            rng,
        }
    }

    /// Replace the active layer with a freshly generated one and reset the
    /// per-layer counters.
    pub(super) fn start_layer(&mut self) -> Result<()> {
        self.board = generate_board(
            self.config.width,
            self.config.height,
            self.config.mine_density,
            &mut self.rng,
        )?;
        self.safe_cells_revealed = 0;
        self.flags_placed = 0;
        self.hack_mode = false;
        self.hover = None;
        self.selection = center_of(&self.board);
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// Full restart: score, layer index, and scanner charges go back to
    /// their starting values. The problem history survives unless the config
    /// says otherwise.
    pub fn reset(&mut self) -> Result<()> {
        self.current_layer = 0;
        self.score = 0;
        self.scanner_charges = self.config.scanner_charges;
        if self.config.reset_problem_history_on_restart {
            self.problem_history.clear();
        }
        self.start_layer()?;
        tracing::info!(
            problems_issued = self.problem_history.len(),
            "session reset"
        );
        Ok(())
    }

    pub fn selected_cell(&self) -> Option<&Cell> {
        self.board.get(self.selection.0, self.selection.1)
    }

    pub fn challenge(&self) -> Option<&DefuseChallenge> {
        match &self.phase {
            SessionPhase::Defusing(challenge) => Some(challenge),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn is_won(&self) -> bool {
        self.phase == SessionPhase::Won
    }

    pub fn is_layer_complete(&self) -> bool {
        matches!(self.phase, SessionPhase::LayerComplete { .. })
    }

    pub fn total_layers(&self) -> u32 {
        self.config.total_layers
    }
}
