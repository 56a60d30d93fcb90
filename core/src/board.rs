use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Unconfigured,
    Configured,
    /// Mines are placed and nothing is revealed yet.
    Ready,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_configured(self) -> bool {
        !matches!(self, Self::Unconfigured)
    }

    pub const fn has_mines(self) -> bool {
        matches!(self, Self::Ready | Self::InProgress | Self::Won | Self::Lost)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// How far revealing a zero cell spreads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeMode {
    /// Keep expanding through every connected zero cell.
    #[default]
    FloodFill,
    /// Only uncover the ring directly around the revealed cell.
    SingleRing,
}

/// Grid, mine layout and lifecycle of a single game.
#[derive(Clone, Debug)]
pub struct GameBoard {
    config: Option<GameConfig>,
    cells: Array2<Cell>,
    state: GameState,
    revealed_safe: CellCount,
    first_move_taken: bool,
    triggered_mine: Option<Coord2>,
    cascade_mode: CascadeMode,
    safe_first_move: bool,
    generator: RandomMineGenerator,
}

impl GameBoard {
    pub fn new(seed: u64) -> Self {
        Self {
            config: None,
            cells: Array2::default((0, 0)),
            state: GameState::Unconfigured,
            revealed_safe: 0,
            first_move_taken: false,
            triggered_mine: None,
            cascade_mode: CascadeMode::default(),
            safe_first_move: false,
            generator: RandomMineGenerator::new(seed),
        }
    }

    pub fn with_cascade_mode(mut self, cascade_mode: CascadeMode) -> Self {
        self.cascade_mode = cascade_mode;
        self
    }

    pub fn with_safe_first_move(mut self, safe_first_move: bool) -> Self {
        self.safe_first_move = safe_first_move;
        self
    }

    pub fn cascade_mode(&self) -> CascadeMode {
        self.cascade_mode
    }

    pub fn set_cascade_mode(&mut self, cascade_mode: CascadeMode) {
        self.cascade_mode = cascade_mode;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    /// `(width, height)`, `(0, 0)` until configured.
    pub fn size(&self) -> Coord2 {
        self.config.map_or((0, 0), |config| config.size)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.map_or(0, |config| config.mines)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn first_move_taken(&self) -> bool {
        self.first_move_taken
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Clears the board and rebuilds an empty grid, the mine count drops to zero.
    pub fn reset(&mut self, width: i64, height: i64) {
        self.apply_config(GameConfig::new(width, height, 0));
    }

    /// Resets the board for a new game, clamping out-of-range input.
    pub fn configure(&mut self, width: i64, height: i64, mine_count: i64) -> GameConfig {
        let config = GameConfig::new(width, height, mine_count);
        self.apply_config(config);
        config
    }

    /// Like [`GameBoard::configure`] but rejects out-of-range input, leaving the board untouched.
    pub fn configure_strict(&mut self, width: i64, height: i64, mine_count: i64) -> Result<GameConfig> {
        let config = GameConfig::try_new(width, height, mine_count)?;
        self.apply_config(config);
        Ok(config)
    }

    /// Configures from raw text fields, leaving the board untouched when any of them is not a number.
    pub fn configure_from_text(&mut self, width: &str, height: &str, mine_count: &str) -> Result<GameConfig> {
        let config = GameConfig::parse(width, height, mine_count)?;
        self.apply_config(config);
        Ok(config)
    }

    fn apply_config(&mut self, config: GameConfig) {
        let (width, height) = config.size;
        self.cells = Array2::from_shape_fn(config.shape(), |(y, x)| {
            Cell::new((x as Coord, y as Coord))
        });
        self.config = Some(config);
        self.state = GameState::Configured;
        self.revealed_safe = 0;
        self.first_move_taken = false;
        self.triggered_mine = None;
        log::debug!(
            "Board configured: {}x{} with {} mines",
            width,
            height,
            config.mines
        );
    }

    /// Lays out mines with the board's own seeded generator.
    pub fn place_mines(&mut self) -> Result<()> {
        let config = self.check_can_place()?;
        let mine_mask = self.generator.generate(&config)?;
        self.apply_mines(config, mine_mask)
    }

    pub fn place_mines_with<G: MineGenerator>(&mut self, generator: &mut G) -> Result<()> {
        let config = self.check_can_place()?;
        let mine_mask = generator.generate(&config)?;
        self.apply_mines(config, mine_mask)
    }

    fn check_can_place(&self) -> Result<GameConfig> {
        let config = self.config.ok_or(GameError::NotConfigured)?;
        match self.state {
            GameState::Configured | GameState::Ready => Ok(config),
            GameState::Unconfigured => Err(GameError::NotConfigured),
            GameState::InProgress | GameState::Won | GameState::Lost => {
                Err(GameError::AlreadyStarted)
            }
        }
    }

    fn apply_mines(&mut self, mut config: GameConfig, mine_mask: Array2<bool>) -> Result<()> {
        if mine_mask.dim() != self.cells.dim() {
            return Err(GameError::InvalidBoardShape);
        }

        let mut placed: CellCount = 0;
        self.cells.zip_mut_with(&mine_mask, |cell, &is_mine| {
            cell.set_mine(is_mine);
            if is_mine {
                placed += 1;
            }
        });

        if placed != config.mines {
            log::debug!(
                "Mine count changed by layout, configured {} but placed {}",
                config.mines,
                placed
            );
            config.mines = placed;
        }
        self.config = Some(config);
        self.state = GameState::Ready;
        Ok(())
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        self.cell(coords).map(Cell::state)
    }

    /// All cells in linear order, `y * width + x`.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Mines among the unrevealed neighbours of `coords`.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.unrevealed_mines_around(coords))
    }

    fn unrevealed_mines_around(&self, coords: Coord2) -> u8 {
        let mut count = 0;
        for pos in self.neighbors(coords) {
            let cell = &self.cells[pos.to_nd_index()];
            if cell.is_mine() && !cell.is_revealed() {
                count += 1;
            }
        }
        count
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult> {
        if !self.state.is_configured() {
            return Err(GameError::NotConfigured);
        }
        if !self.state.has_mines() {
            return Err(GameError::MinesNotPlaced);
        }
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        let mut result = RevealResult::default();
        if self.cells[coords.to_nd_index()].is_revealed() {
            return Ok(result);
        }

        if self.cells[coords.to_nd_index()].is_mine() {
            if self.safe_first_move && !self.first_move_taken {
                self.relocate_mine(coords);
            } else {
                self.cells[coords.to_nd_index()].reveal_mine();
                self.first_move_taken = true;
                self.triggered_mine = Some(coords);
                self.state = GameState::Lost;
                log::debug!("Mine triggered at {:?}", coords);
                result.triggered_mine = true;
                return Ok(result);
            }
        }

        let count = self.reveal_safe(coords, &mut result);
        if count == 0 {
            match self.cascade_mode {
                CascadeMode::SingleRing => self.cascade_ring(coords, &mut result),
                CascadeMode::FloodFill => self.cascade_flood(coords, &mut result),
            }
            log::debug!(
                "Cascade from {:?} revealed {} cells",
                coords,
                result.revealed_cells.len()
            );
        }
        self.first_move_taken = true;

        if self.check_win_condition() {
            self.state = GameState::Won;
            result.won = true;
            log::debug!("All safe cells revealed, game won");
        } else {
            self.state = GameState::InProgress;
        }

        Ok(result)
    }

    /// Reveals one safe cell, records it in `result` and returns its count.
    fn reveal_safe(&mut self, coords: Coord2, result: &mut RevealResult) -> u8 {
        let count = self.unrevealed_mines_around(coords);
        self.cells[coords.to_nd_index()].reveal_with_count(count);
        self.revealed_safe += 1;
        result.revealed_cells.push(RevealedCell {
            position: coords,
            adjacent_mine_count: count,
        });
        count
    }

    fn is_hidden_safe(&self, coords: Coord2) -> bool {
        let cell = &self.cells[coords.to_nd_index()];
        !cell.is_revealed() && !cell.is_mine()
    }

    fn cascade_ring(&mut self, coords: Coord2, result: &mut RevealResult) {
        let ring: Vec<Coord2> = self
            .neighbors(coords)
            .filter(|&pos| self.is_hidden_safe(pos))
            .collect();

        for pos in ring {
            self.reveal_safe(pos, result);
        }
    }

    fn cascade_flood(&mut self, coords: Coord2, result: &mut RevealResult) {
        let mut visited = BTreeSet::from([coords]);
        let mut to_visit: VecDeque<_> = self
            .neighbors(coords)
            .filter(|&pos| self.is_hidden_safe(pos))
            .collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) || !self.is_hidden_safe(visit_coords) {
                continue;
            }

            if self.reveal_safe(visit_coords, result) == 0 {
                to_visit.extend(
                    self.neighbors(visit_coords)
                        .filter(|&pos| self.is_hidden_safe(pos))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Moves the mine at `coords` onto a uniformly chosen safe cell.
    fn relocate_mine(&mut self, coords: Coord2) {
        let safe_cells: Vec<Coord2> = self
            .cells
            .iter()
            .filter(|cell| !cell.is_mine())
            .map(Cell::position)
            .collect();

        // at least one safe cell always exists, the clamp keeps mines below total cells
        if safe_cells.is_empty() {
            return;
        }

        let target = safe_cells[self.generator.pick(safe_cells.len())];
        self.cells[coords.to_nd_index()].set_mine(false);
        self.cells[target.to_nd_index()].set_mine(true);
        log::debug!("First move hit a mine, moved it from {:?} to {:?}", coords, target);
    }

    /// Uncovers every mine for the game-over view and returns the ones that were still hidden.
    pub fn reveal_all_mines(&mut self) -> Vec<Coord2> {
        let mut revealed = Vec::new();
        for cell in self.cells.iter_mut() {
            if cell.is_mine() && !cell.is_revealed() {
                cell.reveal_mine();
                revealed.push(cell.position());
            }
        }
        revealed
    }

    /// True once every non-mine cell is revealed.
    pub fn check_win_condition(&self) -> bool {
        match (self.state, self.config) {
            (GameState::Lost, _) | (_, None) => false,
            (state, Some(config)) => {
                state.has_mines() && self.revealed_safe == config.safe_cell_count()
            }
        }
    }

    fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        self.config
            .ok_or(GameError::NotConfigured)?
            .validate_coords(coords)
    }
}
