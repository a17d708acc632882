use clipboard_rs::{Clipboard, ClipboardContext};
use macroquad::prelude::{info, warn};

use crate::config::PuzzleParams;
use crate::controls::*;
use crate::error::PuzzleError;
use crate::grid::{GridCoord, GridLayout};
use crate::puzzle::PuzzleEngine;
use crate::renderer::{Renderer, Scene};
use crate::report::format_move_history;

/// Drives one window: owns the current puzzle, the selected cell, the
/// new-game form and the renderer. Only this layer tracks selection.
pub struct GameController {
    game: PuzzleEngine,
    grid: GridLayout,
    params: PuzzleParams,
    buttons: Vec<Button>,
    renderer: Renderer,
    selected: Option<GridCoord>,
    message: Option<String>,
}

impl GameController {
    pub fn new(params: PuzzleParams) -> Result<Self, PuzzleError> {
        let mut controller = Self::with_engine(PuzzleEngine::from_params(params)?);
        controller.params = params;
        Ok(controller)
    }

    pub fn with_engine(game: PuzzleEngine) -> Self {
        let params = PuzzleParams::new(game.tube_count(), game.capacity(), game.color_count());
        Self {
            grid: GridLayout::for_tubes(game.tube_count()),
            game,
            params,
            buttons: default_buttons(),
            renderer: Renderer::new(),
            selected: None,
            message: None,
        }
    }

    pub fn game(&self) -> &PuzzleEngine {
        &self.game
    }

    pub fn params(&self) -> PuzzleParams {
        self.params
    }

    pub fn selected(&self) -> Option<GridCoord> {
        self.selected
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_solved(&self) -> bool {
        self.game.is_win()
    }

    fn selected_tube(&self) -> Option<usize> {
        self.selected.map(|coord| self.grid.grid_to_index(coord))
    }

    pub fn render(&mut self) {
        self.renderer.autoset_viewport();
        let report = if self.is_solved() {
            format_move_history(self.game.history())
        } else {
            Vec::new()
        };
        let scene = Scene {
            state: &self.game.state(),
            grid: self.grid,
            selected: self.selected,
            buttons: &self.buttons,
            params: self.params,
            message: self.message.as_deref(),
            report: &report,
        };
        self.renderer.render_game(&scene);
    }

    pub fn handle_click(&mut self, x: f32, y: f32) {
        let item = self
            .renderer
            .get_hit_test_registry()
            .hit_test(x, y)
            .map(|hit| hit.item);
        match item {
            Some(item) => self.handle_hit_item(item),
            None => self.handle_game_action(ControlAction::Deselect),
        }
    }

    fn handle_hit_item(&mut self, item: HitItem) {
        let action = match item {
            HitItem::Button { action } => action,
            HitItem::Cell { coord } => match (self.grid.tube_at(coord), self.selected_tube()) {
                (None, _) => ControlAction::Deselect,
                (Some(index), None) => ControlAction::SelectTube(index),
                (Some(index), Some(from)) if from == index => ControlAction::Deselect,
                (Some(index), Some(from)) => ControlAction::Pour(from, index),
            },
        };
        self.handle_game_action(action);
    }

    pub fn handle_game_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::SelectTube(index) => {
                if index < self.game.tube_count() {
                    self.selected = Some(self.grid.index_to_grid(index));
                }
            }
            ControlAction::Deselect => {
                self.selected = None;
            }
            ControlAction::Pour(from, to) => {
                self.selected = None;
                if self.game.apply_move(from, to).is_some() && self.game.is_win() {
                    info!("Puzzle solved in {} moves", self.game.history().len());
                    self.message = Some("Solved!".to_string());
                }
            }
            ControlAction::Undo => {
                self.selected = None;
                if self.game.undo().is_some() {
                    self.message = None;
                }
            }
            ControlAction::Reset => {
                self.selected = None;
                self.message = None;
                self.game.reset();
            }
            ControlAction::NewGame => {
                self.start_new_game();
            }
            ControlAction::CopyReport => {
                let mut lines = vec![self.game.to_string(), String::new()];
                lines.extend(format_move_history(self.game.history()));
                self.set_clipboard(&lines.join("\n"));
            }
            ControlAction::AdjustParam(field, delta) => {
                self.params.adjust(field, delta);
            }
        }
    }

    fn start_new_game(&mut self) {
        match PuzzleEngine::from_params(self.params) {
            Ok(game) => {
                self.grid = GridLayout::for_tubes(game.tube_count());
                self.game = game;
                self.selected = None;
                self.message = None;
            }
            Err(err) => {
                warn!("Rejected new game: {}", err);
                self.message = Some(err.to_string());
            }
        }
    }

    fn set_clipboard(&mut self, content: &str) {
        let result = ClipboardContext::new().and_then(|ctx| ctx.set_text(content.to_string()));
        match result {
            Ok(()) => self.message = Some("Copied moves to clipboard".to_string()),
            Err(err) => warn!("Clipboard unavailable: {}", err),
        }
    }
}
