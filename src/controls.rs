use macroquad::prelude::*;

use crate::config::ParamField;
use crate::grid::GridCoord;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    SelectTube(usize),
    Deselect,
    Pour(usize, usize),
    Undo,
    Reset,
    NewGame,
    CopyReport,
    AdjustParam(ParamField, isize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    label: String,
    action: ControlAction,
    color: Color,
}
impl Button {
    pub fn new(label: &str, action: ControlAction, color: Color) -> Self {
        Self {
            label: label.to_string(),
            action,
            color,
        }
    }
    pub fn action(&self) -> ControlAction {
        self.action
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Game buttons along the top bar, then the new-game form steppers.
pub fn default_buttons() -> Vec<Button> {
    let step = |label: &str, field, delta| {
        Button::new(label, ControlAction::AdjustParam(field, delta), DARKGRAY)
    };
    vec![
        Button::new("Undo", ControlAction::Undo, MAGENTA),
        Button::new("Reset", ControlAction::Reset, PINK),
        Button::new("New", ControlAction::NewGame, DARKGREEN),
        Button::new("Copy", ControlAction::CopyReport, ORANGE),
        step("N-", ParamField::Tubes, -1),
        step("N+", ParamField::Tubes, 1),
        step("V-", ParamField::Capacity, -1),
        step("V+", ParamField::Capacity, 1),
        step("M-", ParamField::Colors, -1),
        step("M+", ParamField::Colors, 1),
    ]
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitItem {
    Button { action: ControlAction },
    Cell { coord: GridCoord },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub rect: Rect,
    pub item: HitItem,
}

#[derive(Default)]
pub struct HitTestRegistry {
    items: Vec<HitRecord>,
}

impl HitTestRegistry {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, rect: Rect, item: HitItem) {
        self.items.push(HitRecord { rect, item });
    }

    /// Topmost item under the point; the last one registered wins.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&HitRecord> {
        self.items
            .iter()
            .rev()
            .find(|r| r.rect.contains(vec2(x, y)))
    }
}
