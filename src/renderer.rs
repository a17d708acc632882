use std::collections::HashMap;

use macroquad::prelude::*;

use crate::config::PuzzleParams;
use crate::controls::{Button, HitItem, HitTestRegistry};
use crate::grid::{GridCoord, GridLayout};
use crate::model::EMPTY;

/// Drop colors by id, starting at color 1. Ids past the end wrap around.
pub const DROP_COLORS: [Color; 19] = [
    Color::new(0.976, 0.255, 0.267, 1.0), // #f94144
    Color::new(0.953, 0.447, 0.173, 1.0), // #f3722c
    Color::new(0.976, 0.780, 0.310, 1.0), // #f9c74f
    Color::new(0.565, 0.745, 0.427, 1.0), // #90be6d
    Color::new(0.263, 0.667, 0.545, 1.0), // #43aa8b
    Color::new(0.341, 0.459, 0.565, 1.0), // #577590
    Color::new(0.153, 0.490, 0.631, 1.0), // #277da1
    Color::new(0.616, 0.306, 0.867, 1.0), // #9d4edd
    Color::new(1.0  , 0.678, 0.678, 1.0), // #ffadad
    Color::new(1.0  , 0.839, 0.647, 1.0), // #ffd6a5
    Color::new(0.792, 1.0  , 0.749, 1.0), // #caffbf
    Color::new(0.741, 0.698, 1.0  , 1.0), // #bdb2ff
    Color::new(0.561, 0.506, 0.718, 1.0), // #8f81b7
    Color::new(1.0  , 0.702, 0.757, 1.0), // #ffb3c1
    Color::new(1.0  , 0.820, 0.400, 1.0), // #ffd166
    Color::new(0.024, 0.839, 0.627, 1.0), // #06d6a0
    Color::new(0.067, 0.541, 0.698, 1.0), // #118ab2
    Color::new(0.027, 0.231, 0.298, 1.0), // #073b4c
    Color::new(0.608, 0.365, 0.898, 1.0), // #9b5de5
];

pub fn drop_color(code: usize) -> Option<Color> {
    if code == EMPTY {
        return None;
    }
    Some(DROP_COLORS[(code - 1) % DROP_COLORS.len()])
}

/// Everything one frame shows. Tube contents arrive as plain slot codes.
pub struct Scene<'a> {
    pub state: &'a [Vec<usize>],
    pub grid: GridLayout,
    pub selected: Option<GridCoord>,
    pub buttons: &'a [Button],
    pub params: PuzzleParams,
    pub message: Option<&'a str>,
    pub report: &'a [String],
}

/// Font size and offsets that fit a text into a box, centered.
type TextFit = (f32, f32, f32);

#[derive(Default)]
struct TextFitter {
    cache: HashMap<(String, u16, u16), TextFit>,
}

impl TextFitter {
    fn fit(&mut self, text: &str, width: f32, height: f32) -> TextFit {
        let key = (
            text.to_string(),
            width.round().clamp(0.0, u16::MAX as f32) as u16,
            height.round().clamp(0.0, u16::MAX as f32) as u16,
        );
        *self.cache.entry(key).or_insert_with(|| {
            let reference_size = 100u16;
            let dims = measure_text(text, None, reference_size, 1.0);
            if dims.width <= 0.0 || dims.height <= 0.0 {
                return (0.0, 0.0, 0.0);
            }
            let scale = (width / dims.width).min(height / dims.height);
            let font_size = reference_size as f32 * scale;
            let offset_x = (width - dims.width * scale) / 2.0;
            let offset_y = (height - dims.height * scale) / 2.0 + dims.offset_y * scale;
            (font_size, offset_x, offset_y)
        })
    }
}

pub struct Renderer {
    text: TextFitter,
    hit_test: HitTestRegistry,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}
impl Renderer {
    pub fn new() -> Self {
        Self {
            text: TextFitter::default(),
            hit_test: HitTestRegistry::new(),
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    pub fn get_hit_test_registry(&self) -> &HitTestRegistry {
        &self.hit_test
    }

    pub fn set_viewport(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        if self.x == x && self.y == y && self.width == width && self.height == height {
            return false;
        }
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        true
    }

    pub fn autoset_viewport(&mut self) -> bool {
        let (screen_w, screen_h) = (screen_width(), screen_height());
        self.set_viewport(0.0, 0.0, screen_w, screen_h)
    }

    pub fn render_game(&mut self, scene: &Scene<'_>) {
        self.hit_test.clear();

        clear_background(WHITE);
        let padding = 10.0;
        let button_area_height = self.height * 0.08;
        let status_height = self.height * 0.05;
        let tubes_top = self.y + button_area_height + status_height + 2.0 * padding;
        let tubes_height = self.height - (tubes_top - self.y) - padding;
        let (tubes_width, report_width) = if scene.report.is_empty() {
            (self.width, 0.0)
        } else {
            (self.width * 0.65, self.width * 0.35 - padding)
        };

        self.render_button_lineup(
            scene.buttons,
            Rect::new(self.x, self.y, self.width, button_area_height),
        );
        self.render_status(
            scene.params,
            scene.message,
            Rect::new(
                self.x + padding,
                self.y + button_area_height + padding,
                self.width - 2.0 * padding,
                status_height,
            ),
        );
        self.render_tube_grid(
            scene.state,
            scene.grid,
            scene.selected,
            Rect::new(self.x, tubes_top, tubes_width, tubes_height),
        );
        if !scene.report.is_empty() {
            self.render_report(
                scene.report,
                Rect::new(self.x + tubes_width + padding, tubes_top, report_width, tubes_height),
            );
        }
    }

    fn render_text(&mut self, text: &str, rect: Rect, color: Color) {
        let (font_size, x, y) = self.text.fit(text, rect.w, rect.h);
        if font_size > 0.0 {
            draw_text(text, rect.x + x, rect.y + y, font_size, color);
        }
    }

    fn render_status(&mut self, params: PuzzleParams, message: Option<&str>, rect: Rect) {
        let mut line = format!(
            "Next game: N={} V={} M={}",
            params.tube_count, params.capacity, params.color_count
        );
        if let Some(message) = message {
            line.push_str("   ");
            line.push_str(message);
        }
        self.render_text(&line, rect, BLACK);
    }

    /// One tube, bottom slot drawn lowest. The whole cell is the click target.
    fn render_tube(&mut self, slots: &[usize], coord: GridCoord, selected: bool, cell: Rect) {
        self.hit_test.push(cell, HitItem::Cell { coord });

        let inset = cell.w * 0.2;
        let tube = Rect::new(cell.x + inset, cell.y + 10.0, cell.w - 2.0 * inset, cell.h - 20.0);
        if !slots.is_empty() {
            let slot_height = tube.h / slots.len() as f32;
            for (i, &code) in slots.iter().enumerate() {
                if let Some(color) = drop_color(code) {
                    let y = tube.y + tube.h - (i as f32 + 1.0) * slot_height;
                    draw_rectangle(tube.x, y, tube.w, slot_height, color);
                }
            }
        }
        draw_rectangle_lines(tube.x, tube.y, tube.w, tube.h, 3.0, BLACK);
        if selected {
            draw_rectangle_lines(cell.x, cell.y, cell.w, cell.h, 4.0, GREEN);
        }
    }

    fn render_tube_grid(
        &mut self,
        state: &[Vec<usize>],
        grid: GridLayout,
        selected: Option<GridCoord>,
        rect: Rect,
    ) {
        let cell_w = rect.w / grid.row_width() as f32;
        let cell_h = rect.h / grid.row_count().max(1) as f32;
        for (index, slots) in state.iter().enumerate() {
            let coord = grid.index_to_grid(index);
            let cell = Rect::new(
                rect.x + coord.column as f32 * cell_w,
                rect.y + coord.row as f32 * cell_h,
                cell_w,
                cell_h,
            );
            self.render_tube(slots, coord, selected == Some(coord), cell);
        }
    }

    fn render_report(&mut self, lines: &[String], rect: Rect) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, DARKGRAY);
        let line_height = (rect.h / (lines.len() + 1) as f32).min(28.0);
        self.render_text(
            "Solved!",
            Rect::new(rect.x + 5.0, rect.y, rect.w - 10.0, line_height),
            DARKGREEN,
        );
        for (i, line) in lines.iter().enumerate() {
            let y = rect.y + (i as f32 + 1.0) * line_height;
            self.render_text(line, Rect::new(rect.x + 5.0, y, rect.w - 10.0, line_height), BLACK);
        }
    }

    fn render_button(&mut self, button: &Button, rect: Rect) {
        self.hit_test.push(
            rect,
            HitItem::Button {
                action: button.action(),
            },
        );

        draw_rectangle(rect.x, rect.y, rect.w, rect.h, button.color());
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLACK);
        self.render_text(button.label(), rect, WHITE);
    }

    fn render_button_lineup(&mut self, buttons: &[Button], rect: Rect) {
        if buttons.is_empty() {
            return;
        }
        let button_count = buttons.len() as f32;
        let spacing = 10.0;
        let total_spacing = spacing * (button_count - 1.0);
        let button_width = (rect.w - total_spacing) / button_count;
        for (i, button) in buttons.iter().enumerate() {
            let button_x = rect.x + i as f32 * (button_width + spacing);
            self.render_button(button, Rect::new(button_x, rect.y, button_width, rect.h));
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_code_has_no_color() {
        assert_eq!(drop_color(EMPTY), None);
    }

    #[test]
    fn palette_wraps_past_last_color() {
        assert_eq!(drop_color(1), Some(DROP_COLORS[0]));
        assert_eq!(drop_color(DROP_COLORS.len() + 1), Some(DROP_COLORS[0]));
    }

    #[test]
    fn viewport_reports_changes() {
        let mut renderer = Renderer::new();
        assert!(!renderer.set_viewport(0.0, 0.0, 800.0, 600.0));
        assert!(renderer.set_viewport(0.0, 0.0, 1024.0, 768.0));
    }
}
