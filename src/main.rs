use macroquad::prelude::*;
use tube_sort::controls::ControlAction;
use tube_sort::{GameController, PuzzleParams};

#[macroquad::main("Tube Sort")]
async fn main() {
    let mut controller = match GameController::new(PuzzleParams::default()) {
        Ok(controller) => controller,
        Err(err) => {
            error!("Cannot start: {}", err);
            return;
        }
    };
    loop {
        controller.render();
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            controller.handle_click(x, y);
        }
        let shortcuts = [
            (KeyCode::U, ControlAction::Undo),
            (KeyCode::R, ControlAction::Reset),
            (KeyCode::N, ControlAction::NewGame),
            (KeyCode::C, ControlAction::CopyReport),
            (KeyCode::Escape, ControlAction::Deselect),
        ];
        for (key, action) in shortcuts {
            if is_key_pressed(key) {
                controller.handle_game_action(action);
            }
        }
        next_frame().await;
    }
}
