use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use raylib::prelude::*;
use tracing::info;

use showcase::constants::{FPS, RENDER_HEIGHT, RENDER_WIDTH};
use showcase::{Page, PageAction, Section};

mod render;
mod texture_loader;

use crate::window::render::View;
use crate::window::texture_loader::Artwork;

fn keyboard_action(rl: &RaylibHandle) -> Option<PageAction> {
    let keys = [
        (KeyboardKey::KEY_RIGHT, PageAction::NextReview),
        (KeyboardKey::KEY_LEFT, PageAction::PreviousReview),
        (KeyboardKey::KEY_M, PageAction::OpenFullMenu),
        (KeyboardKey::KEY_ESCAPE, PageAction::CloseFullMenu),
        (KeyboardKey::KEY_N, PageAction::ToggleNav),
        (KeyboardKey::KEY_ONE, PageAction::GoTo(Section::Menu)),
        (KeyboardKey::KEY_TWO, PageAction::GoTo(Section::Reserve)),
        (KeyboardKey::KEY_THREE, PageAction::GoTo(Section::Gallery)),
        (KeyboardKey::KEY_FOUR, PageAction::GoTo(Section::Reviews)),
        (KeyboardKey::KEY_FIVE, PageAction::GoTo(Section::Contact)),
    ];
    keys.into_iter()
        .find(|(key, _)| rl.is_key_pressed(*key))
        .map(|(_, action)| action)
}

pub fn run(mut page: Page, images: Option<&Path>) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title(&page.content().brand)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    // Escape closes the dialog instead of the window
    rl.set_exit_key(None);

    let art = Artwork::load(&mut rl, &thread, page.content(), images);
    let mut view = View::new();

    page.mount()?;
    info!("viewer started");

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time(); // realtime rendering
        let sw = rl.get_screen_width() as f32;
        let sh = rl.get_screen_height() as f32;

        // --- Input ---
        if let Some(action) = keyboard_action(&rl) {
            page.apply(action);
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(action) = view.click(&page, rl.get_mouse_position(), sw, sh) {
                page.apply(action);
            }
        }
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 && !page.menu_mounted() {
            view.scroll_by(wheel * 60.0, sh);
        }

        // --- Update ---
        page.update(Duration::from_secs_f32(dt.max(0.0)));
        view.update(dt, &page, sh);

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        view.draw(&mut d, &page, &art);
    }

    page.unmount();
    info!("viewer closed");
    Ok(())
}
