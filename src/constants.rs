use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1280;           // Width of the viewer window
pub const RENDER_HEIGHT: i32 = 800;           // Height of the viewer window
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64); // Time per frame

pub const REVIEW_INTERVAL: Duration = Duration::from_secs(5);       // Time each review is shown before auto-advance
pub const MENU_SETTLE_DELAY: Duration = Duration::from_millis(10);  // Mounted-but-unsettled frame before the entrance starts
pub const MENU_EXIT_DELAY: Duration = Duration::from_millis(220);   // Exit transition length before the dialog unmounts

pub const MAX_SIMULATION: Duration = Duration::from_secs(24 * 60 * 60); // Longest headless run the CLI accepts

pub const INVALID_RESERVATION: &str = "Please fill all required fields correctly.";
