use chrono::Datelike;
use raylib::prelude::*;

use showcase::{OverlayPhase, Page, PageAction, Section};

use crate::window::texture_loader::Artwork;

const NAV_HEIGHT: f32 = 64.0;
const COLUMN_WIDTH: f32 = 1200.0;
const TRANSITION: f32 = 0.2; // Matches the page's exit delay closely enough
const SCROLL_DURATION: f32 = 0.5;

const BACKGROUND: Color = Color::new(11, 10, 10, 255);
const CARD: Color = Color::new(20, 18, 18, 255);
const BORDER: Color = Color::new(42, 38, 38, 255);
const AMBER: Color = Color::new(255, 209, 102, 255);
const MUTED: Color = Color::new(212, 201, 191, 255);

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

// The default raylib font only covers ASCII
fn plain(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '“' | '”' => "\"".to_string(),
            '‘' | '’' => "'".to_string(),
            '—' | '–' => "-".to_string(),
            '₹' => "Rs.".to_string(),
            '©' => "(c)".to_string(),
            c if c.is_ascii() => c.to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

fn contains(rect: Rectangle, point: Vector2) -> bool {
    point.x >= rect.x && point.x <= rect.x + rect.width && point.y >= rect.y && point.y <= rect.y + rect.height
}

/// Top of each section in page coordinates.
fn section_top(section: Section) -> f32 {
    match section {
        Section::Menu => 440.0,
        Section::Gallery => 1150.0,
        Section::Reviews => 1680.0,
        Section::Reserve => 1950.0,
        Section::Contact => 2070.0,
    }
}

const PAGE_HEIGHT: f32 = 2470.0;
const DISH_CARD_HEIGHT: f32 = 300.0;

/// Dish card in page coordinates.
fn dish_card(left: f32, position: usize) -> Rectangle {
    let col = (position % 3) as f32;
    let row = (position / 3) as f32;
    Rectangle::new(
        left + col * 400.0,
        section_top(Section::Menu) + 50.0 + row * (DISH_CARD_HEIGHT + 20.0),
        380.0,
        DISH_CARD_HEIGHT,
    )
}

/// Add and Details buttons of a dish card.
fn dish_buttons(card: Rectangle) -> (Rectangle, Rectangle) {
    let y = card.y + card.height - 40.0;
    (
        Rectangle::new(card.x + 16.0, y, 64.0, 28.0),
        Rectangle::new(card.x + 90.0, y, 90.0, 28.0),
    )
}

/// A value eased toward a target over a fixed duration, like a CSS transition.
struct Transition {
    value: f32,
    target: f32,
    duration: f32,
    elapsed: f32,
    tween: Option<ease::Tween>,
}

impl Transition {
    fn new(value: f32, duration: f32) -> Self {
        Self { value, target: value, duration, elapsed: 0.0, tween: None }
    }

    fn jump(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.tween = None;
    }

    fn retarget(&mut self, target: f32) {
        if target != self.target {
            self.target = target;
            self.elapsed = 0.0;
            self.tween = Some(ease::Tween::new(ease::cubic_out, self.value, target, self.duration));
        }
    }

    fn update(&mut self, dt: f32) {
        if let Some(tween) = self.tween.as_mut() {
            self.value = tween.apply(dt);
            self.elapsed += dt;
            if self.elapsed >= self.duration {
                self.value = self.target;
                self.tween = None;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hotspot {
    pub rect: Rectangle,
    pub action: Option<PageAction>,
}

pub struct View {
    scroll: Transition,
    backdrop: Transition,
    panel_offset: Transition,
    menu_phase: OverlayPhase,
    scroll_requests: u64,
}

impl View {
    pub fn new() -> Self {
        Self {
            scroll: Transition::new(0.0, SCROLL_DURATION),
            backdrop: Transition::new(0.0, TRANSITION),
            panel_offset: Transition::new(48.0, TRANSITION),
            menu_phase: OverlayPhase::Closed,
            scroll_requests: 0,
        }
    }

    pub fn scroll_by(&mut self, delta: f32, screen_height: f32) {
        let max = (PAGE_HEIGHT - screen_height).max(0.0);
        self.scroll.jump((self.scroll.value - delta).clamp(0.0, max));
    }

    /// Follows page state: smooth scroll on every navigation request,
    /// overlay transitions keyed off `settled`.
    pub fn update(&mut self, dt: f32, page: &Page, screen_height: f32) {
        if page.scroll_requests() != self.scroll_requests {
            self.scroll_requests = page.scroll_requests();
            if let Some(section) = page.focused() {
                let max = (PAGE_HEIGHT - screen_height).max(0.0);
                self.scroll.retarget((section_top(section) - NAV_HEIGHT).clamp(0.0, max));
            }
        }

        let phase = page.menu_phase();
        if phase != self.menu_phase {
            if phase == OverlayPhase::Opening {
                // Freshly mounted: start from the unsettled look
                self.backdrop.jump(0.0);
                self.panel_offset.jump(48.0);
            }
            self.menu_phase = phase;
        }
        let settled = page.menu_settled();
        self.backdrop.retarget(if settled { 1.0 } else { 0.0 });
        self.panel_offset.retarget(if settled { 24.0 } else { 48.0 });

        self.scroll.update(dt);
        self.backdrop.update(dt);
        self.panel_offset.update(dt);
    }

    fn left(screen_width: f32) -> f32 {
        ((screen_width - COLUMN_WIDTH) * 0.5).max(20.0)
    }

    fn panel(&self, screen_width: f32) -> Rectangle {
        let width = (screen_width - 48.0).min(900.0);
        Rectangle::new((screen_width - width) * 0.5, self.panel_offset.value, width, 560.0)
    }

    /// Clickable regions for this frame, front-most first. While the dialog
    /// is mounted it captures every click.
    pub fn hotspots(&self, page: &Page, screen_width: f32, screen_height: f32) -> Vec<Hotspot> {
        if page.menu_mounted() {
            let panel = self.panel(screen_width);
            return vec![
                Hotspot {
                    rect: Rectangle::new(panel.x + panel.width - 110.0, panel.y + 20.0, 90.0, 32.0),
                    action: Some(PageAction::CloseFullMenu),
                },
                Hotspot { rect: panel, action: None },
                Hotspot {
                    rect: Rectangle::new(0.0, 0.0, screen_width, screen_height),
                    action: Some(PageAction::CloseFullMenu),
                },
            ];
        }

        let left = Self::left(screen_width);
        let y = |page_y: f32| page_y - self.scroll.value;
        let mut spots = Vec::new();

        for (i, section) in Section::ALL.into_iter().enumerate() {
            spots.push(Hotspot {
                rect: Rectangle::new(left + 300.0 + i as f32 * 110.0, 18.0, 100.0, 28.0),
                action: Some(PageAction::GoTo(section)),
            });
        }
        spots.push(Hotspot {
            rect: Rectangle::new(screen_width - 60.0, 18.0, 40.0, 28.0),
            action: Some(PageAction::ToggleNav),
        });
        if page.nav_open() {
            for (i, section) in Section::ALL.into_iter().enumerate() {
                spots.push(Hotspot {
                    rect: Rectangle::new(0.0, NAV_HEIGHT + i as f32 * 44.0, screen_width, 44.0),
                    action: Some(PageAction::GoTo(section)),
                });
            }
        }

        spots.push(Hotspot {
            rect: Rectangle::new(left, y(330.0), 180.0, 40.0),
            action: Some(PageAction::OpenFullMenu),
        });
        for position in 0..page.dishes().len() {
            let card = dish_card(left, position);
            let (add, details) = dish_buttons(Rectangle { y: y(card.y), ..card });
            spots.push(Hotspot { rect: add, action: Some(PageAction::AddDish(position)) });
            spots.push(Hotspot { rect: details, action: Some(PageAction::DishDetails(position)) });
        }
        let reviews = section_top(Section::Reviews);
        spots.push(Hotspot {
            rect: Rectangle::new(left + COLUMN_WIDTH - 130.0, y(reviews + 180.0), 50.0, 32.0),
            action: Some(PageAction::PreviousReview),
        });
        spots.push(Hotspot {
            rect: Rectangle::new(left + COLUMN_WIDTH - 70.0, y(reviews + 180.0), 50.0, 32.0),
            action: Some(PageAction::NextReview),
        });
        spots
    }

    pub fn click(&self, page: &Page, point: Vector2, screen_width: f32, screen_height: f32) -> Option<PageAction> {
        self.hotspots(page, screen_width, screen_height)
            .into_iter()
            .find(|spot| contains(spot.rect, point))
            .and_then(|spot| spot.action)
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, page: &Page, art: &Artwork) {
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        let left = Self::left(sw);
        let scroll = self.scroll.value;
        let y = |page_y: f32| (page_y - scroll) as i32;
        let x = left as i32;
        let content = page.content();

        d.clear_background(BACKGROUND);

        // Hero
        for (i, chip) in content.chips.iter().enumerate() {
            d.draw_text(&plain(chip), x + i as i32 * 200, y(110.0), 18, MUTED);
        }
        d.draw_text(&format!("Welcome to {} Fine Dine.", content.brand), x, y(150.0), 44, Color::WHITE);
        d.draw_text(
            "Authentic Indian flavors, aromatic biryanis and traditional mandi.",
            x,
            y(220.0),
            20,
            MUTED,
        );
        d.draw_rectangle_rounded(Rectangle::new(left, y(330.0) as f32, 180.0, 40.0), 0.5, 8, AMBER);
        d.draw_text("View Full Menu", x + 20, y(340.0), 20, Color::BLACK);

        // Menu preview
        d.draw_text("Our Menu", x, y(section_top(Section::Menu)), 32, Color::WHITE);
        if let Some(notice) = page.notice() {
            d.draw_text(&plain(notice), x + 200, y(section_top(Section::Menu) + 10.0), 18, AMBER);
        }
        for (i, dish) in content.dishes.iter().enumerate() {
            let card = dish_card(left, i);
            let card = Rectangle { y: card.y - scroll, ..card };
            d.draw_rectangle_rounded(card, 0.08, 8, CARD);
            let image = Rectangle::new(card.x, card.y, card.width, 160.0);
            draw_image(d, art.dish(i), image);
            d.draw_text(&plain(&dish.name), card.x as i32 + 16, card.y as i32 + 172, 20, Color::WHITE);
            d.draw_text(&plain(&dish.description), card.x as i32 + 16, card.y as i32 + 200, 12, MUTED);
            d.draw_text(&plain(&dish.price), card.x as i32 + 16, card.y as i32 + 226, 18, AMBER);
            let (add, details) = dish_buttons(card);
            d.draw_rectangle_lines_ex(add, 1.0, BORDER);
            d.draw_text("Add", add.x as i32 + 16, add.y as i32 + 6, 16, Color::WHITE);
            d.draw_rectangle_rec(details, Color::new(34, 34, 34, 255));
            d.draw_text("Details", details.x as i32 + 14, details.y as i32 + 6, 16, Color::WHITE);
        }

        // Gallery
        d.draw_text("Gallery", x, y(section_top(Section::Gallery)), 32, Color::WHITE);
        for i in 0..art.gallery.len().max(content.gallery.len()) {
            let col = (i % 3) as f32;
            let row = (i / 3) as f32;
            let tile = Rectangle::new(
                left + col * 400.0,
                section_top(Section::Gallery) + 50.0 + row * 220.0 - scroll,
                380.0,
                200.0,
            );
            draw_image(d, art.gallery(i), tile);
        }

        // Reviews
        let reviews = section_top(Section::Reviews);
        d.draw_text("What Guests Say", x, y(reviews), 32, Color::WHITE);
        let card = Rectangle::new(left, reviews + 50.0 - scroll, COLUMN_WIDTH, 180.0);
        d.draw_rectangle_rounded(card, 0.1, 8, CARD);
        let review = page.review();
        d.draw_text(&plain(&format!("“{}”", review.quote)), x + 24, y(reviews + 80.0), 22, Color::WHITE);
        d.draw_text(&plain(&review.attribution), x + 24, y(reviews + 186.0), 20, MUTED);
        let (index, len) = page.review_position();
        d.draw_text(&format!("{}/{}", index + 1, len), x + COLUMN_WIDTH as i32 - 200, y(reviews + 186.0), 18, MUTED);
        d.draw_rectangle_lines_ex(
            Rectangle::new(left + COLUMN_WIDTH - 130.0, reviews + 180.0 - scroll, 50.0, 32.0),
            1.0,
            BORDER,
        );
        d.draw_text("<", x + COLUMN_WIDTH as i32 - 110, y(reviews + 186.0), 20, Color::WHITE);
        d.draw_rectangle_lines_ex(
            Rectangle::new(left + COLUMN_WIDTH - 70.0, reviews + 180.0 - scroll, 50.0, 32.0),
            1.0,
            BORDER,
        );
        d.draw_text(">", x + COLUMN_WIDTH as i32 - 50, y(reviews + 186.0), 20, Color::WHITE);

        // Reservation
        let reserve = section_top(Section::Reserve);
        d.draw_text("Reserve a Table", x, y(reserve), 32, Color::WHITE);
        d.draw_text("Book from the terminal: showcase reserve --name .. --phone ..", x, y(reserve + 50.0), 18, MUTED);
        if let Some(message) = page.reservation_message() {
            d.draw_text(&plain(message), x, y(reserve + 80.0), 18, AMBER);
        }

        // Contact
        let contact = section_top(Section::Contact);
        d.draw_text("Contact", x, y(contact), 32, Color::WHITE);
        let c = &content.contact;
        d.draw_text(&plain(&format!("Email: {} | Phone: {}", c.email, c.phone)), x, y(contact + 50.0), 20, Color::WHITE);
        d.draw_text(&plain(&format!("Follow: Instagram {}", c.instagram)), x, y(contact + 80.0), 20, Color::WHITE);

        d.draw_text("Visit Us", x, y(contact + 130.0), 32, Color::WHITE);
        d.draw_text(&plain(&format!("Address: {}", c.address)), x, y(contact + 180.0), 20, Color::WHITE);
        d.draw_text(&plain(&format!("Phone: {}", c.phone)), x, y(contact + 210.0), 20, Color::WHITE);
        d.draw_text(&plain(&format!("Open: {}", c.hours)), x, y(contact + 240.0), 20, Color::WHITE);
        d.draw_rectangle_rounded(Rectangle::new(left, y(contact + 270.0) as f32, 170.0, 36.0), 0.5, 8, AMBER);
        d.draw_text("Get Directions", x + 18, y(contact + 278.0), 20, Color::BLACK);
        d.draw_text(&plain(&c.maps), x, y(contact + 316.0), 14, MUTED);

        let footer = content.copyright(chrono::Local::now().year());
        d.draw_text(&plain(&footer), x, y(contact + 370.0), 14, MUTED);

        // Navigation bar stays on top of the page
        d.draw_rectangle(0, 0, sw as i32, NAV_HEIGHT as i32, with_alpha(BACKGROUND, 0.9));
        d.draw_text(&plain(&content.brand), x, 14, 22, Color::WHITE);
        d.draw_text(&plain(&content.tagline), x, 38, 12, MUTED);
        for (i, section) in Section::ALL.into_iter().enumerate() {
            let color = if page.focused() == Some(section) { AMBER } else { Color::WHITE };
            d.draw_text(section.label(), x + 300 + i as i32 * 110, 22, 20, color);
        }
        d.draw_text("=", sw as i32 - 48, 18, 28, Color::WHITE);
        if page.nav_open() {
            for (i, section) in Section::ALL.into_iter().enumerate() {
                let row = NAV_HEIGHT as i32 + i as i32 * 44;
                d.draw_rectangle(0, row, sw as i32, 44, Color::new(18, 15, 14, 255));
                d.draw_text(section.label(), 16, row + 12, 20, Color::WHITE);
            }
        }

        if page.menu_mounted() {
            self.draw_full_menu(d, page, art, sw, sh);
        }
    }

    fn draw_full_menu(&self, d: &mut RaylibDrawHandle, page: &Page, art: &Artwork, sw: f32, sh: f32) {
        let opacity = self.backdrop.value;
        d.draw_rectangle(0, 0, sw as i32, sh as i32, with_alpha(Color::BLACK, 0.6 * opacity));

        let panel = self.panel(sw);
        d.draw_rectangle_rounded(panel, 0.04, 8, with_alpha(Color::new(15, 13, 12, 255), opacity));
        d.draw_rectangle_lines_ex(panel, 1.0, with_alpha(BORDER, opacity));

        let label = page.menu_role().map_or("Full Menu", |role| role.label);
        d.draw_text(label, panel.x as i32 + 24, panel.y as i32 + 24, 28, with_alpha(Color::WHITE, opacity));
        d.draw_rectangle_lines_ex(
            Rectangle::new(panel.x + panel.width - 110.0, panel.y + 20.0, 90.0, 32.0),
            1.0,
            with_alpha(Color::WHITE, opacity),
        );
        d.draw_text(
            "Close",
            (panel.x + panel.width) as i32 - 92,
            panel.y as i32 + 26,
            20,
            with_alpha(Color::WHITE, opacity),
        );

        for (i, dish) in page.dishes().iter().enumerate() {
            let col = (i % 2) as f32;
            let row = (i / 2) as f32;
            let cell_x = panel.x + 24.0 + col * (panel.width - 48.0) * 0.5;
            let cell_y = panel.y + 80.0 + row * 150.0;
            draw_image(d, art.dish(i), Rectangle::new(cell_x, cell_y, 112.0, 80.0));
            let text_x = cell_x as i32 + 124;
            d.draw_text(&plain(&dish.name), text_x, cell_y as i32, 18, with_alpha(Color::WHITE, opacity));
            d.draw_text(&plain(&dish.description), text_x, cell_y as i32 + 26, 11, with_alpha(MUTED, opacity));
            d.draw_text(&plain(&dish.price), text_x, cell_y as i32 + 50, 16, with_alpha(AMBER, opacity));
        }
    }
}

fn draw_image(d: &mut RaylibDrawHandle, texture: Option<&Texture2D>, dest: Rectangle) {
    match texture {
        Some(texture) => {
            // Cover the destination, cropping the source around its center
            let tex_width = texture.width() as f32;
            let tex_height = texture.height() as f32;
            let scale = (dest.width / tex_width).max(dest.height / tex_height);
            let src_width = dest.width / scale;
            let src_height = dest.height / scale;
            let source = Rectangle::new(
                (tex_width - src_width) * 0.5,
                (tex_height - src_height) * 0.5,
                src_width,
                src_height,
            );
            d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
        }
        None => {
            d.draw_rectangle_rec(dest, Color::new(34, 28, 26, 255));
            d.draw_text("image unavailable", dest.x as i32 + 12, (dest.y + dest.height * 0.5) as i32 - 8, 16, MUTED);
        }
    }
}
