//! The page host: owns the clock, both controllers, and the bits of UI state
//! around them, and turns visitor input and elapsed frame time into
//! controller calls.

use std::time::Duration;

use tracing::{debug, info};

use crate::carousel::{Carousel, CarouselTask};
use crate::config::{Settings, Timing};
use crate::content::{Content, Dish, Section, Testimonial};
use crate::error::Result;
use crate::overlay::{DialogRole, Overlay, OverlayTask};
use crate::reservation::{ReservationDesk, ReservationForm};
use crate::scheduler::Scheduler;
use crate::state::OverlayPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTask {
    Carousel(CarouselTask),
    Overlay(OverlayTask),
}

impl From<CarouselTask> for PageTask {
    fn from(task: CarouselTask) -> Self {
        PageTask::Carousel(task)
    }
}

impl From<OverlayTask> for PageTask {
    fn from(task: OverlayTask) -> Self {
        PageTask::Overlay(task)
    }
}

/// Something the visitor did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    NextReview,
    PreviousReview,
    OpenFullMenu,
    CloseFullMenu,
    ToggleNav,
    GoTo(Section),
    /// Demo order button on a dish card, by menu position.
    AddDish(usize),
    /// Demo details button on a dish card, by menu position.
    DishDetails(usize),
    SubmitReservation(ReservationForm),
}

#[derive(Debug)]
pub struct Page {
    content: Content,
    scheduler: Scheduler<PageTask>,
    reviews: Carousel<Testimonial>,
    full_menu: Overlay,
    desk: ReservationDesk,
    form: ReservationForm,
    nav_open: bool,
    focused: Option<Section>,
    scroll_requests: u64,
    notice: Option<String>,
}

impl Page {
    pub fn new(content: Content, timing: Timing) -> Result<Self> {
        let reviews = Carousel::new(content.testimonials.clone(), timing.review_interval)?;
        let full_menu = Overlay::new(timing.menu_settle_delay, timing.menu_exit_delay);
        Ok(Self {
            content,
            scheduler: Scheduler::new(),
            reviews,
            full_menu,
            desk: ReservationDesk::new(),
            form: ReservationForm::default(),
            nav_open: false,
            focused: None,
            scroll_requests: 0,
            notice: None,
        })
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        Self::new(settings.content, settings.timing)
    }

    /// Starts the review rotation.
    pub fn mount(&mut self) -> Result<()> {
        if self.reviews.mount(&mut self.scheduler)? {
            info!(reviews = self.reviews.len(), "page mounted");
        }
        Ok(())
    }

    /// Stops every timer the page owns. Nothing changes after this until the
    /// next `mount`.
    pub fn unmount(&mut self) {
        self.reviews.unmount(&mut self.scheduler);
        self.full_menu.reset(&mut self.scheduler);
        info!(pending = self.scheduler.pending(), "page unmounted");
    }

    /// Advances the page clock by one frame.
    pub fn update(&mut self, dt: Duration) {
        let deadline = self.scheduler.now().saturating_add(dt);
        while let Some(task) = self.scheduler.next_due(deadline) {
            self.dispatch(task);
        }
        self.scheduler.advance_to(deadline);
    }

    fn dispatch(&mut self, task: PageTask) {
        match task {
            PageTask::Carousel(task) => {
                if self.reviews.handle(task) {
                    debug!(index = self.reviews.index(), "review auto-advanced");
                }
            }
            PageTask::Overlay(task) => {
                self.full_menu.handle(task);
            }
        }
    }

    pub fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::NextReview => {
                self.reviews.advance();
                info!(index = self.reviews.index(), "next review");
            }
            PageAction::PreviousReview => {
                self.reviews.retreat();
                info!(index = self.reviews.index(), "previous review");
            }
            PageAction::OpenFullMenu => {
                if self.full_menu.open(&mut self.scheduler) {
                    info!("full menu opened");
                }
            }
            PageAction::CloseFullMenu => {
                if self.full_menu.close(&mut self.scheduler) {
                    info!("full menu closed");
                }
            }
            PageAction::ToggleNav => {
                self.nav_open = !self.nav_open;
            }
            PageAction::GoTo(section) => {
                self.focused = Some(section);
                self.scroll_requests += 1;
                self.nav_open = false;
                info!(section = section.id(), "scrolled to section");
            }
            PageAction::AddDish(position) => {
                if let Some(dish) = self.content.dishes.get(position) {
                    self.notice = Some(format!("{} added to order (demo)", dish.name));
                    info!(dish = %dish.id, "dish added");
                }
            }
            PageAction::DishDetails(position) => {
                if let Some(dish) = self.content.dishes.get(position) {
                    self.notice = Some(format!("Open details for {} (demo)", dish.name));
                    info!(dish = %dish.id, "dish details");
                }
            }
            PageAction::SubmitReservation(form) => {
                self.form = form;
                let accepted = self.desk.submit(&mut self.form).is_ok();
                debug!(accepted, "reservation form submitted");
            }
        }
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.content.dishes
    }

    pub fn review(&self) -> &Testimonial {
        self.reviews.current()
    }

    /// Index of the shown review and how many there are.
    pub fn review_position(&self) -> (usize, usize) {
        (self.reviews.index(), self.reviews.len())
    }

    pub fn is_mounted(&self) -> bool {
        self.reviews.is_mounted()
    }

    pub fn menu_phase(&self) -> OverlayPhase {
        self.full_menu.phase()
    }

    pub fn menu_mounted(&self) -> bool {
        self.full_menu.is_mounted()
    }

    pub fn menu_settled(&self) -> bool {
        self.full_menu.is_settled()
    }

    pub fn menu_role(&self) -> Option<DialogRole> {
        self.full_menu.dialog_role()
    }

    pub fn nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn focused(&self) -> Option<Section> {
        self.focused
    }

    /// Bumped by every `GoTo`, including repeats of the focused section.
    pub fn scroll_requests(&self) -> u64 {
        self.scroll_requests
    }

    /// Message from the last dish card button.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn reservation_message(&self) -> Option<&str> {
        self.desk.message()
    }

    /// Form contents as left by the last submission.
    pub fn form(&self) -> &ReservationForm {
        &self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        let mut page = Page::new(Content::default(), Timing::default()).unwrap();
        page.mount().unwrap();
        page
    }

    #[test]
    fn reviews_rotate_every_five_seconds() {
        let mut p = page();
        p.update(Duration::from_millis(4999));
        assert_eq!(p.review_position(), (0, 3));
        p.update(Duration::from_millis(1));
        assert_eq!(p.review_position(), (1, 3));
        assert_eq!(p.review().attribution, "— Afreen K.");
    }

    #[test]
    fn manual_and_automatic_advances_interleave() {
        let mut p = page();
        p.update(Duration::from_millis(4990));
        p.apply(PageAction::NextReview);
        p.update(Duration::from_millis(10));
        assert_eq!(p.review_position().0, 2);
    }

    #[test]
    fn overlay_sequence_within_a_frame_step() {
        let mut p = page();
        p.apply(PageAction::OpenFullMenu);
        assert_eq!(p.menu_phase(), OverlayPhase::Opening);
        p.update(Duration::from_millis(10));
        assert_eq!(p.menu_phase(), OverlayPhase::Open);

        p.apply(PageAction::CloseFullMenu);
        assert_eq!((p.menu_mounted(), p.menu_settled()), (true, false));
        p.update(Duration::from_millis(220));
        assert_eq!(p.menu_phase(), OverlayPhase::Closed);
    }

    #[test]
    fn unmount_stops_everything() {
        let mut p = page();
        p.apply(PageAction::OpenFullMenu);
        p.unmount();
        assert!(!p.is_mounted());
        assert!(!p.menu_mounted());

        p.update(Duration::from_secs(60));
        assert_eq!(p.review_position().0, 0);
        assert_eq!(p.menu_phase(), OverlayPhase::Closed);
    }

    #[test]
    fn go_to_closes_the_mobile_nav() {
        let mut p = page();
        p.apply(PageAction::ToggleNav);
        assert!(p.nav_open());
        p.apply(PageAction::GoTo(Section::Reserve));
        assert!(!p.nav_open());
        assert_eq!(p.focused(), Some(Section::Reserve));
    }

    #[test]
    fn repeated_go_to_requests_another_scroll() {
        let mut p = page();
        p.apply(PageAction::GoTo(Section::Gallery));
        p.apply(PageAction::GoTo(Section::Gallery));
        assert_eq!(p.scroll_requests(), 2);
        assert_eq!(p.focused(), Some(Section::Gallery));
    }

    #[test]
    fn dish_buttons_leave_a_demo_notice() {
        let mut p = page();
        p.apply(PageAction::AddDish(0));
        assert_eq!(p.notice(), Some("Chicken Dum Biryani added to order (demo)"));
        p.apply(PageAction::DishDetails(1));
        assert_eq!(p.notice(), Some("Open details for Mutton Mandi (demo)"));
        p.apply(PageAction::AddDish(99));
        assert_eq!(p.notice(), Some("Open details for Mutton Mandi (demo)"));
    }

    #[test]
    fn huge_frame_saturates_the_clock() {
        let mut p = page();
        p.update(Duration::from_secs(1));
        p.update(Duration::MAX);
        assert_eq!(p.now(), Duration::MAX);
        assert_eq!(p.review_position().0, 1);
    }

    #[test]
    fn reservation_message_is_shown() {
        let mut p = page();
        p.apply(PageAction::SubmitReservation(ReservationForm::default()));
        assert_eq!(
            p.reservation_message(),
            Some(crate::constants::INVALID_RESERVATION)
        );
    }

    #[test]
    fn accepted_reservation_clears_the_form() {
        let mut p = page();
        let form = ReservationForm {
            name: "Rohan S.".into(),
            phone: "9999999".into(),
            date: "2026-11-02".into(),
            time: "20:00".into(),
            guests: "2".into(),
            notes: String::new(),
        };
        p.apply(PageAction::SubmitReservation(form));
        assert_eq!(
            p.reservation_message(),
            Some("Reservation received! We will confirm shortly on 9999999.")
        );
        assert_eq!(p.form(), &ReservationForm::default());
    }
}
