//! Presentation core of a restaurant's one-page site: a rotating review
//! carousel, a two-phase modal for the full menu, and the thin page host
//! around them.

pub mod carousel;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod overlay;
pub mod page;
pub mod reservation;
pub mod scheduler;
pub mod simulate;
pub mod state;

pub use carousel::{Carousel, CarouselTask};
pub use config::{Settings, Timing};
pub use content::{Content, Dish, Section, Testimonial};
pub use error::{Error, Result};
pub use overlay::{Overlay, OverlayTask};
pub use page::{Page, PageAction, PageTask};
pub use reservation::{Reservation, ReservationDesk, ReservationError, ReservationForm};
pub use scheduler::{Scheduler, TimerHandle};
pub use state::OverlayPhase;
