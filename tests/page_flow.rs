use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use showcase::constants::FRAME_TIME;
use showcase::simulate::{Observed, ScriptedAction, simulate};
use showcase::{Content, OverlayPhase, Page, PageAction, Testimonial, Timing};

fn abc() -> Content {
    Content {
        testimonials: ["A", "B", "C"]
            .into_iter()
            .map(|q| Testimonial::new(q, format!("— {q}")))
            .collect(),
        ..Content::default()
    }
}

fn mounted(content: Content) -> Page {
    let mut page = Page::new(content, Timing::default()).unwrap();
    page.mount().unwrap();
    page
}

fn step(page: &mut Page, total: Duration) {
    let end = page.now() + total;
    while page.now() < end {
        page.update(FRAME_TIME.min(end - page.now()));
    }
}

#[test]
fn retreat_wraps_and_advances_count_from_there() {
    let mut page = mounted(abc());
    page.apply(PageAction::PreviousReview);
    assert_eq!(page.review().quote, "C");
    page.apply(PageAction::NextReview);
    page.apply(PageAction::NextReview);
    assert_eq!(page.review().quote, "B");
}

#[test]
fn open_settle_close_unmount() {
    let mut page = mounted(abc());

    page.apply(PageAction::OpenFullMenu);
    assert!(page.menu_mounted());
    assert!(!page.menu_settled());
    assert!(page.menu_role().is_some());

    step(&mut page, Duration::from_millis(10));
    assert_eq!((page.menu_mounted(), page.menu_settled()), (true, true));

    page.apply(PageAction::CloseFullMenu);
    assert_eq!((page.menu_mounted(), page.menu_settled()), (true, false));

    step(&mut page, Duration::from_millis(219));
    assert!(page.menu_mounted());
    step(&mut page, Duration::from_millis(1));
    assert_eq!((page.menu_mounted(), page.menu_settled()), (false, false));
    assert!(page.menu_role().is_none());
}

#[test]
fn rapid_toggling_never_sticks() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut page = mounted(abc());

    for _ in 0..500 {
        match rng.random_range(0..5) {
            0 => page.apply(PageAction::OpenFullMenu),
            1 => page.apply(PageAction::CloseFullMenu),
            2 => page.apply(PageAction::NextReview),
            3 => page.apply(PageAction::PreviousReview),
            _ => {}
        }
        step(&mut page, Duration::from_millis(rng.random_range(0..40)));

        assert!(page.menu_mounted() || !page.menu_settled());
        let (index, len) = page.review_position();
        assert!(index < len);
    }

    page.apply(PageAction::CloseFullMenu);
    step(&mut page, Duration::from_millis(250));
    assert_eq!(page.menu_phase(), OverlayPhase::Closed);
}

#[test]
fn scripted_visitor_sees_reviews_and_menu() {
    let mut page = mounted(abc());
    let script: Vec<ScriptedAction> = ["4.9:next", "6:open", "6:close"]
        .into_iter()
        .map(|s| s.parse().unwrap())
        .collect();

    let log = simulate(&mut page, script, Duration::from_secs(7), FRAME_TIME);

    let reviews: Vec<&str> = log
        .iter()
        .filter_map(|o| match &o.event {
            Observed::Review { attribution, .. } => Some(attribution.as_str()),
            _ => None,
        })
        .collect();
    // Manual click at 4.9s, automatic tick at 5s
    assert_eq!(reviews, vec!["— B", "— C"]);

    assert!(!log.iter().any(|o| o.event == Observed::Menu(OverlayPhase::Open)));
    assert_eq!(page.menu_phase(), OverlayPhase::Closed);
}

#[test]
fn remounting_keeps_a_single_timer() {
    let mut page = mounted(abc());
    page.unmount();
    page.mount().unwrap();
    page.mount().unwrap();

    step(&mut page, Duration::from_secs(5));
    assert_eq!(page.review_position().0, 1);
}
