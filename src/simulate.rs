//! Headless run of the page with a scripted visitor.
//!
//! The page is stepped at a fixed frame time, the same way the viewer steps it,
//! and every visible change is recorded with its timestamp.

use std::str::FromStr;
use std::time::Duration;

use crate::content::Section;
use crate::page::{Page, PageAction};
use crate::state::OverlayPhase;

/// Parses a non-negative number of seconds that fits in a `Duration`.
pub fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs = s
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid time {s:?}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid time {s:?}: {e}"))
}

/// A visitor action at a point in page time, written `<seconds>:<action>`.
///
/// Actions: `next`, `prev`, `open`, `close`, `nav`, `goto=<section>`,
/// `add=<dish>`, `details=<dish>` (dish position in the menu).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedAction {
    pub at: Duration,
    pub action: PageAction,
}

impl FromStr for ScriptedAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, action) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <seconds>:<action>, got {s:?}"))?;
        let at = parse_seconds(at)?;
        let action = match action.trim() {
            "next" => PageAction::NextReview,
            "prev" => PageAction::PreviousReview,
            "open" => PageAction::OpenFullMenu,
            "close" => PageAction::CloseFullMenu,
            "nav" => PageAction::ToggleNav,
            other => match other.split_once('=') {
                Some(("goto", id)) => PageAction::GoTo(
                    Section::from_id(id).ok_or_else(|| format!("unknown section {id:?}"))?,
                ),
                Some(("add", dish)) => PageAction::AddDish(dish_index(dish)?),
                Some(("details", dish)) => PageAction::DishDetails(dish_index(dish)?),
                _ => return Err(format!("unknown action {other:?}")),
            },
        };
        Ok(ScriptedAction { at, action })
    }
}

fn dish_index(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("invalid dish position {s:?}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Action(PageAction),
    Review { index: usize, attribution: String },
    Menu(OverlayPhase),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub at: Duration,
    pub event: Observed,
}

/// Runs `page` for `duration`, applying `script` as page time passes each
/// action. The page must already be mounted for reviews to rotate.
pub fn simulate(
    page: &mut Page,
    mut script: Vec<ScriptedAction>,
    duration: Duration,
    frame: Duration,
) -> Vec<Observation> {
    script.sort_by_key(|a| a.at);
    let mut script = script.into_iter().peekable();
    let mut log = Vec::new();

    let mut review = page.review_position().0;
    let mut phase = page.menu_phase();
    let end = page.now().saturating_add(duration);

    loop {
        while let Some(next) = script.next_if(|a| a.at <= page.now()) {
            log.push(Observation {
                at: page.now(),
                event: Observed::Action(next.action.clone()),
            });
            page.apply(next.action);
            observe(page, &mut review, &mut phase, &mut log);
        }

        if page.now() >= end {
            break;
        }
        page.update(frame.min(end - page.now()));
        observe(page, &mut review, &mut phase, &mut log);
    }

    log
}

fn observe(page: &Page, review: &mut usize, phase: &mut OverlayPhase, log: &mut Vec<Observation>) {
    let (index, _) = page.review_position();
    if index != *review {
        *review = index;
        log.push(Observation {
            at: page.now(),
            event: Observed::Review {
                index,
                attribution: page.review().attribution.clone(),
            },
        });
    }
    if page.menu_phase() != *phase {
        *phase = page.menu_phase();
        log.push(Observation {
            at: page.now(),
            event: Observed::Menu(*phase),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timing;
    use crate::constants::FRAME_TIME;
    use crate::content::Content;

    fn mounted() -> Page {
        let mut page = Page::new(Content::default(), Timing::default()).unwrap();
        page.mount().unwrap();
        page
    }

    #[test]
    fn parses_actions() {
        assert_eq!(
            "1.5:open".parse::<ScriptedAction>().unwrap(),
            ScriptedAction {
                at: Duration::from_millis(1500),
                action: PageAction::OpenFullMenu
            }
        );
        assert_eq!(
            "0:goto=gallery".parse::<ScriptedAction>().unwrap().action,
            PageAction::GoTo(Section::Gallery)
        );
        assert!("open".parse::<ScriptedAction>().is_err());
        assert!("-1:open".parse::<ScriptedAction>().is_err());
        assert!("1:dance".parse::<ScriptedAction>().is_err());
        assert!("1:goto=visit".parse::<ScriptedAction>().is_err());
        assert_eq!(
            "2:add=1".parse::<ScriptedAction>().unwrap().action,
            PageAction::AddDish(1)
        );
        assert!("2:details=first".parse::<ScriptedAction>().is_err());
    }

    #[test]
    fn times_beyond_the_clock_are_rejected() {
        assert!("1e20:open".parse::<ScriptedAction>().is_err());
        assert!("inf:open".parse::<ScriptedAction>().is_err());
        assert!("NaN:open".parse::<ScriptedAction>().is_err());
        assert!(parse_seconds("1e20").is_err());
        assert_eq!(parse_seconds(" 2.5 "), Ok(Duration::from_millis(2500)));
    }

    #[test]
    fn unbounded_duration_is_clamped_to_the_clock() {
        let mut page = mounted();
        page.update(Duration::from_secs(1));
        let log = simulate(&mut page, Vec::new(), Duration::MAX, Duration::MAX);

        assert_eq!(page.now(), Duration::MAX);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn five_auto_ticks_wrap_to_the_third_review() {
        let mut page = mounted();
        let log = simulate(&mut page, Vec::new(), Duration::from_secs(25), FRAME_TIME);

        let reviews: Vec<usize> = log
            .iter()
            .filter_map(|o| match o.event {
                Observed::Review { index, .. } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(reviews, vec![1, 2, 0, 1, 2]);
        assert_eq!(page.review_position().0, 2);
    }

    #[test]
    fn menu_runs_through_every_phase() {
        let mut page = mounted();
        let script: Vec<ScriptedAction> = vec!["1:close".parse().unwrap(), "0.5:open".parse().unwrap()];
        let log = simulate(&mut page, script, Duration::from_secs(2), FRAME_TIME);

        let phases: Vec<OverlayPhase> = log
            .iter()
            .filter_map(|o| match o.event {
                Observed::Menu(phase) => Some(phase),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                OverlayPhase::Opening,
                OverlayPhase::Open,
                OverlayPhase::Closing,
                OverlayPhase::Closed
            ]
        );
    }

    #[test]
    fn clicks_before_the_first_frame_are_applied() {
        let mut page = mounted();
        let log = simulate(
            &mut page,
            vec!["0:prev".parse().unwrap()],
            Duration::from_millis(100),
            FRAME_TIME,
        );
        assert_eq!(log[0].event, Observed::Action(PageAction::PreviousReview));
        assert_eq!(
            log[1].event,
            Observed::Review {
                index: 2,
                attribution: "— Vivek T.".into()
            }
        );
    }
}
