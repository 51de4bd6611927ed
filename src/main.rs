use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use showcase::constants::{FRAME_TIME, MAX_SIMULATION};
use showcase::simulate::{Observed, simulate};
use showcase::{Page, ReservationDesk, Settings};

mod cli;
#[cfg(feature = "window")]
mod window;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load(cli.content.as_deref()).with_context(|| match &cli.content {
        Some(path) => format!("loading content from {}", path.display()),
        None => "loading built-in content".to_string(),
    })?;

    match cli.command {
        Command::Simulate(args) => {
            ensure!(
                args.duration <= MAX_SIMULATION,
                "duration must be at most {} seconds",
                MAX_SIMULATION.as_secs()
            );
            let mut page = Page::from_settings(settings).context("building page")?;
            page.mount()?;

            let log = simulate(&mut page, args.actions, args.duration, FRAME_TIME);
            for observation in &log {
                let at = observation.at.as_secs_f64();
                match &observation.event {
                    Observed::Action(action) => info!(at, ?action, "visitor"),
                    Observed::Review { index, attribution } => {
                        info!(at, index, %attribution, "review shown")
                    }
                    Observed::Menu(phase) => info!(at, ?phase, "full menu"),
                }
            }

            let review = page.review();
            println!("“{}” {}", review.quote, review.attribution);
            page.unmount();
        }
        Command::Menu => {
            let content = &settings.content;
            println!("{} · {}", content.brand, content.tagline);
            for dish in &content.dishes {
                println!("\n{}  {}\n  {}", dish.name, dish.price, dish.description);
            }
        }
        Command::Reserve(args) => {
            let mut form = args.into_form();
            let mut desk = ReservationDesk::new();
            let outcome = desk.submit(&mut form).map(|_| ()).map_err(|e| e.to_string());
            if let Some(message) = desk.message() {
                println!("{message}");
            }
            if let Err(reason) = outcome {
                bail!("reservation rejected: {reason}");
            }
        }
        #[cfg(feature = "window")]
        Command::Window(args) => {
            let page = Page::from_settings(settings).context("building page")?;
            window::run(page, args.images.as_deref())?;
        }
    }

    Ok(())
}
