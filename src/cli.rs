use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use showcase::ReservationForm;
use showcase::simulate::{ScriptedAction, parse_seconds};

#[derive(Debug, Parser)]
#[command(name = "showcase", version, about = "Restaurant one-page site, without the browser")]
pub struct Cli {
    /// TOML file overriding the built-in content and timings
    #[arg(long, global = true)]
    pub content: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the page headless with a scripted visitor and log what changes
    Simulate(SimulateArgs),
    /// Print the full menu
    Menu,
    /// Validate a table reservation
    Reserve(ReserveArgs),
    /// Open the page in a window
    #[cfg(feature = "window")]
    Window(WindowArgs),
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// How long to run, in seconds
    #[arg(long, default_value = "20", value_parser = parse_seconds)]
    pub duration: Duration,

    /// Visitor action as <seconds>:<action>, e.g. 2.5:open
    /// (next, prev, open, close, nav, goto=<section>, add=<dish>, details=<dish>)
    #[arg(long = "action")]
    pub actions: Vec<ScriptedAction>,
}

#[derive(Debug, Args)]
pub struct ReserveArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub date: String,
    /// HH:MM
    #[arg(long, default_value = "")]
    pub time: String,
    #[arg(long, default_value = "")]
    pub guests: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl ReserveArgs {
    pub fn into_form(self) -> ReservationForm {
        ReservationForm {
            name: self.name,
            phone: self.phone,
            date: self.date,
            time: self.time,
            guests: self.guests,
            notes: self.notes,
        }
    }
}

#[cfg(feature = "window")]
#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Directory with dish images named after dish ids, an optional
    /// `fallback` image and a `gallery/` subdirectory
    #[arg(long)]
    pub images: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use showcase::PageAction;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn simulate_collects_actions() {
        let cli = Cli::parse_from([
            "showcase",
            "--content",
            "site.toml",
            "simulate",
            "--duration",
            "3",
            "--action",
            "1:open",
            "--action",
            "2:close",
        ]);
        assert_eq!(cli.content, Some(PathBuf::from("site.toml")));
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.duration, Duration::from_secs(3));
        assert_eq!(args.actions.len(), 2);
        assert_eq!(args.actions[1].action, PageAction::CloseFullMenu);
    }

    #[test]
    fn bad_action_is_a_usage_error() {
        let parsed = Cli::try_parse_from(["showcase", "simulate", "--action", "soon:open"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn oversized_times_are_usage_errors() {
        assert!(Cli::try_parse_from(["showcase", "simulate", "--action", "1e20:open"]).is_err());
        assert!(Cli::try_parse_from(["showcase", "simulate", "--duration", "1e20"]).is_err());
        assert!(Cli::try_parse_from(["showcase", "simulate", "--duration", "-1"]).is_err());
    }

    #[test]
    fn reserve_builds_a_form() {
        let cli = Cli::parse_from([
            "showcase", "reserve", "--name", "Rohan", "--phone", "9999999", "--guests", "2",
        ]);
        let Command::Reserve(args) = cli.command else {
            panic!("expected reserve");
        };
        let form = args.into_form();
        assert_eq!(form.name, "Rohan");
        assert_eq!(form.guests, "2");
        assert!(form.date.is_empty());
    }
}
