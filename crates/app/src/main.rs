mod args;
mod command;
mod screen;

use std::sync::Arc;

use services::{AssessmentController, CatalogProvider, Clock, Fault, source_for_location};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Parsed, print_usage};
use crate::command::{Command, HELP};
use crate::screen::{Screen, celebration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_controller(args: &Args) -> AssessmentController {
    let mut provider = CatalogProvider::new(source_for_location(args.catalog.as_deref()))
        .with_latency(args.load_delay);
    if let Some(seed) = args.seed {
        provider = provider.with_seed(seed);
    }
    if args.fail_load {
        provider = provider.with_fault(Fault::FailWith("load failure requested".into()));
    }
    info!(
        catalog = args.catalog.as_deref().unwrap_or("built-in"),
        seed = ?args.seed,
        delay = ?provider.latency(),
        fail_load = args.fail_load,
        "assessment configured"
    );
    AssessmentController::new(Arc::new(provider), Clock::default())
}

async fn handle(controller: &AssessmentController, command: Command) -> Flow {
    let screen = Screen::project(&controller.latest());
    match (command, &screen) {
        (Command::Quit, _) => return Flow::Quit,
        (Command::Help, _) => println!("{HELP}"),
        (Command::Restart, _) => {
            println!("{}", Screen::Loading);
            controller.restart().await;
        }
        (_, Screen::Loading | Screen::Error | Screen::Completed { .. }) => {
            println!("Type `restart` to start a new assessment or `quit` to leave.");
        }
        (Command::True, _) => controller.select_binary(true),
        (Command::False, _) => controller.select_binary(false),
        (Command::Option(index), _) => controller.select_option(index),
        (Command::Next, _) => controller.next(),
        (Command::Previous, _) => controller.previous(),
        (Command::Finish, _) => match controller.finish() {
            Some(summary) => println!("{}", celebration(&summary)),
            None => println!("Answer every question before finishing."),
        },
    }
    Flow::Continue
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|_| print_usage())?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();

    let controller = build_controller(&args);
    println!("{}", Screen::Loading);
    controller.start().await;
    println!("{}", Screen::project(&controller.latest()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            println!("Unknown command: {}. Type `help` for the list.", line.trim());
            continue;
        };
        if handle(&controller, command).await == Flow::Quit {
            break;
        }
        println!("{}", Screen::project(&controller.latest()));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick_args() -> Args {
        Args {
            load_delay: Duration::ZERO,
            seed: Some(3),
            ..Args::default()
        }
    }

    #[tokio::test]
    async fn answers_are_ignored_on_the_error_screen() {
        let controller = build_controller(&Args {
            fail_load: true,
            ..quick_args()
        });
        controller.start().await;
        assert_eq!(Screen::project(&controller.latest()), Screen::Error);

        assert_eq!(handle(&controller, Command::True).await, Flow::Continue);
        assert!(controller.latest().answers().is_empty());
        assert_eq!(handle(&controller, Command::Quit).await, Flow::Quit);
    }

    #[tokio::test]
    async fn commands_drive_a_whole_session() {
        let controller = build_controller(&quick_args());
        controller.start().await;

        handle(&controller, Command::True).await;
        handle(&controller, Command::Next).await;
        handle(&controller, Command::Option(0)).await;
        handle(&controller, Command::Finish).await;

        let Screen::Completed { total, .. } = Screen::project(&controller.latest()) else {
            panic!("expected completed screen");
        };
        assert_eq!(total, 2);

        handle(&controller, Command::Restart).await;
        assert!(matches!(
            Screen::project(&controller.latest()),
            Screen::Question(_)
        ));
    }
}
