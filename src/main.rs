//! `trivia`: play a Jeopardy-style quiz in the terminal.
//!
//! Loads a question file, seats 2-4 players, runs the turn loop on
//! stdin/stdout and writes `TurnReport.txt` and `LogReport.csv` when the
//! game ends.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use trivia_engine::core::{EventKind, GameConfig, SessionContext};
use trivia_engine::io::{load_board, write_event_log_file, write_turn_report, ConsoleInput, ConsoleOutput};
use trivia_engine::session::{Orchestrator, SessionOutcome, SessionSummary, TracingSink};
use trivia_engine::turns::TurnScheduler;
use trivia_engine::logging;

#[derive(Parser)]
#[command(name = "trivia", version, about = "Jeopardy-style multiple-choice quiz for 2-4 players")]
struct Cli {
    /// Question file (.json, .csv or .xml).
    #[arg(short, long)]
    questions: PathBuf,

    /// Player name. Repeat once per player; prompted for when omitted.
    #[arg(short, long = "player")]
    players: Vec<String>,

    /// Directory for the turn report and event log.
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Case identifier stamped on every logged event.
    #[arg(long)]
    case_id: Option<String>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GameConfig::new();
    if let Some(dir) = &cli.report_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create report directory {}", dir.display()))?;
        config = config.with_report_dir(dir);
    }
    if let Some(case_id) = cli.case_id {
        config = config.with_case_id(case_id);
    }

    let board = load_board(&cli.questions)
        .with_context(|| format!("load questions from {}", cli.questions.display()))?;
    println!("Loaded {} questions.", board.len());

    let mut console = ConsoleInput::new(io::stdin().lock(), io::stdout());
    let names = if cli.players.is_empty() {
        console.prompt_roster(&config).context("read player roster")?
    } else {
        cli.players
    };
    config.check_player_count(names.len())?;
    let scheduler = TurnScheduler::with_players(names.iter().cloned())?;

    let mut orchestrator = Orchestrator::new(
        board,
        scheduler,
        SessionContext::new(config.case_id.clone()),
        console,
        (ConsoleOutput::new(io::stdout()), TracingSink),
    );
    orchestrator.record_system(
        EventKind::LoadQuestions,
        format!("Loaded {}", cli.questions.display()),
    );
    orchestrator.record_system(EventKind::SelectPlayerCount, names.len().to_string());
    for name in &names {
        orchestrator.record_system(EventKind::RegisterPlayer, name.clone());
    }

    let summary = orchestrator.run()?;
    print_summary(&summary);

    write_turn_report(
        &config.turn_report_path,
        &summary.case_id,
        orchestrator.context().history(),
        &summary.standings,
    )
    .with_context(|| format!("write {}", config.turn_report_path.display()))?;
    orchestrator.record_system(
        EventKind::GenerateReport,
        config.turn_report_path.display().to_string(),
    );
    orchestrator.record_system(
        EventKind::GenerateEventLog,
        config.event_log_path.display().to_string(),
    );
    orchestrator.record_system(EventKind::ExitGame, "Game exited");

    write_event_log_file(&config.event_log_path, orchestrator.context().history())
        .with_context(|| format!("write {}", config.event_log_path.display()))?;

    println!(
        "Reports written to {} and {}.",
        config.turn_report_path.display(),
        config.event_log_path.display()
    );
    println!("Thanks for playing!");
    Ok(())
}

fn print_summary(summary: &SessionSummary) {
    match summary.outcome {
        SessionOutcome::Completed => println!("\nAll questions answered after {} turns.", summary.turns_played),
        SessionOutcome::Quit => println!(
            "\nGame ended after {} turns with {} questions left.",
            summary.turns_played, summary.questions_remaining
        ),
    }

    println!("Final Scores:");
    for standing in &summary.standings {
        println!("  {}: {}", standing.player, standing.score);
    }

    let leaders: Vec<&str> = summary.leaders().iter().map(|s| s.player.as_str()).collect();
    match leaders.as_slice() {
        [] => {}
        [winner] => println!("Winner: {winner}"),
        tied => println!("Tie between {}", tied.join(", ")),
    }
}
