//! Grandprix season simulator CLI
//!
//! Runs one championship season in the terminal, following a chosen driver.

use anyhow::{bail, Context, Result};
use clap::Parser;
use grandprix_core::{
    title_odds, ChampionshipResult, Decision, Driver, RaceReport, RandomLuck, RosterConfig, Season,
    Standings, POINTS_TABLE,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Formula 1 season simulator
#[derive(Parser, Debug)]
#[command(name = "grandprix")]
#[command(about = "Simulate a short championship season", long_about = None)]
struct Args {
    /// Seed for a reproducible season (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Driver to follow, by 1-based roster number or by name
    #[arg(short, long, default_value = "1")]
    driver: String,

    /// JSON roster file with drivers, tracks and tie-break track
    #[arg(short, long)]
    roster: Option<String>,

    /// Also estimate title odds over this many simulated seasons
    #[arg(long)]
    odds: Option<usize>,

    /// Print the season result as JSON instead of narration
    #[arg(long)]
    json: bool,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.roster {
        Some(path) => RosterConfig::from_path(path).with_context(|| format!("loading roster {}", path))?,
        None => RosterConfig::default(),
    };
    let followed = select_driver(&config.drivers, &args.driver)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, driver = %followed.name, "starting season");
    let mut luck = RandomLuck::seeded(seed);

    let mut season = Season::new(config.drivers.clone(), config.tracks.clone())?;
    if !args.json {
        print_welcome(&config, &followed, seed);
    }

    let rounds = season.schedule().len();
    while let Some(report) = season.run_next_race(&mut luck)? {
        if !args.json {
            print_round(report, rounds, &followed);
        }
    }

    let outcome = season.finish(&config.tie_break_track, &mut luck)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_summary(&outcome.champion, &followed);
    }

    if let Some(simulations) = args.odds {
        let odds = title_odds(
            &config.drivers,
            &config.tracks,
            &config.tie_break_track,
            simulations,
            seed,
        )?;

        println!("--- TITLE ODDS ({} seasons) ---", simulations);
        for o in odds {
            println!(
                "{:<24} {:>6.1}%  [{:.1}% - {:.1}%]  {} titles ({} by tie-break)",
                o.driver.name,
                o.probability * 100.0,
                o.interval.0 * 100.0,
                o.interval.1 * 100.0,
                o.titles,
                o.tie_break_titles
            );
        }
    }

    Ok(())
}

fn select_driver(drivers: &[Driver], choice: &str) -> Result<Driver> {
    if let Ok(number) = choice.parse::<usize>() {
        if (1..=drivers.len()).contains(&number) {
            return Ok(drivers[number - 1].clone());
        }
        bail!("please choose a number between 1 and {}", drivers.len());
    }

    match drivers.iter().find(|d| d.name.eq_ignore_ascii_case(choice)) {
        Some(driver) => Ok(driver.clone()),
        None => bail!("no driver named {:?} in the roster", choice),
    }
}

fn print_welcome(config: &RosterConfig, followed: &Driver, seed: u64) {
    println!("{}", "=".repeat(50));
    println!("      FORMULA 1 SEASON SIMULATOR");
    println!("{}", "=".repeat(50));
    println!("- {} races this season.", config.tracks.len());
    println!(
        "- Points by finishing position: {}.",
        POINTS_TABLE.map(|p| p.to_string()).join(", ")
    );
    println!(
        "- A tie for the title is settled by a sudden-death race at {}.",
        config.tie_break_track.name
    );
    println!("- Season seed: {}", seed);
    println!("{}", "-".repeat(50));
    println!(">>> You are racing as {}!\n", followed.name);
}

fn print_round(report: &RaceReport, rounds: usize, followed: &Driver) {
    println!("ROUND {} of {}: {}", report.round, rounds, report.track.name);
    println!("--- RACE RESULTS: {} ---", report.track.name.to_uppercase());
    for placing in &report.result.placings {
        let marker = if placing.driver.name == followed.name { " <" } else { "" };
        println!(
            "{}. {} ({:.2}) +{} pts{}",
            placing.position, placing.driver.name, placing.score, placing.points, marker
        );
    }
    print_standings(&report.standings);
    println!();
}

fn print_standings(standings: &Standings) {
    println!("--- CURRENT WORLD STANDINGS ---");
    for (i, entry) in standings.entries.iter().enumerate() {
        println!("{}. {}: {} pts", i + 1, entry.driver.name, entry.points);
    }
}

fn print_summary(result: &ChampionshipResult, followed: &Driver) {
    if let Decision::TieBreak { track, contenders, race } = &result.decided_by {
        let names: Vec<&str> = contenders.iter().map(|d| d.name.as_str()).collect();
        println!("{}", "!".repeat(40));
        println!("THE CHAMPIONSHIP ENDED IN A TIE ON {} POINTS!", result.points);
        println!("Sudden death at {} between {}", track, names.join(", "));
        for placing in &race.placings {
            println!("{}. {} ({:.2})", placing.position, placing.driver.name, placing.score);
        }
        println!("{}", "!".repeat(40));
    }

    println!("{}", "*".repeat(40));
    println!("       FINAL SEASON SUMMARY");
    println!("{}", "*".repeat(40));
    if result.champion.name == followed.name {
        println!("WORLD CHAMPION: {}", followed.name);
        if result.via_tie_break() {
            println!("Victory secured in the final tie-break!");
        }
    } else {
        println!("Your driver, {}, finished behind the leader.", followed.name);
        println!("The title goes to {}!", result.champion.name);
        if result.via_tie_break() {
            println!("{} took the crown in the final tie-break!", result.champion.name);
        }
    }
    println!("{}\n", "*".repeat(40));
}
