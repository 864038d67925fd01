#![deny(warnings)]

//! Headless CLI: builds the demo studio, runs it for a number of simulated
//! days (or in real time) and prints the studio's KPIs.

use anyhow::{Context, Result};
use persistence::JsonDirStore;
use rust_decimal::Decimal;
use sim_core::SimConfig;
use sim_econ::total_sales;
use sim_runtime::{demo_simulation, run_realtime, validate_config, LoadConfig, SpeedCommand};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    days: Option<u32>,
    fast: bool,
    realtime_secs: Option<u64>,
    save_dir: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next(),
            "--days" => args.days = it.next().and_then(|s| s.parse().ok()),
            "--fast" => args.fast = true,
            "--realtime-secs" => args.realtime_secs = it.next().and_then(|s| s.parse().ok()),
            "--save-dir" => args.save_dir = it.next(),
            _ => {}
        }
    }
    args
}

fn load_config(path: Option<&str>) -> Result<SimConfig> {
    let cfg = match path {
        Some(p) => SimConfig::from_file(p).with_context(|| format!("loading config {p}"))?,
        None => SimConfig::default(),
    };
    validate_config(&cfg)?;
    Ok(cfg)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    info!(?args, "starting CLI");

    let config = load_config(args.config.as_deref())?;
    let (mut sim, game) = demo_simulation(config)?;
    if let Some(dir) = &args.save_dir {
        let store = JsonDirStore::open(dir).with_context(|| format!("opening save dir {dir}"))?;
        sim.attach_store(Box::new(store));
    }
    if args.fast {
        sim.fast_forward();
    } else {
        sim.play();
    }

    if let Some(secs) = args.realtime_secs {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let summary = runtime.block_on(async {
            let (tx, rx) = mpsc::channel(8);
            let stopper = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                let _ = tx.send(SpeedCommand::Stop).await;
            });
            let summary = run_realtime(&mut sim, rx).await?;
            stopper.await?;
            anyhow::Ok(summary)
        })?;
        info!(frames = summary.frames, ticks = summary.ticks, "real-time run finished");
    } else {
        let days = args.days.unwrap_or(30);
        let per_day = if args.fast { 1 } else { 24 };
        for _ in 0..days {
            sim.tick(per_day)?;
        }
    }

    if sim.save_to_store()? {
        info!("final snapshot saved");
    }

    let world = sim.world();
    let player: Vec<_> = world.games.iter().filter(|g| g.is_player_owned()).collect();
    let released = player.iter().filter(|g| g.phase.is_on_market()).count();
    let units: u64 = player.iter().map(|g| g.total_units_sold).sum();
    let revenue: Decimal = player.iter().map(|g| total_sales(g)).sum();
    let competitors = world.games.len() - player.len();

    println!(
        "Studio | date: {} | cash: ${} | games: {} ({} released) | competitors: {}",
        sim.now(),
        sim.ledger().total().round_dp(2),
        player.len(),
        released,
        competitors
    );
    if let Some(g) = world.games.iter().find(|g| g.id == game) {
        println!(
            "Game | {} | phase: {:?} | progress: {:.1}% | bugs: {} | hype: {}",
            g.name,
            g.phase,
            g.progress * 100.0,
            g.bugs,
            g.hype
        );
    }
    println!("KPI | units sold: {units} | revenue: ${}", revenue.round_dp(2));
    for news in sim.news().items().iter().rev().take(5) {
        println!("News | {} | {}", news.date.date(), news.headline());
    }
    Ok(())
}
