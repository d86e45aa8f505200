// Demonstration: train on the shipped level in training mode, then print the
// learned policy and a greedy rollout.
//
//   cargo run --example train_demo -- --millis 2000 --seed 42
//
// Set RUST_LOG=debug to see per-episode logs.

use std::env;
use std::time::Duration;

use qgrid::session::CellKind;
use qgrid::{Action, HyperParamsUpdate, Session, SessionConfig, SimulationRunner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> qgrid::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let millis: u64 = arg_value(&args, "--millis")
        .and_then(|s| s.parse().ok())
        .unwrap_or(2000);
    let seed: Option<u64> = arg_value(&args, "--seed").and_then(|s| s.parse().ok());

    let session = Session::new(SessionConfig {
        seed,
        ..SessionConfig::default()
    })?;
    let runner = SimulationRunner::spawn(session);
    let handle = runner.handle();
    handle.set_config(HyperParamsUpdate::new().training_mode(true));

    tokio::time::sleep(Duration::from_millis(millis)).await;
    let session = runner.shutdown().await?;

    println!("{}", session.stats());
    if let Some(summary) = session.stats().history_summary() {
        println!(
            "reward history: {} episodes, min {:.1}, max {:.1}, last {:.1}, mean {:.1}",
            summary.len, summary.min, summary.max, summary.last, summary.mean
        );
    }
    println!();
    print_policy(&session);
    println!();
    println!("greedy rollout: {}", session.evaluate_greedy(200));
    Ok(())
}

fn print_policy(session: &Session) {
    let size = session.layout().grid_size();
    for row in session.policy_grid().chunks(size) {
        let line: String = row
            .iter()
            .map(|cell| match (cell.kind, cell.best_action) {
                (CellKind::Goal, _) => 'G',
                (CellKind::Hazard, _) => 'X',
                (_, Some(Action::Up)) => '^',
                (_, Some(Action::Right)) => '>',
                (_, Some(Action::Down)) => 'v',
                (_, Some(Action::Left)) => '<',
                (_, None) => '.',
            })
            .collect();
        println!("{line}");
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == key)
        .map(|w| w[1].as_str())
}
