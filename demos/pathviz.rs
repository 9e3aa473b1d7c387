//! Terminal demo: generate a layout, then animate a search over it.
//!
//! Run: cargo run --bin pathviz -- astar prims --compare bfs --seed 3

use pathviz_demos::{Args, USAGE, render};
use pathviz_mapgen::MapGen;
use pathviz_replay::{Context, Msg, Scheduler, Session, SessionConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if args.help {
        print!("{USAGE}");
        return;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    if args.preset.is_random() {
        log::info!("preset {} with seed {seed}", args.preset);
    }
    let grid = match MapGen::new(StdRng::seed_from_u64(seed)).generate(args.preset) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let config = SessionConfig {
        speed: args.speed,
        algorithm: args.algorithm,
        ..SessionConfig::default()
    };
    let mut session = Session::with_grid(config, grid);
    let mut scheduler = Scheduler::new();
    if let Some(other) = args.compare {
        scheduler.dispatch(&mut session, Msg::SetComparison(true));
        scheduler.dispatch(&mut session, Msg::SelectAlgorithmA(args.algorithm));
        scheduler.dispatch(&mut session, Msg::SelectAlgorithmB(other));
    }
    scheduler.dispatch(&mut session, Msg::Play);
    if let Some(e) = session.last_error() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let ctx = Context::new();
    let ticks = scheduler.run_realtime(&mut session, &ctx, |s| {
        // Home the cursor and clear, then redraw.
        print!("\x1b[H\x1b[2J{}", render(s));
    });
    print!("\x1b[H\x1b[2J{}", render(&session));
    log::info!("finished after {ticks} ticks");
}
