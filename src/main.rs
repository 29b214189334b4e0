/*

    Run a file of bounding volume queries and report
    which of them disagree with their expected result.

    @date: Oct, 2025
    @author: Bartu

*/

use std::{self, env};
use tracing::{info, warn, error};

use bound_volumes::json_parser::parse_queries;
use bound_volumes::query::run_queries;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init(); 

    // Parse args
    let args: Vec<String> = env::args().collect();
    let json_path: &String = if args.len() == 1 {
        warn!("No arguments were provided, setting default query path...");
        &String::from("./inputs/fixtures.json")
    } else if args.len() == 2 {
        &args[1]
    } else {
        error!("Usage: {} <filename>.json", args[0]);
        std::process::exit(1);
    };

    // Parse JSON
    info!("Loading queries from {}...", json_path);
    let queries = parse_queries(json_path).map_err(|e| {
        error!("Failed to load queries: {}", e);
        e
    })?;

    let outcomes = run_queries(&queries);

    let failed: Vec<_> = outcomes.iter().filter(|o| !o.passed()).collect();
    for o in &failed {
        error!("Query {} hit={} expected={:?}", o.id, o.hit, o.expect);
    }
    if !failed.is_empty() {
        return Err(format!("{} of {} queries failed", failed.len(), outcomes.len()).into());
    }

    info!("Finished execution.");
    Ok(())
}
