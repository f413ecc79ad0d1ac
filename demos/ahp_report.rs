//! Both input paths end to end: guided pairwise entry and a pasted grid.
//!
//! Run: `cargo run --example ahp_report`
//! Solver events: `RUST_LOG=ahp_weights=debug cargo run --example ahp_report`

use ahp_weights::{
    build_reciprocal_matrix, parse_grid, AhpReport, CriterionLabels, Solver, SolverConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let solver = Solver::new(SolverConfig::default())?;

    println!("=== Guided entry: choosing a laptop ===\n");

    // (price, battery), (price, weight), (price, screen),
    // (battery, weight), (battery, screen), (weight, screen)
    let upper = [3.0, 5.0, 7.0, 2.0, 3.0, 2.0];
    let matrix = build_reciprocal_matrix(4, &upper)?;
    let labels = CriterionLabels::new(["Price", "Battery", "Weight", "Screen"], 4)?;
    let priorities = solver.solve(&matrix)?;
    let report = AhpReport::new(labels, priorities)?.with_matrix(matrix)?;
    println!("{report}\n");

    println!("=== Pasted grid: contradictory judgments ===\n");

    let text = "\
1    9    1
0.111, 1, 9
1 0.111 1
";
    let rows = parse_grid(text)?;
    let priorities = ahp_weights::solve(&rows, 3)?;
    let report = AhpReport::new(CriterionLabels::default_for(3), priorities)?;
    println!("{report}\n");

    println!("=== Pasted grid: a typo ===\n");

    match parse_grid("1 2\n0.5 l") {
        Ok(_) => println!("unexpectedly parsed"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}
