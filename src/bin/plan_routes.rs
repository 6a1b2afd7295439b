// src/bin/plan_routes.rs

//! Demo driver: the external orchestration and visualization collaborator.
//!
//! Plans five routes over the fixed street grid from N1 to N20 with an
//! increasing perturbation factor per run, and renders each run as a
//! Graphviz DOT file (`routes/route_<n>.dot`) with the selected route
//! highlighted. All file-system concerns live here, outside the core.

use qroute::{Graph, Path, RouteError, RoutePlanner, RouteSink, RunSelection, all_simple_paths};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Highlight color per run, cycling if more runs than colors are asked for.
const RUN_COLORS: [&str; 5] = ["blue", "green", "red", "purple", "orange"];

/// Renders one DOT file per run: the full graph in light gray, every
/// candidate path's edges in darker gray, and the selected route in the
/// run's color.
struct DotSink {
    dir: PathBuf,
}

impl DotSink {
    fn new(dir: impl Into<PathBuf>) -> Result<Self, RouteError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| RouteError::Render {
            message: format!("cannot create {}: {e}", dir.display()),
        })?;
        Ok(Self { dir })
    }
}

impl RouteSink for DotSink {
    fn emit(
        &mut self,
        graph: &Graph,
        paths: &[Path],
        selection: &RunSelection,
    ) -> Result<(), RouteError> {
        let file_name = self.dir.join(format!("route_{}.dot", selection.run + 1));
        let color = RUN_COLORS[selection.run % RUN_COLORS.len()];
        let selected = &paths[selection.selected];

        let mut out = String::from("graph routes {\n  node [shape=circle style=filled fillcolor=lightblue];\n");
        let on_candidate = |a: &str, b: &str| {
            paths
                .iter()
                .any(|p| p.edges().any(|(x, y)| (x == a && y == b) || (x == b && y == a)))
        };
        let on_selected = |a: &str, b: &str| {
            selected
                .edges()
                .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
        };
        for (a, b, weight) in graph.edges() {
            let style = if on_selected(a, b) {
                format!("color={color} penwidth=4")
            } else if on_candidate(a, b) {
                "color=gray40 penwidth=2".to_string()
            } else {
                "color=gray80".to_string()
            };
            out.push_str(&format!("  \"{a}\" -- \"{b}\" [label=\"{weight}\" {style}];\n"));
        }
        out.push_str("}\n");

        let mut file = fs::File::create(&file_name).map_err(|e| RouteError::Render {
            message: format!("cannot create {}: {e}", file_name.display()),
        })?;
        file.write_all(out.as_bytes()).map_err(|e| RouteError::Render {
            message: format!("cannot write {}: {e}", file_name.display()),
        })?;

        println!("Route saved as {}", file_name.display());
        Ok(())
    }
}

fn run() -> Result<(), RouteError> {
    let graph = Graph::street_grid();
    let paths = all_simple_paths(&graph, "N1", "N20")?;
    let planner = RoutePlanner::new();
    let mut sink = DotSink::new("routes")?;

    // Five independent runs with a growing perturbation magnitude.
    for run in 0..5 {
        let perturbation = 5.0 * (run + 1) as f64;
        let mut score_rng = rand::rng();
        let mut measure_rng = rand::rng();
        // Caller policy: report a failed run and continue with the next.
        match planner.select_route(&graph, &paths, perturbation, &mut score_rng, &mut measure_rng)
        {
            Ok(selected) => {
                let selection = RunSelection {
                    run,
                    perturbation,
                    selected,
                };
                sink.emit(&graph, &paths, &selection)?;
                println!("run {}: {}", run + 1, paths[selected]);
            }
            Err(e) => eprintln!("run {} failed: {e}", run + 1),
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
