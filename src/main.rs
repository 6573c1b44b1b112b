use docopt::Docopt;
use mazes_dfs::grid::Grid;
use mazes_dfs::grid_displays::{GridDisplay, LayeredDisplay, PathDisplay, StartEndPointsDisplay, VisitedDisplay};
use mazes_dfs::maze::Maze;
use mazes_dfs::renderers::{MoveKind, RecordingHook, RenderHook};
use mazes_dfs::units::{ColumnsCount, RowsCount};
use petgraph::visit::EdgeRef;
use serde_derive::Deserialize;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Mazes DFS

Usage:
    mazes_driver -h | --help
    mazes_driver [--rows=<n>] [--cols=<n>] [--seed=<s>] [--solve] [--show-visited] [--text-out=<path>] [--save-edges=<path>] [--events]

Options:
    -h --help              Show this screen.
    --rows=<n>             Number of rows in the maze [default: 10].
    --cols=<n>             Number of columns in the maze [default: 10].
    --seed=<s>             Seed for the random generator, the same seed always gives the same maze.
    --solve                Find the route from the entrance (top left) to the exit (bottom right) and show it.
    --show-visited         Mark every cell the solver searched, including dead ends.
    --text-out=<path>      Output file path for a textual rendering of the maze instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --events               Record the render events and print how many of each kind there were.

Log output goes to stderr and is filtered with RUST_LOG (default: warn).
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_cols: usize,
    flag_seed: Option<u64>,
    flag_solve: bool,
    flag_show_visited: bool,
    flag_text_out: String,
    flag_save_edges: String,
    flag_events: bool,
}

// The driver's own errors. Library errors are linked in so `?` works on everything the
// `mazes_dfs` functions return.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes_dfs::errors::Error, ::mazes_dfs::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        Err(e @ docopt::Error::Deserialize(_)) => return Err(e.into()),
        Err(e) => e.exit(),
    };

    init_logging();

    let (rows, columns) = (RowsCount(args.flag_rows), ColumnsCount(args.flag_cols));
    if args.flag_events {
        let mut maze = Maze::with_hook(rows, columns, args.flag_seed, RecordingHook::new())
            .chain_err(|| format!("Failed to build a {}x{} maze", args.flag_rows, args.flag_cols))?;
        output_maze(&mut maze, &args)?;
        print_event_summary(maze.hook());
    } else {
        let mut maze = Maze::new(rows, columns, args.flag_seed)
            .chain_err(|| format!("Failed to build a {}x{} maze", args.flag_rows, args.flag_cols))?;
        output_maze(&mut maze, &args)?;
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn output_maze<H: RenderHook>(maze: &mut Maze<H>, maze_args: &MazeArgs) -> Result<()> {

    info!(rows = maze_args.flag_rows, cols = maze_args.flag_cols, seed = ?maze.seed(), "maze built");

    if !maze_args.flag_save_edges.is_empty() {

        save_maze_graph(maze.grid(), &maze_args.flag_save_edges)?;
    }

    let route = if maze_args.flag_solve || maze_args.flag_show_visited {
        let route = maze.solve_path();
        if route.is_none() {
            // Only possible if generation failed to make a perfect maze
            warn!(entrance = %maze.entrance(), exit = %maze.exit(), "no route through the maze");
        }
        route
    } else {
        None
    };

    let start_end = StartEndPointsDisplay::new(maze.entrance(), maze.exit());
    let path = PathDisplay::new(route.as_deref().unwrap_or(&[]));
    let visited = if maze_args.flag_show_visited {
        Some(VisitedDisplay::new(maze.grid()))
    } else {
        None
    };

    let mut layers: Vec<&dyn GridDisplay> = vec![&start_end];
    if maze_args.flag_solve {
        layers.push(&path);
    }
    if let Some(ref visited) = visited {
        layers.push(visited);
    }
    let display = LayeredDisplay::new(layers);
    let text = maze.grid().display_with(&display).to_string();

    if maze_args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &maze_args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", maze_args.flag_text_out))?;
    }

    Ok(())
}

fn print_event_summary(hook: &RecordingHook) {
    let forward = hook.moves().filter(|m| m.2 == MoveKind::Forward).count();
    let undone = hook.moves().filter(|m| m.2 == MoveKind::Undo).count();
    println!("events: {}", hook.events().len());
    println!("cells drawn: {}", hook.cells_drawn_count());
    println!("cells visited: {}", hook.visits().count());
    println!("moves: {} forward, {} undone", forward, undone);
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let graph = maze_grid.passage_graph();
    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.edge_references() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
