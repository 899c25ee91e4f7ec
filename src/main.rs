use docopt::Docopt;
use itertools::Itertools;
use log::{info, warn};
use serde_derive::Deserialize;
use perfect_maze::{
    connectivity,
    generators::{self, NeighbourSelection},
    grid::WallGrid,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Perfect mazes

Usage:
    perfect_maze -h | --help
    perfect_maze [--grid-size=<n>] [--seed=<s>] [--selection=<policy>] [--text-out=<path>] [--save-edges=<path>] [--check]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n [default: 25].
    --seed=<s>             Seed for a reproducible maze. Omit for a different maze every run.
    --selection=<policy>   How the next neighbour is picked: uniform or shuffled [default: uniform].
    --text-out=<path>      Output file path for a textual rendering of the maze instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --check                Verify the maze is a spanning tree and log the result.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: usize,
    flag_seed: Option<u64>,
    flag_selection: String,
    flag_text_out: String,
    flag_save_edges: String,
    flag_check: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::perfect_maze::errors::Error, ::perfect_maze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let selection = args.flag_selection.parse::<NeighbourSelection>()?;

    info!("generating {0}x{0} maze, seed {1:?}, {2:?}",
          args.flag_grid_size,
          args.flag_seed,
          selection);

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };
    let maze_grid = generators::recursive_backtracker_with(args.flag_grid_size, &mut rng, selection)
        .chain_err(|| "Failed to generate maze")?;

    info!("generated {:?}", maze_grid);

    if args.flag_check {
        match connectivity::check_perfect_maze(&maze_grid) {
            Ok(()) => info!("maze is a spanning tree over {} cells", maze_grid.size()),
            Err(defect) => warn!("maze is not perfect: {}", defect),
        }
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if args.flag_text_out.is_empty() {
        print!("{}", maze_grid);
    } else {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &WallGrid, file_path: &str) -> Result<()> {

    let edge_lines = maze_grid.iter_passages()
        .filter_map(|(src, dst)| {
            maze_grid.grid_coordinate_to_index(src)
                .zip(maze_grid.grid_coordinate_to_index(dst))
        })
        .map(|(index_a, index_b)| format!("{} {}", index_a + 1, index_b + 1))
        .join("\n");

    let mut graph_data = format!("{} {}\n", maze_grid.size(), maze_grid.passages_count());
    graph_data.push_str(&edge_lines);
    if !edge_lines.is_empty() {
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("saved maze graph to {}", file_path);

    Ok(())
}
