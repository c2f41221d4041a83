use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use std::{fs, path::PathBuf, process::ExitCode, time::Duration};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;
use wayfinder::{
    graph_algos::{Deadline, ExpansionLimit, Interrupt},
    maze::Cell,
    report::{self, ErrorResponse, RouteReport},
    CampusMap, HeuristicKind, Location, Maze, SearchError, Strategy, Verbosity,
};

#[derive(Parser)]
#[command(version)]
/// Walking directions and graph search over a campus map.
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(
        help = "Map file to load instead of the built-in campus",
        long = "map",
        global = true
    )]
    map: Option<PathBuf>,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        global = true,
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour", global = true)]
    colour: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a walking route between two locations.
    Route {
        #[arg(help = "Where to start", long = "from")]
        from: String,
        #[arg(
            help = "Where to go",
            long = "to",
            required_unless_present = "random_goal",
            conflicts_with = "random_goal"
        )]
        to: Option<String>,
        #[arg(help = "Pick the destination at random", long = "random-goal")]
        random_goal: bool,
        #[arg(help = "Seed for --random-goal", long = "seed", requires = "random_goal")]
        seed: Option<u64>,
        #[arg(
            help = "The search algorithm: BFS, DFS, UCS or A*",
            short = 'a',
            long = "algorithm",
            default_value = "A*"
        )]
        algorithm: Strategy,
        #[arg(value_enum, help = "Heuristic for A*, defaults to the map setting", long = "heuristic")]
        heuristic: Option<HeuristicKind>,
        #[arg(help = "Print the route as JSON", long = "json")]
        json: bool,
        #[arg(help = "Give up after exploring this many nodes", long = "max-expansions")]
        max_expansions: Option<usize>,
        #[arg(help = "Give up after this many milliseconds", long = "timeout-ms")]
        timeout_ms: Option<u64>,
    },
    /// List the locations on the map.
    Locations {
        #[arg(help = "Print locations with coordinates and notes as JSON", long = "json")]
        json: bool,
    },
    /// Solve a grid maze of S, G, 0 and 1 cells.
    Maze {
        #[arg(help = "The maze file")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG overrides --verbosity
    let level: tracing::Level = cli.verbosity.into();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(cli.colour)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let json = matches!(cli.command, Commands::Route { json: true, .. } | Commands::Locations { json: true });
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!(status = err.status_code(), "{err}");
            if json {
                match serde_json::to_string(&ErrorResponse::from(&err)) {
                    Ok(body) => println!("{body}"),
                    Err(_) => eprintln!("error: {err}"),
                }
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SearchError> {
    match cli.command {
        Commands::Maze { file } => solve_maze(&fs::read_to_string(file)?),
        Commands::Locations { json } => {
            let map = load_map(cli.map)?;
            list_locations(&map, json)
        }
        Commands::Route { from, to, seed, algorithm, heuristic, json, max_expansions, timeout_ms, .. } => {
            let map = load_map(cli.map)?;
            let start = resolve(&map, &from)?;
            let goal = match to {
                Some(to) => resolve(&map, &to)?,
                None => {
                    let mut rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_os_rng(),
                    };
                    let goal = map
                        .graph()
                        .random_location(&mut rng)
                        .ok_or_else(|| SearchError::InvalidMap("map has no locations".to_string()))?;
                    info!(%goal, "picked a random destination");
                    goal
                }
            };

            let mut engine = map.engine();
            if let Some(heuristic) = heuristic {
                engine = engine.with_heuristic(heuristic);
            }

            let mut limit = max_expansions.map(ExpansionLimit);
            let mut deadline = timeout_ms.map(|ms| Deadline::after(Duration::from_millis(ms)));
            let mut interrupt = |explored: usize| {
                limit.as_mut().is_some_and(|limit| limit.should_stop(explored))
                    || deadline.as_mut().is_some_and(|deadline| deadline.should_stop(explored))
            };

            let result = engine.search_with(start, goal, algorithm, &mut interrupt)?;
            let route = RouteReport::new(&map, &result).ok_or_else(|| SearchError::NoPathFound {
                start: start.to_string(),
                goal: goal.to_string(),
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&route)?);
            } else {
                println!("Algorithm: {algorithm}");
                println!("{route}");
            }
            Ok(())
        }
    }
}

fn load_map(path: Option<PathBuf>) -> Result<CampusMap, SearchError> {
    match path {
        Some(path) => CampusMap::from_path(path),
        None => CampusMap::campus(),
    }
}

fn resolve<'m>(map: &'m CampusMap, name: &str) -> Result<&'m Location, SearchError> {
    map.graph()
        .find_location(name)
        .ok_or_else(|| SearchError::InvalidLocation(name.to_string()))
}

fn list_locations(map: &CampusMap, json: bool) -> Result<(), SearchError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report::buildings(map))?);
        return Ok(());
    }

    let mut names: Vec<&Location> = map.graph().locations().collect();
    names.sort();
    println!("Available locations:");
    for name in names {
        println!("  - {name}");
    }
    Ok(())
}

fn solve_maze(text: &str) -> Result<(), SearchError> {
    let maze = Maze::parse(text)?;
    println!("The Maze =");
    println!("{maze}");
    println!();

    let heuristics = [HeuristicKind::Manhattan, HeuristicKind::Euclidean, HeuristicKind::Diagonal];
    for heuristic in heuristics {
        let greedy = maze.greedy(heuristic)?;
        print_maze_plan("Greedy Best-First", heuristic, greedy.path.as_deref(), greedy.nodes_explored);

        let a_star = maze.solve(Strategy::AStar, heuristic)?;
        print_maze_plan("A*", heuristic, a_star.path.as_deref(), a_star.nodes_explored);
    }
    Ok(())
}

fn print_maze_plan(algorithm: &str, heuristic: HeuristicKind, path: Option<&[Cell]>, nodes_explored: usize) {
    println!("{algorithm} with {heuristic} heuristic:");
    match path {
        Some(path) => {
            println!("  Path length: {}", path.len().saturating_sub(1));
            println!("  Nodes explored: {nodes_explored}");
            println!("  Path: {path:?}");
        }
        None => {
            println!("  Path length: N/A");
            println!("  Nodes explored: {nodes_explored}");
            println!("  No path found");
        }
    }
    println!();
}
