use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use waypath::config::Config;
use waypath::graph::loader::load_graph;
use waypath::graph::sample::{sample_graph, SAMPLE_DESTINATION, SAMPLE_SOURCE};
use waypath::services::MustPassResult;
use waypath::utils::logging;
use waypath::{Graph, RenderPayload, RouteError, RouteOutcome, RoutePlanner};

const TITLE_WHOLE_GRAPH: &str = "Whole Graph";
const TITLE_SHORTEST: &str = "Simple Dijkstra";
const TITLE_MUST_NOT_PASS: &str = "Must not pass Dijkstra";
const TITLE_MUST_PASS: &str = "Must Pass";

#[derive(Parser)]
#[command(version, author = "GraphDB Contributors", about = "Constrained shortest paths")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results (with render payloads) as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shortest path between two vertices
    Path {
        graph: PathBuf,
        from: String,
        to: String,
    },
    /// Shortest path that avoids the given vertices
    Avoid {
        graph: PathBuf,
        from: String,
        to: String,
        #[arg(short, long, value_delimiter = ',', required = true)]
        exclude: Vec<String>,
    },
    /// Shortest path that visits all given vertices in the best order
    Via {
        graph: PathBuf,
        from: String,
        to: String,
        #[arg(short, long, value_delimiter = ',')]
        require: Vec<String>,
    },
    /// Shortest paths from one vertex to every vertex
    Tree { graph: PathBuf, from: String },
    /// Render payload of the whole graph
    Render {
        graph: PathBuf,
        #[arg(short, long, default_value = TITLE_WHOLE_GRAPH)]
        title: String,
    },
    /// Run all queries on the built-in sample graph
    Demo,
}

/// 单个查询的输出
#[derive(Serialize)]
struct Report<'a> {
    title: &'a str,
    outcome: &'a RouteOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'a [String]>,
    render: RenderPayload,
}

impl<'a> Report<'a> {
    fn new(title: &'a str, outcome: &'a RouteOutcome) -> Self {
        Self {
            title,
            outcome,
            order: None,
            render: outcome.render_payload(title),
        }
    }

    fn must_pass(title: &'a str, result: &'a MustPassResult) -> Self {
        Self {
            order: Some(result.order.as_slice()),
            ..Self::new(title, &result.outcome)
        }
    }

    fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
            return Ok(());
        }
        if let Some(order) = self.order {
            println!("Min cost order : [{}]", order.join(", "));
            println!("Min cost is : {}", self.outcome.cost());
        }
        println!("{}: {}", self.title, self.outcome);
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn load(path: &Path) -> Result<Graph> {
    load_graph(path).with_context(|| format!("failed to load graph {}", path.display()))
}

fn print_payload(payload: &RenderPayload, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(payload)?);
    } else {
        println!("{}: {}", payload.title, payload.vertices.join(", "));
        for (from, to, weight) in &payload.edges {
            println!("  {} -> {} ({})", from, to, weight);
        }
    }
    Ok(())
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Command::Path { graph, from, to } => {
            let graph = load(graph)?;
            let planner = RoutePlanner::new(&graph).with_config(config.search.clone());
            let outcome = planner.shortest(from, to)?;
            Report::new(TITLE_SHORTEST, &outcome).print(cli.json)?;
        }
        Command::Avoid {
            graph,
            from,
            to,
            exclude,
        } => {
            let graph = load(graph)?;
            let planner = RoutePlanner::new(&graph).with_config(config.search.clone());
            let outcome = planner.avoiding(from, to, exclude.as_slice())?;
            Report::new(TITLE_MUST_NOT_PASS, &outcome).print(cli.json)?;
        }
        Command::Via {
            graph,
            from,
            to,
            require,
        } => {
            let graph = load(graph)?;
            let planner = RoutePlanner::new(&graph).with_config(config.search.clone());
            let result = planner.via(from, to, require.as_slice())?;
            Report::must_pass(TITLE_MUST_PASS, &result).print(cli.json)?;
        }
        Command::Tree { graph, from } => {
            let graph = load(graph)?;
            let routes = RoutePlanner::new(&graph).all_from(from)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&routes)?);
            } else {
                for route in &routes {
                    println!("{}", route);
                }
            }
        }
        Command::Render { graph, title } => {
            let graph = load(graph)?;
            print_payload(&RenderPayload::from_graph(&graph, title.as_str()), cli.json)?;
        }
        Command::Demo => {
            let graph = sample_graph();
            let planner = RoutePlanner::new(&graph).with_config(config.search.clone());
            print_payload(&RenderPayload::from_graph(&graph, TITLE_WHOLE_GRAPH), cli.json)?;

            let outcome = planner.shortest(SAMPLE_SOURCE, SAMPLE_DESTINATION)?;
            Report::new(TITLE_SHORTEST, &outcome).print(cli.json)?;

            let outcome = planner.avoiding(SAMPLE_SOURCE, SAMPLE_DESTINATION, &["c"])?;
            Report::new(TITLE_MUST_NOT_PASS, &outcome).print(cli.json)?;

            let result = planner.via(SAMPLE_SOURCE, SAMPLE_DESTINATION, &["b", "c"])?;
            Report::must_pass(TITLE_MUST_PASS, &result).print(cli.json)?;
        }
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    let code = err
        .downcast_ref::<RouteError>()
        .map_or(1, |e| e.code().exit_code());
    ExitCode::from(code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return exit_code(&err);
        }
    };

    if let Err(err) = logging::init(&config.log) {
        eprintln!("warning: failed to initialise logging: {}", err);
    }

    let code = match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if config.log.to_file {
                log::error!("{:#}", err);
            }
            eprintln!("error: {:#}", err);
            exit_code(&err)
        }
    };

    logging::shutdown();
    code
}
