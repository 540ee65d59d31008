use rpdgraph::layout::{HeadlessError, HeadlessLayouter, LayoutConfig, metadata_from_json_str};
use rpdgraph::{GraphEdge, GraphNode, build_graph, classify, link_software};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(HeadlessError),
    Json(serde_json::Error),
    NodeNotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NodeNotFound(id) => write!(f, "No node with id {id} in the layout"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Graph(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Graph,
    #[default]
    Layout,
    Multi,
    Detail,
    Shade,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    inputs: Vec<String>,
    pretty: bool,
    classify: bool,
    link_software: bool,
    verbose: bool,
    config: Option<String>,
    node: Option<String>,
    shade_count: Option<usize>,
}

#[derive(Serialize)]
struct GraphOut<'a> {
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
}

fn usage() -> &'static str {
    "rpdgraph-cli\n\
\n\
USAGE:\n\
  rpdgraph-cli graph [--pretty] [--classify] [--link-software] [<path>|-]\n\
  rpdgraph-cli [layout] [--pretty] [--config <path>] [<path>|-]\n\
  rpdgraph-cli multi [--pretty] [--config <path>] <path>...\n\
  rpdgraph-cli detail --node <id> [--pretty] [--config <path>] [<path>|-]\n\
  rpdgraph-cli shade <period> [--count <n>]\n\
\n\
OPTIONS:\n\
  -v, --verbose   Log layout diagnostics to stderr (RUST_LOG overrides).\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - layout and detail accept a metadata document or an analysis response wrapping one.\n\
  - multi accepts one multi-graph response, or several metadata documents.\n\
  - --config reads .json, .yaml or .yml; missing keys keep their defaults.\n\
  - Exit codes: 1 runtime error, 2 usage, 3 node not found.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_seen = false;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "graph" | "layout" | "multi" | "detail" | "shade" if !command_seen => {
                args.command = match a.as_str() {
                    "graph" => Command::Graph,
                    "multi" => Command::Multi,
                    "detail" => Command::Detail,
                    "shade" => Command::Shade,
                    _ => Command::Layout,
                };
                command_seen = true;
            }
            "--pretty" => args.pretty = true,
            "--classify" => args.classify = true,
            "--link-software" => args.link_software = true,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--node" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.node = Some(id.clone());
            }
            "--count" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
                if n == 0 {
                    return Err(CliError::Usage(usage()));
                }
                args.shade_count = Some(n);
            }
            "--" => args.inputs.extend(it.by_ref().cloned()),
            "-" => args.inputs.push(a.clone()),
            other if other.starts_with('-') && !matches!(args.command, Command::Shade) => {
                return Err(CliError::Usage(usage()));
            }
            path => args.inputs.push(path.to_string()),
        }
        command_seen = true;
    }

    match args.command {
        Command::Multi => {}
        Command::Shade if args.inputs.len() != 1 => return Err(CliError::Usage(usage())),
        Command::Detail if args.node.is_none() => return Err(CliError::Usage(usage())),
        _ if args.inputs.len() > 1 => return Err(CliError::Usage(usage())),
        _ => {}
    }
    Ok(args)
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. in tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn layouter(config: Option<&str>) -> Result<HeadlessLayouter, CliError> {
    match config {
        Some(path) => Ok(HeadlessLayouter::from_config_path(path)?),
        None => Ok(HeadlessLayouter::default()),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    tracing::debug!(command = ?args.command, inputs = args.inputs.len(), "running");
    let input = args.inputs.first().map(String::as_str);

    match args.command {
        Command::Graph => {
            let text = read_input(input)?;
            let mut data = metadata_from_json_str(&text)?;
            if args.classify {
                data.category = classify(&data.name, &data.description, &data.goals);
            }
            if args.link_software {
                link_software(&mut data.sections, &data.software);
            }
            let (nodes, edges) = build_graph(&data, "");
            write_json(
                &GraphOut {
                    nodes: &nodes,
                    edges: &edges,
                },
                args.pretty,
            )
        }
        Command::Layout => {
            let text = read_input(input)?;
            let layout = layouter(args.config.as_deref())?.layout_json_sync(&text)?;
            write_json(&layout, args.pretty)
        }
        Command::Multi => {
            let texts = if args.inputs.is_empty() {
                vec![read_input(None)?]
            } else {
                args.inputs
                    .iter()
                    .map(|p| read_input(Some(p)))
                    .collect::<Result<Vec<_>, _>>()?
            };
            let layout = layouter(args.config.as_deref())?.layout_multi_json_sync(&texts)?;
            write_json(&layout, args.pretty)
        }
        Command::Detail => {
            let id = args.node.as_deref().unwrap_or_default();
            let text = read_input(input)?;
            let Some(detail) = layouter(args.config.as_deref())?.detail_json_sync(&text, id)?
            else {
                return Err(CliError::NodeNotFound(id.to_string()));
            };
            write_json(&detail, args.pretty)
        }
        Command::Shade => {
            let period = input.unwrap_or_default();
            let config = LayoutConfig::default();
            let count = args.shade_count.unwrap_or(config.shade_count);
            let index =
                rpdgraph::layout::shade_index_with_divisor(period, count, config.shade_divisor);
            println!("{index}");
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::NodeNotFound(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
