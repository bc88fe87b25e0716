use medusa::{Algorithm, Graph, Options, Vector};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(medusa::Error),
    Json(serde_json::Error),
    MalformedInput(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::MalformedInput(msg) => write!(f, "Malformed input: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<medusa::Error> for CliError {
    fn from(value: medusa::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug)]
struct Args {
    algorithm: Algorithm,
    space: [f64; 2],
    options: Options,
    json: bool,
    input: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::ScaledSpring,
            space: [100.0, 100.0],
            options: Options::default(),
            json: false,
            input: None,
        }
    }
}

fn usage() -> &'static str {
    "medusa-cli\n\
\n\
USAGE:\n\
  medusa-cli [--algorithm fr|walshaw|kk] [--x <extent>] [--y <extent>]\n\
             [--iterations <n>] [--tolerance <t>] [--separation <c>]\n\
             [--repulsive <c>] [--kd true|false] [--alpha <ratio>]\n\
             [--json] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is `n m` followed by m edges `u v`; kk edges carry a third\n\
    weight column `u v w`.\n\
  - Output is one line of coordinates per vertex with two-decimal\n\
    precision, or a JSON array of coordinate tuples with --json.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut set_option = |args: &mut Args, key: &str, value: &String| {
        args.options.insert(key.to_string(), value.clone());
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--algorithm" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.algorithm = match name.as_str() {
                    "fr" => Algorithm::SpringElectrical,
                    "walshaw" => Algorithm::ScaledSpring,
                    "kk" => Algorithm::StressMajorization,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--x" | "--y" => {
                let flag = a.as_str();
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let extent = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(extent.is_finite() && extent > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.space[if flag == "--x" { 0 } else { 1 }] = extent;
            }
            "--iterations" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                set_option(&mut args, "iterations", v);
            }
            "--tolerance" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                set_option(&mut args, "tolerance", v);
            }
            "--separation" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                set_option(&mut args, "separation_constant", v);
            }
            "--repulsive" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                set_option(&mut args, "force_constant", v);
            }
            "--kd" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                set_option(&mut args, "use_spatial_approximation", v);
            }
            "--alpha" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                set_option(&mut args, "opening_angle", v);
            }
            "--json" => args.json = true,
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                if path != "-" {
                    args.input = Some(path.to_string());
                }
            }
        }
    }

    Ok(args)
}

fn next_usize(
    tokens: &mut std::str::SplitWhitespace<'_>,
    name: &str,
) -> Result<usize, CliError> {
    let Some(tok) = tokens.next() else {
        return Err(CliError::MalformedInput(format!("missing {name}")));
    };
    tok.parse::<usize>()
        .map_err(|_| CliError::MalformedInput(format!("invalid {name}: `{tok}`")))
}

/// Parses `n m` followed by `m` edge lines. Weights are only consumed for
/// stress majorization; the spring engines ignore edge weights entirely.
fn read_graph(text: &str, weighted: bool) -> Result<Graph, CliError> {
    let mut tokens = text.split_whitespace();

    let n = next_usize(&mut tokens, "vertex count")?;
    let m = next_usize(&mut tokens, "edge count")?;

    let mut graph = Graph::new(n);
    for _ in 0..m {
        let u = next_usize(&mut tokens, "edge endpoint")?;
        let v = next_usize(&mut tokens, "edge endpoint")?;
        let weight = if weighted {
            let Some(tok) = tokens.next() else {
                return Err(CliError::MalformedInput("missing edge weight".to_string()));
            };
            tok.parse::<f64>()
                .map_err(|_| CliError::MalformedInput(format!("invalid edge weight: `{tok}`")))?
        } else {
            1.0
        };
        graph.add_edge(u, v, weight)?;
    }

    if let Some(tok) = tokens.next() {
        return Err(CliError::MalformedInput(format!(
            "unexpected trailing token: `{tok}`"
        )));
    }

    Ok(graph)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    let weighted = args.algorithm == Algorithm::StressMajorization;
    let graph = read_graph(&text, weighted)?;
    let positions: Vec<Vector<2>> =
        medusa::layout(&graph, args.algorithm, args.space, &args.options)?;

    if args.json {
        println!("{}", serde_json::to_string(&positions)?);
    } else {
        for p in &positions {
            println!("{:.2} {:.2}", p[0], p[1]);
        }
    }
    Ok(())
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

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
