use clap::Parser as ClapParser;
use sqlish::{execute, Record, Value};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sqlish")]
#[command(about = "Run a SQL-like SELECT query over a JSON array of flat records")]
#[command(version)]
struct Cli {
    /// The query to execute, e.g. "SELECT name FROM t WHERE age > 26"
    query: String,

    /// JSON input (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Debug)]
enum CliError {
    Query(sqlish::Error),
    Json(serde_json::Error),
    Io(io::Error),
    Input(String),
    NoInput,
    NotSelect,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Query(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Input(msg) => write!(f, "Invalid input: {}", msg),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::NotSelect => write!(f, "Only SELECT queries are supported."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Query(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let input = match cli.input {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let json: serde_json::Value = serde_json::from_str(&input).map_err(CliError::Json)?;
    let records = records_from_json(&json)?;

    let rows = execute(&cli.query, &records)
        .map_err(CliError::Query)?
        .ok_or(CliError::NotSelect)?;

    let output = serde_json::Value::Array(rows.iter().map(record_to_json).collect());
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(CliError::Json)?;
    println!("{}", rendered);
    Ok(())
}

fn records_from_json(json: &serde_json::Value) -> Result<Vec<Record>, CliError> {
    let rows = json
        .as_array()
        .ok_or_else(|| CliError::Input("expected a JSON array of records".to_string()))?;

    rows.iter()
        .map(|row| {
            let object = row
                .as_object()
                .ok_or_else(|| CliError::Input("each record must be a JSON object".to_string()))?;
            object
                .iter()
                .map(|(key, value)| {
                    Value::from_json(value)
                        .map(|v| (key.clone(), v))
                        .ok_or_else(|| {
                            CliError::Input(format!("field '{}' is not a flat value", key))
                        })
                })
                .collect()
        })
        .collect()
}

fn record_to_json(record: &Record) -> serde_json::Value {
    serde_json::Value::Object(
        record
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}
