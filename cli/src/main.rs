use std::fs;
use std::io::{self, Write};

use clap::Parser;
use qcl::Error;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "qcl", version, about = "QCL configuration to JSON converter")]
struct Args {
    /// Input configuration file.
    #[arg(short, long, value_name = "file")]
    input: String,

    /// Output file path (prints to stdout if omitted or '-').
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Emit single-line JSON instead of the pretty form.
    #[arg(long)]
    compact: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> qcl::Result<()> {
    let args = Args::parse();
    let input = fs::read_to_string(&args.input)
        .map_err(|err| Error::io(format!("cannot read {}: {err}", args.input)))?;
    let value = qcl::parse_str(&input)?;
    let rendered = render_json(&value, args.compact)?;
    write_output(args.output.as_deref(), rendered.as_bytes())
}

fn render_json(value: &Value, compact: bool) -> qcl::Result<String> {
    let result = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    result.map_err(|err| Error::io(format!("cannot render JSON: {err}")))
}

fn write_output(path: Option<&str>, data: &[u8]) -> qcl::Result<()> {
    match path {
        Some(path) if path != "-" => {
            let mut out = Vec::with_capacity(data.len() + 1);
            out.extend_from_slice(data);
            out.push(b'\n');
            fs::write(path, out).map_err(|err| Error::io(format!("cannot write {path}: {err}")))
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(data)
                .and_then(|_| handle.write_all(b"\n"))
                .map_err(|err| Error::io(format!("cannot write to stdout: {err}")))
        }
    }
}
