//! Command-line replay driver: reads a trace (and optional options file) and prints replayed frames as JSON lines.

use std::io::Write;
use std::path::Path;

use partview::error::PartviewError;
use partview::options::Options;
use partview::replay::Trace;

fn run(trace_path: &Path, options_path: Option<&Path>) -> Result<(), PartviewError> {
    let options = match options_path {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let trace = Trace::load(trace_path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in trace.replay(options) {
        let line = serde_json::to_string(&frame)
            .map_err(|e| PartviewError::TraceParse(e.to_string()))?;
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(trace_path) = args.next() else {
        log::error!("Usage: partview <trace.json> [options.toml]");
        std::process::exit(1);
    };
    let options_path = args.next();

    if let Err(e) = run(Path::new(&trace_path), options_path.as_deref().map(Path::new)) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
