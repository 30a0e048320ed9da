mod config;
pub mod options;
pub mod output;
mod trace;

pub use config::{Configuration, Feature, FeatureToggles, Phase, PhaseSelector};
pub use options::{Invocation, UsageError, UsageErrorKind, parse, usage};
pub use output::OutputSink;

use std::io;
use thiserror::Error;
use trace::{end_trace, start_trace, trace};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not write compiler output to {destination}")]
    Output {
        destination: String,
        #[source]
        source: io::Error,
    },
}

pub fn print_error(mut error: &dyn std::error::Error) {
    eprintln!("\x1b[93m{error}\x1b[0m");
    while let Some(source) = error.source() {
        eprintln!("Caused by: \x1b[35m{source}\x1b[0m");
        error = source;
    }
}

fn destination(config: &Configuration) -> String {
    config
        .output()
        .map_or_else(|| String::from("stdout"), |path| path.display().to_string())
}

/// Acquires the output sink for a parsed configuration and releases it again.
pub fn run(config: &Configuration) -> Result<(), Error> {
    start_trace!(config, "Input");
    trace!(config, config.input().display());
    end_trace!(config);

    start_trace!(config, "Phases");
    for phase in config.phases() {
        trace!(config, format_args!("{phase}({})", phase.label()));
    }
    end_trace!(config);

    start_trace!(config, "Features");
    for feature in config.features().enabled() {
        trace!(config, feature);
    }
    end_trace!(config);

    let output_error = |source| Error::Output {
        destination: destination(config),
        source,
    };

    let sink = output::resolve(config.output()).map_err(output_error)?;

    start_trace!(config, "Output");
    trace!(config, &sink);
    end_trace!(config);

    sink.release().map_err(output_error)
}
