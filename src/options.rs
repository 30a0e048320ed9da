mod tests;
mod usage;

use crate::config::{Configuration, Feature, FeatureToggles, Phase, PhaseSelector};
use clap::ValueEnum;
use std::{ffi::OsString, path::PathBuf};
use thiserror::Error;

pub use usage::usage;

const FLAG_PREFIX: &str = "--";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("More than one phase option specified.")]
    DuplicatePhaseOption,
    #[error("Unknown option '{name}'!")]
    UnknownOption { name: String },
    #[error("Too many positional arguments!")]
    TooManyPositionals,
    #[error("No input file!")]
    MissingInputFile,
    #[error("--{feature} requires --{requires} to be set")]
    IntegrityViolation { feature: Feature, requires: Feature },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageErrorKind {
    DuplicatePhaseOption,
    UnknownOption,
    TooManyPositionals,
    MissingInputFile,
    IntegrityViolation,
}

impl UsageError {
    pub fn kind(&self) -> UsageErrorKind {
        match self {
            UsageError::DuplicatePhaseOption => UsageErrorKind::DuplicatePhaseOption,
            UsageError::UnknownOption { .. } => UsageErrorKind::UnknownOption,
            UsageError::TooManyPositionals => UsageErrorKind::TooManyPositionals,
            UsageError::MissingInputFile => UsageErrorKind::MissingInputFile,
            UsageError::IntegrityViolation { .. } => UsageErrorKind::IntegrityViolation,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(Configuration),
}

#[derive(Debug, Default)]
struct Options {
    phase: PhaseSelector,
    features: FeatureToggles,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
}

impl Options {
    fn select_phase(&mut self, phase: Phase) -> Result<(), UsageError> {
        self.phase
            .select(phase)
            .map_err(|_| UsageError::DuplicatePhaseOption)
    }

    fn positional(&mut self, arg: OsString) -> Result<(), UsageError> {
        // An empty argument leaves its slot empty, the next positional fills it again
        let arg = Some(PathBuf::from(arg)).filter(|path| !path.as_os_str().is_empty());
        if self.input.is_none() {
            self.input = arg;
        } else if self.output.is_none() {
            self.output = arg;
        } else {
            return Err(UsageError::TooManyPositionals);
        }
        Ok(())
    }

    fn finish(self) -> Result<Configuration, UsageError> {
        let input = self.input.ok_or(UsageError::MissingInputFile)?;

        if let Some((feature, requires)) = self.features.unmet_requirement() {
            return Err(UsageError::IntegrityViolation { feature, requires });
        }

        Ok(Configuration {
            phase: self.phase,
            features: self.features,
            input,
            output: self.output,
            verbose: self.verbose,
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Arg {
    Phase(Phase),
    Feature(Feature),
    Verbose,
    Help,
    Unknown(String),
    Positional(OsString),
}

impl Arg {
    fn flag(name: &str) -> Option<Self> {
        match name {
            "help" => Some(Arg::Help),
            "verbose" => Some(Arg::Verbose),
            _ => <Phase as ValueEnum>::from_str(name, false)
                .map(Arg::Phase)
                .or_else(|_| <Feature as ValueEnum>::from_str(name, false).map(Arg::Feature))
                .ok(),
        }
    }

    fn classify(arg: OsString) -> Self {
        if !arg.as_encoded_bytes().starts_with(FLAG_PREFIX.as_bytes()) {
            return Arg::Positional(arg);
        }
        arg.to_str()
            .and_then(|arg| arg.strip_prefix(FLAG_PREFIX))
            .and_then(Arg::flag)
            .unwrap_or_else(|| Arg::Unknown(arg.to_string_lossy().into_owned()))
    }
}

/// Parses the command line arguments, excluding the program name.
///
/// Arguments are handled in a single pass from left to right and the first
/// error wins. `--help` ends parsing as soon as it is reached, so it skips the
/// input file and feature checks that run after the pass.
pub fn parse<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut options = Options::default();

    for arg in args {
        match Arg::classify(arg.into()) {
            Arg::Phase(phase) => options.select_phase(phase)?,
            Arg::Feature(feature) => options.features.enable(feature),
            Arg::Verbose => options.verbose = true,
            Arg::Help => return Ok(Invocation::Help),
            Arg::Unknown(name) => return Err(UsageError::UnknownOption { name }),
            Arg::Positional(arg) => options.positional(arg)?,
        }
    }

    options.finish().map(Invocation::Run)
}
