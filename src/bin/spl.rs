use spl_compiler::{self as compiler, Invocation};
use std::{env, process::ExitCode};

fn main() -> ExitCode {
    let config = match compiler::parse(env::args_os().skip(1)) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            print!("{}", compiler::usage());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Usage error: {e}");
            eprintln!();
            eprint!("{}", compiler::usage());
            return ExitCode::FAILURE;
        }
    };

    match compiler::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ref e) => {
            compiler::print_error(e);
            ExitCode::FAILURE
        }
    }
}
