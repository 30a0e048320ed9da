macro_rules! start_trace {
    ($config: expr, $label: literal) => {
        if $config.verbose() {
            eprint!("{}:", $label);
        }
    };
}

macro_rules! trace {
    ($config: expr, $value: expr) => {
        if $config.verbose() {
            eprint!(" {}", $value);
        }
    };
}

macro_rules! end_trace {
    ($config: expr) => {
        if $config.verbose() {
            eprintln!();
        }
    };
}

pub(crate) use end_trace;
pub(crate) use start_trace;
pub(crate) use trace;
