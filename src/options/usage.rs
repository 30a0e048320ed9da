use super::FLAG_PREFIX;
use crate::config::{Feature, Phase};
use clap::ValueEnum;

const PROGRAM: &str = "spl";
const FLAG_COLUMN: usize = 20;

const TRAILING_FLAGS: &[(&str, &str)] = &[
    ("verbose", "Trace the compiler configuration to stderr."),
    ("help", "Show this help."),
];

fn flag_line(out: &mut String, name: &str, help: &str) {
    let flag = format!("{FLAG_PREFIX}{name}");
    out.push_str(&format!("  {flag:<FLAG_COLUMN$}{help}\n"));
}

fn value_lines<T: ValueEnum>(out: &mut String) {
    for value in T::value_variants().iter().filter_map(T::to_possible_value) {
        let help = value.get_help().map(ToString::to_string).unwrap_or_default();
        flag_line(out, value.get_name(), &help);
    }
}

/// Full help text, ending in a newline.
pub fn usage() -> String {
    let mut out = format!("Usage: {PROGRAM} [OPTION] INPUT_FILE [OUTPUT_FILE]\n\n");
    out.push_str("Executes all compiler phases up to (and including) the specified one.\n");
    out.push_str(
        "If no flag is specified, all phases are run and code is written to the output file.\n",
    );
    out.push_str("Options:\n");
    value_lines::<Phase>(&mut out);
    value_lines::<Feature>(&mut out);
    for (name, help) in TRAILING_FLAGS {
        flag_line(&mut out, name, help);
    }
    out
}
