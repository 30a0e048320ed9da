#![cfg(test)]

use super::*;
use std::path::Path;

fn parse_config(args: &[&str]) -> Configuration {
    match parse(args) {
        Ok(Invocation::Run(config)) => config,
        other => panic!("Expected a configuration for {args:?}, got {other:?}"),
    }
}

fn parse_error(args: &[&str]) -> UsageError {
    match parse(args) {
        Err(e) => e,
        Ok(invocation) => panic!("Expected a usage error for {args:?}, got {invocation:?}"),
    }
}

#[test]
fn parse_phase_and_input() {
    let config = parse_config(&["--tokens", "foo.spl"]);
    assert_eq!(config.phase(), Some(Phase::Tokens));
    assert_eq!(config.input(), Path::new("foo.spl"));
    assert_eq!(config.output(), None);
    assert_eq!(config.features(), &FeatureToggles::default());
    assert!(!config.verbose());
}

#[test]
fn parse_without_phase_runs_everything() {
    let config = parse_config(&["foo.spl", "foo.s"]);
    assert_eq!(config.phase(), None);
    assert_eq!(config.input(), Path::new("foo.spl"));
    assert_eq!(config.output(), Some(Path::new("foo.s")));
}

#[test]
fn parse_every_phase_flag() {
    for (flag, phase) in [
        ("--tokens", Phase::Tokens),
        ("--parse", Phase::Parse),
        ("--absyn", Phase::Absyn),
        ("--tables", Phase::Tables),
        ("--semant", Phase::Semant),
        ("--vars", Phase::Vars),
    ] {
        assert_eq!(parse_config(&[flag, "foo.spl"]).phase(), Some(phase));
    }
}

#[test]
fn parse_duplicate_phase() {
    let e = parse_error(&["--tokens", "--parse", "foo.spl"]);
    assert_eq!(e.kind(), UsageErrorKind::DuplicatePhaseOption);
    assert_eq!(e.to_string(), "More than one phase option specified.");

    let e = parse_error(&["--vars", "foo.spl", "--vars"]);
    assert_eq!(e.kind(), UsageErrorKind::DuplicatePhaseOption);
}

#[test]
fn parse_feature_flags() {
    let config = parse_config(&[
        "--ershov",
        "--doWhile",
        "--bool",
        "--scopes",
        "--leafProc",
        "--records",
        "--valueSemantics",
        "--compoundLiterals",
        "foo.spl",
    ]);
    let features = config.features();
    assert!(features.ershov);
    assert!(features.do_while);
    assert!(features.first_class_boolean);
    assert!(features.nested_scopes);
    assert!(features.leaf_procedures);
    assert!(features.records);
    assert!(features.value_semantics);
    assert!(features.compound_literals);
}

#[test]
fn parse_feature_flags_are_idempotent() {
    let config = parse_config(&["--bool", "foo.spl", "--bool"]);
    assert_eq!(
        config.features().enabled().collect::<Vec<_>>(),
        [Feature::FirstClassBoolean]
    );
}

#[test]
fn parse_flags_are_case_sensitive() {
    let e = parse_error(&["--dowhile", "foo.spl"]);
    assert_eq!(
        e,
        UsageError::UnknownOption {
            name: String::from("--dowhile")
        }
    );
}

#[test]
fn parse_compound_literals_without_value_semantics() {
    let e = parse_error(&["--compoundLiterals", "foo.spl"]);
    assert_eq!(e.kind(), UsageErrorKind::IntegrityViolation);
    assert_eq!(
        e,
        UsageError::IntegrityViolation {
            feature: Feature::CompoundLiterals,
            requires: Feature::ValueSemantics,
        }
    );
    assert_eq!(
        e.to_string(),
        "--compoundLiterals requires --valueSemantics to be set"
    );
}

#[test]
fn parse_compound_literals_with_value_semantics() {
    let config = parse_config(&["--compoundLiterals", "--valueSemantics", "foo.spl"]);
    assert!(config.features().compound_literals);
    assert!(config.features().value_semantics);
}

#[test]
fn parse_missing_input_is_checked_before_integrity() {
    let e = parse_error(&["--compoundLiterals"]);
    assert_eq!(e.kind(), UsageErrorKind::MissingInputFile);
}

#[test]
fn parse_too_many_positionals() {
    let e = parse_error(&["foo.spl", "bar.out", "baz.extra"]);
    assert_eq!(e.kind(), UsageErrorKind::TooManyPositionals);
    assert_eq!(e.to_string(), "Too many positional arguments!");
}

#[test]
fn parse_no_arguments() {
    let e = parse_error(&[]);
    assert_eq!(e.kind(), UsageErrorKind::MissingInputFile);
    assert_eq!(e.to_string(), "No input file!");

    let e = parse_error(&["--records", "--absyn"]);
    assert_eq!(e.kind(), UsageErrorKind::MissingInputFile);
}

#[test]
fn parse_unknown_option() {
    let e = parse_error(&["--foo", "foo.spl"]);
    assert_eq!(e.kind(), UsageErrorKind::UnknownOption);
    assert_eq!(e.to_string(), "Unknown option '--foo'!");

    let e = parse_error(&["foo.spl", "--"]);
    assert_eq!(
        e,
        UsageError::UnknownOption {
            name: String::from("--")
        }
    );
}

#[test]
fn parse_single_dash_is_positional() {
    let config = parse_config(&["-", "-o"]);
    assert_eq!(config.input(), Path::new("-"));
    assert_eq!(config.output(), Some(Path::new("-o")));
}

#[test]
fn parse_help() {
    assert_eq!(parse(["--help"]), Ok(Invocation::Help));
}

#[test]
fn parse_help_skips_validation() {
    assert_eq!(parse(["--compoundLiterals", "--help"]), Ok(Invocation::Help));
    assert_eq!(parse(["a", "b", "--help", "c"]), Ok(Invocation::Help));
    assert_eq!(parse(["--help", "--tokens", "--tokens"]), Ok(Invocation::Help));
    assert_eq!(parse(["--help", "--foo"]), Ok(Invocation::Help));
}

#[test]
fn parse_errors_before_help_win() {
    let e = parse_error(&["--foo", "--help"]);
    assert_eq!(e.kind(), UsageErrorKind::UnknownOption);

    let e = parse_error(&["--tables", "--semant", "--help"]);
    assert_eq!(e.kind(), UsageErrorKind::DuplicatePhaseOption);

    let e = parse_error(&["a", "b", "c", "--help"]);
    assert_eq!(e.kind(), UsageErrorKind::TooManyPositionals);
}

#[test]
fn parse_empty_positional_leaves_slot_empty() {
    let config = parse_config(&["a", "", "b"]);
    assert_eq!(config.input(), Path::new("a"));
    assert_eq!(config.output(), Some(Path::new("b")));

    let config = parse_config(&["", "a"]);
    assert_eq!(config.input(), Path::new("a"));
    assert_eq!(config.output(), None);

    let e = parse_error(&[""]);
    assert_eq!(e.kind(), UsageErrorKind::MissingInputFile);
}

#[test]
fn parse_verbose() {
    let config = parse_config(&["--verbose", "foo.spl", "--verbose"]);
    assert!(config.verbose());
}

#[cfg(unix)]
#[test]
fn parse_non_utf8_arguments() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let input = OsStr::from_bytes(b"f\xffo.spl");
    let config = match parse([input]) {
        Ok(Invocation::Run(config)) => config,
        other => panic!("Expected a configuration, got {other:?}"),
    };
    assert_eq!(config.input().as_os_str(), input);

    let flag = OsStr::from_bytes(b"--f\xffo");
    let e = parse([flag, OsStr::new("foo.spl")]).unwrap_err();
    assert_eq!(e.kind(), UsageErrorKind::UnknownOption);
}

#[test]
fn usage_lists_every_flag_in_order() {
    let text = usage();
    assert!(text.starts_with("Usage: spl [OPTION] INPUT_FILE [OUTPUT_FILE]\n\n"));
    assert!(text.ends_with("  --help              Show this help.\n"));
    assert!(text.contains("  --tokens            Phase 1: Scans for tokens and prints them.\n"));
    assert!(text.contains("  --compoundLiterals  Enable array and record literals.\n"));

    let flags: Vec<_> = text
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix("--"))
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(
        flags,
        [
            "tokens",
            "parse",
            "absyn",
            "tables",
            "semant",
            "vars",
            "doWhile",
            "bool",
            "scopes",
            "ershov",
            "leafProc",
            "records",
            "valueSemantics",
            "compoundLiterals",
            "verbose",
            "help"
        ]
    );
}

#[test]
fn usage_flags_are_all_recognized() {
    for line in usage().lines() {
        let Some(flag) = line.trim_start().strip_prefix("--") else {
            continue;
        };
        let name = flag.split_whitespace().next().unwrap_or_default();
        assert!(Arg::flag(name).is_some(), "{name} is not recognized");
    }
}
