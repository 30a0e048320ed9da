
use clap::ValueEnum;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// A compiler phase. Execution runs up to and including the selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Phase {
    #[value(help = "Phase 1: Scans for tokens and prints them.")]
    Tokens,
    #[value(help = "Phase 2: Parses the stream of tokens to check for syntax errors.")]
    Parse,
    #[value(help = "Phase 3: Creates an abstract syntax tree from the input tokens and prints it.")]
    Absyn,
    #[value(help = "Phase 4a: Builds a symbol table and prints its entries.")]
    Tables,
    #[value(help = "Phase 4b: Performs the semantic analysis.")]
    Semant,
    #[value(
        help = "Phase 5: Allocates memory space for variables and prints the amount of allocated memory."
    )]
    Vars,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Tokens => "1",
            Phase::Parse => "2",
            Phase::Absyn => "3",
            Phase::Tables => "4a",
            Phase::Semant => "4b",
            Phase::Vars => "5",
        }
    }
}

/// An optional language extension or optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Feature {
    #[value(name = "doWhile", help = "Enable the do-while statement.")]
    DoWhile,
    #[value(
        name = "bool",
        help = "Enable boolean variables and logical operators & and |."
    )]
    FirstClassBoolean,
    #[value(
        name = "scopes",
        help = "Enable the declaration of variables inside of compound statements."
    )]
    NestedScopes,
    #[value(
        name = "ershov",
        help = "Enable register optimization using the ershov number."
    )]
    Ershov,
    #[value(name = "leafProc", help = "Enable the optimization of leaf procedures.")]
    LeafProcedures,
    #[value(name = "records", help = "Enable support for records.")]
    Records,
    #[value(name = "valueSemantics", help = "Enable value semantics.")]
    ValueSemantics,
    #[value(name = "compoundLiterals", help = "Enable array and record literals.")]
    CompoundLiterals,
}

impl Feature {
    /// Another feature that has to be enabled alongside this one.
    pub fn requires(self) -> Option<Feature> {
        match self {
            Feature::CompoundLiterals => Some(Feature::ValueSemantics),
            _ => None,
        }
    }
}

macro_rules! impl_display_as_value_name {
    ($($ty: ty),*) => {$(
        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.to_possible_value() {
                    Some(value) => f.write_str(value.get_name()),
                    None => write!(f, "{self:?}"),
                }
            }
        }
    )*};
}

impl_display_as_value_name!(Phase, Feature);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureToggles {
    pub ershov: bool,
    pub do_while: bool,
    pub first_class_boolean: bool,
    pub nested_scopes: bool,
    pub leaf_procedures: bool,
    pub records: bool,
    pub value_semantics: bool,
    pub compound_literals: bool,
}

impl FeatureToggles {
    fn flag_mut(&mut self, feature: Feature) -> &mut bool {
        match feature {
            Feature::DoWhile => &mut self.do_while,
            Feature::FirstClassBoolean => &mut self.first_class_boolean,
            Feature::NestedScopes => &mut self.nested_scopes,
            Feature::Ershov => &mut self.ershov,
            Feature::LeafProcedures => &mut self.leaf_procedures,
            Feature::Records => &mut self.records,
            Feature::ValueSemantics => &mut self.value_semantics,
            Feature::CompoundLiterals => &mut self.compound_literals,
        }
    }

    pub fn enable(&mut self, feature: Feature) {
        *self.flag_mut(feature) = true;
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::DoWhile => self.do_while,
            Feature::FirstClassBoolean => self.first_class_boolean,
            Feature::NestedScopes => self.nested_scopes,
            Feature::Ershov => self.ershov,
            Feature::LeafProcedures => self.leaf_procedures,
            Feature::Records => self.records,
            Feature::ValueSemantics => self.value_semantics,
            Feature::CompoundLiterals => self.compound_literals,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::value_variants()
            .iter()
            .copied()
            .filter(|&feature| self.is_enabled(feature))
    }

    /// First enabled feature whose dependency is disabled, with that dependency.
    pub fn unmet_requirement(&self) -> Option<(Feature, Feature)> {
        self.enabled().find_map(|feature| {
            feature
                .requires()
                .filter(|&required| !self.is_enabled(required))
                .map(|required| (feature, required))
        })
    }
}

/// Holds at most one phase, a second selection is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseSelector(Option<Phase>);

impl PhaseSelector {
    /// Returns the already selected phase as the error.
    pub fn select(&mut self, phase: Phase) -> Result<(), Phase> {
        match self.0 {
            Some(selected) => Err(selected),
            None => {
                self.0 = Some(phase);
                Ok(())
            }
        }
    }

    pub fn get(self) -> Option<Phase> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) phase: PhaseSelector,
    pub(crate) features: FeatureToggles,
    pub(crate) input: PathBuf,
    pub(crate) output: Option<PathBuf>,
    pub(crate) verbose: bool,
}

impl Configuration {
    /// `None` when every phase runs.
    pub fn phase(&self) -> Option<Phase> {
        self.phase.get()
    }

    pub fn features(&self) -> &FeatureToggles {
        &self.features
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn runs(&self, phase: Phase) -> bool {
        self.phase().is_none_or(|last| phase <= last)
    }

    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        Phase::value_variants()
            .iter()
            .copied()
            .filter(|&phase| self.runs(phase))
    }
}
