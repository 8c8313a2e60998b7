//! The structured form of run specs, generic assignments and SDF mappings.
//!
//! All types are plain owned data: they are built once from command-line tokens and
//! then handed, read-only, to whatever emits the build files.

use derive_more::Display;

/// The name given to a run that doesn't name itself.
pub const DEFAULT_RUN_NAME: &str = "sim";

/// A generic (VHDL) or parameter (Verilog) bound to the top level design unit.
///
/// The value is stored the way it must be passed to a simulator: a value containing
/// whitespace is wrapped in double quotes, see [`quote_value`][crate::quote_value].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericAssignment {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Delay {
    #[display("typ")]
    Typ,
    #[display("min")]
    Min,
    #[display("max")]
    Max,
}

/// Annotates the instance at `path` with the timings in the SDF `file`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SdfMapping {
    pub delay: Delay,
    pub path: String,
    pub file: String,
}

/// One simulation run: `[name:]top[,gen=val...][;delay:path=file...]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    pub name: String,
    pub top: String,
    pub generics: Vec<GenericAssignment>,
    pub sdf: Vec<SdfMapping>,
}
