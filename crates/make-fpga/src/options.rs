use std::fmt::Display;

/// VHDL language reference manual revision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum VhdlStandard {
    #[cfg_attr(feature = "clap", value(name = "1987"))]
    #[cfg_attr(feature = "serde", serde(rename = "1987"))]
    Vhdl1987,
    #[cfg_attr(feature = "clap", value(name = "1993"))]
    #[cfg_attr(feature = "serde", serde(rename = "1993"))]
    Vhdl1993,
    #[cfg_attr(feature = "clap", value(name = "2002"))]
    #[cfg_attr(feature = "serde", serde(rename = "2002"))]
    Vhdl2002,
    #[default]
    #[cfg_attr(feature = "clap", value(name = "2008"))]
    #[cfg_attr(feature = "serde", serde(rename = "2008"))]
    Vhdl2008,
}

impl Display for VhdlStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VhdlStandard::Vhdl1987 => f.write_str("1987"),
            VhdlStandard::Vhdl1993 => f.write_str("1993"),
            VhdlStandard::Vhdl2002 => f.write_str("2002"),
            VhdlStandard::Vhdl2008 => f.write_str("2008"),
        }
    }
}

/// The raw command-line values a [`Project`][crate::Project] is built from.
///
/// Every `Vec<Vec<String>>` holds one inner list per occurrence of the flag.
#[derive(Clone, Debug)]
pub struct ProjectOptions {
    /// library for sources that don't name one.
    pub work: String,
    pub src: Vec<Vec<String>>,
    pub run: Vec<Vec<String>>,
    /// generics applied to all runs.
    pub gen: Vec<Vec<String>>,
    /// SDF mappings applied to all runs.
    pub sdf: Vec<Vec<String>>,
    /// precompiled vendor libraries.
    pub lib: Vec<Vec<String>>,
    pub vhdl: VhdlStandard,
}

pub const DEFAULT_WORK_LIBRARY: &str = "work";

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK_LIBRARY.to_string(),
            src: Default::default(),
            run: Default::default(),
            gen: Default::default(),
            sdf: Default::default(),
            lib: Default::default(),
            vhdl: Default::default(),
        }
    }
}
