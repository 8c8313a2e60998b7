//! Turn the source and simulation arguments of `make-fpga` into structured data.
//!
//! A [`Project`] holds everything the build-file writers need: sources in compile
//! order with their libraries, the library table, the simulation runs and the
//! generics and SDF mappings applied to all runs.
//!
//! ```rust
//! use make_fpga::{Project, ProjectOptions};
//!
//! let options = ProjectOptions {
//!     src: vec![vec!["pkg.vhd=lib_a".into(), "tb.vhd".into()]],
//!     run: vec![vec!["run1:tb,width=8".into()]],
//!     ..Default::default()
//! };
//! let project = Project::new(&options).unwrap();
//! assert_eq!(project.sources.entries()[1].library, "work");
//! assert_eq!(project.runs[0].generics[0].value, "8");
//! ```

mod error;
mod options;
mod sources;

pub use error::{Diagnostic, Error};
pub use options::{ProjectOptions, VhdlStandard, DEFAULT_WORK_LIBRARY};
pub use sources::{resolve, LibraryTable, SourceEntry, SourceResolver, Sources};

pub use runspec_parse::syntax;

use runspec_parse::{
    error::SpannedError,
    syntax::{GenericAssignment, RunRecord, SdfMapping},
    Parser,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Project {
    pub work: String,
    pub vhdl: VhdlStandard,
    pub sources: Sources,
    pub runs: Vec<RunRecord>,
    pub generics: Vec<GenericAssignment>,
    pub sdf: Vec<SdfMapping>,
    pub vendor_libraries: Vec<String>,
}

fn flatten(groups: &[Vec<String>]) -> impl Iterator<Item = &str> {
    groups.iter().flatten().map(String::as_str)
}

fn with_flag(flag: &'static str) -> impl Fn(SpannedError) -> Diagnostic<Error> {
    move |e| Diagnostic::from(e).with_flag(flag)
}

impl Project {
    /// Resolve sources and parse runs, generics and SDF mappings.
    ///
    /// Fails on the first malformed argument, or if a library ends up without
    /// sources.
    pub fn new(options: &ProjectOptions) -> Result<Self, Diagnostic<Error>> {
        let sources = resolve(&options.src, &options.work);
        if let Some(library) = sources.empty_libraries().next() {
            let error = Error::EmptyLibrary(library.to_string());
            return Err(Diagnostic::from(error).with_flag("src"));
        }

        let runs = Parser::parse_runs(flatten(&options.run)).map_err(with_flag("run"))?;
        let generics = Parser::parse_generics(flatten(&options.gen)).map_err(with_flag("gen"))?;
        let sdf = Parser::parse_sdf(flatten(&options.sdf)).map_err(with_flag("sdf"))?;
        let vendor_libraries = flatten(&options.lib).map(str::to_string).collect();

        log::debug!(
            "{} sources in {} libraries, {} runs",
            sources.entries().len(),
            sources.libraries().len(),
            runs.len()
        );

        Ok(Self {
            work: options.work.clone(),
            vhdl: options.vhdl,
            sources,
            runs,
            generics,
            sdf,
            vendor_libraries,
        })
    }
}
