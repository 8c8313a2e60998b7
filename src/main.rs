//! The command-line interface for `make-fpga`.
//!
//! Collects the source and simulation arguments, resolves and parses them, and prints
//! the result for the build-file writers.

use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use itertools::Itertools;
use make_fpga::{Project, ProjectOptions, VhdlStandard, DEFAULT_WORK_LIBRARY};

const RUN_HELP: &str = "\
A generic assignment is specified as follows:
  name=value
Examples:
  my_int=123
  my_str=\"abc\"
  my_slv=\"101\"

An SDF mapping is specified as follows:
  delay:path=file
where
  delay = typ, min or max
  path  = path to design unit e.g. /top/u1
  file  = path/name of SDF file

A simulation run is specified as follows:
  [name:]top[,gen][;sdf]
where
  name = unique run name (defaults to sim)
  top  = top design unit
  gen  = run specific generic assignments:
           name=value[,name=value...]
  sdf  = run specific SDF mappings:
           delay:path=file[;delay:path=file...]
Examples:
  run1:my_design1
  run2:my_design2,gen1=123,gen2=\"abc\"
  run3:my_design3,gen1=123,gen2=\"abc\";typ:/TOP/UNIT1=unit1.sdf
  run4:my_design4,gen1=123;typ:/TOP/U1=unit1.sdf;min:/TOP/U2=unit2.sdf
";

#[derive(Parser)]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// main command
    #[command(subcommand)]
    command: Command,
    /// more log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// check that all arguments parse and every library has sources
    #[command(after_help = RUN_HELP)]
    Check(CommonArgs),
    /// output sources, libraries, runs, generics and SDF mappings in canonical form
    #[command(after_help = RUN_HELP)]
    Dump(CommonArgs),
    /// output the resolved project as JSON
    #[command(after_help = RUN_HELP)]
    Json(CommonArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// work library
    #[arg(long, default_value = DEFAULT_WORK_LIBRARY)]
    work: String,
    /// source(s) in compile order (append =LIB to specify library name)
    #[arg(long, required = true, num_args = 1.., action = ArgAction::Append)]
    src: Vec<String>,
    /// simulation run specification(s) (see below)
    #[arg(long, num_args = 1.., action = ArgAction::Append)]
    run: Vec<String>,
    /// generic assignment(s) (applied to all runs)
    #[arg(long, num_args = 1.., action = ArgAction::Append)]
    gen: Vec<String>,
    /// SDF mapping(s) (applied to all runs)
    #[arg(long, num_args = 1.., action = ArgAction::Append)]
    sdf: Vec<String>,
    /// precompiled vendor libraries
    #[arg(long, num_args = 1.., action = ArgAction::Append)]
    lib: Vec<String>,
    /// VHDL LRM version
    #[arg(long, value_enum, default_value_t = VhdlStandard::Vhdl2008)]
    vhdl: VhdlStandard,
}

impl From<CommonArgs> for ProjectOptions {
    fn from(args: CommonArgs) -> Self {
        Self {
            work: args.work,
            src: vec![args.src],
            run: vec![args.run],
            gen: vec![args.gen],
            sdf: vec![args.sdf],
            lib: vec![args.lib],
            vhdl: args.vhdl,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Project(#[from] make_fpga::Diagnostic<make_fpga::Error>),
    #[error("failed to serialize the project: {0}")]
    Json(#[from] serde_json::Error),
}

fn log_level(cli: &Cli) -> log::LevelFilter {
    if cli.quiet {
        return log::LevelFilter::Error;
    }
    match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn dump(project: &Project) -> String {
    let mut lines = Vec::new();
    lines.push(format!("WORK: {}", project.work));
    lines.push(format!("VHDL: {}", project.vhdl));
    lines.push(format!("LIB: {}", project.sources.libraries().names().format(" ")));
    lines.extend(project.sources.entries().iter().map(|e| format!("SRC: {e}")));
    lines.extend(project.runs.iter().map(|r| format!("RUN: {r}")));
    lines.extend(project.generics.iter().map(|g| format!("GEN: {g}")));
    lines.extend(project.sdf.iter().map(|s| format!("SDF: {s}")));
    if !project.vendor_libraries.is_empty() {
        lines.push(format!("VENDOR: {}", project.vendor_libraries.iter().format(" ")));
    }
    lines.join("\n")
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Check(args) => {
            Project::new(&args.into())?;
            println!("OK");
        }
        Command::Dump(args) => {
            let project = Project::new(&args.into())?;
            println!("{}", dump(&project));
        }
        Command::Json(args) => {
            let project = Project::new(&args.into())?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
    };
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(&cli))
        .parse_default_env()
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(src: &[&str], run: &[&str]) -> ProjectOptions {
        ProjectOptions {
            src: vec![src.iter().map(|s| s.to_string()).collect()],
            run: vec![run.iter().map(|s| s.to_string()).collect()],
            ..Default::default()
        }
    }

    #[test]
    fn dump_lines() {
        let project = Project::new(&options(&["a.vhd", "b.vhd=lib"], &["r:tb,g=1"])).unwrap();
        let expected = "\
WORK: work
VHDL: 2008
LIB: lib
SRC: a.vhd=lib
SRC: b.vhd=lib
RUN: r:tb,g=1";
        assert_eq!(dump(&project), expected);
    }

    #[test]
    fn dump_globals_and_vendor_libraries() {
        let mut opts = options(&["a.vhd", "b.vhd"], &["tb;typ:/TOP/U1=a,b.sdf"]);
        opts.gen = vec![vec!["width=8".to_string()]];
        opts.sdf = vec![vec!["max:/TOP/U2=u2.sdf".to_string()]];
        opts.lib = vec![vec!["unisim".to_string(), "xpm".to_string()]];
        let project = Project::new(&opts).unwrap();
        let dumped = dump(&project);
        let lines = dumped.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                "WORK: work",
                "VHDL: 2008",
                "LIB: work",
                "SRC: a.vhd=work",
                "SRC: b.vhd=work",
                "RUN: sim:tb;typ:/TOP/U1=a,b.sdf",
                "GEN: width=8",
                "SDF: max:/TOP/U2=u2.sdf",
                "VENDOR: unisim xpm",
            ]
        );
    }

    #[test]
    fn repeated_flags_append() {
        let cli = Cli::try_parse_from([
            "make-fpga", "dump", "--src", "a.vhd", "b.vhd=lib", "--src", "c.vhd", "--run", "tb",
        ])
        .unwrap();
        let Command::Dump(args) = cli.command else {
            panic!("expected the dump command");
        };
        let opts = ProjectOptions::from(args);
        assert_eq!(opts.src, [["a.vhd", "b.vhd=lib", "c.vhd"]]);
        assert_eq!(opts.run, [["tb"]]);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        let cli = Cli::try_parse_from(["make-fpga", "-vv", "-q", "check", "--src", "a.vhd"]).unwrap();
        assert_eq!(log_level(&cli), log::LevelFilter::Error);
    }
}
