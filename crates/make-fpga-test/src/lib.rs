#![cfg_attr(not(test), allow(dead_code, unused_imports))]

use std::{fmt::Display, fs::File, io::BufReader, path::Path};

use make_fpga::{
    resolve,
    syntax::{Delay, GenericAssignment, RunRecord, SdfMapping},
    Error, Project, ProjectOptions,
};
use runspec_parse::Parser;
use serde::Deserialize;

#[derive(Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum RunSpecExpect {
    Pass,
    Fail,
}

impl Display for RunSpecExpect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunSpecExpect::Pass => f.write_str("Pass"),
            RunSpecExpect::Fail => f.write_str("Fail"),
        }
    }
}

#[derive(Deserialize)]
struct RunSpecCase {
    name: String,
    spec: String,
    expect: RunSpecExpect,
    run: Option<RunRecord>,
    error: Option<String>,
}

fn strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|tok| tok.to_string()).collect()
}

#[test]
fn runspec_cases() {
    let path = Path::new("runspec-cases.json");
    let file = File::open(path).expect("missing file runspec-cases.json");
    let reader = BufReader::new(file);
    let cases: Vec<RunSpecCase> =
        serde_json::from_reader(reader).expect("failed to parse runspec-cases.json");

    for case in cases {
        println!("case `{}`: expect {}", case.name, case.expect);
        let res = Parser::parse_run(&case.spec);
        match case.expect {
            RunSpecExpect::Pass => {
                let run = res
                    .inspect_err(|err| eprintln!("{err}"))
                    .expect("parse error");
                if let Some(expected) = &case.run {
                    assert_eq!(&run, expected, "case `{}`", case.name);
                }
                let reparsed = Parser::parse_run(&run.to_string()).expect("canonical form");
                assert_eq!(run, reparsed, "round trip of case `{}`", case.name);
            }
            RunSpecExpect::Fail => {
                let err = res.expect_err(&format!("case `{}` should fail", case.name));
                if let Some(expected) = &case.error {
                    assert_eq!(&err.error().to_string(), expected, "case `{}`", case.name);
                }
            }
        }
    }
}

#[test]
fn sources_in_compile_order() {
    let sources = resolve([["a.vhd", "b.vhd=libA", "c.vhd"]], "work");
    let pairs = sources
        .entries()
        .iter()
        .map(|e| (e.library.as_str(), e.path.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        [("libA", "a.vhd"), ("libA", "b.vhd"), ("work", "c.vhd")]
    );
    let display = sources.entries().iter().map(|e| e.to_string()).collect::<Vec<_>>();
    assert_eq!(display, ["a.vhd=libA", "b.vhd=libA", "c.vhd=work"]);
}

#[test]
fn project_from_options() {
    let options = ProjectOptions {
        src: vec![
            strings(&["pkg.vhd=", "lib_a"]),
            strings(&["dut.vhd", "tb.vhd"]),
        ],
        run: vec![strings(&["tb", "slow:tb,n=2;max:/tb/dut=dut.sdf"])],
        gen: vec![strings(&["msg=hello world"])],
        sdf: vec![strings(&["typ:/tb/dut=dut.sdf"])],
        lib: vec![strings(&["unisim"]), strings(&["xpm"])],
        ..Default::default()
    };
    let project = Project::new(&options)
        .inspect_err(|err| eprintln!("{err}"))
        .expect("project error");

    assert_eq!(project.work, "work");
    assert_eq!(
        project.sources.libraries().names().collect::<Vec<_>>(),
        ["lib_a", "work"]
    );
    assert_eq!(project.sources.libraries().get("work").unwrap(), ["dut.vhd", "tb.vhd"]);
    assert_eq!(project.runs.len(), 2);
    assert_eq!(project.runs[0], RunRecord::new("tb"));
    assert_eq!(
        project.runs[1],
        RunRecord::new("tb")
            .with_name("slow")
            .with_generic(GenericAssignment::new("n", "2"))
            .with_sdf(SdfMapping::new(Delay::Max, "/tb/dut", "dut.sdf"))
    );
    assert_eq!(project.generics[0].value, "\"hello world\"");
    assert_eq!(project.sdf[0].delay, Delay::Typ);
    assert_eq!(project.vendor_libraries, ["unisim", "xpm"]);
}

#[test]
fn project_rejects_empty_library() {
    let options = ProjectOptions {
        src: vec![strings(&["=lib_a", "a.vhd"])],
        ..Default::default()
    };
    let err = Project::new(&options).expect_err("empty library should fail");
    assert_eq!(*err.error, Error::EmptyLibrary("lib_a".to_string()));
    assert_eq!(err.flag.as_deref(), Some("src"));
}

#[test]
fn project_reports_bad_run() {
    let options = ProjectOptions {
        src: vec![strings(&["tb.vhd"])],
        run: vec![strings(&["ok:tb", "x;bad:/a=b"])],
        ..Default::default()
    };
    let err = Project::new(&options).expect_err("bad delay should fail");
    assert_eq!(err.flag.as_deref(), Some("run"));
    assert_eq!(err.source.as_deref(), Some("x;bad:/a=b"));
    assert_eq!(err.span.as_ref().map(|s| s.range()), Some(2..5));
    let rendered = err.to_string();
    assert!(rendered.contains("bad SDF delay spec in run spec: bad"));
    assert!(rendered.contains("--run"));
}

#[test]
fn project_json() {
    let options = ProjectOptions {
        src: vec![strings(&["a.vhd", "b.vhd=lib"])],
        run: vec![strings(&["r:top;min:/top/u=u.sdf"])],
        ..Default::default()
    };
    let project = Project::new(&options).expect("project error");
    let json = serde_json::to_value(&project).expect("serialization error");
    assert_eq!(json["vhdl"], "2008");
    assert_eq!(json["sources"]["libraries"]["lib"][1], "b.vhd");
    assert_eq!(json["sources"]["entries"][0]["library"], "lib");
    assert_eq!(json["runs"][0]["sdf"][0]["delay"], "min");
}
