mod common;

use common::test_provider;
use genrule_expand::{compile, compile_with_variables, ErrorKind, RuleDefinition, Variables};
use insta::assert_snapshot;

enum Expect {
    Command(&'static str),
    Error(ErrorKind, &'static str),
}

struct TestCase {
    name: &'static str,
    rule: RuleDefinition,
    expect: Expect,
}

fn gen(cmd: &str) -> RuleDefinition {
    RuleDefinition::new("gen", cmd)
}

fn cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "empty location tool",
            rule: gen("$(location) > $(out)").tool("tool").output("out"),
            expect: Expect::Command("out/tool > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "empty location tool file",
            rule: gen("$(location) > $(out)")
                .tool_file("tool_file1")
                .output("out"),
            expect: Expect::Command("tool_file1 > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "empty location tool file fg",
            rule: gen("$(location) > $(out)")
                .tool_file(":1tool_file")
                .output("out"),
            expect: Expect::Command("tool_file1 > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "empty location tool and tool file",
            rule: gen("$(location) > $(out)")
                .tool("tool")
                .tool_file("tool_file1")
                .output("out"),
            expect: Expect::Command("out/tool > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "tool",
            rule: gen("$(location tool) > $(out)").tool("tool").output("out"),
            expect: Expect::Command("out/tool > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "tool file",
            rule: gen("$(location tool_file1) > $(out)")
                .tool_file("tool_file1")
                .output("out"),
            expect: Expect::Command("tool_file1 > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "tool file fg",
            rule: gen("$(location tool_file1) > $(out)")
                .tool_file(":1tool_file")
                .output("out"),
            expect: Expect::Command("tool_file1 > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "tool files",
            rule: gen("$(location tool_file1) $(location tool_file2) > $(out)")
                .tool_file(":tool_files")
                .output("out"),
            expect: Expect::Command("tool_file1 tool_file2 > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "tool files joined",
            rule: gen("$(locations :tool_files) > $(out)")
                .tool_file(":tool_files")
                .output("out"),
            expect: Expect::Command("tool_file1 tool_file2 > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "in1",
            rule: gen("cat $(in) > $(out)").source("in1").output("out"),
            expect: Expect::Command("cat ${in} > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "in1 fg",
            rule: gen("cat $(in) > $(out)").source(":1in").output("out"),
            expect: Expect::Command("cat ${in} > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "ins",
            rule: gen("cat $(in) > $(out)")
                .source("in1")
                .source("in2")
                .output("out"),
            expect: Expect::Command("cat ${in} > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "ins fg",
            rule: gen("cat $(in) > $(out)").source(":ins").output("out"),
            expect: Expect::Command("cat ${in} > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "outs",
            rule: gen("echo foo > $(out)").outputs(vec!["out", "out2"]),
            expect: Expect::Command("echo foo > __SBOX_OUT_FILES__"),
        },
        TestCase {
            name: "depfile",
            rule: gen("echo foo > $(out) && touch $(depfile)")
                .output("out")
                .depfile(true),
            expect: Expect::Command("echo foo > __SBOX_OUT_FILES__ && touch __SBOX_DEPFILE__"),
        },
        TestCase {
            name: "gendir",
            rule: gen("echo foo > $(genDir)/foo && cp $(genDir)/foo $(out)").output("out"),
            expect: Expect::Command(
                "echo foo > __SBOX_OUT_DIR__/foo && cp __SBOX_OUT_DIR__/foo __SBOX_OUT_FILES__",
            ),
        },
        TestCase {
            name: "error empty location",
            rule: gen("$(location) > $(out)").output("out"),
            expect: Expect::Error(
                ErrorKind::MissingTool,
                "at least one `tools` or `tool_files` is required if $(location) is used",
            ),
        },
        TestCase {
            name: "error location",
            rule: gen("echo foo > $(location missing)").output("out"),
            expect: Expect::Error(ErrorKind::UnknownLabel, r#"unknown location label "missing""#),
        },
        TestCase {
            name: "error variable",
            rule: gen("echo $(foo) > $(out)").output("out").source("in1"),
            expect: Expect::Error(ErrorKind::UnknownVariable, "unknown variable '$(foo)'"),
        },
        TestCase {
            name: "error depfile",
            rule: gen("echo foo > $(out) && touch $(depfile)").output("out"),
            expect: Expect::Error(
                ErrorKind::DepfileMismatch,
                "$(depfile) used without depfile property",
            ),
        },
        TestCase {
            name: "error no depfile",
            rule: gen("echo foo > $(out)").output("out").depfile(true),
            expect: Expect::Error(
                ErrorKind::DepfileMismatch,
                "specified depfile=true but did not include a reference to '${depfile}' in cmd",
            ),
        },
        TestCase {
            name: "error no out",
            rule: gen("echo foo > $(out)"),
            expect: Expect::Error(ErrorKind::MissingOutput, "must have at least one output file"),
        },
        TestCase {
            name: "error group in single location",
            rule: gen("$(location :tool_files) > $(out)")
                .tool_file(":tool_files")
                .output("out"),
            expect: Expect::Error(
                ErrorKind::AmbiguousReference,
                "use $(locations :tool_files)",
            ),
        },
        TestCase {
            name: "error ambiguous empty location",
            rule: gen("$(location) > $(out)")
                .tool_file(":tool_files")
                .output("out"),
            expect: Expect::Error(ErrorKind::AmbiguousReference, "$(location) is ambiguous"),
        },
        TestCase {
            name: "error empty group",
            rule: gen("$(locations :empty) > $(out)")
                .source(":empty")
                .output("out"),
            expect: Expect::Error(ErrorKind::AmbiguousReference, r#"label ":empty" has no files"#),
        },
        TestCase {
            name: "error tool is a file",
            rule: gen("$(location) > $(out)").tool("in1").output("out"),
            expect: Expect::Error(ErrorKind::NotATool, "is not a host tool provider"),
        },
        TestCase {
            name: "error undeclared module",
            rule: gen("cat $(in) > $(out)").source(":nope").output("out"),
            expect: Expect::Error(
                ErrorKind::UnresolvedDependency,
                r#"unresolved dependency ":nope""#,
            ),
        },
        TestCase {
            name: "error syntax",
            rule: gen("cat $(in) > $(out").source("in1").output("out"),
            expect: Expect::Error(ErrorKind::Syntax, "missing )"),
        },
    ]
}

#[test]
fn test_genrule_cmd() {
    let provider = test_provider();
    for case in cases() {
        let result = compile(&case.rule, &provider);
        match (case.expect, result) {
            (Expect::Command(expected), Ok(command)) => {
                assert_eq!(
                    command.as_str(),
                    format!("'{}'", expected),
                    "case {:?}",
                    case.name
                );
            }
            (Expect::Error(kind, message), Err(err)) => {
                assert_eq!(err.kind(), kind, "case {:?}: {}", case.name, err);
                assert!(
                    err.to_string().contains(message),
                    "case {:?}: want {:?}, got {:?}",
                    case.name,
                    message,
                    err.to_string()
                );
            }
            (Expect::Command(expected), Err(err)) => {
                panic!("case {:?}: want {:?}, got error {}", case.name, expected, err)
            }
            (Expect::Error(_, message), Ok(command)) => panic!(
                "case {:?}: want error {:?}, got {}",
                case.name, message, command
            ),
        }
    }
}

#[test]
fn test_no_directives() {
    let rule = gen("make -j8 all").output("all");
    assert_snapshot!(compile(&rule, &test_provider()).unwrap().to_string(), @"'make -j8 all'");
}

#[test]
fn test_variables() {
    let rule = gen("$(cc) -c $(in) -o $(out) $(cflags)")
        .source("in1")
        .output("in1.o");
    let variables: Variables = vec![("cc", "clang"), ("cflags", "-O2 -Wall")]
        .into_iter()
        .collect();
    let command = compile_with_variables(&rule, &test_provider(), &variables).unwrap();
    assert_snapshot!(command.to_string(), @"'clang -c ${in} -o __SBOX_OUT_FILES__ -O2 -Wall'");
}

#[test]
fn test_depfile_token_from_variable() {
    let rule = gen("$(v) $(out)").output("out");
    let variables = Variables::new().with_binding("v", "__SBOX_DEPFILE__");
    let err = compile_with_variables(&rule, &test_provider(), &variables).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DepfileMismatch);
    assert_snapshot!(err.to_string(), @"$(depfile) used without depfile property");

    let literal = gen("touch __SBOX_DEPFILE__ $(out)").output("out");
    let err = compile(&literal, &test_provider()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DepfileMismatch);
}

#[test]
fn test_embedded_quotes() {
    let rule = gen("echo 'it works' > $(out)").output("out");
    let command = compile(&rule, &test_provider()).unwrap();
    assert_eq!(command.as_str(), r"'echo '\''it works'\'' > __SBOX_OUT_FILES__'");
}

#[test]
fn test_missing_output_checked_first() {
    // Both the outputs and the label are wrong; only the first problem is reported.
    let rule = gen("$(location missing)");
    let err = compile(&rule, &test_provider()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingOutput);
}

#[test]
fn test_idempotent() {
    let rule = gen("$(location tool) $(locations :ins) > $(out)")
        .tool("tool")
        .source(":ins")
        .output("out");
    let provider = test_provider();
    let first = compile(&rule, &provider).unwrap();
    let second = compile(&rule, &provider).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_str(), "'out/tool in1 in2 > __SBOX_OUT_FILES__'");
}
