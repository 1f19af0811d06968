//! Behaviour-driven tests for the compiler binding.

use std::path::PathBuf;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::compiler::{CompilerOptions, WvletCompiler};
use crate::error::CompilerError;
use crate::launcher::ProcessOutput;

use super::{ScriptedLauncher, StubResolver};

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    installed: Option<PathBuf>,
    options: CompilerOptions,
    launcher: ScriptedLauncher,
    compiler: Option<Result<WvletCompiler<ScriptedLauncher>, CompilerError>>,
    result: Option<Result<String, CompilerError>>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strips the Gherkin quotes and expands `\n` escapes.
fn text(value: &str) -> String {
    value.trim_matches('"').replace("\\n", "\n")
}

fn construct(world: &mut TestWorld) {
    let resolver = StubResolver {
        found: world.installed.clone(),
    };
    world.compiler = Some(WvletCompiler::with_collaborators(
        world.options.clone(),
        &resolver,
        world.launcher.clone(),
    ));
}

fn constructed(world: &TestWorld) -> &WvletCompiler<ScriptedLauncher> {
    world
        .compiler
        .as_ref()
        .expect("binding not constructed")
        .as_ref()
        .expect("expected construction to succeed")
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("wvlet is installed at {path}")]
fn given_installed(world: &mut TestWorld, path: String) {
    world.installed = Some(PathBuf::from(text(&path)));
}

#[given("wvlet is not installed")]
fn given_not_installed(world: &mut TestWorld) {
    world.installed = None;
}

#[given("the target {target} is configured")]
fn given_target(world: &mut TestWorld, target: String) {
    world.options = world.options.clone().with_target(text(&target));
}

#[given("the compiler prints {stdout} and exits with status {status}")]
fn given_compiler_output(world: &mut TestWorld, stdout: String, status: i32) {
    let mut script = world.launcher.script.borrow_mut();
    let stderr = script.output.stderr().to_owned();
    script.output = ProcessOutput::new(Some(status), text(&stdout), stderr);
}

#[given("the compiler writes {stderr} to stderr")]
fn given_compiler_stderr(world: &mut TestWorld, stderr: String) {
    let mut script = world.launcher.script.borrow_mut();
    let status = script.output.status();
    let stdout = script.output.stdout().to_owned();
    script.output = ProcessOutput::new(status, stdout, text(&stderr));
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the binding is constructed without an executable")]
fn when_constructed_by_default(world: &mut TestWorld) {
    construct(world);
}

#[when("the binding is constructed with executable {path}")]
fn when_constructed_with_executable(world: &mut TestWorld, path: String) {
    world.options = world.options.clone().with_executable(text(&path));
    construct(world);
}

#[when("the query {query} is compiled")]
fn when_compiled(world: &mut TestWorld, query: String) {
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let result = constructed(world).compile_with_streams(&text(&query), &mut stdout, &mut stderr);
    world.stdout = stdout;
    world.stderr = stderr;
    world.result = Some(result);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("construction succeeds with executable {path}")]
fn then_constructed(world: &mut TestWorld, path: String) {
    let compiler = constructed(world);
    assert_eq!(compiler.executable(), PathBuf::from(text(&path)));
}

#[then("construction fails with {error_kind}")]
fn then_construction_fails(world: &mut TestWorld, error_kind: String) {
    let Some(Err(err)) = world.compiler.as_ref() else {
        panic!("expected construction to fail");
    };
    let kind = error_kind.trim_matches('"');
    match kind {
        "missing_dependency" => assert!(
            matches!(err, CompilerError::MissingDependency { .. }),
            "expected MissingDependency, got: {err}"
        ),
        "invalid_executable" => assert!(
            matches!(err, CompilerError::InvalidExecutable { .. }),
            "expected InvalidExecutable, got: {err}"
        ),
        other => panic!(
            "unsupported error kind: '{other}' (supported: missing_dependency, invalid_executable)"
        ),
    }
}

#[then("the result is {expected}")]
fn then_result(world: &mut TestWorld, expected: String) {
    let result = world
        .result
        .as_ref()
        .expect("no result captured")
        .as_ref()
        .expect("expected compilation to succeed");
    assert_eq!(result, &text(&expected));
}

#[then("compilation fails with status {status}")]
fn then_compilation_fails(world: &mut TestWorld, status: i32) {
    let err = world
        .result
        .as_ref()
        .expect("no result captured")
        .as_ref()
        .expect_err("expected compilation to fail");
    assert!(
        matches!(err, CompilerError::CompilationFailed { status: Some(code) } if *code == status),
        "expected CompilationFailed with status {status}, got: {err}"
    );
}

#[then("the relayed stdout is {expected}")]
fn then_relayed_stdout(world: &mut TestWorld, expected: String) {
    assert_eq!(String::from_utf8_lossy(&world.stdout), text(&expected));
}

#[then("the relayed stderr is {expected}")]
fn then_relayed_stderr(world: &mut TestWorld, expected: String) {
    assert_eq!(String::from_utf8_lossy(&world.stderr), text(&expected));
}

#[then("the invocation arguments are {arguments}")]
fn then_invocation_arguments(world: &mut TestWorld, arguments: String) {
    let joined = text(&arguments);
    let expected: Vec<&str> = joined.split('|').collect();
    let script = world.launcher.script.borrow();
    let argv = script.calls.last().expect("no invocation recorded");
    assert_eq!(argv, &expected);
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/compiler_binding.feature")]
fn compiler_binding_behaviour(world: TestWorld) {
    let _ = world;
}
