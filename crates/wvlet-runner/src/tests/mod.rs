//! Crate-level integration and BDD tests.

use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::compiler::{CompilerOptions, WvletCompiler};
use crate::error::CompilerError;
use crate::invocation::CompileInvocation;
use crate::launcher::{ProcessLauncher, ProcessOutput};
use crate::resolver::ExecutableResolver;

mod behaviour;

/// Resolver that reports a fixed location, or nothing.
struct StubResolver {
    found: Option<PathBuf>,
}

impl ExecutableResolver for StubResolver {
    fn resolve(&self, _program: &Path) -> Option<PathBuf> {
        self.found.clone()
    }
}

/// Output a [`ScriptedLauncher`] replays, plus the argument vectors it saw.
struct Script {
    output: ProcessOutput,
    calls: Vec<Vec<OsString>>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            output: ProcessOutput::new(Some(0), "", ""),
            calls: Vec::new(),
        }
    }
}

/// Launcher that records invocations and replays a shared script.
#[derive(Clone, Default)]
struct ScriptedLauncher {
    script: Rc<RefCell<Script>>,
}

impl ProcessLauncher for ScriptedLauncher {
    fn launch(&self, invocation: &CompileInvocation) -> Result<ProcessOutput, CompilerError> {
        let mut script = self.script.borrow_mut();
        script.calls.push(invocation.argv());
        Ok(script.output.clone())
    }
}

#[test]
fn end_to_end_binding_with_stubs() {
    let launcher = ScriptedLauncher::default();
    launcher.script.borrow_mut().output =
        ProcessOutput::new(Some(0), "wvlet compiler\nselect * from t", "");
    let resolver = StubResolver {
        found: Some(PathBuf::from("/usr/bin/wvlet")),
    };

    let compiler = WvletCompiler::with_collaborators(
        CompilerOptions::new().with_target("duckdb"),
        &resolver,
        launcher.clone(),
    )
    .expect("construct compiler");
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let result = compiler
        .compile_with_streams("from t", &mut stdout, &mut stderr)
        .expect("compile");

    assert_eq!(result, "select * from t");
    assert_eq!(
        String::from_utf8_lossy(&stdout),
        "wvlet compiler\nselect * from t"
    );
    assert_eq!(
        launcher.script.borrow().calls,
        vec![vec![
            OsString::from("/usr/bin/wvlet"),
            OsString::from("compile"),
            OsString::from("--target:duckdb"),
            OsString::from("from t"),
        ]]
    );
}
