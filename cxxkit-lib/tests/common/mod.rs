//! Helpers shared by the command integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use cxxkit_lib::Host;
use std::fs;

/// Test host that captures output to in-memory buffers and records the requested exit code.
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

impl TestHost {
    pub const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

/// `errno` for executing a file that is still open for writing.
#[cfg(unix)]
const ETXTBSY: i32 = 26;

/// Name of an executable that is never installed.
const MISSING_PROGRAM: &str = "cxxkit-test-no-such-tool-7d2e";

pub fn utf8_dir(temp: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
}

/// Write `contents` to `relative` below `root`, creating parent directories as needed.
pub fn write_file(root: &Utf8Path, relative: &str, contents: &str) -> Utf8PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

/// Write a cxxkit configuration file into `dir` and return its path.
pub fn write_config(dir: &Utf8Path, toml: &str) -> Utf8PathBuf {
    write_file(dir, "cxxkit-test.toml", toml)
}

/// Tool tables in which every tool is missing except the `(section, program)` pairs given.
///
/// Only tables are produced, so top-level settings must be placed before the result.
pub fn tools_config(present: &[(&str, &Utf8Path)]) -> String {
    ["cppcheck", "clang_tidy", "iwyu", "clang_format"]
        .iter()
        .map(|section| {
            let program = present
                .iter()
                .find(|(name, _)| name == section)
                .map_or(MISSING_PROGRAM, |(_, program)| program.as_str());
            format!("[{section}]\nprogram = \"{program}\"\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write an executable shell script standing in for an external tool.
///
/// The script answers `--version` with `version` and otherwise runs `body`. It is run once
/// before returning so a concurrently forked test process still holding the file open for
/// writing cannot make the first real use fail with "text file busy".
#[cfg(unix)]
pub fn write_fake_tool(dir: &Utf8Path, name: &str, version: &str, body: &str) -> Utf8PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = write_file(
        dir,
        name,
        &format!("#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then\n  echo \"{version}\"\n  exit 0\nfi\n{body}\n"),
    );
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

    for _ in 0..100 {
        match std::process::Command::new(&path).arg("--version").output() {
            Ok(_) => return path,
            Err(e) if e.raw_os_error() == Some(ETXTBSY) => std::thread::sleep(core::time::Duration::from_millis(10)),
            Err(e) => panic!("could not run fake tool '{path}': {e}"),
        }
    }

    panic!("fake tool '{path}' stayed busy");
}

/// Lines a fake tool appended to its call log, or nothing if it never ran.
#[cfg(unix)]
pub fn read_log(path: &Utf8Path) -> Vec<String> {
    fs::read_to_string(path).map(|text| text.lines().map(str::to_string).collect()).unwrap_or_default()
}
