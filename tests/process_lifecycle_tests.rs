// Process lifecycle tests - running the real binary over piped stdio
//
// Stdin is held open for the whole test so that exit has to come from the
// interrupt itself, not from end of input.

#![cfg(unix)]

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

// ============================================================================
// Test Process
// ============================================================================

struct ServerProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    reader: BufReader<ChildStdout>,
    _env_file: NamedTempFile,
}

impl ServerProcess {
    fn spawn() -> Self {
        let mut env_file = NamedTempFile::new().expect("env file");
        writeln!(env_file, "OPENWEBUI_API_URL=http://127.0.0.1:9").unwrap();
        writeln!(env_file, "OPENWEBUI_API_KEY=sk-test").unwrap();

        let mut child = Command::new(env!("CARGO_BIN_EXE_openwebui-mcp-server"))
            .arg("--quiet")
            .arg("--env-file")
            .arg(env_file.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn server binary");

        let stdin = child.stdin.take();
        let reader = BufReader::new(child.stdout.take().expect("stdout"));
        Self {
            child,
            stdin,
            reader,
            _env_file: env_file,
        }
    }

    fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
        let request = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        writeln!(stdin, "{request}").unwrap();
        stdin.flush().unwrap();

        let mut line = String::new();
        self.reader.read_line(&mut line).unwrap();
        serde_json::from_str(&line).expect("response is not JSON")
    }

    fn interrupt(&self) {
        let status = Command::new("kill")
            .args(["-INT", &self.child.id().to_string()])
            .status()
            .expect("failed to run kill");
        assert!(status.success());
    }

    fn wait_for_exit(&mut self, limit: Duration) -> Option<ExitStatus> {
        let started = Instant::now();
        while started.elapsed() < limit {
            if let Some(status) = self.child.try_wait().unwrap() {
                return Some(status);
            }
            thread::sleep(Duration::from_millis(50));
        }
        None
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// ============================================================================
// Shutdown
// ============================================================================

#[test]
fn interrupt_exits_zero_while_stdin_is_open() {
    let mut server = ServerProcess::spawn();
    // A reply proves the server loop, and with it the interrupt listener, is running.
    let response = server.request(1, "ping", json!({}));
    assert_eq!(response["result"], json!({}));

    server.interrupt();

    let status = server
        .wait_for_exit(Duration::from_secs(5))
        .expect("server kept running after SIGINT");
    assert!(status.success(), "unexpected exit status: {status:?}");
    assert!(server.stdin.is_some());
}

#[test]
fn closing_stdin_exits_zero() {
    let mut server = ServerProcess::spawn();
    let response = server.request(1, "tools/list", json!({}));
    assert_eq!(response["result"]["tools"].as_array().map(Vec::len), Some(2));

    drop(server.stdin.take());

    let status = server
        .wait_for_exit(Duration::from_secs(5))
        .expect("server kept running after end of input");
    assert!(status.success(), "unexpected exit status: {status:?}");
}
