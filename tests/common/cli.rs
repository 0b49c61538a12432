use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::ExitStatus;
use tempfile::TempDir;

/// Env vars that would leak the caller's configuration into a run.
const SCRUBBED_ENV: &[&str] = &[
    "STEPTREE_NOT_FAILING",
    "STEPTREE_JSON",
    "STEPTREE_CONFIG",
];

#[derive(Debug)]
pub struct StepTreeRun {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl StepTreeRun {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Temporary working directory that doubles as `HOME`, so no user config
/// is picked up. Each run leaves a transcript under `logs/`.
pub struct Workspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
    log_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            _temp_dir: temp_dir,
            root,
            log_dir,
        }
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write workspace file");
        path
    }
}

pub fn run_steptree<I, S>(workspace: &Workspace, args: I, label: &str) -> StepTreeRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_steptree_with_env(workspace, args, std::iter::empty::<(&str, &str)>(), label)
}

pub fn run_steptree_with_env<I, S, E, K, V>(
    workspace: &Workspace,
    args: I,
    env_vars: E,
    label: &str,
) -> StepTreeRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("steptree"));
    cmd.current_dir(&workspace.root);
    for key in SCRUBBED_ENV {
        cmd.env_remove(key);
    }
    cmd.args(args)
        .envs(env_vars)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "steptree=debug")
        .env("HOME", &workspace.root);

    let output = cmd.output().expect("run steptree");
    let run = StepTreeRun {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status,
    };

    let transcript = format!(
        "label: {label}\nstatus: {}\nargs: {:?}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        run.status,
        cmd.get_args().collect::<Vec<_>>(),
        run.stdout,
        run.stderr
    );
    fs::write(workspace.log_dir.join(format!("{label}.log")), transcript).expect("write log");

    run
}
