//! Run command implementation.
//!
//! Spawns a child process with piped output, streams its lines into a live
//! panel, and prints a summary once the panel has been cleared.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, ExitCode, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{DateTime, Local};
use parking_lot::Mutex;

use crate::cli::{CliResult, RunCommand};
use crate::config::field::split_assignment;
use crate::config::{resolve_panel_config, ConfigField, TransientPanelConfig};
use crate::panel::{PanelRenderer, StdoutRenderer, TaskRunner};
use crate::style::{
    get_theme, key_value_panel, theme_names, KeyValuePanelOptions, PanelLine, Theme,
    THEME_STYLE_SECTION, THEME_STYLE_SUCCESS, THEME_STYLE_WARNING,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What happened to the child process.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Exit status reported by the OS.
    pub status: ExitStatus,
    /// Output lines read from stdout and stderr.
    pub lines: usize,
    /// Wall time from spawn to exit.
    pub duration: Duration,
    /// Whether the child was killed by Ctrl+C.
    pub interrupted: bool,
    /// When the child exited.
    pub finished_at: DateTime<Local>,
}

impl RunOutcome {
    /// Exit code for tpanel itself, mirroring the child.
    pub fn exit_code(&self) -> u8 {
        if let Some(code) = self.status.code() {
            return u8::try_from(code).unwrap_or(1);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = self.status.signal() {
                return u8::try_from(128 + signal).unwrap_or(1);
            }
        }
        1
    }

    fn describe_status(&self) -> String {
        if let Some(code) = self.status.code() {
            return code.to_string();
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = self.status.signal() {
                return format!("killed by signal {signal}");
            }
        }
        "unknown".to_string()
    }
}

/// Build the panel config from the file, preset, `--set` and flag overrides.
pub fn build_config(cmd: &RunCommand) -> anyhow::Result<TransientPanelConfig> {
    let mut base = match &cmd.config {
        Some(path) => TransientPanelConfig::load(path)
            .with_context(|| format!("Cannot use {}", path.display()))?,
        None => TransientPanelConfig::preset(cmd.preset),
    };
    for assignment in &cmd.set {
        let (key, value) = split_assignment(assignment)?;
        base.set_field(key, value)?;
    }
    Ok(resolve_panel_config(cmd.preset, Some(&base), &cmd.overrides())?)
}

/// Format an elapsed time as `4.2s` or `3m 07s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Render the lines printed after the panel closes.
pub fn report(outcome: &RunOutcome, command_line: &str, theme: &Theme) -> String {
    let duration = format_elapsed(outcome.duration);
    let headline = if outcome.interrupted {
        theme
            .resolve(THEME_STYLE_WARNING)
            .paint(format!("✗ {command_line} interrupted after {duration}"))
    } else if outcome.status.success() {
        theme
            .resolve(THEME_STYLE_SUCCESS)
            .paint(format!("✓ {command_line} finished in {duration}"))
    } else {
        theme.resolve(THEME_STYLE_WARNING).paint(format!(
            "✗ {command_line} failed with exit status {}",
            outcome.describe_status()
        ))
    };

    let lines = [
        PanelLine::pair("command", command_line),
        PanelLine::pair("exit status", outcome.describe_status()),
        PanelLine::pair("duration", duration),
        PanelLine::pair("lines captured", outcome.lines.to_string()),
        PanelLine::pair(
            "finished at",
            outcome.finished_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
    ];
    let options = KeyValuePanelOptions {
        title: Some("Summary".to_string()),
        border_style: theme.resolve(THEME_STYLE_SECTION),
        ..Default::default()
    };
    format!("{headline}\n{}", key_value_panel(&lines, &options))
}

/// Execute the run command.
pub fn run(cmd: &RunCommand) -> CliResult {
    let config = build_config(cmd)?;
    let command_line = cmd.command_line();
    let title = cmd.title.clone().unwrap_or_else(|| command_line.clone());

    if !theme_names().any(|name| name == cmd.theme) {
        tracing::warn!(theme = %cmd.theme, "unknown theme, using default");
    }
    let theme = get_theme(&cmd.theme);

    let (program, args) = cmd.command.split_first().context("No command given")?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start {program}"))?;
    let started = Instant::now();
    tracing::debug!(command = %command_line, pid = child.id(), "child started");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let child = Arc::new(Mutex::new(child));
    let interrupted = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(Arc::clone(&child), Arc::clone(&interrupted));

    let streams = Streams { stdout, stderr };
    let renderer = StdoutRenderer::detect(&config);
    tracing::debug!(interactive = renderer.is_interactive(), "panel renderer chosen");
    let panel = TaskRunner::new(&title, config, renderer)?.hold_panic_reports(true);
    let (status, lines) = supervise(panel, &child, streams, started)?;

    let outcome = RunOutcome {
        status,
        lines,
        duration: started.elapsed(),
        interrupted: interrupted.load(Ordering::SeqCst),
        finished_at: Local::now(),
    };
    tracing::debug!(status = %outcome.describe_status(), lines, "child finished");

    println!("{}", report(&outcome, &command_line, theme));
    Ok(ExitCode::from(outcome.exit_code()))
}

struct Streams {
    stdout: Option<std::process::ChildStdout>,
    stderr: Option<std::process::ChildStderr>,
}

fn install_interrupt_handler(child: Arc<Mutex<Child>>, interrupted: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
        if let Err(e) = child.lock().kill() {
            tracing::debug!(error = %e, "kill after interrupt failed");
        }
    });
    if let Err(e) = result {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }
}

/// Stream the child's output into the panel until it exits.
///
/// Returns the exit status and the number of lines read.
fn supervise<R: PanelRenderer>(
    panel: TaskRunner<R>,
    child: &Mutex<Child>,
    streams: Streams,
    started: Instant,
) -> anyhow::Result<(ExitStatus, usize)> {
    let captured = AtomicUsize::new(0);
    let panel = &panel;
    let counter = &captured;

    let status = panel
        .run_task(move || {
            thread::scope(|scope| {
                if let Some(out) = streams.stdout {
                    scope.spawn(move || pump(out, panel, counter));
                }
                if let Some(err) = streams.stderr {
                    scope.spawn(move || pump(err, panel, counter));
                }
                wait_for_exit(child, panel, started)
            })
        })?
        .context("Failed to wait for child process")?;

    Ok((status, captured.load(Ordering::SeqCst)))
}

fn pump<R: PanelRenderer>(stream: impl Read, panel: &TaskRunner<R>, captured: &AtomicUsize) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                panel.append(last_rewrite(&text));
                captured.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                tracing::debug!(error = %e, "output stream closed");
                break;
            }
        }
    }
}

/// The part of a line still visible after carriage-return rewrites.
///
/// Colour sequences are kept for the renderer.
fn last_rewrite(text: &str) -> String {
    let text = text.trim_end_matches(['\n', '\r']);
    text.rsplit('\r').next().unwrap_or(text).to_string()
}

fn wait_for_exit<R: PanelRenderer>(
    child: &Mutex<Child>,
    panel: &TaskRunner<R>,
    started: Instant,
) -> io::Result<ExitStatus> {
    let prefix = panel.config().default_status.clone();
    loop {
        if let Some(status) = child.lock().try_wait()? {
            return Ok(status);
        }
        panel.set_status(format!("{prefix} ({})", format_elapsed(started.elapsed())));
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::config::PanelPreset;
    use crate::panel::NullRenderer;
    use crate::style::strip_ansi;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse_run(args: &[&str]) -> RunCommand {
        let mut argv = vec!["tpanel", "run"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Commands::Run(run)) => run,
            other => panic!("expected run command, got {other:?}"),
        }
    }

    fn exited(code: i32) -> ExitStatus {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(code << 8)
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(code as u32)
        }
    }

    fn outcome(code: i32) -> RunOutcome {
        RunOutcome {
            status: exited(code),
            lines: 42,
            duration: Duration::from_millis(4200),
            interrupted: false,
            finished_at: Local::now(),
        }
    }

    #[test]
    fn test_build_config_applies_flags_over_sets() {
        let run = parse_run(&[
            "--preset",
            "streaming",
            "--set",
            "display_lines=5",
            "--set",
            "border_style=bold red",
            "--max-lines",
            "50",
            "--",
            "true",
        ]);
        let config = build_config(&run).unwrap();
        assert_eq!(config.max_lines, 50);
        assert_eq!(config.display_lines, 5);
        assert_eq!(config.border_style, "bold red");
    }

    #[test]
    fn test_build_config_rejects_display_above_max() {
        let run = parse_run(&["--display-lines", "30", "--max-lines", "20", "--", "true"]);
        let err = build_config(&run).unwrap_err();
        assert_eq!(
            err.to_string(),
            "display_lines (30) must not exceed max_lines (20)"
        );
    }

    #[test]
    fn test_build_config_rejects_bad_assignment() {
        let run = parse_run(&["--set", "colour=red", "--", "true"]);
        assert!(build_config(&run)
            .unwrap_err()
            .to_string()
            .contains("Unknown config key: colour"));
    }

    #[test]
    fn test_build_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_lines = 40\ndisplay_lines = 8").unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let run = parse_run(&["--config", &path, "--", "true"]);
        let config = build_config(&run).unwrap();
        assert_eq!((config.max_lines, config.display_lines), (40, 8));
        assert_eq!(run.preset, PanelPreset::Default);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(4200)), "4.2s");
        assert_eq!(format_elapsed(Duration::from_secs(187)), "3m 07s");
    }

    #[test]
    fn test_exit_code_mirrors_child() {
        assert_eq!(outcome(0).exit_code(), 0);
        assert_eq!(outcome(3).exit_code(), 3);
    }

    #[test]
    fn test_report_success() {
        let text = strip_ansi(&report(&outcome(0), "make test", get_theme("default")));
        assert!(text.starts_with("✓ make test finished in 4.2s"));
        assert!(text.contains("command: make test"));
        assert!(text.contains("exit status: 0"));
        assert!(text.contains("lines captured: 42"));
        assert!(text.contains("finished at:"));
        assert!(text.contains("Summary"));
    }

    #[test]
    fn test_report_failure_and_interrupt() {
        let text = strip_ansi(&report(&outcome(2), "make", get_theme("mono")));
        assert!(text.starts_with("✗ make failed with exit status 2"));

        let mut stopped = outcome(1);
        stopped.interrupted = true;
        let text = strip_ansi(&report(&stopped, "make", get_theme("mono")));
        assert!(text.starts_with("✗ make interrupted after 4.2s"));
    }

    #[cfg(unix)]
    #[test]
    fn test_supervise_captures_both_streams() {
        let mut child = Command::new("sh")
            .args(["-c", "echo one; echo two >&2; printf '\\033[32mthree\\033[0m\\n'"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let streams = Streams {
            stdout: child.stdout.take(),
            stderr: child.stderr.take(),
        };
        let child = Mutex::new(child);
        let panel =
            TaskRunner::new("sh", TransientPanelConfig::default(), NullRenderer).unwrap();
        let (status, lines) = supervise(panel, &child, streams, Instant::now()).unwrap();
        assert!(status.success());
        assert_eq!(lines, 3);
    }

    #[test]
    fn test_pump_keeps_colours_and_last_rewrite() {
        let panel =
            TaskRunner::new("pump", TransientPanelConfig::default(), NullRenderer).unwrap();
        let counter = AtomicUsize::new(0);
        let output: &[u8] = b"\x1b[31mfail\x1b[0m\r\n10%\r50%\r100%\n";
        pump(output, &panel, &counter);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(
            panel.state().retained_lines(),
            vec!["\x1b[31mfail\x1b[0m".to_string(), "100%".to_string()]
        );
    }

    #[test]
    fn test_last_rewrite() {
        assert_eq!(last_rewrite("plain\n"), "plain");
        assert_eq!(last_rewrite("a\rb\rc\r\n"), "c");
        assert_eq!(last_rewrite("\x1b[1mbold\x1b[0m"), "\x1b[1mbold\x1b[0m");
    }
}
