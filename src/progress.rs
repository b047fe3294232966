use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Status output on stderr while inputs are compiled and parsed
pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            spinner_position: AtomicUsize::new(0),
            current_bar: None,
        }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(&["◐", "◓", "◑", "◒", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_discovery(&mut self) {
        let _ = self.term.clear_line();
        eprintln!("{} Collecting RTL dumps...", style("🔍").cyan());
        self.current_bar = Some(self.create_spinner("Scanning inputs..."));
    }

    pub fn finish_discovery(&mut self, count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if count == 0 {
            eprintln!("\r{} No dumps found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Found {} module{}",
                style("✓").green(),
                style(count).yellow().bold(),
                if count == 1 { "" } else { "s" }
            );
        }
    }

    pub fn compiling(&self, path: &Path) {
        self.status("Compiling", &path.display().to_string());
    }

    pub fn parsing_module(&self, name: &str) {
        self.status("Parsing", name);
    }

    pub fn status(&self, action: &str, subject: &str) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("{action}: {subject}..."));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} {action}: {}... ",
                style(self.next_frame()).cyan(),
                style(subject).dim()
            );
        }
    }

    pub fn finish_parsing(&self) {
        let _ = self.term.clear_line();
        eprint!("\r");
    }
}
