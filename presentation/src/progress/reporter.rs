//! Progress reporting for council queries

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an overall bar plus one spinner per provider
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
    fan_out_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
            fan_out_bar: Mutex::new(None),
        }
    }

    fn fan_out_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn finish_provider(&self, name: &str, message: String) {
        if let Ok(mut bars) = self.bars.lock()
            && let Some(bar) = bars.remove(name)
        {
            bar.finish_with_message(message);
        }
        if let Ok(guard) = self.fan_out_bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            bar.inc(1);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_fan_out_start(&self, total: usize) {
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::fan_out_style());
        pb.set_prefix("Asking the council");
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.fan_out_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_provider_start(&self, name: &str) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix(name.to_string());
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(name.to_string(), spinner);
        }
    }

    fn on_provider_success(&self, name: &str, latency_ms: f64) {
        self.finish_provider(name, format!("{} {:.0}ms", "v".green(), latency_ms));
    }

    fn on_provider_failure(&self, name: &str, error: &str) {
        self.finish_provider(name, format!("{} {}", "x".red(), error));
    }

    fn on_fan_out_complete(&self, succeeded: usize, failed: usize) {
        if let Ok(mut guard) = self.fan_out_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(format!(
                "{} ({} ok, {} failed)",
                "done".green(),
                succeeded,
                failed
            ));
        }
    }

    fn on_synthesis_start(&self) {
        let _ = self.multi.println(format!("{} Synthesizing consensus...", "->".cyan()));
    }
}

/// Simple line-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_fan_out_start(&self, total: usize) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            "Asking the council".bold(),
            total
        );
    }

    fn on_provider_skipped(&self, name: &str) {
        eprintln!("  {} {} (skipped)", "-".dimmed(), name);
    }

    fn on_provider_success(&self, name: &str, latency_ms: f64) {
        eprintln!("  {} {} ({:.0}ms)", "v".green(), name, latency_ms);
    }

    fn on_provider_failure(&self, name: &str, error: &str) {
        eprintln!("  {} {} (failed: {})", "x".red(), name, error);
    }

    fn on_fan_out_complete(&self, succeeded: usize, failed: usize) {
        eprintln!("  {} ok, {} failed\n", succeeded, failed);
    }

    fn on_synthesis_start(&self) {
        eprintln!("{} {}", "->".cyan(), "Synthesizing consensus".bold());
    }
}
