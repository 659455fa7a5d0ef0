// WHY: matching stays pure; everything user-visible goes through a sink so the
// same run can print to a console or be captured by tests

use crate::error::AnalysisError;
use crate::inventory::CharacterInventory;
use crate::matcher::{MatchEvent, MatchKind};
use indicatif::{ProgressBar, ProgressStyle};

/// Consumer of everything an analysis run reports
pub trait ReportSink {
    /// The full character inventory, delivered once per run
    fn inventory(&mut self, inventory: &CharacterInventory);

    /// A matching pass over all lines is about to start
    fn pass_started(&mut self, _language: &str, _kind: MatchKind, _total_lines: usize) {}

    /// One more line of the current pass has been processed
    fn line_done(&mut self) {}

    fn matched(&mut self, event: &MatchEvent);

    fn pass_finished(&mut self, _language: &str, _kind: MatchKind, _matches: usize) {}

    /// A resource could not be loaded; the run continues without it
    fn resource_error(&mut self, error: &AnalysisError);
}

/// Sink that keeps everything in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub inventory: Option<CharacterInventory>,
    pub events: Vec<MatchEvent>,
    pub errors: Vec<String>,
    pub passes: Vec<(String, MatchKind, usize)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for CollectingSink {
    fn inventory(&mut self, inventory: &CharacterInventory) {
        self.inventory = Some(inventory.clone());
    }

    fn matched(&mut self, event: &MatchEvent) {
        self.events.push(event.clone());
    }

    fn pass_finished(&mut self, language: &str, kind: MatchKind, matches: usize) {
        self.passes.push((language.to_string(), kind, matches));
    }

    fn resource_error(&mut self, error: &AnalysisError) {
        self.errors.push(error.to_string());
    }
}

/// Human-readable console output
///
/// Results go to stdout, resource errors to stderr. Progress bars draw on
/// stderr and are suppressed when `show_progress` is false.
pub struct ConsoleReporter {
    show_progress: bool,
    progress: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            progress: None,
        }
    }

    /// Echo the input text before analysis
    pub fn print_raw_text(&self, lines: &[String]) {
        println!("\nRaw Text from File:");
        for line in lines {
            println!("{line}");
        }
    }

    fn with_progress_suspended(&self, f: impl FnOnce()) {
        match &self.progress {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

impl ReportSink for ConsoleReporter {
    fn inventory(&mut self, inventory: &CharacterInventory) {
        println!("\nUnique Characters Detected ({}):", inventory.len());
        println!("{inventory}");
    }

    fn pass_started(&mut self, language: &str, kind: MatchKind, total_lines: usize) {
        match kind {
            MatchKind::Exact => println!("\nAnalyzing words against {language} dictionary..."),
            MatchKind::Permutation => {
                println!("\nPerforming brute-force attack on words against {language} dictionary...")
            }
        }

        if self.show_progress {
            let bar = ProgressBar::new(total_lines as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} lines {msg}")
            {
                bar.set_style(style);
            }
            bar.set_message(format!("{kind} {language}"));
            self.progress = Some(bar);
        }
    }

    fn line_done(&mut self) {
        if let Some(bar) = &self.progress {
            bar.inc(1);
        }
    }

    fn matched(&mut self, event: &MatchEvent) {
        self.with_progress_suspended(|| println!("{event}"));
    }

    fn pass_finished(&mut self, language: &str, kind: MatchKind, matches: usize) {
        if let Some(bar) = self.progress.take() {
            bar.finish_and_clear();
        }
        println!("{matches} {kind} match(es) against {language}");
    }

    fn resource_error(&mut self, error: &AnalysisError) {
        self.with_progress_suspended(|| eprintln!("Error: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Resource;

    #[test]
    fn test_collecting_sink_records_everything() {
        let mut sink = CollectingSink::new();
        sink.inventory(&CharacterInventory::collect(["ab"]));
        sink.pass_started("latin", MatchKind::Exact, 1);
        sink.matched(&MatchEvent {
            source_token: "et".to_string(),
            matched_word: "et".to_string(),
            kind: MatchKind::Exact,
            language: "latin".to_string(),
            line: 1,
        });
        sink.line_done();
        sink.pass_finished("latin", MatchKind::Exact, 1);
        sink.resource_error(&AnalysisError::unavailable(
            Resource::Dictionary("malay".to_string()),
            "malay_dictionary.txt",
            "not found",
        ));

        assert_eq!(sink.inventory.map(|i| i.len()), Some(2));
        assert_eq!(sink.events.len(), 1);
        assert_eq!(sink.passes, vec![("latin".to_string(), MatchKind::Exact, 1)]);
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.errors[0].contains("malay"));
    }

    #[test]
    fn test_console_reporter_without_progress() {
        let mut reporter = ConsoleReporter::new(false);
        reporter.pass_started("latin", MatchKind::Permutation, 3);
        assert!(reporter.progress.is_none());
        reporter.line_done();
        reporter.pass_finished("latin", MatchKind::Permutation, 0);
    }
}
