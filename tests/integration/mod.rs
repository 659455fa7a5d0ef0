// Integration test utilities and common code
// WHY: every integration test needs a scratch directory with a corpus and word lists

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding an input text and dictionary files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Write a text file relative to the fixture root
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write a word list, one word per line
    pub fn create_dictionary(&self, name: &str, words: &[&str]) -> PathBuf {
        let mut content = words.join("\n");
        content.push('\n');
        self.create_file(name, &content)
    }

    /// Path inside the fixture that is never created
    pub fn missing(&self, name: &str) -> PathBuf {
        self.root_path.join(name)
    }
}

/// A few transliterated lines in the EVA style
pub const SAMPLE_TEXT: &str = "fachys.ykal.ar.ataiin.shol.shory
cthres-y.kor.sholdy {et} in
sory.ckhar.or.y.kair.chtaiin

dair.y.chear.cthaiin.cphar.cfhaiin";

pub const LATIN_WORDS: &[&str] = &["et", "in", "or", "ars", "rosa", "aqua"];

pub const MALAY_WORDS: &[&str] = &["air", "dia", "kira", "ya"];
