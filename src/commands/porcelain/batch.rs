use crate::areas::batch::{BatchOutcome, FilePair, diff_batch};
use crate::areas::session::Session;
use crate::artifacts::core::error::DiffError;
use anyhow::Context;
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

const LABEL_WIDTH: usize = 9;

/// Paths of every regular file under `root`, relative to it
fn list_files(root: &Path) -> anyhow::Result<BTreeSet<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("The specified path is not a directory: {:?}", root);
    }

    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .with_context(|| {
                    format!("{} is outside {}", entry.path().display(), root.display())
                })
        })
        .collect()
}

impl Session {
    /// Diff every file present in either tree and print one line per file
    pub async fn batch(&self, old_root: &Path, new_root: &Path) -> anyhow::Result<()> {
        let old_files = list_files(old_root)?;
        let new_files = list_files(new_root)?;

        let pairs: Vec<FilePair> = old_files
            .union(&new_files)
            .map(|file| self.read_pair(file, (old_root, &old_files), (new_root, &new_files)))
            .collect();

        let outcomes = diff_batch(pairs, self.config().clone(), self.cache()).await;

        let mut failed = 0;
        for outcome in &outcomes {
            if !self.print_outcome(outcome, &old_files, &new_files)? {
                failed += 1;
            }
        }

        if failed > 0 {
            anyhow::bail!("{} of {} files could not be diffed", failed, outcomes.len());
        }

        Ok(())
    }

    fn read_pair(
        &self,
        file: &Path,
        (old_root, old_files): (&Path, &BTreeSet<PathBuf>),
        (new_root, new_files): (&Path, &BTreeSet<PathBuf>),
    ) -> FilePair {
        let name = file.display().to_string();
        let read = |root: &Path, files: &BTreeSet<PathBuf>| {
            files
                .contains(file)
                .then(|| self.read_file(&root.join(file)))
                .transpose()
        };

        match (read(old_root, old_files), read(new_root, new_files)) {
            (Ok(old_text), Ok(new_text)) => FilePair::new(name, old_text, new_text),
            (Err(e), _) | (_, Err(e)) => {
                warn!(file = %name, error = %e, "could not read file");
                let error = e
                    .downcast::<DiffError>()
                    .unwrap_or_else(|e| DiffError::malformed(format!("{:#}", e)));
                FilePair::unreadable(name, error)
            }
        }
    }

    fn print_outcome(
        &self,
        outcome: &BatchOutcome,
        old_files: &BTreeSet<PathBuf>,
        new_files: &BTreeSet<PathBuf>,
    ) -> anyhow::Result<bool> {
        let view = match &outcome.result {
            Ok(view) => view,
            Err(e) => {
                writeln!(
                    self.writer(),
                    "{:<w$} {}  {}",
                    "failed".red().bold(),
                    outcome.file,
                    e,
                    w = LABEL_WIDTH
                )?;
                return Ok(false);
            }
        };

        let path = Path::new(&outcome.file);
        let label = match (old_files.contains(path), new_files.contains(path)) {
            (false, _) => "added".green(),
            (_, false) => "deleted".red(),
            _ if view.stats().changed() > 0 => "modified".yellow(),
            _ => "unchanged".normal(),
        };

        writeln!(
            self.writer(),
            "{:<w$} {}  {}",
            label,
            outcome.file,
            view.stats(),
            w = LABEL_WIDTH
        )?;

        Ok(true)
    }
}
