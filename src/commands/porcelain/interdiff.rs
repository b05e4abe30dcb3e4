use crate::areas::cache::CacheKey;
use crate::areas::session::Session;
use crate::artifacts::core::hashing::ContentHash;
use crate::artifacts::render::file_view::FileDiffView;
use std::path::Path;

impl Session {
    /// Show what changed between two revisions made against `original`
    pub fn interdiff(&self, original: &Path, old: &Path, new: &Path) -> anyhow::Result<()> {
        let original_text = self.read_file(original)?;
        let old_text = self.read_file(old)?;
        let new_text = self.read_file(new)?;

        let key = CacheKey::for_interdiff(
            &new.display().to_string(),
            &ContentHash::of_text(&original_text).to_string(),
            &ContentHash::of_text(&old_text).to_string(),
            &ContentHash::of_text(&new_text).to_string(),
            self.config(),
        );
        let view = self.cache().get_or_try_insert_with(key, || {
            FileDiffView::interdiff(&original_text, &old_text, &new_text, self.config())
        })?;

        self.print_view(
            &format!(
                "interdiff {} a/{} b/{}",
                original.display(),
                old.display(),
                new.display()
            ),
            &view,
        )
    }
}
