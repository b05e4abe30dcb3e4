use crate::areas::cache::CacheKey;
use crate::areas::session::Session;
use crate::artifacts::core::hashing::ContentHash;
use crate::artifacts::render::file_view::FileDiffView;
use std::path::Path;

impl Session {
    pub fn diff(&self, old: &Path, new: &Path) -> anyhow::Result<()> {
        let old_text = self.read_file(old)?;
        let new_text = self.read_file(new)?;

        let key = CacheKey::for_diff(
            &new.display().to_string(),
            &ContentHash::of_text(&old_text).to_string(),
            &ContentHash::of_text(&new_text).to_string(),
            self.config(),
        );
        let view = self
            .cache()
            .get_or_try_insert_with(key, || {
                FileDiffView::diff(&old_text, &new_text, self.config())
            })?;

        self.print_view(
            &format!("diff a/{} b/{}", old.display(), new.display()),
            &view,
        )
    }
}
