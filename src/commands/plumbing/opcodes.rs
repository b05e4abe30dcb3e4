use crate::areas::session::Session;
use crate::artifacts::diff::opcode::replay;
use crate::artifacts::diff::sequence_matcher::diff_lines;
use crate::artifacts::lines::line::LineSet;
use std::path::Path;

impl Session {
    /// Print the raw opcode script turning `old` into `new`
    ///
    /// With `check`, the script is also replayed over `old` and the result
    /// compared byte for byte with `new`.
    pub fn opcodes(&self, old: &Path, new: &Path, check: bool) -> anyhow::Result<()> {
        let a = LineSet::tokenize(&self.read_file(old)?);
        let b = LineSet::tokenize(&self.read_file(new)?);

        let opcodes = diff_lines(&a, &b, self.config())?;
        for opcode in &opcodes {
            writeln!(self.writer(), "{}", opcode)?;
        }

        if check {
            if replay(&a, &b, &opcodes)? != b.to_text() {
                anyhow::bail!(
                    "Replaying the opcodes over {} did not produce {}",
                    old.display(),
                    new.display()
                );
            }
            writeln!(self.writer(), "replay ok")?;
        }

        Ok(())
    }
}
