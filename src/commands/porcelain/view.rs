use crate::areas::session::Session;
use crate::artifacts::render::file_view::FileDiffView;
use crate::artifacts::render::render_chunk::{ChunkFlags, ChunkKind, RenderChunk, RenderRow};
use colored::{ColoredString, Colorize};
use std::ops::Range;

const NUMBER_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Paint `content`, emphasising the changed byte ranges
fn highlight(content: &str, spans: &[Range<usize>], side: Side) -> String {
    let paint = |text: &str| -> ColoredString {
        match side {
            Side::Left => text.red(),
            Side::Right => text.green(),
        }
    };
    let emphasise = |text: &str| -> ColoredString {
        match side {
            Side::Left => text.red().on_bright_black().bold(),
            Side::Right => text.green().on_bright_black().bold(),
        }
    };

    let mut out = String::new();
    let mut cursor = 0;
    for span in spans {
        match (content.get(cursor..span.start), content.get(span.clone())) {
            (Some(before), Some(changed)) => {
                out.push_str(&paint(before).to_string());
                out.push_str(&emphasise(changed).to_string());
                cursor = span.end;
            }
            _ => return paint(content).to_string(),
        }
    }
    out.push_str(&paint(content.get(cursor..).unwrap_or_default()).to_string());

    out
}

impl Session {
    pub(crate) fn print_view(&self, header: &str, view: &FileDiffView) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", header.bold())?;
        writeln!(self.writer(), "{}", view.stats().to_string().dimmed())?;

        for chunk in view.render().chunks() {
            self.print_chunk(chunk)?;
        }

        Ok(())
    }

    fn print_chunk(&self, chunk: &RenderChunk) -> anyhow::Result<()> {
        if let Some(hidden) = &chunk.collapsed {
            writeln!(
                self.writer(),
                "{}",
                format!(
                    "@@ {} unchanged lines hidden ({}-{}) @@",
                    hidden.len(),
                    hidden.start,
                    hidden.end - 1
                )
                .cyan()
            )?;
            return Ok(());
        }

        for row in &chunk.rows {
            self.print_row(chunk, row)?;
        }

        Ok(())
    }

    fn print_row(&self, chunk: &RenderChunk, row: &RenderRow) -> anyhow::Result<()> {
        let previously_changed = chunk.flags.contains(ChunkFlags::PREVIOUSLY_CHANGED);

        if let (Some(left), Some(right)) = (&row.left, &row.right)
            && left.content == right.content
            && !chunk.kind.is_change()
        {
            let marker = match (chunk.kind, previously_changed) {
                (ChunkKind::ReplaceEqual, _) => '=',
                (_, true) => '~',
                _ => ' ',
            };
            writeln!(
                self.writer(),
                "{} {:>w$} {:>w$} | {}",
                marker,
                left.number(),
                right.number(),
                left.content,
                w = NUMBER_WIDTH
            )?;
            return Ok(());
        }

        let (left_marker, right_marker) = if previously_changed {
            ('~', '~')
        } else {
            ('-', '+')
        };

        if let Some(left) = &row.left {
            let spans = row.spans.as_ref().map(|s| s.a_spans.as_slice()).unwrap_or_default();
            writeln!(
                self.writer(),
                "{} {:>w$} {:>w$} | {}",
                left_marker.to_string().red(),
                left.number(),
                "",
                highlight(&left.content, spans, Side::Left),
                w = NUMBER_WIDTH
            )?;
        }
        if let Some(right) = &row.right {
            let spans = row.spans.as_ref().map(|s| s.b_spans.as_slice()).unwrap_or_default();
            writeln!(
                self.writer(),
                "{} {:>w$} {:>w$} | {}",
                right_marker.to_string().green(),
                "",
                right.number(),
                highlight(&right.content, spans, Side::Right),
                w = NUMBER_WIDTH
            )?;
        }

        Ok(())
    }
}
