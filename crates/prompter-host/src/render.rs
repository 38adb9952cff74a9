//! Text renderer: prints the frame description whenever it changes

use std::io::Write;

use prompter_runtime::RenderView;

/// Format a render view as one status line
pub fn describe(view: &RenderView<'_>) -> String {
    let layer = |path: Option<&std::path::Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_owned())
    };
    format!(
        "bg={} fg={} | {}",
        layer(view.background),
        layer(view.foreground),
        view.directive.unwrap_or("-")
    )
}

/// Writes a line per distinct frame
pub struct TextRenderer<W: Write> {
    out: W,
    last: Option<String>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer { out, last: None }
    }

    /// Draw the view if it differs from the last one drawn
    pub fn draw(&mut self, view: &RenderView<'_>) -> std::io::Result<bool> {
        let line = describe(view);
        if self.last.as_deref() == Some(line.as_str()) {
            return Ok(false);
        }
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        self.last = Some(line);
        Ok(true)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_draws_only_changes() {
        let mut renderer = TextRenderer::new(Vec::new());
        let empty = RenderView {
            background: None,
            foreground: None,
            directive: Some("Is anyone there?"),
        };
        let bound = RenderView {
            background: Some(Path::new("sea.mov")),
            foreground: None,
            directive: None,
        };

        assert!(renderer.draw(&empty).unwrap());
        assert!(!renderer.draw(&empty).unwrap());
        assert!(renderer.draw(&bound).unwrap());

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "bg=- fg=- | Is anyone there?\nbg=sea.mov fg=- | -\n");
    }
}
