//! Text and JSON rendering of command results
//!
//! Command handlers build a payload and hand it to [`OutputWriter`]; the
//! `--output` flag decides whether it is printed as text or pretty JSON.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes command payloads in the selected output format.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write `payload` to a locked stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let mut out = std::io::stdout().lock();
        self.render_to(payload, &mut out)
    }

    /// Write `payload` to `w`. JSON output always ends with a newline.
    pub fn render_to<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Human-readable rendering; every payload also implements `Serialize` for `--output json`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct HitCount {
        url: String,
        hits: u32,
    }

    impl Render for HitCount {
        fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
            writeln!(w, "{:>6}  {}", self.hits, self.url)
        }
    }

    fn payload(url: &str) -> HitCount {
        HitCount {
            url: url.to_owned(),
            hits: 42,
        }
    }

    fn rendered(format: OutputFormat, payload: &HitCount) -> String {
        let mut buffer = Vec::new();
        OutputWriter::new(format)
            .render_to(payload, &mut buffer)
            .expect("rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn text_format_uses_render_impl() {
        let output = rendered(OutputFormat::Text, &payload("/posts/rust"));
        assert_eq!(output, "    42  /posts/rust\n");
    }

    #[test]
    fn json_format_is_pretty_and_newline_terminated() {
        let output = rendered(OutputFormat::Json, &payload("/posts/rust"));
        assert!(output.ends_with("}\n"));
        assert!(output.contains("\n  \"url\""), "pretty output is indented");

        let parsed: serde_json::Value = serde_json::from_str(&output).expect("should parse back");
        assert_eq!(parsed["url"], "/posts/rust");
        assert_eq!(parsed["hits"], 42);
    }

    #[test]
    fn non_ascii_urls_survive_both_formats() {
        let url = "/블로그/러스트 🦀";
        assert!(rendered(OutputFormat::Text, &payload(url)).contains(url));
        assert!(rendered(OutputFormat::Json, &payload(url)).contains(url));
    }
}
