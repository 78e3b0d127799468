use colored::Colorize;
use mudz_common::DiagnosticCategory;
use mudz_lsp::LocatedDiagnostic;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Render every diagnostic of one file, separated by blank lines.
    pub fn render(&self, source: &str, diagnostics: &[LocatedDiagnostic]) -> String {
        let mut out = String::new();
        for (index, located) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(source, located));
            out.push('\n');
        }
        out
    }

    /// `file:line:col - error: message`, then the offending line with the
    /// span underlined.
    pub fn format_diagnostic(&self, source: &str, located: &LocatedDiagnostic) -> String {
        let diagnostic = &located.diagnostic;
        let start = located.range.start;
        let location = format!(
            "{}:{}:{}",
            diagnostic.file,
            start.line + 1,
            start.character + 1
        );
        let location = if self.color {
            location.cyan().to_string()
        } else {
            location
        };

        let mut output = format!(
            "{} - {}: {}",
            location,
            self.format_category(diagnostic.category),
            diagnostic.message_text
        );
        if let Some(snippet) = self.format_snippet(source, located) {
            output.push_str(&snippet);
        }
        output
    }

    fn format_snippet(&self, source: &str, located: &LocatedDiagnostic) -> Option<String> {
        let start = located.range.start;
        let end = located.range.end;
        let line_text = source.lines().nth(start.line as usize)?;

        // Zero-width sentinels still get one marker.
        let width = if end.line == start.line {
            end.character.saturating_sub(start.character).max(1)
        } else {
            (line_text.chars().count() as u32)
                .saturating_sub(start.character)
                .max(1)
        };

        let mut underline = String::new();
        for ch in line_text.chars().take(start.character as usize) {
            underline.push(if ch == '\t' { '\t' } else { ' ' });
        }
        underline.push_str(&"~".repeat(width as usize));

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!(
            "\n  {:>3}   {}\n        {}",
            start.line + 1,
            line_text,
            underline
        ))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.to_string();
        if !self.color {
            return label;
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }
}
