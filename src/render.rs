//! Line classifier for the generated Markdown subset.
//!
//! Summaries come back as a small, flat Markdown dialect: headings, bullets,
//! blank lines, paragraphs. Classification is strictly line-oriented. Each
//! line is judged on its own, with no nesting, emphasis, links, or tables,
//! and produces render instructions any front-end can consume. Keeping the
//! classifier free of presentation makes it testable without a terminal.

/// One render instruction for a line of summary content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderLine {
    /// `#`-prefixed line; `level` counts the leading `#` characters.
    Heading { level: u8, text: String },
    /// `*` or `-` prefixed line.
    Bullet { text: String },
    /// Whitespace-only line.
    Blank,
    /// Anything else.
    Paragraph { text: String },
}

/// Classify every line of `content`, in order.
pub fn classify(content: &str) -> Vec<RenderLine> {
    content.lines().map(classify_line).collect()
}

fn classify_line(line: &str) -> RenderLine {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return RenderLine::Blank;
    }

    if let Some(rest) = trimmed.strip_prefix('#') {
        let extra = rest.chars().take_while(|&c| c == '#').count();
        let level = (1 + extra).min(u8::MAX as usize) as u8;
        let text = rest[extra..].trim_start().to_string();
        return RenderLine::Heading { level, text };
    }

    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        return RenderLine::Bullet {
            text: rest.trim_start().to_string(),
        };
    }
    // A lone marker with no following space still reads as a bullet.
    if trimmed == "*" || trimmed == "-" {
        return RenderLine::Bullet {
            text: String::new(),
        };
    }

    RenderLine::Paragraph {
        text: trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_line_independently() {
        let content = "# Overview\n\nFirst paragraph.\n* one\n- two\n## Key Terms";
        let lines = classify(content);
        assert_eq!(
            lines,
            vec![
                RenderLine::Heading {
                    level: 1,
                    text: "Overview".into()
                },
                RenderLine::Blank,
                RenderLine::Paragraph {
                    text: "First paragraph.".into()
                },
                RenderLine::Bullet { text: "one".into() },
                RenderLine::Bullet { text: "two".into() },
                RenderLine::Heading {
                    level: 2,
                    text: "Key Terms".into()
                },
            ]
        );
    }

    #[test]
    fn heading_levels_count_hashes() {
        assert_eq!(
            classify("### deep"),
            vec![RenderLine::Heading {
                level: 3,
                text: "deep".into()
            }]
        );
    }

    #[test]
    fn whitespace_only_lines_are_blank() {
        assert_eq!(classify("   \t"), vec![RenderLine::Blank]);
    }

    #[test]
    fn no_nesting_or_emphasis_is_interpreted() {
        // Indented bullets and inline emphasis stay literal; flat subset only.
        let lines = classify("  * indented\nsome **bold** text");
        assert_eq!(
            lines,
            vec![
                RenderLine::Bullet {
                    text: "indented".into()
                },
                RenderLine::Paragraph {
                    text: "some **bold** text".into()
                },
            ]
        );
    }

    #[test]
    fn empty_content_renders_nothing() {
        assert!(classify("").is_empty());
    }
}
