//! Output assembly

/// Accumulates output lines into the final text
///
/// Every line is stored without its terminator and written back with exactly
/// one `\n`, whatever it ended with on input.
#[derive(Debug, Clone, Default)]
pub struct OutputAssembler {
    text: String,
    lines: usize,
}

impl OutputAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with room for about `bytes` of output
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            text: String::with_capacity(bytes),
            lines: 0,
        }
    }

    /// Append one line
    pub fn push_line(&mut self, line: &str) {
        self.text.push_str(line.trim_end_matches(['\r', '\n']));
        self.text.push('\n');
        self.lines += 1;
    }

    /// Append several lines in order
    pub fn push_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.push_line(line.as_ref());
        }
    }

    /// Number of lines appended so far
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Finished output text
    pub fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_terminator_per_line() {
        let mut out = OutputAssembler::new();
        out.push_line("G21\r\n");
        out.push_line("G0 Z5\n");
        out.push_line("M2");
        out.push_lines(["", "; end"]);
        assert_eq!(out.line_count(), 5);
        assert_eq!(out.finish(), "G21\nG0 Z5\nM2\n\n; end\n");
    }
}
