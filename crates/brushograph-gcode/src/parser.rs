//! Line classifier
//!
//! Turns a raw G-Code line into a [`Command`]. Classification is a pure
//! function of the line text, so the whole buffer can be classified up front
//! and peeked at freely by lookahead.
//!
//! Precedence, first match wins:
//! 1. `M8` in the code part of the line ([`Command::SectionMarker`])
//! 2. first G word is `G0`/`G00` or `G1`/`G01` ([`Command::Motion`])
//! 3. `;Layer <name>` comment ([`Command::LayerMarker`])
//! 4. `; Path <n>` comment ([`Command::PathMarker`])
//! 5. anything else ([`Command::Other`])

use regex::Regex;

use crate::command::{Command, MotionCommand};

fn comment_regex() -> &'static Regex {
    static COMMENT_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    COMMENT_REGEX
        .get_or_init(|| Regex::new(r"\([^)]*\)?|;.*").expect("invalid regex pattern"))
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    WORD_REGEX.get_or_init(|| {
        Regex::new(r"([A-Za-z])\s*([^A-Za-z\s;()]*)").expect("invalid regex pattern")
    })
}

fn section_regex() -> &'static Regex {
    static SECTION_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    SECTION_REGEX.get_or_init(|| Regex::new(r"(?i)\bM0*8\b").expect("invalid regex pattern"))
}

fn layer_regex() -> &'static Regex {
    static LAYER_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    LAYER_REGEX.get_or_init(|| Regex::new(r";\s*Layer\s+(\w+)").expect("invalid regex pattern"))
}

fn path_regex() -> &'static Regex {
    static PATH_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATH_REGEX.get_or_init(|| Regex::new(r";\s*Path\s+(\d+)").expect("invalid regex pattern"))
}

/// Code portion of a line, with `;` and `(...)` comments removed
///
/// Words after a closed parenthesized comment are kept; an unclosed `(` runs
/// to the end of the line.
pub fn code_part(line: &str) -> String {
    comment_regex().replace_all(line, "").trim().to_string()
}

/// Classify a single line
pub fn classify(line: &str) -> Command {
    let code = code_part(line);

    if let Some(m) = section_regex().find(&code) {
        return Command::SectionMarker {
            kind: m.as_str().to_uppercase(),
        };
    }

    if let Some(motion) = parse_motion(&code) {
        return Command::Motion(motion);
    }

    if let Some(caps) = layer_regex().captures(line) {
        return Command::LayerMarker {
            id: caps[1].to_string(),
        };
    }

    if let Some(caps) = path_regex().captures(line) {
        return Command::PathMarker {
            id: caps[1].to_string(),
        };
    }

    Command::Other
}

/// Classify every line of a buffer, preserving order
pub fn classify_all<S: AsRef<str>>(lines: &[S]) -> Vec<Command> {
    lines.iter().map(|line| classify(line.as_ref())).collect()
}

/// Parse the code part of a line as a `G0`/`G1` motion
///
/// Modal G words such as `G90` or `G21` before the move are skipped. Returns
/// `None` when the line has no `G0`/`G1`, or when an arc comes first.
fn parse_motion(code: &str) -> Option<MotionCommand> {
    let mut words = word_regex()
        .captures_iter(code)
        .map(|caps| {
            let letter = caps[1].chars().next().unwrap_or(' ').to_ascii_uppercase();
            (letter, caps.get(2).map_or("", |m| m.as_str()))
        });

    let rapid = loop {
        let (letter, value) = words.next()?;
        if letter != 'G' {
            continue;
        }
        match value.parse::<u32>().ok()? {
            0 => break true,
            1 => break false,
            2 | 3 => return None,
            _ => continue,
        }
    };

    let mut motion = MotionCommand {
        rapid,
        ..MotionCommand::default()
    };

    for (letter, value) in words {
        let slot = match letter {
            'X' => &mut motion.x,
            'Y' => &mut motion.y,
            'Z' => &mut motion.z,
            'F' => &mut motion.feed,
            'S' => &mut motion.power,
            _ => continue,
        };
        if slot.is_some() {
            continue;
        }
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => *slot = Some(number),
            _ => {
                if !motion.invalid_words.contains(&letter) {
                    motion.invalid_words.push(letter);
                }
            }
        }
    }

    Some(motion)
}
