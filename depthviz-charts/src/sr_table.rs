//! Plain-text support/resistance summary for terminal output

use depthviz_core::data::LevelRow;
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

/// Format a price as `$1,234.56` (negatives as `$-1,234.56`)
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}{}.{}", sign, grouped, frac_part)
}

fn push_levels(out: &mut String, prefix: char, levels: &[LevelRow]) {
    if levels.is_empty() {
        out.push_str("\n    None found");
        return;
    }
    for (i, level) in levels.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = write!(out, "\n    {}{}: {}", prefix, i + 1, format_usd(level.price));
    }
}

/// Resistances then supports, framed by `=` rules
pub fn sr_table_text(supports: &[LevelRow], resistances: &[LevelRow]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push('\n');
    out.push_str(&rule);
    out.push_str("\n  SUPPORT & RESISTANCE LEVELS\n");
    out.push_str(&rule);

    out.push_str("\n\n  RESISTANCES:");
    push_levels(&mut out, 'R', resistances);

    out.push_str("\n\n  SUPPORTS:");
    push_levels(&mut out, 'S', supports);

    out.push('\n');
    out.push_str(&rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-42.1), "$-42.10");
        assert_eq!(format_usd(-1234.5), "$-1,234.50");
    }

    #[test]
    fn test_sr_table_text() {
        let text = sr_table_text(
            &[LevelRow { price: 61000.0 }, LevelRow { price: 60500.25 }],
            &[LevelRow { price: 63250.0 }],
        );

        assert!(text.contains("R1: $63,250.00"));
        assert!(text.contains("S1: $61,000.00"));
        assert!(text.contains("S2: $60,500.25"));
        assert!(text.find("RESISTANCES").unwrap() < text.find("SUPPORTS:").unwrap());
        assert!(text.ends_with(&"=".repeat(50)));
    }

    #[test]
    fn test_sr_table_empty() {
        let text = sr_table_text(&[], &[]);
        assert_eq!(text.matches("None found").count(), 2);
    }
}
