//! Text rendering of recommendation results
//!
//! Table, horizontal bar chart and JSON. Everything returns a `String`; the
//! binary decides where it goes.

use std::fmt::Write;

use crate::{error::Result, recommend::Match};

/// Output formats understood by [`render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Table,
    Chart,
    Json,
    /// table followed by chart
    All,
}

/// Message shown when a query produced no matches
pub const NO_MATCHES: &str = "No matches found. Try rephrasing symptoms.";

/// Default width of the longest possible bar, in characters
pub const DEFAULT_CHART_WIDTH: usize = 40;

const BAR: char = '█';

pub fn render(matches: &[Match], format: Format) -> Result<String> {
    Ok(match format {
        Format::Table => render_table(matches),
        Format::Chart => render_bar_chart(matches, DEFAULT_CHART_WIDTH),
        Format::Json => render_json(matches)?,
        Format::All => {
            let mut out = render_table(matches);
            out.push('\n');
            out.push_str(&render_bar_chart(matches, DEFAULT_CHART_WIDTH));
            out
        }
    })
}

/// `name | description | score` table, one row per match in rank order
pub fn render_table(matches: &[Match]) -> String {
    const HEADERS: [&str; 3] = ["name", "description", "score"];

    let scores: Vec<String> = matches.iter().map(|m| format!("{:.2}", m.score)).collect();
    let name_w = column_width(HEADERS[0], matches.iter().map(|m| m.name.as_str()));
    let desc_w = column_width(HEADERS[1], matches.iter().map(|m| m.description.as_str()));
    let score_w = column_width(HEADERS[2], scores.iter().map(String::as_str));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_w$} | {:<desc_w$} | {:>score_w$}",
        HEADERS[0], HEADERS[1], HEADERS[2]
    );
    let _ = writeln!(
        out,
        "{}-+-{}-+-{}",
        "-".repeat(name_w),
        "-".repeat(desc_w),
        "-".repeat(score_w)
    );
    for (m, score) in matches.iter().zip(&scores) {
        let _ = writeln!(
            out,
            "{:<name_w$} | {:<desc_w$} | {:>score_w$}",
            m.name, m.description, score
        );
    }
    out
}

/// Horizontal bar chart on a 0..=100 axis, best match on the top line.
///
/// `width` is the length of a bar scoring 100. Each bar is labelled with the
/// shortest round-trip form of the score, keeping one decimal on whole
/// numbers (`"20.0%"`, `"80.5%"`).
pub fn render_bar_chart(matches: &[Match], width: usize) -> String {
    let label_w = column_width("", matches.iter().map(|m| m.name.as_str()));

    let mut out = String::new();
    for m in matches {
        let len = bar_len(m.score, width);
        let _ = writeln!(
            out,
            "{:<label_w$} | {} {:?}%",
            m.name,
            BAR.to_string().repeat(len),
            m.score
        );
    }
    out
}

pub fn render_json(matches: &[Match]) -> Result<String> {
    Ok(serde_json::to_string_pretty(matches)?)
}

fn bar_len(score: f64, width: usize) -> usize {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    (ratio * width as f64).round() as usize
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .fold(header.chars().count(), usize::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches() -> Vec<Match> {
        vec![
            Match {
                name: "ParacetamolX".into(),
                description: "reduces fever".into(),
                score: 80.5,
            },
            Match {
                name: "Aspirin".into(),
                description: "pain relief".into(),
                score: 20.0,
            },
        ]
    }

    #[test]
    fn table_has_header_and_rows_in_order() {
        let table = render_table(&matches());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("name"));
        assert!(lines[0].contains("description"));
        assert!(lines[0].ends_with("score"));
        assert!(lines[2].starts_with("ParacetamolX"));
        assert!(lines[2].ends_with("80.50"));
        assert!(lines[3].starts_with("Aspirin"));
        assert!(lines[3].ends_with("20.00"));
    }

    #[test]
    fn chart_keeps_best_on_top_and_scales_bars() {
        let chart = render_bar_chart(&matches(), 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ParacetamolX"));
        assert!(lines[0].ends_with("80.5%"));
        assert_eq!(lines[0].matches(BAR).count(), 8);
        assert!(lines[1].ends_with(" 20.0%"));
        assert_eq!(lines[1].matches(BAR).count(), 2);
    }

    #[test]
    fn whole_scores_keep_one_decimal_in_chart() {
        let full = vec![Match {
            name: "High".into(),
            description: String::new(),
            score: 100.0,
        }];
        let chart = render_bar_chart(&full, 4);
        assert_eq!(chart, format!("High | {} 100.0%\n", BAR.to_string().repeat(4)));
    }

    #[test]
    fn bar_length_is_clamped() {
        assert_eq!(bar_len(100.0, 40), 40);
        assert_eq!(bar_len(150.0, 40), 40);
        assert_eq!(bar_len(0.0, 40), 0);
    }

    #[test]
    fn json_round_trips() {
        let json = render_json(&matches()).unwrap();
        let back: Vec<Match> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matches());
    }

    #[test]
    fn all_contains_table_and_chart() {
        let out = render(&matches(), Format::All).unwrap();
        assert!(out.contains("description"));
        assert!(out.contains("80.5%"));
    }

    #[test]
    fn empty_input_renders_header_only() {
        assert_eq!(render_table(&[]).lines().count(), 2);
        assert!(render_bar_chart(&[], 40).is_empty());
    }
}
