//! Everything the presentation layer needs on top of the pipeline output:
//! the three filter dimensions, per-source hit counts and rendering.

use crate::rss_utils::text;
use crate::types::{Article, Result};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Source, keyword group and calendar-date filters, combined with AND.
///
/// An unset dimension lets everything through; an empty selection lets
/// nothing through.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub sources: Option<Vec<String>>,
    pub keyword_groups: Option<Vec<String>>,
    /// Inclusive bounds on the UTC calendar date of `published`.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn with_keyword_groups(mut self, keyword_groups: Vec<String>) -> Self {
        self.keyword_groups = Some(keyword_groups);
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches(&self, article: &Article) -> bool {
        let date = article.published.date_naive();

        self.sources
            .as_ref()
            .map_or(true, |s| s.iter().any(|name| *name == article.source))
            && self
                .keyword_groups
                .as_ref()
                .map_or(true, |g| g.iter().any(|name| *name == article.keyword_group))
            && self.from.map_or(true, |from| date >= from)
            && self.to.map_or(true, |to| date <= to)
    }

    /// Matching articles, in their original order.
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Sources present in `articles`, in order of first appearance.
pub fn distinct_sources(articles: &[Article]) -> Vec<String> {
    let mut seen = Vec::new();
    for article in articles {
        if !seen.contains(&article.source) {
            seen.push(article.source.clone());
        }
    }
    seen
}

/// Earliest and latest calendar dates among `articles`.
pub fn date_bounds(articles: &[Article]) -> Option<(NaiveDate, NaiveDate)> {
    let min = articles.iter().map(|a| a.published.date_naive()).min()?;
    let max = articles.iter().map(|a| a.published.date_naive()).max()?;
    Some((min, max))
}

/// Hits per source, most hits first, ties by name.
pub fn source_counts(articles: &[&Article]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        *counts.entry(article.source.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(source, count)| (source.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

pub fn render_counts(counts: &[(String, usize)]) -> String {
    let width = counts
        .iter()
        .map(|(source, _)| source.chars().count())
        .max()
        .unwrap_or(0)
        .max("Source".len());

    let mut out = format!("{:<width$}  {:>5}\n", "Source", "Hits", width = width);
    for (source, count) in counts {
        out.push_str(&format!("{:<width$}  {:>5}\n", source, count, width = width));
    }
    out
}

const TITLE_WIDTH: usize = 60;

/// Text table with columns Published, Title, Source, Keyword Group and Link.
pub fn render_table(articles: &[&Article]) -> String {
    let rows: Vec<[String; 5]> = articles
        .iter()
        .map(|a| {
            [
                a.published.format("%Y-%m-%d %H:%M UTC").to_string(),
                text::truncate(&text::single_line(&a.title), TITLE_WIDTH),
                a.source.clone(),
                a.keyword_group.clone(),
                a.link.clone(),
            ]
        })
        .collect();

    let headers = ["Published", "Title", "Source", "Keyword Group", "Link"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(|h| h.to_string()), &widths);
    push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn to_json(articles: &[&Article]) -> Result<String> {
    Ok(serde_json::to_string_pretty(articles)?)
}
