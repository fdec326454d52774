//! Static page output.

use crate::aggregator::AggregatedResult;
use crate::pipeline::RunReport;
use crate::types::{Result, VideoEntry};
use crate::utils::time::relative_time;
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

pub fn render(report: &RunReport, format: OutputFormat, page_title: &str) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(render_html(report, page_title)),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_html(report: &RunReport, page_title: &str) -> String {
    let now = report.generated_at;
    let mut body = String::new();

    match &report.result {
        AggregatedResult::Flat { entries } => {
            body.push_str(&grid(entries, now));
        }
        AggregatedResult::Grouped { groups, all } => {
            body.push_str("<nav class=\"groups\">\n<a href=\"#all\">All</a>\n");
            for (index, section) in groups.iter().enumerate() {
                body.push_str(&format!(
                    "<a href=\"#group-{}\">{}</a>\n",
                    index,
                    encode_text(&section.name)
                ));
            }
            body.push_str("</nav>\n");

            for (index, section) in groups.iter().enumerate() {
                body.push_str(&format!(
                    "<section id=\"group-{}\">\n<h2>{}</h2>\n",
                    index,
                    encode_text(&section.name)
                ));
                body.push_str(&grid(&section.entries, now));
                body.push_str("</section>\n");
            }

            body.push_str("<section id=\"all\">\n<h2>All</h2>\n");
            body.push_str(&grid(all, now));
            body.push_str("</section>\n");
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {{ font-family: sans-serif; margin: 0; }}
        .groups {{ display: flex; flex-wrap: wrap; gap: 12px; padding: 20px 20px 0; }}
        h2 {{ padding: 0 20px; }}
        .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 20px; padding: 20px; }}
        .video {{ border: 1px solid #ddd; padding: 10px; border-radius: 8px; }}
        img {{ width: 100%; border-radius: 4px; }}
        a {{ color: #000; text-decoration: none; }}
        .channel, .date {{ color: #666; font-size: 0.9em; margin: 4px 0; }}
    </style>
</head>
<body>
<h1>{title}</h1>
<p class="date">Updated {updated}</p>
{body}</body>
</html>
"#,
        title = encode_text(page_title),
        updated = now.format("%Y-%m-%d %H:%M UTC"),
        body = body,
    )
}

fn grid(entries: &[VideoEntry], now: DateTime<Utc>) -> String {
    let mut html = String::from("<div class=\"grid\">\n");

    for entry in entries {
        let thumbnail = entry
            .thumbnail_url
            .as_deref()
            .map(|src| {
                format!(
                    "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                    encode_double_quoted_attribute(src),
                    encode_double_quoted_attribute(&entry.title)
                )
            })
            .unwrap_or_default();

        html.push_str(&format!(
            r#"<div class="video">
    <a href="{link}" target="_blank">
        {thumbnail}
        <h3>{title}</h3>
    </a>
    <p class="channel">{channel}</p>
    <p class="date" title="{date}">{relative}</p>
</div>
"#,
            link = encode_double_quoted_attribute(&entry.link),
            thumbnail = thumbnail,
            title = encode_text(&entry.title),
            channel = encode_text(&entry.channel_title),
            date = entry.published_at.format("%Y-%m-%d %H:%M"),
            relative = relative_time(now, entry.published_at),
        ));
    }

    html.push_str("</div>\n");
    html
}
