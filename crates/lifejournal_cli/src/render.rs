//! Text and JSON rendering for both layouts.

use chrono::DateTime;
use lifejournal_core::{Review, ReviewId, ReviewView, Section};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn sections(output: OutputMode) -> String {
    match output {
        OutputMode::Json => {
            let items: Vec<Value> = Section::ALL
                .iter()
                .map(|section| {
                    json!({
                        "id": section.slug(),
                        "label": section.label(),
                        "accent": section.accent().as_str(),
                    })
                })
                .collect();
            Value::Array(items).to_string()
        }
        OutputMode::Human => Section::ALL
            .iter()
            .map(|section| format!("{:<18} {}", section.slug(), section.label()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn view(view: &ReviewView, selected: Section, output: OutputMode) -> String {
    match output {
        OutputMode::Json => view_json(view).to_string(),
        OutputMode::Human => view_text(view, selected),
    }
}

pub fn review(review: &Review, output: OutputMode) -> String {
    match output {
        OutputMode::Json => json!(review).to_string(),
        OutputMode::Human => review_text(review),
    }
}

pub fn deleted(id: ReviewId, output: OutputMode) -> String {
    match output {
        OutputMode::Json => json!({ "deleted": id }).to_string(),
        OutputMode::Human => format!("deleted {id}"),
    }
}

fn view_json(view: &ReviewView) -> Value {
    match view {
        ReviewView::Empty => json!({ "mode": "empty", "reviews": [] }),
        ReviewView::Grouped(groups) => {
            let sections: serde_json::Map<String, Value> = groups
                .iter()
                .map(|(section, reviews)| (section.slug().to_string(), json!(reviews)))
                .collect();
            json!({ "mode": "grouped", "sections": sections })
        }
        ReviewView::Filtered { section, reviews } => json!({
            "mode": "filtered",
            "section": section.slug(),
            "reviews": reviews,
        }),
    }
}

fn view_text(view: &ReviewView, selected: Section) -> String {
    match view {
        ReviewView::Empty => "No reviews yet. Pick a section and write the first one.".to_string(),
        ReviewView::Grouped(groups) => groups
            .iter()
            .map(|(section, reviews)| {
                let body: Vec<String> = reviews.iter().map(review_text).collect();
                format!("== {} ==\n{}", section.label(), body.join("\n\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        ReviewView::Filtered { section, reviews } => {
            let mut out = tabs(selected);
            out.push('\n');
            if reviews.is_empty() {
                out.push_str(&format!("No reviews in {} yet.", section.label()));
            } else {
                let body: Vec<String> = reviews.iter().map(review_text).collect();
                out.push_str(&body.join("\n\n"));
            }
            out
        }
    }
}

fn tabs(selected: Section) -> String {
    Section::ALL
        .iter()
        .map(|section| {
            if *section == selected {
                format!("[{}]", section.label())
            } else {
                section.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn review_text(review: &Review) -> String {
    format!(
        "{} ({})  {}\n  {}\n  id: {}",
        review.title,
        format_date(review.created_at),
        review.section.slug(),
        review.content.replace('\n', "\n  "),
        review.id
    )
}

fn format_date(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}
