// src/ports/html.rs
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

use crate::domain::{AudioSource, Note};
use crate::ports::view::{note_blocks, BlockView};
use crate::util::text::format_timestamp;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "trace", skip_all)]
    fn render_block(&self, block: &BlockView) -> String {
        match block {
            BlockView::Text { content } => {
                format!(r#"<div class="text">{}</div>"#, encode_text(content))
            }
            BlockView::Image {
                width,
                height,
                mime,
                data,
            } => format!(
                r#"<img class="image" width="{width}" height="{height}" src="data:{mime};base64,{data}" alt="Note image">"#
            ),
            BlockView::ImageUnavailable { reason } => format!(
                r#"<div class="placeholder" title="{}">Image unavailable</div>"#,
                encode_double_quoted_attribute(reason)
            ),
            BlockView::AudioUnavailable { title } => format!(
                r#"<div class="placeholder">Recording unavailable: {}</div>"#,
                encode_text(title)
            ),
            BlockView::Audio { title, source } => format!(
                r#"<div class="audio"><div class="audio-title">{}</div><audio controls src="{}"></audio></div>"#,
                encode_text(title),
                encode_double_quoted_attribute(&audio_src(source))
            ),
        }
    }

    pub fn render(&self, note: &Note) -> String {
        let body: String = note_blocks(note)
            .iter()
            .map(|block| self.render_block(block))
            .collect::<Vec<_>>()
            .join("\n            ");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 2rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .text {{
            white-space: pre-wrap;
            word-wrap: break-word;
            margin: 1em 0;
        }}
        .image {{
            display: block;
            max-width: 100%;
            height: auto;
            border-radius: 4px;
            margin: 1em 0;
        }}
        .placeholder {{
            background-color: #e9ecef;
            color: #888;
            padding: 2rem;
            text-align: center;
            border-radius: 4px;
            margin: 1em 0;
        }}
        .audio-title {{
            font-size: 0.9em;
            color: #444;
        }}
        .note-info {{
            margin-top: 1rem;
            padding-top: 1rem;
            border-top: 1px solid #eee;
            font-size: 0.9em;
            color: #666;
        }}
    </style>
</head>
<body>
    <div class="card">
        <h2>{title}</h2>
        <div class="content">
            {body}
        </div>
        <div class="note-info">
            <div>Note ID: {note_id}</div>
            <div>Created: {created}</div>
        </div>
    </div>
</body>
</html>"#,
            title = encode_text(&note.title),
            body = body,
            note_id = note.id,
            created = format_timestamp(note.created_at),
        )
    }
}

fn audio_src(source: &AudioSource) -> String {
    match source.embedded_data() {
        Some(data) => format!("data:audio/mpeg;base64,{}", data.trim()),
        None if source.as_str().contains("://") => source.as_str().to_string(),
        None => format!("file://{}", source.as_str()),
    }
}
