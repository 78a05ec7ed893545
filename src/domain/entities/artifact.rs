//! Artifact entity - a generated notebook
//!
//! An artifact is an ordered list of typed blocks with an explicit render
//! step. Opaque payloads are kept as `Fragment::Payload` until rendering, so
//! string-literal escaping happens in exactly one place
//! ([`Fragment::render`]).

use serde_json::{json, Value};

use crate::domain::services::escape_string_literals;
use crate::domain::value_objects::ContentHash;

/// Piece of a code cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Generated line(s), emitted verbatim
    Line(String),
    /// Opaque payload text (setup code, porting body), escaped on render
    Payload { name: String, source: String },
}

impl Fragment {
    /// Render this fragment to notebook source text
    pub fn render(&self) -> String {
        match self {
            Fragment::Line(text) => text.clone(),
            Fragment::Payload { source, .. } => escape_string_literals(source).trim().to_string(),
        }
    }
}

/// One notebook cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Markdown cell
    Markdown(String),
    /// Code cell made of generated lines and payloads
    Code(Vec<Fragment>),
    /// Empty code cell left for the rater
    Placeholder,
}

impl Block {
    /// Code cell holding a single opaque payload
    pub fn payload(name: impl Into<String>, source: impl Into<String>) -> Self {
        Block::Code(vec![Fragment::Payload {
            name: name.into(),
            source: source.into(),
        }])
    }

    pub fn is_code(&self) -> bool {
        !matches!(self, Block::Markdown(_))
    }

    /// Render the cell source text
    pub fn source(&self) -> String {
        match self {
            Block::Markdown(text) => text.clone(),
            Block::Code(fragments) => {
                let body: Vec<String> = fragments.iter().map(Fragment::render).collect();
                format!("{}\n", body.join("\n"))
            }
            Block::Placeholder => String::new(),
        }
    }
}

/// Builder for code cells
#[derive(Debug, Default)]
pub struct CodeBuilder {
    fragments: Vec<Fragment>,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.fragments.push(Fragment::Line(text.into()));
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fragments
            .extend(lines.into_iter().map(|l| Fragment::Line(l.into())));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    pub fn payload(&mut self, name: impl Into<String>, source: impl Into<String>) -> &mut Self {
        self.fragments.push(Fragment::Payload {
            name: name.into(),
            source: source.into(),
        });
        self
    }

    pub fn build(self) -> Block {
        Block::Code(self.fragments)
    }
}

/// Generated notebook for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    task_id: String,
    blocks: Vec<Block>,
}

impl Artifact {
    pub fn new(task_id: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            task_id: task_id.into(),
            blocks,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Render as nbformat v4.5 JSON
    ///
    /// Output is deterministic: cell ids derive from the task id and cell
    /// position, and keys are written in nbformat's sorted order.
    pub fn to_notebook_json(&self) -> serde_json::Result<String> {
        let cells: Vec<Value> = self
            .blocks
            .iter()
            .enumerate()
            .map(|(i, block)| self.render_cell(i, block))
            .collect();

        let notebook = json!({
            "cells": cells,
            "metadata": {
                "colab": { "provenance": [] },
                "language_info": { "name": "python" }
            },
            "nbformat": 4,
            "nbformat_minor": 5
        });

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        serde::Serialize::serialize(&notebook, &mut ser)?;
        let mut text = String::from_utf8_lossy(&out).into_owned();
        text.push('\n');
        Ok(text)
    }

    /// Content hash of the rendered notebook
    pub fn content_hash(&self) -> serde_json::Result<ContentHash> {
        Ok(ContentHash::from_content(&self.to_notebook_json()?))
    }

    fn cell_id(&self, position: usize) -> String {
        ContentHash::from_content(&format!("{}:{}", self.task_id, position))
            .short(8)
            .to_string()
    }

    fn render_cell(&self, position: usize, block: &Block) -> Value {
        let source = split_source_lines(&block.source());
        let id = self.cell_id(position);
        if block.is_code() {
            json!({
                "cell_type": "code",
                "execution_count": null,
                "id": id,
                "metadata": {},
                "outputs": [],
                "source": source
            })
        } else {
            json!({
                "cell_type": "markdown",
                "id": id,
                "metadata": {},
                "source": source
            })
        }
    }
}

/// Split text into lines keeping line endings (nbformat's multiline form)
fn split_source_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Artifact {
        let mut code = CodeBuilder::new();
        code.line("import json").blank().line("x = 1");
        Artifact::new(
            "T1",
            vec![
                Block::Markdown("# Title\n\nbody".to_string()),
                code.build(),
                Block::payload("setup", "print('a\nb')\n"),
                Block::Placeholder,
            ],
        )
    }

    #[test]
    fn code_block_joins_fragments_with_trailing_newline() {
        let artifact = sample();
        assert_eq!(artifact.blocks()[1].source(), "import json\n\nx = 1\n");
    }

    #[test]
    fn payload_block_is_escaped_and_trimmed_on_render() {
        let artifact = sample();
        assert_eq!(artifact.blocks()[2].source(), "print('a\\nb')\n");
    }

    #[test]
    fn placeholder_renders_empty() {
        assert_eq!(Block::Placeholder.source(), "");
        assert!(Block::Placeholder.is_code());
    }

    #[test]
    fn notebook_json_has_nbformat_shape() {
        let text = sample().to_notebook_json().unwrap();
        let nb: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(nb["nbformat"], 4);
        assert_eq!(nb["nbformat_minor"], 5);
        assert_eq!(nb["metadata"]["language_info"]["name"], "python");

        let cells = nb["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0]["cell_type"], "markdown");
        assert_eq!(cells[0]["source"], json!(["# Title\n", "\n", "body"]));
        assert_eq!(cells[1]["cell_type"], "code");
        assert_eq!(cells[1]["outputs"], json!([]));
        assert_eq!(cells[3]["source"], json!([]));
    }

    #[test]
    fn notebook_json_is_deterministic() {
        assert_eq!(
            sample().to_notebook_json().unwrap(),
            sample().to_notebook_json().unwrap()
        );
        assert_eq!(
            sample().content_hash().unwrap(),
            sample().content_hash().unwrap()
        );
    }

    #[test]
    fn cell_ids_are_unique_and_stable() {
        let nb: Value = serde_json::from_str(&sample().to_notebook_json().unwrap()).unwrap();
        let ids: Vec<&str> = nb["cells"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| id.len() == 8));
    }

    #[test]
    fn payload_survives_json_embedding() {
        let artifact = Artifact::new(
            "T2",
            vec![Block::payload("p", "msg = \"he said \\\"hi\\\"\"\nprint(msg)")],
        );
        let nb: Value = serde_json::from_str(&artifact.to_notebook_json().unwrap()).unwrap();
        let joined: String = nb["cells"][0]["source"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l.as_str().unwrap())
            .collect();
        assert_eq!(joined, "msg = \"he said \\\"hi\\\"\"\nprint(msg)\n");
    }
}
