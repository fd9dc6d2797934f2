// src/cli/notation.rs
//
// Command-line notation for blocks and edit operations.
use std::path::PathBuf;
use std::str::FromStr;

/// A block named on the command line: `txt:<text>`, `img:<path>` or
/// `audio:<path>`. Anything without one of these prefixes is text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSpec {
    Text(String),
    Image(PathBuf),
    Audio(PathBuf),
}

impl BlockSpec {
    pub fn is_media(&self) -> bool {
        !matches!(self, BlockSpec::Text(_))
    }
}

impl FromStr for BlockSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(text) = s.strip_prefix("txt:") {
            return Ok(BlockSpec::Text(text.to_string()));
        }
        if let Some(path) = s.strip_prefix("img:") {
            return media_path(path, "img").map(BlockSpec::Image);
        }
        if let Some(path) = s.strip_prefix("audio:") {
            return media_path(path, "audio").map(BlockSpec::Audio);
        }
        Ok(BlockSpec::Text(s.to_string()))
    }
}

fn media_path(path: &str, prefix: &str) -> Result<PathBuf, String> {
    if path.is_empty() {
        return Err(format!("'{prefix}:' needs a file path"));
    }
    Ok(PathBuf::from(path))
}

/// One editing step: `set:<index>:<text>`, `insert:<index>:<img|audio spec>`,
/// `append:<block spec>` or `backspace:<index>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    SetText { index: usize, text: String },
    InsertMedia { index: usize, spec: BlockSpec },
    Append(BlockSpec),
    Backspace { index: usize },
}

impl FromStr for EditOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid edit operation '{s}'"))?;

        match verb {
            "set" => {
                let (index, text) = split_index(rest)?;
                Ok(EditOp::SetText {
                    index,
                    text: text.to_string(),
                })
            }
            "insert" => {
                let (index, spec) = split_index(rest)?;
                let spec: BlockSpec = spec.parse()?;
                if !spec.is_media() {
                    return Err("insert takes an img: or audio: block".to_string());
                }
                Ok(EditOp::InsertMedia { index, spec })
            }
            "append" => Ok(EditOp::Append(rest.parse()?)),
            "backspace" => Ok(EditOp::Backspace {
                index: parse_index(rest)?,
            }),
            other => Err(format!("unknown edit operation '{other}'")),
        }
    }
}

fn split_index(s: &str) -> Result<(usize, &str), String> {
    let (index, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <index>:<value>, got '{s}'"))?;
    Ok((parse_index(index)?, rest))
}

fn parse_index(s: &str) -> Result<usize, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a block index"))
}
