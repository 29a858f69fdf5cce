//! Streaming reader for `-fdebug-dump-parse-tree-no-sema` output
//!
//! Each line of the dump is `| | Tag = 'value'` or a single-child chain
//! `Tag -> Tag -> Tag`. The number of `|` markers is the depth. A line at
//! depth `d + 1` attaches to the last chain element of the nearest line at
//! depth `d`. Each depth-0 line starts a new top-level tree, and only the
//! tree currently being assembled is held in memory.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::{Tag, TreeNode};
use crate::error::{FlinspectError, Result};

/// One dump line after depth and chain splitting
#[derive(Debug)]
struct DumpLine {
    depth: usize,
    number: usize,
    chain: Vec<(String, Option<String>)>,
}

/// Open node on the assembly stack
struct OpenNode {
    /// Depth of the line the node came from
    depth: usize,
    node: TreeNode,
}

pub struct TreeReader<R = BufReader<File>> {
    path: PathBuf,
    input: R,
    line_number: usize,
    stack: Vec<OpenNode>,
    pending: Option<DumpLine>,
    /// Discarding an orphaned fragment until the next depth-0 line
    skipping: bool,
    issues: Vec<FlinspectError>,
    buf: Vec<u8>,
}

impl TreeReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FlinspectError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                FlinspectError::io_at(path, e)
            }
        })?;
        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<R: BufRead> TreeReader<R> {
    pub fn from_reader(path: impl Into<PathBuf>, input: R) -> Self {
        Self {
            path: path.into(),
            input,
            line_number: 0,
            stack: Vec::new(),
            pending: None,
            skipping: false,
            issues: Vec::new(),
            buf: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain the `MalformedTree` problems recorded so far
    pub fn take_issues(&mut self) -> Vec<FlinspectError> {
        std::mem::take(&mut self.issues)
    }

    fn malformed(&mut self, line: usize, message: String) {
        tracing::warn!("[READER] {}:{}: {}", self.path.display(), line, message);
        self.issues.push(FlinspectError::MalformedTree {
            path: self.path.clone(),
            line,
            message,
        });
    }

    /// Next line carrying tree content, or `None` at end of input
    fn next_line(&mut self) -> Result<Option<DumpLine>> {
        loop {
            self.buf.clear();
            let read = self
                .input
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| FlinspectError::io_at(&self.path, e))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let text = String::from_utf8_lossy(&self.buf);
            if let Some(line) = parse_line(&text, self.line_number) {
                return Ok(Some(line));
            }
        }
    }

    /// Pop open nodes that came from lines at `depth` or deeper, folding each
    /// into its parent. Returns the root if the whole stack was closed.
    fn close_from(&mut self, depth: usize) -> Option<TreeNode> {
        while self.stack.last().is_some_and(|top| top.depth >= depth) {
            let closed = self.stack.pop()?;
            match self.stack.last_mut() {
                Some(parent) => parent.node.children.push(closed.node),
                None => return Some(closed.node),
            }
        }
        None
    }

    fn push_chain(&mut self, line: DumpLine) {
        for (tag, value) in line.chain {
            self.stack.push(OpenNode {
                depth: line.depth,
                node: TreeNode::new(Tag::parse(&tag), value, line.number),
            });
        }
    }
}

impl<R: BufRead + Seek> TreeReader<R> {
    /// Restart from the beginning of the input
    pub fn rewind(&mut self) -> Result<()> {
        self.input
            .seek(SeekFrom::Start(0))
            .map_err(|e| FlinspectError::io_at(&self.path, e))?;
        self.line_number = 0;
        self.stack.clear();
        self.pending = None;
        self.skipping = false;
        self.issues.clear();
        Ok(())
    }
}

impl<R: BufRead> Iterator for TreeReader<R> {
    type Item = Result<TreeNode>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.pending.take() {
                Some(line) => line,
                None => match self.next_line() {
                    Ok(Some(line)) => line,
                    Ok(None) => return self.close_from(0).map(Ok),
                    Err(e) => return Some(Err(e)),
                },
            };

            if line.depth == 0 {
                self.skipping = false;
                if !self.stack.is_empty() {
                    let done = self.close_from(0);
                    self.pending = Some(line);
                    if let Some(root) = done {
                        return Some(Ok(root));
                    }
                    continue;
                }
                self.push_chain(line);
                continue;
            }

            if self.skipping {
                continue;
            }

            if self.stack.is_empty() {
                self.malformed(
                    line.number,
                    format!("depth {} line with no open top-level node; skipping fragment", line.depth),
                );
                self.skipping = true;
                continue;
            }

            // The root sits at depth 0, so this never empties the stack
            let _ = self.close_from(line.depth);
            let parent_depth = self.stack.last().map(|top| top.depth).unwrap_or(0);
            if line.depth > parent_depth + 1 {
                self.malformed(
                    line.number,
                    format!(
                        "depth jumps from {} to {}; attaching to the deepest open node",
                        parent_depth, line.depth
                    ),
                );
                // Re-level so later siblings at this depth still find it
                let mut line = line;
                line.depth = parent_depth + 1;
                self.push_chain(line);
                continue;
            }
            self.push_chain(line);
        }
    }
}

/// Whether the first non-blank line of a dump is the flang banner
pub fn starts_with_banner(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FlinspectError::io_at(path, e))?;
    let mut input = BufReader::new(file);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input
            .read_until(b'\n', &mut buf)
            .map_err(|e| FlinspectError::io_at(path, e))?
            == 0
        {
            return Ok(false);
        }
        let text = String::from_utf8_lossy(&buf);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        return Ok(trimmed.starts_with('=') && trimmed.to_ascii_lowercase().contains("parse tree"));
    }
}

fn parse_line(raw: &str, number: usize) -> Option<DumpLine> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('=') || trimmed.starts_with('!') || trimmed.starts_with('#') {
        return None;
    }

    let mut depth = 0;
    let mut start = raw.len();
    for (idx, ch) in raw.char_indices() {
        match ch {
            '|' => depth += 1,
            ' ' | '\t' => {}
            _ => {
                start = idx;
                break;
            }
        }
    }
    let mut body = raw[start..].trim_end();
    if body.is_empty() {
        return None;
    }
    // `Real ->` ends an empty chain tail
    if let Some(stripped) = body.strip_suffix("->") {
        body = stripped.trim_end();
        if body.is_empty() {
            return None;
        }
    }

    let chain: Vec<(String, Option<String>)> = split_outside_quotes(body, " -> ")
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
        .collect();
    if chain.is_empty() {
        return None;
    }
    Some(DumpLine {
        depth,
        number,
        chain,
    })
}

fn parse_segment(segment: &str) -> (String, Option<String>) {
    let parts = split_outside_quotes(segment, " = ");
    if parts.len() < 2 {
        return (segment.to_string(), None);
    }
    let tag = parts[0].trim().to_string();
    // Everything after the first separator is the value
    let value = segment[parts[0].len() + 3..].trim();
    (tag, Some(unquote(value)))
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        value[1..value.len() - 1].replace("''", "'")
    } else {
        value.to_string()
    }
}

fn split_outside_quotes<'a>(text: &'a str, sep: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut in_quote = false;
    let mut last = 0;
    let bytes = text.as_bytes();
    let sep_bytes = sep.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            in_quote = !in_quote;
            i += 1;
            continue;
        }
        if !in_quote && bytes[i..].starts_with(sep_bytes) {
            parts.push(&text[last..i]);
            i += sep_bytes.len();
            last = i;
            continue;
        }
        i += 1;
    }
    parts.push(&text[last..]);
    parts
}
