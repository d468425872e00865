//! Panel-script extraction.
//!
//! Panel definitions are XML files whose `<script>` elements hold CTL
//! source. This module pulls that text out (joining multiple scripts with
//! a newline), strips CDATA markers, and mirrors a panel directory tree
//! into a tree of `.ctl` files ready for the formatter.

use std::fs;
use std::path::Path;

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use walkdir::WalkDir;

/// Extracts the content of all `<script>` elements from an XML document.
/// Multiple scripts are joined with a newline. Returns an empty string
/// when the document has no script content.
pub fn extract_scripts(xml: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut scripts: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event().context("malformed panel XML")? {
            Event::Start(start) if start.name().as_ref() == b"script" => {
                depth += 1;
            }
            Event::End(end) if end.name().as_ref() == b"script" => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        let cleaned = clean_script(&current);
                        if !cleaned.is_empty() {
                            scripts.push(cleaned);
                        }
                        current.clear();
                    }
                }
            }
            Event::Text(text) if depth > 0 => {
                current.push_str(&text.unescape().context("bad entity in script text")?);
            }
            Event::CData(cdata) if depth > 0 => {
                current.push_str(
                    std::str::from_utf8(&cdata.into_inner()).context("script is not UTF-8")?,
                );
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(scripts.join("\n"))
}

/// Drops stray CDATA markers and surrounding whitespace.
fn clean_script(text: &str) -> String {
    text.trim()
        .replace("<![CDATA[", "")
        .replace("]]>", "")
        .trim()
        .to_string()
}

/// Mirrors `source` into `dest`, converting every `.xml` panel into a
/// `.ctl` file with its extracted script content. The destination tree is
/// recreated from scratch.
pub fn extract_tree(source: &Path, dest: &Path) -> anyhow::Result<()> {
    if dest.exists() {
        fs::remove_dir_all(dest)
            .with_context(|| format!("failed to clear {}", dest.display()))?;
    }
    fs::create_dir_all(dest).with_context(|| format!("failed to create {}", dest.display()))?;

    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("xml") {
            continue;
        }

        let relative = path
            .strip_prefix(source)
            .context("walked path outside the source tree")?;
        let target = dest.join(relative).with_extension("ctl");
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let xml = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let content = extract_scripts(&xml)?;
        if content.is_empty() {
            println!("No script content found in {}", path.display());
            continue;
        }

        debug!(panel = %path.display(), target = %target.display(), "extracted script");
        fs::write(&target, content)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }

    Ok(())
}
