use anyhow::{Context, Result};
use std::{fs, path::Path, process::Command};

pub fn resolve_editor(editor: Option<&str>) -> String {
    editor
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens `editor_cmd` on a temporary Markdown file holding `initial`
/// and returns what the user saved.
pub fn create_editor_buffer(editor_cmd: &str, initial: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("recall")
        .suffix(".md")
        .tempfile()
        .context("creating editor buffer")?;

    let path = file.path().to_path_buf();
    fs::write(&path, initial).with_context(|| format!("writing {}", path.display()))?;
    open_file_in_editor(editor_cmd, &path)?;
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

pub fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd)
        .arg(path)
        .status()
        .with_context(|| format!("launching editor `{editor_cmd}`"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_editor_wins() {
        assert_eq!(resolve_editor(Some("hx")), "hx");
    }

    #[test]
    fn buffer_returns_saved_text() {
        // `true` exits successfully without touching the file.
        let text = create_editor_buffer("true", "# Topic\n\nbody\n").unwrap();
        assert_eq!(text, "# Topic\n\nbody\n");
    }

    #[test]
    fn failing_editor_is_an_error() {
        assert!(create_editor_buffer("false", "").is_err());
    }
}
