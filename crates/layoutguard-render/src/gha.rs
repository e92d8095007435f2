use crate::{RenderableReport, RenderableStatus};

const CHECK_ID: &str = "layout.shape";

/// Render failed and skipped files as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(err) = &report.error {
        out.push(format!("::error::{}", escape(&format!("[tool.runtime] {}", err))));
        return out;
    }

    for f in &report.files {
        let level = match f.status {
            RenderableStatus::Fail => "error",
            RenderableStatus::Skip => "notice",
            RenderableStatus::Pass => continue,
        };

        let mut message = format!(
            "[{}:{}] {}",
            CHECK_ID,
            f.code.as_deref().unwrap_or(""),
            f.message.as_deref().unwrap_or("")
        );
        if let Some(key_path) = &f.key_path {
            message.push_str(&format!(" (at {})", key_path));
        }

        out.push(format!(
            "::{} file={}::{}",
            level,
            escape_property(&f.path),
            escape(&message)
        ));
    }

    out
}

fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape(value).replace(':', "%3A").replace(',', "%2C")
}
