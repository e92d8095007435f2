use crate::{RenderableFile, RenderableReport, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Layoutguard report\n\n");
    let verdict = match report.verdict {
        RenderableStatus::Pass => "PASS",
        RenderableStatus::Fail => "FAIL",
        RenderableStatus::Skip => "SKIP",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Module: `{}` (layout `{}`)\n- Files: {} passed / {} failed / {} skipped\n\n",
        verdict,
        report.module,
        report.layout,
        report.counts.pass,
        report.counts.fail,
        report.counts.skip
    ));

    if let Some(err) = &report.error {
        out.push_str(&format!("> Error: {}\n", err));
        return out;
    }

    let failed: Vec<&RenderableFile> = report
        .files
        .iter()
        .filter(|f| f.status == RenderableStatus::Fail)
        .collect();
    let skipped: Vec<&RenderableFile> = report
        .files
        .iter()
        .filter(|f| f.status == RenderableStatus::Skip)
        .collect();

    if failed.is_empty() && skipped.is_empty() {
        out.push_str("All data files match the layout.\n");
        return out;
    }

    if !failed.is_empty() {
        out.push_str("## Failures\n\n");
        for f in &failed {
            out.push_str(&file_line(f));
        }
    }
    if !skipped.is_empty() {
        if !failed.is_empty() {
            out.push('\n');
        }
        out.push_str("## Skipped\n\n");
        for f in &skipped {
            out.push_str(&file_line(f));
        }
    }

    out
}

fn file_line(f: &RenderableFile) -> String {
    let mut line = format!("- `{}`", f.path);
    if let Some(code) = &f.code {
        line.push_str(&format!(" / `{}`", code));
    }
    if let Some(message) = &f.message {
        line.push_str(&format!(": {}", message));
    }
    if let Some(key_path) = &f.key_path {
        line.push_str(&format!(" (at `{}`)", key_path));
    }
    line.push('\n');
    line
}
