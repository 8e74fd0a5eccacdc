//! Plain-text rendering of a report document.

use crate::models::ReportResponse;
use std::fmt::Write;

const RULE: &str = "----------------------------------------";

fn result_tag(result: &str) -> &'static str {
    match result {
        "pass" => "[PASS]",
        "fail" => "[FAIL]",
        _ => "[N/A] ",
    }
}

/// Renders the structured report as a plain-text document.
#[must_use]
pub fn render_text(report: &ReportResponse) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "INSPECTION REPORT");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Customer:    {}", report.customer_name);
    let _ = writeln!(out, "Address:     {}", report.address_line);
    let _ = writeln!(out, "Checklist:   {}", report.checklist_name);
    let _ = writeln!(out, "Date:        {}", report.scheduled_date);
    let _ = writeln!(out, "Inspectors:  {}", report.inspector_names.join(", "));
    let _ = writeln!(out, "Generated:   {}", report.generated_at);

    for section in &report.sections {
        let _ = writeln!(out, "\n{}", section.location);
        let _ = writeln!(out, "{RULE}");
        for task in &section.tasks {
            let _ = writeln!(out, "  {} {}", result_tag(&task.result), task.task);
            if let Some(note) = &task.note {
                let _ = writeln!(out, "         note: {note}");
            }
        }
    }

    let summary = &report.summary;
    let _ = writeln!(out, "\nSUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  pass: {}  fail: {}  n/a: {}  total: {}",
        summary.pass, summary.fail, summary.not_applicable, summary.total
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReportSection, ReportSummary, ReportTask};

    #[test]
    fn renders_sections_and_summary() {
        let report = ReportResponse {
            id: "report:x".into(),
            work_order: "work_order:y".into(),
            customer_name: "Jansen Vastgoed".into(),
            address_line: "Main St 1, Utrecht".into(),
            checklist_name: "Apartment intake".into(),
            scheduled_date: "2026-09-01".into(),
            inspector_names: vec!["Eva de Vries".into()],
            sections: vec![ReportSection {
                location: "Kitchen".into(),
                tasks: vec![
                    ReportTask { task: "Check stove".into(), result: "pass".into(), note: None },
                    ReportTask {
                        task: "Check taps".into(),
                        result: "fail".into(),
                        note: Some("Dripping".into()),
                    },
                ],
            }],
            summary: ReportSummary { pass: 1, fail: 1, not_applicable: 0, total: 2 },
            generated_at: "2026-09-01T12:00:00Z".into(),
        };

        let text = render_text(&report);
        assert!(text.contains("INSPECTION REPORT"));
        assert!(text.contains("Kitchen"));
        assert!(text.contains("[PASS] Check stove"));
        assert!(text.contains("[FAIL] Check taps"));
        assert!(text.contains("note: Dripping"));
        assert!(text.contains("pass: 1  fail: 1  n/a: 0  total: 2"));
    }
}
