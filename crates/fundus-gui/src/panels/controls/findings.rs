use crate::app::FundusApp;

pub(super) fn findings_section(ui: &mut egui::Ui, app: &mut FundusApp) {
    let severity = app.ui_state.report.as_ref().map(|r| r.severity.to_string());
    crate::panels::section_header(ui, "Findings", severity.as_deref());
    ui.add_space(4.0);

    let mut findings = app.session.findings().to_vec();
    let mut changed = false;
    let mut remove = None;

    for (i, finding) in findings.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            if ui.text_edit_singleline(finding).changed() {
                changed = true;
            }
            if ui.small_button("\u{00d7}").clicked() {
                remove = Some(i);
            }
        });
    }
    if let Some(i) = remove {
        findings.remove(i);
        changed = true;
    }

    if ui.small_button("Add finding").clicked() {
        findings.push(String::new());
        changed = true;
    }

    if changed {
        app.session.set_findings(findings);
    }

    if app.session.findings().is_empty() {
        ui.small("No findings. Load a report or add one to refine hotspot labels.");
    }
}
