use eframe::egui::{self, RichText, Ui};

use crate::state::Kpis;

// ---------------------------------------------------------------------------
// KPI cards (top row of the dashboard)
// ---------------------------------------------------------------------------

/// Render the four headline KPI cards.
pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    let cards = [
        (
            "Total AI-related jobs",
            format_thousands(kpis.total_jobs.round() as i64),
        ),
        (
            "Growth in AI jobs (last year)",
            format!("{:.2}%", kpis.growth_pct),
        ),
        (
            "Average AI role salary",
            format!("${}", format_thousands(kpis.average_salary.round() as i64)),
        ),
        ("Top skill in demand", kpis.top_skill.clone()),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (title, value)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(RichText::new(title).small());
                    ui.heading(RichText::new(value).strong());
                });
            });
        }
    });
}

/// `1234567` → `"1,234,567"`.
fn format_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let first = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_thousands;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-45_000), "-45,000");
    }
}
