use labinterp_core::interpret::{GroupedInterpretations, InterpretationItem};
use labinterp_core::model::RangeStatus;
use labinterp_core::report::{LabReport, ReportRow};

pub fn print_report(report: &LabReport) {
    if report.rows.is_empty() {
        println!("No results entered.");
        return;
    }

    print_rows(&report.rows);

    println!("Summary: {}", report.summary);
    println!("Urgency: {}", report.urgency.to_string().to_uppercase());

    if !report.abnormal_findings.is_empty() {
        println!("\nAbnormal findings:");
        for finding in &report.abnormal_findings {
            println!("  - {finding}");
        }
    }

    if let Some(ref estimate) = report.glucose_estimate {
        println!(
            "\nEstimated average glucose: {} mg/dL (HbA1c {} %)",
            estimate.mean_blood_glucose, estimate.hba1c
        );
    }

    println!("\nPossible conditions:");
    for condition in &report.possible_conditions {
        println!("  - {condition}");
    }

    if !report.per_test_interpretation.is_empty() {
        println!("\nResult notes:");
        for note in &report.per_test_interpretation {
            println!("  - {note}");
        }
    }

    if !report.interpretations.is_empty() {
        println!("\nInterpretation:");
        print_interpretations(&report.interpretations);
    }
}

pub fn print_messages(messages: &[String]) {
    if messages.is_empty() {
        println!("No interpretations.");
        return;
    }
    for message in messages {
        println!("  - {message}");
    }
}

fn print_rows(rows: &[ReportRow]) {
    let name_width = column_width(rows.iter().map(|r| r.test_name.as_str()), "Test");
    let value_width = column_width(rows.iter().map(|r| r.value.as_str()), "Result");
    let unit_width = column_width(rows.iter().map(|r| r.unit.as_str()), "Unit");
    let range_width = column_width(rows.iter().map(|r| r.normal_range.as_str()), "Range");

    println!(
        "  {:<nw$}  {:<vw$}  {:<uw$}  {:<rw$}  Flag  Method",
        "Test",
        "Result",
        "Unit",
        "Range",
        nw = name_width,
        vw = value_width,
        uw = unit_width,
        rw = range_width
    );
    println!(
        "  {}",
        "-".repeat(name_width + value_width + unit_width + range_width + 20)
    );

    let mut panel: Option<&str> = None;
    for row in rows {
        let row_panel = row.panel.as_deref().unwrap_or("Other");
        if panel != Some(row_panel) {
            println!("  [{row_panel}]");
            panel = Some(row_panel);
        }
        println!(
            "  {:<nw$}  {:<vw$}  {:<uw$}  {:<rw$}  {:<4}  {}",
            row.test_name,
            row.value,
            row.unit,
            row.normal_range,
            flag(row.status),
            row.method.unwrap_or("-"),
            nw = name_width,
            vw = value_width,
            uw = unit_width,
            rw = range_width
        );
    }
    println!();
}

fn print_interpretations(grouped: &GroupedInterpretations) {
    for group in grouped.groups() {
        println!("\n  {}", group.group);
        for item in &group.items {
            println!("    \u{2022} {}", item.message());
            if let InterpretationItem::Detailed(detail) = item {
                print_sublist("Suggested actions", detail.suggestions.as_deref());
                print_sublist("Drug classes", detail.drug_classes.as_deref());
                print_sublist("References", detail.refs.as_deref());
            }
        }
    }
}

fn print_sublist(title: &str, items: Option<&[String]>) {
    let Some(items) = items.filter(|i| !i.is_empty()) else {
        return;
    };
    println!("        {title}:");
    for item in items {
        println!("          - {item}");
    }
}

fn flag(status: RangeStatus) -> &'static str {
    match status {
        RangeStatus::Normal => "",
        RangeStatus::Abnormal => "H/L",
        RangeStatus::Unknown => "?",
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}
