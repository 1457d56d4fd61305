// =============================================================================
// Report Rendering — fixed-width console table of the enriched tail
// =============================================================================
//
// The `render_*` functions produce every output string (table body and
// notices); the `print_*` layer only forwards them to stdout. Operational
// narration stays on the tracing side so the report itself is clean enough
// to pipe.
// =============================================================================

use crate::analysis::ReportRow;
use crate::config::AnalysisConfig;

/// Render the last `tail_rows` report rows as an aligned table, oldest first.
pub fn render_tail_table(rows: &[ReportRow], config: &AnalysisConfig) -> String {
    let sma_label = format!("SMA_{}", config.sma_window);
    let ema_label = format!("EMA_{}", com_label(config.ema_com));
    let vol_label = format!("Volatility_{}", config.vol_window);

    let header = format!(
        "{:<12} {:>12} {:>12} {:>12} {:>14}",
        "Date", "Close", sma_label, ema_label, vol_label
    );

    let separator = "-".repeat(header.len());
    let mut lines = vec![header, separator];

    let start = rows.len().saturating_sub(config.tail_rows);
    for row in &rows[start..] {
        lines.push(format!(
            "{:<12} {:>12.2} {:>12.2} {:>12.2} {:>14.6}",
            row.date, row.close, row.sma, row.ema, row.vol
        ));
    }

    lines.join("\n")
}

/// Body of the final analysis block: the headed tail table, or the empty
/// notice when no row survived the indicator warm-ups.
pub fn render_report(rows: &[ReportRow], config: &AnalysisConfig) -> String {
    if rows.is_empty() {
        return render_empty_notice().to_string();
    }

    let shown = rows.len().min(config.tail_rows);
    format!(
        "Displaying the last {shown} days of data with indicators:\n{}",
        render_tail_table(rows, config)
    )
}

/// Notice used in place of the table when filtering left nothing.
pub fn render_empty_notice() -> &'static str {
    "No rows with complete indicators to display."
}

/// Notice used when acquisition returned no observations at all; names the
/// symbol and both range bounds so the run is identifiable from its output.
pub fn render_no_data_notice(config: &AnalysisConfig) -> String {
    format!(
        "Could not download data for {} between {} and {}. Please check the symbol and date range.",
        config.symbol, config.start_date, config.end_date
    )
}

/// Print the final analysis block under its header line.
pub fn print_report(rows: &[ReportRow], config: &AnalysisConfig) {
    println!("\n--- Analysis Complete ---");
    println!("{}", render_report(rows, config));
}

/// Printed instead of the analysis block when acquisition returned nothing.
pub fn print_no_data(config: &AnalysisConfig) {
    println!("{}", render_no_data_notice(config));
}

/// Integer centers-of-mass label as "21", fractional ones as written.
fn com_label(com: f64) -> String {
    if com.fract() == 0.0 {
        format!("{com:.0}")
    } else {
        format!("{com}")
    }
}
