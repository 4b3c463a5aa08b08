use colored::Colorize;
use rust_decimal::Decimal;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::report::{Report, ReportRow, TotalRow};
use crate::tier::{Banded, Tier};

const TOTAL_LABEL: &str = "Total";

fn paint(text: String, tier: Tier) -> String {
    match tier {
        Tier::Normal => text,
        Tier::Flagged => text.red().to_string(),
        Tier::Elevated => text.green().to_string(),
        Tier::High => text.green().bold().to_string(),
    }
}

fn amount(d: Decimal) -> String {
    d.normalize().to_string()
}

fn banded<T>(b: &Banded<T>, fmt: impl Fn(&T) -> String) -> String {
    paint(fmt(&b.value), b.tier)
}

fn row_cells(row: &ReportRow) -> Vec<String> {
    let mut cells = vec![
        row.label.clone(),
        banded(&row.eth, |d| amount(*d)),
        amount(row.usdc),
        amount(row.usdt),
        amount(row.dai),
        banded(&row.invoke_tx_count, u64::to_string),
        banded(&row.last_tx, String::clone),
        row.days.to_string(),
        row.weeks.to_string(),
        banded(&row.months, u64::to_string),
        banded(&row.outgoing_value, |d| amount(*d)),
        amount(row.fees),
    ];
    cells.extend(row.interactions.iter().map(u64::to_string));
    cells
}

fn total_cells(total: &TotalRow, width: usize) -> Vec<String> {
    let mut cells = vec![String::new(); width];
    cells[0] = TOTAL_LABEL.to_string();
    cells[1] = amount(total.eth);
    cells[2] = amount(total.usdc);
    cells[11] = amount(total.fees);
    cells
}

pub fn title(report: &Report) -> String {
    format!(
        "Starknet: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Title line followed by the table.
pub fn render(report: &Report) -> String {
    let columns = report.columns();
    let width = columns.len();

    let mut builder = Builder::default();
    builder.push_record(columns);
    for row in &report.rows {
        builder.push_record(row_cells(row));
    }
    if let Some(total) = &report.total {
        builder.push_record(total_cells(total, width));
    }

    let table = builder.build().with(Style::modern()).to_string();
    format!("{}\n{table}", title(report).bold())
}
