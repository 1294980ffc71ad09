//! 终端表格渲染

use super::ResultRow;

/// 缺失值占位符
pub const PLACEHOLDER: &str = "—";

const HEADERS: [&str; 8] = [
    "You typed",
    "Name",
    "Ticker",
    "Price",
    "EPS (TTM)",
    "P/E",
    "ROE",
    "Status",
];

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// 两位小数，非有限值显示占位符
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 两位小数加百分号
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => PLACEHOLDER.to_string(),
    }
}

fn text_or_placeholder(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

fn status_text(row: &ResultRow) -> String {
    if row.ok {
        "ok".to_string()
    } else {
        row.error.clone().unwrap_or_else(|| "error".to_string())
    }
}

fn cells(row: &ResultRow) -> [String; 8] {
    [
        row.query.clone(),
        text_or_placeholder(&row.name),
        text_or_placeholder(&row.symbol),
        format_number(row.price),
        format_number(row.eps),
        format_number(row.pe),
        format_percent(row.roe),
        status_text(row),
    ]
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// 渲染结果表格
///
/// 行顺序与输入一致；`color` 为 true 时状态列按成功/失败着色
pub fn render_table(rows: &[ResultRow], color: bool) -> String {
    let body: Vec<[String; 8]> = rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');

    for (row, cells) in rows.iter().zip(body.iter()) {
        let mut line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| pad(c, *w))
            .collect();

        // 状态列是最后一列，去掉尾部空白后再着色
        if let Some(status) = line.last_mut() {
            let trimmed = status.trim_end().to_string();
            *status = if color {
                let code = if row.ok { GREEN } else { RED };
                format!("{}{}{}", code, trimmed, RESET)
            } else {
                trimmed
            };
        }
        out.push_str(&line.join("  "));
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Order matches your input. Missing values shown as “—”.\n");
    out
}
