use crate::yt_dlp::MetadataRecord;

const VALUE_WIDTH: usize = 80;

fn border(left: char, fill: char, middle: char, right: char, widths: (usize, usize)) -> String {
    format!(
        "{}{}{}{}{}\n",
        left,
        fill.to_string().repeat(widths.0 + 2),
        middle,
        fill.to_string().repeat(widths.1 + 2),
        right
    )
}

fn row(name: &str, value: &str, widths: (usize, usize)) -> String {
    format!(
        "│ {}{} │ {}{} │\n",
        name,
        " ".repeat(widths.0 - name.chars().count()),
        value,
        " ".repeat(widths.1.saturating_sub(value.chars().count()))
    )
}

/// Field/Value grid of one record for the terminal
pub fn render_table(record: &MetadataRecord) -> String {
    let rows: Vec<(&str, Vec<String>)> = record
        .display_pairs()
        .into_iter()
        .map(|(name, value)| {
            let lines: Vec<String> = value
                .lines()
                .flat_map(|line| textwrap::wrap(line, VALUE_WIDTH))
                .map(|line| line.into_owned())
                .collect();
            (name, lines)
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once("Field".len()))
        .max()
        .unwrap_or_default();
    let value_width = rows
        .iter()
        .flat_map(|(_, lines)| lines.iter().map(|line| line.chars().count()))
        .chain(std::iter::once("Value".len()))
        .max()
        .unwrap_or_default();
    let widths = (name_width, value_width);

    let mut table = border('╒', '═', '╤', '╕', widths);
    table.push_str(&row("Field", "Value", widths));
    table.push_str(&border('╞', '═', '╪', '╡', widths));

    for (index, (name, lines)) in rows.iter().enumerate() {
        if index > 0 {
            table.push_str(&border('├', '─', '┼', '┤', widths));
        }
        if lines.is_empty() {
            table.push_str(&row(name, "", widths));
        }
        for (i, line) in lines.iter().enumerate() {
            table.push_str(&row(if i == 0 { name } else { "" }, line, widths));
        }
    }

    table.push_str(&border('╘', '═', '╧', '╛', widths));
    table
}
