use std::io::{self, Write};

use comfy_table::{presets::ASCII_FULL, ContentArrangement, Table};

/// Writes a bordered text table with a double rule under the header.
///
/// Column widths follow the terminal width of the cells, so combining overlines take no
/// room and wide characters take two columns.
pub fn write_grid<W: Write>(
    writer: &mut W,
    headers: &[String],
    records: &[Vec<String>],
) -> io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(headers);

    for record in records {
        table.add_row(record);
    }

    writeln!(writer, "{table}")
}

/// Writes the table as comma-separated values, header first.
pub fn write_csv<W: Write>(
    writer: W,
    headers: &[String],
    records: &[Vec<String>],
) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(headers)?;
    for record in records {
        csv_writer.write_record(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}
