//! Human and JSON output helpers.
//!
//! Human mode prints one item per line, or an aligned table for kernel
//! listings; `--json` emits the same data as JSON.

use anyhow::Result;

use helio_registry::AvailableKernel;

use crate::opts::GlobalOpts;

pub fn print_lines(opts: &GlobalOpts, lines: Vec<String>) -> Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn print_available(opts: &GlobalOpts, rows: &[AvailableKernel]) -> Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    let header = ["Body", "Class", "Version", "Start", "End"];
    let mut cells: Vec<[String; 5]> = Vec::with_capacity(rows.len());
    for row in rows {
        cells.push([
            row.body.clone(),
            row.class.to_string(),
            row.version.to_string(),
            row.start.to_string(),
            row.end.map(|d| d.to_string()).unwrap_or_else(|| "open".into()),
        ]);
    }

    let mut widths = header.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    print_row(&header.map(str::to_string), &widths);
    for row in &cells {
        print_row(row, &widths);
    }
    Ok(())
}

fn print_row(cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", line.trim_end());
}
