use std::collections::BTreeMap;
use std::io::{self, Write};

use sqlfs_engine::{FieldName, PipelineMetrics, Query, expand_fields, render_field};
use sqlfs_fs::FileRecord;

/// Narrowest a table column is ever printed.
pub const MIN_COLUMN_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Column table of the selected fields.
    #[default]
    Table,
    /// One pretty-printed JSON object keyed by path.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Configuration for printing query results.
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Whether to show timing statistics.
    pub show_timing: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: ColorChoice::Auto,
            show_timing: true,
        }
    }
}

/// Static context about a print run.
#[derive(Debug)]
pub struct PrintContext<'a> {
    /// Plan the results came from; decides the table columns.
    pub query: &'a Query,
    /// Number of matching records.
    pub total: usize,
    /// Number of records listed before filtering.
    pub scanned: usize,
    pub metrics: Option<&'a PipelineMetrics>,
}

/// Trait for printing query results.
///
/// Records arrive in path order. Implementations may stream them or buffer
/// until `finish`.
pub trait ResultPrinter {
    /// Called once before any record is printed.
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()>;

    fn print_record(&mut self, record: &FileRecord, ctx: &PrintContext) -> io::Result<()>;

    /// Called once after all records; footers and timing go here.
    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()>;
}

/// Column table printer.
///
/// Rows are buffered so every column can be sized to its widest cell.
pub struct TablePrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
    columns: Vec<FieldName>,
    rows: Vec<Vec<String>>,
}

impl<W: Write, E: Write> TablePrinter<W, E> {
    /// `Auto` color means no color here, since `W` may not be a terminal.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> TablePrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let auto = cfg.color == ColorChoice::Auto;
        let mut printer = TablePrinter::new(io::stdout(), io::stderr(), cfg);
        if auto {
            printer.use_color = io::stdout().is_terminal();
        }
        printer
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, field)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain([field.title().chars().count(), MIN_COLUMN_WIDTH])
                    .max()
                    .unwrap_or(MIN_COLUMN_WIDTH)
            })
            .collect()
    }

    fn write_line(&mut self, cells: &[String], widths: &[usize], header: bool) -> io::Result<()> {
        let mut line = String::new();
        for (cell, &width) in cells.iter().zip(widths) {
            line.push_str(&format!("{cell:<width$}  "));
        }
        let line = line.trim_end();

        if header && self.use_color {
            writeln!(self.out, "\x1b[1;36m{line}\x1b[0m")
        } else {
            writeln!(self.out, "{line}")
        }
    }
}

impl<W: Write, E: Write> ResultPrinter for TablePrinter<W, E> {
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()> {
        self.columns = expand_fields(ctx.query.fields());
        self.rows.clear();
        Ok(())
    }

    fn print_record(&mut self, record: &FileRecord, _ctx: &PrintContext) -> io::Result<()> {
        let row = self
            .columns
            .iter()
            .map(|&field| render_field(field, record))
            .collect();
        self.rows.push(row);
        Ok(())
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        let widths = self.widths();
        let titles: Vec<String> = self.columns.iter().map(|f| f.title().to_string()).collect();
        self.write_line(&titles, &widths, true)?;

        let rows = std::mem::take(&mut self.rows);
        for row in &rows {
            self.write_line(row, &widths, false)?;
        }
        self.out.flush()?;

        if self.cfg.show_timing
            && let Some(m) = ctx.metrics
        {
            writeln!(
                self.err,
                "\n[query] {} of {} entries in {:.2}ms (parse: {:.2}ms, collect: {:.2}ms, filter: {:.2}ms)",
                ctx.total,
                ctx.scanned,
                millis(m.total()),
                millis(m.parse_time.unwrap_or_default()),
                millis(m.collect_time.unwrap_or_default()),
                millis(m.filter_time.unwrap_or_default()),
            )?;
        }

        Ok(())
    }
}

/// Prints the whole result set as one JSON object keyed by path.
pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    records: BTreeMap<String, serde_json::Value>,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self {
            out,
            err,
            cfg,
            records: BTreeMap::new(),
        }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter::new(io::stdout(), io::stderr(), cfg)
    }
}

impl<W: Write, E: Write> ResultPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        self.records.clear();
        Ok(())
    }

    fn print_record(&mut self, record: &FileRecord, _ctx: &PrintContext) -> io::Result<()> {
        let value = serde_json::to_value(record).map_err(io::Error::other)?;
        self.records.insert(record.path.clone(), value);
        Ok(())
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.records).map_err(io::Error::other)?;
        writeln!(self.out)?;
        self.out.flush()?;

        if self.cfg.show_timing
            && let Some(m) = ctx.metrics
        {
            let obj = serde_json::json!({
                "type": "summary",
                "total": ctx.total,
                "scanned": ctx.scanned,
                "timing_ms": {
                    "total": millis(m.total()),
                    "parse": millis(m.parse_time.unwrap_or_default()),
                    "collect": millis(m.collect_time.unwrap_or_default()),
                    "filter": millis(m.filter_time.unwrap_or_default()),
                }
            });
            writeln!(self.err, "{}", obj)?;
        }

        Ok(())
    }
}

fn millis(d: std::time::Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
