//! Report rendering
//!
//! Fixed-width text listing of records, one row per record.
//!
//! ## Layout
//! ```text
//! ID       Name                 Description          Stock      Supplier
//! --------------------------------------------------------------------------------
//! 1        Widget               Small part           10         Acme
//! ```

use crate::record::Record;

/// Column widths: id, name, description, stock, supplier
const COLUMNS: (usize, usize, usize, usize, usize) = (8, 20, 20, 10, 30);

/// Width of the dashed separator under the header
const SEPARATOR_WIDTH: usize = 80;

/// Render the listing for the given records
///
/// Pure formatting: no aggregation, no filtering, no statistics. Field
/// values always fit their columns because the slot capacities are
/// narrower than the column widths.
pub fn render_report(records: &[Record]) -> String {
    let (id_w, name_w, descr_w, stock_w, supp_w) = COLUMNS;

    let mut out = String::new();

    out.push_str(&format!(
        "{:<id_w$} {:<name_w$} {:<descr_w$} {:<stock_w$} {:<supp_w$}\n",
        "ID", "Name", "Description", "Stock", "Supplier",
    ));
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');

    for record in records {
        out.push_str(&format!(
            "{:<id_w$} {:<name_w$} {:<descr_w$} {:<stock_w$} {:<supp_w$}\n",
            record.id, record.name, record.description, record.stock, record.supplier,
        ));
    }

    out
}
