//! Table structure rules
//!
//! Rows and cells are found through their roles, so ARIA tables built
//! from `div`s are measured the same way as native ones.

use super::{Rule, RuleContext, RuleResult, TipType};
use crate::aria::AriaRole;
use crate::category::Category;
use crate::name::known_role;
use fos_dom::{ElementRef, NodeId};
use std::cell::RefCell;
use std::collections::HashMap;

/// Upper bound browsers apply to `colspan`
const MAX_COLSPAN: usize = 1000;

fn is_table(el: &ElementRef<'_>) -> bool {
    known_role(el).is_some_and(|r| {
        matches!(r, AriaRole::Table | AriaRole::Grid | AriaRole::TreeGrid)
    })
}

fn is_cell(el: &ElementRef<'_>) -> bool {
    known_role(el).is_some_and(|r| {
        matches!(
            r,
            AriaRole::Cell | AriaRole::GridCell | AriaRole::ColumnHeader | AriaRole::RowHeader
        )
    })
}

fn is_header(el: &ElementRef<'_>) -> bool {
    el.tag_name() == "th"
        || known_role(el)
            .is_some_and(|r| matches!(r, AriaRole::ColumnHeader | AriaRole::RowHeader))
}

/// Span attribute; missing, zero or malformed values count as 1
fn span(el: &ElementRef<'_>, attr: &str) -> usize {
    el.attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

fn owning_table<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors().find(is_table)
}

/// Rows of `table` in document order, without entering nested tables
fn collect_rows<'a>(parent: &ElementRef<'a>, rows: &mut Vec<ElementRef<'a>>) {
    for child in parent.children() {
        if is_table(&child) {
            continue;
        }
        if known_role(&child) == Some(AriaRole::Row) {
            rows.push(child);
        } else {
            collect_rows(&child, rows);
        }
    }
}

/// Cell slots of one table, 1-based
#[derive(Debug, Default)]
struct TableGrid {
    cells: HashMap<NodeId, (usize, usize)>,
    rows: usize,
    cols: usize,
}

impl TableGrid {
    fn build(table: &ElementRef<'_>) -> Self {
        let mut rows = Vec::new();
        collect_rows(table, &mut rows);

        let mut grid = TableGrid {
            rows: rows.len(),
            ..TableGrid::default()
        };
        // Rows still covered by a rowspan from above, per column
        let mut carried: Vec<usize> = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            let remaining = rows.len() - r;
            let mut c = 0;
            for cell in row.children().filter(is_cell) {
                while carried.get(c).is_some_and(|&n| n > 0) {
                    c += 1;
                }
                let colspan = span(&cell, "colspan").min(MAX_COLSPAN);
                let rowspan = span(&cell, "rowspan").min(remaining);
                if carried.len() < c + colspan {
                    carried.resize(c + colspan, 0);
                }
                carried[c..c + colspan].fill(rowspan);
                grid.cells.insert(cell.id(), (r + 1, c + 1));
                c += colspan;
                grid.cols = grid.cols.max(c);
            }
            for n in carried.iter_mut() {
                *n = n.saturating_sub(1);
            }
        }
        grid
    }
}

/// Table grids of one document, built once per collection pass
#[derive(Debug, Default)]
pub struct TableCache {
    grids: RefCell<HashMap<NodeId, TableGrid>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables measured so far
    pub fn len(&self) -> usize {
        self.grids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.borrow().is_empty()
    }

    fn with_grid<T>(&self, table: &ElementRef<'_>, f: impl FnOnce(&TableGrid) -> T) -> T {
        let mut grids = self.grids.borrow_mut();
        let grid = grids
            .entry(table.id())
            .or_insert_with(|| TableGrid::build(table));
        f(grid)
    }

    fn position(&self, table: &ElementRef<'_>, cell: NodeId) -> Option<(usize, usize)> {
        self.with_grid(table, |grid| grid.cells.get(&cell).copied())
    }

    fn size(&self, table: &ElementRef<'_>) -> (usize, usize) {
        self.with_grid(table, |grid| (grid.rows, grid.cols))
    }
}

/// Whether a header labels its row or its column
#[derive(Debug)]
pub struct TableHeader;

impl Rule for TableHeader {
    fn name(&self) -> &'static str {
        "table-header"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Section]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::TableHeader]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_header(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let direction = match el.attr("scope").map(str::trim) {
            Some("row" | "rowgroup") => "row",
            Some("col" | "colgroup") => "column",
            _ => match el.attr("role").and_then(AriaRole::from_attribute) {
                Some(AriaRole::RowHeader) => "row",
                Some(AriaRole::ColumnHeader) => "column",
                _ => {
                    let all_headers = el
                        .parent_element()
                        .is_some_and(|row| row.children().filter(is_cell).all(|c| is_header(&c)));
                    if all_headers { "column" } else { "row" }
                }
            },
        };
        vec![RuleResult::new(self.name(), TipType::TableHeader, direction)]
    }
}

/// Row and column of a cell, spans included
#[derive(Debug)]
pub struct TablePosition;

impl Rule for TablePosition {
    fn name(&self) -> &'static str {
        "table-position"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Section]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::TableCellPosition]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_cell(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        owning_table(el)
            .and_then(|table| ctx.tables.position(&table, el.id()))
            .map(|(row, col)| {
                RuleResult::new(self.name(), TipType::TableCellPosition, format!("{row}, {col}"))
            })
            .into_iter()
            .collect()
    }
}

#[derive(Debug)]
pub struct TableSize;

impl Rule for TableSize {
    fn name(&self) -> &'static str {
        "table-size"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Section]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::TableSize]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_table(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let (rows, cols) = ctx.tables.size(el);
        let size = format!("{rows} x {cols}");
        vec![RuleResult::new(self.name(), TipType::TableSize, size)]
    }
}
