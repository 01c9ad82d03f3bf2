//! Row renderer: pure projection of rows and grid state to markup.
//!
//! Edit-mode inputs carry their confirmed value in `data-original-value`.
//! A repeating field also renders a hidden `{field}-count` input whose value
//! is the current number of entries and whose original value is the entry
//! count before the edit.

use maud::{html, Markup};

use crate::controller::GridState;
use crate::i18n::Translate;
use crate::pagination::{page_buttons, PageButton};
use crate::row::{Row, RowState};
use crate::schema::{schema_for, FieldOrigin, FieldSchema, FieldSpec};
use crate::value::display_text;

fn text(tr: &dyn Translate, key: &str) -> String {
    tr.translate(key, &[])
}

/// Markup of one row in its current state
pub fn render_row(row: &Row, schema: &FieldSchema, tr: &dyn Translate) -> Markup {
    let editing = row.state().is_editable();

    html! {
        tr.grid-row.pending[row.is_pending()]
            data-row=(row.key().0)
            data-kind=(row.kind().slug())
            data-state=(row.state().as_str())
        {
            @for spec in schema.fields {
                td data-field=(spec.name) {
                    @if editing {
                        (edit_cell(row, spec, tr))
                    } @else {
                        (view_cell(row, spec))
                    }
                }
            }
            td.controls {
                (controls(row, tr))
            }
        }
    }
}

fn view_cell(row: &Row, spec: &FieldSpec) -> Markup {
    let entries = row
        .value(spec.name)
        .map(|v| v.display_entries(spec.display))
        .unwrap_or_default();

    html! {
        @if spec.is_repeating() {
            ul {
                @for entry in &entries {
                    li { (entry) }
                }
            }
        } @else {
            (entries.join(", "))
        }
    }
}

fn edit_cell(row: &Row, spec: &FieldSpec, tr: &dyn Translate) -> Markup {
    let current = row.value(spec.name).map(|v| v.entries()).unwrap_or_default();
    let original: Vec<String> = row
        .original_value(spec.name)
        .map(|v| {
            v.entries()
                .iter()
                .map(|e| display_text(e, spec.display))
                .collect()
        })
        .unwrap_or_default();
    let original_at = |i: usize| original.get(i).cloned().unwrap_or_default();

    match spec.origin {
        FieldOrigin::ServerAssigned => html! {
            input type="hidden" name=(spec.name) value=[row.server_id()];
            @match row.server_id() {
                Some(id) => { (id) }
                None => { "#" }
            }
        },
        FieldOrigin::ReadOnly => html! {
            (row.display(spec.name).unwrap_or_default())
        },
        FieldOrigin::Operator if spec.is_repeating() => html! {
            ul data-entries=(spec.name) {
                @for (i, entry) in current.iter().enumerate() {
                    li {
                        input
                            type=(spec.input_type.as_str())
                            name=(format!("{}-{}", spec.name, i))
                            value=(entry)
                            data-original-value=(original_at(i));
                        button type="button" data-action="remove-entry" data-field=(spec.name) data-index=(i) {
                            (text(tr, "admin.tables.remove_entry"))
                        }
                    }
                }
            }
            input
                type="hidden"
                name=(format!("{}-count", spec.name))
                value=(current.len())
                data-original-value=(row.original_count(spec.name));
            button type="button" data-action="add-entry" data-field=(spec.name) {
                (text(tr, "admin.tables.add_entry"))
            }
        },
        FieldOrigin::Operator => html! {
            input
                type=(spec.input_type.as_str())
                name=(spec.name)
                value=(current.first().map(String::as_str).unwrap_or_default())
                data-original-value=(original_at(0));
        },
    }
}

fn controls(row: &Row, tr: &dyn Translate) -> Markup {
    let busy = row.is_pending();

    if !row.kind().is_editable() {
        let mac = row.value("mac").and_then(|v| v.as_scalar()).unwrap_or_default();
        return html! {
            button type="button" data-action="deauth" data-mac=(mac) disabled[busy] {
                (text(tr, "admin.tables.deauth"))
            }
            button type="button" data-action="block" data-mac=(mac) disabled[busy] {
                (text(tr, "admin.tables.block"))
            }
        };
    }

    html! {
        @match row.state() {
            RowState::View => {
                button type="button" data-action="edit" disabled[busy] {
                    (text(tr, "admin.tables.edit"))
                }
            }
            RowState::Editing | RowState::NewUnsaved => {
                button type="button" data-action="save" disabled[busy] {
                    (text(tr, "admin.tables.save"))
                }
            }
        }
        button type="button" data-action="delete" disabled[busy] {
            (text(tr, "admin.tables.delete"))
        }
    }
}

/// Page bar; the current page is marked
pub fn render_pagination(current: u32, total: u32) -> Markup {
    html! {
        nav.pagination {
            @for button in page_buttons(current, total) {
                @match button {
                    PageButton::Page(page) => {
                        button.page.current[page == current] type="button" data-page=(page) {
                            (page)
                        }
                    }
                    PageButton::Ellipsis => {
                        span.ellipsis { "..." }
                    }
                }
            }
        }
    }
}

/// Caption, search box, rows, add-row control and page bar of one grid
pub fn render_table(grid: &GridState, tr: &dyn Translate) -> Markup {
    let schema = schema_for(grid.kind);

    html! {
        section.grid data-kind=(grid.kind.slug()) {
            h2 { (text(tr, grid.kind.title_key())) }
            input.search
                type="search"
                name="search"
                value=(grid.search_query)
                placeholder=(text(tr, "admin.tables.search"));
            table {
                thead {
                    tr {
                        @for spec in schema.fields {
                            th data-field=(spec.name) { (text(tr, spec.label_key)) }
                        }
                        th {}
                    }
                }
                tbody {
                    @for row in &grid.rows {
                        (render_row(row, schema, tr))
                    }
                }
            }
            @if grid.kind.is_editable() {
                button type="button" data-action="add-row" {
                    (text(tr, "admin.tables.add_row"))
                }
            }
            (render_pagination(grid.current_page, grid.total_pages()))
        }
    }
}
