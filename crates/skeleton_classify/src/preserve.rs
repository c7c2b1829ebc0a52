//! Style subsets carried from a measured element onto its blueprint node.

use skeleton_core::{PreservedStyles, StyleSnapshot};

fn keep(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Flex/grid item placement, shared by leaves and containers.
fn item_placement(style: &StyleSnapshot) -> PreservedStyles {
    PreservedStyles {
        margin: keep(&style.margin),
        flex: keep(&style.flex),
        flex_grow: keep(&style.flex_grow),
        flex_shrink: keep(&style.flex_shrink),
        flex_basis: keep(&style.flex_basis),
        align_self: keep(&style.align_self),
        justify_self: keep(&style.justify_self),
        grid_column: keep(&style.grid_column),
        grid_row: keep(&style.grid_row),
        grid_area: keep(&style.grid_area),
        ..PreservedStyles::default()
    }
}

/// Enough to place a placeholder leaf where the element sat. `display`
/// tells inline-flow leaves apart from block-flow ones.
pub fn leaf(style: &StyleSnapshot) -> PreservedStyles {
    PreservedStyles {
        display: keep(&style.display),
        padding: keep(&style.padding),
        line_height: keep(&style.line_height),
        vertical_align: keep(&style.vertical_align),
        ..item_placement(style)
    }
}

/// Layout context a container re-establishes for its children.
pub fn container(style: &StyleSnapshot) -> PreservedStyles {
    PreservedStyles {
        display: keep(&style.display),
        padding: keep(&style.padding),
        border: keep(&style.border),
        box_sizing: keep(&style.box_sizing),
        flex_direction: keep(&style.flex_direction),
        justify_content: keep(&style.justify_content),
        align_items: keep(&style.align_items),
        min_height: keep(&style.min_height),
        grid_template_columns: keep(&style.grid_template_columns),
        grid_template_rows: keep(&style.grid_template_rows),
        ..item_placement(style)
    }
}

/// `table`, row groups and rows.
pub fn table(style: &StyleSnapshot) -> PreservedStyles {
    PreservedStyles {
        width: keep(&style.width),
        margin: keep(&style.margin),
        border: keep(&style.border),
        border_bottom: keep(&style.border_bottom),
        background_color: keep(&style.background_color),
        border_collapse: keep(&style.border_collapse),
        table_layout: keep(&style.table_layout),
        ..PreservedStyles::default()
    }
}

/// `th` and `td`.
pub fn cell(style: &StyleSnapshot) -> PreservedStyles {
    PreservedStyles {
        padding: keep(&style.padding),
        border: keep(&style.border),
        border_bottom: keep(&style.border_bottom),
        background_color: keep(&style.background_color),
        text_align: keep(&style.text_align),
        vertical_align: keep(&style.vertical_align),
        width: keep(&style.width),
        ..PreservedStyles::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if empty values are carried or placement is lost.
    #[test]
    fn leaf_keeps_item_placement() {
        let style = StyleSnapshot {
            flex: "1 1 0%".to_owned(),
            grid_column: " 2 / 4 ".to_owned(),
            margin: String::new(),
            ..StyleSnapshot::default()
        };
        let preserved = leaf(&style);
        assert_eq!(preserved.flex.as_deref(), Some("1 1 0%"));
        assert_eq!(preserved.grid_column.as_deref(), Some("2 / 4"));
        assert_eq!(preserved.margin, None);
        assert_eq!(preserved.display.as_deref(), Some("block"));
        assert_eq!(preserved.border_collapse, None);
    }

    /// # Panics
    /// Panics if table or cell subsets leak unrelated properties.
    #[test]
    fn table_subsets_are_disjoint_from_flex() {
        let style = StyleSnapshot {
            flex: "1".to_owned(),
            border_collapse: "collapse".to_owned(),
            text_align: "right".to_owned(),
            ..StyleSnapshot::default()
        };
        assert_eq!(table(&style).border_collapse.as_deref(), Some("collapse"));
        assert_eq!(table(&style).flex, None);
        assert_eq!(cell(&style).text_align.as_deref(), Some("right"));
        assert_eq!(cell(&style).border_collapse, None);
    }
}
