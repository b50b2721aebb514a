use crate::controller::PLACEHOLDER_LABEL;
use crate::numerales;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum Pane {
    Numerales,
    Carpetas,
}

/// One row of the parent list. `value == None` is the empty choice.
#[derive(Debug, Clone)]
pub struct ParentItem {
    pub value: Option<u32>,
    pub label: String,
}

/// Empty choice first, then the 29 numerales.
pub fn parent_items() -> Vec<ParentItem> {
    let mut items = vec![ParentItem {
        value: None,
        label: PLACEHOLDER_LABEL.to_string(),
    }];
    for numeral in numerales::all() {
        items.push(ParentItem {
            value: Some(numeral.codigo),
            label: numeral.etiqueta,
        });
    }
    items
}
