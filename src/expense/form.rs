use maud::{Markup, html};

use crate::html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE};

/// The values shown in the expense form fields.
///
/// `id_prefix` keeps the element IDs unique when the add form and the edit
/// form are on the same page.
pub struct ExpenseFormDefaults<'a> {
    pub id_prefix: &'a str,
    pub amount: Option<f64>,
    pub category: Option<&'a str>,
    pub note: Option<&'a str>,
    pub autofocus_amount: bool,
}

pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| amount.to_string());
    let amount_id = format!("{}-amount", defaults.id_prefix);
    let category_id = format!("{}-category", defaults.id_prefix);
    let note_id = format!("{}-note", defaults.id_prefix);

    html! {
        div
        {
            label
                for=(amount_id)
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id=(amount_id)
                type="number"
                step="any"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                autofocus[defaults.autofocus_amount]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for=(category_id)
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            input
                name="category"
                id=(category_id)
                type="text"
                placeholder="Category (e.g., Food)"
                required
                value=[defaults.category]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for=(note_id)
                class=(FORM_LABEL_STYLE)
            {
                "Note"
            }

            input
                name="note"
                id=(note_id)
                type="text"
                placeholder="Note (optional)"
                value=[defaults.note]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
