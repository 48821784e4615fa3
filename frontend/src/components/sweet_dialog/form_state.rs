//! Signal-backed state for the add/edit sweet form.

use leptos::prelude::*;
use sweetshop_shared::validate::parse_sweet_form;
use sweetshop_shared::{Sweet, SweetRequest};

/// One `RwSignal` per field, kept as raw strings until submit so the user
/// can type freely. `editing` carries the id of the sweet being edited, or
/// `None` in add mode.
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub category: RwSignal<String>,
    pub price: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub editing: RwSignal<Option<u64>>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
            editing: RwSignal::new(None),
        }
    }

    /// Blank form in add mode.
    pub fn reset(&self) {
        self.name.set(String::new());
        self.category.set(String::new());
        self.price.set(String::new());
        self.quantity.set(String::new());
        self.editing.set(None);
    }

    /// Pre-fills the form from an existing sweet and enters edit mode.
    pub fn load(&self, sweet: &Sweet) {
        self.name.set(sweet.name.clone());
        self.category.set(sweet.category.clone());
        self.price.set(format!("{:.2}", sweet.price));
        self.quantity.set(sweet.quantity.to_string());
        self.editing.set(Some(sweet.id));
    }

    /// Validates the current field values into a wire payload.
    pub fn parse(&self) -> Result<SweetRequest, String> {
        parse_sweet_form(
            &self.name.get_untracked(),
            &self.category.get_untracked(),
            &self.price.get_untracked(),
            &self.quantity.get_untracked(),
        )
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
