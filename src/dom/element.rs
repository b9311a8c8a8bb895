// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Vaciar un contenedor (los listeners de los hijos se van con ellos)
pub fn clear(element: &Element) {
    element.set_inner_html("");
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// ¿El foco está en un elemento con esta clase?
pub fn has_focus(class: &str) -> bool {
    document()
        .and_then(|doc| doc.active_element())
        .map(|active| active.class_list().contains(class))
        .unwrap_or(false)
}

/// Devolver el foco al primer elemento con esta clase dentro de `root`
pub fn focus_first(root: &Element, class: &str) -> Result<(), JsValue> {
    if let Some(element) = root.query_selector(&format!(".{}", class))? {
        if let Ok(element) = element.dyn_into::<HtmlElement>() {
            element.focus()?;
        }
    }
    Ok(())
}
