//! `ControlTree` over the live browser DOM

use rusty_forms_dom::{ControlTree, ValidityState};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// The page's DOM, addressed through `web_sys::Element` handles
#[derive(Debug, Clone, Copy, Default)]
pub struct WebTree;

/// The three element types that carry constraint validation
enum Control<'a> {
    Input(&'a HtmlInputElement),
    TextArea(&'a HtmlTextAreaElement),
    Select(&'a HtmlSelectElement),
}

impl<'a> Control<'a> {
    fn of(element: &'a Element) -> Option<Self> {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            Some(Control::Input(input))
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            Some(Control::TextArea(area))
        } else {
            element.dyn_ref::<HtmlSelectElement>().map(Control::Select)
        }
    }

    fn value(&self) -> String {
        match self {
            Control::Input(e) => e.value(),
            Control::TextArea(e) => e.value(),
            Control::Select(e) => e.value(),
        }
    }

    fn validity(&self) -> web_sys::ValidityState {
        match self {
            Control::Input(e) => e.validity(),
            Control::TextArea(e) => e.validity(),
            Control::Select(e) => e.validity(),
        }
    }

    fn validation_message(&self) -> Option<String> {
        match self {
            Control::Input(e) => e.validation_message(),
            Control::TextArea(e) => e.validation_message(),
            Control::Select(e) => e.validation_message(),
        }
        .ok()
    }
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl ControlTree for WebTree {
    type Node = Element;

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        // only fails on invalid attribute names, which are all literals here
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn next_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn value(&self, node: &Element) -> String {
        Control::of(node).map(|c| c.value()).unwrap_or_default()
    }

    fn checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn validity(&self, node: &Element) -> Option<ValidityState> {
        let validity = Control::of(node)?.validity();
        Some(ValidityState {
            value_missing: validity.value_missing(),
            type_mismatch: validity.type_mismatch(),
            pattern_mismatch: validity.pattern_mismatch(),
            too_short: validity.too_short(),
            too_long: validity.too_long(),
            range_underflow: validity.range_underflow(),
            range_overflow: validity.range_overflow(),
            step_mismatch: validity.step_mismatch(),
            custom_error: validity.custom_error(),
        })
    }

    fn validation_message(&self, node: &Element) -> Option<String> {
        Control::of(node)?
            .validation_message()
            .filter(|message| !message.is_empty())
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn form_controls(&self, form: &Element) -> Vec<Element> {
        form.query_selector_all("input, textarea, select")
            .map(|list| collect_elements(&list))
            .unwrap_or_default()
    }

    fn label_for(&self, near: &Element, id: &str) -> Option<Element> {
        // compare attributes instead of building a selector, so ids need no escaping
        let labels = near
            .owner_document()?
            .query_selector_all("label[for]")
            .ok()?;
        collect_elements(&labels)
            .into_iter()
            .find(|label| label.get_attribute("for").as_deref() == Some(id))
    }
}
