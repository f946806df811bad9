//! DOM utility operations.
//!
//! Every operation is generic over [`DomHost`] and never raises: the single
//! recoverable condition, target-not-found, goes to the host's diagnostic
//! hook and the document is left untouched. Validation failures in
//! [`handle_form_submit`] surface as in-page text instead.

use crate::host::DomHost;

/// Fixed id of the form input read by [`handle_form_submit`].
pub const USER_INPUT_ID: &str = "user-input";
/// Fixed id of the error-display element toggled by [`handle_form_submit`].
pub const ERROR_MESSAGE_ID: &str = "error-message";
/// Marker class whose presence conventionally hides an element. Toggled,
/// never interpreted; the visual effect belongs to the host's styling.
pub const HIDDEN_CLASS: &str = "hidden";
/// Validation message shown when the trimmed input is empty.
pub const EMPTY_INPUT_MESSAGE: &str = "Input cannot be empty";

/// Creates a detached element of the given tag with every attribute applied.
///
/// The returned handle belongs to no tree yet. Unknown tags are fine; the
/// host decides what an unrecognized element means.
pub fn create_element<H: DomHost>(
    host: &mut H,
    tag: &str,
    attributes: &[(&str, &str)],
) -> H::Handle {
    let node = host.create(tag);
    for (name, value) in attributes {
        host.set_attribute(node, name, value);
    }
    node
}

/// Replaces the text content of the element with id `target_id`.
///
/// Plain text: `content` is never parsed as markup. A missing target is
/// reported through the diagnostic hook and nothing is mutated.
pub fn add_element_to_dom<H: DomHost>(host: &mut H, target_id: &str, content: &str) {
    match host.lookup(target_id) {
        Some(node) => host.set_text(node, content),
        None => host.missing_target("add_element_to_dom", target_id),
    }
}

/// Detaches the element with the given id from the tree.
///
/// A missing target is reported through the diagnostic hook and nothing is
/// mutated.
pub fn remove_element_from_dom<H: DomHost>(host: &mut H, id: &str) {
    match host.lookup(id) {
        Some(node) => host.detach(node),
        None => host.missing_target("remove_element_from_dom", id),
    }
}

/// Names the "button produces text" behavior for direct invocation, e.g.
/// from a test, without dispatching a real event. Observationally equivalent
/// to [`add_element_to_dom`].
pub fn simulate_click<H: DomHost>(host: &mut H, target_id: &str, message: &str) {
    add_element_to_dom(host, target_id, message);
}

/// Validates and applies a form submission.
///
/// If the input's trimmed value is empty, the error element's text becomes
/// [`EMPTY_INPUT_MESSAGE`], its [`HIDDEN_CLASS`] marker is removed, and the
/// target is left untouched. Otherwise the error element (when present) is
/// re-hidden and the input's raw, untrimmed value is written to `target_id`.
///
/// The input and error elements resolve by their fixed document-wide ids
/// ([`USER_INPUT_ID`], [`ERROR_MESSAGE_ID`]); `form_id` is looked up but the
/// result is otherwise unused. Missing elements never raise: they are
/// reported through the diagnostic hook and their mutation is skipped.
pub fn handle_form_submit<H: DomHost>(host: &mut H, form_id: &str, target_id: &str) {
    // Presence check only; input and error elements are not scoped to it.
    let _ = host.lookup(form_id);
    let input = host.lookup(USER_INPUT_ID);
    let error = host.lookup(ERROR_MESSAGE_ID);

    if let Some(input) = input {
        if host.input_value(input).trim().is_empty() {
            match error {
                Some(error) => {
                    host.set_text(error, EMPTY_INPUT_MESSAGE);
                    host.remove_class(error, HIDDEN_CLASS);
                }
                None => host.missing_target("handle_form_submit", ERROR_MESSAGE_ID),
            }
            return;
        }
    }

    if let Some(error) = error {
        host.add_class(error, HIDDEN_CLASS);
    }

    match input {
        Some(input) => {
            let value = host.input_value(input);
            add_element_to_dom(host, target_id, &value);
        }
        None => host.missing_target("handle_form_submit", USER_INPUT_ID),
    }
}
