//! The utility operations against a hand-rolled host, proving they depend
//! only on the `DomHost` capabilities.

use std::collections::HashMap;

use crate::host::DomHost;
use crate::utils::{
    EMPTY_INPUT_MESSAGE, ERROR_MESSAGE_ID, HIDDEN_CLASS, USER_INPUT_ID, add_element_to_dom,
    create_element, handle_form_submit, remove_element_from_dom, simulate_click,
};

#[derive(Debug, Default)]
struct FakeNode {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    value: String,
    classes: Vec<String>,
    attached: bool,
}

#[derive(Debug, Default)]
struct FakeHost {
    nodes: Vec<FakeNode>,
    missing: Vec<(String, String)>,
}

impl FakeHost {
    fn insert(&mut self, id: &str, tag: &str) -> usize {
        let mut node = FakeNode {
            tag: tag.to_string(),
            attached: true,
            ..FakeNode::default()
        };
        node.attrs.insert("id".to_string(), id.to_string());
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

impl DomHost for FakeHost {
    type Handle = usize;

    fn lookup(&self, id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.attached && node.attrs.get("id").is_some_and(|v| v == id))
    }

    fn create(&mut self, tag: &str) -> usize {
        self.nodes.push(FakeNode {
            tag: tag.to_string(),
            ..FakeNode::default()
        });
        self.nodes.len() - 1
    }

    fn set_attribute(&mut self, node: usize, name: &str, value: &str) {
        self.nodes[node]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn set_text(&mut self, node: usize, text: &str) {
        self.nodes[node].text = text.to_string();
    }

    fn detach(&mut self, node: usize) {
        self.nodes[node].attached = false;
    }

    fn input_value(&self, node: usize) -> String {
        self.nodes[node].value.clone()
    }

    fn add_class(&mut self, node: usize, class: &str) {
        let classes = &mut self.nodes[node].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: usize, class: &str) {
        self.nodes[node].classes.retain(|c| c != class);
    }

    fn missing_target(&mut self, operation: &str, id: &str) {
        self.missing.push((operation.to_string(), id.to_string()));
    }
}

#[test]
fn utilities_run_against_any_host() {
    let mut host = FakeHost::default();
    let target = host.insert("dynamic-content", "div");

    add_element_to_dom(&mut host, "dynamic-content", "hello");
    assert_eq!(host.nodes[target].text, "hello");

    simulate_click(&mut host, "dynamic-content", "clicked");
    assert_eq!(host.nodes[target].text, "clicked");

    let created = create_element(&mut host, "span", &[("id", "made"), ("role", "note")]);
    assert_eq!(host.nodes[created].tag, "span");
    assert_eq!(host.nodes[created].attrs.get("role").map(String::as_str), Some("note"));
    // Created detached: no id lookup until the host attaches it.
    assert!(host.lookup("made").is_none());

    remove_element_from_dom(&mut host, "dynamic-content");
    assert!(host.lookup("dynamic-content").is_none());
    assert!(host.missing.is_empty());
}

#[test]
fn missing_targets_reach_the_diagnostic_hook() {
    let mut host = FakeHost::default();

    add_element_to_dom(&mut host, "ghost", "ignored");
    remove_element_from_dom(&mut host, "phantom");

    assert_eq!(
        host.missing,
        [
            ("add_element_to_dom".to_string(), "ghost".to_string()),
            ("remove_element_from_dom".to_string(), "phantom".to_string()),
        ]
    );
}

#[test]
fn form_submit_validation_works_on_the_fake_host() {
    let mut host = FakeHost::default();
    let target = host.insert("dynamic-content", "div");
    let input = host.insert(USER_INPUT_ID, "input");
    let error = host.insert(ERROR_MESSAGE_ID, "div");
    host.add_class(error, HIDDEN_CLASS);

    host.nodes[input].value = "   ".to_string();
    handle_form_submit(&mut host, "user-form", "dynamic-content");
    assert_eq!(host.nodes[error].text, EMPTY_INPUT_MESSAGE);
    assert!(!host.nodes[error].classes.iter().any(|c| c == HIDDEN_CLASS));
    assert_eq!(host.nodes[target].text, "");

    host.nodes[input].value = "fine".to_string();
    handle_form_submit(&mut host, "user-form", "dynamic-content");
    assert!(host.nodes[error].classes.iter().any(|c| c == HIDDEN_CLASS));
    assert_eq!(host.nodes[target].text, "fine");
}
