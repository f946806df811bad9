use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::{Document, NodeId};
use crate::html::parse_html;
use crate::utils;
use crate::{Error, Result};

/// Fixed id of the button wired by [`wire_page`].
pub const SIMULATE_CLICK_ID: &str = "simulate-click";
/// Fixed id of the form wired by [`wire_page`].
pub const USER_FORM_ID: &str = "user-form";
/// Fixed id of the element both wired handlers write into.
pub const DYNAMIC_CONTENT_ID: &str = "dynamic-content";
/// Text the wired click handler writes.
pub const CLICK_MESSAGE: &str = "Button Clicked!";

type Handler = Rc<dyn Fn(&mut Page, &mut EventState)>;

/// Mutable state of one synthetic event as it travels the dispatch path.
#[derive(Debug, Clone)]
pub struct EventState {
    event_type: String,
    target: NodeId,
    current_target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl EventState {
    fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    /// Suppresses the event's default action. For submit events this is the
    /// recorded navigation.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}

struct Listener {
    id: u64,
    capture: bool,
    handler: Handler,
}

#[derive(Default)]
struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    fn add(&mut self, node_id: NodeId, event: String, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(listener);
    }

    fn remove(&mut self, node_id: NodeId, event: &str, listener_id: u64) -> bool {
        let Some(events) = self.map.get_mut(&node_id) else {
            return false;
        };
        let Some(listeners) = events.get_mut(event) else {
            return false;
        };

        if let Some(pos) = listeners
            .iter()
            .position(|listener| listener.id == listener_id)
        {
            listeners.remove(pos);
            if listeners.is_empty() {
                events.remove(event);
            }
            if events.is_empty() {
                self.map.remove(&node_id);
            }
            return true;
        }

        false
    }

    fn get(&self, node_id: NodeId, event: &str, capture: bool) -> Vec<Handler> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .map(|listener| Rc::clone(&listener.handler))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Disposer for one attached listener. Returned by
/// [`Page::add_listener`]; detach with [`Page::remove_listener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerHandle {
    node: NodeId,
    event: String,
    listener_id: u64,
}

/// A single in-memory page: document tree, event listeners, and the
/// navigations its forms would have performed.
///
/// Dispatch is synchronous and single-threaded; each event runs to
/// completion before the next, exactly like the host environment the page
/// models.
pub struct Page {
    dom: Document,
    listeners: ListenerStore,
    next_listener_id: u64,
    navigations: Vec<String>,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            dom: parse_html(html)?,
            listeners: ListenerStore::default(),
            next_listener_id: 1,
            navigations: Vec::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.dom
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.dom
    }

    fn require(&self, id: &str) -> Result<NodeId> {
        self.dom
            .by_id(id)
            .ok_or_else(|| Error::TargetNotFound(id.to_string()))
    }

    /// Attaches a bubble-phase listener to the element with the given id.
    pub fn add_listener<F>(&mut self, id: &str, event: &str, handler: F) -> Result<ListenerHandle>
    where
        F: Fn(&mut Page, &mut EventState) + 'static,
    {
        self.attach(id, event, false, Rc::new(handler))
    }

    /// Attaches a capture-phase listener to the element with the given id.
    pub fn add_capture_listener<F>(
        &mut self,
        id: &str,
        event: &str,
        handler: F,
    ) -> Result<ListenerHandle>
    where
        F: Fn(&mut Page, &mut EventState) + 'static,
    {
        self.attach(id, event, true, Rc::new(handler))
    }

    fn attach(
        &mut self,
        id: &str,
        event: &str,
        capture: bool,
        handler: Handler,
    ) -> Result<ListenerHandle> {
        let node = self.require(id)?;
        let listener_id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.add(
            node,
            event.to_string(),
            Listener {
                id: listener_id,
                capture,
                handler,
            },
        );
        Ok(ListenerHandle {
            node,
            event: event.to_string(),
            listener_id,
        })
    }

    /// Detaches a listener. Returns false when the handle was already
    /// disposed.
    pub fn remove_listener(&mut self, handle: &ListenerHandle) -> bool {
        self.listeners
            .remove(handle.node, &handle.event, handle.listener_id)
    }

    /// Dispatches a click event at the element with the given id.
    pub fn click(&mut self, id: &str) -> Result<EventState> {
        let target = self.require(id)?;
        self.dispatch_event(target, "click")
    }

    /// Dispatches a submit event at the element with the given id. When no
    /// listener prevents the default action, the would-be navigation is
    /// recorded (see [`navigations`](Self::navigations)).
    pub fn submit(&mut self, id: &str) -> Result<EventState> {
        self.dispatch(id, "submit")
    }

    /// Dispatches an arbitrary event type at the element with the given id.
    pub fn dispatch(&mut self, id: &str, event: &str) -> Result<EventState> {
        let target = self.require(id)?;
        self.dispatch_event(target, event)
    }

    /// Sets an input-like element's value, then dispatches an input event.
    pub fn type_text(&mut self, id: &str, text: &str) -> Result<()> {
        let target = self.require(id)?;
        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")?;
        Ok(())
    }

    fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);

        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }
        path.reverse();

        'phases: {
            // Capture phase.
            if path.len() >= 2 {
                for node in &path[..path.len() - 1] {
                    event.current_target = *node;
                    self.invoke_listeners(*node, &mut event, true);
                    if event.propagation_stopped {
                        break 'phases;
                    }
                }
            }

            // Target phase: capture listeners first, then bubble listeners.
            event.current_target = target;
            self.invoke_listeners(target, &mut event, true);
            if event.propagation_stopped {
                break 'phases;
            }
            self.invoke_listeners(target, &mut event, false);
            if event.propagation_stopped {
                break 'phases;
            }

            // Bubble phase.
            if path.len() >= 2 {
                for node in path[..path.len() - 1].iter().rev() {
                    event.current_target = *node;
                    self.invoke_listeners(*node, &mut event, false);
                    if event.propagation_stopped {
                        break 'phases;
                    }
                }
            }
        }

        self.run_default_action(&event);
        Ok(event)
    }

    fn invoke_listeners(&mut self, node_id: NodeId, event: &mut EventState, capture: bool) {
        // Snapshot before invoking so handlers may mutate the store freely.
        let handlers = self.listeners.get(node_id, &event.event_type, capture);
        for handler in handlers {
            handler(self, event);
            if event.immediate_propagation_stopped {
                break;
            }
        }
    }

    fn run_default_action(&mut self, event: &EventState) {
        if event.event_type != "submit" || event.default_prevented {
            return;
        }
        let is_form = self
            .dom
            .tag_name(event.target)
            .map(|tag| tag.eq_ignore_ascii_case("form"))
            .unwrap_or(false);
        if is_form {
            let action = self.dom.attr(event.target, "action").unwrap_or_default();
            log::debug!("submit default action: navigating to '{action}'");
            self.navigations.push(action);
        }
    }

    /// Navigations performed by unprevented submit default actions, in
    /// order: each entry is the form's `action` attribute (empty when
    /// unset).
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn text(&self, id: &str) -> Result<String> {
        let target = self.require(id)?;
        Ok(self.dom.text_content(target))
    }

    pub fn has_class(&self, id: &str, class: &str) -> Result<bool> {
        let target = self.require(id)?;
        self.dom.class_contains(target, class)
    }

    pub fn assert_exists(&self, id: &str) -> Result<()> {
        self.require(id).map(|_| ())
    }

    pub fn assert_text(&self, id: &str, expected: &str) -> Result<()> {
        let target = self.require(id)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                target: id.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.dom.dump_node(target),
            });
        }
        Ok(())
    }

    pub fn dump_dom(&self) -> String {
        self.dom.dump()
    }

    /// Drains the diagnostics recorded by the utility operations against
    /// this page's document.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        self.dom.take_diagnostics()
    }
}

/// Disposer handles returned by [`wire_page`].
#[derive(Debug, Default)]
pub struct PageWiring {
    handles: Vec<ListenerHandle>,
}

impl PageWiring {
    pub fn handles(&self) -> &[ListenerHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Detaches every listener this wiring attached. Returns how many were
    /// actually removed.
    pub fn dispose(self, page: &mut Page) -> usize {
        self.handles
            .iter()
            .filter(|handle| page.remove_listener(handle))
            .count()
    }
}

/// Wires the page's two standard handlers and returns their disposers.
///
/// When a `simulate-click` element exists, a click on it writes
/// [`CLICK_MESSAGE`] into `dynamic-content`. When a `user-form` element
/// exists, its submit handler suppresses the default action and runs
/// [`utils::handle_form_submit`]. Absent targets are skipped without a
/// diagnostic.
pub fn wire_page(page: &mut Page) -> PageWiring {
    let mut wiring = PageWiring::default();

    match page.add_listener(SIMULATE_CLICK_ID, "click", |page, _event| {
        utils::simulate_click(page.document_mut(), DYNAMIC_CONTENT_ID, CLICK_MESSAGE);
    }) {
        Ok(handle) => wiring.handles.push(handle),
        Err(_) => log::debug!("wire_page: no {SIMULATE_CLICK_ID} element, click wiring skipped"),
    }

    match page.add_listener(USER_FORM_ID, "submit", |page, event| {
        event.prevent_default();
        utils::handle_form_submit(page.document_mut(), USER_FORM_ID, DYNAMIC_CONTENT_ID);
    }) {
        Ok(handle) => wiring.handles.push(handle),
        Err(_) => log::debug!("wire_page: no {USER_FORM_ID} element, submit wiring skipped"),
    }

    wiring
}
