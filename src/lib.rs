//! Deterministic in-memory page DOM for Rust tests.
//!
//! The crate models a single page: a [`Document`] tree parsed from HTML
//! markup, a set of DOM utility operations written against the [`DomHost`]
//! capability trait, and a [`Page`] harness that stores event listeners and
//! dispatches synthetic events the way a browser would (capture, target,
//! bubble), without any real browser or script engine.
//!
//! The utility operations never raise. The only recoverable condition,
//! target-not-found, is reported through the host's diagnostic hook and the
//! operation leaves the document untouched. Harness-level calls (parsing,
//! dispatching at a missing id, assertions) return [`Error`] instead, since
//! the harness is test infrastructure rather than page behavior.
//!
//! ```
//! use page_dom::{wire_page, Page};
//!
//! # fn main() -> page_dom::Result<()> {
//! let mut page = Page::from_html(
//!     r#"
//!     <button id='simulate-click'>Simulate Click</button>
//!     <div id='dynamic-content'></div>
//!     "#,
//! )?;
//! let wiring = wire_page(&mut page);
//! page.click("simulate-click")?;
//! page.assert_text("dynamic-content", "Button Clicked!")?;
//! wiring.dispose(&mut page);
//! # Ok(())
//! # }
//! ```

use std::error::Error as StdError;
use std::fmt;

mod dom;
mod host;
mod html;
mod page;
pub mod utils;

pub use dom::{Document, NodeId};
pub use host::DomHost;
pub use page::{
    CLICK_MESSAGE, DYNAMIC_CONTENT_ID, EventState, ListenerHandle, Page, PageWiring,
    SIMULATE_CLICK_ID, USER_FORM_ID, wire_page,
};
pub use utils::{
    EMPTY_INPUT_MESSAGE, ERROR_MESSAGE_ID, HIDDEN_CLASS, USER_INPUT_ID, add_element_to_dom,
    create_element, handle_form_submit, remove_element_from_dom, simulate_click,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    TargetNotFound(String),
    NotAnElement(String),
    AssertionFailed {
        target: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::TargetNotFound(id) => write!(f, "target not found: {id}"),
            Self::NotAnElement(msg) => write!(f, "not an element: {msg}"),
            Self::AssertionFailed {
                target,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {target}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}
