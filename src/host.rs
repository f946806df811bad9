/// Capability surface the DOM utility operations are written against.
///
/// The operations in [`crate::utils`] never touch a concrete document type;
/// they see only this trait, so any host — the crate's own [`Document`],
/// or a hand-rolled fake in a test — can back them. All methods are
/// infallible by design: the utilities recover from every condition locally,
/// reporting missing targets through [`missing_target`] instead of raising.
///
/// [`Document`]: crate::Document
/// [`missing_target`]: DomHost::missing_target
pub trait DomHost {
    /// Opaque node handle. Handles are only ever obtained from [`lookup`]
    /// or [`create`] on the same host.
    ///
    /// [`lookup`]: DomHost::lookup
    /// [`create`]: DomHost::create
    type Handle: Copy;

    /// Document-wide lookup by id.
    fn lookup(&self, id: &str) -> Option<Self::Handle>;

    /// Creates a new element of the given tag, attached to no tree.
    fn create(&mut self, tag: &str) -> Self::Handle;

    fn set_attribute(&mut self, node: Self::Handle, name: &str, value: &str);

    /// Replaces the node's text content. Plain text, never parsed as markup.
    fn set_text(&mut self, node: Self::Handle, text: &str);

    /// Detaches the node from its tree.
    fn detach(&mut self, node: Self::Handle);

    /// Current value of an input-like element.
    fn input_value(&self, node: Self::Handle) -> String;

    fn add_class(&mut self, node: Self::Handle, class: &str);

    fn remove_class(&mut self, node: Self::Handle, class: &str);

    /// Diagnostic hook for an operation whose target id did not resolve.
    /// The default logs at error level, mirroring a console error.
    fn missing_target(&mut self, operation: &str, id: &str) {
        log::error!("{operation}: element with id {id} not found");
    }
}
