use slotmap::new_key_type;

new_key_type! {
    /// Opaque identity of an element in the view layer's tree.
    ///
    /// The engine never owns elements; it holds these handles and compares
    /// them for equality.
    pub struct ElementId;
}
