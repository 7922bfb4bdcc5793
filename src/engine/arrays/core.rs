//! Core Arrays
//!
//! What each index is and where it hangs in the tree.

use crate::types::ComponentType;

slot_arrays! {
    COMPONENT_TYPE: ComponentType = ComponentType::None => get_component_type, set_component_type;
    /// Parent component index (None for a root).
    PARENT_INDEX: Option<usize> = None => get_parent_index, set_parent_index;
}
