//! Merges docgen output with the extracted template metadata.

use serde_json::Value;
use twigdoc_core::{
    ComponentDoc, Descriptor, DescriptorSet, Fragment, MergedComponentMetadata, SlotDescriptor,
};

/// Keep the descriptors matching `keep`.
///
/// List-shaped sets stay lists, map-shaped sets stay maps and a missing set
/// stays missing.
pub fn filter_descriptors<F>(descriptors: Option<DescriptorSet>, keep: F) -> Option<DescriptorSet>
where
    F: FnMut(&Descriptor) -> bool,
{
    descriptors.map(|mut set| {
        set.retain(keep);
        set
    })
}

/// The `{name, default}` descriptor merged into docgen slots for an extracted slot.
pub fn slot_descriptor(slot: &SlotDescriptor) -> Descriptor {
    Descriptor::named(slot.name.clone()).with_field("default", Value::Bool(slot.is_default))
}

/// Merge one docgen record with the template's fragments and slots.
///
/// Ignored props, events and slots are dropped. Extracted slots are appended
/// after the slots docgen reported.
pub fn merge_component(
    mut doc: ComponentDoc,
    fragments: &[Fragment],
    slots: &[SlotDescriptor],
) -> MergedComponentMetadata {
    let mut merged_slots = doc.slots.take().unwrap_or_default();
    for slot in slots {
        merged_slots.push(slot_descriptor(slot));
    }

    doc.props = filter_descriptors(doc.props.take(), |d| !d.is_ignored());
    doc.events = filter_descriptors(doc.events.take(), |d| !d.is_ignored());
    doc.slots = filter_descriptors(Some(merged_slots), |d| !d.is_ignored());

    MergedComponentMetadata {
        doc,
        twig_blocks: fragments.to_vec(),
    }
}

/// Merge every docgen record of a module.
pub fn merge_all(
    docs: Vec<ComponentDoc>,
    fragments: &[Fragment],
    slots: &[SlotDescriptor],
) -> Vec<MergedComponentMetadata> {
    docs.into_iter()
        .map(|doc| merge_component(doc, fragments, slots))
        .collect()
}
