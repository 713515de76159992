//! Fuzz target for library snapshot loading.
//!
//! Builds a store from arbitrary JSON and walks every item through the
//! synchronous store accessors. Invalid snapshots must be rejected with an
//! error, never a panic.

#![no_main]

use gr_common::{ItemStore, SnapshotStore};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(store) = SnapshotStore::from_json(text) else {
        return;
    };
    for id in store.ids() {
        let _ = store.is_top_level(id);
        let _ = store.display_title(id);
        let _ = store.creators(id);
        if let Ok(notes) = store.note_ids(id) {
            for note in notes {
                let _ = store.note_body(note);
            }
        }
        if let Ok(attachments) = store.attachment_ids(id) {
            for attachment in attachments {
                let _ = store.attachment_display_title(attachment);
            }
        }
    }
});
