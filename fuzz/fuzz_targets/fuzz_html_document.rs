//! Fuzz target for the section-based document builder.
//!
//! Applies an arbitrary sequence of appends (valid and invalid section
//! names) and checks that serialization is stable and that rejected appends
//! leave the document unchanged.

#![no_main]

use arbitrary::Arbitrary;
use gr_report::{HtmlDocument, Section};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    title: String,
    appends: Vec<(String, Vec<String>)>,
}

fuzz_target!(|input: Input| {
    let mut doc = HtmlDocument::new(input.title);
    for (section, fragments) in input.appends {
        let before: Vec<usize> = Section::ALL.iter().map(|s| doc.fragments(*s).len()).collect();
        if doc.append_to(&section, fragments).is_err() {
            let after: Vec<usize> = Section::ALL.iter().map(|s| doc.fragments(*s).len()).collect();
            assert_eq!(before, after, "rejected append must not mutate");
        }
    }
    assert_eq!(doc.serialize(), doc.serialize());
});
