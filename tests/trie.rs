use typeshape::unicode::{UnicodeTrie, UnicodeTrieBuilder};

#[test]
fn set_range_scenario() {
    let mut builder = UnicodeTrieBuilder::new(10, 666);
    builder.set_range(13, 6665, 7788, false);
    builder.set_range(6000, 6999, 9900, true);
    let trie = builder.freeze();

    assert_eq!(trie.get(12), 10);
    assert_eq!(trie.get(13), 7788);
    assert_eq!(trie.get(5999), 7788);
    assert_eq!(trie.get(6000), 9900);
    assert_eq!(trie.get(7000), 10);
    assert_eq!(trie.get(0x110000), 666);
}

#[test]
fn every_codepoint_of_a_range_reads_back() {
    let mut builder = UnicodeTrieBuilder::new(0, u32::MAX);
    builder.set_range(0x0590, 0x05FF, 7, true);
    builder.set_range(0x2_0000, 0x2_00FF, 9, true);
    let trie = builder.freeze();

    for cp in 0x0590..=0x05FF {
        assert_eq!(trie.get(cp), 7);
    }
    for cp in 0x2_0000..=0x2_00FF {
        assert_eq!(trie.get(cp), 9);
    }
    assert_eq!(trie.get(0x058F), 0);
    assert_eq!(trie.get(0x0600), 0);
    assert_eq!(trie.get(0x2_0100), 0);
}

#[test]
fn surrogates_read_as_the_error_value() {
    let trie = UnicodeTrieBuilder::new(1, 42).freeze();
    for cp in [0xD800u32, 0xDBFF, 0xDC00, 0xDFFF] {
        assert_eq!(trie.get(cp), 42);
    }
    assert_eq!(trie.get(0xD7FF), 1);
    assert_eq!(trie.get(0xE000), 1);
}

#[test]
fn serialized_form_round_trips() {
    let mut builder = UnicodeTrieBuilder::new(3, 17);
    builder.set_range(0x41, 0x5A, 1, true);
    builder.set_range(0x0600, 0x06FF, 2, true);
    builder.set_range(0x1F600, 0x1F64F, 4, true);
    let trie = builder.freeze();

    let serialized = trie.serialize();
    // The magic header spells 'Trie'.
    assert_eq!(&serialized[0..4], b"Trie");

    let restored = UnicodeTrie::deserialize(&serialized).unwrap();
    for cp in (0u32..0x110000).step_by(7) {
        assert_eq!(restored.get(cp), trie.get(cp), "at U+{:04X}", cp);
    }
    // A second serialization is byte-identical.
    assert_eq!(restored.serialize(), serialized);
}

#[test]
fn truncated_data_is_rejected() {
    let serialized = UnicodeTrieBuilder::new(0, 0).freeze().serialize();
    assert!(UnicodeTrie::deserialize(&serialized[..serialized.len() - 3]).is_none());
}
