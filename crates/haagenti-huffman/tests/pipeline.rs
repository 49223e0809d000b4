//! End-to-end tests for the encode and decode pipelines.

use haagenti_huffman::bits::{pack, unpack};
use haagenti_huffman::{
    tree_codec, CodeTable, Decoder, Encoder, Error, FrequencyTable, HuffmanCodec, HuffmanTree,
};

/// Frequencies a:45 b:13 c:12 d:16 e:9 f:5 from the textbook example.
fn classic_input() -> Vec<char> {
    [('a', 45), ('b', 13), ('c', 12), ('d', 16), ('e', 9), ('f', 5)]
        .iter()
        .flat_map(|&(symbol, count)| std::iter::repeat(symbol).take(count))
        .collect()
}

#[test]
fn test_classic_distribution_cost() {
    let input = classic_input();
    let codec = HuffmanCodec::new();
    let encoded = codec.encode(&input).unwrap();

    assert_eq!(encoded.bit_count, 224);
    assert_eq!(encoded.payload.len(), 28);
    assert_eq!(encoded.stats.padding_bits(), 0);

    // 224 bits fill whole bytes, so the raw decode is exact
    let decoded = codec.decode(&encoded.payload, &encoded.tree).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn test_staged_pipeline_matches_codec() {
    let input: Vec<char> = "it was the best of times, it was the worst of times\n"
        .chars()
        .collect();

    let frequencies = FrequencyTable::analyze(&input).unwrap();
    let tree = HuffmanTree::build(&frequencies);
    let table = CodeTable::from_tree(&tree);
    let bits = Encoder::new(&table).encode(&input).unwrap();

    assert_eq!(bits.len() as u64, tree.weighted_length());
    assert!(table.is_prefix_free());

    let encoded = HuffmanCodec::new().encode(&input).unwrap();
    assert_eq!(encoded.payload, pack(&bits));
    assert_eq!(encoded.tree, tree_codec::serialize(&tree));

    let restored: HuffmanTree<char> = tree_codec::deserialize(&encoded.tree).unwrap();
    let decoded = Decoder::new(&restored)
        .decode_exact(&unpack(&encoded.payload), input.len())
        .unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn test_padding_boundary() {
    // a=3, b=1, c=1 gives codes of 1, 2 and 2 bits: 7 bits total
    let input = ['a', 'b', 'a', 'c', 'a'];
    let codec = HuffmanCodec::new();
    let encoded = codec.encode(&input).unwrap();

    assert_eq!(encoded.bit_count, 7);
    assert_eq!(encoded.stats.padding_bits(), 1);

    let raw = codec.decode(&encoded.payload, &encoded.tree).unwrap();
    assert_eq!(&raw[..input.len()], &input);

    let exact = codec
        .decode_exact(&encoded.payload, &encoded.tree, input.len())
        .unwrap();
    assert_eq!(exact, input);
}

#[test]
fn test_single_distinct_symbol() {
    let input = vec!['z'; 40];
    let codec = HuffmanCodec::new();
    let encoded = codec.encode(&input).unwrap();

    assert_eq!(encoded.bit_count, 0);
    assert!(encoded.payload.is_empty());

    let tree: HuffmanTree<char> = tree_codec::deserialize(&encoded.tree).unwrap();
    assert!(tree.is_single_leaf());
    assert_eq!(CodeTable::from_tree(&tree).get(&'z').map(|c| c.len()), Some(0));

    assert!(codec.decode(&encoded.payload, &encoded.tree).unwrap().is_empty());
    assert_eq!(
        codec.decode_exact(&encoded.payload, &encoded.tree, 40).unwrap(),
        input
    );
}

#[test]
fn test_empty_input_rejected() {
    let err = HuffmanCodec::<char>::new().encode(&[]).unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
    assert_eq!(err.category(), "empty_input");
}

#[test]
fn test_byte_symbols() {
    let input: Vec<u8> = (0..=255u8).chain(b"aaaaaaaabbbbcc".iter().copied()).collect();
    let codec = HuffmanCodec::new();
    let encoded = codec.encode(&input).unwrap();

    assert!(encoded.stats.bits_per_symbol() < 8.0);
    assert_eq!(
        codec
            .decode_exact(&encoded.payload, &encoded.tree, input.len())
            .unwrap(),
        input
    );
}

#[test]
fn test_tree_with_wrong_symbol_width_is_rejected() {
    // A byte tree read back as a char tree runs out of bits inside a leaf
    let encoded = HuffmanCodec::new().encode(b"abcabcaab").unwrap();
    let err = HuffmanCodec::<char>::new()
        .decode(&encoded.payload, &encoded.tree)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedTree { .. }));
}
