use super::*;

#[test]
fn same_input_same_hash() {
    assert_eq!(stable_hash64("kai"), stable_hash64("kai"));
    assert_eq!(stable_hash_pair("kai", "mira"), stable_hash_pair("kai", "mira"));
}

#[test]
fn pair_is_order_sensitive() {
    assert_ne!(stable_hash_pair("kai", "mira"), stable_hash_pair("mira", "kai"));
}

#[test]
fn separator_prevents_concat_collisions() {
    assert_ne!(stable_hash_pair("ab", "c"), stable_hash_pair("a", "bc"));
}
