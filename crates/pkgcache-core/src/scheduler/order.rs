//! Hash-scrambled package order.

use sha2::{Digest, Sha256};

use crate::package::PackageId;

/// Sort key for `id`: the first eight bytes of SHA-256 over `name.version`,
/// big-endian.
pub fn scramble_key(id: &PackageId) -> u64 {
    let digest = Sha256::digest(id.to_string().as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Sorts `items` by the scramble key of their package id. Equal keys fall
/// back to package id order, so the result depends only on the set of ids.
pub fn scramble_order<T, F>(items: &mut [T], id_of: F)
where
    F: Fn(&T) -> &PackageId,
{
    items.sort_by_cached_key(|item| {
        let id = id_of(item);
        (scramble_key(id), id.clone())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PackageId> {
        names.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn key_is_sha256_prefix() {
        let digest = Sha256::digest(b"a.1");
        let expected = u64::from_be_bytes(digest[..8].try_into().unwrap());
        assert_eq!(scramble_key(&PackageId::new("a", "1")), expected);
    }

    #[test]
    fn order_is_independent_of_input_order() {
        let mut forward = ids(&["a.1", "b.2", "c.3", "d.4", "e.5", "f.6"]);
        let mut backward = forward.clone();
        backward.reverse();
        scramble_order(&mut forward, |id| id);
        scramble_order(&mut backward, |id| id);
        assert_eq!(forward, backward);

        let keys: Vec<u64> = forward.iter().map(scramble_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn order_is_not_alphabetical() {
        let mut list: Vec<PackageId> = (0..32).map(|i| PackageId::new(format!("pkg{i:02}"), "1")).collect();
        let alphabetical = list.clone();
        scramble_order(&mut list, |id| id);
        assert_ne!(list, alphabetical);
        let mut back = list.clone();
        back.sort();
        assert_eq!(back, alphabetical);
    }
}
