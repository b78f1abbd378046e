//! Content-addressed layout of the cache tree.

use std::path::PathBuf;

use super::Checksum;

/// Relative path of the cache entry for `checksum`: `<kind>/<hex[0..2]>/<hex>`.
///
/// Depends on nothing but the checksum, so identical artifacts declared by
/// different packages share one entry. The two-character prefix keeps each
/// directory at a few hundred entries even for large repositories.
pub fn content_path(checksum: &Checksum) -> PathBuf {
    let hex = checksum.hex();
    PathBuf::from(checksum.kind().as_str())
        .join(&hex[..2])
        .join(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn fans_out_by_kind_and_prefix() {
        let c: Checksum = "md5=d41d8cd98f00b204e9800998ecf8427e".parse().unwrap();
        assert_eq!(
            content_path(&c),
            Path::new("md5/d4/d41d8cd98f00b204e9800998ecf8427e")
        );
    }

    #[test]
    fn same_checksum_same_path() {
        let a: Checksum = format!("sha256={}", "ab".repeat(32)).parse().unwrap();
        let b: Checksum = format!("SHA256={}", "AB".repeat(32)).parse().unwrap();
        assert_eq!(content_path(&a), content_path(&b));
        assert!(content_path(&a).starts_with("sha256/ab"));
    }
}
