//! Pairs a grid coordinate into a single integer key and back.
//!
//! Uses the triangular-number (Cantor) pairing so keys of nearby cells stay small
//! and ordering of keys is total. Boards never have negative indices so the domain
//! is simply all `u16` pairs.

pub type Key = u64;

pub fn encode(r: u16, c: u16) -> Key {
    let (r, c) = (Key::from(r), Key::from(c));
    let diag = r + c;
    diag * (diag + 1) / 2 + c
}

/// Exact inverse of `encode` on the keys it produces.
pub fn decode(key: Key) -> (u16, u16) {
    // float sqrt is only a guess for the diagonal, fix it up with integer math
    let mut diag = ((((8 * key + 1) as f64).sqrt() - 1.0) / 2.0) as Key;
    while triangle(diag) > key {
        diag -= 1;
    }
    while triangle(diag + 1) <= key {
        diag += 1;
    }

    let c = key - triangle(diag);
    let r = diag - c;
    debug_assert!(r <= Key::from(u16::max_value()) && c <= Key::from(u16::max_value()));
    (r as u16, c as u16)
}

fn triangle(n: Key) -> Key {
    n * (n + 1) / 2
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn first_keys_follow_diagonals() {
        assert_eq!(encode(0, 0), 0);
        assert_eq!(encode(1, 0), 1);
        assert_eq!(encode(0, 1), 2);
        assert_eq!(encode(2, 0), 3);
        assert_eq!(encode(1, 1), 4);
        assert_eq!(encode(0, 2), 5);
    }

    #[test]
    fn round_trip() {
        let mut keys = HashSet::new();
        for r in 0..300 {
            for c in 0..300 {
                let key = encode(r, c);
                assert_eq!(decode(key), (r, c));
                assert!(keys.insert(key), "duplicate key for {} {}", r, c);
            }
        }
    }

    #[test]
    fn round_trip_extremes() {
        let max = u16::max_value();
        for &(r, c) in &[(max, 0), (0, max), (max, max), (max - 1, max), (12_345, 54_321)] {
            assert_eq!(decode(encode(r, c)), (r, c));
        }
    }
}
