//! DES initial / final permutations
//!
//! Only the two bit shuffles that frame the DES rounds are implemented here,
//! not the cipher itself. Both are built from five delta swaps on the pair of
//! 32-bit halves, the same way the block cipher in libdes-style code does its
//! IP/FP without a 64-entry lookup table.
//!
//! Each delta swap is an involution, so running the five swaps in reverse
//! order undoes them. Note the operand roles: `final_permutation(r, l)` is
//! the inverse of `initial_permutation(l, r)`, i.e. the halves must be passed
//! swapped to get back where you started.

/// Swap the bits of `b` selected by `mask` with the bits of `a` selected by
/// `mask << shift`.
#[inline(always)]
const fn delta_swap(a: u32, b: u32, shift: u32, mask: u32) -> (u32, u32) {
    let t = ((a >> shift) ^ b) & mask;
    (a ^ (t << shift), b ^ t)
}

/// DES Initial Permutation applied to the halves `(left, right)`.
pub const fn initial_permutation(left: u32, right: u32) -> (u32, u32) {
    let (l, r) = (left, right);

    let (r, l) = delta_swap(r, l, 4, 0x0f0f0f0f);
    let (l, r) = delta_swap(l, r, 16, 0x0000ffff);
    let (r, l) = delta_swap(r, l, 2, 0x33333333);
    let (l, r) = delta_swap(l, r, 8, 0x00ff00ff);
    let (r, l) = delta_swap(r, l, 1, 0x55555555);

    (l, r)
}

/// DES Final Permutation (inverse of IP) applied to the halves `(left, right)`.
pub const fn final_permutation(left: u32, right: u32) -> (u32, u32) {
    let (l, r) = (left, right);

    let (l, r) = delta_swap(l, r, 1, 0x55555555);
    let (r, l) = delta_swap(r, l, 8, 0x00ff00ff);
    let (l, r) = delta_swap(l, r, 2, 0x33333333);
    let (r, l) = delta_swap(r, l, 16, 0x0000ffff);
    let (l, r) = delta_swap(l, r, 4, 0x0f0f0f0f);

    (l, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_known_values() {
        assert_eq!(initial_permutation(0, 0), (0, 0));
        assert_eq!(
            initial_permutation(0xffffffff, 0xffffffff),
            (0xffffffff, 0xffffffff)
        );
        assert_eq!(
            initial_permutation(0xffffffff, 0x00000000),
            (0xf0f0f0f0, 0xf0f0f0f0)
        );
        assert_eq!(
            initial_permutation(0x01234567, 0x89abcdef),
            (0xaa0faa0f, 0xffcc00cc)
        );
    }

    #[test]
    fn test_fp_known_values() {
        assert_eq!(
            final_permutation(0x01234567, 0x89abcdef),
            (0xffccf0aa, 0x00ccf0aa)
        );
    }

    #[test]
    fn test_fp_undoes_ip_with_swapped_halves() {
        let pairs = [
            (0x00000000, 0x00000000),
            (0x01234567, 0x89abcdef),
            (0xdeadbeef, 0x0badf00d),
            (0x80000000, 0x00000001),
            (0xffffffff, 0x12345678),
        ];

        for (w0, w1) in pairs {
            let (l, r) = initial_permutation(w0, w1);
            let (r, l) = final_permutation(r, l);
            assert_eq!((l, r), (w0, w1), "IP/FP mismatch for {w0:#010x} {w1:#010x}");
        }
    }

    #[test]
    fn test_ip_moves_every_bit_to_a_distinct_bit() {
        let mut seen = 0u64;
        for bit in 0..64 {
            let (w0, w1) = if bit < 32 { (1u32 << bit, 0) } else { (0, 1u32 << (bit - 32)) };
            let (l, r) = initial_permutation(w0, w1);
            let out = u64::from(l) | (u64::from(r) << 32);
            assert_eq!(out.count_ones(), 1, "bit {bit} did not map to a single bit");
            assert_eq!(seen & out, 0, "bit {bit} collided");
            seen |= out;
        }
        assert_eq!(seen, u64::MAX);
    }
}
