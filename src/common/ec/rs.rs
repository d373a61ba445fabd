use super::galois::GaloisField;

// Polynomial over GF(256)
//------------------------------------------------------------------------------

/// Polynomial with coefficients stored highest degree first. Leading zeros are trimmed on
/// construction, the zero polynomial is kept as a single zero coefficient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly(Vec<u8>);

impl Poly {
    pub fn new(coeffs: &[u8]) -> Self {
        let start = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        if start == coeffs.len() {
            return Self(vec![0]);
        }
        Self(coeffs[start..].to_vec())
    }

    pub fn coeffs(&self) -> &[u8] {
        &self.0
    }

    pub fn degree(&self) -> usize {
        self.0.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0]
    }

    pub fn mul(&self, other: &Poly, gf: &GaloisField) -> Poly {
        let mut res = vec![0u8; self.0.len() + other.0.len() - 1];
        for (i, &a) in self.0.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.0.iter().enumerate() {
                res[i + j] ^= gf.mul(a, b);
            }
        }
        Poly::new(&res)
    }

    /// Remainder of long division by `divisor`.
    pub fn rem(&self, divisor: &Poly, gf: &GaloisField) -> Poly {
        assert!(!divisor.is_zero(), "Division by zero polynomial");

        let dlen = divisor.0.len();
        let lead = divisor.0[0];
        let mut res = self.0.clone();
        while res.len() >= dlen {
            let factor = gf.div(res[0], lead);
            if factor != 0 {
                for (r, &d) in res.iter_mut().zip(divisor.0.iter()) {
                    *r ^= gf.mul(d, factor);
                }
            }
            res.remove(0);
            let start = res.iter().position(|&c| c != 0).unwrap_or(res.len());
            res.drain(..start);
        }
        Poly::new(&res)
    }
}

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Generator polynomial of degree `n`: (x + 2^0)(x + 2^1)...(x + 2^(n-1)).
pub fn generator(n: usize, gf: &GaloisField) -> Poly {
    (0..n).fold(Poly::new(&[1]), |g, i| g.mul(&Poly::new(&[1, gf.exp(i)]), gf))
}

/// Error correction codewords of `data`: the remainder of data * x^n divided by the
/// generator, left padded with zeros to exactly `n` codewords.
pub fn encode(data: &[u8], n: usize, gf: &GaloisField) -> Vec<u8> {
    let mut shifted = data.to_vec();
    shifted.resize(data.len() + n, 0);
    let rem = Poly::new(&shifted).rem(&generator(n, gf), gf);

    let mut res = vec![0u8; n];
    if !rem.is_zero() {
        let coeffs = rem.coeffs();
        debug_assert!(coeffs.len() <= n, "Remainder longer than ec length: {}", coeffs.len());
        res[n - coeffs.len()..].copy_from_slice(coeffs);
    }
    res
}

#[cfg(test)]
mod rs_tests {
    use super::{encode, generator, Poly};
    use crate::common::ec::galois::GaloisField;

    #[test]
    fn test_poly_trim() {
        assert_eq!(Poly::new(&[0, 0, 3, 1]).coeffs(), [3, 1]);
        assert!(Poly::new(&[0, 0]).is_zero());
        assert_eq!(Poly::new(&[]).degree(), 0);
    }

    #[test]
    fn test_generator() {
        let gf = GaloisField::get();
        // Exponents of alpha for the degree 7 generator
        let exps = [0, 87, 229, 146, 149, 238, 102, 21];
        let exp_coeffs = exps.iter().map(|&e| gf.exp(e)).collect::<Vec<_>>();
        assert_eq!(generator(7, gf).coeffs(), exp_coeffs);
        assert_eq!(generator(10, gf).degree(), 10);
    }

    #[test]
    fn test_rem() {
        let gf = GaloisField::get();
        let a = Poly::new(&[1, 3, 2]);
        let b = Poly::new(&[1, 1]);
        // x^2 + 3x + 2 = (x + 1)(x + 2)
        assert!(a.rem(&b, gf).is_zero());
        assert_eq!(Poly::new(&[5]).rem(&b, gf).coeffs(), [5]);
    }

    #[test]
    fn test_encode_simple() {
        let gf = GaloisField::get();
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        assert_eq!(encode(msg, 10, gf), b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec";
        assert_eq!(encode(msg, 13, gf), b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_encode_complex() {
        let gf = GaloisField::get();
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&";
        assert_eq!(encode(msg, 18, gf), b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_encode_zero_data() {
        let gf = GaloisField::get();
        assert_eq!(encode(&[0, 0, 0], 5, gf), vec![0; 5]);
    }
}
