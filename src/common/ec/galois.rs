use std::sync::OnceLock;

// Galois field
//------------------------------------------------------------------------------

/// GF(256) over the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.
pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Exponent and logarithm tables of GF(256). Built once and shared read only.
#[derive(Debug)]
pub struct GaloisField {
    exp: [u8; 256],
    log: [u8; 256],
}

static GALOIS_FIELD: OnceLock<GaloisField> = OnceLock::new();

impl GaloisField {
    pub fn new() -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for (i, e) in exp.iter_mut().take(255).enumerate() {
            *e = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLY;
            }
        }
        exp[255] = exp[0];
        Self { exp, log }
    }

    pub fn get() -> &'static Self {
        GALOIS_FIELD.get_or_init(Self::new)
    }

    #[inline]
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i % 255]
    }

    #[inline]
    pub fn log(&self, a: u8) -> u8 {
        debug_assert!(a != 0, "Log of zero is undefined");
        self.log[a as usize]
    }

    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp((self.log[a as usize] as usize + self.log[b as usize] as usize) % 255)
    }

    pub fn div(&self, a: u8, b: u8) -> u8 {
        assert!(b != 0, "Division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        self.exp((self.log[a as usize] as usize + 255 - self.log[b as usize] as usize) % 255)
    }

    pub fn pow(&self, a: u8, n: usize) -> u8 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        self.exp((self.log[a as usize] as usize * (n % 255)) % 255)
    }
}

impl Default for GaloisField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod galois_tests {
    use super::GaloisField;

    #[test]
    fn test_tables() {
        let gf = GaloisField::get();
        assert_eq!(gf.exp(0), 1);
        assert_eq!(gf.exp(8), 29);
        assert_eq!(gf.exp(25), 3);
        assert_eq!(gf.exp(254), 142);
        assert_eq!(gf.exp(255), 1);
        assert_eq!(gf.log(2), 1);
        assert_eq!(gf.log(3), 25);
        assert_eq!(gf.log(142), 254);
    }

    #[test]
    fn test_mul() {
        let gf = GaloisField::get();
        assert_eq!(gf.mul(0, 7), 0);
        assert_eq!(gf.mul(7, 0), 0);
        assert_eq!(gf.mul(1, 200), 200);
        assert_eq!(gf.mul(2, 128), 29);
        assert_eq!(gf.mul(3, 7), 9);
    }

    #[test]
    fn test_div_pow() {
        let gf = GaloisField::get();
        assert_eq!(gf.div(0, 5), 0);
        assert_eq!(gf.div(29, 2), 128);
        assert_eq!(gf.pow(2, 8), 29);
        assert_eq!(gf.pow(0, 3), 0);
        assert_eq!(gf.pow(0, 0), 1);
        assert_eq!(gf.pow(2, 255), 1);
    }

    #[test]
    #[should_panic]
    fn test_div_by_zero() {
        GaloisField::get().div(5, 0);
    }

    #[test]
    fn test_singleton() {
        assert!(std::ptr::eq(GaloisField::get(), GaloisField::get()));
    }
}
