//! Shared test fixtures.
//!
//! `Wei25519` is the short Weierstrass model of Curve25519
//! (`y² = x³ + ax + b` over `p = 2^255 - 19`, cofactor 8). It is built
//! from the crate's own Montgomery primitives, in homogeneous projective
//! coordinates, and only serves to exercise the key layer. Its scalar
//! multiplication is a plain double-and-add and is not constant-time.

#![allow(dead_code)]

use ecnn::keys::{Curve, EcParams, PointForm};
use ecnn::modular::{
    RedcConstants, compute_redc_constants, montgomery_multiply, redcify, unredcify,
};
use ecnn::primitives::nn::arith::{mod_add, mod_sub, sub};
use ecnn::primitives::nn::logical::{bit_length, get_bit};
use ecnn::primitives::nn::NN_MAX_BYTE_LEN;
use ecnn::{Error, Nn, Result};
use num_bigint::BigUint;

pub const FIELD_BYTES: usize = 32;

pub const P: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed";
pub const A: &str = "2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa984914a144";
pub const B: &str = "7b425ed097b425ed097b425ed097b425ed097b425ed097b4260b5e9c7710c864";
pub const GX: &str = "2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad245a";
pub const GY: &str = "20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9";
pub const Q: &str = "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed";

/// A point of order two, outside the prime-order subgroup.
pub const T2X: &str = "2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad2451";
pub const T2Y: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// `G + T2`, on the curve but outside the prime-order subgroup.
pub const MIXED_X: &str = "71c71c71c71c71c71c71c71c71c71c71c71c71c71c71c71c71c71c71c71eeb63";
pub const MIXED_Y: &str = "387c4536e46fcbc4e0c9e3fc4a61138a1dccacded58fd8de320cea98dbab460b";

/// `K * G` for `K = 0x1234567890abcdef`.
pub const K: u64 = 0x1234567890abcdef;
pub const KG_X: &str = "1355a665602ad123e59f57d6f1abb4d8bd25c659b455257db75f00ac78d347ab";
pub const KG_Y: &str = "5ee486fc0c97b07d640b256692f4a94f5d60941ccf292d083f79bca3d02b5911";

/// Decodes a hex string into bytes.
pub fn hex_bytes(hex: &str) -> Vec<u8> {
    let hex = if hex.len() % 2 == 1 {
        format!("0{hex}")
    } else {
        hex.to_string()
    };

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

/// Decodes a hex string into an `Nn` spanning `FIELD_BYTES` bytes.
pub fn fe(hex: &str) -> Nn {
    let bytes = hex_bytes(hex);
    let mut buf = [0u8; FIELD_BYTES];
    buf[FIELD_BYTES - bytes.len()..].copy_from_slice(&bytes);

    Nn::from_be_bytes(&buf).unwrap()
}

/// Concatenates two field elements into an affine point encoding.
pub fn affine_bytes(x: &str, y: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * FIELD_BYTES);
    for h in [x, y] {
        let mut buf = [0u8; FIELD_BYTES];
        fe(h).to_be_bytes(&mut buf).unwrap();
        out.extend_from_slice(&buf);
    }

    out
}

/// Converts an `Nn` into a reference big integer.
pub fn to_big(x: &Nn) -> BigUint {
    let mut buf = [0u8; NN_MAX_BYTE_LEN];
    x.to_be_bytes(&mut buf).unwrap();

    BigUint::from_bytes_be(&buf)
}

/// Converts a reference big integer into an `Nn` of minimal width.
pub fn from_big(x: &BigUint) -> Nn {
    Nn::from_be_bytes(&x.to_bytes_be()).unwrap()
}

#[derive(Clone, Debug)]
pub struct Point {
    x: Nn,
    y: Nn,
    z: Nn,
}

pub struct Wei25519 {
    p: Nn,
    constants: RedcConstants,
    a: Nn,
    b: Nn,
    g: Point,
}

impl Wei25519 {
    pub fn new() -> Self {
        let p = fe(P);
        let constants = compute_redc_constants(&p).unwrap();

        let mut curve = Self {
            a: Nn::zero(),
            b: Nn::zero(),
            g: Point {
                x: Nn::zero(),
                y: Nn::zero(),
                z: Nn::zero(),
            },
            p,
            constants,
        };

        curve.a = curve.to_mont(&fe(A)).unwrap();
        curve.b = curve.to_mont(&fe(B)).unwrap();
        curve.g = Point {
            x: curve.to_mont(&fe(GX)).unwrap(),
            y: curve.to_mont(&fe(GY)).unwrap(),
            z: curve.constants.r.clone(),
        };

        curve
    }

    fn to_mont(&self, x: &Nn) -> Result<Nn> {
        let mut out = Nn::new();
        redcify(&mut out, x, &self.p, &self.constants)?;
        Ok(out)
    }

    fn from_mont(&self, x: &Nn) -> Result<Nn> {
        let mut out = Nn::new();
        unredcify(&mut out, x, &self.p, &self.constants)?;
        Ok(out)
    }

    fn mul(&self, a: &Nn, b: &Nn) -> Result<Nn> {
        let mut out = Nn::new();
        montgomery_multiply(&mut out, a, b, &self.p, self.constants.mpinv)?;
        Ok(out)
    }

    fn add(&self, a: &Nn, b: &Nn) -> Result<Nn> {
        let mut out = Nn::new();
        mod_add(&mut out, a, b, &self.p)?;
        Ok(out)
    }

    fn sub(&self, a: &Nn, b: &Nn) -> Result<Nn> {
        let mut out = Nn::new();
        mod_sub(&mut out, a, b, &self.p)?;
        Ok(out)
    }

    fn field_zero(&self) -> Result<Nn> {
        Nn::with_wlen(self.p.wlen())
    }

    fn identity(&self) -> Result<Point> {
        Ok(Point {
            x: self.field_zero()?,
            y: self.constants.r.clone(),
            z: self.field_zero()?,
        })
    }

    /// Inverse by Fermat's little theorem, in the Montgomery domain.
    fn inv(&self, z: &Nn) -> Result<Nn> {
        let mut e = Nn::new();
        sub(&mut e, &self.p, &Nn::from(2u8))?;

        let mut acc = self.constants.r.clone();
        for i in (0..bit_length(&e)?).rev() {
            acc = self.mul(&acc, &acc)?;
            if get_bit(&e, i)? == 1 {
                acc = self.mul(&acc, z)?;
            }
        }

        Ok(acc)
    }

    /// Loads a canonical field element into the Montgomery domain.
    fn load(&self, buf: &[u8]) -> Result<Nn> {
        let v = Nn::from_be_bytes(buf)?;
        if !v.compare(&self.p)?.is_lt() {
            return Err(Error::InvalidPoint);
        }

        self.to_mont(&v)
    }

    fn store(&self, v: &Nn, buf: &mut [u8]) -> Result<()> {
        self.from_mont(v)?.to_be_bytes(buf)
    }

    /// `Y²Z == X³ + aXZ² + bZ³`.
    fn on_curve(&self, pt: &Point) -> Result<bool> {
        let zz = self.mul(&pt.z, &pt.z)?;
        let lhs = self.mul(&self.mul(&pt.y, &pt.y)?, &pt.z)?;

        let x3 = self.mul(&self.mul(&pt.x, &pt.x)?, &pt.x)?;
        let axzz = self.mul(&self.mul(&self.a, &pt.x)?, &zz)?;
        let bz3 = self.mul(&self.mul(&self.b, &zz)?, &pt.z)?;
        let rhs = self.add(&self.add(&x3, &axzz)?, &bz3)?;

        Ok(lhs == rhs)
    }

    fn dbl(&self, pt: &Point) -> Result<Point> {
        if pt.z.is_zero()? {
            return Ok(pt.clone());
        }

        let xx = self.mul(&pt.x, &pt.x)?;
        let zz = self.mul(&pt.z, &pt.z)?;
        let xx3 = self.add(&self.add(&xx, &xx)?, &xx)?;
        let w = self.add(&self.mul(&self.a, &zz)?, &xx3)?;
        let yz = self.mul(&pt.y, &pt.z)?;
        let s = self.add(&yz, &yz)?;
        let ss = self.mul(&s, &s)?;
        let sss = self.mul(&s, &ss)?;
        let r = self.mul(&pt.y, &s)?;
        let rr = self.mul(&r, &r)?;
        let xr = self.add(&pt.x, &r)?;
        let b = self.sub(&self.sub(&self.mul(&xr, &xr)?, &xx)?, &rr)?;
        let h = self.sub(&self.mul(&w, &w)?, &self.add(&b, &b)?)?;

        Ok(Point {
            x: self.mul(&h, &s)?,
            y: self.sub(&self.mul(&w, &self.sub(&b, &h)?)?, &self.add(&rr, &rr)?)?,
            z: sss,
        })
    }

    fn add_points(&self, p1: &Point, p2: &Point) -> Result<Point> {
        if p1.z.is_zero()? {
            return Ok(p2.clone());
        }
        if p2.z.is_zero()? {
            return Ok(p1.clone());
        }

        let y1z2 = self.mul(&p1.y, &p2.z)?;
        let x1z2 = self.mul(&p1.x, &p2.z)?;
        let z1z2 = self.mul(&p1.z, &p2.z)?;
        let u = self.sub(&self.mul(&p2.y, &p1.z)?, &y1z2)?;
        let v = self.sub(&self.mul(&p2.x, &p1.z)?, &x1z2)?;

        if v.is_zero()? {
            return if u.is_zero()? {
                self.dbl(p1)
            } else {
                self.identity()
            };
        }

        let uu = self.mul(&u, &u)?;
        let vv = self.mul(&v, &v)?;
        let vvv = self.mul(&v, &vv)?;
        let r = self.mul(&vv, &x1z2)?;
        let a = self.sub(
            &self.sub(&self.mul(&uu, &z1z2)?, &vvv)?,
            &self.add(&r, &r)?,
        )?;

        Ok(Point {
            x: self.mul(&v, &a)?,
            y: self.sub(&self.mul(&u, &self.sub(&r, &a)?)?, &self.mul(&vvv, &y1z2)?)?,
            z: self.mul(&vvv, &z1z2)?,
        })
    }
}

impl Curve for Wei25519 {
    type Point = Point;

    fn import_point(&self, buf: &[u8], form: PointForm) -> Result<Point> {
        let pt = match form {
            PointForm::Affine => {
                if buf.len() != 2 * FIELD_BYTES {
                    return Err(Error::InvalidPoint);
                }

                Point {
                    x: self.load(&buf[..FIELD_BYTES])?,
                    y: self.load(&buf[FIELD_BYTES..])?,
                    z: self.constants.r.clone(),
                }
            }
            PointForm::Projective => {
                if buf.len() != 3 * FIELD_BYTES {
                    return Err(Error::InvalidPoint);
                }

                Point {
                    x: self.load(&buf[..FIELD_BYTES])?,
                    y: self.load(&buf[FIELD_BYTES..2 * FIELD_BYTES])?,
                    z: self.load(&buf[2 * FIELD_BYTES..])?,
                }
            }
        };

        if pt.z.is_zero()? {
            return self.identity();
        }
        if !self.on_curve(&pt)? {
            return Err(Error::InvalidPoint);
        }

        Ok(pt)
    }

    fn export_point(&self, point: &Point, buf: &mut [u8], form: PointForm) -> Result<()> {
        match form {
            PointForm::Affine => {
                if buf.len() < 2 * FIELD_BYTES {
                    return Err(Error::BufferTooShort);
                }
                if point.z.is_zero()? {
                    return Err(Error::InvalidPoint);
                }

                let zinv = self.inv(&point.z)?;
                let (xb, yb) = buf.split_at_mut(FIELD_BYTES);
                self.store(&self.mul(&point.x, &zinv)?, xb)?;
                self.store(&self.mul(&point.y, &zinv)?, &mut yb[..FIELD_BYTES])
            }
            PointForm::Projective => {
                if buf.len() < 3 * FIELD_BYTES {
                    return Err(Error::BufferTooShort);
                }

                let (xb, rest) = buf.split_at_mut(FIELD_BYTES);
                let (yb, zb) = rest.split_at_mut(FIELD_BYTES);
                self.store(&point.x, xb)?;
                self.store(&point.y, yb)?;
                self.store(&point.z, &mut zb[..FIELD_BYTES])
            }
        }
    }

    fn generator(&self) -> &Point {
        &self.g
    }

    fn scalar_mul(&self, k: &Nn, point: &Point) -> Result<Point> {
        let mut acc = self.identity()?;

        for i in (0..bit_length(k)?).rev() {
            acc = self.dbl(&acc)?;
            if get_bit(k, i)? == 1 {
                acc = self.add_points(&acc, point)?;
            }
        }

        Ok(acc)
    }

    fn is_identity(&self, point: &Point) -> Result<bool> {
        point.z.is_zero()
    }
}

/// Wei25519 parameters with the given cofactor and name.
pub fn wei25519_params(cofactor: u8, name: &str) -> EcParams<Wei25519> {
    EcParams::new(Wei25519::new(), fe(Q), Nn::from(cofactor), name).unwrap()
}
