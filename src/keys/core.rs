//! Private keys, public keys and key pairs.
//!
//! Keys are value objects carrying a validity tag, like [`Nn`]. A fresh
//! key is uninitialized; a successful import or generation initializes
//! it; a construction that fails partway invalidates it, so that a
//! half-built key can never be used by mistake.
//!
//! Keys borrow their curve parameters. The borrow checker guarantees that
//! an [`EcParams`] outlives every key bound to it.

use tracing::{debug, instrument};

use super::alg::SigAlgorithm;
use super::params::{Curve, EcParams, PointForm};
use crate::checks::must_have;
use crate::error::{Error, Result};
use crate::primitives::nn::logical::bit_length;
use crate::primitives::{Nn, Validity};
use crate::rng::RandomSource;

/// A private key: a scalar bound to an algorithm and a curve.
///
/// The scalar is wiped when the key is dropped.
pub struct PrivateKey<'a, C: Curve> {
    x: Nn,
    alg: Option<SigAlgorithm>,
    params: Option<&'a EcParams<C>>,
    state: Validity,
}

/// A public key: a curve point bound to an algorithm and a curve.
pub struct PublicKey<'a, C: Curve> {
    y: Option<C::Point>,
    alg: Option<SigAlgorithm>,
    params: Option<&'a EcParams<C>>,
    state: Validity,
}

/// A private key together with its public key.
///
/// Both halves are initialized together and invalidated together.
pub struct KeyPair<'a, C: Curve> {
    pub(crate) private: PrivateKey<'a, C>,
    pub(crate) public: PublicKey<'a, C>,
}

impl<'a, C: Curve> PrivateKey<'a, C> {
    /// Returns a fresh, uninitialized private key.
    pub fn new() -> Self {
        Self {
            x: Nn::new(),
            alg: None,
            params: None,
            state: Validity::Uninitialized,
        }
    }

    /// Fails with [`Error::InvalidState`] unless the key is initialized.
    pub fn check_initialized(&self) -> Result<()> {
        must_have!(
            self.state == Validity::Initialized && self.params.is_some() && self.alg.is_some(),
            Error::InvalidState
        );

        Ok(())
    }

    /// Fails unless the key is initialized and bound to `alg`.
    pub fn check_initialized_and_type(&self, alg: SigAlgorithm) -> Result<()> {
        self.check_initialized()?;
        must_have!(self.alg == Some(alg), Error::Mismatch);

        Ok(())
    }

    /// Returns the validity tag.
    pub fn validity(&self) -> Validity {
        self.state
    }

    /// Returns the scalar.
    pub fn value(&self) -> Result<&Nn> {
        self.check_initialized()?;

        Ok(&self.x)
    }

    /// Returns the algorithm the key is bound to.
    pub fn alg(&self) -> Result<SigAlgorithm> {
        self.check_initialized()?;

        self.alg.ok_or(Error::InvalidState)
    }

    /// Returns the curve parameters the key is bound to.
    pub fn params(&self) -> Result<&'a EcParams<C>> {
        self.check_initialized()?;

        self.params.ok_or(Error::InvalidState)
    }

    /// Loads the scalar from a big-endian buffer.
    ///
    /// No check is made against the curve order: the buffer is trusted to
    /// hold a valid scalar for `params`.
    pub fn import_from_raw(
        &mut self,
        buf: &[u8],
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
    ) -> Result<()> {
        match Nn::from_be_bytes(buf) {
            Ok(x) => {
                self.bind(x, params, alg);
                Ok(())
            }
            Err(e) => {
                debug!(len = buf.len(), "private key import rejected");
                self.invalidate();
                Err(e)
            }
        }
    }

    /// Writes the scalar as big-endian bytes, left-padded with zeros.
    ///
    /// Fails with [`Error::BufferTooShort`] if the scalar does not fit.
    pub fn export_to_raw(&self, buf: &mut [u8]) -> Result<()> {
        self.check_initialized()?;
        must_have!(8 * buf.len() >= bit_length(&self.x)?, Error::BufferTooShort);

        self.x.to_be_bytes(buf)
    }

    fn bind(&mut self, x: Nn, params: &'a EcParams<C>, alg: SigAlgorithm) {
        self.x = x;
        self.alg = Some(alg);
        self.params = Some(params);
        self.state = Validity::Initialized;
    }

    pub(crate) fn invalidate(&mut self) {
        self.x.invalidate();
        self.alg = None;
        self.params = None;
        self.state = Validity::Invalidated;
    }
}

impl<'a, C: Curve> PublicKey<'a, C> {
    /// Returns a fresh, uninitialized public key.
    pub fn new() -> Self {
        Self {
            y: None,
            alg: None,
            params: None,
            state: Validity::Uninitialized,
        }
    }

    /// Fails with [`Error::InvalidState`] unless the key is initialized.
    pub fn check_initialized(&self) -> Result<()> {
        must_have!(
            self.state == Validity::Initialized
                && self.y.is_some()
                && self.params.is_some()
                && self.alg.is_some(),
            Error::InvalidState
        );

        Ok(())
    }

    /// Fails unless the key is initialized and bound to `alg`.
    pub fn check_initialized_and_type(&self, alg: SigAlgorithm) -> Result<()> {
        self.check_initialized()?;
        must_have!(self.alg == Some(alg), Error::Mismatch);

        Ok(())
    }

    /// Returns the validity tag.
    pub fn validity(&self) -> Validity {
        self.state
    }

    /// Returns the curve point.
    pub fn point(&self) -> Result<&C::Point> {
        self.check_initialized()?;

        self.y.as_ref().ok_or(Error::InvalidState)
    }

    /// Returns the algorithm the key is bound to.
    pub fn alg(&self) -> Result<SigAlgorithm> {
        self.check_initialized()?;

        self.alg.ok_or(Error::InvalidState)
    }

    /// Returns the curve parameters the key is bound to.
    pub fn params(&self) -> Result<&'a EcParams<C>> {
        self.check_initialized()?;

        self.params.ok_or(Error::InvalidState)
    }

    /// Parses a point from `buf` in the given coordinate form.
    ///
    /// When the cofactor of the curve is not one, the point must also lie
    /// in the subgroup generated by the generator: `order * point` must be
    /// the point at infinity. This check costs a full scalar
    /// multiplication; it is what makes importing a key of unknown origin
    /// safe against small-subgroup and invalid-curve attacks.
    pub fn import_from_raw(
        &mut self,
        buf: &[u8],
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
        form: PointForm,
    ) -> Result<()> {
        let res = Self::parse(buf, params, form);

        match res {
            Ok(y) => {
                self.bind(y, params, alg);
                Ok(())
            }
            Err(e) => {
                debug!(len = buf.len(), ?form, "public key import rejected");
                self.invalidate();
                Err(e)
            }
        }
    }

    fn parse(buf: &[u8], params: &'a EcParams<C>, form: PointForm) -> Result<C::Point> {
        let curve = params.curve();
        let y = curve.import_point(buf, form)?;

        if !params.cofactor().is_one()? {
            must_have!(curve.check_order(&y, params.order())?, Error::InvalidPoint);
        }

        Ok(y)
    }

    /// Encodes the point into `buf` in the given coordinate form.
    pub fn export_to_raw(&self, buf: &mut [u8], form: PointForm) -> Result<()> {
        let y = self.point()?;

        self.params()?.curve().export_point(y, buf, form)
    }

    /// Derives the public key `x * G` of an initialized private key.
    ///
    /// The public key is bound to the same algorithm and parameters.
    pub fn derive_from_private(&mut self, private: &PrivateKey<'a, C>) -> Result<()> {
        let res = private.params().and_then(|params| {
            let curve = params.curve();
            let y = curve.scalar_mul(private.value()?, curve.generator())?;

            Ok((y, params, private.alg()?))
        });

        match res {
            Ok((y, params, alg)) => {
                self.bind(y, params, alg);
                Ok(())
            }
            Err(e) => {
                self.invalidate();
                Err(e)
            }
        }
    }

    fn bind(&mut self, y: C::Point, params: &'a EcParams<C>, alg: SigAlgorithm) {
        self.y = Some(y);
        self.alg = Some(alg);
        self.params = Some(params);
        self.state = Validity::Initialized;
    }

    pub(crate) fn invalidate(&mut self) {
        self.y = None;
        self.alg = None;
        self.params = None;
        self.state = Validity::Invalidated;
    }
}

impl<'a, C: Curve> KeyPair<'a, C> {
    /// Returns a fresh, uninitialized key pair.
    pub fn new() -> Self {
        Self {
            private: PrivateKey::new(),
            public: PublicKey::new(),
        }
    }

    /// Fails with [`Error::InvalidState`] unless both halves are
    /// initialized.
    pub fn check_initialized(&self) -> Result<()> {
        self.private.check_initialized()?;
        self.public.check_initialized()
    }

    /// Fails unless both halves are initialized and bound to `alg`.
    pub fn check_initialized_and_type(&self, alg: SigAlgorithm) -> Result<()> {
        self.private.check_initialized_and_type(alg)?;
        self.public.check_initialized_and_type(alg)
    }

    /// Returns the private half.
    pub fn private(&self) -> &PrivateKey<'a, C> {
        &self.private
    }

    /// Returns the public half.
    pub fn public(&self) -> &PublicKey<'a, C> {
        &self.public
    }

    /// Imports the private scalar from a raw buffer and derives the public
    /// key from it.
    pub fn import_from_private_raw(
        &mut self,
        buf: &[u8],
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
    ) -> Result<()> {
        let res = self.private.import_from_raw(buf, params, alg);
        let res = res.and_then(|_| self.public.derive_from_private(&self.private));

        self.settle(res)
    }

    /// Generates a fresh key pair for `alg` on `params`.
    ///
    /// The private scalar is drawn uniformly in `(0, order)`, adjusted by
    /// the algorithm's post-processing, and the public key is derived as
    /// `x * G`. On any failure both halves are invalidated.
    #[instrument(skip_all, fields(curve = params.name(), alg = ?alg))]
    pub fn generate<R: RandomSource + ?Sized>(
        &mut self,
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
        rng: &mut R,
    ) -> Result<()> {
        let res = Self::draw_private(params, alg, rng)
            .map(|x| self.private.bind(x, params, alg))
            .and_then(|_| self.public.derive_from_private(&self.private));

        if let Err(e) = &res {
            debug!(error = %e, "key pair generation failed");
        }

        self.settle(res)
    }

    fn draw_private<R: RandomSource + ?Sized>(
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
        rng: &mut R,
    ) -> Result<Nn> {
        let mut x = Nn::new();
        rng.random_mod(&mut x, params.order())?;
        alg.post_process_private(&mut x, params.cofactor())?;

        Ok(x)
    }

    /// Invalidates both halves when `res` is an error.
    pub(crate) fn settle(&mut self, res: Result<()>) -> Result<()> {
        if res.is_err() {
            self.private.invalidate();
            self.public.invalidate();
        }

        res
    }
}

impl<C: Curve> Default for PrivateKey<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Curve> Default for PublicKey<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Curve> Default for KeyPair<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}
