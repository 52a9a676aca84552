//! Structured key encoding.
//!
//! A structured buffer is a raw key encoding prefixed with a three-byte
//! header:
//!
//! ```text
//! +-------+-----+-------+--------------------+
//! | class | alg | curve | raw key bytes ...  |
//! +-------+-----+-------+--------------------+
//!     0      1      2     3..
//! ```
//!
//! The header lets an importer verify that a buffer holds the kind of key
//! it expects before parsing the payload. The coordinate form of a public
//! key payload is not recorded and must be agreed on out of band.

use tracing::debug;

use super::alg::{KeyClass, SigAlgorithm};
use super::core::{KeyPair, PrivateKey, PublicKey};
use super::params::{Curve, EcParams, PointForm};
use crate::checks::must_have;
use crate::error::{Error, Result};

/// Length of the structured header.
pub const METADATA_LEN: usize = 3;

/// Checks a structured header against the expected class, algorithm and
/// curve, and returns the payload.
fn check_header<'b, C: Curve>(
    buf: &'b [u8],
    class: KeyClass,
    params: &EcParams<C>,
    alg: SigAlgorithm,
) -> Result<&'b [u8]> {
    must_have!(buf.len() > METADATA_LEN, Error::BufferTooShort);

    let curve = params.curve_type()?;
    let expected = [class as u8, alg as u8, curve as u8];
    if buf[..METADATA_LEN] != expected {
        debug!(
            ?class,
            ?alg,
            ?curve,
            header = ?&buf[..METADATA_LEN],
            "structured header mismatch"
        );
        return Err(Error::Mismatch);
    }

    Ok(&buf[METADATA_LEN..])
}

/// Writes a structured header and returns the payload area.
fn write_header<'b, C: Curve>(
    buf: &'b mut [u8],
    class: KeyClass,
    params: &EcParams<C>,
    alg: SigAlgorithm,
) -> Result<&'b mut [u8]> {
    must_have!(buf.len() > METADATA_LEN, Error::BufferTooShort);

    let curve = params.curve_type()?;
    buf[..METADATA_LEN].copy_from_slice(&[class as u8, alg as u8, curve as u8]);

    Ok(&mut buf[METADATA_LEN..])
}

impl<'a, C: Curve> PrivateKey<'a, C> {
    /// Imports a structured private key.
    ///
    /// The header must announce a private key for `alg` on the curve of
    /// `params`. A header mismatch fails with [`Error::Mismatch`] before
    /// the key is touched.
    pub fn import_structured(
        &mut self,
        buf: &[u8],
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
    ) -> Result<()> {
        let payload = check_header(buf, KeyClass::Private, params, alg)?;

        self.import_from_raw(payload, params, alg)
    }

    /// Exports the key as a structured buffer.
    ///
    /// The payload area is `buf.len() - METADATA_LEN` bytes long.
    pub fn export_structured(&self, buf: &mut [u8]) -> Result<()> {
        let payload = write_header(buf, KeyClass::Private, self.params()?, self.alg()?)?;

        self.export_to_raw(payload)
    }
}

impl<'a, C: Curve> PublicKey<'a, C> {
    /// Imports a structured public key whose payload is in `form`.
    ///
    /// The header must announce a public key for `alg` on the curve of
    /// `params`. A header mismatch fails with [`Error::Mismatch`] before
    /// the key is touched.
    pub fn import_structured(
        &mut self,
        buf: &[u8],
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
        form: PointForm,
    ) -> Result<()> {
        let payload = check_header(buf, KeyClass::Public, params, alg)?;

        self.import_from_raw(payload, params, alg, form)
    }

    /// Exports the key as a structured buffer with a payload in `form`.
    pub fn export_structured(&self, buf: &mut [u8], form: PointForm) -> Result<()> {
        let payload = write_header(buf, KeyClass::Public, self.params()?, self.alg()?)?;

        self.export_to_raw(payload, form)
    }
}

impl<'a, C: Curve> KeyPair<'a, C> {
    /// Imports a key pair from a structured private key, deriving the
    /// public key from it.
    pub fn import_structured_from_private(
        &mut self,
        buf: &[u8],
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
    ) -> Result<()> {
        let payload = check_header(buf, KeyClass::Private, params, alg);
        let res = payload.and_then(|payload| self.import_from_private_raw(payload, params, alg));

        self.settle(res)
    }

    /// Imports a key pair from a structured private key and a structured
    /// public key.
    ///
    /// The two halves are imported independently: nothing checks that
    /// the public key matches the private one.
    pub fn import_structured(
        &mut self,
        private_buf: &[u8],
        public_buf: &[u8],
        params: &'a EcParams<C>,
        alg: SigAlgorithm,
        form: PointForm,
    ) -> Result<()> {
        let res = self
            .private
            .import_structured(private_buf, params, alg)
            .and_then(|_| self.public.import_structured(public_buf, params, alg, form));

        self.settle(res)
    }
}
