// Copyright 2015 Brian Smith.
//
// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.
//
// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHORS DISCLAIM ALL WARRANTIES
// WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
// MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHORS BE LIABLE FOR
// ANY SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
// WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN
// ACTION OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF
// OR IN CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.

//! dername: X.509 Name and SubjectAltName parsing for constrained targets.
//!
//! dername decodes the Issuer/Subject Distinguished Name and the
//! subjectAltName extension of DER-encoded certificates. It never allocates:
//! every decoded value borrows from the caller's input buffer, and all
//! intermediate storage is fixed-capacity. This makes it usable on targets
//! without a heap, and gives parsing of attacker-supplied certificates a
//! deterministic worst-case cost.
//!
//! The entry points are [`Name::parse`], [`Name::parse_optional`] and
//! [`AltNames::parse`]. Each consumes tokens from a [`Parser`] that the
//! caller has positioned on the relevant TLV; an outer certificate decoder
//! is expected to do that positioning.
//!
//! Distinguished Names are canonicalized by sorting their RDNs by attribute
//! OID, so [`Name::check_eq`] is independent of the encoded RDN order. The
//! comparison is byte-exact; it does not implement the RFC 4517 matching
//! rules (case folding, charset normalization).

#![no_std]
#![forbid(unsafe_code)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    variant_size_differences
)]
#![warn(elided_lifetimes_in_paths, unreachable_pub)]

#[cfg(feature = "std")]
extern crate std;

mod der;
mod name;
mod oid;
mod san;

pub use der::{Class, Parser, Tag, Token, MAX_DEPTH};
pub use name::{Name, NameMismatch, Rdn, MAX_RDNS};
pub use oid::{Oid, MAX_ARCS};
pub use san::{AltName, AltNames, MAX_ALT_NAMES};

/// The reasons a decode can fail.
///
/// Every decoder returns the first error it encounters; there are no
/// partial results. None of these are fatal to the caller beyond the
/// current parse attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The input is not valid DER, or violates the structure this crate
    /// expects (wrong tag or class, non-minimal length, trailing bytes
    /// inside a constructed value). The certificate must be rejected.
    BadDer,

    /// A syntactically valid construct that this crate deliberately does
    /// not implement, such as a multi-valued RDN or an otherName entry in
    /// a subjectAltName. Callers can treat this as a policy decision
    /// instead of conflating it with `BadDer`.
    UnsupportedName,

    /// Well-formed input exceeded one of the compile-time capacity limits
    /// ([`MAX_RDNS`], [`MAX_ALT_NAMES`], [`MAX_ARCS`]). A resource limit,
    /// not a format defect.
    CapacityExceeded,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Error::BadDer => "invalid DER encoding",
            Error::UnsupportedName => "well-formed but unsupported name construct",
            Error::CapacityExceeded => "fixed storage capacity exceeded",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
