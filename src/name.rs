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

//! X.509 Name (Issuer/Subject Distinguished Name) decoding and comparison.
//!
//! A Name is encoded as:
//!
//! ```text
//! SEQUENCE OF
//!   SET OF (exactly one, here)        -- RelativeDistinguishedName
//!     SEQUENCE {                      -- AttributeTypeAndValue
//!       OBJECT IDENTIFIER,
//!       ANY                           -- a string type
//!     }
//! ```
//!
//! After decoding, the RDNs are sorted by attribute OID so that two Names
//! whose encodings merely order the same RDNs differently compare equal.

use core::fmt;

use crate::der::{Parser, Token};
use crate::oid::{Oid, EMPTY_OID};
use crate::Error;

/// Maximum number of RDNs in a [`Name`].
pub const MAX_RDNS: usize = 16;

/// One RelativeDistinguishedName: an attribute OID and its value.
///
/// The value is kept as the undecoded string token; its charset is not
/// interpreted.
#[derive(Clone, Copy, Debug)]
pub struct Rdn<'a> {
    oid: Oid,
    value: Token<'a>,
}

impl<'a> Rdn<'a> {
    /// The attribute type, e.g. id-at-commonName.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// The attribute value, borrowed from the input buffer.
    pub fn value(&self) -> Token<'a> {
        self.value
    }
}

fn empty_rdn() -> Rdn<'static> {
    Rdn {
        oid: EMPTY_OID,
        value: Token::empty(),
    }
}

/// A decoded Distinguished Name.
///
/// Holds up to [`MAX_RDNS`] borrowed [`Rdn`]s, sorted ascending by OID
/// (ties keep their encoded order). Valid only as long as the buffer the
/// [`Parser`] was reading from.
#[derive(Clone, Debug)]
pub struct Name<'a> {
    rdns: [Rdn<'a>; MAX_RDNS],
    num: usize,
}

impl<'a> Name<'a> {
    /// Parse a Name that must contain at least one RDN.
    ///
    /// An Issuer is never allowed to be empty; use this for it. Fails with
    /// [`Error::BadDer`] on an empty (but well-formed) SEQUENCE.
    pub fn parse(parser: &mut Parser<'a>) -> Result<Self, Error> {
        let name = Self::parse_optional(parser)?;
        if name.is_empty() {
            return Err(Error::BadDer);
        }
        Ok(name)
    }

    /// Parse a Name that may be empty.
    ///
    /// A V3 Subject may legitimately be an empty SEQUENCE when a critical
    /// subjectAltName extension carries the identity.
    pub fn parse_optional(parser: &mut Parser<'a>) -> Result<Self, Error> {
        let mut name = Name {
            rdns: [empty_rdn(); MAX_RDNS],
            num: 0,
        };

        parser.push_sequence()?;

        while !parser.eof() && name.num < MAX_RDNS {
            // RelativeDistinguishedName
            let rdn = parser.next()?;
            if !rdn.is_set() {
                return Err(Error::BadDer);
            }
            parser.push()?;

            // AttributeTypeAndValue
            parser.push_sequence()?;

            let attribute_type = parser.next()?;
            let oid = Oid::from_token(&attribute_type).map_err(|_| Error::BadDer)?;

            let value = parser.next()?;
            if !value.is_string() {
                return Err(Error::BadDer);
            }

            name.rdns[name.num] = Rdn { oid, value };
            name.num += 1;

            // End of AttributeTypeAndValue.
            parser.pop()?;

            // Multi-valued RDNs are legal but rare; not supported here.
            if !parser.eof() {
                return Err(Error::UnsupportedName);
            }

            // End of RelativeDistinguishedName.
            parser.pop()?;
        }

        if !parser.eof() {
            return Err(Error::CapacityExceeded);
        }

        name.sort();

        parser.pop()?;
        Ok(name)
    }

    /// Stable insertion sort, ascending by OID.
    fn sort(&mut self) {
        for i in 1..self.num {
            let mut j = i;
            while j > 0 && self.rdns[j - 1].oid > self.rdns[j].oid {
                self.rdns.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    /// The RDNs, in canonical (sorted) order.
    pub fn rdns(&self) -> &[Rdn<'a>] {
        &self.rdns[..self.num]
    }

    pub fn len(&self) -> usize {
        self.num
    }

    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// Structural equality with a diagnostic.
    ///
    /// Two Names are equal iff they have the same number of RDNs and, at
    /// every position, the same attribute OID and byte-identical value
    /// content. Both sides are already in canonical order, so the result
    /// does not depend on how either Name was encoded.
    ///
    /// Values that differ only in charset or case compare unequal: the
    /// RFC 4517 matching rules are deliberately not implemented, and
    /// callers rely on this exact behavior.
    pub fn check_eq(&self, other: &Name<'_>) -> Result<(), NameMismatch> {
        if self.num != other.num {
            return Err(NameMismatch::RdnCount);
        }

        for (a, b) in self.rdns().iter().zip(other.rdns()) {
            if a.oid != b.oid {
                return Err(NameMismatch::AttributeType);
            }
            if a.value.len() != b.value.len() {
                return Err(NameMismatch::ValueLength);
            }
            if a.value.value().as_slice_less_safe() != b.value.value().as_slice_less_safe() {
                return Err(NameMismatch::Value);
            }
        }

        Ok(())
    }
}

impl PartialEq for Name<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.check_eq(other).is_ok()
    }
}

impl Eq for Name<'_> {}

/// Why [`Name::check_eq`] reported two Names unequal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameMismatch {
    /// The Names have different numbers of RDNs.
    RdnCount,
    /// An attribute OID differs.
    AttributeType,
    /// An attribute value has a different length.
    ValueLength,
    /// An attribute value has different content.
    Value,
}

impl fmt::Display for NameMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameMismatch::RdnCount => "differing number of RDNs",
            NameMismatch::AttributeType => "attribute mismatch",
            NameMismatch::ValueLength => "value length mismatch",
            NameMismatch::Value => "value mismatch",
        })
    }
}
