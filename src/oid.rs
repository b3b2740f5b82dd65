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

//! Object identifiers, decoded into their arcs.

use core::cmp::Ordering;
use core::fmt;

use crate::der::Token;
use crate::Error;

/// Maximum number of arcs in a decoded [`Oid`].
pub const MAX_ARCS: usize = 12;

/// A decoded object identifier.
///
/// Unlike the borrowed value tokens elsewhere in this crate, an `Oid` holds
/// its arcs by value so it can be compared and sorted after the input
/// buffer's tokens have been walked past. The ordering is lexicographic
/// over the arc sequence, e.g. `1.2` < `1.2.1` < `1.3`.
#[derive(Clone, Copy, Debug)]
pub struct Oid {
    arcs: [u32; MAX_ARCS],
    num: usize,
}

pub(crate) const EMPTY_OID: Oid = Oid {
    arcs: [0; MAX_ARCS],
    num: 0,
};

impl Oid {
    /// Decode an OID from its token.
    ///
    /// The token must be a primitive, universal OBJECT IDENTIFIER. Arcs
    /// are base-128 encoded, and the first two arcs share the leading
    /// sub-identifier (X.690 8.19.4). Non-minimal sub-identifiers (a
    /// leading 0x80 octet), a trailing continuation octet, empty content,
    /// and arcs over `u32::MAX` are all [`Error::BadDer`]; more than
    /// [`MAX_ARCS`] arcs is [`Error::CapacityExceeded`].
    pub fn from_token(token: &Token<'_>) -> Result<Self, Error> {
        if !token.is_oid() {
            return Err(Error::BadDer);
        }
        let content = token.value().as_slice_less_safe();
        if content.is_empty() {
            return Err(Error::BadDer);
        }

        let mut oid = EMPTY_OID;
        let mut arc: u32 = 0;
        let mut lead = true;
        let mut pending = false;
        for &b in content {
            if lead && b == 0x80 {
                // leading zero septet
                return Err(Error::BadDer);
            }
            lead = false;
            if arc > (u32::MAX >> 7) {
                return Err(Error::BadDer);
            }
            arc = (arc << 7) | u32::from(b & 0x7f);
            pending = (b & 0x80) != 0;
            if !pending {
                if oid.num == 0 {
                    // The first sub-identifier folds the first two arcs.
                    let (first, second) = if arc < 40 {
                        (0, arc)
                    } else if arc < 80 {
                        (1, arc - 40)
                    } else {
                        (2, arc - 80)
                    };
                    oid.push_arc(first)?;
                    oid.push_arc(second)?;
                } else {
                    oid.push_arc(arc)?;
                }
                arc = 0;
                lead = true;
            }
        }
        if pending {
            // trailing continuation octet
            return Err(Error::BadDer);
        }
        Ok(oid)
    }

    fn push_arc(&mut self, arc: u32) -> Result<(), Error> {
        if self.num == MAX_ARCS {
            return Err(Error::CapacityExceeded);
        }
        self.arcs[self.num] = arc;
        self.num += 1;
        Ok(())
    }

    /// The decoded arcs.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs[..self.num]
    }

    /// Whether the OID equals the given arc list, e.g.
    /// `oid.matches(&[2, 5, 4, 3])` for id-at-commonName.
    pub fn matches(&self, arcs: &[u32]) -> bool {
        self.arcs() == arcs
    }
}

impl PartialEq for Oid {
    fn eq(&self, other: &Self) -> bool {
        self.arcs() == other.arcs()
    }
}

impl Eq for Oid {}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.arcs().cmp(other.arcs())
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Oid {
    /// Dotted-decimal form, e.g. `1.2.840.113549`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}
