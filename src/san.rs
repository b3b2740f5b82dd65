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

//! SubjectAltName decoding.
//!
//! A subjectAltName extension value is a `SEQUENCE` of context-tagged
//! GeneralName values. RFC 5280 (section 4.2.1.6) requires at least one
//! entry.

use crate::der::{Class, Parser};
use crate::Error;

/// Maximum number of entries in an [`AltNames`] list.
pub const MAX_ALT_NAMES: usize = 16;

// GeneralName CHOICE context tags; RFC 5280 section 4.2.1.6.
const OTHER_NAME_TAG: u32 = 0;
const RFC822_NAME_TAG: u32 = 1;
const DNS_NAME_TAG: u32 = 2;
const X400_ADDRESS_TAG: u32 = 3;
const DIRECTORY_NAME_TAG: u32 = 4;
const EDI_PARTY_NAME_TAG: u32 = 5;
const UNIFORM_RESOURCE_IDENTIFIER_TAG: u32 = 6;
const IP_ADDRESS_TAG: u32 = 7;
const REGISTERED_ID_TAG: u32 = 8;

/// One GeneralName from a subjectAltName, with its payload borrowed from
/// the input buffer.
///
/// Only the forms a TLS client needs are represented; the structured forms
/// (otherName, directoryName, ...) make [`AltNames::parse`] fail with
/// [`Error::UnsupportedName`] instead.
#[derive(Clone, Copy, Debug)]
pub enum AltName<'a> {
    /// An rfc822Name (email address); non-empty.
    Rfc822Name(untrusted::Input<'a>),
    /// A dNSName; non-empty and not the single-space marker some CAs used
    /// for "no name".
    DnsName(untrusted::Input<'a>),
    /// A uniformResourceIdentifier; non-empty. Full RFC 3986 syntax
    /// checking is left to the caller.
    Uri(untrusted::Input<'a>),
    /// An iPAddress: exactly 4 (IPv4) or 16 (IPv6) octets.
    IpAddress(untrusted::Input<'a>),
}

impl<'a> AltName<'a> {
    /// The raw payload bytes, whatever the form.
    pub fn value(&self) -> untrusted::Input<'a> {
        match self {
            AltName::Rfc822Name(value)
            | AltName::DnsName(value)
            | AltName::Uri(value)
            | AltName::IpAddress(value) => *value,
        }
    }
}

/// A decoded subjectAltName: up to [`MAX_ALT_NAMES`] entries, at least one.
#[derive(Clone, Debug)]
pub struct AltNames<'a> {
    names: [Option<AltName<'a>>; MAX_ALT_NAMES],
    num: usize,
}

impl<'a> AltNames<'a> {
    /// Parse a subjectAltName extension value.
    ///
    /// The parser must be positioned on the extension's outer SEQUENCE.
    /// An empty SEQUENCE is rejected with [`Error::BadDer`] rather than
    /// yielding an empty list. Every entry must be context-specific and
    /// primitive; see [`AltName`] for the per-form validity rules. The
    /// structured GeneralName forms (otherName, x400Address,
    /// directoryName, ediPartyName, registeredID) fail with
    /// [`Error::UnsupportedName`], any other tag with [`Error::BadDer`].
    pub fn parse(parser: &mut Parser<'a>) -> Result<Self, Error> {
        let mut alt_names = AltNames {
            names: [None; MAX_ALT_NAMES],
            num: 0,
        };

        parser.push_sequence()?;

        // Alternative names must contain at least one name, so fetch a
        // token before the first eof check.
        loop {
            let token = parser.next()?;

            if token.class() != Class::ContextSpecific {
                return Err(Error::BadDer);
            }

            let value = token.value();
            let name = match token.tag() {
                RFC822_NAME_TAG => {
                    if value.is_empty() {
                        return Err(Error::BadDer);
                    }
                    AltName::Rfc822Name(value)
                }
                DNS_NAME_TAG => {
                    let content = value.as_slice_less_safe();
                    if content.is_empty() {
                        return Err(Error::BadDer);
                    }
                    if content.len() == 1 && content[0] == b' ' {
                        return Err(Error::BadDer);
                    }
                    AltName::DnsName(value)
                }
                UNIFORM_RESOURCE_IDENTIFIER_TAG => {
                    if value.is_empty() {
                        return Err(Error::BadDer);
                    }
                    AltName::Uri(value)
                }
                IP_ADDRESS_TAG => {
                    if value.len() != 4 && value.len() != 16 {
                        return Err(Error::BadDer);
                    }
                    AltName::IpAddress(value)
                }
                OTHER_NAME_TAG
                | X400_ADDRESS_TAG
                | DIRECTORY_NAME_TAG
                | EDI_PARTY_NAME_TAG
                | REGISTERED_ID_TAG => return Err(Error::UnsupportedName),
                _ => return Err(Error::BadDer),
            };

            // At least directoryName uses constructed encoding, so the tag
            // is matched first to report UnsupportedName instead of
            // BadDer. The forms above are all primitive.
            if token.is_constructed() {
                return Err(Error::BadDer);
            }

            alt_names.names[alt_names.num] = Some(name);
            alt_names.num += 1;

            if parser.eof() || alt_names.num == MAX_ALT_NAMES {
                break;
            }
        }

        if !parser.eof() {
            return Err(Error::CapacityExceeded);
        }

        parser.pop()?;
        Ok(alt_names)
    }

    /// The decoded entries, in encoded order.
    pub fn iter(&self) -> impl Iterator<Item = &AltName<'a>> {
        self.names[..self.num].iter().filter_map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.num
    }

    pub fn is_empty(&self) -> bool {
        self.num == 0
    }
}
