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

use dername::{Error, Name, NameMismatch, Parser, MAX_RDNS};

fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else if len < 0x100 {
        out.push(0x81);
        out.push(len as u8);
    } else {
        assert!(len < 0x10000);
        out.push(0x82);
        out.push((len >> 8) as u8);
        out.push(len as u8);
    }
    out.extend_from_slice(content);
    out
}

fn seq(content: &[u8]) -> Vec<u8> {
    tlv(0x30, content)
}

fn set(content: &[u8]) -> Vec<u8> {
    tlv(0x31, content)
}

fn oid(content: &[u8]) -> Vec<u8> {
    tlv(0x06, content)
}

fn utf8(value: &str) -> Vec<u8> {
    tlv(0x0c, value.as_bytes())
}

/// SET { SEQUENCE { OID, UTF8String } }
fn rdn(oid_content: &[u8], value: &str) -> Vec<u8> {
    set(&seq(&[oid(oid_content), utf8(value)].concat()))
}

fn parse(der: &[u8]) -> Result<Name<'_>, Error> {
    let mut parser = Parser::new(untrusted::Input::from(der));
    let name = Name::parse(&mut parser)?;
    assert!(parser.end());
    Ok(name)
}

fn parse_optional(der: &[u8]) -> Result<Name<'_>, Error> {
    let mut parser = Parser::new(untrusted::Input::from(der));
    let name = Name::parse_optional(&mut parser)?;
    assert!(parser.end());
    Ok(name)
}

#[test]
fn parse_two_rdn_name() {
    let der = seq(&[
        rdn(&[0x29, 0x02, 0x04], "Zaphod"),
        rdn(&[0x88, 0x37, 0x01], "Beeblebrox"),
    ]
    .concat());

    let name = parse(&der).unwrap();
    assert_eq!(name.len(), 2);
    assert!(name.rdns()[0].oid().matches(&[1, 1, 2, 4]));
    assert!(name.rdns()[1].oid().matches(&[2, 999, 1]));
    assert_eq!(
        name.rdns()[0].value().value().as_slice_less_safe(),
        b"Zaphod"
    );
    assert_eq!(
        name.rdns()[1].value().value().as_slice_less_safe(),
        b"Beeblebrox"
    );

    assert_eq!(name.check_eq(&name), Ok(()));
}

#[test]
fn canonical_order_is_oid_order() {
    // Encoded as 1.2.3, 1.2.4, 1.2; canonical order is 1.2, 1.2.3, 1.2.4.
    let der = seq(&[
        rdn(&[0x2a, 0x03], "Warudo"),
        rdn(&[0x2a, 0x04], "!!!"),
        rdn(&[0x2a], "Za"),
    ]
    .concat());

    let name = parse(&der).unwrap();
    let values: Vec<&[u8]> = name
        .rdns()
        .iter()
        .map(|rdn| rdn.value().value().as_slice_less_safe())
        .collect();
    assert_eq!(values, [&b"Za"[..], b"Warudo", b"!!!"]);
    assert!(name
        .rdns()
        .windows(2)
        .all(|pair| pair[0].oid() <= pair[1].oid()));
}

#[test]
fn permuted_encodings_compare_equal() {
    let a = rdn(&[0x55, 0x04, 0x06], "ZZ");
    let b = rdn(&[0x55, 0x04, 0x0a], "Sirius Cybernetics");
    let c = rdn(&[0x55, 0x04, 0x03], "marvin");

    let abc = seq(&[a.clone(), b.clone(), c.clone()].concat());
    let cba = seq(&[c, b, a].concat());

    let left = parse(&abc).unwrap();
    let right = parse(&cba).unwrap();
    assert_eq!(left.check_eq(&right), Ok(()));
    assert_eq!(right.check_eq(&left), Ok(()));
    assert_eq!(left, right);
}

#[test]
fn already_sorted_encoding_is_unchanged() {
    let der = seq(&[
        rdn(&[0x55, 0x04, 0x03], "marvin"),
        rdn(&[0x55, 0x04, 0x06], "ZZ"),
        rdn(&[0x55, 0x04, 0x0a], "Sirius Cybernetics"),
    ]
    .concat());

    let name = parse(&der).unwrap();
    let values: Vec<&[u8]> = name
        .rdns()
        .iter()
        .map(|rdn| rdn.value().value().as_slice_less_safe())
        .collect();
    assert_eq!(values, [&b"marvin"[..], b"ZZ", b"Sirius Cybernetics"]);
}

#[test]
fn equal_oids_keep_encoded_order() {
    // Two RDNs with the same OID: the sort is stable, so their relative
    // order survives canonicalization.
    let der = seq(&[rdn(&[0x2a], "second"), rdn(&[0x2a], "first")].concat());

    let name = parse(&der).unwrap();
    assert_eq!(
        name.rdns()[0].value().value().as_slice_less_safe(),
        b"second"
    );
    assert_eq!(name.rdns()[1].value().value().as_slice_less_safe(), b"first");
}

#[test]
fn empty_name_mandatory_vs_optional() {
    let der = seq(&[]);

    assert_eq!(parse(&der).err(), Some(Error::BadDer));

    let name = parse_optional(&der).unwrap();
    assert!(name.is_empty());
    assert_eq!(name.len(), 0);
}

#[test]
fn multi_valued_rdn_is_unsupported() {
    // One SET holding two AttributeTypeAndValue pairs: legal DER, but a
    // construct this decoder refuses by policy.
    let ava_a = seq(&[oid(&[0x55, 0x04, 0x03]), utf8("a")].concat());
    let ava_b = seq(&[oid(&[0x55, 0x04, 0x0a]), utf8("b")].concat());
    let der = seq(&set(&[ava_a, ava_b].concat()));

    assert_eq!(parse(&der).err(), Some(Error::UnsupportedName));
}

#[test]
fn rdn_capacity_boundary() {
    let mut rdns = Vec::new();
    for i in 0..MAX_RDNS {
        rdns.extend_from_slice(&rdn(&[0x2a, i as u8], "x"));
    }
    let full = seq(&rdns);
    assert_eq!(parse(&full).unwrap().len(), MAX_RDNS);

    rdns.extend_from_slice(&rdn(&[0x2a, MAX_RDNS as u8], "x"));
    let over = seq(&rdns);
    assert_eq!(parse(&over).err(), Some(Error::CapacityExceeded));
}

#[test]
fn rdn_must_be_a_set() {
    // SEQUENCE where the RDN SET belongs.
    let der = seq(&seq(&seq(&[oid(&[0x2a]), utf8("x")].concat())));
    assert_eq!(parse(&der).err(), Some(Error::BadDer));
}

#[test]
fn attribute_type_must_be_an_oid() {
    let der = seq(&set(&seq(&[tlv(0x02, &[0x01]), utf8("x")].concat())));
    assert_eq!(parse(&der).err(), Some(Error::BadDer));
}

#[test]
fn attribute_value_must_be_a_string_type() {
    let der = seq(&set(&seq(&[oid(&[0x2a]), tlv(0x02, &[0x01])].concat())));
    assert_eq!(parse(&der).err(), Some(Error::BadDer));
}

#[test]
fn trailing_bytes_inside_ava_rejected() {
    let der = seq(&set(&seq(
        &[oid(&[0x2a]), utf8("x"), tlv(0x05, &[])].concat(),
    )));
    assert_eq!(parse(&der).err(), Some(Error::BadDer));
}

#[test]
fn mismatch_diagnostics() {
    let one = seq(&rdn(&[0x55, 0x04, 0x03], "marvin"));
    let two = seq(&[
        rdn(&[0x55, 0x04, 0x03], "marvin"),
        rdn(&[0x55, 0x04, 0x06], "ZZ"),
    ]
    .concat());
    let other_oid = seq(&rdn(&[0x55, 0x04, 0x0a], "marvin"));
    let longer_value = seq(&rdn(&[0x55, 0x04, 0x03], "marvin2"));
    let other_value = seq(&rdn(&[0x55, 0x04, 0x03], "MARVIN"));

    let one = parse(&one).unwrap();
    let two = parse(&two).unwrap();
    let other_oid = parse(&other_oid).unwrap();
    let longer_value = parse(&longer_value).unwrap();
    let other_value = parse(&other_value).unwrap();

    assert_eq!(one.check_eq(&two), Err(NameMismatch::RdnCount));
    assert_eq!(one.check_eq(&other_oid), Err(NameMismatch::AttributeType));
    assert_eq!(one.check_eq(&longer_value), Err(NameMismatch::ValueLength));
    assert_eq!(one.check_eq(&other_value), Err(NameMismatch::Value));
    assert_eq!(one.check_eq(&one), Ok(()));

    assert_eq!(
        format!("{}", NameMismatch::RdnCount),
        "differing number of RDNs"
    );
    assert_ne!(one, two);
}

#[test]
fn comparison_ignores_the_value_tag() {
    // The comparison is over the value bytes only; charset normalization
    // is documented as out of scope, and that cuts both ways.
    let as_utf8 = seq(&rdn(&[0x55, 0x04, 0x03], "marvin"));
    let as_printable = seq(&set(&seq(
        &[oid(&[0x55, 0x04, 0x03]), tlv(0x13, b"marvin")].concat(),
    )));

    let as_utf8 = parse(&as_utf8).unwrap();
    let as_printable = parse(&as_printable).unwrap();
    assert_eq!(as_utf8.check_eq(&as_printable), Ok(()));
}

#[test]
fn decoder_stops_at_the_name_boundary() {
    // A Name followed by a sibling TLV: the decoder must consume the Name
    // exactly and leave the sibling for the caller.
    let mut der = seq(&rdn(&[0x55, 0x04, 0x03], "marvin"));
    der.extend_from_slice(&tlv(0x02, &[0x2a]));

    let mut parser = Parser::new(untrusted::Input::from(&der[..]));
    let name = Name::parse(&mut parser).unwrap();
    assert_eq!(name.len(), 1);
    assert!(!parser.end());
    let sibling = parser.next().unwrap();
    assert_eq!(sibling.value().as_slice_less_safe(), &[0x2a]);
    assert!(parser.end());
}

#[test]
fn truncated_prefixes_never_parse() {
    let der = seq(&[
        rdn(&[0x55, 0x04, 0x06], "ZZ"),
        rdn(&[0x55, 0x04, 0x0a], "Sirius Cybernetics"),
        rdn(&[0x88, 0x37, 0x01], "Beeblebrox"),
    ]
    .concat());

    for len in 0..der.len() {
        assert!(
            parse(&der[..len]).is_err(),
            "prefix of length {} unexpectedly parsed",
            len
        );
    }
}
