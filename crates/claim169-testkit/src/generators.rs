//! Proptest generators for property-based testing.

use proptest::prelude::*;

use claim169::{Biometric, CwtMeta, Gender, IdentityRecord, MaritalStatus, PhotoFormat};

/// Generate an optional short text field.
pub fn opt_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[ -~]{1,40}".prop_map(String::from))
}

/// Generate an optional gender.
pub fn gender() -> impl Strategy<Value = Option<Gender>> {
    prop::option::of(prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Other),
    ])
}

/// Generate an optional marital status.
pub fn marital_status() -> impl Strategy<Value = Option<MaritalStatus>> {
    prop::option::of(prop_oneof![
        Just(MaritalStatus::Unmarried),
        Just(MaritalStatus::Married),
        Just(MaritalStatus::Divorced),
    ])
}

/// Generate an optional photo with its format.
pub fn photo() -> impl Strategy<Value = (Option<Vec<u8>>, Option<PhotoFormat>)> {
    prop::option::of((
        prop::collection::vec(any::<u8>(), 1..64),
        prop_oneof![
            Just(PhotoFormat::Jpeg),
            Just(PhotoFormat::Jpeg2000),
            Just(PhotoFormat::Avif),
            Just(PhotoFormat::Webp),
        ],
    ))
    .prop_map(|pair| match pair {
        Some((photo, format)) => (Some(photo), Some(format)),
        None => (None, None),
    })
}

/// Generate an optional biometric field with 1-2 entries.
pub fn biometric_field() -> impl Strategy<Value = Option<Vec<Biometric>>> {
    prop::option::of(prop::collection::vec(biometric_entry(), 1..=2))
}

/// Generate a single biometric entry.
pub fn biometric_entry() -> impl Strategy<Value = Biometric> {
    (
        prop::collection::vec(any::<u8>(), 1..32),
        prop::option::of(0u64..4),
        prop::option::of(0u64..8),
        prop::option::of("[A-Za-z]{1,12}".prop_map(String::from)),
    )
        .prop_map(|(data, format, sub_format, issuer)| Biometric {
            data,
            format,
            sub_format,
            issuer,
        })
}

/// Generate an identity record mixing demographics and a few biometrics.
pub fn identity_record() -> impl Strategy<Value = IdentityRecord> {
    (
        (opt_text(), opt_text(), opt_text(), opt_text(), opt_text()),
        (gender(), marital_status(), photo()),
        (biometric_field(), biometric_field(), biometric_field()),
    )
        .prop_map(
            |(
                (id, full_name, address, email, nationality),
                (gender, marital_status, (photo, photo_format)),
                (face, right_thumb, voice),
            )| IdentityRecord {
                id,
                full_name,
                address,
                email,
                nationality,
                gender,
                marital_status,
                photo,
                photo_format,
                face,
                right_thumb,
                voice,
                ..Default::default()
            },
        )
}

/// Generate CWT metadata with a consistent validity window.
pub fn cwt_meta() -> impl Strategy<Value = CwtMeta> {
    (
        opt_text(),
        opt_text(),
        1_600_000_000u64..1_700_000_000,
        1_900_000_000u64..2_000_000_000,
    )
        .prop_map(|(issuer, subject, start, expires)| CwtMeta {
            issuer,
            subject,
            issued_at: Some(start),
            not_before: Some(start),
            expires_at: Some(expires),
        })
}
