//! The Claim 169 identity record and its integer-keyed CBOR mapping.
//!
//! Demographic fields occupy keys 1-23; biometric fields occupy keys 50-65
//! (ten fingers in right-thumb-to-left-little order, two irises, face, two
//! palms, voice). Each biometric field is an array of entry maps
//! `{0: data, 1: format, 2: sub_format, 3: issuer}` with only `data`
//! required. Absent fields are omitted from the map, never encoded as null,
//! and biometric fields encode as arrays even with a single entry.
//!
//! The record serializes to its own CBOR byte string before being placed
//! under CWT key 169, so schema evolution cannot disturb the bytes a
//! signature covers.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cbor::{self, map_get, Value};
use crate::error::{CoreError, Result};

// Demographic field keys.
const KEY_ID: i64 = 1;
const KEY_VERSION: i64 = 2;
const KEY_LANGUAGE: i64 = 3;
const KEY_FULL_NAME: i64 = 4;
const KEY_FIRST_NAME: i64 = 5;
const KEY_MIDDLE_NAME: i64 = 6;
const KEY_LAST_NAME: i64 = 7;
const KEY_DATE_OF_BIRTH: i64 = 8;
const KEY_GENDER: i64 = 9;
const KEY_ADDRESS: i64 = 10;
const KEY_EMAIL: i64 = 11;
const KEY_PHONE: i64 = 12;
const KEY_NATIONALITY: i64 = 13;
const KEY_MARITAL_STATUS: i64 = 14;
const KEY_GUARDIAN: i64 = 15;
const KEY_PHOTO: i64 = 16;
const KEY_PHOTO_FORMAT: i64 = 17;
const KEY_BEST_QUALITY_FINGERS: i64 = 18;
const KEY_SECONDARY_FULL_NAME: i64 = 19;
const KEY_SECONDARY_LANGUAGE: i64 = 20;
const KEY_LOCATION_CODE: i64 = 21;
const KEY_LEGAL_STATUS: i64 = 22;
const KEY_COUNTRY_OF_ISSUANCE: i64 = 23;

/// First biometric field key.
pub const BIOMETRIC_KEY_FIRST: i64 = 50;
/// Last biometric field key.
pub const BIOMETRIC_KEY_LAST: i64 = 65;

// Biometric entry keys.
const BIO_DATA: i64 = 0;
const BIO_FORMAT: i64 = 1;
const BIO_SUB_FORMAT: i64 = 2;
const BIO_ISSUER: i64 = 3;

/// Gender (key 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male = 1,
    Female = 2,
    Other = 3,
}

impl Gender {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            3 => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn code(&self) -> u64 {
        *self as u64
    }
}

/// Marital status (key 14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Unmarried = 1,
    Married = 2,
    Divorced = 3,
}

impl MaritalStatus {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(MaritalStatus::Unmarried),
            2 => Some(MaritalStatus::Married),
            3 => Some(MaritalStatus::Divorced),
            _ => None,
        }
    }

    pub fn code(&self) -> u64 {
        *self as u64
    }
}

/// Photo format (key 17).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoFormat {
    Jpeg = 1,
    Jpeg2000 = 2,
    Avif = 3,
    Webp = 4,
}

impl PhotoFormat {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(PhotoFormat::Jpeg),
            2 => Some(PhotoFormat::Jpeg2000),
            3 => Some(PhotoFormat::Avif),
            4 => Some(PhotoFormat::Webp),
            _ => None,
        }
    }

    pub fn code(&self) -> u64 {
        *self as u64
    }
}

/// One biometric entry: opaque data plus optional format metadata.
///
/// The data buffer is wiped on drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Biometric {
    pub data: Vec<u8>,
    pub format: Option<u64>,
    pub sub_format: Option<u64>,
    pub issuer: Option<String>,
}

impl Biometric {
    /// An entry carrying only data.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            format: None,
            sub_format: None,
            issuer: None,
        }
    }

    fn to_value(&self) -> Value {
        let mut entries = vec![(Value::from_i64(BIO_DATA), Value::Bytes(self.data.clone()))];
        if let Some(format) = self.format {
            entries.push((Value::from_i64(BIO_FORMAT), Value::Uint(format)));
        }
        if let Some(sub_format) = self.sub_format {
            entries.push((Value::from_i64(BIO_SUB_FORMAT), Value::Uint(sub_format)));
        }
        if let Some(issuer) = &self.issuer {
            entries.push((Value::from_i64(BIO_ISSUER), Value::Text(issuer.clone())));
        }
        Value::Map(entries)
    }

    fn from_value(value: &Value, field: &str) -> Result<Self> {
        let map = value.as_map().ok_or_else(|| {
            CoreError::CwtParse(format!("{} entry is not a map", field))
        })?;
        let data = match map_get(map, BIO_DATA) {
            Some(Value::Bytes(b)) => b.clone(),
            _ => {
                return Err(CoreError::CwtParse(format!(
                    "{} entry is missing its data byte string",
                    field
                )))
            }
        };
        Ok(Self {
            data,
            format: opt_uint(map, BIO_FORMAT, field)?,
            sub_format: opt_uint(map, BIO_SUB_FORMAT, field)?,
            issuer: opt_text(map, BIO_ISSUER, field)?,
        })
    }
}

/// The typed Claim 169 identity record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    // Demographics (keys 1-23)
    pub id: Option<String>,
    pub version: Option<String>,
    pub language: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    /// `YYYY-MM-DD` or `YYYYMMDD`; stored as given, never normalized.
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub guardian: Option<String>,
    pub photo: Option<Vec<u8>>,
    pub photo_format: Option<PhotoFormat>,
    pub best_quality_fingers: Option<Vec<u64>>,
    pub secondary_full_name: Option<String>,
    pub secondary_language: Option<String>,
    pub location_code: Option<String>,
    pub legal_status: Option<String>,
    pub country_of_issuance: Option<String>,

    // Biometrics (keys 50-65)
    pub right_thumb: Option<Vec<Biometric>>,
    pub right_pointer_finger: Option<Vec<Biometric>>,
    pub right_middle_finger: Option<Vec<Biometric>>,
    pub right_ring_finger: Option<Vec<Biometric>>,
    pub right_little_finger: Option<Vec<Biometric>>,
    pub left_thumb: Option<Vec<Biometric>>,
    pub left_pointer_finger: Option<Vec<Biometric>>,
    pub left_middle_finger: Option<Vec<Biometric>>,
    pub left_ring_finger: Option<Vec<Biometric>>,
    pub left_little_finger: Option<Vec<Biometric>>,
    pub right_iris: Option<Vec<Biometric>>,
    pub left_iris: Option<Vec<Biometric>>,
    pub face: Option<Vec<Biometric>>,
    pub right_palm: Option<Vec<Biometric>>,
    pub left_palm: Option<Vec<Biometric>>,
    pub voice: Option<Vec<Biometric>>,
}

impl IdentityRecord {
    /// Serialize to a CBOR map value.
    ///
    /// With `skip_biometrics`, keys 50-65 are omitted entirely.
    pub fn to_value(&self, skip_biometrics: bool) -> Value {
        let mut entries = Vec::new();

        push_text(&mut entries, KEY_ID, &self.id);
        push_text(&mut entries, KEY_VERSION, &self.version);
        push_text(&mut entries, KEY_LANGUAGE, &self.language);
        push_text(&mut entries, KEY_FULL_NAME, &self.full_name);
        push_text(&mut entries, KEY_FIRST_NAME, &self.first_name);
        push_text(&mut entries, KEY_MIDDLE_NAME, &self.middle_name);
        push_text(&mut entries, KEY_LAST_NAME, &self.last_name);
        push_text(&mut entries, KEY_DATE_OF_BIRTH, &self.date_of_birth);
        if let Some(gender) = self.gender {
            entries.push((Value::from_i64(KEY_GENDER), Value::Uint(gender.code())));
        }
        push_text(&mut entries, KEY_ADDRESS, &self.address);
        push_text(&mut entries, KEY_EMAIL, &self.email);
        push_text(&mut entries, KEY_PHONE, &self.phone);
        push_text(&mut entries, KEY_NATIONALITY, &self.nationality);
        if let Some(status) = self.marital_status {
            entries.push((Value::from_i64(KEY_MARITAL_STATUS), Value::Uint(status.code())));
        }
        push_text(&mut entries, KEY_GUARDIAN, &self.guardian);
        if let Some(photo) = &self.photo {
            entries.push((Value::from_i64(KEY_PHOTO), Value::Bytes(photo.clone())));
        }
        if let Some(format) = self.photo_format {
            entries.push((Value::from_i64(KEY_PHOTO_FORMAT), Value::Uint(format.code())));
        }
        if let Some(fingers) = &self.best_quality_fingers {
            entries.push((
                Value::from_i64(KEY_BEST_QUALITY_FINGERS),
                Value::Array(fingers.iter().map(|&f| Value::Uint(f)).collect()),
            ));
        }
        push_text(&mut entries, KEY_SECONDARY_FULL_NAME, &self.secondary_full_name);
        push_text(&mut entries, KEY_SECONDARY_LANGUAGE, &self.secondary_language);
        push_text(&mut entries, KEY_LOCATION_CODE, &self.location_code);
        push_text(&mut entries, KEY_LEGAL_STATUS, &self.legal_status);
        push_text(&mut entries, KEY_COUNTRY_OF_ISSUANCE, &self.country_of_issuance);

        if !skip_biometrics {
            for (key, field) in self.biometric_fields() {
                if let Some(bios) = field {
                    entries.push((
                        Value::from_i64(key),
                        Value::Array(bios.iter().map(Biometric::to_value).collect()),
                    ));
                }
            }
        }

        Value::Map(entries)
    }

    /// Serialize to CBOR bytes (the value of CWT claim 169).
    pub fn to_bytes(&self, skip_biometrics: bool) -> Vec<u8> {
        cbor::encode(&self.to_value(skip_biometrics))
    }

    /// Parse the inner identity map.
    ///
    /// Unknown keys are ignored (they survive only in the raw signed bytes).
    /// With `skip_biometrics`, keys 50-65 are skipped without allocating
    /// their contents.
    pub fn from_bytes(data: &[u8], skip_biometrics: bool) -> Result<Self> {
        let value = cbor::decode(data).map_err(|e| match e {
            CoreError::CoseParse(msg) => CoreError::CwtParse(msg),
            other => other,
        })?;
        Self::from_value(&value, skip_biometrics)
    }

    /// Parse from a decoded CBOR map value.
    pub fn from_value(value: &Value, skip_biometrics: bool) -> Result<Self> {
        let map = value
            .as_map()
            .ok_or_else(|| CoreError::CwtParse("claim 169 content is not a map".into()))?;

        let mut record = IdentityRecord {
            id: opt_text(map, KEY_ID, "id")?,
            version: opt_text(map, KEY_VERSION, "version")?,
            language: opt_text(map, KEY_LANGUAGE, "language")?,
            full_name: opt_text(map, KEY_FULL_NAME, "full_name")?,
            first_name: opt_text(map, KEY_FIRST_NAME, "first_name")?,
            middle_name: opt_text(map, KEY_MIDDLE_NAME, "middle_name")?,
            last_name: opt_text(map, KEY_LAST_NAME, "last_name")?,
            date_of_birth: opt_text(map, KEY_DATE_OF_BIRTH, "date_of_birth")?,
            gender: opt_enum(map, KEY_GENDER, "gender", Gender::from_code)?,
            address: opt_text(map, KEY_ADDRESS, "address")?,
            email: opt_text(map, KEY_EMAIL, "email")?,
            phone: opt_text(map, KEY_PHONE, "phone")?,
            nationality: opt_text(map, KEY_NATIONALITY, "nationality")?,
            marital_status: opt_enum(
                map,
                KEY_MARITAL_STATUS,
                "marital_status",
                MaritalStatus::from_code,
            )?,
            guardian: opt_text(map, KEY_GUARDIAN, "guardian")?,
            photo: opt_bytes(map, KEY_PHOTO, "photo")?,
            photo_format: opt_enum(map, KEY_PHOTO_FORMAT, "photo_format", PhotoFormat::from_code)?,
            best_quality_fingers: opt_uint_array(map, KEY_BEST_QUALITY_FINGERS)?,
            secondary_full_name: opt_text(map, KEY_SECONDARY_FULL_NAME, "secondary_full_name")?,
            secondary_language: opt_text(map, KEY_SECONDARY_LANGUAGE, "secondary_language")?,
            location_code: opt_text(map, KEY_LOCATION_CODE, "location_code")?,
            legal_status: opt_text(map, KEY_LEGAL_STATUS, "legal_status")?,
            country_of_issuance: opt_text(map, KEY_COUNTRY_OF_ISSUANCE, "country_of_issuance")?,
            ..Default::default()
        };

        if !skip_biometrics {
            for (key, value) in map {
                let Some(key) = key.as_i64() else { continue };
                if !(BIOMETRIC_KEY_FIRST..=BIOMETRIC_KEY_LAST).contains(&key) {
                    continue;
                }
                let (name, slot) = record.biometric_slot(key);
                let items = value.as_array().ok_or_else(|| {
                    CoreError::CwtParse(format!("{} is not an array", name))
                })?;
                let parsed = items
                    .iter()
                    .map(|item| Biometric::from_value(item, name))
                    .collect::<Result<Vec<_>>>()?;
                *slot = Some(parsed);
            }
        }

        Ok(record)
    }

    /// True when any biometric field is populated.
    pub fn has_biometrics(&self) -> bool {
        self.biometric_fields().iter().any(|(_, f)| f.is_some())
    }

    fn biometric_fields(&self) -> [(i64, &Option<Vec<Biometric>>); 16] {
        [
            (50, &self.right_thumb),
            (51, &self.right_pointer_finger),
            (52, &self.right_middle_finger),
            (53, &self.right_ring_finger),
            (54, &self.right_little_finger),
            (55, &self.left_thumb),
            (56, &self.left_pointer_finger),
            (57, &self.left_middle_finger),
            (58, &self.left_ring_finger),
            (59, &self.left_little_finger),
            (60, &self.right_iris),
            (61, &self.left_iris),
            (62, &self.face),
            (63, &self.right_palm),
            (64, &self.left_palm),
            (65, &self.voice),
        ]
    }

    fn biometric_slot(&mut self, key: i64) -> (&'static str, &mut Option<Vec<Biometric>>) {
        match key {
            50 => ("right_thumb", &mut self.right_thumb),
            51 => ("right_pointer_finger", &mut self.right_pointer_finger),
            52 => ("right_middle_finger", &mut self.right_middle_finger),
            53 => ("right_ring_finger", &mut self.right_ring_finger),
            54 => ("right_little_finger", &mut self.right_little_finger),
            55 => ("left_thumb", &mut self.left_thumb),
            56 => ("left_pointer_finger", &mut self.left_pointer_finger),
            57 => ("left_middle_finger", &mut self.left_middle_finger),
            58 => ("left_ring_finger", &mut self.left_ring_finger),
            59 => ("left_little_finger", &mut self.left_little_finger),
            60 => ("right_iris", &mut self.right_iris),
            61 => ("left_iris", &mut self.left_iris),
            62 => ("face", &mut self.face),
            63 => ("right_palm", &mut self.right_palm),
            64 => ("left_palm", &mut self.left_palm),
            65 => ("voice", &mut self.voice),
            _ => unreachable!("biometric key out of range"),
        }
    }
}

fn push_text(entries: &mut Vec<(Value, Value)>, key: i64, field: &Option<String>) {
    if let Some(text) = field {
        entries.push((Value::from_i64(key), Value::Text(text.clone())));
    }
}

fn opt_text(map: &[(Value, Value)], key: i64, name: &str) -> Result<Option<String>> {
    match map_get(map, key) {
        None => Ok(None),
        Some(Value::Text(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CoreError::CwtParse(format!("{} is not text", name))),
    }
}

fn opt_bytes(map: &[(Value, Value)], key: i64, name: &str) -> Result<Option<Vec<u8>>> {
    match map_get(map, key) {
        None => Ok(None),
        Some(Value::Bytes(b)) => Ok(Some(b.clone())),
        Some(_) => Err(CoreError::CwtParse(format!("{} is not a byte string", name))),
    }
}

fn opt_uint(map: &[(Value, Value)], key: i64, name: &str) -> Result<Option<u64>> {
    match map_get(map, key) {
        None => Ok(None),
        Some(Value::Uint(n)) => Ok(Some(*n)),
        Some(_) => Err(CoreError::CwtParse(format!(
            "{} is not an unsigned integer",
            name
        ))),
    }
}

fn opt_enum<T>(
    map: &[(Value, Value)],
    key: i64,
    name: &str,
    from_code: fn(u64) -> Option<T>,
) -> Result<Option<T>> {
    match opt_uint(map, key, name)? {
        None => Ok(None),
        Some(code) => from_code(code)
            .map(Some)
            .ok_or_else(|| CoreError::CwtParse(format!("{} value {} is out of range", name, code))),
    }
}

fn opt_uint_array(map: &[(Value, Value)], key: i64) -> Result<Option<Vec<u64>>> {
    match map_get(map, key) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_uint().ok_or_else(|| {
                    CoreError::CwtParse("best_quality_fingers entry is not an unsigned integer".into())
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(CoreError::CwtParse(
            "best_quality_fingers is not an array".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_demographics() -> IdentityRecord {
        IdentityRecord {
            id: Some("FULL-DEMO-001".into()),
            version: Some("1.0.0".into()),
            language: Some("en".into()),
            full_name: Some("Full Demographics Person".into()),
            first_name: Some("Full".into()),
            middle_name: Some("Demo".into()),
            last_name: Some("Person".into()),
            date_of_birth: Some("1985-06-15".into()),
            gender: Some(Gender::Female),
            address: Some("456 Demo Avenue, Test City".into()),
            email: Some("full@demo.org".into()),
            phone: Some("+1987654321".into()),
            nationality: Some("CA".into()),
            marital_status: Some(MaritalStatus::Married),
            guardian: Some("Guardian Name".into()),
            photo: Some(vec![0xff, 0xd8, 0xff]),
            photo_format: Some(PhotoFormat::Jpeg),
            best_quality_fingers: Some(vec![1, 6]),
            secondary_full_name: Some("Nom Complet".into()),
            secondary_language: Some("fr".into()),
            location_code: Some("CA-QC".into()),
            legal_status: Some("permanent_resident".into()),
            country_of_issuance: Some("CA".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_demographics_roundtrip() {
        let record = full_demographics();
        let bytes = record.to_bytes(false);
        let decoded = IdentityRecord::from_bytes(&bytes, false).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_roundtrip_is_byte_stable() {
        let record = full_demographics();
        let bytes = record.to_bytes(false);
        let reencoded = IdentityRecord::from_bytes(&bytes, false)
            .unwrap()
            .to_bytes(false);
        assert_eq!(reencoded, bytes);
    }

    #[test]
    fn test_all_16_biometric_fields_roundtrip() {
        let mut record = IdentityRecord {
            id: Some("BIO-ALL-001".into()),
            ..Default::default()
        };
        for key in BIOMETRIC_KEY_FIRST..=BIOMETRIC_KEY_LAST {
            let (name, slot) = record.biometric_slot(key);
            *slot = Some(vec![Biometric {
                data: name.as_bytes().to_vec(),
                format: Some(0),
                sub_format: None,
                issuer: Some(format!("{}_issuer", name)),
            }]);
        }
        let bytes = record.to_bytes(false);
        let decoded = IdentityRecord::from_bytes(&bytes, false).unwrap();
        assert_eq!(decoded, record);

        // Each field holds exactly one entry carrying its own name.
        let mut decoded = decoded;
        for key in BIOMETRIC_KEY_FIRST..=BIOMETRIC_KEY_LAST {
            let (name, slot) = decoded.biometric_slot(key);
            let entries = slot.as_ref().expect(name);
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].data, name.as_bytes());
        }
    }

    #[test]
    fn test_single_entry_encodes_as_array() {
        let record = IdentityRecord {
            face: Some(vec![Biometric::new(b"FACE".to_vec())]),
            ..Default::default()
        };
        let value = record.to_value(false);
        let map = value.as_map().unwrap();
        assert!(matches!(map_get(map, 62), Some(Value::Array(a)) if a.len() == 1));
    }

    #[test]
    fn test_skip_biometrics_on_encode() {
        let record = IdentityRecord {
            id: Some("SKIP".into()),
            face: Some(vec![Biometric::new(b"FACE".to_vec())]),
            ..Default::default()
        };
        let value = record.to_value(true);
        let map = value.as_map().unwrap();
        assert!(map_get(map, 62).is_none());
        assert!(map_get(map, KEY_ID).is_some());
    }

    #[test]
    fn test_skip_biometrics_on_decode() {
        let record = IdentityRecord {
            id: Some("SKIP".into()),
            voice: Some(vec![Biometric::new(b"VOICE".to_vec())]),
            ..Default::default()
        };
        let decoded = IdentityRecord::from_bytes(&record.to_bytes(false), true).unwrap();
        assert_eq!(decoded.id.as_deref(), Some("SKIP"));
        assert!(decoded.voice.is_none());
    }

    #[test]
    fn test_enum_out_of_range_rejected() {
        for (key, bad) in [(KEY_GENDER, 4u64), (KEY_MARITAL_STATUS, 0), (KEY_PHOTO_FORMAT, 5)] {
            let map = Value::Map(vec![(Value::from_i64(key), Value::Uint(bad))]);
            let err = IdentityRecord::from_bytes(&cbor::encode(&map), false).unwrap_err();
            assert!(matches!(err, CoreError::CwtParse(_)), "key {}", key);
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let map = Value::Map(vec![
            (Value::from_i64(KEY_ID), Value::Text("X".into())),
            (Value::from_i64(40), Value::Text("future field".into())),
        ]);
        let decoded = IdentityRecord::from_bytes(&cbor::encode(&map), false).unwrap();
        assert_eq!(decoded.id.as_deref(), Some("X"));
    }

    #[test]
    fn test_biometric_missing_data_rejected() {
        let entry = Value::Map(vec![(Value::from_i64(BIO_FORMAT), Value::Uint(0))]);
        let map = Value::Map(vec![(Value::from_i64(62), Value::Array(vec![entry]))]);
        assert!(IdentityRecord::from_bytes(&cbor::encode(&map), false).is_err());
    }

    #[test]
    fn test_wrongly_typed_field_rejected() {
        let map = Value::Map(vec![(Value::from_i64(KEY_ID), Value::Uint(7))]);
        assert!(IdentityRecord::from_bytes(&cbor::encode(&map), false).is_err());
    }

    #[test]
    fn test_multiple_entries_per_field() {
        let record = IdentityRecord {
            face: Some(vec![
                Biometric {
                    data: b"FACE_IMAGE_1".to_vec(),
                    format: Some(0),
                    sub_format: Some(1),
                    issuer: Some("Vendor1".into()),
                },
                Biometric {
                    data: b"FACE_IMAGE_2".to_vec(),
                    format: Some(0),
                    sub_format: Some(3),
                    issuer: Some("Vendor2".into()),
                },
            ]),
            ..Default::default()
        };
        let decoded = IdentityRecord::from_bytes(&record.to_bytes(false), false).unwrap();
        let face = decoded.face.unwrap();
        assert_eq!(face.len(), 2);
        assert_eq!(face[0].issuer.as_deref(), Some("Vendor1"));
        assert_eq!(face[1].data, b"FACE_IMAGE_2");
    }
}
