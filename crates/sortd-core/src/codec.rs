//! JSON decode/encode at the request boundary.

use crate::error::SortError;
use serde::{de::DeserializeOwned, Serialize};

/// Decode a request body.
///
/// A top-level `null` decodes as `T::default()`, so `null` is an empty
/// request rather than a malformed one. Trailing non-whitespace after the
/// first JSON value is rejected.
pub fn decode<T>(body: &[u8]) -> Result<T, SortError>
where
    T: DeserializeOwned + Default,
{
    let value: Option<T> = serde_json::from_slice(body).map_err(SortError::MalformedInput)?;
    Ok(value.unwrap_or_default())
}

/// Encode a response body.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SortError> {
    serde_json::to_vec(value).map_err(SortError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{BatchRequest, SortRequest, SortResponse};

    #[test]
    fn decodes_single_request() {
        let req: SortRequest = decode(br#"{"numbers":[3,1,2]}"#).unwrap();
        assert_eq!(req.numbers, vec![3, 1, 2]);
    }

    #[test]
    fn missing_and_null_numbers_are_empty() {
        let req: SortRequest = decode(br#"{}"#).unwrap();
        assert!(req.numbers.is_empty());
        let req: SortRequest = decode(br#"{"numbers":null}"#).unwrap();
        assert!(req.numbers.is_empty());
    }

    #[test]
    fn top_level_null_is_empty() {
        let batch: BatchRequest = decode(b"null").unwrap();
        assert!(batch.is_empty());
        let req: SortRequest = decode(b"null").unwrap();
        assert!(req.numbers.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: SortRequest = decode(br#"{"numbers":[2,1],"label":"x"}"#).unwrap();
        assert_eq!(req.numbers, vec![2, 1]);
    }

    #[test]
    fn malformed_bodies_are_client_errors() {
        for body in [
            &b""[..],
            b"{",
            b"not json",
            br#"{"numbers":[1,"two"]}"#,
            br#"{"numbers":[1.5]}"#,
            br#"{"numbers":[99999999999999999999]}"#,
            br#"{"numbers":[1]} trailing"#,
        ] {
            let err = decode::<SortRequest>(body).unwrap_err();
            assert!(err.is_client_error(), "body {:?}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn request_must_be_an_object() {
        for body in [&b"[3,1,2]"[..], b"[[3,1,2]]", b"[null]", b"7", br#""numbers""#] {
            let err = decode::<SortRequest>(body).unwrap_err();
            assert!(err.is_client_error(), "body {:?}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn batch_elements_must_be_objects() {
        for body in [&b"[[3,1,2]]"[..], b"[[[5,4]]]", b"[null]", br#"[{"numbers":[1]},[2]]"#] {
            let err = decode::<BatchRequest>(body).unwrap_err();
            assert!(matches!(err, SortError::MalformedInput(_)));
        }
    }

    #[test]
    fn numbers_key_is_case_insensitive() {
        let req: SortRequest = decode(br#"{"Numbers":[3,1,2]}"#).unwrap();
        assert_eq!(req.numbers, vec![3, 1, 2]);
        let req: SortRequest = decode(br#"{"NUMBERS":[9,8]}"#).unwrap();
        assert_eq!(req.numbers, vec![9, 8]);
    }

    #[test]
    fn repeated_numbers_key_keeps_last() {
        let req: SortRequest = decode(br#"{"numbers":[1],"Numbers":[5,4]}"#).unwrap();
        assert_eq!(req.numbers, vec![5, 4]);
    }

    #[test]
    fn batch_must_be_an_array() {
        let err = decode::<BatchRequest>(br#"{"numbers":[1]}"#).unwrap_err();
        assert!(matches!(err, SortError::MalformedInput(_)));
    }

    #[test]
    fn encodes_camel_case_field() {
        let body = encode(&SortResponse::new(vec![1, 2, 3])).unwrap();
        assert_eq!(body, br#"{"sortedNumbers":[1,2,3]}"#);
    }
}
