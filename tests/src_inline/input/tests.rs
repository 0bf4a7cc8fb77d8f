use super::*;

fn request(json: &str) -> EvalRequest {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_validate_accepts_text_and_word() {
    let sub = request(r#"{"word":"ぴらる","text":"とても短い"}"#)
        .validate()
        .unwrap();
    assert_eq!(sub.word, "ぴらる");
    assert_eq!(sub.text, "とても短い");
}

#[test]
fn test_desc_is_alias_for_text() {
    let sub = request(r#"{"word":"ぴらる","desc":"説明文です"}"#)
        .validate()
        .unwrap();
    assert_eq!(sub.text, "説明文です");
}

#[test]
fn test_missing_or_empty_fields_rejected() {
    assert_eq!(
        request(r#"{"word":"ぴらる"}"#).validate(),
        Err(InputError::MissingField("text"))
    );
    assert_eq!(
        request(r#"{"text":"説明"}"#).validate(),
        Err(InputError::MissingField("word"))
    );
    assert_eq!(
        request(r#"{"word":"","text":"説明"}"#).validate(),
        Err(InputError::MissingField("word"))
    );
    assert_eq!(
        request("{}").validate(),
        Err(InputError::MissingField("text"))
    );
}

#[test]
fn test_null_fields_are_missing() {
    assert_eq!(
        request(r#"{"word":null,"text":"説明"}"#).validate(),
        Err(InputError::MissingField("word"))
    );
}
