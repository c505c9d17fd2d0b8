use serde_json::Value as JsonValue;

use crate::{
    types::{ChatCompletionResponse, Choice, ExpertInfo, ResponseMessage},
    PearlError,
};

/// Parses a completion response body.
///
/// The service emits a mix of camelCase and snake_case field names
/// depending on the backend path that produced the response, so each
/// logical field resolves against an ordered candidate list: first
/// non-null key wins. Absent fields fall back to documented defaults
/// rather than failing the parse.
pub(crate) fn decode_completion_response(body: &str) -> Result<ChatCompletionResponse, PearlError> {
    let data: JsonValue = serde_json::from_str(body).map_err(|err| {
        PearlError::Decode(format!(
            "invalid completion response JSON: {err}; body: {body}"
        ))
    })?;

    let choices = data
        .get("choices")
        .and_then(JsonValue::as_array)
        .map(|choices| choices.iter().map(decode_choice).collect())
        .unwrap_or_default();

    Ok(ChatCompletionResponse {
        id: string_field(&data, &["id"]).unwrap_or_default(),
        created: data
            .get("created")
            .and_then(JsonValue::as_u64)
            .unwrap_or(0),
        choices,
        question_id: string_field(&data, &["questionId", "question_id"]),
        user_id: string_field(&data, &["userId", "user_id"]),
    })
}

fn decode_choice(choice: &JsonValue) -> Choice {
    Choice {
        index: choice.get("index").and_then(JsonValue::as_i64).unwrap_or(0),
        message: decode_message(choice.get("message").unwrap_or(&JsonValue::Null)),
        finish_reason: string_field(choice, &["finish_reason"]).unwrap_or_default(),
    }
}

fn decode_message(message: &JsonValue) -> ResponseMessage {
    ResponseMessage {
        is_human: pick(message, &["isHuman", "is_human"])
            .and_then(JsonValue::as_bool)
            .unwrap_or(false),
        expert_info: pick(message, &["expertInfo", "expert_info"]).map(decode_expert_info),
        role: string_field(message, &["role"]).unwrap_or_else(|| "assistant".to_owned()),
        content: string_field(message, &["content"]),
    }
}

fn decode_expert_info(info: &JsonValue) -> ExpertInfo {
    ExpertInfo {
        name: string_field(info, &["name"]),
        job_description: string_field(info, &["jobDescription", "job_description"]),
        avatar_url: string_field(info, &["avatarUrl", "avatar_url"]),
    }
}

/// Returns the first candidate key whose value is present and non-null.
fn pick<'a>(object: &'a JsonValue, keys: &[&str]) -> Option<&'a JsonValue> {
    keys.iter().find_map(|key| match object.get(key) {
        None | Some(JsonValue::Null) => None,
        Some(value) => Some(value),
    })
}

fn string_field(object: &JsonValue, keys: &[&str]) -> Option<String> {
    pick(object, keys)
        .and_then(JsonValue::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::decode_completion_response;
    use crate::PearlError;

    #[test]
    fn decodes_camel_case_response() {
        let response = decode_completion_response(
            r#"{
                "id": "chatcmpl-test",
                "choices": [{
                    "index": 0,
                    "message": {
                        "isHuman": false,
                        "expertInfo": null,
                        "role": "assistant",
                        "content": "hi"
                    },
                    "finish_reason": "stop"
                }],
                "created": 1678886400,
                "questionId": null,
                "userId": null
            }"#,
        )
        .expect("must decode");

        assert_eq!(response.id, "chatcmpl-test");
        assert_eq!(response.created, 1_678_886_400);
        assert_eq!(response.choices.len(), 1);

        let choice = &response.choices[0];
        assert_eq!(choice.index, 0);
        assert_eq!(choice.finish_reason, "stop");
        assert!(!choice.message.is_human);
        assert!(choice.message.expert_info.is_none());
        assert_eq!(choice.message.role, "assistant");
        assert_eq!(choice.message.content.as_deref(), Some("hi"));
        assert!(response.question_id.is_none());
        assert!(response.user_id.is_none());
    }

    #[test]
    fn decodes_snake_case_variants() {
        let response = decode_completion_response(
            r#"{
                "id": "chatcmpl-test",
                "choices": [{
                    "index": 1,
                    "message": {
                        "is_human": true,
                        "expert_info": {
                            "name": "Dr. Lee",
                            "job_description": "Veterinarian",
                            "avatar_url": "https://cdn.pearl.com/a.png"
                        },
                        "role": "assistant",
                        "content": "checking"
                    },
                    "finish_reason": "stop"
                }],
                "created": 1,
                "question_id": "q-1",
                "user_id": "u-1"
            }"#,
        )
        .expect("must decode");

        let message = &response.choices[0].message;
        assert!(message.is_human);
        let expert = message.expert_info.as_ref().expect("must have expert info");
        assert_eq!(expert.name.as_deref(), Some("Dr. Lee"));
        assert_eq!(expert.job_description.as_deref(), Some("Veterinarian"));
        assert_eq!(
            expert.avatar_url.as_deref(),
            Some("https://cdn.pearl.com/a.png")
        );
        assert_eq!(response.question_id.as_deref(), Some("q-1"));
        assert_eq!(response.user_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn null_camel_case_key_falls_through_to_snake_case() {
        let response = decode_completion_response(
            r#"{
                "id": "x",
                "created": 1,
                "choices": [{
                    "message": {
                        "expertInfo": null,
                        "expert_info": {"name": "Sam"}
                    }
                }],
                "questionId": null,
                "question_id": "q-2"
            }"#,
        )
        .expect("must decode");

        let message = &response.choices[0].message;
        let expert = message.expert_info.as_ref().expect("must have expert info");
        assert_eq!(expert.name.as_deref(), Some("Sam"));
        assert_eq!(response.question_id.as_deref(), Some("q-2"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let response =
            decode_completion_response(r#"{"choices":[{"message":{}}]}"#).expect("must decode");

        assert_eq!(response.id, "");
        assert_eq!(response.created, 0);

        let choice = &response.choices[0];
        assert_eq!(choice.index, 0);
        assert_eq!(choice.finish_reason, "");
        assert_eq!(choice.message.role, "assistant");
        assert!(!choice.message.is_human);
        assert!(choice.message.content.is_none());
    }

    #[test]
    fn missing_choices_decode_to_empty() {
        let response = decode_completion_response(r#"{"id":"x","created":5}"#).expect("must decode");
        assert!(response.choices.is_empty());
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = decode_completion_response("not json").expect_err("must fail");
        assert!(matches!(err, PearlError::Decode(_)));
    }
}
