use serde::{Deserialize, Serialize};

/// A refined prompt owned by the backend. The client never mutates one
/// except through explicit update calls.
///
/// `tags` is an ordered set of strings in memory but travels as a single
/// comma-delimited string on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prompt {
    pub id: String,
    pub original_prompt: String,
    pub optimised_prompt: String,
    #[serde(with = "comma_tags", default)]
    pub tags: Vec<String>,
}

/// A bookmark referencing a [`Prompt`] by id. The reference is weak: the
/// prompt may have been deleted since the favourite was created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favourite {
    pub id: String,
    pub created_at: String,
    pub prompt_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// PATCH body for `/users/{id}`. Absent fields are left untouched by
/// the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// PATCH body for `/prompts/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_comma_tags")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Response of `POST /refine`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RefineResponse {
    pub optimised_prompt: String,
}

/// Wire codec for the comma-delimited tag list. Splits on commas, trims
/// whitespace, and drops empty entries; `null` and a missing field both
/// decode to an empty list.
pub(crate) mod comma_tags {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&tags.join(","))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|raw| split_tags(&raw)).unwrap_or_default())
    }

    pub(crate) fn split_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub(crate) mod opt_comma_tags {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        tags: &Option<Vec<String>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match tags {
            Some(tags) => serializer.serialize_some(&tags.join(",")),
            None => serializer.serialize_none(),
        }
    }
}
