//! Wire codec helpers
//!
//! Field names go over the wire in snake_case and enum values in camelCase.
//! Both are plain serde attributes on the schema types. This module holds
//! the pieces that need hand-written serde code: the polymorphic [`Image`]
//! entry and null-tolerant decoding of list and string members.
//!
//! ## Image wire forms
//!
//! An image list element is either a bare URL string or an object with
//! `url` and `description` keys. Both decode to the same [`Image`] value,
//! element by element, so one array may mix the two forms. Object keys are
//! matched case-insensitively and unknown keys are skipped. URL and
//! description are trimmed. Any other JSON type is a decode error.
//!
//! Encoding writes the bare string unless a non-empty description is set.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image entry attached to search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    /// Image URL
    pub url: String,
    /// Optional description, present when image descriptions were requested
    pub description: Option<String>,
}

impl Image {
    /// Create an image without a description
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description, treating an empty string as absent
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

impl From<&str> for Image {
    fn from(url: &str) -> Self {
        Image::new(url.trim())
    }
}

impl Serialize for Image {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.description() {
            None => serializer.serialize_str(&self.url),
            Some(description) => {
                let mut state = serializer.serialize_struct("Image", 2)?;
                state.serialize_field("url", &self.url)?;
                state.serialize_field("description", description)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Image {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ImageVisitor)
    }
}

struct ImageVisitor;

impl<'de> Visitor<'de> for ImageVisitor {
    type Value = Image;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an image URL string or an object with url and description")
    }

    fn visit_str<E>(self, value: &str) -> Result<Image, E>
    where
        E: de::Error,
    {
        Ok(Image::from(value))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Image, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut url = String::new();
        let mut description = None;

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("url") {
                url = map
                    .next_value::<Option<String>>()?
                    .map(|u| u.trim().to_string())
                    .unwrap_or_default();
            } else if key.eq_ignore_ascii_case("description") {
                description = map
                    .next_value::<Option<String>>()?
                    .map(|d| d.trim().to_string());
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(Image { url, description })
    }
}

/// Decode a member that the API may send as `null`, falling back to the default
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat an empty string as absent when rendering
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
